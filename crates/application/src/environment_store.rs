//! Environment variable store
//!
//! Holds the [`VariablesData`] aggregate in memory and mirrors every
//! mutation to a durable [`KeyValueStore`] as one JSON document. Storage
//! failures never reach the caller: they are reported through the
//! [`Notifier`] and the in-memory state stays authoritative.

use restpad_domain::notification::DEFAULT_NOTIFICATION_DURATION;
use restpad_domain::{Notification, VariableBindings, VariablesData};
use tracing::{debug, warn};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{KeyValueStore, Notifier};

/// Storage key holding the serialized [`VariablesData`].
pub const VARIABLES_STORAGE_KEY: &str = "restpad.environment-variables";

/// Environment CRUD over a durable key-value channel.
///
/// All mutations take `&mut self`, so each one runs as a single
/// read-modify-write; share the store behind a `Mutex` when several
/// callers need it.
pub struct EnvironmentStore<S, N> {
    storage: S,
    notifier: N,
    variables: VariablesData,
    /// Whether storage is known to hold what is in memory. Cleared when a
    /// load or write fails.
    in_sync: bool,
}

impl<S: KeyValueStore, N: Notifier> EnvironmentStore<S, N> {
    /// Opens the store, loading the persisted aggregate.
    ///
    /// A missing document yields an empty aggregate. An unreadable or
    /// malformed one also yields an empty aggregate and one notification.
    /// Nothing is written while loading.
    pub fn open(storage: S, notifier: N) -> Self {
        let mut store = Self {
            storage,
            notifier,
            variables: VariablesData::new(),
            in_sync: true,
        };

        match store.read_persisted() {
            Ok(Some(variables)) => {
                debug!(environments = variables.len(), "loaded environment variables");
                store.variables = variables;
            }
            Ok(None) => debug!("no persisted environment variables"),
            Err(error) => {
                store.in_sync = false;
                store.report("Failed to load environment variables", &error);
            }
        }

        store
    }

    /// Returns the in-memory aggregate.
    pub const fn variables(&self) -> &VariablesData {
        &self.variables
    }

    /// Returns the environment names.
    pub fn get_env(&self) -> Vec<String> {
        self.variables.names().map(str::to_string).collect()
    }

    /// Returns the bindings of `env`, empty if it does not exist.
    pub fn get_env_variables(&self, env: &str) -> VariableBindings {
        self.variables.variables(env).cloned().unwrap_or_default()
    }

    /// Inserts or overwrites `env` with `initial` bindings.
    pub fn add_env(&mut self, env: &str, initial: VariableBindings) {
        self.update(|variables| variables.insert(env, initial));
    }

    /// Deletes `env` and all its variables.
    pub fn remove_env(&mut self, env: &str) {
        self.update(|variables| {
            variables.remove(env);
        });
    }

    /// Binds `var` to `value` in `env`, creating `env` if needed.
    pub fn set_variable(&mut self, env: &str, var: &str, value: &str) {
        self.update(|variables| variables.set_variable(env, var, value));
    }

    /// Deletes a single binding.
    pub fn remove_variable(&mut self, env: &str, var: &str) {
        self.update(|variables| {
            variables.remove_variable(env, var);
        });
    }

    /// Moves all bindings of `old` to `new`.
    ///
    /// Applied to the latest persisted document when storage is in sync
    /// with memory, so writes made through another handle on the same
    /// channel are not lost. Does nothing to the aggregate if `old` is absent.
    pub fn rename_env(&mut self, old: &str, new: &str) {
        if self.in_sync {
            match self.read_persisted() {
                Ok(Some(latest)) => self.variables = latest,
                Ok(None) => {}
                Err(error) => {
                    self.in_sync = false;
                    self.report("Failed to read environment variables", &error);
                }
            }
        }

        self.update(|variables| {
            if !variables.rename(old, new) {
                debug!(env = old, "rename of missing environment ignored");
            }
        });
    }

    /// Empties the bindings of `env`, keeping the environment.
    pub fn clear_env(&mut self, env: &str) {
        self.update(|variables| variables.clear(env));
    }

    /// Returns true if `env` exists.
    pub fn environment_exists(&self, env: &str) -> bool {
        self.variables.contains(env)
    }

    /// Returns true if `env` exists and binds `var`.
    pub fn variable_exists(&self, env: &str, var: &str) -> bool {
        self.variables.contains_variable(env, var)
    }

    fn update(&mut self, mutate: impl FnOnce(&mut VariablesData)) {
        mutate(&mut self.variables);
        self.persist();
    }

    fn persist(&mut self) {
        let result = serde_json::to_string_pretty(&self.variables)
            .map(|json| json + "\n")
            .map_err(ApplicationError::from)
            .and_then(|json| {
                self.storage
                    .set(VARIABLES_STORAGE_KEY, &json)
                    .map_err(ApplicationError::from)
            });

        match result {
            Ok(()) => {
                self.in_sync = true;
                debug!(environments = self.variables.len(), "persisted environment variables");
            }
            Err(error) => {
                self.in_sync = false;
                self.report("Failed to save environment variables", &error);
            }
        }
    }

    fn read_persisted(&self) -> ApplicationResult<Option<VariablesData>> {
        let Some(json) = self.storage.get(VARIABLES_STORAGE_KEY)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn report(&self, message: &str, error: &ApplicationError) {
        warn!(code = error.code(), error = %error, "{message}");
        self.notifier.notify(
            Notification::new(message)
                .with_additional_message(error.message())
                .with_duration(DEFAULT_NOTIFICATION_DURATION),
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::StorageError;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryStorage {
        values: Mutex<HashMap<String, String>>,
        fail_writes: Mutex<bool>,
        writes: Mutex<usize>,
    }

    impl MemoryStorage {
        fn with_document(json: &str) -> Arc<Self> {
            let storage = Self::default();
            storage
                .values
                .lock()
                .unwrap()
                .insert(VARIABLES_STORAGE_KEY.to_string(), json.to_string());
            Arc::new(storage)
        }

        fn document(&self) -> Option<VariablesData> {
            self.values
                .lock()
                .unwrap()
                .get(VARIABLES_STORAGE_KEY)
                .map(|json| serde_json::from_str(json).unwrap())
        }

        fn writes(&self) -> usize {
            *self.writes.lock().unwrap()
        }

        fn fail_writes(&self, fail: bool) {
            *self.fail_writes.lock().unwrap() = fail;
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if *self.fail_writes.lock().unwrap() {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
            *self.writes.lock().unwrap() += 1;
            self.values
                .lock()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.values.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        fn seen(&self) -> Vec<Notification> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.lock().unwrap().push(notification);
        }
    }

    type TestStore = EnvironmentStore<Arc<MemoryStorage>, Arc<RecordingNotifier>>;

    fn open_empty() -> (TestStore, Arc<MemoryStorage>, Arc<RecordingNotifier>) {
        let storage = Arc::new(MemoryStorage::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let store = EnvironmentStore::open(Arc::clone(&storage), Arc::clone(&notifier));
        (store, storage, notifier)
    }

    fn bindings(pairs: &[(&str, &str)]) -> VariableBindings {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_open_without_document_starts_empty_and_writes_nothing() {
        let (store, storage, notifier) = open_empty();
        assert!(store.get_env().is_empty());
        assert_eq!(storage.writes(), 0);
        assert!(notifier.seen().is_empty());
    }

    #[test]
    fn test_open_loads_persisted_document() {
        let storage = MemoryStorage::with_document(r#"{"dev":{"host":"localhost"}}"#);
        let notifier = Arc::new(RecordingNotifier::default());
        let store = EnvironmentStore::open(Arc::clone(&storage), notifier);

        assert_eq!(store.get_env(), vec!["dev"]);
        assert_eq!(store.get_env_variables("dev"), bindings(&[("host", "localhost")]));
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn test_malformed_document_falls_back_with_one_notification() {
        let storage = MemoryStorage::with_document("{not json");
        let notifier = Arc::new(RecordingNotifier::default());
        let store = EnvironmentStore::open(Arc::clone(&storage), Arc::clone(&notifier));

        assert!(store.variables().is_empty());
        let seen = notifier.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, "Failed to load environment variables");
        assert!(seen[0].additional_message.is_some());
        assert_eq!(storage.writes(), 0);
    }

    #[test]
    fn test_end_to_end_walkthrough() {
        let (mut store, _, _) = open_empty();

        store.add_env("prod", bindings(&[("API_URL", "https://x")]));
        assert_eq!(store.get_env(), vec!["prod"]);

        store.set_variable("prod", "API_KEY", "k1");
        assert_eq!(
            store.get_env_variables("prod"),
            bindings(&[("API_URL", "https://x"), ("API_KEY", "k1")])
        );

        store.remove_variable("prod", "API_URL");
        assert_eq!(store.get_env_variables("prod"), bindings(&[("API_KEY", "k1")]));

        store.clear_env("prod");
        assert!(store.get_env_variables("prod").is_empty());
        assert!(store.environment_exists("prod"));

        store.remove_env("prod");
        assert!(store.get_env().is_empty());
    }

    #[test]
    fn test_every_mutation_persists_full_aggregate() {
        let (mut store, storage, _) = open_empty();

        store.add_env("dev", bindings(&[("a", "1")]));
        assert_eq!(storage.document().as_ref(), Some(store.variables()));

        store.set_variable("qa", "b", "2");
        assert_eq!(storage.document().as_ref(), Some(store.variables()));

        store.rename_env("qa", "staging");
        assert_eq!(storage.document().as_ref(), Some(store.variables()));

        store.remove_env("dev");
        assert_eq!(storage.document().as_ref(), Some(store.variables()));
        assert_eq!(storage.writes(), 4);
    }

    #[test]
    fn test_document_is_indented_with_trailing_newline() {
        let (mut store, storage, _) = open_empty();
        store.add_env("dev", bindings(&[("host", "localhost")]));

        let raw = storage.get(VARIABLES_STORAGE_KEY).unwrap().unwrap();
        assert_eq!(raw, "{\n  \"dev\": {\n    \"host\": \"localhost\"\n  }\n}\n");
    }

    #[test]
    fn test_set_variable_then_exists() {
        let (mut store, _, _) = open_empty();
        store.set_variable("dev", "token", "abc");

        assert!(store.variable_exists("dev", "token"));
        assert_eq!(store.get_env_variables("dev").get("token").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_missing_environment_reads_empty() {
        let (store, _, _) = open_empty();
        assert!(store.get_env_variables("nope").is_empty());
        assert!(!store.environment_exists("nope"));
        assert!(!store.variable_exists("nope", "x"));
    }

    #[test]
    fn test_noops_on_missing_names() {
        let (mut store, _, notifier) = open_empty();
        store.add_env("dev", bindings(&[("a", "1")]));

        store.remove_env("ghost");
        store.remove_variable("ghost", "a");
        store.remove_variable("dev", "ghost");
        store.rename_env("ghost", "other");

        assert_eq!(store.get_env(), vec!["dev"]);
        assert_eq!(store.get_env_variables("dev"), bindings(&[("a", "1")]));
        assert!(notifier.seen().is_empty());
    }

    #[test]
    fn test_rename_moves_bindings() {
        let (mut store, _, _) = open_empty();
        store.add_env("old", bindings(&[("a", "1"), ("b", "2")]));
        let before = store.get_env_variables("old");

        store.rename_env("old", "new");

        assert_eq!(store.get_env_variables("new"), before);
        assert!(!store.environment_exists("old"));
    }

    #[test]
    fn test_rename_uses_latest_persisted_document() {
        let (mut store, storage, _) = open_empty();
        store.add_env("dev", bindings(&[("a", "1")]));

        // Another handle on the same channel adds a variable.
        let mut other = EnvironmentStore::open(
            Arc::clone(&storage),
            Arc::new(RecordingNotifier::default()),
        );
        other.set_variable("dev", "b", "2");

        store.rename_env("dev", "prod");

        assert_eq!(store.get_env_variables("prod"), bindings(&[("a", "1"), ("b", "2")]));
        assert_eq!(storage.document().as_ref(), Some(store.variables()));
    }

    #[test]
    fn test_write_failure_is_reported_and_memory_stays_authoritative() {
        let (mut store, storage, notifier) = open_empty();
        store.add_env("dev", bindings(&[("a", "1")]));

        storage.fail_writes(true);
        store.set_variable("dev", "b", "2");

        let seen = notifier.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].message, "Failed to save environment variables");
        assert!(seen[0].additional_message.as_deref().unwrap().contains("quota"));
        assert_eq!(store.get_env_variables("dev"), bindings(&[("a", "1"), ("b", "2")]));

        // The stale persisted copy must not win over memory on rename.
        store.rename_env("dev", "prod");
        assert_eq!(store.get_env_variables("prod"), bindings(&[("a", "1"), ("b", "2")]));

        storage.fail_writes(false);
        store.set_variable("prod", "c", "3");
        assert_eq!(storage.document().as_ref(), Some(store.variables()));
    }
}
