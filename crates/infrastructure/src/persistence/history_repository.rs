//! Request history persistence.
//!
//! Stores request history as a JSON array, newest first, at the path given
//! by `AppConfig::history_file`.

use std::path::PathBuf;

use async_trait::async_trait;
use restpad_application::ports::{HistorySource, HistorySourceError};
use restpad_domain::RequestRecord;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Default number of records kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 500;

impl From<SerializationError> for HistorySourceError {
    fn from(error: SerializationError) -> Self {
        Self::Corrupt(error.to_string())
    }
}

/// File-backed request history.
#[derive(Debug)]
pub struct FileHistoryRepository {
    path: PathBuf,
    limit: usize,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileHistoryRepository {
    /// Creates a repository storing at most `limit` records at `path`.
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit: limit.max(1),
            write_lock: Mutex::new(()),
        }
    }

    async fn read(&self) -> Result<Vec<RequestRecord>, HistorySourceError> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(from_json_bytes(&content)?)
    }

    async fn write(&self, records: &[RequestRecord]) -> Result<(), HistorySourceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = to_json_stable_bytes(&records)?;
        fs::write(&self.path, content).await?;
        debug!(path = %self.path.display(), records = records.len(), "saved history");
        Ok(())
    }
}

#[async_trait]
impl HistorySource for FileHistoryRepository {
    async fn load(&self) -> Result<Vec<RequestRecord>, HistorySourceError> {
        self.read().await
    }

    async fn append(&self, record: RequestRecord) -> Result<(), HistorySourceError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        records.insert(0, record);
        records.truncate(self.limit);
        self.write(&records).await
    }

    async fn clear(&self) -> Result<(), HistorySourceError> {
        let _guard = self.write_lock.lock().await;
        self.write(&[]).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use restpad_domain::{HttpMethod, RequestStatus};
    use tempfile::tempdir;

    fn record(url: &str) -> RequestRecord {
        RequestRecord::new(HttpMethod::Get, url, &Utc::now(), RequestStatus::Ok, Some(200))
            .unwrap()
    }

    fn urls(records: &[RequestRecord]) -> Vec<&str> {
        records.iter().map(|r| r.url.as_str()).collect()
    }

    #[tokio::test]
    async fn load_returns_empty_when_no_file() {
        let dir = tempdir().expect("temp dir");
        let repo = FileHistoryRepository::new(dir.path().join("history.json"), 10);
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_keeps_newest_first_within_limit() {
        let dir = tempdir().expect("temp dir");
        let repo = FileHistoryRepository::new(dir.path().join("sub").join("history.json"), 3);

        for i in 0..5 {
            repo.append(record(&format!("/{i}"))).await.unwrap();
        }

        let loaded = repo.load().await.unwrap();
        assert_eq!(urls(&loaded), vec!["/4", "/3", "/2"]);
    }

    #[tokio::test]
    async fn clear_empties_history() {
        let dir = tempdir().expect("temp dir");
        let repo = FileHistoryRepository::new(dir.path().join("history.json"), 10);
        repo.append(record("/a")).await.unwrap();

        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("history.json");
        std::fs::write(&path, "[{").unwrap();

        let repo = FileHistoryRepository::new(path, 10);
        assert!(matches!(
            repo.load().await,
            Err(HistorySourceError::Corrupt(_))
        ));
    }
}
