//! ID generation utilities.

use uuid::Uuid;

/// Generates a new record identifier.
///
/// Identifiers are UUID v7 strings, so they sort by creation time.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}
