//! Record identifier generation

use uuid::Uuid;

/// Generate a fresh record identifier (UUIDv4, hyphenated)
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}
