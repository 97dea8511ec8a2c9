//! Storage trait definition.

use crate::error::{MindcardsError, Result};

/// Key under which review progress is persisted.
pub const PROGRESS_KEY: &str = "learningData";

/// Key under which user-added cards are persisted.
pub const USER_CARDS_KEY: &str = "mentalModels";

/// String key/value persistence, one document per key.
pub trait Storage: Send + Sync {
    /// Read the document stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous document.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the document under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Keys become file names, so restrict them to a safe character set.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(MindcardsError::Storage(format!("Invalid storage key: {:?}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key(PROGRESS_KEY).is_ok());
        assert!(validate_key(USER_CARDS_KEY).is_ok());
        assert!(validate_key("dark-mode_2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../escape").is_err());
        assert!(validate_key("a b").is_err());
    }
}
