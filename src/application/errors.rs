//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// Failures worth telling the group about. Delivery failures are not:
    /// the notification would go through the same broken channel.
    pub fn should_notify(&self) -> bool {
        matches!(self, BotError::Storage(_) | BotError::Internal(_))
    }
}

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failures_are_notified() {
        let err = BotError::from(StorageError::Unavailable("connection refused".to_string()));
        assert!(err.should_notify());
        assert_eq!(err.to_string(), "Storage error: Storage unavailable: connection refused");
    }

    #[test]
    fn test_delivery_failures_are_not_notified() {
        assert!(!BotError::Delivery("status 502".to_string()).should_notify());
        assert!(!BotError::MalformedPayload("eof".to_string()).should_notify());
    }
}
