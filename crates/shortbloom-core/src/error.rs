use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors related to the core value types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short code: {0}")]
    InvalidShortCode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("short code already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Whether the caller may reasonably retry the same operation later.
    pub fn is_retriable(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Timeout(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid shortener configuration: {0}")]
    InvalidConfig(String),
    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: usize },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ShortenerError {
    /// Whether the failed call may succeed if retried.
    pub fn is_retriable(&self) -> bool {
        match self {
            ShortenerError::Storage(e) => e.is_retriable(),
            ShortenerError::InvalidUrl(_)
            | ShortenerError::InvalidConfig(_)
            | ShortenerError::Exhausted { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retriable_storage_errors() {
        assert!(StorageError::Unavailable("down".into()).is_retriable());
        assert!(StorageError::Timeout("slow".into()).is_retriable());
        assert!(!StorageError::Conflict("abc123".into()).is_retriable());
        assert!(!StorageError::Operation("WRONGTYPE".into()).is_retriable());
    }

    #[test]
    fn shortener_error_wraps_storage_error() {
        let err: ShortenerError = StorageError::Timeout("get".into()).into();
        assert!(matches!(err, ShortenerError::Storage(StorageError::Timeout(_))));
        assert!(err.is_retriable());
        assert!(!ShortenerError::Exhausted { attempts: 16 }.is_retriable());
        assert!(!ShortenerError::InvalidConfig("max attempts".into()).is_retriable());
    }
}
