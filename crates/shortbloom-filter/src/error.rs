use thiserror::Error;

/// Type alias for filter results.
pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error("invalid bloom filter configuration: {0}")]
    InvalidConfig(String),
}
