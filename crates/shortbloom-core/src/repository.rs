use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Key-value storage mapping short codes to original URLs.
///
/// Records are write-once: there is no update or delete. Implementations
/// must make [`Repository::insert`] atomic per key, since the shortener
/// relies on it as the authoritative collision check.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Retrieves the original URL for a given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Stores the URL for a code, overwriting any previous value.
    async fn put(&self, code: &ShortCode, url: &str) -> Result<()>;

    /// Stores the URL only if the code is not taken yet.
    /// Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, code: &ShortCode, url: &str) -> Result<()>;
}
