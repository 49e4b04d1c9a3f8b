use crate::shortcode::ShortCode;
use async_trait::async_trait;

type Result<T> = std::result::Result<T, crate::error::ShortenerError>;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Creates a shortened URL and returns the committed short code.
    ///
    /// The caller is expected to have validated the URL already.
    async fn create(&self, original_url: &str) -> Result<ShortCode>;

    /// Resolves a short code (optionally prefixed with `/`) to its URL.
    ///
    /// Returns `None` for malformed codes as well as unknown ones.
    async fn resolve(&self, code: &str) -> Result<Option<String>>;
}
