use shortbloom_core::ShortenerError;
use typed_builder::TypedBuilder;

/// Default bound on candidate codes tried per `create` call.
pub const DEFAULT_MAX_ATTEMPTS: usize = 16;

/// Tuning for [`ShortenerService`](crate::ShortenerService).
#[derive(Debug, Clone, TypedBuilder)]
pub struct ShortenerConfig {
    /// Number of candidate codes tried before `create` gives up with
    /// [`ShortenerError::Exhausted`](shortbloom_core::ShortenerError::Exhausted).
    #[builder(default = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,
}

impl Default for ShortenerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ShortenerConfig {
    pub fn validate(&self) -> Result<(), ShortenerError> {
        if self.max_attempts == 0 {
            return Err(ShortenerError::InvalidConfig(
                "max attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}
