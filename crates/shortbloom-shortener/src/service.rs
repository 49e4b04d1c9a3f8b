use crate::config::{ShortenerConfig, DEFAULT_MAX_ATTEMPTS};
use async_trait::async_trait;
use shortbloom_core::{Repository, ShortCode, Shortener, ShortenerError, StorageError};
use shortbloom_filter::{BloomFilter, SharedBloomFilter};
use shortbloom_generator::Generator;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `Repository`, a `Generator` and a Bloom filter:
/// - candidates the filter reports as possibly taken are skipped without
///   touching the store
/// - surviving candidates are claimed with the repository's atomic
///   [`Repository::insert`], which settles races with other writers
/// - lookups for codes the filter has never seen return without a store
///   round trip
///
/// The filter lock is only held while a candidate is checked and marked,
/// never across store I/O.
///
/// The filter lives in this process and starts empty. With a shared or
/// persistent store such as Redis, records written before this instance
/// started (or by other instances) resolve to `None` here until this
/// filter has seen their codes. Creation stays collision-free regardless,
/// since the store's atomic insert is the final check.
#[derive(Debug)]
pub struct ShortenerService<R, G> {
    repository: Arc<R>,
    generator: Arc<G>,
    filter: Arc<SharedBloomFilter>,
    max_attempts: usize,
}

impl<R, G> Clone for ShortenerService<R, G> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            generator: Arc::clone(&self.generator),
            filter: Arc::clone(&self.filter),
            max_attempts: self.max_attempts,
        }
    }
}

impl<R: Repository, G: Generator> ShortenerService<R, G> {
    /// Creates a new `ShortenerService` with the default configuration.
    pub fn new(repository: R, generator: G, filter: BloomFilter) -> Self {
        Self::build(repository, generator, filter, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates a service from an explicit configuration.
    ///
    /// Fails with [`ShortenerError::InvalidConfig`] if `config` does not
    /// pass [`ShortenerConfig::validate`].
    pub fn with_config(
        repository: R,
        generator: G,
        filter: BloomFilter,
        config: ShortenerConfig,
    ) -> Result<Self, ShortenerError> {
        config.validate()?;
        Ok(Self::build(
            repository,
            generator,
            filter,
            config.max_attempts,
        ))
    }

    fn build(repository: R, generator: G, filter: BloomFilter, max_attempts: usize) -> Self {
        Self {
            repository: Arc::new(repository),
            generator: Arc::new(generator),
            filter: Arc::new(filter.into()),
            max_attempts,
        }
    }

    /// The membership filter, e.g. for reporting its false positive rate.
    pub fn filter(&self) -> &SharedBloomFilter {
        &self.filter
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

#[async_trait]
impl<R: Repository, G: Generator> Shortener for ShortenerService<R, G> {
    async fn create(&self, original_url: &str) -> Result<ShortCode, ShortenerError> {
        if original_url.is_empty() {
            return Err(ShortenerError::InvalidUrl(
                "URL cannot be empty".to_string(),
            ));
        }

        for attempt in 1..=self.max_attempts {
            let code: ShortCode = self.generator.generate().into();

            if !self.filter.insert_if_absent(code.as_bytes()) {
                trace!(code = %code, attempt, "Candidate might already exist, regenerating");
                continue;
            }

            match self.repository.insert(&code, original_url).await {
                Ok(()) => {
                    debug!(code = %code, attempt, "Created short code");
                    return Ok(code);
                }
                Err(StorageError::Conflict(_)) => {
                    // Another writer claimed the code without this filter seeing it.
                    warn!(code = %code, attempt, "Short code already stored, regenerating");
                }
                Err(e) => {
                    warn!(code = %code, error = %e, "Failed to store short code");
                    return Err(e.into());
                }
            }
        }

        error!(
            attempts = self.max_attempts,
            false_positive_rate = self.filter.false_positive_rate(),
            "No free short code found"
        );
        Err(ShortenerError::Exhausted {
            attempts: self.max_attempts,
        })
    }

    async fn resolve(&self, code: &str) -> Result<Option<String>, ShortenerError> {
        let Ok(code) = ShortCode::from_path(code) else {
            trace!(code, "Malformed short code");
            return Ok(None);
        };

        if !self.filter.might_contain(code.as_bytes()) {
            trace!(code = %code, "Short code not in filter");
            return Ok(None);
        }

        let url = self.repository.get(&code).await?;
        match url {
            Some(_) => debug!(code = %code, "Resolved short code"),
            None => trace!(code = %code, "Short code not found"),
        }
        Ok(url)
    }
}
