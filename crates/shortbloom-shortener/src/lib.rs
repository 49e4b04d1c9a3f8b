//! URL shortener service implementation.
//!
//! [`ShortenerService`] combines a code [`Generator`], a shared Bloom filter
//! and a [`Repository`] backend. Core types are re-exported from
//! `shortbloom_core`.
//!
//! # Example
//!
//! ```rust
//! use shortbloom_filter::BloomFilter;
//! use shortbloom_generator::RandomGenerator;
//! use shortbloom_shortener::{Shortener, ShortenerService};
//! use shortbloom_storage::InMemoryRepository;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ShortenerService::new(
//!     InMemoryRepository::new(),
//!     RandomGenerator::new(),
//!     BloomFilter::new(8_000_000, 10)?,
//! );
//!
//! let code = service.create("https://example.com").await?;
//! assert_eq!(
//!     service.resolve(code.as_str()).await?.as_deref(),
//!     Some("https://example.com")
//! );
//! # Ok(())
//! # }
//! ```
//!
//! [`Generator`]: shortbloom_generator::Generator
//! [`Repository`]: shortbloom_core::Repository

pub mod config;
pub mod service;

pub use config::ShortenerConfig;
pub use service::ShortenerService;
pub use shortbloom_core::{ShortCode, Shortener, ShortenerError};
