//! Bloom filter used to reject short code candidates that might already exist.
//!
//! A Bloom filter is a space-efficient probabilistic data structure that can
//! tell you with certainty if an item is NOT in a set, or that it MIGHT be
//! in the set. Bits are never cleared, so there are no false negatives.
//!
//! - [`BloomFilter`] is the plain single-owner structure.
//! - [`SharedBloomFilter`] wraps it in a lock for use across concurrent
//!   callers and provides the atomic check-then-insert step the shortener
//!   needs.

pub mod config;
pub mod error;
pub mod filter;
pub mod hash;
pub mod shared;

pub use config::BloomConfig;
pub use error::{FilterError, Result};
pub use filter::BloomFilter;
pub use shared::SharedBloomFilter;
