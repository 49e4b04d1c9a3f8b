//! Storage backends for short code to URL mappings.
//!
//! Both backends implement [`shortbloom_core::Repository`]; a deployment
//! picks exactly one at startup.

pub mod memory;
pub mod redis;

pub use memory::InMemoryRepository;
pub use redis::{RedisRepository, RedisRepositoryConfig};
pub use shortbloom_core::{Repository, StorageError};
