use clap::{Parser, ValueEnum};
use shortbloom_filter::config::{DEFAULT_BITS, DEFAULT_HASH_COUNT};
use std::fmt::{Display, Formatter};

pub const STORAGE_BACKEND_ENV: &str = "SHORTBLOOM_STORAGE_BACKEND";
pub const REDIS_URL_ENV: &str = "SHORTBLOOM_REDIS_URL";
pub const REDIS_TIMEOUT_ENV: &str = "SHORTBLOOM_REDIS_TIMEOUT_MS";
pub const BLOOM_BITS_ENV: &str = "SHORTBLOOM_BLOOM_BITS";
pub const BLOOM_HASHES_ENV: &str = "SHORTBLOOM_BLOOM_HASHES";
pub const MAX_ATTEMPTS_ENV: &str = "SHORTBLOOM_MAX_ATTEMPTS";
pub const LOG_JSON_ENV: &str = "SHORTBLOOM_LOG_JSON";
pub const BASE_URL_ENV: &str = "SHORTBLOOM_BASE_URL";

/// Filter size for the Redis backend, sized for a store that outlives the process.
pub const DEFAULT_REDIS_BLOOM_BITS: usize = 80_000_000;

pub const DEFAULT_MAX_ATTEMPTS: usize = shortbloom_shortener::config::DEFAULT_MAX_ATTEMPTS;
pub const DEFAULT_REDIS_TIMEOUT_MS: u64 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "redis")]
    Redis,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::Redis => write!(f, "redis"),
        }
    }
}

/// Shortens URLs read from stdin, one per line. Lines without `://` are
/// resolved as short codes instead.
#[derive(Debug, Parser)]
#[command(name = "shortbloom")]
pub struct CLI {
    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    #[arg(long, env = REDIS_TIMEOUT_ENV, default_value_t = DEFAULT_REDIS_TIMEOUT_MS)]
    pub redis_timeout_ms: u64,

    /// Filter size in bits. Defaults to 8M for in-memory and 80M for redis.
    #[arg(long, env = BLOOM_BITS_ENV)]
    pub bloom_bits: Option<usize>,

    #[arg(long, env = BLOOM_HASHES_ENV, default_value_t = DEFAULT_HASH_COUNT)]
    pub bloom_hashes: usize,

    #[arg(long, env = MAX_ATTEMPTS_ENV, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Print full short URLs under this base instead of bare codes.
    #[arg(long, env = BASE_URL_ENV)]
    pub base_url: Option<String>,

    /// Emit logs as JSON lines.
    #[arg(long, env = LOG_JSON_ENV)]
    pub log_json: bool,
}

impl CLI {
    /// Filter size to use, falling back to the selected backend's default.
    pub fn bloom_bits(&self) -> usize {
        self.bloom_bits.unwrap_or(match self.storage {
            StorageBackendArg::InMemory => DEFAULT_BITS,
            StorageBackendArg::Redis => DEFAULT_REDIS_BLOOM_BITS,
        })
    }
}
