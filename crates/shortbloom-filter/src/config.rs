use crate::error::{FilterError, Result};
use typed_builder::TypedBuilder;

/// Default filter size: 8M bits (1 MB).
pub const DEFAULT_BITS: usize = 8_000_000;
/// Default number of hash functions.
pub const DEFAULT_HASH_COUNT: usize = 10;
/// Largest supported bit array (about 512 MB of bits).
pub const MAX_BITS: usize = u32::MAX as usize;

/// Configuration for a [`BloomFilter`](crate::BloomFilter).
///
/// # Example
///
/// ```rust
/// use shortbloom_filter::{BloomConfig, BloomFilter};
///
/// let config = BloomConfig::builder()
///     .bits(80_000_000)
///     .hash_count(10)
///     .build();
///
/// let filter = BloomFilter::from_config(config).unwrap();
/// assert_eq!(filter.bits(), 80_000_000);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
pub struct BloomConfig {
    /// Size of the bit array (`m`).
    #[builder(default = DEFAULT_BITS)]
    pub bits: usize,

    /// Number of hash functions (`k`).
    #[builder(default = DEFAULT_HASH_COUNT)]
    pub hash_count: usize,

    /// Hash seed. A random seed is drawn when unset.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u32>,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BloomConfig {
    pub fn validate(&self) -> Result<()> {
        if self.bits == 0 {
            return Err(FilterError::InvalidConfig(
                "bit array size must be > 0".into(),
            ));
        }
        if self.bits > MAX_BITS {
            return Err(FilterError::InvalidConfig(format!(
                "bit array size must be <= {MAX_BITS}, got {}",
                self.bits
            )));
        }
        if self.hash_count == 0 {
            return Err(FilterError::InvalidConfig(
                "hash function count must be > 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = BloomConfig::default();
        assert_eq!(config.bits, 8_000_000);
        assert_eq!(config.hash_count, 10);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_sizes() {
        let config = BloomConfig::builder().bits(0).build();
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidConfig(_))
        ));

        let config = BloomConfig::builder().hash_count(0).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_oversized_bit_array() {
        let config = BloomConfig::builder().bits(MAX_BITS).build();
        assert!(config.validate().is_ok());

        let config = BloomConfig::builder().bits(MAX_BITS + 1).build();
        assert!(matches!(
            config.validate(),
            Err(FilterError::InvalidConfig(_))
        ));
    }
}
