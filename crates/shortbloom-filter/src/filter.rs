use crate::config::BloomConfig;
use crate::error::{FilterError, Result};
use crate::hash::{bit_indices, optimal_bits, optimal_hash_count};
use bitvec::{bitvec, order::Lsb0, vec::BitVec};

/// A fixed-size Bloom filter over byte-string keys.
///
/// `might_contain` may report a key that was never inserted (a false
/// positive) but never misses a key that was. There is no removal.
pub struct BloomFilter {
    bits: BitVec<usize, Lsb0>,
    hash_count: usize,
    seed: u32,
    items: u64,
}

impl BloomFilter {
    /// Creates an empty filter of `bits` bits with `hash_count` hash functions
    /// and a randomly drawn seed.
    pub fn new(bits: usize, hash_count: usize) -> Result<Self> {
        Self::from_config(
            BloomConfig::builder()
                .bits(bits)
                .hash_count(hash_count)
                .build(),
        )
    }

    /// Creates an empty filter with a fixed seed, for reproducible bit layouts.
    pub fn with_seed(bits: usize, hash_count: usize, seed: u32) -> Result<Self> {
        Self::from_config(
            BloomConfig::builder()
                .bits(bits)
                .hash_count(hash_count)
                .seed(seed)
                .build(),
        )
    }

    /// Creates a filter sized for `expected_items` at the target false positive rate.
    pub fn for_capacity(expected_items: usize, false_positive_rate: f64) -> Result<Self> {
        if expected_items == 0 {
            return Err(FilterError::InvalidConfig(
                "expected items must be > 0".into(),
            ));
        }
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(FilterError::InvalidConfig(format!(
                "false positive rate must be between 0 and 1, got {false_positive_rate}"
            )));
        }

        let bits = optimal_bits(expected_items, false_positive_rate);
        let hash_count = optimal_hash_count(expected_items, bits);
        Self::new(bits, hash_count)
    }

    pub fn from_config(config: BloomConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            bits: bitvec![usize, Lsb0; 0; config.bits],
            hash_count: config.hash_count,
            seed: config.seed.unwrap_or_else(rand::random),
            items: 0,
        })
    }

    /// Sets the `k` bits for `key`.
    pub fn insert(&mut self, key: &[u8]) {
        for idx in bit_indices(key, self.seed, self.hash_count, self.bits.len()) {
            self.bits.set(idx, true);
        }
        self.items += 1;
    }

    /// Returns `false` if `key` was definitely never inserted.
    pub fn might_contain(&self, key: &[u8]) -> bool {
        bit_indices(key, self.seed, self.hash_count, self.bits.len()).all(|idx| self.bits[idx])
    }

    /// Estimated false positive probability at the current fill level,
    /// `(1 - e^(-k*n/m))^k`.
    pub fn false_positive_rate(&self) -> f64 {
        let k = self.hash_count as f64;
        let n = self.items as f64;
        let m = self.bits.len() as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Size of the bit array.
    pub fn bits(&self) -> usize {
        self.bits.len()
    }

    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Number of insertions performed (duplicates included).
    pub fn len(&self) -> u64 {
        self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items == 0
    }
}

impl std::fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("bits", &self.bits.len())
            .field("hash_count", &self.hash_count)
            .field("items", &self.items)
            .finish()
    }
}
