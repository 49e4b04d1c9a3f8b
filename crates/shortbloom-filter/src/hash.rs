//! Hash derivation for the Bloom filter.
//!
//! Two MurmurHash3 (x86, 32-bit) base hashes are computed per key: `h1` with
//! the filter seed and `h2` seeded with `h1`. The remaining hashes are derived
//! by double hashing, `h_i = (h1 + i) * h2`, so only two real hash passes are
//! needed regardless of `k`.

use std::io::Cursor;

fn murmur3_32(key: &[u8], seed: u32) -> u32 {
    // Reading from an in-memory cursor never returns an I/O error.
    murmur3::murmur3_32(&mut Cursor::new(key), seed)
        .expect("murmur3 over an in-memory slice cannot fail")
}

/// Computes the `hash_count` bit positions for `key` in a filter of `bits` bits.
///
/// Each position is `|h mod bits|`, so the result is always below `bits`.
/// `bits` must be non-zero.
pub fn bit_indices(
    key: &[u8],
    seed: u32,
    hash_count: usize,
    bits: usize,
) -> impl Iterator<Item = usize> {
    let h1 = i64::from(murmur3_32(key, seed));
    let h2 = i64::from(murmur3_32(key, h1 as u32));
    let modulus = bits as i64;

    (0..hash_count).map(move |i| {
        let hash = match i {
            0 => h1,
            1 => h2,
            _ => h1.wrapping_add(i as i64).wrapping_mul(h2),
        };
        (hash % modulus).unsigned_abs() as usize
    })
}

/// Number of bits needed to hold `n` items at false positive rate `fpr`.
pub fn optimal_bits(n: usize, fpr: f64) -> usize {
    let ln2 = std::f64::consts::LN_2;
    ((-(n as f64) * fpr.ln()) / (ln2 * ln2)).ceil() as usize
}

/// Number of hash functions minimizing the false positive rate for `n` items in `m` bits.
pub fn optimal_hash_count(n: usize, m: usize) -> usize {
    (((m as f64 / n as f64) * std::f64::consts::LN_2).round() as usize).max(1)
}
