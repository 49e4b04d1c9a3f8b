use crate::Generator;
use rand::distr::Alphanumeric;
use rand::Rng;
use shortbloom_core::{ShortCode, SHORT_CODE_LENGTH};

/// Generates uniformly random codes over `[A-Za-z0-9]`.
///
/// With 62^6 (about 5.6e10) possible codes, collisions stay rare until the
/// store holds billions of entries. Codes are evenly distributed but not
/// meant to be unguessable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    type Output = ShortCode;

    fn generate(&self) -> Self::Output {
        let code: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SHORT_CODE_LENGTH)
            .map(char::from)
            .collect();
        ShortCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn generates_valid_codes() {
        let generator = RandomGenerator::new();
        for _ in 0..1_000 {
            let code = generator.generate();
            assert!(ShortCode::new(code.as_str()).is_ok(), "invalid code {code}");
        }
    }

    #[test]
    fn codes_rarely_repeat() {
        let generator = RandomGenerator::new();
        let codes: HashSet<_> = (0..10_000).map(|_| generator.generate()).collect();
        // birthday bound for 10k draws out of 62^6 is ~1e-3 expected duplicates
        assert!(codes.len() >= 9_998);
    }

    #[test]
    fn covers_whole_alphabet() {
        let generator = RandomGenerator::new();
        let mut counts: HashMap<char, usize> = HashMap::new();
        for _ in 0..10_000 {
            for c in generator.generate().as_str().chars() {
                *counts.entry(c).or_default() += 1;
            }
        }

        // 60k samples over 62 symbols: ~968 each
        assert_eq!(counts.len(), 62);
        assert!(counts.values().all(|&n| (700..1_250).contains(&n)));
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
