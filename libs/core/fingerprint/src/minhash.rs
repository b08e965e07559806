//! MinHash sketch (128 permutations) over a token stream.
//!
//! Permutations are simulated with 128 independently-keyed SipHash-1-3
//! instances rather than true random permutations of the universe —
//! standard practice for MinHash over byte strings. The 128 keypairs
//! are derived from a **fixed seed** via a splitmix64 expansion, never
//! from OS randomness, so that the same token stream always produces
//! the same signature across process restarts and runs.

use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Number of independent hash permutations in a signature.
pub const NUM_PERMUTATIONS: usize = 128;

/// Fixed seed for permutation-key derivation. Do not change without
/// accepting that previously-computed signatures become incomparable
/// to newly-computed ones.
const FIXED_SEED: u64 = 0x4e45_5753_524f_4f4d; // "NEWSROOM" as bytes, reinterpreted

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinHashSignature {
    values: [u64; NUM_PERMUTATIONS],
}

impl MinHashSignature {
    /// The signature of an empty token stream: every slot holds the
    /// max-value sentinel, which the LSH index treats as pathologically
    /// dissimilar to any non-empty signature.
    pub fn empty() -> Self {
        Self { values: [u64::MAX; NUM_PERMUTATIONS] }
    }

    /// Computes the MinHash signature of `tokens`. Tokens are encoded
    /// as UTF-8 bytes before hashing.
    pub fn compute<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = [u64::MAX; NUM_PERMUTATIONS];
        let keys = permutation_keys();

        for token in tokens {
            let bytes = token.as_ref().as_bytes();
            for (slot, (k0, k1)) in values.iter_mut().zip(keys.iter()) {
                let mut hasher = SipHasher13::new_with_keys(*k0, *k1);
                hasher.write(bytes);
                let candidate = hasher.finish();
                if candidate < *slot {
                    *slot = candidate;
                }
            }
        }

        Self { values }
    }

    /// Unbiased estimate of Jaccard similarity between two signatures:
    /// the fraction of permutation slots whose minima agree.
    pub fn estimate_jaccard(&self, other: &Self) -> f64 {
        let agreeing = self
            .values
            .iter()
            .zip(other.values.iter())
            .filter(|(a, b)| a == b)
            .count();
        agreeing as f64 / NUM_PERMUTATIONS as f64
    }

    pub fn values(&self) -> &[u64; NUM_PERMUTATIONS] {
        &self.values
    }

    /// Splits the signature into `num_bands` contiguous bands, each a
    /// slice of permutation values — the unit the banded LSH index
    /// hashes and buckets on.
    pub fn bands(&self, num_bands: usize) -> Vec<&[u64]> {
        assert!(
            NUM_PERMUTATIONS % num_bands == 0,
            "num_bands must evenly divide {NUM_PERMUTATIONS}"
        );
        self.values.chunks(NUM_PERMUTATIONS / num_bands).collect()
    }
}

fn permutation_keys() -> [(u64, u64); NUM_PERMUTATIONS] {
    let mut keys = [(0u64, 0u64); NUM_PERMUTATIONS];
    let mut state = FIXED_SEED;
    for slot in keys.iter_mut() {
        state = splitmix64(state);
        let k0 = state;
        state = splitmix64(state);
        let k1 = state;
        *slot = (k0, k1);
    }
    keys
}

/// splitmix64, used only to expand the fixed seed into distinct,
/// well-distributed SipHash keys — not a cryptographic primitive.
fn splitmix64(x: u64) -> u64 {
    let x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stream_is_max_sentinel() {
        let empty: Vec<&str> = vec![];
        assert_eq!(MinHashSignature::compute(empty), MinHashSignature::empty());
    }

    #[test]
    fn deterministic_across_calls() {
        let tokens = ["fed", "raises", "rates", "0", "25"];
        assert_eq!(MinHashSignature::compute(tokens), MinHashSignature::compute(tokens));
    }

    #[test]
    fn identical_sets_estimate_similarity_one() {
        let tokens = ["apple", "stock", "rises", "5", "percent"];
        let a = MinHashSignature::compute(tokens);
        let b = MinHashSignature::compute(tokens);
        assert_eq!(a.estimate_jaccard(&b), 1.0);
    }

    #[test]
    fn disjoint_sets_estimate_low_similarity() {
        let a = MinHashSignature::compute(["fed", "raises", "rates"]);
        let b = MinHashSignature::compute(["banana", "kiwi", "mango", "papaya"]);
        assert!(a.estimate_jaccard(&b) < 0.5);
    }

    #[test]
    fn near_duplicate_sets_estimate_high_similarity() {
        let a = MinHashSignature::compute([
            "fed", "raises", "rates", "0", "25", "percent", "amid", "inflation", "concerns",
        ]);
        let b = MinHashSignature::compute([
            "fed", "raises", "rates", "0", "25", "percent", "amid", "inflation", "worries",
        ]);
        assert!(a.estimate_jaccard(&b) >= 0.85);
    }

    #[test]
    fn bands_partition_all_slots() {
        let sig = MinHashSignature::compute(["a", "b", "c"]);
        let bands = sig.bands(32);
        assert_eq!(bands.len(), 32);
        assert_eq!(bands.iter().map(|b| b.len()).sum::<usize>(), NUM_PERMUTATIONS);
    }
}
