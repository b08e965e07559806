//! Banded MinHash LSH index (C5).
//!
//! Configured with `threshold = 0.85`, `num_perm = 128`. The index is
//! **job-local and ephemeral**: callers construct a fresh one at the
//! start of a deduplication job and discard it at the end; the
//! `simhash` column and `cluster_id` assignment in the database are
//! the persistent source of truth, not this structure.
//!
//! Banding is used only to generate *candidate* pairs cheaply; every
//! candidate is re-checked against the exact signature-agreement
//! estimate before being returned, so `query` never reports a false
//! positive above the configured threshold (it may still miss a true
//! positive that no band happened to collide on — the standard LSH
//! recall/precision tradeoff).

use std::collections::{HashMap, HashSet};

use newsroom_core_fingerprint::MinHashSignature;

/// Default similarity threshold: Jaccard ≥ 0.85 counts as a near-duplicate.
pub const DEFAULT_THRESHOLD: f64 = 0.85;

/// Number of bands the 128-permutation signature is split into. Eight
/// bands of 16 rows each gives a banding curve `(1/bands)^(1/rows)` of
/// about 0.875 — close enough to the 0.85 threshold that the exact
/// verification step (not the banding) is what actually enforces it.
const NUM_BANDS: usize = 8;

pub struct LshIndex<K> {
    threshold: f64,
    /// band index -> (band signature hash -> candidate keys)
    buckets: Vec<HashMap<u64, HashSet<K>>>,
    signatures: HashMap<K, MinHashSignature>,
}

impl<K> LshIndex<K>
where
    K: Eq + std::hash::Hash + Clone + Ord,
{
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            buckets: (0..NUM_BANDS).map(|_| HashMap::new()).collect(),
            signatures: HashMap::new(),
        }
    }

    /// Inserts `key` under `minhash`. Idempotent-ish: re-inserting the
    /// same key with a new signature replaces its band memberships.
    pub fn insert(&mut self, key: K, minhash: MinHashSignature) {
        for (band_index, band) in minhash.bands(NUM_BANDS).into_iter().enumerate() {
            let band_hash = hash_band(band);
            self.buckets[band_index]
                .entry(band_hash)
                .or_default()
                .insert(key.clone());
        }
        self.signatures.insert(key, minhash);
    }

    /// Returns every indexed key whose estimated Jaccard similarity to
    /// `minhash` is at least the configured threshold. Candidates are
    /// discovered by band collision and then verified exactly.
    ///
    /// The result is sorted by `K`'s `Ord` before being returned. Bucket
    /// membership is stored in `HashSet`s whose iteration order depends
    /// on the process-randomized default hasher; without a deterministic
    /// tie-break, "pick the first returned key" (`spec.md` §4.6 step 2d)
    /// would vary across runs even with a fixed MinHash seed, breaking
    /// the dedup idempotence law. Sorting makes "first" mean "smallest
    /// key", stable regardless of hasher seed.
    pub fn query(&self, minhash: &MinHashSignature) -> Vec<K> {
        let mut candidates: HashSet<K> = HashSet::new();
        for (band_index, band) in minhash.bands(NUM_BANDS).into_iter().enumerate() {
            let band_hash = hash_band(band);
            if let Some(bucket) = self.buckets[band_index].get(&band_hash) {
                candidates.extend(bucket.iter().cloned());
            }
        }

        let mut matches: Vec<K> = candidates
            .into_iter()
            .filter(|key| {
                self.signatures
                    .get(key)
                    .map(|sig| sig.estimate_jaccard(minhash) >= self.threshold)
                    .unwrap_or(false)
            })
            .collect();
        matches.sort();
        matches
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl<K> Default for LshIndex<K>
where
    K: Eq + std::hash::Hash + Clone + Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

fn hash_band(band: &[u64]) -> u64 {
    let mut acc = 0xcbf2_9ce4_8422_2325u64; // FNV offset basis
    for value in band {
        acc ^= value;
        acc = acc.wrapping_mul(0x0000_0100_0000_01b3); // FNV prime
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_index_returns_no_candidates() {
        let index: LshIndex<String> = LshIndex::new();
        let sig = MinHashSignature::compute(["fed", "raises", "rates"]);
        assert!(index.query(&sig).is_empty());
    }

    #[test]
    fn finds_near_duplicate_by_key() {
        let mut index: LshIndex<String> = LshIndex::new();
        let sig_a = MinHashSignature::compute([
            "fed", "raises", "rates", "0", "25", "percent", "amid", "inflation", "concerns",
        ]);
        index.insert("article-a".to_string(), sig_a);

        let sig_b = MinHashSignature::compute([
            "fed", "raises", "rates", "0", "25", "percent", "amid", "inflation", "worries",
        ]);
        let hits = index.query(&sig_b);
        assert_eq!(hits, vec!["article-a".to_string()]);
    }

    #[test]
    fn dissimilar_signature_finds_nothing() {
        let mut index: LshIndex<String> = LshIndex::new();
        index.insert(
            "article-a".to_string(),
            MinHashSignature::compute(["fed", "raises", "rates"]),
        );
        let other = MinHashSignature::compute(["banana", "kiwi", "mango", "papaya", "cherry"]);
        assert!(index.query(&other).is_empty());
    }

    #[test]
    fn empty_minhash_never_matches() {
        let mut index: LshIndex<String> = LshIndex::new();
        index.insert("article-a".to_string(), MinHashSignature::empty());
        let query = MinHashSignature::compute(["some", "text"]);
        assert!(index.query(&query).is_empty());
    }
}
