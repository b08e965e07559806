//! Fingerprint engine (C2): SimHash and MinHash sketches over a token
//! stream, plus Hamming distance for diagnostics.

pub mod minhash;
pub mod simhash;

pub use minhash::{MinHashSignature, NUM_PERMUTATIONS};
pub use simhash::{hamming_distance, simhash_hex, SIMHASH_HEX_WIDTH};
