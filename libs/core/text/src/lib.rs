//! Text normalization, tokenization, and numeric-literal extraction.
//!
//! These are the pure, allocation-only building blocks (C1, C3) that
//! the fingerprinting and summarization crates are built on. Nothing
//! here touches I/O; every function is total.

pub mod normalize;
pub mod numeric;

pub use normalize::{normalize_text, tokenize};
pub use numeric::{extract_numbers, NumericKind, NumericToken};
