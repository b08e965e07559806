//! Deduplication job processor (C2 + C5 + C6): fingerprint, LSH-query,
//! and cluster-assign every article named in a `deduplication` job's
//! payload, newest-published first.

pub mod processor;

pub use processor::DeduplicationProcessor;
