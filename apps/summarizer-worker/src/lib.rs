//! Summarization job processor (C4): generate and persist `summary_2`
//! for every article named in a `summarization` job's payload.

pub mod processor;

pub use processor::SummarizationProcessor;
