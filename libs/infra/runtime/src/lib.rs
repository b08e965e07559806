//! Worker runtime: the pieces every worker binary shares regardless of
//! which job type it processes.
//!
//! Per Design Note "Process-wide pool state", there is no ambient
//! global here — [`config::WorkerConfig`] is parsed once in `main`,
//! the pool it describes is constructed once and handed by reference
//! into [`dispatcher::Dispatcher`], which owns the poll loop.
//!
//! Per Design Note "Abstract-method polymorphism", job-type-specific
//! behavior is a [`processor::JobProcessor`] *value* the dispatcher
//! holds, not a subclass the dispatcher is built from.

pub mod config;
pub mod dispatcher;
pub mod processor;
pub mod shutdown;

pub use config::WorkerConfig;
pub use dispatcher::Dispatcher;
pub use processor::JobProcessor;
