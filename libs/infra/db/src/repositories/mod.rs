//! One repository per entity. Each wraps a borrowed `&PgPool` and
//! exposes only the operations the dispatcher and workers actually
//! need — not a generic CRUD surface.

pub mod article;
pub mod cluster;
pub mod job;
pub mod source;
