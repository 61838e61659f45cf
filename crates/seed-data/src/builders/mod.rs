//! Fluent builder APIs for seeding runs.
//!
//! The [`BatchBuilder`] generates staff, teachers and students in one pass
//! and optionally writes them to a document store.

mod batch;

pub use batch::{BatchBuilder, BatchMetrics, BatchResult};
