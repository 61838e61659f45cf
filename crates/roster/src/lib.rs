//! School directory records and the document store they are written to.
//!
//! Records are flat camelCase documents. Each one lives in its own
//! collection, and staff and teachers also get a [`models::DirectoryEntry`]
//! in the shared `users` collection keyed by the same id.

pub mod errors;
pub mod models;
pub mod store;

pub use errors::StoreError;
pub use store::{DocumentStore, MemoryStore, PgDocumentStore};
