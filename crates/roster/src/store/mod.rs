//! Document stores that generated records are written to.
//!
//! A store holds JSON object documents addressed by `(collection, id)`.
//! Writes are upserts: setting an id that already exists replaces the
//! whole document.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::StoreError;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes `body` to `collection/id`, replacing any existing document.
    async fn set(&self, collection: &str, id: &str, body: Value) -> Result<(), StoreError>;

    /// Like [`DocumentStore::set`], but the store writes its own current
    /// time into `field` before persisting.
    async fn set_with_server_timestamp(
        &self,
        collection: &str,
        id: &str,
        body: Value,
        field: &str,
    ) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError>;

    async fn count(&self, collection: &str) -> Result<usize, StoreError>;
}

/// Unwraps a document body, rejecting anything that isn't a JSON object.
fn into_object(collection: &str, id: &str, body: Value) -> Result<Map<String, Value>, StoreError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject {
            collection: collection.to_string(),
            id: id.to_string(),
        }),
    }
}
