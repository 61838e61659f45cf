use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::sync::RwLock;
use tracing::debug;

use super::{DocumentStore, into_object};
use crate::errors::StoreError;

/// In-process document store for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every document in a collection, ordered by id.
    pub async fn documents(&self, collection: &str) -> Vec<(String, Value)> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.iter().map(|(id, v)| (id.clone(), v.clone())).collect())
            .unwrap_or_default()
    }

    async fn insert(&self, collection: &str, id: &str, body: Value) {
        debug!(collection, id, "set document");
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), body);
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn set(&self, collection: &str, id: &str, body: Value) -> Result<(), StoreError> {
        let map = into_object(collection, id, body)?;
        self.insert(collection, id, Value::Object(map)).await;
        Ok(())
    }

    async fn set_with_server_timestamp(
        &self,
        collection: &str,
        id: &str,
        body: Value,
        field: &str,
    ) -> Result<(), StoreError> {
        let mut map = into_object(collection, id, body)?;
        let now = OffsetDateTime::now_utc().format(&Rfc3339)?;
        map.insert(field.to_string(), Value::String(now));
        self.insert(collection, id, Value::Object(map)).await;
        Ok(())
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn count(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len))
    }
}
