#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::store::{Document, DocumentStore};

/// In-memory store used by the test suite. Preserves insertion order per
/// collection, which is what "store order" means for the first-match-wins
/// login contract.
#[derive(Default)]
pub struct MemStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    /// When set, the next insert fails. Lets tests pin the
    /// orphaned-upload behavior of the submission pipeline.
    fail_next_insert: AtomicBool,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_insert(&self) {
        self.fail_next_insert.store(true, Ordering::SeqCst);
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentStore for MemStore {
    async fn insert(&self, collection: &str, data: Value) -> Result<Document, AppError> {
        if self.fail_next_insert.swap(false, Ordering::SeqCst) {
            return Err(anyhow::anyhow!("simulated insert failure").into());
        }
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            collection: collection.to_string(),
            data,
            created_at: now,
            updated_at: now,
        };
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        let docs = collections.get(collection).map(Vec::as_slice).unwrap_or(&[]);
        Ok(docs
            .iter()
            .filter(|d| d.data.get(field).and_then(Value::as_str) == Some(value))
            .cloned()
            .collect())
    }

    async fn scan(&self, collection: &str) -> Result<Vec<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }
}
