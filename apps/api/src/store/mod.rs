//! The document database, reduced to the four operations this service
//! actually performs: insert with server-assigned timestamps, equality
//! lookup on a single field, full-collection scan, and fetch by id.
//!
//! Collections are schema-less on the store side; the typed constructors
//! in `models` are the only schema enforcement. `AppState` carries the
//! store as `Arc<dyn DocumentStore>` so handlers never name a backend.

pub mod memory;
pub mod postgres;

pub use memory::MemStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;

/// Collection names, kept as constants so a typo cannot split a collection.
pub const COMPANIES: &str = "companies";
pub const JOBSEEKERS: &str = "jobseekers";
pub const JOBS: &str = "jobs";
pub const APPLICATIONS: &str = "applications";

/// Envelope around one stored record. Timestamps are assigned by the
/// store at insert time, never by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub collection: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Deserializes `data` into a typed record.
    pub fn parse<T: serde::de::DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| anyhow::anyhow!("Malformed {} document {}: {e}", self.collection, self.id).into())
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserts a record and returns it with its id and server timestamps.
    async fn insert(&self, collection: &str, data: Value) -> Result<Document, AppError>;

    /// Returns every document whose `data[field]` equals `value` as a
    /// string, in store order. No index is assumed.
    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, AppError>;

    /// Returns every document in the collection, in store order.
    async fn scan(&self, collection: &str) -> Result<Vec<Document>, AppError>;

    /// Fetches one document by id.
    async fn get(&self, collection: &str, id: Uuid) -> Result<Option<Document>, AppError>;
}
