use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{DisabilityCategory, Job, JobStatus};
use crate::store::{Document, DocumentStore, JOBS};

/// One indexed posting: the typed record plus its store identity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub job: Job,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The in-memory job set for this process: every posting, newest first.
/// Built from one full-collection scan; filtering never refetches.
pub struct JobIndex {
    records: Vec<JobRecord>,
}

impl JobIndex {
    pub async fn load(store: &dyn DocumentStore) -> Result<Self, AppError> {
        let docs = store.scan(JOBS).await?;
        let index = Self::from_documents(docs);
        info!("Job index loaded: {} posting(s)", index.len());
        Ok(index)
    }

    /// Sorts descending by creation timestamp; the sort is stable, so
    /// ties keep store order. Documents that no longer parse as jobs are
    /// skipped with a warning rather than poisoning the whole index.
    pub fn from_documents(docs: Vec<Document>) -> Self {
        let mut records: Vec<JobRecord> = docs
            .into_iter()
            .filter_map(|doc| match doc.parse::<Job>() {
                Ok(job) => Some(JobRecord {
                    id: doc.id,
                    job,
                    created_at: doc.created_at,
                    updated_at: doc.updated_at,
                }),
                Err(e) => {
                    warn!("Skipping unreadable job document {}: {e}", doc.id);
                    None
                }
            })
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        JobIndex { records }
    }

    /// The filtered view: active postings whose combined text contains
    /// every whitespace token of `query` (case-insensitive substring,
    /// conjunctive) and whose tag set intersects `categories` when any
    /// are selected. Pure over the cached set; same inputs, same output.
    pub fn filter(&self, query: &str, categories: &[DisabilityCategory]) -> Vec<&JobRecord> {
        let terms: Vec<String> = query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();

        self.records
            .iter()
            .filter(|record| {
                let job = &record.job;
                if job.status != JobStatus::Active {
                    return false;
                }
                let haystack = format!(
                    "{} {} {} {}",
                    job.title, job.description, job.location, job.company_name
                )
                .to_lowercase();
                let matches_search = terms.iter().all(|term| haystack.contains(term.as_str()));
                let matches_categories = categories.is_empty()
                    || categories
                        .iter()
                        .any(|selected| job.disability_types.contains(selected));
                matches_search && matches_categories
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
