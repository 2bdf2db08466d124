use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::JobRecord;
use crate::models::{DisabilityCategory, Job, JobForm};
use crate::session::SessionUser;
use crate::state::AppState;
use crate::store::JOBS;

#[derive(Deserialize)]
pub struct JobsQuery {
    /// Free-text search, matched as conjunctive substrings.
    #[serde(default)]
    pub q: String,
    /// Comma-separated disability-category labels.
    pub categories: Option<String>,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub jobs: Vec<JobRecord>,
    pub total: usize,
}

fn parse_categories(raw: Option<&str>) -> Result<Vec<DisabilityCategory>, AppError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|label| {
            serde_json::from_value(Value::String(label.to_string())).map_err(|_| {
                AppError::Validation(format!("Unknown disability category: {label}"))
            })
        })
        .collect()
}

/// GET /api/jobs — the filtered view over the cached index.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobsQuery>,
) -> Result<Json<JobListResponse>, AppError> {
    let categories = parse_categories(params.categories.as_deref())?;
    let index = state.jobs.get_or_load(state.store.as_ref()).await?;
    let jobs: Vec<JobRecord> = index
        .filter(&params.q, &categories)
        .into_iter()
        .cloned()
        .collect();
    let total = jobs.len();
    Ok(Json(JobListResponse { jobs, total }))
}

/// GET /api/jobs/:id — fresh read, used by the application form.
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobRecord>, AppError> {
    let doc = state
        .store
        .get(JOBS, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let job: Job = doc.parse()?;
    Ok(Json(JobRecord {
        id: doc.id,
        job,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCreatedResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// POST /api/jobs — creates a posting for the logged-in company. The
/// cached index deliberately does not pick it up; there is no
/// incremental refresh.
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(form): Json<JobForm>,
) -> Result<Json<JobCreatedResponse>, AppError> {
    let Some(SessionUser::Company { id, record }) = state.session.current().await else {
        return Err(AppError::Unauthorized);
    };

    let job = Job::post(form, id, &record.company_name)?;
    let data = serde_json::to_value(&job).map_err(anyhow::Error::from)?;
    let doc = state.store.insert(JOBS, data).await?;
    info!("Job created with ID: {}", doc.id);
    Ok(Json(JobCreatedResponse {
        id: doc.id,
        created_at: doc.created_at,
    }))
}
