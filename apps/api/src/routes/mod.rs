pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::prefs::handlers as prefs;
use crate::session::handlers as auth;
use crate::state::AppState;
use crate::submission::handlers as submission;
use crate::uploads::handlers as uploads;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job search & postings
        .route("/api/jobs", get(jobs::handle_list_jobs))
        .route("/api/jobs", post(jobs::handle_create_job))
        .route("/api/jobs/:id", get(jobs::handle_get_job))
        .route("/api/jobs/:id/apply", post(submission::handle_submit_application))
        // Registration
        .route("/api/register/company", post(submission::handle_register_company))
        .route(
            "/api/register/jobseeker",
            post(submission::handle_register_jobseeker),
        )
        // File upload endpoint
        .route("/api/upload", post(uploads::handle_upload))
        // Session
        .route("/api/auth/login/company", post(auth::handle_company_login))
        .route("/api/auth/login/jobseeker", post(auth::handle_jobseeker_login))
        .route("/api/auth/logout", post(auth::handle_logout))
        .route("/api/auth/me", get(auth::handle_me))
        // Preferences
        .route(
            "/api/preferences/accessibility",
            get(prefs::handle_get_accessibility).put(prefs::handle_put_accessibility),
        )
        .route(
            "/api/preferences/language",
            get(prefs::handle_get_language).put(prefs::handle_put_language),
        )
        .with_state(state)
}
