use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::session::SessionUser;
use crate::state::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyLoginRequest {
    pub reg_number: String,
}

#[derive(Deserialize)]
pub struct JobSeekerLoginRequest {
    pub name: String,
}

/// POST /api/auth/login/company
pub async fn handle_company_login(
    State(state): State<AppState>,
    Json(req): Json<CompanyLoginRequest>,
) -> Result<Json<SessionUser>, AppError> {
    let user = state
        .session
        .login_company(state.store.as_ref(), &req.reg_number)
        .await?;
    info!("Company logged in: {}", user.display_name());
    Ok(Json(user))
}

/// POST /api/auth/login/jobseeker
pub async fn handle_jobseeker_login(
    State(state): State<AppState>,
    Json(req): Json<JobSeekerLoginRequest>,
) -> Result<Json<SessionUser>, AppError> {
    let user = state
        .session
        .login_jobseeker(state.store.as_ref(), &req.name)
        .await?;
    info!("Job seeker logged in: {}", user.display_name());
    Ok(Json(user))
}

/// POST /api/auth/logout
pub async fn handle_logout(State(state): State<AppState>) -> StatusCode {
    state.session.logout().await;
    StatusCode::NO_CONTENT
}

/// GET /api/auth/me
pub async fn handle_me(State(state): State<AppState>) -> Json<Option<SessionUser>> {
    Json(state.session.current().await)
}
