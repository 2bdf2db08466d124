use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::prefs::{AccessibilitySettings, Language};
use crate::state::AppState;

/// GET /api/preferences/accessibility
pub async fn handle_get_accessibility(State(state): State<AppState>) -> Json<AccessibilitySettings> {
    Json(state.prefs.accessibility().await)
}

/// PUT /api/preferences/accessibility
pub async fn handle_put_accessibility(
    State(state): State<AppState>,
    Json(settings): Json<AccessibilitySettings>,
) -> Result<Json<AccessibilitySettings>, AppError> {
    state.prefs.set_accessibility(settings).await?;
    Ok(Json(settings))
}

#[derive(Serialize, Deserialize)]
pub struct LanguagePreference {
    pub language: Language,
}

/// GET /api/preferences/language
pub async fn handle_get_language(State(state): State<AppState>) -> Json<LanguagePreference> {
    Json(LanguagePreference {
        language: state.prefs.language().await,
    })
}

/// PUT /api/preferences/language
pub async fn handle_put_language(
    State(state): State<AppState>,
    Json(pref): Json<LanguagePreference>,
) -> Result<Json<LanguagePreference>, AppError> {
    state.prefs.set_language(pref.language).await?;
    Ok(Json(pref))
}
