use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::state::AppState;

/// POST /api/upload
///
/// Multipart fields: `file` (binary) and `directory` (relative subpath).
/// Responds with the stored relative path; the contract predates the
/// structured error body, so failures here use the flat `{"error": ...}`
/// shape instead of `AppError`.
pub async fn handle_upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut directory = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                error!("Error reading upload form: {e}");
                return upload_failed();
            }
        };
        match field.name().unwrap_or("") {
            "file" => {
                let name = field.file_name().unwrap_or("file").to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((name, bytes.to_vec())),
                    Err(e) => {
                        error!("Error reading upload body: {e}");
                        return upload_failed();
                    }
                }
            }
            "directory" => match field.text().await {
                Ok(text) => directory = text,
                Err(e) => {
                    error!("Error reading directory field: {e}");
                    return upload_failed();
                }
            },
            _ => {
                // Unknown fields are drained and ignored.
                let _ = field.bytes().await;
            }
        }
    }

    let Some((name, bytes)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No file received" })),
        )
            .into_response();
    };

    match state.files.save(&directory, &name, &bytes).await {
        Ok(path) => (StatusCode::OK, Json(json!({ "path": path }))).into_response(),
        Err(e) => {
            error!("Error uploading file: {e}");
            upload_failed()
        }
    }
}

fn upload_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Error uploading file" })),
    )
        .into_response()
}
