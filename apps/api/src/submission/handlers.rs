use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    AccountStatus, ApplicationForm, ApplicationStatus, CompanyForm, DisabilityCategory,
    JobSeekerForm,
};
use crate::state::AppState;
use crate::submission::{register_company, register_jobseeker, submit_application, FilePart};

/// Text fields plus at most one file, pulled off a multipart form.
struct SubmissionParts {
    fields: HashMap<String, String>,
    file: Option<FilePart>,
}

/// Drains a multipart form, treating `file_field` as the attachment and
/// everything else as text.
async fn read_parts(mut multipart: Multipart, file_field: &str) -> Result<SubmissionParts, AppError> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == file_field {
            let filename = field.file_name().unwrap_or("file").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid file data: {e}")))?;
            file = Some(FilePart {
                name: filename,
                bytes,
            });
        } else {
            let text = field
                .text()
                .await
                .map_err(|e| AppError::Validation(format!("Invalid form data: {e}")))?;
            fields.insert(name, text);
        }
    }

    Ok(SubmissionParts { fields, file })
}

impl SubmissionParts {
    fn text(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }

    fn category(&self, name: &str) -> Result<DisabilityCategory, AppError> {
        let label = self.text(name);
        serde_json::from_value(Value::String(label.clone()))
            .map_err(|_| AppError::Validation("Select a disability type".to_string()))
    }
}

#[derive(Serialize)]
pub struct RegisteredResponse {
    pub id: Uuid,
    pub status: AccountStatus,
}

/// POST /api/register/company — multipart: businessRegNumber,
/// companyName, companyAddress, certificate (file).
pub async fn handle_register_company(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RegisteredResponse>, AppError> {
    let parts = read_parts(multipart, "certificate").await?;
    let form = CompanyForm {
        business_reg_number: parts.text("businessRegNumber"),
        company_name: parts.text("companyName"),
        company_address: parts.text("companyAddress"),
    };
    let doc = register_company(state.store.as_ref(), &state.files, form, parts.file).await?;
    Ok(Json(RegisteredResponse {
        id: doc.id,
        status: AccountStatus::Pending,
    }))
}

/// POST /api/register/jobseeker — multipart: name, age, disabilityType,
/// qualifications, certificate (file).
pub async fn handle_register_jobseeker(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<RegisteredResponse>, AppError> {
    let parts = read_parts(multipart, "certificate").await?;
    let form = JobSeekerForm {
        name: parts.text("name"),
        age: parts.text("age"),
        disability_type: parts.category("disabilityType")?,
        qualifications: parts.text("qualifications"),
    };
    let doc = register_jobseeker(state.store.as_ref(), &state.files, form, parts.file).await?;
    Ok(Json(RegisteredResponse {
        id: doc.id,
        status: AccountStatus::Pending,
    }))
}

#[derive(Serialize)]
pub struct ApplicationSubmittedResponse {
    pub id: Uuid,
    pub status: ApplicationStatus,
}

/// POST /api/jobs/:id/apply — multipart application form plus the
/// resume file. Requires a logged-in user; the applicant identity comes
/// from the session, never the form.
pub async fn handle_submit_application(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<ApplicationSubmittedResponse>, AppError> {
    let Some(applicant) = state.session.current().await else {
        return Err(AppError::Unauthorized);
    };

    let parts = read_parts(multipart, "resume").await?;
    let form = ApplicationForm {
        first_name: parts.text("firstName"),
        middle_name: parts.text("middleName"),
        last_name: parts.text("lastName"),
        email: parts.text("email"),
        phone: parts.text("phone"),
        current_address: parts.text("currentAddress"),
        permanent_address: parts.text("permanentAddress"),
        highest_qualification: parts.text("highestQualification"),
        disability: parts.text("disability"),
    };
    let doc = submit_application(
        state.store.as_ref(),
        &state.files,
        &applicant,
        job_id,
        form,
        parts.file,
    )
    .await?;
    Ok(Json(ApplicationSubmittedResponse {
        id: doc.id,
        status: ApplicationStatus::Pending,
    }))
}
