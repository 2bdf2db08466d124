//! Typed records for each store collection. The store itself is
//! schema-less, so the constructors here are the only place required
//! fields are enforced and `searchableFields` arrays are derived.
//! Wire field names stay camelCase to match the stored documents.

pub mod account;
pub mod application;
pub mod disability;
pub mod job;

pub use account::{AccountStatus, Company, CompanyForm, JobSeeker, JobSeekerForm};
pub use application::{Application, ApplicationForm, ApplicationStatus};
pub use disability::DisabilityCategory;
pub use job::{Job, JobForm, JobStatus};

use crate::errors::AppError;

/// Rejects empty or whitespace-only required fields with the field's
/// user-facing label in the message.
pub(crate) fn required(value: &str, label: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{label} is required")));
    }
    Ok(())
}
