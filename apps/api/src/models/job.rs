use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{required, DisabilityCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Active,
    /// Anything other than an active posting. Stored documents may carry
    /// statuses written by older clients; they all read back as closed.
    Closed,
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        if s == "active" {
            JobStatus::Active
        } else {
            JobStatus::Closed
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Active => "active".to_string(),
            JobStatus::Closed => "closed".to_string(),
        }
    }
}

/// One job posting as stored in the `jobs` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    pub qualifications: String,
    pub disability_types: Vec<DisabilityCategory>,
    #[serde(default)]
    pub requirements: String,
    pub company_id: Uuid,
    pub company_name: String,
    pub status: JobStatus,
    pub searchable_fields: Vec<String>,
}

/// Fields a company submits when creating a posting. Requirements /
/// accommodations text is the one optional field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobForm {
    pub title: String,
    pub description: String,
    pub salary: String,
    pub location: String,
    pub qualifications: String,
    pub disability_types: Vec<DisabilityCategory>,
    #[serde(default)]
    pub requirements: String,
}

impl JobForm {
    pub fn validate(&self) -> Result<(), AppError> {
        required(&self.title, "Job title")?;
        required(&self.description, "Job description")?;
        required(&self.salary, "Salary range")?;
        required(&self.location, "Location")?;
        required(&self.qualifications, "Required qualifications")?;
        Ok(())
    }
}

impl Job {
    /// Builds an active posting for the given company, deriving the
    /// lowercase searchable-field list from title, location and tags.
    pub fn post(form: JobForm, company_id: Uuid, company_name: &str) -> Result<Self, AppError> {
        form.validate()?;
        let searchable_fields = [
            form.title.to_lowercase(),
            form.location.to_lowercase(),
        ]
        .into_iter()
        .chain(
            form.disability_types
                .iter()
                .map(|t| t.label().to_lowercase()),
        )
        .collect();

        Ok(Job {
            title: form.title,
            description: form.description,
            salary: form.salary,
            location: form.location,
            qualifications: form.qualifications,
            disability_types: form.disability_types,
            requirements: form.requirements,
            company_id,
            company_name: company_name.to_string(),
            status: JobStatus::Active,
            searchable_fields,
        })
    }
}
