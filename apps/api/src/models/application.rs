use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::required;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A submitted job application. Written once; there is no update path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub job_id: Uuid,
    pub job_title: String,
    pub company_id: Uuid,
    pub company_name: String,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub email: String,
    pub phone: String,
    pub current_address: String,
    pub permanent_address: String,
    pub highest_qualification: String,
    pub disability: String,
    /// Reference to the stored resume, relative to the uploads root.
    pub resume_path: String,
    pub status: ApplicationStatus,
    pub searchable_fields: Vec<String>,
}

/// The applicant-entered half of an application. Job and applicant
/// identity are resolved by the pipeline, not submitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub current_address: String,
    pub permanent_address: String,
    pub highest_qualification: String,
    pub disability: String,
}

impl ApplicationForm {
    pub fn validate(&self) -> Result<(), AppError> {
        required(&self.first_name, "First name")?;
        required(&self.last_name, "Last name")?;
        required(&self.email, "Email address")?;
        required(&self.phone, "Phone number")?;
        required(&self.current_address, "Current address")?;
        required(&self.permanent_address, "Permanent address")?;
        required(&self.highest_qualification, "Highest qualification")?;
        required(&self.disability, "Disability type")?;
        Ok(())
    }

    /// First, middle and last name joined the way the application form
    /// displays them, with the ends trimmed when the middle is absent.
    pub fn full_name(&self) -> String {
        format!("{} {} {}", self.first_name, self.middle_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Job fields an application snapshots at submission time.
pub struct JobSnapshot {
    pub job_id: Uuid,
    pub title: String,
    pub company_id: Uuid,
    pub company_name: String,
}

impl Application {
    pub fn submit(
        form: ApplicationForm,
        job: JobSnapshot,
        applicant_id: Uuid,
        resume_path: String,
    ) -> Result<Self, AppError> {
        form.validate()?;
        let searchable_fields = vec![
            form.first_name.to_lowercase(),
            form.last_name.to_lowercase(),
            form.email.to_lowercase(),
            job.title.to_lowercase(),
            job.company_name.to_lowercase(),
        ];
        Ok(Application {
            job_id: job.job_id,
            job_title: job.title,
            company_id: job.company_id,
            company_name: job.company_name,
            applicant_id,
            applicant_name: form.full_name(),
            email: form.email,
            phone: form.phone,
            current_address: form.current_address,
            permanent_address: form.permanent_address,
            highest_qualification: form.highest_qualification,
            disability: form.disability,
            resume_path,
            status: ApplicationStatus::Pending,
            searchable_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ApplicationForm {
        ApplicationForm {
            first_name: "Ravi".to_string(),
            middle_name: String::new(),
            last_name: "Kumar".to_string(),
            email: "Ravi.K@example.com".to_string(),
            phone: "9876543210".to_string(),
            current_address: "Delhi".to_string(),
            permanent_address: "Delhi".to_string(),
            highest_qualification: "B.A.".to_string(),
            disability: "Visual Impairment".to_string(),
        }
    }

    fn snapshot() -> JobSnapshot {
        JobSnapshot {
            job_id: Uuid::new_v4(),
            title: "Data Entry Clerk".to_string(),
            company_id: Uuid::new_v4(),
            company_name: "Acme Services".to_string(),
        }
    }

    #[test]
    fn submission_is_pending_with_derived_searchable_fields() {
        let app = Application::submit(form(), snapshot(), Uuid::new_v4(), "uploads/r.pdf".into())
            .unwrap();
        assert_eq!(app.status, ApplicationStatus::Pending);
        assert_eq!(
            app.searchable_fields,
            vec![
                "ravi",
                "kumar",
                "ravi.k@example.com",
                "data entry clerk",
                "acme services"
            ]
        );
    }

    #[test]
    fn full_name_joins_all_three_parts() {
        let mut f = form();
        f.middle_name = "Prakash".to_string();
        assert_eq!(f.full_name(), "Ravi Prakash Kumar");
        // An absent middle name leaves the inner gap, matching the form's
        // display of the joined value.
        assert_eq!(form().full_name(), "Ravi  Kumar");
    }

    #[test]
    fn missing_contact_field_is_rejected() {
        let mut f = form();
        f.phone = String::new();
        let err =
            Application::submit(f, snapshot(), Uuid::new_v4(), "uploads/r.pdf".into()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
