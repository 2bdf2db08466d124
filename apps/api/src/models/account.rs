use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{required, DisabilityCategory};

/// Moderation state of a registered account. Every registration starts
/// pending; approval happens outside this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Approved,
    Rejected,
}

/// A company account in the `companies` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub business_reg_number: String,
    pub company_name: String,
    pub company_address: String,
    /// Path of the stored registration certificate, relative to the
    /// uploads root. A reference, not ownership: the file lives in the
    /// upload tree.
    pub certificate_path: String,
    pub status: AccountStatus,
    pub is_active: bool,
    pub searchable_fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyForm {
    pub business_reg_number: String,
    pub company_name: String,
    pub company_address: String,
}

impl CompanyForm {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.business_reg_number.chars().count() != 21 {
            return Err(AppError::Validation(
                "Business registration number must be 21 digits".to_string(),
            ));
        }
        required(&self.company_name, "Company name")?;
        required(&self.company_address, "Company address")?;
        Ok(())
    }
}

impl Company {
    pub fn register(form: CompanyForm, certificate_path: String) -> Result<Self, AppError> {
        form.validate()?;
        let searchable_fields = vec![
            form.company_name.to_lowercase(),
            form.business_reg_number.clone(),
            form.company_address.to_lowercase(),
        ];
        Ok(Company {
            business_reg_number: form.business_reg_number,
            company_name: form.company_name,
            company_address: form.company_address,
            certificate_path,
            status: AccountStatus::Pending,
            is_active: true,
            searchable_fields,
        })
    }
}

/// A job-seeker account in the `jobseekers` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeeker {
    pub name: String,
    pub age: u8,
    pub disability_type: DisabilityCategory,
    pub qualifications: String,
    pub certificate_path: String,
    pub status: AccountStatus,
    pub is_active: bool,
    pub searchable_fields: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSeekerForm {
    pub name: String,
    pub age: String,
    pub disability_type: DisabilityCategory,
    pub qualifications: String,
}

impl JobSeekerForm {
    pub fn validate(&self) -> Result<u8, AppError> {
        required(&self.name, "Full name")?;
        required(&self.qualifications, "Educational qualifications")?;
        let age: u8 = self
            .age
            .trim()
            .parse()
            .map_err(|_| AppError::Validation("Age must be a number".to_string()))?;
        if !(18..=100).contains(&age) {
            return Err(AppError::Validation(
                "Age must be between 18 and 100".to_string(),
            ));
        }
        Ok(age)
    }
}

impl JobSeeker {
    pub fn register(form: JobSeekerForm, certificate_path: String) -> Result<Self, AppError> {
        let age = form.validate()?;
        let searchable_fields = vec![
            form.name.to_lowercase(),
            form.disability_type.label().to_lowercase(),
            form.qualifications.to_lowercase(),
        ];
        Ok(JobSeeker {
            name: form.name,
            age,
            disability_type: form.disability_type,
            qualifications: form.qualifications,
            certificate_path,
            status: AccountStatus::Pending,
            is_active: true,
            searchable_fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company_form() -> CompanyForm {
        CompanyForm {
            business_reg_number: "123456789012345678901".to_string(),
            company_name: "Acme Services".to_string(),
            company_address: "12 MG Road, Pune".to_string(),
        }
    }

    #[test]
    fn company_registration_starts_pending_and_active() {
        let company = Company::register(company_form(), "uploads/c/cert.pdf".to_string()).unwrap();
        assert_eq!(company.status, AccountStatus::Pending);
        assert!(company.is_active);
        assert_eq!(
            company.searchable_fields,
            vec!["acme services", "123456789012345678901", "12 mg road, pune"]
        );
    }

    #[test]
    fn reg_number_must_be_exactly_21_chars() {
        for bad in ["", "12345", "1234567890123456789012"] {
            let mut form = company_form();
            form.business_reg_number = bad.to_string();
            let err = Company::register(form, String::new()).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "accepted {bad:?}");
        }
    }

    #[test]
    fn jobseeker_age_bounds_are_enforced() {
        let form = |age: &str| JobSeekerForm {
            name: "Asha Patil".to_string(),
            age: age.to_string(),
            disability_type: DisabilityCategory::HearingImpairment,
            qualifications: "B.Com".to_string(),
        };
        assert!(JobSeeker::register(form("17"), String::new()).is_err());
        assert!(JobSeeker::register(form("abc"), String::new()).is_err());
        let seeker = JobSeeker::register(form("34"), "uploads/j/cert.pdf".to_string()).unwrap();
        assert_eq!(seeker.age, 34);
        assert_eq!(
            seeker.searchable_fields,
            vec!["asha patil", "hearing impairment", "b.com"]
        );
    }

    #[test]
    fn company_record_keeps_camel_case_wire_shape() {
        let company = Company::register(company_form(), "uploads/c/cert.pdf".to_string()).unwrap();
        let json = serde_json::to_value(&company).unwrap();
        assert!(json.get("businessRegNumber").is_some());
        assert!(json.get("certificatePath").is_some());
        assert_eq!(json["status"], "pending");
    }
}
