use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::JobSnapshot;
use crate::models::{
    Application, ApplicationForm, Company, CompanyForm, Job, JobSeeker, JobSeekerForm,
};
use crate::session::SessionUser;
use crate::store::{Document, DocumentStore, APPLICATIONS, COMPANIES, JOBS, JOBSEEKERS};
use crate::uploads::FileStorage;

/// Certificates are capped at 5 MB, matching the registration form.
const MAX_CERTIFICATE_BYTES: usize = 5 * 1024 * 1024;

/// An attachment received with a submission.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub name: String,
    pub bytes: Bytes,
}

fn check_certificate(file: Option<FilePart>, missing_msg: &str) -> Result<FilePart, AppError> {
    let Some(file) = file else {
        return Err(AppError::Validation(missing_msg.to_string()));
    };
    if file.bytes.len() > MAX_CERTIFICATE_BYTES {
        return Err(AppError::Validation(
            "File size must be less than 5MB".to_string(),
        ));
    }
    Ok(file)
}

/// Registers a company: certificate lands under
/// `companies/{businessRegNumber}/certificates`, record starts pending.
pub async fn register_company(
    store: &dyn DocumentStore,
    files: &FileStorage,
    form: CompanyForm,
    certificate: Option<FilePart>,
) -> Result<Document, AppError> {
    // Everything checkable up front fails before any file is written.
    form.validate()?;
    let certificate =
        check_certificate(certificate, "Please upload a registration certificate")?;

    let directory = format!("companies/{}/certificates", form.business_reg_number);
    let certificate_path = files
        .save(&directory, &certificate.name, &certificate.bytes)
        .await?;

    let company = Company::register(form, certificate_path)?;
    let data = serde_json::to_value(&company).map_err(anyhow::Error::from)?;
    let doc = store.insert(COMPANIES, data).await?;
    info!("Company registered with ID: {}", doc.id);
    Ok(doc)
}

/// Registers a job seeker: certificate lands under
/// `jobseekers/{name}/certificates`.
pub async fn register_jobseeker(
    store: &dyn DocumentStore,
    files: &FileStorage,
    form: JobSeekerForm,
    certificate: Option<FilePart>,
) -> Result<Document, AppError> {
    form.validate()?;
    let certificate =
        check_certificate(certificate, "Please upload your disability certificate")?;

    let directory = format!("jobseekers/{}/certificates", form.name);
    let certificate_path = files
        .save(&directory, &certificate.name, &certificate.bytes)
        .await?;

    let seeker = JobSeeker::register(form, certificate_path)?;
    let data = serde_json::to_value(&seeker).map_err(anyhow::Error::from)?;
    let doc = store.insert(JOBSEEKERS, data).await?;
    info!("Job seeker registered with ID: {}", doc.id);
    Ok(doc)
}

/// Submits an application for `job_id` on behalf of the logged-in user.
/// The job is resolved first, so a missing job writes nothing at all.
pub async fn submit_application(
    store: &dyn DocumentStore,
    files: &FileStorage,
    applicant: &SessionUser,
    job_id: Uuid,
    form: ApplicationForm,
    resume: Option<FilePart>,
) -> Result<Document, AppError> {
    form.validate()?;
    let resume =
        resume.ok_or_else(|| AppError::Validation("Please upload your resume".to_string()))?;

    let job_doc = store
        .get(JOBS, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    let job: Job = job_doc.parse()?;

    let directory = format!("applications/{job_id}/resumes");
    let resume_path = files.save(&directory, &resume.name, &resume.bytes).await?;

    let application = Application::submit(
        form,
        JobSnapshot {
            job_id,
            title: job.title,
            company_id: job.company_id,
            company_name: job.company_name,
        },
        applicant.id(),
        resume_path,
    )?;
    let data = serde_json::to_value(&application).map_err(anyhow::Error::from)?;
    let doc = store.insert(APPLICATIONS, data).await?;
    info!("Application submitted with ID: {}", doc.id);
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DisabilityCategory, JobStatus};
    use crate::store::MemStore;

    fn storage(tmp: &tempfile::TempDir) -> FileStorage {
        FileStorage::new(tmp.path().join("uploads"))
    }

    fn company_form() -> CompanyForm {
        CompanyForm {
            business_reg_number: "123456789012345678901".to_string(),
            company_name: "Acme Services".to_string(),
            company_address: "12 MG Road, Pune".to_string(),
        }
    }

    fn certificate() -> Option<FilePart> {
        Some(FilePart {
            name: "certificate.pdf".to_string(),
            bytes: Bytes::from_static(b"%PDF-1.4 cert"),
        })
    }

    fn application_form() -> ApplicationForm {
        ApplicationForm {
            first_name: "Ravi".to_string(),
            middle_name: String::new(),
            last_name: "Kumar".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "9876543210".to_string(),
            current_address: "Delhi".to_string(),
            permanent_address: "Delhi".to_string(),
            highest_qualification: "B.A.".to_string(),
            disability: "Visual Impairment".to_string(),
        }
    }

    async fn stored_files(tmp: &tempfile::TempDir) -> usize {
        let mut count = 0;
        let mut stack = vec![tmp.path().to_path_buf()];
        while let Some(dir) = stack.pop() {
            let Ok(mut entries) = tokio::fs::read_dir(&dir).await else {
                continue;
            };
            while let Ok(Some(entry)) = entries.next_entry().await {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else {
                    count += 1;
                }
            }
        }
        count
    }

    #[tokio::test]
    async fn bad_reg_number_fails_before_any_upload_or_insert() {
        let store = MemStore::new();
        let tmp = tempfile::tempdir().unwrap();
        let files = storage(&tmp);

        let mut form = company_form();
        form.business_reg_number = "12345".to_string();
        let err = register_company(&store, &files, form, certificate())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.len(COMPANIES).await, 0);
        assert_eq!(stored_files(&tmp).await, 0, "no file should be written");
    }

    #[tokio::test]
    async fn missing_certificate_fails_fast() {
        let store = MemStore::new();
        let tmp = tempfile::tempdir().unwrap();
        let err = register_company(&store, &storage(&tmp), company_form(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stored_files(&tmp).await, 0);
    }

    #[tokio::test]
    async fn oversized_certificate_is_rejected() {
        let store = MemStore::new();
        let tmp = tempfile::tempdir().unwrap();
        let big = Some(FilePart {
            name: "certificate.pdf".to_string(),
            bytes: Bytes::from(vec![0u8; MAX_CERTIFICATE_BYTES + 1]),
        });
        let err = register_company(&store, &storage(&tmp), company_form(), big)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(stored_files(&tmp).await, 0);
    }

    #[tokio::test]
    async fn successful_registration_stores_file_then_record() {
        let store = MemStore::new();
        let tmp = tempfile::tempdir().unwrap();
        let doc = register_company(&store, &storage(&tmp), company_form(), certificate())
            .await
            .unwrap();

        assert_eq!(doc.data["status"], "pending");
        let path = doc.data["certificatePath"].as_str().unwrap();
        assert!(path.starts_with("uploads/companies/123456789012345678901/certificates/"));
        assert!(tmp.path().join(path).exists());
    }

    #[tokio::test]
    async fn insert_failure_leaves_an_orphaned_file_and_no_record() {
        let store = MemStore::new();
        store.fail_next_insert();
        let tmp = tempfile::tempdir().unwrap();

        let err = register_company(&store, &storage(&tmp), company_form(), certificate())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(store.len(COMPANIES).await, 0, "no record written");
        assert_eq!(stored_files(&tmp).await, 1, "upload remains on disk");
    }

    #[tokio::test]
    async fn application_for_missing_job_writes_nothing() {
        let store = MemStore::new();
        let tmp = tempfile::tempdir().unwrap();
        let seeker = JobSeeker::register(
            JobSeekerForm {
                name: "Ravi Kumar".to_string(),
                age: "28".to_string(),
                disability_type: DisabilityCategory::VisualImpairment,
                qualifications: "B.A.".to_string(),
            },
            "uploads/jobseekers/x/cert.pdf".to_string(),
        )
        .unwrap();
        let applicant = SessionUser::Jobseeker {
            id: Uuid::new_v4(),
            record: seeker,
        };

        let err = submit_application(
            &store,
            &storage(&tmp),
            &applicant,
            Uuid::new_v4(),
            application_form(),
            Some(FilePart {
                name: "resume.pdf".to_string(),
                bytes: Bytes::from_static(b"%PDF-1.4"),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.len(APPLICATIONS).await, 0);
        assert_eq!(stored_files(&tmp).await, 0);
    }

    #[tokio::test]
    async fn application_snapshots_the_job_and_starts_pending() {
        let store = MemStore::new();
        let tmp = tempfile::tempdir().unwrap();

        let company_id = Uuid::new_v4();
        let job = Job::post(
            crate::models::JobForm {
                title: "Data Entry Clerk".to_string(),
                description: "Accurate data entry".to_string(),
                salary: "15k".to_string(),
                location: "Delhi".to_string(),
                qualifications: "12th pass".to_string(),
                disability_types: vec![DisabilityCategory::VisualImpairment],
                requirements: String::new(),
            },
            company_id,
            "Acme Services",
        )
        .unwrap();
        assert_eq!(job.status, JobStatus::Active);
        let job_doc = store
            .insert(JOBS, serde_json::to_value(&job).unwrap())
            .await
            .unwrap();

        let applicant_id = Uuid::new_v4();
        let applicant = SessionUser::Jobseeker {
            id: applicant_id,
            record: JobSeeker::register(
                JobSeekerForm {
                    name: "Ravi Kumar".to_string(),
                    age: "28".to_string(),
                    disability_type: DisabilityCategory::VisualImpairment,
                    qualifications: "B.A.".to_string(),
                },
                "uploads/jobseekers/x/cert.pdf".to_string(),
            )
            .unwrap(),
        };

        let doc = submit_application(
            &store,
            &storage(&tmp),
            &applicant,
            job_doc.id,
            application_form(),
            Some(FilePart {
                name: "résumé final.pdf".to_string(),
                bytes: Bytes::from_static(b"%PDF-1.4"),
            }),
        )
        .await
        .unwrap();

        assert_eq!(doc.data["status"], "pending");
        assert_eq!(doc.data["jobTitle"], "Data Entry Clerk");
        assert_eq!(doc.data["companyName"], "Acme Services");
        assert_eq!(doc.data["applicantId"], serde_json::json!(applicant_id));
        let resume_path = doc.data["resumePath"].as_str().unwrap();
        assert!(resume_path.starts_with(&format!("uploads/applications/{}/resumes/", job_doc.id)));
        assert!(resume_path.ends_with("-rsumfinal.pdf"));
    }
}
