//! The session is one explicit object owned by `AppState`: a cached copy
//! of a company or job-seeker record, persisted wholesale to a single
//! JSON file and announced to subscribers through a watch channel. It is
//! a convenience cache, not a credential — login is an unauthenticated
//! equality lookup against the store.

pub mod handlers;

use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Company, JobSeeker};
use crate::store::{DocumentStore, COMPANIES, JOBSEEKERS};

/// The logged-in user, tagged so consumers can branch on account type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SessionUser {
    Company {
        id: Uuid,
        #[serde(flatten)]
        record: Company,
    },
    Jobseeker {
        id: Uuid,
        #[serde(flatten)]
        record: JobSeeker,
    },
}

impl SessionUser {
    pub fn id(&self) -> Uuid {
        match self {
            SessionUser::Company { id, .. } | SessionUser::Jobseeker { id, .. } => *id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SessionUser::Company { record, .. } => &record.company_name,
            SessionUser::Jobseeker { record, .. } => &record.name,
        }
    }
}

pub struct Session {
    path: PathBuf,
    current: RwLock<Option<SessionUser>>,
    notify: watch::Sender<Option<SessionUser>>,
}

impl Session {
    /// Restores the persisted session if the file exists and parses; a
    /// missing or malformed file is a cold start.
    pub async fn restore(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<SessionUser>(&bytes) {
                Ok(user) => {
                    info!("Restored session for {}", user.display_name());
                    Some(user)
                }
                Err(e) => {
                    warn!("Discarding malformed session file: {e}");
                    None
                }
            },
            Err(_) => None,
        };
        let (notify, _) = watch::channel(current.clone());
        Session {
            path,
            current: RwLock::new(current),
            notify,
        }
    }

    pub async fn current(&self) -> Option<SessionUser> {
        self.current.read().await.clone()
    }

    /// Receiver that observes every login/logout transition.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.notify.subscribe()
    }

    /// Looks a company up by its business registration number. No
    /// uniqueness is enforced at write time, so an ambiguous lookup
    /// resolves to the first document in store order.
    pub async fn login_company(
        &self,
        store: &dyn DocumentStore,
        reg_number: &str,
    ) -> Result<SessionUser, AppError> {
        let matches = store
            .find_eq(COMPANIES, "businessRegNumber", reg_number)
            .await?;
        if matches.len() > 1 {
            warn!(
                "Ambiguous company login: {} records share registration number",
                matches.len()
            );
        }
        let doc = matches
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("Company not found".to_string()))?;
        let user = SessionUser::Company {
            id: doc.id,
            record: doc.parse()?,
        };
        self.set(Some(user.clone())).await;
        Ok(user)
    }

    /// Looks a job seeker up by registered full name; same first-match
    /// semantics as company login.
    pub async fn login_jobseeker(
        &self,
        store: &dyn DocumentStore,
        name: &str,
    ) -> Result<SessionUser, AppError> {
        let matches = store.find_eq(JOBSEEKERS, "name", name).await?;
        if matches.len() > 1 {
            warn!(
                "Ambiguous job seeker login: {} records share the name",
                matches.len()
            );
        }
        let doc = matches
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("No such user found".to_string()))?;
        let user = SessionUser::Jobseeker {
            id: doc.id,
            record: doc.parse()?,
        };
        self.set(Some(user.clone())).await;
        Ok(user)
    }

    pub async fn logout(&self) {
        self.set(None).await;
    }

    /// Replaces the session wholesale (last writer wins), persists it,
    /// and notifies subscribers. Persistence failures are logged, not
    /// surfaced: the in-memory session is already authoritative.
    async fn set(&self, user: Option<SessionUser>) {
        *self.current.write().await = user.clone();
        if let Err(e) = self.persist(&user).await {
            warn!("Failed to persist session: {e:#}");
        }
        self.notify.send_replace(user);
    }

    async fn persist(&self, user: &Option<SessionUser>) -> anyhow::Result<()> {
        match user {
            Some(user) => {
                if let Some(parent) = self.path.parent() {
                    tokio::fs::create_dir_all(parent).await?;
                }
                let bytes = serde_json::to_vec_pretty(user)?;
                tokio::fs::write(&self.path, bytes)
                    .await
                    .with_context(|| format!("writing {}", self.path.display()))
            }
            None => match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Company, CompanyForm, JobSeeker, JobSeekerForm};
    use crate::models::DisabilityCategory;
    use crate::store::MemStore;

    fn company(name: &str) -> Company {
        Company::register(
            CompanyForm {
                business_reg_number: "123456789012345678901".to_string(),
                company_name: name.to_string(),
                company_address: "12 MG Road, Pune".to_string(),
            },
            "uploads/companies/x/cert.pdf".to_string(),
        )
        .unwrap()
    }

    fn seeker(name: &str) -> JobSeeker {
        JobSeeker::register(
            JobSeekerForm {
                name: name.to_string(),
                age: "30".to_string(),
                disability_type: DisabilityCategory::PhysicalDisability,
                qualifications: "B.Com".to_string(),
            },
            "uploads/jobseekers/x/cert.pdf".to_string(),
        )
        .unwrap()
    }

    async fn session(dir: &tempfile::TempDir) -> Session {
        Session::restore(dir.path().join("session.json")).await
    }

    #[tokio::test]
    async fn company_login_takes_first_match_in_store_order() {
        let store = MemStore::new();
        let first = store
            .insert(COMPANIES, serde_json::to_value(company("First Pvt Ltd")).unwrap())
            .await
            .unwrap();
        store
            .insert(COMPANIES, serde_json::to_value(company("Second Pvt Ltd")).unwrap())
            .await
            .unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let session = session(&tmp).await;
        let user = session
            .login_company(&store, "123456789012345678901")
            .await
            .unwrap();
        assert_eq!(user.id(), first.id);
        assert_eq!(user.display_name(), "First Pvt Ltd");
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found_and_leaves_no_session() {
        let store = MemStore::new();
        let tmp = tempfile::tempdir().unwrap();
        let session = session(&tmp).await;
        let err = session.login_jobseeker(&store, "Nobody").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(session.current().await.is_none());
    }

    #[tokio::test]
    async fn login_notifies_subscribers_and_logout_clears() {
        let store = MemStore::new();
        store
            .insert(JOBSEEKERS, serde_json::to_value(seeker("Asha Patil")).unwrap())
            .await
            .unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let session = session(&tmp).await;
        let mut rx = session.subscribe();
        assert!(rx.borrow().is_none());

        session.login_jobseeker(&store, "Asha Patil").await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|u| u.display_name().to_string()),
            Some("Asha Patil".to_string())
        );

        session.logout().await;
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn session_survives_restart_via_the_persisted_file() {
        let store = MemStore::new();
        store
            .insert(JOBSEEKERS, serde_json::to_value(seeker("Asha Patil")).unwrap())
            .await
            .unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("session.json");
        let session = Session::restore(&path).await;
        session.login_jobseeker(&store, "Asha Patil").await.unwrap();

        let restored = Session::restore(&path).await;
        let user = restored.current().await.unwrap();
        assert_eq!(user.display_name(), "Asha Patil");
        assert!(matches!(user, SessionUser::Jobseeker { .. }));
    }

    #[test]
    fn session_user_carries_the_type_discriminant() {
        let user = SessionUser::Company {
            id: Uuid::new_v4(),
            record: company("Acme Services"),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["type"], "company");
        assert_eq!(json["companyName"], "Acme Services");
    }
}
