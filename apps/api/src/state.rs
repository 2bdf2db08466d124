use std::sync::Arc;

use crate::config::Config;
use crate::jobs::JobCache;
use crate::prefs::Preferences;
use crate::session::Session;
use crate::store::DocumentStore;
use crate::uploads::FileStorage;

/// Shared application state injected into all route handlers via Axum
/// extractors. The store sits behind a trait object so handlers never
/// name a backend; tests swap in the in-memory implementation.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub files: Arc<FileStorage>,
    /// The once-per-process job index. Loaded on first search, never
    /// refreshed.
    pub jobs: Arc<JobCache>,
    /// The single explicit session object; see `session::Session`.
    pub session: Arc<Session>,
    pub prefs: Arc<Preferences>,
    pub config: Config,
}
