//! The shared submission pipeline: validate the form, store the
//! attachment, build the typed record, insert it. One generic failure
//! surface after validation, no retry and no rollback — an insert
//! failure after a successful save leaves the stored file orphaned.

pub mod handlers;
pub mod pipeline;

pub use pipeline::{register_company, register_jobseeker, submit_application, FilePart};
