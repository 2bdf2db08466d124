//! Local file storage for certificates and resumes. Files land under a
//! configured uploads root with a collision-resistant generated name;
//! callers get back a relative path to store alongside their record.

pub mod handlers;

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::debug;

use crate::errors::AppError;

pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// `root` is the uploads directory itself; returned paths start with
    /// its final component (`uploads/...` by default).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileStorage { root: root.into() }
    }

    /// Writes `bytes` verbatim under `directory` (a relative subpath,
    /// created if absent) and returns the stored relative path.
    ///
    /// The generated name is `{epoch-millis}-{random}-{sanitized}`. The
    /// prefix avoids collisions between submissions; it does not make
    /// retries idempotent.
    pub async fn save(
        &self,
        directory: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, AppError> {
        let dir = self.root.join(directory);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Upload(format!("create {}: {e}", dir.display())))?;

        let filename = unique_filename(original_name);
        let path = dir.join(&filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Upload(format!("write {}: {e}", path.display())))?;

        debug!("Stored {} byte(s) at {}", bytes.len(), path.display());

        let root_name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "uploads".to_string());
        Ok(format!("{root_name}/{directory}/{filename}"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn unique_filename(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let salt: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{millis}-{salt}-{}", sanitize_filename(original_name))
}

/// Strips every character outside `[A-Za-z0-9.-]`. Accents, spaces and
/// punctuation disappear rather than being transliterated.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.' || *c == '-')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitization_keeps_only_ascii_alphanumerics_dots_and_dashes() {
        assert_eq!(sanitize_filename("résumé final.pdf"), "rsumfinal.pdf");
        assert_eq!(sanitize_filename("it's v2 (draft).docx"), "itsv2draft.docx");
        assert_eq!(sanitize_filename("plain-name.pdf"), "plain-name.pdf");
    }

    #[test]
    fn unique_name_is_millis_salt_then_sanitized_original() {
        let name = unique_filename("résumé final.pdf");
        let mut parts = name.splitn(3, '-');
        let millis: i64 = parts.next().unwrap().parse().unwrap();
        assert!(millis > 1_600_000_000_000, "not a millisecond timestamp");
        let _salt: u32 = parts.next().unwrap().parse().unwrap();
        assert_eq!(parts.next(), Some("rsumfinal.pdf"));
    }

    #[tokio::test]
    async fn save_writes_verbatim_and_returns_relative_path() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("uploads"));

        let path = storage
            .save("applications/abc/resumes", "résumé final.pdf", b"%PDF-1.4")
            .await
            .unwrap();
        assert!(path.starts_with("uploads/applications/abc/resumes/"));
        assert!(path.ends_with("-rsumfinal.pdf"));

        // The returned path is relative to the uploads root's parent.
        let on_disk = tmp.path().join(&path);
        let stored = tokio::fs::read(&on_disk).await.unwrap();
        assert_eq!(stored, b"%PDF-1.4");
    }

    #[tokio::test]
    async fn two_saves_of_the_same_name_do_not_collide() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(tmp.path().join("uploads"));
        let a = storage.save("certs", "cert.pdf", b"a").await.unwrap();
        let b = storage.save("certs", "cert.pdf", b"b").await.unwrap();
        assert_ne!(a, b);
    }
}
