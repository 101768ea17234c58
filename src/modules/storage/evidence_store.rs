use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;

use crate::core::config::UploadsConfig;
use crate::core::error::{AppError, Result};

lazy_static! {
    static ref UNSAFE_CHARS: Regex = Regex::new(r"[^A-Za-z0-9_.-]+").unwrap();
}

/// Reduce a client-supplied filename to a safe basename. Path separators and
/// anything outside `[A-Za-z0-9_.-]` collapse to underscores; an empty result
/// falls back to `file`.
pub fn sanitize_filename(original: &str) -> String {
    let basename = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original);

    let cleaned = UNSAFE_CHARS.replace_all(basename, "_");
    let trimmed = cleaned.trim_matches(['.', '_']);

    if trimmed.is_empty() {
        "file".to_string()
    } else {
        trimmed.to_string()
    }
}

/// A file persisted to the evidence directory.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Name the file was stored under, unique per report.
    pub filename: String,
    /// Absolute or configured-relative path on disk.
    pub path: PathBuf,
    /// Size in bytes.
    pub size: i64,
}

/// Flat on-disk store for evidence attachments. Files are written as
/// `{report_id}_{sanitized_name}` directly under the configured directory.
#[derive(Debug, Clone)]
pub struct EvidenceStore {
    root: PathBuf,
}

impl EvidenceStore {
    pub fn new(config: &UploadsConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.directory).map_err(|e| {
            tracing::error!(error = %e, dir = %config.directory.display(), "Failed to create uploads directory");
            AppError::Internal("Failed to initialize evidence storage".to_string())
        })?;

        Ok(Self {
            root: config.directory.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one uploaded file for the given report. The report id prefix
    /// keeps names from colliding across reports.
    pub async fn save(&self, report_id: i64, original_name: &str, data: &[u8]) -> Result<StoredFile> {
        let filename = format!("{}_{}", report_id, sanitize_filename(original_name));
        let path = self.root.join(&filename);

        tokio::fs::write(&path, data).await.map_err(|e| {
            tracing::error!(error = %e, path = %path.display(), "Failed to write evidence file");
            AppError::Internal("Failed to store evidence file".to_string())
        })?;

        Ok(StoredFile {
            filename,
            path,
            size: data.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_names() {
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
        assert_eq!(sanitize_filename("IMG_2024-01.png"), "IMG_2024-01.png");
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\x\\shot.png"), "shot.png");
    }

    #[test]
    fn sanitize_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("my file (1).png"), "my_file_1_.png");
        assert_eq!(sanitize_filename("données.txt"), "donn_es.txt");
    }

    #[test]
    fn sanitize_falls_back_on_empty() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("..."), "file");
        assert_eq!(sanitize_filename("___"), "file");
    }

    #[tokio::test]
    async fn save_prefixes_report_id() {
        let dir = std::env::temp_dir().join(format!("evidence-test-{}", uuid::Uuid::new_v4()));
        let config = UploadsConfig {
            directory: dir.clone(),
            serve_static: false,
        };
        let store = EvidenceStore::new(&config).unwrap();

        let stored = store.save(42, "proof image.png", b"bytes").await.unwrap();
        assert_eq!(stored.filename, "42_proof_image.png");
        assert_eq!(stored.size, 5);
        assert!(stored.path.exists());

        tokio::fs::remove_dir_all(dir).await.unwrap();
    }
}
