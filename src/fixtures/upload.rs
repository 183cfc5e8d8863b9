//! Multipart file upload fixture.
//!
//! # Flow
//! ```text
//! multipart body
//!     → read_upload (find the file field, spool it to a temp file)
//!     → sanitize (ordered replacement table)
//!     → store (staged copy into the upload directory)
//!     → fragment (success or failure HTML)
//! ```
//!
//! A request without a file renders nothing at all. Storage failures of any
//! kind produce the same failure fragment; the cause is only logged.

use std::path::{Path, PathBuf};
use std::time::Instant;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use tempfile::{NamedTempFile, TempPath};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::fixtures::{fragment, sanitize, size, store, FixtureState};
use crate::observability::metrics;

/// A file received from the client, spooled to a temporary location.
///
/// The temporary file is deleted when this value is dropped.
#[derive(Debug)]
pub struct UploadedFile {
    /// Filename as reported by the client.
    pub file_name: String,
    /// Number of bytes received.
    pub size: u64,
    temp: TempPath,
}

impl UploadedFile {
    /// Location of the spooled bytes.
    pub fn path(&self) -> &Path {
        &self.temp
    }
}

/// How an upload request was resolved.
#[derive(Debug)]
pub enum UploadOutcome {
    /// No file was supplied; nothing is rendered.
    NoFile,
    /// The file was stored under its sanitized name.
    Stored { file_name: String, size: u64 },
    /// The file could not be stored.
    Failed,
}

impl UploadOutcome {
    fn label(&self) -> &'static str {
        match self {
            UploadOutcome::NoFile => "skipped",
            UploadOutcome::Stored { .. } => "stored",
            UploadOutcome::Failed => "failed",
        }
    }
}

/// Errors raised before the upload reaches the fixture logic.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Malformed multipart body, or body over the size limit.
    #[error("invalid multipart request: {0}")]
    Multipart(#[from] MultipartError),

    /// The incoming file could not be spooled to temporary storage.
    #[error("failed to spool upload: {0}")]
    Spool(#[source] std::io::Error),
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match self {
            UploadError::Multipart(e) => {
                tracing::warn!(error = %e, "Rejected upload request");
                (e.status(), e.body_text()).into_response()
            }
            UploadError::Spool(e) => {
                tracing::error!(error = %e, "Could not spool upload");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to receive upload").into_response()
            }
        }
    }
}

/// Upload handler.
pub async fn upload_file(
    State(state): State<FixtureState>,
    mut multipart: Multipart,
) -> Result<Html<String>, UploadError> {
    let start = Instant::now();
    let settings = &state.upload;

    let upload = read_upload(
        &mut multipart,
        &settings.field_name,
        settings.temp_dir.as_deref(),
    )
    .await?;

    let outcome = match upload {
        None => UploadOutcome::NoFile,
        Some(file) => process_upload(file, &settings.directory).await,
    };

    metrics::record_upload(outcome.label(), start);

    let body = match outcome {
        UploadOutcome::NoFile => {
            tracing::debug!(field = %settings.field_name, "No file supplied");
            String::new()
        }
        UploadOutcome::Stored { file_name, size } => fragment::upload_succeeded(
            &file_name,
            &size::format_size(size),
            &settings.display_directory,
        ),
        UploadOutcome::Failed => fragment::UPLOAD_FAILED.to_string(),
    };

    Ok(Html(body))
}

/// Sanitize the reported name and copy the file into `directory`.
pub async fn process_upload(file: UploadedFile, directory: &Path) -> UploadOutcome {
    let file_name = sanitize::sanitize_filename(sanitize::base_name(&file.file_name));

    let result = store::store_upload(
        file.path().to_path_buf(),
        directory.to_path_buf(),
        file_name.clone(),
    )
    .await;

    match result {
        Ok(destination) => {
            tracing::info!(
                reported = %file.file_name,
                stored = %destination.display(),
                size = file.size,
                "Upload stored"
            );
            UploadOutcome::Stored {
                file_name,
                size: file.size,
            }
        }
        Err(e) => {
            tracing::warn!(
                reported = %file.file_name,
                sanitized = %file_name,
                directory = %directory.display(),
                error = %e,
                "Upload could not be stored"
            );
            UploadOutcome::Failed
        }
    }
}

/// Find the file field named `field_name` and spool its contents.
///
/// Returns `None` when no such field carries a file. A field with an empty
/// filename is what browsers send for an untouched file input, so it counts
/// as absent. Other fields are skipped.
pub async fn read_upload(
    multipart: &mut Multipart,
    field_name: &str,
    temp_dir: Option<&Path>,
) -> Result<Option<UploadedFile>, UploadError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => continue,
        };

        let spool = match temp_dir {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(UploadError::Spool)?;

        let handle = spool.as_file().try_clone().map_err(UploadError::Spool)?;
        let mut writer = tokio::fs::File::from_std(handle);
        let mut size = 0u64;

        while let Some(chunk) = field.chunk().await? {
            size += chunk.len() as u64;
            writer.write_all(&chunk).await.map_err(UploadError::Spool)?;
        }
        writer.flush().await.map_err(UploadError::Spool)?;

        tracing::debug!(file_name = %file_name, size, "Upload received");

        return Ok(Some(UploadedFile {
            file_name,
            size,
            temp: spool.into_temp_path(),
        }));
    }

    Ok(None)
}

/// Resolved upload settings shared by all requests.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    /// Destination directory on disk.
    pub directory: PathBuf,
    /// Directory string shown in the success fragment.
    pub display_directory: String,
    /// Multipart field carrying the file.
    pub field_name: String,
    /// Spool location; system temp dir when unset.
    pub temp_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    fn spooled(name: &str, content: &[u8]) -> UploadedFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        UploadedFile {
            file_name: name.to_string(),
            size: content.len() as u64,
            temp: file.into_temp_path(),
        }
    }

    #[tokio::test]
    async fn stores_under_sanitized_name() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = process_upload(spooled("50% off & more.txt", b"deal"), dir.path()).await;

        match outcome {
            UploadOutcome::Stored { file_name, size } => {
                assert_eq!(file_name, "50Percent off and more.txt");
                assert_eq!(size, 4);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(
            fs::read(dir.path().join("50Percent off and more.txt")).unwrap(),
            b"deal"
        );
    }

    #[tokio::test]
    async fn client_paths_are_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = process_upload(spooled("../../escape#1.txt", b"x"), dir.path()).await;

        assert!(matches!(outcome, UploadOutcome::Stored { ref file_name, .. } if file_name == "escapeNo.1.txt"));
        assert!(dir.path().join("escapeNo.1.txt").exists());
    }

    #[tokio::test]
    async fn name_reduced_to_nothing_fails() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = process_upload(spooled("?*^", b"x"), dir.path()).await;

        assert!(matches!(outcome, UploadOutcome::Failed));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn spool_is_removed_after_processing() {
        let dir = tempfile::tempdir().unwrap();
        let file = spooled("a.txt", b"abc");
        let spool_path = file.path().to_path_buf();

        process_upload(file, dir.path()).await;

        assert!(!spool_path.exists());
    }
}
