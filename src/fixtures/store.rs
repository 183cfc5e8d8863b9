//! Copying spooled uploads into the destination directory.
//!
//! The copy is written to a hidden staging file next to the destination and
//! renamed over it once complete. A failed copy therefore leaves either the
//! previous file or nothing; the staging file is removed when it is dropped.
//! Same-name uploads racing each other resolve to whichever rename runs last.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::fixtures::sanitize;

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The sanitized name cannot name a file.
    #[error("'{0}' is not a usable file name")]
    InvalidName(String),

    /// Staging file could not be created in the destination directory.
    #[error("failed to stage upload in {dir}: {source}")]
    Stage {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading the spooled upload or writing the staged copy failed.
    #[error("failed to copy upload: {0}")]
    Copy(#[source] io::Error),

    /// Renaming the staged copy into place failed.
    #[error("failed to move upload to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The blocking copy task did not complete.
    #[error("copy task aborted: {0}")]
    Aborted(#[from] tokio::task::JoinError),
}

/// Copy `source` to `directory/name`, replacing any existing file.
///
/// Runs on the blocking pool. Returns the destination path.
pub async fn store_upload(
    source: PathBuf,
    directory: PathBuf,
    name: String,
) -> Result<PathBuf, StoreError> {
    tokio::task::spawn_blocking(move || store_blocking(&source, &directory, &name)).await?
}

fn store_blocking(source: &Path, directory: &Path, name: &str) -> Result<PathBuf, StoreError> {
    if !sanitize::is_storable(name) || name.contains(['/', '\\']) {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    let destination = directory.join(name);

    let mut staged = tempfile::Builder::new()
        .prefix(".upload-")
        .tempfile_in(directory)
        .map_err(|source| StoreError::Stage {
            dir: directory.to_path_buf(),
            source,
        })?;

    let mut input = File::open(source).map_err(StoreError::Copy)?;
    io::copy(&mut input, staged.as_file_mut()).map_err(StoreError::Copy)?;
    staged.as_file_mut().flush().map_err(StoreError::Copy)?;

    staged
        .persist(&destination)
        .map_err(|e| StoreError::Persist {
            path: destination.clone(),
            source: e.error,
        })?;

    Ok(destination)
}
