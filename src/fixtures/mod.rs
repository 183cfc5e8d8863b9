//! Test-double endpoints.
//!
//! # Data Flow
//! ```text
//! PUT  /echo, /echoPutFile.php
//!     → echo.rs (stream body back in bounded chunks)
//!
//! POST /upload, /postFile.php
//!     → upload.rs (extract `ufile`, spool)
//!     → sanitize.rs (filename replacement table)
//!     → store.rs (staged copy into uploads/)
//!     → size.rs + fragment.rs (HTML status)
//! ```
//!
//! # Design Decisions
//! - Handlers hold no state between requests; the upload directory is the
//!   only shared resource and is not locked
//! - Echo accepts every method; upload is POST only

pub mod echo;
pub mod fragment;
pub mod sanitize;
pub mod size;
pub mod store;
pub mod upload;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::FixtureConfig;
pub use upload::{UploadOutcome, UploadSettings, UploadedFile};

/// State injected into fixture handlers.
#[derive(Debug, Clone)]
pub struct FixtureState {
    pub echo_chunk_size: usize,
    pub upload: Arc<UploadSettings>,
}

impl FixtureState {
    pub fn from_config(config: &FixtureConfig) -> Self {
        Self {
            echo_chunk_size: config.echo.chunk_size,
            upload: Arc::new(UploadSettings {
                directory: PathBuf::from(&config.upload.directory),
                display_directory: config.upload.directory.clone(),
                field_name: config.upload.field_name.clone(),
                temp_dir: config.upload.temp_dir.as_ref().map(PathBuf::from),
            }),
        }
    }
}

/// Build the router serving every configured echo path.
pub fn echo_router(config: &FixtureConfig) -> Router {
    config
        .routes
        .echo_paths
        .iter()
        .fold(Router::<FixtureState>::new(), |router, path| {
            router.route(path, any(echo::echo_body))
        })
        .with_state(FixtureState::from_config(config))
}

/// Build the router serving every configured upload path, with the upload
/// body limit applied.
pub fn upload_router(config: &FixtureConfig) -> Router {
    config
        .routes
        .upload_paths
        .iter()
        .fold(Router::<FixtureState>::new(), |router, path| {
            router.route(path, post(upload::upload_file))
        })
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.upload.max_body_bytes))
        .with_state(FixtureState::from_config(config))
}
