//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, chunk size > 0)
//! - Detect conflicting routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FixtureConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::FixtureConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: route path '{path}' must start with '/'")]
    InvalidPath { field: &'static str, path: String },

    #[error("route path '{0}' is registered more than once")]
    DuplicatePath(String),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FixtureConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.routes.echo_paths.is_empty() {
        errors.push(ValidationError::Empty("routes.echo_paths"));
    }
    if config.routes.upload_paths.is_empty() {
        errors.push(ValidationError::Empty("routes.upload_paths"));
    }

    let mut seen = HashSet::new();
    let all_paths = config
        .routes
        .echo_paths
        .iter()
        .map(|p| ("routes.echo_paths", p))
        .chain(config.routes.upload_paths.iter().map(|p| ("routes.upload_paths", p)))
        .chain(std::iter::once(("routes.health_path", &config.routes.health_path)));

    for (field, path) in all_paths {
        if !path.starts_with('/') {
            errors.push(ValidationError::InvalidPath {
                field,
                path: path.clone(),
            });
        } else if !seen.insert(path.as_str()) {
            errors.push(ValidationError::DuplicatePath(path.clone()));
        }
    }

    if config.echo.chunk_size == 0 {
        errors.push(ValidationError::Zero("echo.chunk_size"));
    }
    if config.upload.directory.trim().is_empty() {
        errors.push(ValidationError::Empty("upload.directory"));
    }
    if config.upload.field_name.is_empty() {
        errors.push(ValidationError::Empty("upload.field_name"));
    }
    if config.upload.max_body_bytes == 0 {
        errors.push(ValidationError::Zero("upload.max_body_bytes"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
