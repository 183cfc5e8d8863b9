//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the fixture
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the fixture server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FixtureConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Paths each fixture is mounted on.
    pub routes: RoutesConfig,

    /// Echo fixture settings.
    pub echo: EchoConfig,

    /// Upload fixture settings.
    pub upload: UploadConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Route table for the fixtures.
///
/// The `.php` aliases keep existing client test suites pointed at the
/// same URLs they were written against.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Paths served by the echo fixture (any method).
    pub echo_paths: Vec<String>,

    /// Paths served by the upload fixture (POST only).
    pub upload_paths: Vec<String>,

    /// Liveness probe path.
    pub health_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            echo_paths: vec!["/echo".to_string(), "/echoPutFile.php".to_string()],
            upload_paths: vec!["/upload".to_string(), "/postFile.php".to_string()],
            health_path: "/healthz".to_string(),
        }
    }
}

/// Echo fixture configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EchoConfig {
    /// Largest chunk written to the response in one frame.
    pub chunk_size: usize,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self { chunk_size: 1024 }
    }
}

/// Upload fixture configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Destination directory. Must already exist; it is never created.
    /// Also shown verbatim in the success fragment.
    pub directory: String,

    /// Multipart field carrying the file.
    pub field_name: String,

    /// Maximum accepted request body for uploads, in bytes.
    pub max_body_bytes: usize,

    /// Where incoming files are spooled before the copy.
    /// Falls back to the system temp directory.
    pub temp_dir: Option<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: "uploads/".to_string(),
            field_name: "ufile".to_string(),
            max_body_bytes: 64 * 1024 * 1024,
            temp_dir: None,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output style.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output style.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
