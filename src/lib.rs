//! HTTP test doubles for exercising web-service clients.
//!
//! Hosts two fixtures: a request-body echo and a multipart file upload that
//! stores the file under a sanitized name and answers with an HTML status
//! fragment.

pub mod config;
pub mod fixtures;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::FixtureConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
