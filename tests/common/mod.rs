//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use fixture_server::config::FixtureConfig;
use fixture_server::http::HttpServer;
use fixture_server::lifecycle::Shutdown;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A fixture server running on an ephemeral port with its own upload directory.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    scratch: TempDir,
    shutdown: Shutdown,
}

#[allow(dead_code)]
impl TestServer {
    /// Start a server with default settings and an existing `uploads/` directory.
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Start a server after letting the caller adjust the config.
    ///
    /// `upload.directory` points at `<scratch>/uploads/`, which exists unless
    /// the closure changes it.
    pub async fn start_with(adjust: impl FnOnce(&mut FixtureConfig)) -> Self {
        let scratch = tempfile::tempdir().unwrap();
        std::fs::create_dir(scratch.path().join("uploads")).unwrap();

        let mut config = FixtureConfig::default();
        config.listener.bind_address = "127.0.0.1:0".into();
        config.upload.directory = format!("{}/uploads/", scratch.path().display());
        config.upload.temp_dir = Some(scratch.path().display().to_string());
        adjust(&mut config);

        let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config);
        let server_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let _ = server.run(listener, server_shutdown).await;
        });

        let client = reqwest::Client::builder().no_proxy().build().unwrap();

        Self {
            addr,
            client,
            scratch,
            shutdown,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn scratch(&self) -> &Path {
        self.scratch.path()
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.scratch.path().join("uploads")
    }

    /// The directory string the success fragment displays.
    pub fn upload_dir_display(&self) -> String {
        format!("{}/uploads/", self.scratch.path().display())
    }

    /// Names of all entries in the upload directory, sorted.
    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.upload_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// POST a single file under the `ufile` field.
    pub async fn upload(&self, path: &str, file_name: &str, content: Vec<u8>) -> reqwest::Response {
        let part = reqwest::multipart::Part::bytes(content).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("ufile", part);
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .expect("server unreachable")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Deterministic non-text payload of the given length.
#[allow(dead_code)]
pub fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}
