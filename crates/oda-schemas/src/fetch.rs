//! Retrieval of structure documents.
//!
//! Sources fetch and parse in one step. They never retry; a caller that
//! wants resilience wraps the update pipeline in its own policy.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};

use crate::error::{Result, SchemaError};
use crate::xml::{SchemaDocument, parse_schema};

/// Something that can produce the structure document published at a URL.
pub trait SchemaSource {
    fn fetch(&self, url: &str) -> Result<SchemaDocument>;
}

/// Fetches structure documents over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSchemaSource {
    client: Client,
}

impl HttpSchemaSource {
    /// Client without a request timeout.
    pub fn new() -> Result<Self> {
        Self::build(None)
    }

    /// Client that gives up on requests after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Self::build(Some(timeout))
    }

    fn build(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| SchemaError::Network {
            url: String::new(),
            message: format!("failed to build HTTP client: {e}"),
        })?;
        Ok(Self { client })
    }

    fn download(&self, url: &str) -> Result<String> {
        let network = |e: reqwest::Error| SchemaError::Network {
            url: url.to_string(),
            message: e.to_string(),
        };
        self.client
            .get(url)
            .send()
            .map_err(network)?
            .error_for_status()
            .map_err(network)?
            .text()
            .map_err(network)
    }
}

impl SchemaSource for HttpSchemaSource {
    fn fetch(&self, url: &str) -> Result<SchemaDocument> {
        info!(%url, "downloading structure document");
        let body = self.download(url)?;
        debug!(%url, bytes = body.len(), "parsing structure document");
        parse_schema(&body)
    }
}

/// Reads a structure document from a local file instead of the network.
///
/// Used for offline mirrors of the published documents; the requested URL
/// is only logged.
#[derive(Debug, Clone)]
pub struct FileSchemaSource {
    path: PathBuf,
}

impl FileSchemaSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SchemaSource for FileSchemaSource {
    fn fetch(&self, url: &str) -> Result<SchemaDocument> {
        info!(%url, path = %self.path.display(), "reading structure document from file");
        let body = std::fs::read_to_string(&self.path)
            .map_err(|e| SchemaError::io("read", &self.path, e))?;
        parse_schema(&body)
    }
}
