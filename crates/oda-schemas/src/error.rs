use std::path::PathBuf;

use oda_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to fetch structure document {url}: {message}")]
    Network { url: String, message: String },

    #[error("malformed structure document: {message}")]
    Parse { message: String },

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping document {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("mapping not found in store: {location}")]
    NotFound { location: String },

    #[error("updating mapping {name} produced no table; the structure document may have changed")]
    UpdateFailed { name: String },

    #[error("correction mapping {name} is missing; corrections are curated by hand and never fetched")]
    MissingCorrections { name: String },

    #[error("unknown mapping: {name}")]
    UnknownMapping { name: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl SchemaError {
    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Whether a caller-side retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_errors_are_retryable() {
        let network = SchemaError::Network {
            url: "https://example.org".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(network.is_retryable());
        assert!(!SchemaError::parse("unexpected end of document").is_retryable());
        assert!(
            !SchemaError::UpdateFailed {
                name: "dac1_codes_area".to_string()
            }
            .is_retryable()
        );
    }
}
