use thiserror::Error;

/// Failure to get a response body from the device.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// A response body that does not match the expected document shape.
#[derive(Debug, Error)]
#[error("malformed {domain} document: {source}")]
pub struct DecodeError {
    pub domain: &'static str,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("failed to enumerate network interfaces: {0}")]
    Interfaces(#[from] nix::Error),
}

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("SnapRoute transport error for {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: TransportError,
    },

    #[error("SnapRoute decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),
}

impl ExporterError {
    /// Short label for the error class, used as a metric label
    pub fn kind(&self) -> &'static str {
        match self {
            ExporterError::Transport { .. } => "transport",
            ExporterError::Decode(_) => "decode",
            ExporterError::Identity(_) => "identity",
            ExporterError::Config(_) => "config",
            ExporterError::Server(_) => "server",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
