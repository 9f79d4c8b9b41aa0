use ff_codec::BuildError;
use ff_secure::CryptoError;
use thiserror::Error;

use crate::config::ConfigError;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the client pipeline.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Datagram layout could not be produced.
    #[error("packet build error: {0}")]
    Build(#[from] BuildError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// A send failed. Datagrams already handed to the sink stay sent.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    #[error("failed to read request body: {0}")]
    Input(#[source] std::io::Error),
}
