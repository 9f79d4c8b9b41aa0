//! Validated client configuration.

use std::net::{IpAddr, SocketAddr};
use std::num::NonZeroU32;

use ff_secure::PreSharedKey;
use ff_secure::consts::DEFAULT_PBKDF2_ITERATIONS;
use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid IP address: {0:?}")]
    InvalidAddress(String),

    #[error("port must be in 1..=65535, got {0}")]
    InvalidPort(u32),

    #[error("PBKDF2 iteration count must be positive")]
    InvalidIterations,

    #[error("pre-shared key must not be empty")]
    EmptyKey,
}

/// Diagnostic verbosity, one step per `-v`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

impl Verbosity {
    /// Map a repeat count of `-v` to a level. Counts past three saturate.
    #[must_use]
    pub fn from_occurrences(count: u8) -> Self {
        match count {
            0 => Self::Error,
            1 => Self::Warn,
            2 => Self::Info,
            _ => Self::Debug,
        }
    }

    #[must_use]
    pub fn level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
        }
    }

    /// Directive string understood by `EnvFilter`.
    #[must_use]
    pub fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

/// Client settings, validated once by [`ClientConfigBuilder::build`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    address: IpAddr,
    port: u16,
    pre_shared_key: Option<PreSharedKey>,
    pbkdf2_iterations: NonZeroU32,
    verbosity: Verbosity,
}

impl ClientConfig {
    /// Start a builder for the receiver at `address:port`.
    pub fn builder(address: impl Into<String>, port: u32) -> ClientConfigBuilder {
        ClientConfigBuilder {
            address: address.into(),
            port,
            pre_shared_key: None,
            pbkdf2_iterations: DEFAULT_PBKDF2_ITERATIONS,
            verbosity: Verbosity::default(),
        }
    }

    #[must_use]
    pub fn address(&self) -> IpAddr {
        self.address
    }

    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn destination(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    /// Key for the crypto envelope. `None` sends payloads in the clear.
    #[must_use]
    pub fn pre_shared_key(&self) -> Option<&PreSharedKey> {
        self.pre_shared_key.as_ref()
    }

    #[must_use]
    pub fn pbkdf2_iterations(&self) -> NonZeroU32 {
        self.pbkdf2_iterations
    }

    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

/// Builder for [`ClientConfig`]. Nothing is checked until [`build`](Self::build).
pub struct ClientConfigBuilder {
    address: String,
    port: u32,
    pre_shared_key: Option<Vec<u8>>,
    pbkdf2_iterations: u32,
    verbosity: Verbosity,
}

impl ClientConfigBuilder {
    #[must_use]
    pub fn pre_shared_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.pre_shared_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn pbkdf2_iterations(mut self, iterations: u32) -> Self {
        self.pbkdf2_iterations = iterations;
        self
    }

    #[must_use]
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let address: IpAddr = self
            .address
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(self.address.clone()))?;

        let port = match u16::try_from(self.port) {
            Ok(port) if port != 0 => port,
            _ => return Err(ConfigError::InvalidPort(self.port)),
        };

        let pbkdf2_iterations =
            NonZeroU32::new(self.pbkdf2_iterations).ok_or(ConfigError::InvalidIterations)?;

        let pre_shared_key = self
            .pre_shared_key
            .map(|key| PreSharedKey::new(key).map_err(|_| ConfigError::EmptyKey))
            .transpose()?;

        Ok(ClientConfig {
            address,
            port,
            pre_shared_key,
            pbkdf2_iterations,
            verbosity: self.verbosity,
        })
    }
}
