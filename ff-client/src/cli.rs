//! Command-line surface for the `ff-client` binary.

use clap::{ArgAction, Parser};
use ff_secure::consts::DEFAULT_PBKDF2_ITERATIONS;

use crate::config::{ClientConfig, ConfigError, Verbosity};

/// Send an HTTP request read from stdin to an FF receiver over UDP.
#[derive(Parser)]
#[command(name = "ff-client", version, about)]
pub struct Cli {
    /// Receiver port.
    #[arg(long)]
    pub port: u32,

    /// Receiver IPv4 or IPv6 address.
    #[arg(long = "ip-address", default_value = "127.0.0.1")]
    pub ip_address: String,

    /// Encrypt payloads with a key derived from this secret.
    #[arg(long = "pre-shared-key")]
    pub pre_shared_key: Option<String>,

    /// PBKDF2 iteration count for key derivation.
    #[arg(long = "pbkdf2-iterations", default_value_t = DEFAULT_PBKDF2_ITERATIONS)]
    pub pbkdf2_iterations: u32,

    /// The tunneled request targets an https origin.
    #[arg(long)]
    pub https: bool,

    /// Increase log verbosity (-v warn, -vv info, -vvv debug).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Validate into a [`ClientConfig`].
    pub fn to_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut builder = ClientConfig::builder(self.ip_address.as_str(), self.port)
            .pbkdf2_iterations(self.pbkdf2_iterations)
            .verbosity(Verbosity::from_occurrences(self.verbose));
        if let Some(key) = &self.pre_shared_key {
            builder = builder.pre_shared_key(key.as_bytes());
        }
        builder.build()
    }
}
