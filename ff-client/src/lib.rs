//! FF client: builds fragmented, optionally encrypted UDP datagrams from an
//! HTTP request and sends them to a receiver.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod request;
pub mod transport;

pub use client::FfClient;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError, Verbosity};
pub use error::{ClientError, Result};
pub use request::build_request;
pub use transport::{DatagramSink, UdpSink};
