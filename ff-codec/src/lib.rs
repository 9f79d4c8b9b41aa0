#![no_std]
#![forbid(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod consts;
pub mod error;
pub mod header;
pub mod inline_vec;
pub mod request;
pub mod types;

pub mod build;
pub mod parse;

pub use error::{BuildError, BuildErrorKind, ParseError, ParseErrorKind};
pub use header::DatagramHeader;
pub use request::Request;
pub use types::*;

pub use build::{Datagram, packetize};
pub use parse::{ParsedDatagram, RawOptionRef, parse_datagram, parse_header, parse_options};
