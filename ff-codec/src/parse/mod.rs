//! Datagram inspection.
//!
//! The sender never decodes its own output, but the format is reversible and
//! these readers let tests and diagnostics look at what went on the wire.
//! Fragment reassembly is left to the receiver.

pub mod options;

use alloc::vec::Vec;

use crate::consts::{HEADER_LEN, VERSION_1};
use crate::error::{ParseError, ParseErrorKind};
use crate::header::DatagramHeader;

pub use self::options::{RawOptionRef, parse_options};

/// A datagram split into its three regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDatagram<'a> {
    pub header: DatagramHeader,
    /// The outer list (first datagram) or the lone `EOL` spacer.
    pub options: Vec<RawOptionRef<'a>>,
    /// This datagram's slice of the payload.
    pub chunk: &'a [u8],
}

/// Parse and version-check the fixed header.
pub fn parse_header(input: &[u8]) -> Result<DatagramHeader, ParseError> {
    let header = DatagramHeader::from_bytes(input)?;
    if header.version != VERSION_1 {
        return Err(ParseError::new(ParseErrorKind::UnsupportedVersion, 0));
    }
    Ok(header)
}

/// Parse a complete datagram.
pub fn parse_datagram(input: &[u8]) -> Result<ParsedDatagram<'_>, ParseError> {
    let header = parse_header(input)?;

    let (options, used) = parse_options(&input[HEADER_LEN..])
        .map_err(|e| ParseError::new(e.kind, e.position + HEADER_LEN))?;

    let start = HEADER_LEN + used;
    let chunk = &input[start..];
    if chunk.len() != usize::from(header.chunk_length) {
        return Err(ParseError::new(ParseErrorKind::ChunkLengthMismatch, start));
    }
    let end = u64::from(header.chunk_offset) + u64::from(header.chunk_length);
    if end > u64::from(header.total_length) {
        return Err(ParseError::new(ParseErrorKind::ChunkOutOfRange, start));
    }

    Ok(ParsedDatagram {
        header,
        options,
        chunk,
    })
}
