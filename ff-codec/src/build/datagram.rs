use alloc::vec::Vec;

use crate::build::writer::WireWriter;
use crate::consts::{CHUNK_LENGTH_OFFSET, MAX_DATAGRAM_LEN};
use crate::error::BuildError;
use crate::header::DatagramHeader;
use crate::request::Request;
use crate::types::{OptionType, RequestOption};

/// A single wire datagram. Only the first `length` bytes are sent.
#[derive(Clone, PartialEq, Eq)]
pub struct Datagram {
    length: usize,
    buffer: [u8; MAX_DATAGRAM_LEN],
}

impl Datagram {
    fn empty() -> Self {
        Self {
            length: 0,
            buffer: [0u8; MAX_DATAGRAM_LEN],
        }
    }

    /// Number of meaningful bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.length
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The bytes to transmit. Trailing capacity is never included.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.length]
    }
}

impl AsRef<[u8]> for Datagram {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl core::fmt::Debug for Datagram {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Datagram").field("length", &self.length).finish_non_exhaustive()
    }
}

/// Split a request into datagrams of at most [`MAX_DATAGRAM_LEN`] bytes.
///
/// Each datagram is `[header:20][option region][payload slice]`. The first
/// datagram carries the full outer option list; every later one carries a
/// single zero-length `EOL` spacer instead. `chunk_length` is reserved in
/// the header and backpatched once the slice is sized.
///
/// An empty payload still yields one datagram.
pub fn packetize(request: &Request) -> Result<Vec<Datagram>, BuildError> {
    if !request.outer_options.is_terminated() {
        return Err(BuildError::unterminated_options());
    }
    let payload = request.payload.as_slice();
    let total_length = u32::try_from(payload.len()).map_err(|_| BuildError::payload_too_large())?;
    let spacer = RequestOption::empty(OptionType::Eol);

    let mut datagrams = Vec::with_capacity(payload.len() / MAX_DATAGRAM_LEN + 1);
    let mut chunk_offset = 0usize;
    let mut bytes_left = payload.len();

    loop {
        let mut datagram = Datagram::empty();
        let mut w = WireWriter::new(&mut datagram.buffer);

        let header = DatagramHeader {
            version: request.version,
            request_id: request.request_id,
            total_length,
            // Bounded by total_length, which fits in u32.
            chunk_offset: chunk_offset as u32,
            chunk_length: 0,
        };
        w.write_bytes(&header.to_bytes())?;

        if chunk_offset == 0 {
            w.write_options(request.outer_options.iter())?;
        } else {
            w.write_option(&spacer)?;
        }

        let chunk_length = w.remaining().min(bytes_left);
        if chunk_length == 0 && bytes_left > 0 {
            // Options filled the datagram; no progress is possible.
            return Err(BuildError::buffer_too_small());
        }
        // At most MAX_DATAGRAM_LEN - HEADER_LEN, well within u16.
        w.patch_u16(CHUNK_LENGTH_OFFSET, chunk_length as u16);
        w.write_bytes(&payload[chunk_offset..chunk_offset + chunk_length])?;

        datagram.length = w.written();
        datagrams.push(datagram);

        bytes_left -= chunk_length;
        chunk_offset += chunk_length;
        if bytes_left == 0 {
            break;
        }
    }

    Ok(datagrams)
}
