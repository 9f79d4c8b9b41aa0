use crate::consts::{
    CHUNK_LENGTH_OFFSET, CHUNK_LENGTH_SIZE, CHUNK_OFFSET_SIZE, HEADER_LEN, REQUEST_ID_SIZE,
    TOTAL_LENGTH_SIZE, VERSION_SIZE,
};
use crate::error::{ParseError, ParseErrorKind};

/// The fixed 20-byte header at the start of every datagram.
///
/// ```text
/// [version:2][request_id:8][total_length:4][chunk_offset:4][chunk_length:2]
/// ```
///
/// `request_id` and `total_length` are identical across all datagrams of a
/// request; a receiver correlates fragments on nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatagramHeader {
    pub version: u16,
    pub request_id: u64,
    /// Length of the whole payload, not just this datagram's slice.
    pub total_length: u32,
    /// Offset of this datagram's slice within the payload.
    pub chunk_offset: u32,
    pub chunk_length: u16,
}

impl DatagramHeader {
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let mut pos = 0;
        out[pos..pos + VERSION_SIZE].copy_from_slice(&self.version.to_be_bytes());
        pos += VERSION_SIZE;
        out[pos..pos + REQUEST_ID_SIZE].copy_from_slice(&self.request_id.to_be_bytes());
        pos += REQUEST_ID_SIZE;
        out[pos..pos + TOTAL_LENGTH_SIZE].copy_from_slice(&self.total_length.to_be_bytes());
        pos += TOTAL_LENGTH_SIZE;
        out[pos..pos + CHUNK_OFFSET_SIZE].copy_from_slice(&self.chunk_offset.to_be_bytes());
        pos += CHUNK_OFFSET_SIZE;
        out[pos..pos + CHUNK_LENGTH_SIZE].copy_from_slice(&self.chunk_length.to_be_bytes());
        out
    }

    /// Read a header from the first 20 bytes. Does not check the version.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < HEADER_LEN {
            return Err(ParseError::new(ParseErrorKind::TruncatedHeader, data.len()));
        }
        let version = u16::from_be_bytes([data[0], data[1]]);
        let mut id = [0u8; REQUEST_ID_SIZE];
        id.copy_from_slice(&data[2..10]);
        let total_length = u32::from_be_bytes([data[10], data[11], data[12], data[13]]);
        let chunk_offset = u32::from_be_bytes([data[14], data[15], data[16], data[17]]);
        let chunk_length =
            u16::from_be_bytes([data[CHUNK_LENGTH_OFFSET], data[CHUNK_LENGTH_OFFSET + 1]]);
        Ok(Self {
            version,
            request_id: u64::from_be_bytes(id),
            total_length,
            chunk_offset,
            chunk_length,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let header = DatagramHeader {
            version: 1,
            request_id: 0x0102_0304_0506_0708,
            total_length: 2000,
            chunk_offset: 1273,
            chunk_length: 727,
        };
        let bytes = header.to_bytes();
        #[rustfmt::skip]
        let expected: [u8; 20] = [
            0x00, 0x01,
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
            0x00, 0x00, 0x07, 0xd0,
            0x00, 0x00, 0x04, 0xf9,
            0x02, 0xd7,
        ];
        assert_eq!(bytes, expected);
        assert_eq!(DatagramHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn short_input() {
        let err = DatagramHeader::from_bytes(&[0u8; 19]).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TruncatedHeader);
        assert_eq!(err.position, 19);
    }
}
