/// Wire format version carried in every datagram header.
pub const VERSION_1: u16 = 1;

/// Maximum size of a single datagram (header + options + payload slice).
///
/// Chosen to stay under a typical 1500-byte path MTU.
pub const MAX_DATAGRAM_LEN: usize = 1300;

/// Size of the fixed per-datagram header.
pub const HEADER_LEN: usize = 20;

/// Size of the Version field.
pub const VERSION_SIZE: usize = 2;

/// Size of the Request ID field.
pub const REQUEST_ID_SIZE: usize = 8;

/// Size of the Total Length field.
pub const TOTAL_LENGTH_SIZE: usize = 4;

/// Size of the Chunk Offset field.
pub const CHUNK_OFFSET_SIZE: usize = 4;

/// Size of the Chunk Length field.
pub const CHUNK_LENGTH_SIZE: usize = 2;

/// Byte offset of the Chunk Length field, backpatched after the slice is sized.
pub const CHUNK_LENGTH_OFFSET: usize =
    VERSION_SIZE + REQUEST_ID_SIZE + TOTAL_LENGTH_SIZE + CHUNK_OFFSET_SIZE;

/// Per-option header overhead (1 byte type + 2 bytes length).
pub const OPTION_HEADER_LEN: usize = 3;

/// Largest value an option can carry (its length field is a u16).
pub const MAX_OPTION_VALUE_LEN: usize = u16::MAX as usize;

/// Maximum number of options in a single list. Receivers reject more.
pub const MAX_OPTIONS: usize = 20;

/// AES-GCM nonce length carried by `ENCRYPTION_IV`.
pub const ENCRYPTION_IV_LEN: usize = 12;

/// AES-GCM tag length carried by `ENCRYPTION_TAG`.
pub const ENCRYPTION_TAG_LEN: usize = 16;

/// PBKDF2 salt length carried by `KEY_DERIVE_SALT`.
pub const KEY_DERIVE_SALT_LEN: usize = 16;

/// Length of the `TIMESTAMP` value (u64 seconds since epoch).
pub const TIMESTAMP_LEN: usize = 8;
