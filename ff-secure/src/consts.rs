use ff_codec::consts::{ENCRYPTION_IV_LEN, ENCRYPTION_TAG_LEN, KEY_DERIVE_SALT_LEN};

/// AES-256 key size.
pub const KEY_SIZE: usize = 32;

/// GCM nonce size (12 bytes).
pub const NONCE_SIZE: usize = ENCRYPTION_IV_LEN;

/// GCM authentication tag size (16 bytes).
pub const TAG_SIZE: usize = ENCRYPTION_TAG_LEN;

/// PBKDF2 salt size.
pub const SALT_SIZE: usize = KEY_DERIVE_SALT_LEN;

/// PBKDF2 iteration count used when none is configured.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 1000;
