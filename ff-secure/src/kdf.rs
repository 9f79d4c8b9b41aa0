//! PBKDF2-HMAC-SHA256 key derivation.

use sha2::Sha256;
use zeroize::Zeroizing;

use crate::consts::{KEY_SIZE, SALT_SIZE};
use crate::error::CryptoError;
use crate::key::PreSharedKey;

/// Stretch `psk` into a 256-bit AES key.
///
/// Returns `InvalidIterations` when `iterations` is zero.
pub fn derive_key(
    psk: &PreSharedKey,
    salt: &[u8; SALT_SIZE],
    iterations: u32,
) -> Result<Zeroizing<[u8; KEY_SIZE]>, CryptoError> {
    if iterations == 0 {
        return Err(CryptoError::invalid_iterations());
    }
    let mut key = Zeroizing::new([0u8; KEY_SIZE]);
    pbkdf2::pbkdf2_hmac::<Sha256>(psk.as_bytes(), salt, iterations, &mut *key);
    Ok(key)
}
