use alloc::vec::Vec;

use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::Aes256Gcm;

use crate::consts::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use crate::error::CryptoError;

/// Encrypt plaintext with AES-256-GCM and empty associated data.
///
/// Returns the ciphertext (same length as `plaintext`) and the detached tag.
pub fn encrypt_detached(
  key: &[u8; KEY_SIZE],
  nonce: &[u8; NONCE_SIZE],
  plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; TAG_SIZE]), CryptoError> {
  let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::encryption_failed())?;
  let mut buffer = plaintext.to_vec();
  let tag = cipher
    .encrypt_in_place_detached(GenericArray::from_slice(nonce), &[], &mut buffer)
    .map_err(|_| CryptoError::encryption_failed())?;
  let mut detached = [0u8; TAG_SIZE];
  detached.copy_from_slice(&tag);
  Ok((buffer, detached))
}

/// Decrypt AES-256-GCM ciphertext checked against a detached tag.
pub fn decrypt_detached(
  key: &[u8; KEY_SIZE],
  nonce: &[u8; NONCE_SIZE],
  ciphertext: &[u8],
  tag: &[u8; TAG_SIZE],
) -> Result<Vec<u8>, CryptoError> {
  let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::decryption_failed())?;
  let mut buffer = ciphertext.to_vec();
  cipher
    .decrypt_in_place_detached(
      GenericArray::from_slice(nonce),
      &[],
      &mut buffer,
      GenericArray::from_slice(tag),
    )
    .map_err(|_| CryptoError::decryption_failed())?;
  Ok(buffer)
}
