use alloc::vec::Vec;

use ff_codec::{EncryptionMode, KeyDeriveMode};
use rand_core::{CryptoRng, RngCore};

use crate::cipher::{decrypt_detached, encrypt_detached};
use crate::consts::{NONCE_SIZE, SALT_SIZE};
use crate::error::CryptoError;
use crate::kdf::derive_key;
use crate::key::PreSharedKey;
use crate::types::{EnvelopeParams, SealedPayload};

/// Encrypt `plaintext` under a key derived from `psk`.
///
/// A fresh 16-byte salt and 12-byte IV are drawn from `rng` on every call,
/// so sealing the same plaintext twice never yields the same parameters.
pub fn seal<R>(
    plaintext: &[u8],
    psk: &PreSharedKey,
    iterations: u32,
    rng: &mut R,
) -> Result<SealedPayload, CryptoError>
where
    R: RngCore + CryptoRng,
{
    let mut salt = [0u8; SALT_SIZE];
    rng.try_fill_bytes(&mut salt)
        .map_err(|_| CryptoError::random_failure())?;
    let mut iv = [0u8; NONCE_SIZE];
    rng.try_fill_bytes(&mut iv)
        .map_err(|_| CryptoError::random_failure())?;

    let key = derive_key(psk, &salt, iterations)?;
    let (ciphertext, tag) = encrypt_detached(&key, &iv, plaintext)?;

    Ok(SealedPayload {
        ciphertext,
        iv,
        tag,
        salt,
    })
}

/// [`seal`] for callers holding an optional key. Fails with `MissingKey`
/// when `psk` is `None`.
pub fn seal_optional<R>(
    plaintext: &[u8],
    psk: Option<&PreSharedKey>,
    iterations: u32,
    rng: &mut R,
) -> Result<SealedPayload, CryptoError>
where
    R: RngCore + CryptoRng,
{
    let psk = psk.ok_or_else(CryptoError::missing_key)?;
    seal(plaintext, psk, iterations, rng)
}

/// Decrypt a payload sealed with [`seal`], given the parameters from its
/// outer options.
pub fn open(
    ciphertext: &[u8],
    params: &EnvelopeParams,
    psk: &PreSharedKey,
    iterations: u32,
) -> Result<Vec<u8>, CryptoError> {
    if params.mode != EncryptionMode::Aes256Gcm || params.kdf != KeyDeriveMode::Pbkdf2 {
        return Err(CryptoError::unsupported_mode());
    }
    let key = derive_key(psk, &params.salt, iterations)?;
    decrypt_detached(&key, &params.iv, ciphertext, &params.tag)
}
