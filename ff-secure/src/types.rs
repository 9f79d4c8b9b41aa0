use alloc::vec::Vec;

use ff_codec::{EncryptionMode, KeyDeriveMode, OptionType, OuterOption, RawOptionRef};

use crate::consts::{NONCE_SIZE, SALT_SIZE, TAG_SIZE};
use crate::error::CryptoError;

/// Output of [`seal`](crate::seal): ciphertext plus the fresh parameters
/// used to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedPayload {
    /// Same length as the plaintext.
    pub ciphertext: Vec<u8>,
    pub iv: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub salt: [u8; SALT_SIZE],
}

impl SealedPayload {
    /// Outer options announcing this payload's encryption, in wire order.
    /// Does not include the closing `BREAK`.
    #[must_use]
    pub fn outer_options(&self) -> [OuterOption; 5] {
        [
            OuterOption::EncryptionMode(EncryptionMode::Aes256Gcm),
            OuterOption::EncryptionIv(self.iv),
            OuterOption::EncryptionTag(self.tag),
            OuterOption::KeyDeriveMode(KeyDeriveMode::Pbkdf2),
            OuterOption::KeyDeriveSalt(self.salt),
        ]
    }

    /// Parameters a receiver would recover from the outer options.
    #[must_use]
    pub fn params(&self) -> EnvelopeParams {
        EnvelopeParams {
            mode: EncryptionMode::Aes256Gcm,
            kdf: KeyDeriveMode::Pbkdf2,
            iv: self.iv,
            tag: self.tag,
            salt: self.salt,
        }
    }
}

/// Decryption parameters carried in a first datagram's outer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeParams {
    pub mode: EncryptionMode,
    pub kdf: KeyDeriveMode,
    pub iv: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub salt: [u8; SALT_SIZE],
}

impl EnvelopeParams {
    /// Collect envelope parameters from parsed options.
    ///
    /// Options that are not envelope parameters are skipped. Unknown mode ids
    /// yield `UnsupportedMode`; absent or mis-sized values yield
    /// `MissingParameter`.
    pub fn from_options(options: &[RawOptionRef<'_>]) -> Result<Self, CryptoError> {
        let mut mode = None;
        let mut kdf = None;
        let mut iv = None;
        let mut tag = None;
        let mut salt = None;

        for raw in options {
            match raw.option_type {
                OptionType::EncryptionMode | OptionType::KeyDeriveMode
                    if raw.value.len() == 1 && raw.to_outer().is_none() =>
                {
                    return Err(CryptoError::unsupported_mode());
                }
                _ => {}
            }
            match raw.to_outer() {
                Some(OuterOption::EncryptionMode(m)) => mode = Some(m),
                Some(OuterOption::KeyDeriveMode(k)) => kdf = Some(k),
                Some(OuterOption::EncryptionIv(v)) => iv = Some(v),
                Some(OuterOption::EncryptionTag(v)) => tag = Some(v),
                Some(OuterOption::KeyDeriveSalt(v)) => salt = Some(v),
                Some(OuterOption::Break) | None => {}
            }
        }

        let missing = CryptoError::missing_parameter;
        Ok(Self {
            mode: mode.ok_or_else(missing)?,
            kdf: kdf.ok_or_else(missing)?,
            iv: iv.ok_or_else(missing)?,
            tag: tag.ok_or_else(missing)?,
            salt: salt.ok_or_else(missing)?,
        })
    }
}
