use alloc::vec::Vec;

use crate::build::options::options_to_vec;
use crate::consts::{
    ENCRYPTION_IV_LEN, ENCRYPTION_TAG_LEN, KEY_DERIVE_SALT_LEN, MAX_OPTION_VALUE_LEN, MAX_OPTIONS,
    OPTION_HEADER_LEN, TIMESTAMP_LEN,
};
use crate::error::BuildError;
use crate::inline_vec::InlineVec;

/// Option type tag (first byte of every encoded option).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OptionType {
    /// Terminates the secure list and serves as the continuation spacer.
    Eol = 0,
    EncryptionMode = 1,
    EncryptionIv = 2,
    EncryptionTag = 3,
    /// Upstream request should be made over HTTPS.
    Https = 4,
    KeyDeriveMode = 5,
    KeyDeriveSalt = 6,
    /// Terminates the outer list; payload follows.
    Break = 7,
    /// Seconds since the Unix epoch when the request was built.
    Timestamp = 8,
}

impl OptionType {
    /// Create from the wire tag. Returns `None` for unknown tags.
    #[must_use]
    pub fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Eol),
            1 => Some(Self::EncryptionMode),
            2 => Some(Self::EncryptionIv),
            3 => Some(Self::EncryptionTag),
            4 => Some(Self::Https),
            5 => Some(Self::KeyDeriveMode),
            6 => Some(Self::KeyDeriveSalt),
            7 => Some(Self::Break),
            8 => Some(Self::Timestamp),
            _ => None,
        }
    }

    /// Wire tag.
    #[must_use]
    pub fn id(self) -> u8 {
        self as u8
    }

    /// `EOL` and `BREAK` both end an option list.
    #[must_use]
    pub fn is_terminator(self) -> bool {
        matches!(self, Self::Eol | Self::Break)
    }
}

/// Payload encryption mode carried by `ENCRYPTION_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EncryptionMode {
    Aes256Gcm = 1,
}

impl EncryptionMode {
    #[must_use]
    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Aes256Gcm),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Key derivation function carried by `KEY_DERIVE_MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyDeriveMode {
    Pbkdf2 = 1,
}

impl KeyDeriveMode {
    #[must_use]
    pub fn from_u8(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Pbkdf2),
            _ => None,
        }
    }

    #[must_use]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Anything that encodes as one `[type:1][length:2][value]` option.
pub trait WireOption {
    fn option_type(&self) -> OptionType;

    /// Length of the value in bytes. Never exceeds `u16::MAX`.
    fn value_len(&self) -> usize;

    /// Write the value into `out`, which is exactly `value_len()` bytes.
    fn write_value(&self, out: &mut [u8]);

    /// Encoded size including the 3-byte option header.
    fn encoded_len(&self) -> usize {
        OPTION_HEADER_LEN + self.value_len()
    }

    /// Copy into an owned untyped option.
    fn to_raw(&self) -> RequestOption {
        let mut value = alloc::vec![0u8; self.value_len()];
        self.write_value(&mut value);
        RequestOption {
            option_type: self.option_type(),
            value,
        }
    }
}

/// An untyped option: a type tag plus an owned value of at most 65535 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOption {
    option_type: OptionType,
    value: Vec<u8>,
}

impl RequestOption {
    /// Create an option whose declared length must match the value.
    pub fn new(
        option_type: OptionType,
        length: u16,
        value: impl Into<Vec<u8>>,
    ) -> Result<Self, BuildError> {
        let value = value.into();
        if usize::from(length) != value.len() {
            return Err(BuildError::option_length_mismatch());
        }
        Ok(Self { option_type, value })
    }

    /// Create an option, taking the length from the value.
    pub fn from_value(option_type: OptionType, value: impl Into<Vec<u8>>) -> Result<Self, BuildError> {
        let value = value.into();
        if value.len() > MAX_OPTION_VALUE_LEN {
            return Err(BuildError::option_too_long());
        }
        Ok(Self { option_type, value })
    }

    /// A zero-length option such as `EOL` or `BREAK`.
    #[must_use]
    pub const fn empty(option_type: OptionType) -> Self {
        Self {
            option_type,
            value: Vec::new(),
        }
    }

    #[must_use]
    pub fn length(&self) -> u16 {
        // Both constructors bound the value to u16::MAX.
        self.value.len() as u16
    }

    #[must_use]
    pub fn value(&self) -> &[u8] {
        &self.value
    }
}

impl WireOption for RequestOption {
    fn option_type(&self) -> OptionType {
        self.option_type
    }

    fn value_len(&self) -> usize {
        self.value.len()
    }

    fn write_value(&self, out: &mut [u8]) {
        out.copy_from_slice(&self.value);
    }
}

/// Cleartext metadata sent in the first datagram, readable before decryption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OuterOption {
    EncryptionMode(EncryptionMode),
    EncryptionIv([u8; ENCRYPTION_IV_LEN]),
    EncryptionTag([u8; ENCRYPTION_TAG_LEN]),
    KeyDeriveMode(KeyDeriveMode),
    KeyDeriveSalt([u8; KEY_DERIVE_SALT_LEN]),
    Break,
}

impl OuterOption {
    /// Decode from a type tag and raw value. Returns `None` if the type is
    /// not an outer option or the value has the wrong shape.
    #[must_use]
    pub fn decode(option_type: OptionType, value: &[u8]) -> Option<Self> {
        match option_type {
            OptionType::EncryptionMode => match value {
                [id] => EncryptionMode::from_u8(*id).map(Self::EncryptionMode),
                _ => None,
            },
            OptionType::EncryptionIv => value.try_into().ok().map(Self::EncryptionIv),
            OptionType::EncryptionTag => value.try_into().ok().map(Self::EncryptionTag),
            OptionType::KeyDeriveMode => match value {
                [id] => KeyDeriveMode::from_u8(*id).map(Self::KeyDeriveMode),
                _ => None,
            },
            OptionType::KeyDeriveSalt => value.try_into().ok().map(Self::KeyDeriveSalt),
            OptionType::Break if value.is_empty() => Some(Self::Break),
            _ => None,
        }
    }
}

impl WireOption for OuterOption {
    fn option_type(&self) -> OptionType {
        match self {
            Self::EncryptionMode(_) => OptionType::EncryptionMode,
            Self::EncryptionIv(_) => OptionType::EncryptionIv,
            Self::EncryptionTag(_) => OptionType::EncryptionTag,
            Self::KeyDeriveMode(_) => OptionType::KeyDeriveMode,
            Self::KeyDeriveSalt(_) => OptionType::KeyDeriveSalt,
            Self::Break => OptionType::Break,
        }
    }

    fn value_len(&self) -> usize {
        match self {
            Self::EncryptionMode(_) | Self::KeyDeriveMode(_) => 1,
            Self::EncryptionIv(iv) => iv.len(),
            Self::EncryptionTag(tag) => tag.len(),
            Self::KeyDeriveSalt(salt) => salt.len(),
            Self::Break => 0,
        }
    }

    fn write_value(&self, out: &mut [u8]) {
        match self {
            Self::EncryptionMode(mode) => out[0] = mode.id(),
            Self::KeyDeriveMode(mode) => out[0] = mode.id(),
            Self::EncryptionIv(iv) => out.copy_from_slice(iv),
            Self::EncryptionTag(tag) => out.copy_from_slice(tag),
            Self::KeyDeriveSalt(salt) => out.copy_from_slice(salt),
            Self::Break => {}
        }
    }
}

/// Metadata carried inside the (possibly encrypted) payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureOption {
    Https,
    Timestamp(u64),
    Eol,
}

impl SecureOption {
    /// Decode from a type tag and raw value. Returns `None` if the type is
    /// not a secure option or the value has the wrong shape.
    #[must_use]
    pub fn decode(option_type: OptionType, value: &[u8]) -> Option<Self> {
        match option_type {
            OptionType::Https => match value {
                [1] => Some(Self::Https),
                _ => None,
            },
            OptionType::Timestamp => {
                let bytes: [u8; TIMESTAMP_LEN] = value.try_into().ok()?;
                Some(Self::Timestamp(u64::from_be_bytes(bytes)))
            }
            OptionType::Eol if value.is_empty() => Some(Self::Eol),
            _ => None,
        }
    }
}

impl WireOption for SecureOption {
    fn option_type(&self) -> OptionType {
        match self {
            Self::Https => OptionType::Https,
            Self::Timestamp(_) => OptionType::Timestamp,
            Self::Eol => OptionType::Eol,
        }
    }

    fn value_len(&self) -> usize {
        match self {
            Self::Https => 1,
            Self::Timestamp(_) => TIMESTAMP_LEN,
            Self::Eol => 0,
        }
    }

    fn write_value(&self, out: &mut [u8]) {
        match self {
            Self::Https => out[0] = 1,
            Self::Timestamp(secs) => out.copy_from_slice(&secs.to_be_bytes()),
            Self::Eol => {}
        }
    }
}

/// The cleartext option list written into the first datagram.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OuterOptions(InlineVec<OuterOption, MAX_OPTIONS>);

impl OuterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self(InlineVec::new())
    }

    pub fn push(&mut self, option: OuterOption) -> Result<(), BuildError> {
        self.0.push(option).map_err(|_| BuildError::too_many_options())
    }

    /// Append the `BREAK` that separates header metadata from the payload.
    pub fn terminate(&mut self) -> Result<(), BuildError> {
        self.push(OuterOption::Break)
    }

    #[must_use]
    pub fn is_terminated(&self) -> bool {
        matches!(self.0.last(), Some(OuterOption::Break))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[OuterOption] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, OuterOption> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.iter().map(WireOption::encoded_len).sum()
    }
}

/// The option list prepended to the body before encryption.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecureOptions(InlineVec<SecureOption, MAX_OPTIONS>);

impl SecureOptions {
    #[must_use]
    pub fn new() -> Self {
        Self(InlineVec::new())
    }

    /// Build the standard bundle: optional `HTTPS`, then `TIMESTAMP`, then `EOL`.
    #[must_use]
    pub fn bundle(https: bool, timestamp: u64) -> Self {
        let mut list = InlineVec::<SecureOption, MAX_OPTIONS>::new();
        // At most three entries, well under capacity.
        let mut pushed = Ok(());
        if https {
            pushed = pushed.and(list.push(SecureOption::Https));
        }
        pushed = pushed
            .and(list.push(SecureOption::Timestamp(timestamp)))
            .and(list.push(SecureOption::Eol));
        debug_assert!(pushed.is_ok());
        Self(list)
    }

    pub fn push(&mut self, option: SecureOption) -> Result<(), BuildError> {
        self.0.push(option).map_err(|_| BuildError::too_many_options())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[SecureOption] {
        self.0.as_slice()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, SecureOption> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.iter().map(WireOption::encoded_len).sum()
    }

    /// Serialize with the option codec.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        options_to_vec(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_type_round_trips_every_tag() {
        for tag in 0..=8u8 {
            assert_eq!(OptionType::from_u8(tag).unwrap().id(), tag);
        }
        assert_eq!(OptionType::from_u8(9), None);
        assert_eq!(OptionType::from_u8(0xff), None);
    }

    #[test]
    fn request_option_rejects_length_mismatch() {
        let err = RequestOption::new(OptionType::Https, 2, [1u8]).unwrap_err();
        assert_eq!(err.kind, crate::error::BuildErrorKind::OptionLengthMismatch);
        let ok = RequestOption::new(OptionType::Https, 1, [1u8]).unwrap();
        assert_eq!(ok.length(), 1);
    }

    #[test]
    fn request_option_rejects_oversized_value() {
        let value = alloc::vec![0u8; MAX_OPTION_VALUE_LEN + 1];
        let err = RequestOption::from_value(OptionType::Timestamp, value).unwrap_err();
        assert_eq!(err.kind, crate::error::BuildErrorKind::OptionTooLong);
    }

    #[test]
    fn outer_option_lengths_are_fixed() {
        assert_eq!(OuterOption::EncryptionIv([0; 12]).value_len(), 12);
        assert_eq!(OuterOption::EncryptionTag([0; 16]).value_len(), 16);
        assert_eq!(OuterOption::KeyDeriveSalt([0; 16]).value_len(), 16);
        assert_eq!(OuterOption::EncryptionMode(EncryptionMode::Aes256Gcm).value_len(), 1);
        assert_eq!(OuterOption::Break.encoded_len(), 3);
    }

    #[test]
    fn outer_option_decode_rejects_secure_types() {
        assert_eq!(OuterOption::decode(OptionType::Https, &[1]), None);
        assert_eq!(OuterOption::decode(OptionType::Eol, &[]), None);
        assert_eq!(OuterOption::decode(OptionType::EncryptionIv, &[0; 11]), None);
        assert_eq!(
            OuterOption::decode(OptionType::KeyDeriveMode, &[1]),
            Some(OuterOption::KeyDeriveMode(KeyDeriveMode::Pbkdf2))
        );
    }

    #[test]
    fn secure_bundle_order() {
        let with_https = SecureOptions::bundle(true, 42);
        assert_eq!(
            with_https.as_slice(),
            &[SecureOption::Https, SecureOption::Timestamp(42), SecureOption::Eol]
        );
        assert_eq!(with_https.encoded_len(), 4 + 11 + 3);

        let plain = SecureOptions::bundle(false, 42);
        assert_eq!(plain.as_slice(), &[SecureOption::Timestamp(42), SecureOption::Eol]);
    }

    #[test]
    fn timestamp_is_big_endian() {
        let raw = SecureOption::Timestamp(0x0102_0304_0506_0708).to_raw();
        assert_eq!(raw.value(), &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(
            SecureOption::decode(OptionType::Timestamp, raw.value()),
            Some(SecureOption::Timestamp(0x0102_0304_0506_0708))
        );
    }

    #[test]
    fn outer_options_terminate() {
        let mut list = OuterOptions::new();
        assert!(!list.is_terminated());
        list.push(OuterOption::EncryptionMode(EncryptionMode::Aes256Gcm)).unwrap();
        assert!(!list.is_terminated());
        list.terminate().unwrap();
        assert!(list.is_terminated());
        assert_eq!(list.encoded_len(), 4 + 3);
    }

    #[test]
    fn outer_options_capacity() {
        let mut list = OuterOptions::new();
        for _ in 0..MAX_OPTIONS {
            list.push(OuterOption::Break).unwrap();
        }
        assert_eq!(
            list.push(OuterOption::Break).unwrap_err().kind,
            crate::error::BuildErrorKind::TooManyOptions
        );
    }
}
