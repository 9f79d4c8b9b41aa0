use core::fmt;

/// Specific kind of crypto error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoErrorKind {
    /// Encryption was requested but no pre-shared key is configured.
    MissingKey,
    /// Pre-shared key is empty.
    EmptyKey,
    /// PBKDF2 iteration count is zero.
    InvalidIterations,
    /// The random source failed to produce bytes.
    RandomFailure,
    /// AEAD encryption failed.
    EncryptionFailed,
    /// AEAD decryption failed (wrong key, tampered data, or wrong parameters).
    DecryptionFailed,
    /// Encryption or key derivation mode is not supported.
    UnsupportedMode,
    /// An envelope parameter is absent from the option list or has the wrong size.
    MissingParameter,
}

/// Error returned by crypto envelope operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CryptoError {
    pub kind: CryptoErrorKind,
}

impl CryptoError {
    #[must_use]
    pub fn new(kind: CryptoErrorKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub fn missing_key() -> Self {
        Self::new(CryptoErrorKind::MissingKey)
    }

    #[must_use]
    pub fn empty_key() -> Self {
        Self::new(CryptoErrorKind::EmptyKey)
    }

    #[must_use]
    pub fn invalid_iterations() -> Self {
        Self::new(CryptoErrorKind::InvalidIterations)
    }

    #[must_use]
    pub fn random_failure() -> Self {
        Self::new(CryptoErrorKind::RandomFailure)
    }

    #[must_use]
    pub fn encryption_failed() -> Self {
        Self::new(CryptoErrorKind::EncryptionFailed)
    }

    #[must_use]
    pub fn decryption_failed() -> Self {
        Self::new(CryptoErrorKind::DecryptionFailed)
    }

    #[must_use]
    pub fn unsupported_mode() -> Self {
        Self::new(CryptoErrorKind::UnsupportedMode)
    }

    #[must_use]
    pub fn missing_parameter() -> Self {
        Self::new(CryptoErrorKind::MissingParameter)
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self.kind {
            CryptoErrorKind::MissingKey => "cannot encrypt payload without a pre-shared key",
            CryptoErrorKind::EmptyKey => "pre-shared key is empty",
            CryptoErrorKind::InvalidIterations => "PBKDF2 iteration count must be positive",
            CryptoErrorKind::RandomFailure => "random source failed",
            CryptoErrorKind::EncryptionFailed => "AEAD encryption failed",
            CryptoErrorKind::DecryptionFailed => "AEAD decryption failed",
            CryptoErrorKind::UnsupportedMode => "unsupported encryption or key derivation mode",
            CryptoErrorKind::MissingParameter => "envelope parameter missing from options",
        };
        f.write_str(desc)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CryptoError {}
