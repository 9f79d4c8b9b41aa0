use core::fmt;

/// Specific kind of build error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildErrorKind {
    /// Output buffer is too small.
    BufferTooSmall,
    /// Declared option length disagrees with the supplied value.
    OptionLengthMismatch,
    /// Option value does not fit the 16-bit length field.
    OptionTooLong,
    /// Option list is at capacity.
    TooManyOptions,
    /// Outer option list does not end with `BREAK`.
    UnterminatedOptions,
    /// Payload does not fit the 32-bit total length field.
    PayloadTooLarge,
}

/// Error returned by builder functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildError {
    pub kind: BuildErrorKind,
}

impl BuildError {
    #[must_use]
    pub fn new(kind: BuildErrorKind) -> Self {
        Self { kind }
    }

    #[must_use]
    pub fn buffer_too_small() -> Self {
        Self::new(BuildErrorKind::BufferTooSmall)
    }

    #[must_use]
    pub fn option_length_mismatch() -> Self {
        Self::new(BuildErrorKind::OptionLengthMismatch)
    }

    #[must_use]
    pub fn option_too_long() -> Self {
        Self::new(BuildErrorKind::OptionTooLong)
    }

    #[must_use]
    pub fn too_many_options() -> Self {
        Self::new(BuildErrorKind::TooManyOptions)
    }

    #[must_use]
    pub fn unterminated_options() -> Self {
        Self::new(BuildErrorKind::UnterminatedOptions)
    }

    #[must_use]
    pub fn payload_too_large() -> Self {
        Self::new(BuildErrorKind::PayloadTooLarge)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self.kind {
            BuildErrorKind::BufferTooSmall => "output buffer too small",
            BuildErrorKind::OptionLengthMismatch => "option length does not match value length",
            BuildErrorKind::OptionTooLong => "option value exceeds 65535 bytes",
            BuildErrorKind::TooManyOptions => "too many options",
            BuildErrorKind::UnterminatedOptions => "outer option list must end with BREAK",
            BuildErrorKind::PayloadTooLarge => "payload exceeds 4 GiB",
        };
        f.write_str(desc)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BuildError {}

/// Specific kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input ends before the fixed header is complete.
    TruncatedHeader,
    /// Version field is not a supported wire version.
    UnsupportedVersion,
    /// Option type tag is not recognized.
    UnknownOptionType,
    /// Option header or value runs past the end of the input.
    TruncatedOption,
    /// Option list has no `EOL` or `BREAK` terminator.
    UnterminatedOptions,
    /// Too many options before the terminator.
    TooManyOptions,
    /// Chunk length disagrees with the bytes present.
    ChunkLengthMismatch,
    /// Chunk offset + length runs past the total payload length.
    ChunkOutOfRange,
}

/// Error returned by parsing functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte position in the input where the error was detected.
    pub position: usize,
}

impl ParseError {
    #[must_use]
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        Self { kind, position }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = match self.kind {
            ParseErrorKind::TruncatedHeader => "truncated datagram header",
            ParseErrorKind::UnsupportedVersion => "unsupported version",
            ParseErrorKind::UnknownOptionType => "unknown option type",
            ParseErrorKind::TruncatedOption => "truncated option",
            ParseErrorKind::UnterminatedOptions => "option list not terminated",
            ParseErrorKind::TooManyOptions => "too many options",
            ParseErrorKind::ChunkLengthMismatch => "chunk length mismatch",
            ParseErrorKind::ChunkOutOfRange => "chunk outside payload bounds",
        };
        write!(f, "{} at byte {}", desc, self.position)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
