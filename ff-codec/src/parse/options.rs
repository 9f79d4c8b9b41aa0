use alloc::vec::Vec;

use crate::consts::{MAX_OPTIONS, OPTION_HEADER_LEN};
use crate::error::{ParseError, ParseErrorKind};
use crate::types::{OptionType, OuterOption, SecureOption, WireOption};

/// An option borrowed from received bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawOptionRef<'a> {
    pub option_type: OptionType,
    pub value: &'a [u8],
}

impl RawOptionRef<'_> {
    #[must_use]
    pub fn to_outer(&self) -> Option<OuterOption> {
        OuterOption::decode(self.option_type, self.value)
    }

    #[must_use]
    pub fn to_secure(&self) -> Option<SecureOption> {
        SecureOption::decode(self.option_type, self.value)
    }
}

impl WireOption for RawOptionRef<'_> {
    fn option_type(&self) -> OptionType {
        self.option_type
    }

    fn value_len(&self) -> usize {
        self.value.len()
    }

    fn write_value(&self, out: &mut [u8]) {
        out.copy_from_slice(self.value);
    }
}

/// Read options up to and including the first `EOL` or `BREAK`.
///
/// Returns the options and the number of bytes they occupied. Error
/// positions are relative to `input`.
pub fn parse_options(input: &[u8]) -> Result<(Vec<RawOptionRef<'_>>, usize), ParseError> {
    let mut options = Vec::new();
    let mut pos = 0;

    loop {
        if pos == input.len() {
            return Err(ParseError::new(ParseErrorKind::UnterminatedOptions, pos));
        }
        if options.len() == MAX_OPTIONS {
            return Err(ParseError::new(ParseErrorKind::TooManyOptions, pos));
        }
        if pos + OPTION_HEADER_LEN > input.len() {
            return Err(ParseError::new(ParseErrorKind::TruncatedOption, pos));
        }

        let option_type = OptionType::from_u8(input[pos])
            .ok_or(ParseError::new(ParseErrorKind::UnknownOptionType, pos))?;
        let len = usize::from(u16::from_be_bytes([input[pos + 1], input[pos + 2]]));
        let start = pos + OPTION_HEADER_LEN;
        if start + len > input.len() {
            return Err(ParseError::new(ParseErrorKind::TruncatedOption, pos));
        }

        options.push(RawOptionRef {
            option_type,
            value: &input[start..start + len],
        });
        pos = start + len;

        if option_type.is_terminator() {
            return Ok((options, pos));
        }
    }
}
