use crate::error::BuildError;
use crate::types::WireOption;

/// A cursor-based writer into a caller-provided byte buffer.
///
/// All integers are written big-endian.
pub struct WireWriter<'buf> {
    buf: &'buf mut [u8],
    pos: usize,
}

impl<'buf> WireWriter<'buf> {
    pub fn new(buf: &'buf mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn written(&self) -> usize {
        self.pos
    }

    /// Returns the space left in the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Claim the next `len` bytes and return them for the caller to fill.
    fn take(&mut self, len: usize) -> Result<&mut [u8], BuildError> {
        if len > self.remaining() {
            return Err(BuildError::buffer_too_small());
        }
        let start = self.pos;
        self.pos += len;
        Ok(&mut self.buf[start..self.pos])
    }

    pub fn write_bytes(&mut self, data: &[u8]) -> Result<(), BuildError> {
        self.take(data.len())?.copy_from_slice(data);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), BuildError> {
        self.write_bytes(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), BuildError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), BuildError> {
        self.write_bytes(&value.to_be_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), BuildError> {
        self.write_bytes(&value.to_be_bytes())
    }

    /// Skip two bytes to be filled later by [`patch_u16`](Self::patch_u16).
    /// Returns the offset of the reserved field.
    pub fn reserve_u16(&mut self) -> Result<usize, BuildError> {
        let at = self.pos;
        self.take(2)?.fill(0);
        Ok(at)
    }

    /// Overwrite a field previously reserved with `reserve_u16`.
    pub fn patch_u16(&mut self, at: usize, value: u16) {
        debug_assert!(at + 2 <= self.pos, "patching an unreserved field");
        self.buf[at..at + 2].copy_from_slice(&value.to_be_bytes());
    }

    /// Write `[type:1][length:2 BE][value]`.
    pub fn write_option(&mut self, option: &impl WireOption) -> Result<(), BuildError> {
        let len = option.value_len();
        let len16 = u16::try_from(len).map_err(|_| BuildError::option_too_long())?;
        if option.encoded_len() > self.remaining() {
            return Err(BuildError::buffer_too_small());
        }
        self.write_u8(option.option_type().id())?;
        self.write_u16(len16)?;
        option.write_value(self.take(len)?);
        Ok(())
    }

    /// Write each option in list order.
    pub fn write_options<'a, O, I>(&mut self, options: I) -> Result<(), BuildError>
    where
        O: WireOption + 'a,
        I: IntoIterator<Item = &'a O>,
    {
        for option in options {
            self.write_option(option)?;
        }
        Ok(())
    }
}
