use alloc::vec::Vec;

use crate::build::writer::WireWriter;
use crate::error::BuildError;
use crate::types::WireOption;

/// Encode a single option into `buf`. Returns the number of bytes written.
pub fn encode_option(option: &impl WireOption, buf: &mut [u8]) -> Result<usize, BuildError> {
    let mut w = WireWriter::new(buf);
    w.write_option(option)?;
    Ok(w.written())
}

/// Encode options back to back, in list order, with no padding.
pub fn encode_options<'a, O, I>(options: I, buf: &mut [u8]) -> Result<usize, BuildError>
where
    O: WireOption + 'a,
    I: IntoIterator<Item = &'a O>,
{
    let mut w = WireWriter::new(buf);
    w.write_options(options)?;
    Ok(w.written())
}

/// Total encoded size of a list of options.
pub fn encoded_len<'a, O, I>(options: I) -> usize
where
    O: WireOption + 'a,
    I: IntoIterator<Item = &'a O>,
{
    options.into_iter().map(WireOption::encoded_len).sum()
}

/// Encode options into a freshly allocated buffer.
pub fn options_to_vec<'a, O, I>(options: I) -> Vec<u8>
where
    O: WireOption + 'a,
    I: IntoIterator<Item = &'a O> + Clone,
{
    let mut out = alloc::vec![0u8; encoded_len(options.clone())];
    // The buffer is sized exactly, and typed options never exceed u16::MAX.
    let written = encode_options(options, &mut out);
    debug_assert!(matches!(written, Ok(n) if n == out.len()));
    out
}
