use alloc::vec::Vec;

use crate::build::datagram::{Datagram, packetize};
use crate::consts::VERSION_1;
use crate::error::BuildError;
use crate::types::{OuterOption, OuterOptions, SecureOptions};

/// One logical request on its way to becoming datagrams.
///
/// Built per call, consumed by [`packetize`], never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub version: u16,
    /// Random correlation id shared by every datagram of this request.
    pub request_id: u64,
    /// Cleartext options for the first datagram. Must end with `BREAK`.
    pub outer_options: OuterOptions,
    /// Options already serialized at the front of the plaintext payload.
    pub secure_options: SecureOptions,
    /// Serialized secure options followed by the body, or their ciphertext.
    pub payload: Vec<u8>,
}

impl Request {
    /// Start a request whose payload is `secure_options ‖ body` in the clear.
    ///
    /// The outer list starts empty; call [`OuterOptions::terminate`] before
    /// packetizing.
    #[must_use]
    pub fn new(request_id: u64, secure_options: SecureOptions, body: &[u8]) -> Self {
        let mut payload = Vec::with_capacity(secure_options.encoded_len() + body.len());
        payload.extend_from_slice(&secure_options.to_bytes());
        payload.extend_from_slice(body);
        Self {
            version: VERSION_1,
            request_id,
            outer_options: OuterOptions::new(),
            secure_options,
            payload,
        }
    }

    /// Replace the payload with its ciphertext and record the parameters a
    /// receiver needs to decrypt it.
    pub fn set_encrypted<I>(&mut self, ciphertext: Vec<u8>, params: I) -> Result<(), BuildError>
    where
        I: IntoIterator<Item = OuterOption>,
    {
        for option in params {
            self.outer_options.push(option)?;
        }
        self.payload = ciphertext;
        Ok(())
    }

    /// Split into datagrams. See [`packetize`].
    pub fn packetize(&self) -> Result<Vec<Datagram>, BuildError> {
        packetize(self)
    }
}
