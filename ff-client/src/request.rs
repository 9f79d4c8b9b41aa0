//! Turning a raw body into a fully assembled [`Request`].

use std::time::{SystemTime, UNIX_EPOCH};

use ff_codec::{Request, SecureOptions};
use ff_secure::{CryptoError, seal};
use rand_core::{CryptoRng, RngCore};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::Result;

/// Draw a fresh request id.
pub fn generate_request_id<R>(rng: &mut R) -> Result<u64>
where
    R: RngCore + CryptoRng,
{
    let mut bytes = [0u8; 8];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|_| CryptoError::random_failure())?;
    Ok(u64::from_be_bytes(bytes))
}

/// Current wall-clock time in whole seconds since the Unix epoch.
///
/// A clock set before 1970 reads as zero.
#[must_use]
pub fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Assemble a request: secure bundle and body, sealed when the config holds
/// a key, with the outer list closed by `BREAK`.
pub fn build_request<R>(
    body: &[u8],
    https: bool,
    timestamp: u64,
    config: &ClientConfig,
    rng: &mut R,
) -> Result<Request>
where
    R: RngCore + CryptoRng,
{
    let request_id = generate_request_id(rng)?;
    let mut request = Request::new(request_id, SecureOptions::bundle(https, timestamp), body);

    if let Some(psk) = config.pre_shared_key() {
        let sealed = seal(&request.payload, psk, config.pbkdf2_iterations().get(), rng)?;
        let params = sealed.outer_options();
        request.set_encrypted(sealed.ciphertext, params)?;
        debug!(
            request_id = format_args!("{request_id:016x}"),
            iterations = config.pbkdf2_iterations().get(),
            "payload encrypted"
        );
    }

    request.outer_options.terminate()?;
    Ok(request)
}
