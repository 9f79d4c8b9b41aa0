use ff_codec::Datagram;
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{build_request, unix_timestamp};
use crate::transport::{DatagramSink, UdpSink};

/// Sends requests to one receiver.
///
/// Every request draws its own id, salt and IV from `rng`; nothing is
/// shared between requests except the configuration and the sink.
#[derive(Debug)]
pub struct FfClient<S, R> {
    config: ClientConfig,
    sink: S,
    rng: R,
}

impl FfClient<UdpSink, OsRng> {
    /// Bind a UDP socket towards the configured destination.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let sink = UdpSink::bind(config.destination())?;
        debug!(destination = %config.destination(), "udp sink bound");
        Ok(Self::new(config, sink, OsRng))
    }
}

impl<S, R> FfClient<S, R>
where
    S: DatagramSink,
    R: RngCore + CryptoRng,
{
    pub fn new(config: ClientConfig, sink: S, rng: R) -> Self {
        Self { config, sink, rng }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Build the datagram sequence for one request without sending it.
    pub fn create_request_datagrams(
        &mut self,
        body: impl AsRef<[u8]>,
        https: bool,
    ) -> Result<Vec<Datagram>> {
        self.create_request_datagrams_at(body, https, unix_timestamp())
    }

    /// As [`create_request_datagrams`](Self::create_request_datagrams) with
    /// an explicit timestamp.
    pub fn create_request_datagrams_at(
        &mut self,
        body: impl AsRef<[u8]>,
        https: bool,
        timestamp: u64,
    ) -> Result<Vec<Datagram>> {
        let body = body.as_ref();
        let request = build_request(body, https, timestamp, &self.config, &mut self.rng)?;
        let datagrams = request.packetize()?;
        debug!(
            request_id = format_args!("{:016x}", request.request_id),
            body_len = body.len(),
            payload_len = request.payload.len(),
            datagrams = datagrams.len(),
            encrypted = self.config.pre_shared_key().is_some(),
            "request packetized"
        );
        Ok(datagrams)
    }

    /// Build a request and hand its datagrams to the sink in order.
    ///
    /// Returns the number of datagrams sent. The first send error is
    /// returned as-is; earlier datagrams are not recalled.
    pub fn send_request(&mut self, body: impl AsRef<[u8]>, https: bool) -> Result<usize> {
        let datagrams = self.create_request_datagrams(body, https)?;
        let total = datagrams.len();
        for (index, datagram) in datagrams.iter().enumerate() {
            if let Err(err) = self.sink.send(datagram.as_bytes()) {
                warn!(index, total, error = %err, "datagram send failed");
                return Err(err.into());
            }
        }
        info!(datagrams = total, destination = %self.config.destination(), "request sent");
        Ok(total)
    }
}
