use std::collections::HashSet;
use std::io;

use ff_client::{ClientConfig, ClientError, DatagramSink, FfClient};
use ff_codec::consts::{HEADER_LEN, MAX_DATAGRAM_LEN};
use ff_codec::{OptionType, SecureOptions, parse_datagram};
use ff_secure::{EnvelopeParams, PreSharedKey, open};
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;

const BODY: &[u8] = b"GET / HTTP/1.1\nHost: x\n\n";
const TS: u64 = 1_700_000_000;

fn plain_client(seed: u64) -> FfClient<Vec<Vec<u8>>, ChaCha20Rng> {
    let config = ClientConfig::builder("127.0.0.1", 4000).build().unwrap();
    FfClient::new(config, Vec::new(), ChaCha20Rng::seed_from_u64(seed))
}

fn keyed_client(seed: u64) -> FfClient<Vec<Vec<u8>>, ChaCha20Rng> {
    let config = ClientConfig::builder("127.0.0.1", 4000)
        .pre_shared_key("shared secret")
        .build()
        .unwrap();
    FfClient::new(config, Vec::new(), ChaCha20Rng::seed_from_u64(seed))
}

fn reassemble(datagrams: &[Vec<u8>]) -> Vec<u8> {
    let mut parsed: Vec<_> = datagrams.iter().map(|d| parse_datagram(d).unwrap()).collect();
    parsed.sort_by_key(|p| p.header.chunk_offset);
    parsed.iter().flat_map(|p| p.chunk.iter().copied()).collect()
}

#[test]
fn plain_scenario_single_datagram() {
    let mut client = plain_client(1);
    let datagrams = client.create_request_datagrams_at(BODY, false, TS).unwrap();
    assert_eq!(datagrams.len(), 1);

    let parsed = parse_datagram(datagrams[0].as_bytes()).unwrap();
    assert_eq!(parsed.header.chunk_offset, 0);
    assert_eq!(parsed.options.len(), 1);
    assert_eq!(parsed.options[0].option_type, OptionType::Break);
    assert!(parsed.options[0].value.is_empty());

    let mut expected = SecureOptions::bundle(false, TS).to_bytes();
    assert_eq!(expected.last_chunk::<3>(), Some(&[0, 0, 0]));
    expected.extend_from_slice(BODY);
    assert_eq!(parsed.chunk, expected.as_slice());
}

#[test]
fn plain_total_length_is_bundle_plus_body() {
    let mut client = plain_client(2);
    for https in [false, true] {
        let bundle_len = SecureOptions::bundle(https, TS).encoded_len();
        for dg in client.create_request_datagrams_at(BODY, https, TS).unwrap() {
            let parsed = parse_datagram(dg.as_bytes()).unwrap();
            assert_eq!(parsed.header.total_length as usize, bundle_len + BODY.len());
        }
    }
}

#[test]
fn encrypted_scenario() {
    let mut client = keyed_client(3);
    let datagrams = client.create_request_datagrams_at(BODY, false, TS).unwrap();
    assert_eq!(datagrams.len(), 1);
    let parsed = parse_datagram(datagrams[0].as_bytes()).unwrap();

    let mode = parsed
        .options
        .iter()
        .find(|o| o.option_type == OptionType::EncryptionMode)
        .unwrap();
    assert_eq!(mode.value, &[1]);
    let kdf = parsed
        .options
        .iter()
        .find(|o| o.option_type == OptionType::KeyDeriveMode)
        .unwrap();
    assert_eq!(kdf.value, &[1]);

    let mut plaintext = SecureOptions::bundle(false, TS).to_bytes();
    plaintext.extend_from_slice(BODY);
    assert_eq!(parsed.chunk.len(), plaintext.len());
    assert_ne!(parsed.chunk, plaintext.as_slice());

    let params = EnvelopeParams::from_options(&parsed.options).unwrap();
    let psk = PreSharedKey::new("shared secret").unwrap();
    let opened = open(parsed.chunk, &params, &psk, 1000).unwrap();
    assert_eq!(opened, plaintext);
}

#[test]
fn envelope_parameter_sizes() {
    let mut client = keyed_client(4);
    let datagrams = client.create_request_datagrams_at(BODY, true, TS).unwrap();
    let parsed = parse_datagram(datagrams[0].as_bytes()).unwrap();
    let len_of = |t: OptionType| {
        parsed
            .options
            .iter()
            .find(|o| o.option_type == t)
            .map(|o| o.value.len())
    };
    assert_eq!(len_of(OptionType::EncryptionIv), Some(12));
    assert_eq!(len_of(OptionType::EncryptionTag), Some(16));
    assert_eq!(len_of(OptionType::KeyDeriveSalt), Some(16));
}

#[test]
fn two_thousand_byte_body_spills_once() {
    let mut client = plain_client(5);
    let body = vec![b'a'; 2000];
    let datagrams = client.create_request_datagrams_at(&body, true, TS).unwrap();
    assert_eq!(datagrams.len(), 2);

    let first = parse_datagram(datagrams[0].as_bytes()).unwrap();
    let second = parse_datagram(datagrams[1].as_bytes()).unwrap();
    assert_eq!(first.header.chunk_length, 1277);
    assert_eq!(second.header.chunk_length, 741);
    assert_eq!(second.header.chunk_offset, u32::from(first.header.chunk_length));
    assert_eq!(second.options.len(), 1);
    assert_eq!(second.options[0].option_type, OptionType::Eol);
    assert_eq!(datagrams[1].len(), HEADER_LEN + 3 + 741);
}

#[test]
fn large_encrypted_body_round_trips() {
    let mut client = keyed_client(6);
    let body: Vec<u8> = (0..9000u32).map(|i| (i % 251) as u8).collect();
    client.send_request(&body, true).unwrap();
    let sent = client.into_sink();
    assert!(sent.len() > 1);

    let mut ids = HashSet::new();
    let mut totals = HashSet::new();
    let mut params = None;
    for dg in &sent {
        assert!(dg.len() <= MAX_DATAGRAM_LEN);
        let parsed = parse_datagram(dg).unwrap();
        ids.insert(parsed.header.request_id);
        totals.insert(parsed.header.total_length);
        if parsed.header.chunk_offset == 0 {
            params = Some(EnvelopeParams::from_options(&parsed.options).unwrap());
        }
    }
    assert_eq!(ids.len(), 1);
    assert_eq!(totals.len(), 1);

    let payload = reassemble(&sent);
    let psk = PreSharedKey::new("shared secret").unwrap();
    let plain = open(&payload, &params.unwrap(), &psk, 1000).unwrap();
    let bundle_len = SecureOptions::bundle(true, 0).encoded_len();
    assert_eq!(&plain[bundle_len..], body.as_slice());
}

#[test]
fn back_to_back_requests_share_nothing() {
    let mut client = keyed_client(7);
    let mut ids = HashSet::new();
    let mut ivs = HashSet::new();
    let mut salts = HashSet::new();
    for _ in 0..64 {
        let datagrams = client.create_request_datagrams_at(BODY, false, TS).unwrap();
        let parsed = parse_datagram(datagrams[0].as_bytes()).unwrap();
        let params = EnvelopeParams::from_options(&parsed.options).unwrap();
        assert!(ids.insert(parsed.header.request_id));
        assert!(ivs.insert(params.iv));
        assert!(salts.insert(params.salt));
    }
}

struct FailAfter {
    remaining: usize,
    sent: usize,
}

impl DatagramSink for FailAfter {
    fn send(&mut self, _datagram: &[u8]) -> io::Result<()> {
        if self.remaining == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        }
        self.remaining -= 1;
        self.sent += 1;
        Ok(())
    }
}

#[test]
fn transport_error_stops_sending() {
    let config = ClientConfig::builder("127.0.0.1", 4000).build().unwrap();
    let sink = FailAfter { remaining: 1, sent: 0 };
    let mut client = FfClient::new(config, sink, ChaCha20Rng::seed_from_u64(8));
    let err = client.send_request(vec![0u8; 4000], false).unwrap_err();
    assert!(matches!(err, ClientError::Transport(ref e) if e.kind() == io::ErrorKind::ConnectionRefused));
    assert_eq!(client.sink().sent, 1);
}

#[test]
fn sends_over_loopback_udp() {
    use std::net::UdpSocket;
    use std::time::Duration;

    let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
    receiver.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let port = receiver.local_addr().unwrap().port();
    let config = ClientConfig::builder("127.0.0.1", u32::from(port)).build().unwrap();
    let mut client = FfClient::connect(config).unwrap();
    assert_eq!(client.send_request("GET / HTTP/1.1\r\n\r\n", false).unwrap(), 1);

    let mut buf = [0u8; MAX_DATAGRAM_LEN];
    let (n, _) = receiver.recv_from(&mut buf).unwrap();
    let parsed = parse_datagram(&buf[..n]).unwrap();
    assert!(parsed.chunk.ends_with(b"GET / HTTP/1.1\r\n\r\n"));
}
