use ff_codec::{OptionType, Request, SecureOptions, parse_datagram, parse_options};
use ff_secure::consts::{NONCE_SIZE, SALT_SIZE, TAG_SIZE};
use ff_secure::{CryptoErrorKind, EnvelopeParams, PreSharedKey, open, seal, seal_optional};
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;

const ITERATIONS: u32 = 1000;

fn psk() -> PreSharedKey {
  PreSharedKey::new("pre-shared-secret").unwrap()
}

fn sealed_request(body: &[u8], seed: u64) -> Request {
  let mut rng = ChaCha20Rng::seed_from_u64(seed);
  let mut req = Request::new(0x0102_0304_0506_0708, SecureOptions::bundle(true, 1_700_000_000), body);
  let sealed = seal(&req.payload, &psk(), ITERATIONS, &mut rng).unwrap();
  req.set_encrypted(sealed.ciphertext.clone(), sealed.outer_options()).unwrap();
  req.outer_options.terminate().unwrap();
  req
}

#[test]
fn first_datagram_carries_envelope_params() {
  let req = sealed_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n", 11);
  let datagrams = req.packetize().unwrap();
  assert_eq!(datagrams.len(), 1);

  let parsed = parse_datagram(datagrams[0].as_bytes()).unwrap();
  let types: Vec<OptionType> = parsed.options.iter().map(|o| o.option_type).collect();
  assert_eq!(
    types,
    [
      OptionType::EncryptionMode,
      OptionType::EncryptionIv,
      OptionType::EncryptionTag,
      OptionType::KeyDeriveMode,
      OptionType::KeyDeriveSalt,
      OptionType::Break,
    ]
  );
  assert_eq!(parsed.options[0].value, &[1]);
  assert_eq!(parsed.options[1].value.len(), NONCE_SIZE);
  assert_eq!(parsed.options[2].value.len(), TAG_SIZE);
  assert_eq!(parsed.options[3].value, &[1]);
  assert_eq!(parsed.options[4].value.len(), SALT_SIZE);
}

#[test]
fn receiver_recovers_bundle_and_body() {
  let body = b"POST /submit HTTP/1.1\r\nContent-Length: 3\r\n\r\nabc";
  let req = sealed_request(body, 12);
  let datagrams = req.packetize().unwrap();

  let mut params = None;
  let mut ciphertext = vec![0u8; req.payload.len()];
  for dg in &datagrams {
    let parsed = parse_datagram(dg.as_bytes()).unwrap();
    if parsed.header.chunk_offset == 0 {
      params = Some(EnvelopeParams::from_options(&parsed.options).unwrap());
    }
    let start = parsed.header.chunk_offset as usize;
    ciphertext[start..start + parsed.chunk.len()].copy_from_slice(parsed.chunk);
  }

  let plain = open(&ciphertext, &params.unwrap(), &psk(), ITERATIONS).unwrap();
  let (secure, used) = parse_options(&plain).unwrap();
  let types: Vec<OptionType> = secure.iter().map(|o| o.option_type).collect();
  assert_eq!(types, [OptionType::Https, OptionType::Timestamp, OptionType::Eol]);
  assert_eq!(&plain[used..], body);
}

#[test]
fn ciphertext_differs_from_plaintext() {
  let req = Request::new(1, SecureOptions::bundle(false, 5), b"plain body");
  let mut rng = ChaCha20Rng::seed_from_u64(13);
  let sealed = seal(&req.payload, &psk(), ITERATIONS, &mut rng).unwrap();
  assert_eq!(sealed.ciphertext.len(), req.payload.len());
  assert_ne!(sealed.ciphertext, req.payload);
}

#[test]
fn fresh_salt_and_iv_per_seal() {
  let mut rng = ChaCha20Rng::seed_from_u64(14);
  let a = seal(b"same", &psk(), ITERATIONS, &mut rng).unwrap();
  let b = seal(b"same", &psk(), ITERATIONS, &mut rng).unwrap();
  assert_ne!(a.iv, b.iv);
  assert_ne!(a.salt, b.salt);
  assert_ne!(a.ciphertext, b.ciphertext);
}

#[test]
fn encryption_without_key_fails() {
  let mut rng = ChaCha20Rng::seed_from_u64(15);
  let err = seal_optional(b"body", None, ITERATIONS, &mut rng).unwrap_err();
  assert_eq!(err.kind, CryptoErrorKind::MissingKey);
}

#[test]
fn tampered_ciphertext_rejected() {
  let mut rng = ChaCha20Rng::seed_from_u64(16);
  let sealed = seal(b"do not touch", &psk(), ITERATIONS, &mut rng).unwrap();
  let mut ct = sealed.ciphertext.clone();
  ct[0] ^= 0x80;
  let err = open(&ct, &sealed.params(), &psk(), ITERATIONS).unwrap_err();
  assert_eq!(err.kind, CryptoErrorKind::DecryptionFailed);
}

fn hex(s: &str) -> Vec<u8> {
  (0..s.len())
    .step_by(2)
    .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
    .collect()
}

#[test]
fn seal_known_vector() {
  let mut rng = ChaCha20Rng::seed_from_u64(9);
  let psk = PreSharedKey::new("shared secret").unwrap();
  let sealed = seal(b"GET / HTTP/1.1\nHost: x\n\n", &psk, ITERATIONS, &mut rng).unwrap();
  assert_eq!(sealed.salt.to_vec(), hex("1bdd9566764604029776c8d223b82907"));
  assert_eq!(sealed.iv.to_vec(), hex("9815053fe6eeda71b440acc1"));
  assert_eq!(
    sealed.ciphertext,
    hex("53db14fa064bea0f1f57e8567177807b519524b71099d9e7")
  );
  assert_eq!(sealed.tag.to_vec(), hex("181f0955efecc64db3cd66d6ae7602b2"));
}
