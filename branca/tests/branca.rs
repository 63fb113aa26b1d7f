use branca::{Branca, BrancaError, DecryptedToken, EncryptedToken, Key, Ttl};
use branca_core::base62;
use branca_core::rand_core::OsRng;
use branca_json::Json;
use branca_test::{TEST_KEY as KEY, TEST_NONCE as NONCE};
use proptest::prelude::*;

const HELLO_WORLD: &str =
    "875GH233T7IYrxtgXxlQBYiFobZMQdHAT51vChKsAIYCFxZtL1evV54vYqLyZtQ0ekPHt8kJHQp0a";
const NOV27: u32 = 123206400;

fn branca() -> Branca {
    Branca::new(KEY).unwrap()
}

#[test]
fn encode_and_decode() {
    let branca = branca();
    let token = branca.encode(b"Hello world!", None).unwrap();
    assert_eq!(branca.decode(&token, None).unwrap(), b"Hello world!");
}

#[test]
fn empty_payload() {
    let branca = branca();
    let token = branca.encode(b"", None).unwrap();
    assert_eq!(branca.decode(&token, None).unwrap(), b"");

    let token: EncryptedToken = token.parse().unwrap();
    assert_eq!(token.as_bytes().len(), branca::HEADER_LEN + branca::TAG_LEN);
}

#[test]
fn wire_length() {
    let branca = branca();
    for len in [0, 1, 12, 100, 1000] {
        let payload = vec![0xa5; len];
        let token: EncryptedToken = branca.encode(&payload, None).unwrap().parse().unwrap();
        assert_eq!(token.as_bytes().len(), 29 + len + 16);
    }
}

#[test]
fn default_timestamp_is_now() {
    let branca = branca();
    let before = branca_core::validation::current_timestamp();
    let token = branca.encode(b"", None).unwrap();
    let after = branca_core::validation::current_timestamp();

    let timestamp = branca.timestamp(&token).unwrap();
    assert!(before <= timestamp && timestamp <= after);
}

#[test]
fn explicit_timestamp() {
    let branca = branca();
    for timestamp in [0, NOV27, u32::MAX] {
        let token = branca.encode(b"Hello world!", Some(timestamp)).unwrap();
        assert_eq!(branca.timestamp(&token).unwrap(), timestamp);

        let decoded = branca.decode_with(&token, &()).unwrap();
        assert_eq!(decoded.timestamp, timestamp);
        assert_eq!(decoded.message, b"Hello world!");

        let wire = base62::decode(&token).unwrap();
        assert_eq!(wire[0], 0xBA);
        assert_eq!(wire[1..5], timestamp.to_be_bytes());
    }
}

#[test]
fn deterministic_with_fixed_nonce() {
    let branca = branca();
    let a = branca
        .dangerous_encode_with_nonce(b"Hello world!", Some(NOV27), NONCE)
        .unwrap();
    let b = branca
        .dangerous_encode_with_nonce(b"Hello world!", Some(NOV27), NONCE)
        .unwrap();
    assert_eq!(a, b);
    assert_eq!(a, HELLO_WORLD);
}

#[test]
fn random_nonces_differ() {
    let branca = branca();
    let a = branca.encode(b"Hello world!", Some(0)).unwrap();
    let b = branca.encode(b"Hello world!", Some(0)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn broken_random_source() {
    let branca = branca();
    let err = branca
        .encode_with_rng(b"Hello world!", None, branca_test::BrokenRng)
        .unwrap_err();
    assert!(matches!(err, BrancaError::RandomSource));

    let err = Key::random(branca_test::BrokenRng).unwrap_err();
    assert!(matches!(err, BrancaError::RandomSource));
}

#[test]
fn wrong_key() {
    let other = Branca::new(b"supersecretkeyyoushouldnotcommiT").unwrap();
    let err = other.decode(HELLO_WORLD, None).unwrap_err();
    assert!(matches!(err, BrancaError::InvalidToken));

    let random = Branca::from_key(Key::random(OsRng).unwrap());
    let err = random.decode(HELLO_WORLD, None).unwrap_err();
    assert!(matches!(err, BrancaError::InvalidToken));
}

#[test]
fn key_length() {
    for len in [0, 16, 31, 33, 64] {
        let err = Branca::new(&vec![0u8; len]).unwrap_err();
        assert!(matches!(err, BrancaError::InvalidKey), "{len} byte key");
    }
    Branca::new(&[0u8; 32]).unwrap();
}

#[test]
fn hex_key() {
    let key: Key = "73757065727365637265746b6579796f7573686f756c646e6f74636f6d6d6974"
        .parse()
        .unwrap();
    let branca = Branca::from_key(key);
    assert_eq!(branca.decode(HELLO_WORLD, None).unwrap(), b"Hello world!");

    for bad in ["", "7375", "zz757065727365637265746b6579796f7573686f756c646e6f74636f6d6d6974"] {
        assert!(matches!(bad.parse::<Key>(), Err(BrancaError::InvalidKey)));
    }
}

#[test]
fn key_is_not_printed() {
    let debug = format!("{:?}", branca());
    assert!(!debug.contains("supersecret"));
    assert!(!debug.contains("73757065"));
}

#[test]
fn every_byte_is_authenticated() {
    let branca = branca();
    let wire = base62::decode(HELLO_WORLD).unwrap();

    for i in 0..wire.len() {
        let mut tampered = wire.clone();
        tampered[i] ^= 0x01;
        let token = base62::encode(&tampered);

        let err = branca.decode(&token, None).unwrap_err();
        if i == 0 {
            assert!(matches!(err, BrancaError::InvalidVersion), "byte {i}: {err:?}");
        } else {
            assert!(matches!(err, BrancaError::InvalidToken), "byte {i}: {err:?}");
        }
    }
}

#[test]
fn truncated_and_extended() {
    let branca = branca();
    let wire = base62::decode(HELLO_WORLD).unwrap();

    let err = branca.decode(&base62::encode(&wire[..44]), None).unwrap_err();
    assert!(matches!(err, BrancaError::InvalidEncoding));

    let err = branca.decode(&base62::encode(&wire[..45]), None).unwrap_err();
    assert!(matches!(err, BrancaError::InvalidToken));

    let mut extended = wire.clone();
    extended.push(0);
    let err = branca.decode(&base62::encode(&extended), None).unwrap_err();
    assert!(matches!(err, BrancaError::InvalidToken));

    let err = branca.decode(&format!("XX{HELLO_WORLD}XX"), None).unwrap_err();
    assert!(matches!(
        err,
        BrancaError::InvalidVersion | BrancaError::InvalidToken
    ));
}

#[test]
fn characters_outside_alphabet() {
    let branca = branca();
    for token in [
        format!("{HELLO_WORLD}="),
        format!("-{HELLO_WORLD}"),
        HELLO_WORLD.replace('T', "+"),
        HELLO_WORLD.replace('7', "/"),
        HELLO_WORLD.replace('Q', "é"),
        format!("{HELLO_WORLD}\n"),
    ] {
        let err = branca.decode(&token, None).unwrap_err();
        assert!(matches!(err, BrancaError::InvalidEncoding), "{token:?}");

        let err = branca.timestamp(&token).unwrap_err();
        assert!(matches!(err, BrancaError::InvalidEncoding), "{token:?}");
    }
}

#[test]
fn expiry_boundary() {
    let branca = branca();
    let expiry = u64::from(NOV27) + 3600;

    let token = branca
        .decode_with(HELLO_WORLD, &Ttl::valid_at(3600, expiry))
        .unwrap();
    assert_eq!(token.message, b"Hello world!");

    let err = branca
        .decode_with(HELLO_WORLD, &Ttl::valid_at(3600, expiry + 1))
        .unwrap_err();
    assert!(matches!(err, BrancaError::TokenExpired));
}

#[test]
fn expired_against_system_clock() {
    let branca = branca();
    let err = branca.decode(HELLO_WORLD, Some(3600)).unwrap_err();
    assert!(matches!(err, BrancaError::TokenExpired));

    let token = branca.encode(b"Hello world!", None).unwrap();
    assert_eq!(branca.decode(&token, Some(3600)).unwrap(), b"Hello world!");
}

#[test]
fn authentication_before_expiry() {
    // an old, forged token must not be reported as merely expired
    let branca = branca();
    let mut wire = base62::decode(HELLO_WORLD).unwrap();
    let last = wire.len() - 1;
    wire[last] ^= 0x80;

    let err = branca
        .decode(&base62::encode(&wire), Some(3600))
        .unwrap_err();
    assert!(matches!(err, BrancaError::InvalidToken));
}

#[test]
fn timestamp_is_readable_without_key() {
    let other = Branca::new(&[7u8; 32]).unwrap();
    assert_eq!(other.timestamp(HELLO_WORLD).unwrap(), NOV27);

    let token: EncryptedToken = HELLO_WORLD.parse().unwrap();
    assert_eq!(token.unverified_timestamp(), NOV27);
    assert_eq!(token.unverified_header().nonce(), &NONCE);
    assert_eq!(token.to_string(), HELLO_WORLD);
}

#[test]
fn codec_survives_errors() {
    let branca = branca();
    assert!(branca.decode("not a token!", None).is_err());
    assert!(branca.decode(&format!("{HELLO_WORLD}a"), None).is_err());
    assert_eq!(branca.decode(HELLO_WORLD, None).unwrap(), b"Hello world!");
}

#[test]
fn decoded_token_debug() {
    let branca = branca();
    let decoded = branca.decode_with(HELLO_WORLD, &()).unwrap();
    let debug = format!("{decoded:?}");
    assert!(debug.contains("timestamp: 123206400"), "{debug}");
    assert!(debug.contains("message: [72, 101"), "{debug}");

    let result = branca.decode_with(HELLO_WORLD, &Ttl::valid_at(0, u64::MAX));
    assert!(format!("{result:?}").contains("TokenExpired"));
}

#[test]
fn string_payload() {
    let key = Key::from_bytes(KEY).unwrap();
    let token: EncryptedToken<String> = DecryptedToken::<String>::new("Hello world!".to_string())
        .with_timestamp(NOV27)
        .dangerous_encrypt_with_nonce(&key, NONCE)
        .unwrap();
    assert_eq!(token.to_string(), HELLO_WORLD);

    let token = token.decrypt(&key, &()).unwrap();
    assert_eq!(token.message, "Hello world!");
    assert_eq!(token.timestamp, NOV27);
}

#[test]
fn non_utf8_payload() {
    let key = Key::from_bytes(KEY).unwrap();
    let token = DecryptedToken::new(vec![0xffu8, 0xfe])
        .encrypt(&key, OsRng)
        .unwrap()
        .to_string();

    let token: EncryptedToken<String> = token.parse().unwrap();
    let err = token.decrypt(&key, &()).unwrap_err();
    assert!(matches!(err, BrancaError::InvalidPayload(_)));
    assert!(std::error::Error::source(&err).is_some());
}

#[derive(serde::Serialize, serde::Deserialize, Debug, PartialEq)]
struct Claims {
    sub: String,
    scope: Vec<String>,
}

#[test]
fn json_payload() {
    let key = Key::random(OsRng).unwrap();
    let claims = Claims {
        sub: "conradludgate".to_string(),
        scope: vec!["read".to_string(), "write".to_string()],
    };

    let token = DecryptedToken::<Json<Claims>>::new(Json(claims))
        .encrypt(&key, OsRng)
        .unwrap()
        .to_string();

    let token: EncryptedToken<Json<Claims>> = token.parse().unwrap();
    let token = token.decrypt(&key, &Ttl::valid_now(60)).unwrap();
    assert_eq!(token.message.0.sub, "conradludgate");
    assert_eq!(token.message.0.scope, ["read", "write"]);
}

#[test]
fn json_payload_rejects_other_shapes() {
    let branca = branca();
    let token = branca.encode(br#"{"sub":1}"#, None).unwrap();

    let token: EncryptedToken<Json<Claims>> = token.parse().unwrap();
    let err = token.decrypt(branca.key(), &()).unwrap_err();
    assert!(matches!(err, BrancaError::InvalidPayload(_)));
}

#[test]
fn shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Branca>();
    assert_send_sync::<Key>();

    let branca = branca();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8u8)
            .map(|i| {
                let branca = &branca;
                s.spawn(move || {
                    let mut tokens = Vec::new();
                    for j in 0..32u8 {
                        let payload = [i, j];
                        let token = branca.encode(&payload, None).unwrap();
                        assert_eq!(branca.decode(&token, None).unwrap(), payload);
                        tokens.push(token);
                    }
                    tokens
                })
            })
            .collect();

        let mut tokens: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let len = tokens.len();
        tokens.sort();
        tokens.dedup();
        assert_eq!(tokens.len(), len);
    });
}

proptest! {
    #[test]
    fn round_trip(payload in proptest::collection::vec(any::<u8>(), 0..256), timestamp in any::<u32>()) {
        let branca = branca();
        let token = branca.encode(&payload, Some(timestamp)).unwrap();

        let decoded = branca.decode_with(&token, &()).unwrap();
        prop_assert_eq!(decoded.message, payload);
        prop_assert_eq!(decoded.timestamp, timestamp);
        prop_assert!(token.bytes().all(|c| c.is_ascii_alphanumeric()));
    }
}

#[cfg(feature = "serde")]
#[test]
fn token_as_serde_string() {
    #[derive(serde::Serialize, serde::Deserialize)]
    struct Session {
        token: EncryptedToken,
    }

    let session: Session =
        serde_json::from_str(&format!(r#"{{"token":"{HELLO_WORLD}"}}"#)).unwrap();
    assert_eq!(session.token.unverified_timestamp(), NOV27);

    let json = serde_json::to_string(&session).unwrap();
    assert_eq!(json, format!(r#"{{"token":"{HELLO_WORLD}"}}"#));

    let err = serde_json::from_str::<Session>(r#"{"token":"not_base62"}"#);
    assert!(err.is_err());
}
