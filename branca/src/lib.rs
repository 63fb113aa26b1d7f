//! Branca tokens (RustCrypto)
//!
//! Authenticated and encrypted API tokens using XChaCha20-Poly1305.
//!
//! ```
//! use branca::Branca;
//!
//! let branca = Branca::new(b"supersecretkeyyoushouldnotcommit").unwrap();
//!
//! // create a token
//! let token = branca.encode(b"Hello world!", None).unwrap();
//!
//! // decode it, rejecting it if it is more than an hour old
//! let payload = branca.decode(&token, Some(3600)).unwrap();
//! assert_eq!(payload, b"Hello world!");
//! ```
//!
//! The typed API carries any [`Payload`](branca_core::encodings::Payload),
//! such as JSON claims:
//!
//! ```
//! use branca::{DecryptedToken, EncryptedToken, Key, Ttl};
//! use branca_core::rand_core::OsRng;
//! use branca_json::Json;
//!
//! #[derive(serde::Serialize, serde::Deserialize)]
//! struct Claims {
//!     sub: String,
//! }
//!
//! let key = Key::random(OsRng).unwrap();
//!
//! // create and encrypt a new token
//! let claims = Json(Claims { sub: "conradludgate".to_string() });
//! let token = DecryptedToken::<Json<Claims>>::new(claims)
//!     .encrypt(&key, OsRng)
//!     .unwrap();
//!
//! // serialize the token.
//! let token = token.to_string();
//!
//! // ...
//!
//! // parse the token
//! let token: EncryptedToken<Json<Claims>> = token.parse().unwrap();
//!
//! // decrypt the token and check its age.
//! let token = token.decrypt(&key, &Ttl::valid_now(3600)).unwrap();
//! assert_eq!(token.message.0.sub, "conradludgate");
//! ```

#![forbid(unsafe_code)]

/// Low level implementation primitives.
pub mod core;

pub use branca_core::validation::{Ttl, Validate};
pub use branca_core::{BrancaError, HEADER_LEN, KEY_LEN, NONCE_LEN, TAG_LEN, VERSION};

/// Encodes and decodes tokens with a single key
pub type Branca = branca_core::Branca<core::XChaCha>;

/// A token with secret data
pub type EncryptedToken<M = Vec<u8>> = branca_core::tokens::EncryptedToken<core::XChaCha, M>;

/// An [`EncryptedToken`] that has been decrypted
pub type DecryptedToken<M = Vec<u8>> = branca_core::tokens::DecryptedToken<core::XChaCha, M>;

/// Secret key used for [`encryption`](DecryptedToken::encrypt) and [`decryption`](EncryptedToken::decrypt)
pub type Key = branca_core::key::Key<core::XChaCha>;
