//! Core types for Branca tokens.
//!
//! A Branca token is `version ‖ timestamp ‖ nonce ‖ ciphertext ‖ tag`, encoded
//! as base62 text. The header (version, timestamp and nonce) travels in the clear
//! but is authenticated as the AEAD associated data.
//!
//! This crate is cipher-agnostic. The AEAD itself is supplied by an
//! [`Engine`](engine::Engine) implementation, such as the one in the `branca` crate.

pub mod base62;
pub mod codec;
pub mod encodings;
pub mod engine;
pub mod header;
pub mod key;
pub mod tokens;
pub mod validation;

pub use codec::Branca;
pub use rand_core;

/// Format version byte, the first byte of every token.
pub const VERSION: u8 = 0xBA;
/// Length of a secret key in bytes.
pub const KEY_LEN: usize = 32;
/// Length of the nonce carried in the header.
pub const NONCE_LEN: usize = 24;
/// Length of the authentication tag appended to the ciphertext.
pub const TAG_LEN: usize = 16;
/// Length of the cleartext header: version, timestamp, nonce.
pub const HEADER_LEN: usize = 1 + 4 + NONCE_LEN;

#[derive(Debug)]
#[non_exhaustive]
/// Error returned for all Branca operations that can fail
pub enum BrancaError {
    /// The key was not exactly [`KEY_LEN`] bytes.
    InvalidKey,
    /// The token was not valid base62, or was too short to hold a header and tag.
    InvalidEncoding,
    /// The token version byte was not [`VERSION`].
    InvalidVersion,
    /// The token could not be authenticated.
    ///
    /// This covers every kind of tampering as well as decrypting with the wrong key.
    InvalidToken,
    /// The token is older than the allowed time-to-live.
    TokenExpired,
    /// The payload could not be encoded, or the decrypted bytes could not be decoded.
    InvalidPayload(Box<dyn std::error::Error + Send + Sync>),
    /// The random source failed to produce a nonce or key.
    RandomSource,
}

impl std::error::Error for BrancaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BrancaError::InvalidPayload(x) => Some(&**x),
            _ => None,
        }
    }
}

impl std::fmt::Display for BrancaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrancaError::InvalidKey => write!(f, "the key must be exactly {KEY_LEN} bytes"),
            BrancaError::InvalidEncoding => f.write_str("the token is not a valid base62 token"),
            BrancaError::InvalidVersion => f.write_str("the token version is not supported"),
            BrancaError::InvalidToken => f.write_str("the token could not be authenticated"),
            BrancaError::TokenExpired => f.write_str("the token has expired"),
            BrancaError::InvalidPayload(x) => {
                write!(f, "there was an error with the payload encoding: {x}")
            }
            BrancaError::RandomSource => f.write_str("the random source failed"),
        }
    }
}
