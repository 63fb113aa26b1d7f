//! A byte-oriented facade over the token types.

use core::fmt;

use rand_core::{OsRng, TryCryptoRng};

use crate::engine::Engine;
use crate::key::Key;
use crate::tokens::{DecryptedToken, EncryptedToken};
use crate::validation::{Ttl, Validate};
use crate::{BrancaError, NONCE_LEN};

/// Encodes and decodes Branca tokens with a single key.
///
/// Holds no state besides the key, so one instance can be shared freely
/// between threads.
pub struct Branca<E: Engine> {
    key: Key<E>,
}

impl<E: Engine> Branca<E> {
    /// Fails with [`BrancaError::InvalidKey`] unless `key` is exactly 32 bytes.
    pub fn new(key: &[u8]) -> Result<Self, BrancaError> {
        Key::from_bytes(key).map(Self::from_key)
    }

    pub fn from_key(key: Key<E>) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &Key<E> {
        &self.key
    }

    /// Encrypt `payload` into a token, using the OS random source for the nonce.
    ///
    /// `timestamp` defaults to the current time.
    pub fn encode(&self, payload: &[u8], timestamp: Option<u32>) -> Result<String, BrancaError> {
        self.encode_with_rng(payload, timestamp, OsRng)
    }

    /// Encrypt `payload` into a token, drawing the nonce from `rng`.
    pub fn encode_with_rng(
        &self,
        payload: &[u8],
        timestamp: Option<u32>,
        rng: impl TryCryptoRng,
    ) -> Result<String, BrancaError> {
        let nonce = E::random_nonce(rng)?;
        self.dangerous_encode_with_nonce(payload, timestamp, nonce)
    }

    /// Encrypt `payload` with a fixed nonce.
    ///
    /// Only for reproducing test vectors. See [`DecryptedToken::dangerous_encrypt_with_nonce`].
    pub fn dangerous_encode_with_nonce(
        &self,
        payload: &[u8],
        timestamp: Option<u32>,
        nonce: [u8; NONCE_LEN],
    ) -> Result<String, BrancaError> {
        let mut token = DecryptedToken::<E>::new(payload.to_vec());
        if let Some(timestamp) = timestamp {
            token = token.with_timestamp(timestamp);
        }
        tracing::trace!(len = payload.len(), timestamp = token.timestamp, "encoding token");

        let token = token.dangerous_encrypt_with_nonce(&self.key, nonce)?;
        Ok(token.to_string())
    }

    /// Decrypt a token, rejecting it if it is older than `ttl` seconds.
    pub fn decode(&self, token: &str, ttl: Option<u32>) -> Result<Vec<u8>, BrancaError> {
        self.decode_with(token, &ttl.map(Ttl::valid_now))
            .map(|token| token.message)
    }

    /// Decrypt a token and run `validation` on its authenticated header.
    ///
    /// Returns the payload together with its timestamp.
    pub fn decode_with(
        &self,
        token: &str,
        validation: &impl Validate,
    ) -> Result<DecryptedToken<E>, BrancaError> {
        let result = token
            .parse::<EncryptedToken<E>>()
            .and_then(|token| token.decrypt(&self.key, validation));

        if let Err(err) = &result {
            tracing::debug!(%err, "rejected token");
        }
        result
    }

    /// Read the creation time of a token without decrypting it.
    ///
    /// The timestamp is **not** authenticated by this call. Use
    /// [`decode`](Self::decode) with a ttl to enforce expiry.
    pub fn timestamp(&self, token: &str) -> Result<u32, BrancaError> {
        token
            .parse::<EncryptedToken<E>>()
            .map(|token| token.unverified_timestamp())
    }
}

impl<E: Engine> Clone for Branca<E>
where
    E::Key: Clone,
{
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
        }
    }
}

impl<E: Engine> fmt::Debug for Branca<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branca").field("key", &self.key).finish()
    }
}
