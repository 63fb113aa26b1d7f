//! Encrypted and decrypted tokens.

use std::marker::PhantomData;

use rand_core::TryCryptoRng;

use crate::encodings::Payload;
use crate::engine::Engine;
use crate::header::Header;
use crate::key::Key;
use crate::validation::{Validate, current_timestamp};
use crate::{BrancaError, HEADER_LEN, NONCE_LEN, TAG_LEN};

/// A decrypted token.
///
/// This represents a Branca token which has been authenticated and decrypted,
/// or one which is about to be encrypted.
///
/// This type is un-serializable as it isn't encrypted. For that you will want [`EncryptedToken`].
pub struct DecryptedToken<E, M = Vec<u8>> {
    /// The message that was contained in the token
    pub message: M,
    /// Seconds since the Unix epoch at which the token was created
    pub timestamp: u32,
    pub(crate) _engine: PhantomData<E>,
}

impl<E: Engine, M> DecryptedToken<E, M> {
    /// Create a new [`DecryptedToken`] with the given message, stamped with the current time
    pub fn new(message: M) -> Self {
        Self {
            message,
            timestamp: current_timestamp(),
            _engine: PhantomData,
        }
    }

    /// Override the creation time of this token.
    pub fn with_timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }
}

impl<E, M: std::fmt::Debug> std::fmt::Debug for DecryptedToken<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecryptedToken")
            .field("message", &self.message)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

impl<E: Engine, M: Payload> DecryptedToken<E, M> {
    /// Encrypt this token with a nonce drawn from `rng`.
    pub fn encrypt(
        self,
        key: &Key<E>,
        rng: impl TryCryptoRng,
    ) -> Result<EncryptedToken<E, M>, BrancaError> {
        let nonce = E::random_nonce(rng)?;
        self.dangerous_encrypt_with_nonce(key, nonce)
    }

    /// Encrypt this token with a caller supplied nonce.
    ///
    /// Only for reproducing test vectors. Encrypting two different messages
    /// with the same key and nonce breaks both confidentiality and integrity.
    pub fn dangerous_encrypt_with_nonce(
        self,
        key: &Key<E>,
        nonce: [u8; NONCE_LEN],
    ) -> Result<EncryptedToken<E, M>, BrancaError> {
        let header = Header::new(self.timestamp, nonce);

        let mut wire = Vec::with_capacity(HEADER_LEN + TAG_LEN + 64);
        wire.extend_from_slice(&header.to_bytes());
        self.message
            .encode(&mut wire)
            .map_err(BrancaError::InvalidPayload)?;

        let (aad, plaintext) = wire.split_at_mut(HEADER_LEN);
        let tag = E::seal_detached(key.as_inner(), &nonce, aad, plaintext)?;
        wire.extend_from_slice(&tag);

        Ok(EncryptedToken {
            header,
            wire,
            _engine: PhantomData,
            _message: PhantomData,
        })
    }
}

/// An encrypted token.
///
/// This holds the wire form `header ‖ ciphertext ‖ tag`. The header is readable,
/// but nothing in it is trustworthy until the token is [decrypted](Self::decrypt).
/// Use [`Display`](std::fmt::Display) and [`FromStr`](std::str::FromStr) for the base62 text form.
pub struct EncryptedToken<E, M = Vec<u8>> {
    header: Header,
    wire: Vec<u8>,
    _engine: PhantomData<E>,
    _message: PhantomData<M>,
}

impl<E, M> EncryptedToken<E, M> {
    /// Parse the wire form of a token.
    ///
    /// Checks the length, then the version. No cryptography happens here.
    pub fn from_bytes(wire: Vec<u8>) -> Result<Self, BrancaError> {
        if wire.len() < HEADER_LEN + TAG_LEN {
            return Err(BrancaError::InvalidEncoding);
        }
        let header = wire
            .first_chunk::<HEADER_LEN>()
            .ok_or(BrancaError::InvalidEncoding)?;
        let header = Header::parse(header)?;

        Ok(Self {
            header,
            wire,
            _engine: PhantomData,
            _message: PhantomData,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.wire
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.wire
    }

    /// View the **unverified** header for this token
    pub fn unverified_header(&self) -> &Header {
        &self.header
    }

    /// View the **unverified** creation time of this token.
    ///
    /// This is read before authentication. Do not base security decisions on
    /// it; use a [`Ttl`](crate::validation::Ttl) with [`decrypt`](Self::decrypt) instead.
    pub fn unverified_timestamp(&self) -> u32 {
        self.header.timestamp()
    }
}

impl<E, M> Clone for EncryptedToken<E, M> {
    fn clone(&self) -> Self {
        Self {
            header: self.header,
            wire: self.wire.clone(),
            _engine: PhantomData,
            _message: PhantomData,
        }
    }
}

impl<E, M> std::fmt::Debug for EncryptedToken<E, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EncryptedToken")
            .field(&crate::base62::encode(&self.wire))
            .finish()
    }
}

impl<E: Engine, M: Payload> EncryptedToken<E, M> {
    /// Authenticate and decrypt the token, then run `validation` on its header.
    ///
    /// The validation only runs once the header is known to be authentic.
    pub fn decrypt(
        mut self,
        key: &Key<E>,
        validation: &impl Validate,
    ) -> Result<DecryptedToken<E, M>, BrancaError> {
        let (aad, body) = self.wire.split_at_mut(HEADER_LEN);
        let (ciphertext, tag) = body
            .split_last_chunk_mut::<TAG_LEN>()
            .ok_or(BrancaError::InvalidEncoding)?;

        E::open_detached(key.as_inner(), self.header.nonce(), aad, ciphertext, tag)?;
        validation.validate(&self.header)?;

        let message = M::decode(ciphertext).map_err(BrancaError::InvalidPayload)?;

        Ok(DecryptedToken {
            message,
            timestamp: self.header.timestamp(),
            _engine: PhantomData,
        })
    }
}
