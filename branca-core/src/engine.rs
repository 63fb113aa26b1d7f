//! The AEAD seam.
//!
//! The wire format fixes the cipher to XChaCha20-Poly1305 (IETF), so the key,
//! nonce and tag sizes are crate constants. An [`Engine`] only has to supply
//! the primitive itself.

use rand_core::TryCryptoRng;

use crate::{BrancaError, KEY_LEN, NONCE_LEN, TAG_LEN};

/// An implementation of XChaCha20-Poly1305 used to seal and open tokens.
pub trait Engine: 'static {
    /// Prepared key material.
    type Key: Send + Sync;

    /// Prepare a key from its raw bytes.
    fn key_from_bytes(bytes: &[u8; KEY_LEN]) -> Self::Key;

    /// Encrypt `buffer` in place, authenticating `aad` alongside it, and return the tag.
    fn seal_detached(
        key: &Self::Key,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<[u8; TAG_LEN], BrancaError>;

    /// Verify `tag` over `aad` and `buffer`, then decrypt `buffer` in place.
    ///
    /// Must fail with [`BrancaError::InvalidToken`] on any mismatch, leaving no
    /// indication of which input was wrong.
    fn open_detached(
        key: &Self::Key,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8; TAG_LEN],
    ) -> Result<(), BrancaError>;

    /// Draw a fresh nonce from `rng`.
    fn random_nonce(mut rng: impl TryCryptoRng) -> Result<[u8; NONCE_LEN], BrancaError> {
        let mut nonce = [0; NONCE_LEN];
        rng.try_fill_bytes(&mut nonce)
            .map_err(|_| BrancaError::RandomSource)?;
        Ok(nonce)
    }
}
