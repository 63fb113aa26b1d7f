use branca_core::engine::Engine;
use branca_core::{BrancaError, KEY_LEN, NONCE_LEN, TAG_LEN};
use chacha20poly1305::aead::AeadInPlace;
use chacha20poly1305::{KeyInit, XChaCha20Poly1305};

/// XChaCha20-Poly1305 (IETF) from the RustCrypto `chacha20poly1305` crate.
#[derive(Debug)]
pub struct XChaCha;

impl Engine for XChaCha {
    type Key = XChaCha20Poly1305;

    fn key_from_bytes(bytes: &[u8; KEY_LEN]) -> XChaCha20Poly1305 {
        XChaCha20Poly1305::new(bytes.into())
    }

    fn seal_detached(
        key: &XChaCha20Poly1305,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
    ) -> Result<[u8; TAG_LEN], BrancaError> {
        let tag = key
            .encrypt_in_place_detached(nonce.into(), aad, buffer)
            .map_err(|_| BrancaError::InvalidPayload("payload is too long to encrypt".into()))?;
        Ok(tag.into())
    }

    fn open_detached(
        key: &XChaCha20Poly1305,
        nonce: &[u8; NONCE_LEN],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8; TAG_LEN],
    ) -> Result<(), BrancaError> {
        key.decrypt_in_place_detached(nonce.into(), aad, buffer, tag.into())
            .map_err(|_| BrancaError::InvalidToken)
    }
}
