//! Secret keys.

use core::fmt;

use rand_core::TryCryptoRng;
use zeroize::Zeroizing;

use crate::engine::Engine;
use crate::{BrancaError, KEY_LEN};

/// A symmetric key used to encrypt and decrypt tokens.
///
/// Holds the engine's prepared form of the key. The raw bytes are not kept.
pub struct Key<E: Engine>(E::Key);

impl<E: Engine> Key<E> {
    /// Build a key from raw bytes.
    ///
    /// Fails with [`BrancaError::InvalidKey`] unless `bytes` is exactly [`KEY_LEN`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BrancaError> {
        let bytes: &[u8; KEY_LEN] = bytes.try_into().map_err(|_| BrancaError::InvalidKey)?;
        Ok(Self(E::key_from_bytes(bytes)))
    }

    /// Generate a random key
    pub fn random(mut rng: impl TryCryptoRng) -> Result<Self, BrancaError> {
        let mut bytes = Zeroizing::new([0; KEY_LEN]);
        rng.try_fill_bytes(&mut bytes[..])
            .map_err(|_| BrancaError::RandomSource)?;
        Ok(Self(E::key_from_bytes(&bytes)))
    }

    pub(crate) fn as_inner(&self) -> &E::Key {
        &self.0
    }
}

impl<E: Engine> Clone for Key<E>
where
    E::Key: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<E: Engine> fmt::Debug for Key<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key").finish_non_exhaustive()
    }
}

/// Parse a key from 64 hex characters.
impl<E: Engine> core::str::FromStr for Key<E> {
    type Err = BrancaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = Zeroizing::new([0; KEY_LEN]);
        hex::decode_to_slice(s, &mut bytes[..]).map_err(|_| BrancaError::InvalidKey)?;
        Ok(Self(E::key_from_bytes(&bytes)))
    }
}
