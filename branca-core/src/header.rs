//! The cleartext token header.

use crate::{BrancaError, HEADER_LEN, NONCE_LEN, VERSION};

/// The fixed-width header at the front of every token.
///
/// ```text
/// [ version: 1 ][ timestamp: 4, big-endian ][ nonce: 24 ]
/// ```
///
/// It is not encrypted, but it is the associated data of the AEAD, so it cannot
/// be altered without the token failing to decrypt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    timestamp: u32,
    nonce: [u8; NONCE_LEN],
}

impl Header {
    pub const fn new(timestamp: u32, nonce: [u8; NONCE_LEN]) -> Self {
        Self { timestamp, nonce }
    }

    /// Always [`VERSION`]. Tokens with any other version fail to parse.
    pub const fn version(&self) -> u8 {
        VERSION
    }

    /// Seconds since the Unix epoch at which the token was created.
    pub const fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub const fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0; HEADER_LEN];
        let (version, rest) = out.split_at_mut(1);
        let (timestamp, nonce) = rest.split_at_mut(4);
        version[0] = VERSION;
        timestamp.copy_from_slice(&self.timestamp.to_be_bytes());
        nonce.copy_from_slice(&self.nonce);
        out
    }

    /// Parse a header, rejecting unknown versions.
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, BrancaError> {
        let [version, t0, t1, t2, t3, nonce @ ..] = bytes;
        if *version != VERSION {
            return Err(BrancaError::InvalidVersion);
        }

        Ok(Self {
            timestamp: u32::from_be_bytes([*t0, *t1, *t2, *t3]),
            nonce: *nonce,
        })
    }
}
