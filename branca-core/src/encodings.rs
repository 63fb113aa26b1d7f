//! Payload encodings and the textual token form.

use core::fmt;
use std::error::Error;

use crate::engine::Engine;
use crate::tokens::EncryptedToken;
use crate::{BrancaError, base62};

/// A Branca payload object.
///
/// The token itself only carries bytes. This describes how a message type is
/// turned into those bytes and back.
pub trait Payload: Sized {
    /// Append the encoded message to `out`
    fn encode(self, out: &mut Vec<u8>) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Decode the message
    fn decode(payload: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

impl Payload for Vec<u8> {
    fn encode(self, out: &mut Vec<u8>) -> Result<(), Box<dyn Error + Send + Sync>> {
        out.extend_from_slice(&self);
        Ok(())
    }

    fn decode(payload: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(payload.to_vec())
    }
}

impl Payload for String {
    fn encode(self, out: &mut Vec<u8>) -> Result<(), Box<dyn Error + Send + Sync>> {
        out.extend_from_slice(self.as_bytes());
        Ok(())
    }

    fn decode(payload: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>> {
        String::from_utf8(payload.to_vec()).map_err(From::from)
    }
}

impl<E: Engine, M> fmt::Display for EncryptedToken<E, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base62::encode(self.as_bytes()))
    }
}

impl<E: Engine, M> std::str::FromStr for EncryptedToken<E, M> {
    type Err = BrancaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // alphabet is checked before anything looks at the length
        let wire = base62::decode(s)?;
        Self::from_bytes(wire)
    }
}

#[cfg(feature = "serde")]
impl<E: Engine, M> serde_core::Serialize for EncryptedToken<E, M> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde_core::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de, E: Engine, M> serde_core::Deserialize<'de> for EncryptedToken<E, M> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde_core::Deserializer<'de>,
    {
        struct FromStrVisitor<E, M>(core::marker::PhantomData<(E, M)>);
        impl<'de, E: Engine, M> serde_core::de::Visitor<'de> for FromStrVisitor<E, M> {
            type Value = EncryptedToken<E, M>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a base62 branca token")
            }

            fn visit_str<Err>(self, v: &str) -> Result<Self::Value, Err>
            where
                Err: serde_core::de::Error,
            {
                v.parse().map_err(Err::custom)
            }
        }
        deserializer.deserialize_str(FromStrVisitor(core::marker::PhantomData))
    }
}
