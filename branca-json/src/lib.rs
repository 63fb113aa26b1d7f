#![forbid(unsafe_code)]

use std::error::Error;

use branca_core::encodings::Payload;
use serde_core::Serialize;
use serde_core::de::DeserializeOwned;

/// `Json` is a type wrapper to implement [`Payload`] for all types that implement
/// [`serde_core::Serialize`] and [`serde_core::Deserialize`]
///
/// The payload is only parsed after the token has been authenticated, but you
/// should still parse into a known struct layout rather than arbitrary maps.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Json<T>(pub T);

impl<M: Serialize + DeserializeOwned> Payload for Json<M> {
    fn encode(self, out: &mut Vec<u8>) -> Result<(), Box<dyn Error + Send + Sync>> {
        serde_json::to_writer(out, &self.0).map_err(|err| Box::new(err) as _)
    }

    fn decode(payload: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>> {
        serde_json::from_slice(payload)
            .map_err(From::from)
            .map(Self)
    }
}
