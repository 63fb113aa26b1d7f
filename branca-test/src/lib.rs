//! Shared fixtures for the Branca test suites.

use std::fmt;

use branca_core::BrancaError;
use rand::rand_core::impls::{next_u32_via_fill, next_u64_via_fill};
use rand::rand_core::{self};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// The key used by every published Branca test vector.
pub const TEST_KEY: &[u8; 32] = b"supersecretkeyyoushouldnotcommit";

/// The nonce used by the published encoding vectors.
pub const TEST_NONCE: [u8; 24] = [
    0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, //
    0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c,
];

pub fn read_vectors<T: DeserializeOwned>(v: &str) -> VectorFile<T> {
    let path = format!("tests/vectors/{v}");
    let file = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&file).unwrap()
}

#[derive(Deserialize)]
pub struct VectorFile<T> {
    pub vectors: Vec<Vector<T>>,
}

#[derive(Deserialize)]
pub struct Vector<T> {
    pub name: String,
    #[serde(flatten)]
    pub data: T,
}

/// The error a failing vector is expected to produce.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedError {
    InvalidEncoding,
    InvalidVersion,
    InvalidToken,
    TokenExpired,
}

impl ExpectedError {
    pub fn matches(self, err: &BrancaError) -> bool {
        matches!(
            (self, err),
            (ExpectedError::InvalidEncoding, BrancaError::InvalidEncoding)
                | (ExpectedError::InvalidVersion, BrancaError::InvalidVersion)
                | (ExpectedError::InvalidToken, BrancaError::InvalidToken)
                | (ExpectedError::TokenExpired, BrancaError::TokenExpired)
        )
    }
}

#[derive(Clone, Debug)]
/// Replays fixed bytes as randomness, so a nonce can be injected through the
/// same path as a real random source.
pub struct FixedRng<const N: usize> {
    bytes: [u8; N],
    start: usize,
}

impl<const N: usize> FixedRng<N> {
    pub fn new(bytes: [u8; N]) -> Self {
        Self { bytes, start: 0 }
    }
}

impl<const N: usize> rand_core::RngCore for FixedRng<N> {
    fn next_u32(&mut self) -> u32 {
        next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        let end = self.start + dest.len();
        assert!(end <= N, "not enough entropy");
        dest.copy_from_slice(&self.bytes[self.start..end]);
        self.start = end;
    }
}

// not really
impl<const N: usize> rand_core::CryptoRng for FixedRng<N> {}

/// A random source that always fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrokenRng;

#[derive(Debug)]
pub struct RngUnavailable;

impl fmt::Display for RngUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("random source unavailable")
    }
}

impl std::error::Error for RngUnavailable {}

impl rand_core::TryRngCore for BrokenRng {
    type Error = RngUnavailable;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Err(RngUnavailable)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Err(RngUnavailable)
    }

    fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), Self::Error> {
        Err(RngUnavailable)
    }
}

impl rand_core::TryCryptoRng for BrokenRng {}
