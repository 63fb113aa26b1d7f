//! Checks applied to a token after it has been authenticated.

use crate::BrancaError;
use crate::header::Header;

pub trait Validate {
    /// The validation to perform on an authenticated header
    fn validate(&self, header: &Header) -> Result<(), BrancaError>;
}

/// No age limit.
impl Validate for () {
    fn validate(&self, _: &Header) -> Result<(), BrancaError> {
        Ok(())
    }
}

/// Validates only when set.
impl<T: Validate> Validate for Option<T> {
    fn validate(&self, header: &Header) -> Result<(), BrancaError> {
        match self {
            Some(v) => v.validate(header),
            None => Ok(()),
        }
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn validate(&self, header: &Header) -> Result<(), BrancaError> {
        T::validate(self, header)
    }
}

/// Rejects tokens older than a time-to-live.
///
/// A token created at `t` with a ttl of `d` is accepted while `now <= t + d`.
#[derive(Clone, Copy, Debug)]
pub struct Ttl {
    ttl: u32,
    now: u64,
}

impl Ttl {
    pub fn valid_now(ttl: u32) -> Self {
        Self::valid_at(ttl, unix_now())
    }

    /// Check against `now`, in seconds since the Unix epoch, instead of the system clock.
    pub fn valid_at(ttl: u32, now: u64) -> Self {
        Self { ttl, now }
    }
}

impl Validate for Ttl {
    fn validate(&self, header: &Header) -> Result<(), BrancaError> {
        let expiry = u64::from(header.timestamp()) + u64::from(self.ttl);
        if expiry < self.now {
            return Err(BrancaError::TokenExpired);
        }
        Ok(())
    }
}

/// The current time as a token timestamp.
///
/// Times outside the `u32` range saturate: before the epoch is `0`, after
/// 2106-02-07 is `u32::MAX`.
pub fn current_timestamp() -> u32 {
    u32::try_from(unix_now()).unwrap_or(u32::MAX)
}

fn unix_now() -> u64 {
    u64::try_from(jiff::Timestamp::now().as_second()).unwrap_or(0)
}
