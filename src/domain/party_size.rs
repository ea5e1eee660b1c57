//! Validated party size.
//!
//! [`PartySize`] is a positive integer. Zero and negative sizes are
//! rejected at construction, so the allocation engine never has to
//! reason about empty parties.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::ConciergeError;

/// Number of guests in a party. Always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PartySize(u32);

impl PartySize {
    /// Creates a `PartySize`, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::InvalidPartySize`] if `n` is 0.
    pub fn new(n: u32) -> Result<Self, ConciergeError> {
        if n == 0 {
            return Err(ConciergeError::InvalidPartySize(
                "party size must be at least 1".to_string(),
            ));
        }
        Ok(Self(n))
    }

    /// Returns the number of guests.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns `true` if a table with `seats` can hold this party.
    #[must_use]
    pub const fn fits(self, seats: u32) -> bool {
        self.0 <= seats
    }
}

impl fmt::Display for PartySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for PartySize {
    type Error = ConciergeError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        let n = u32::try_from(n)
            .map_err(|_| ConciergeError::InvalidPartySize(format!("{n} is out of range")))?;
        Self::new(n)
    }
}

impl TryFrom<f64> for PartySize {
    type Error = ConciergeError;

    fn try_from(n: f64) -> Result<Self, Self::Error> {
        if n.fract() != 0.0 || !n.is_finite() || n < 0.0 || n > f64::from(u32::MAX) {
            return Err(ConciergeError::InvalidPartySize(format!(
                "{n} is not a whole number of guests"
            )));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = n as u32;
        Self::new(whole)
    }
}

/// Model function calls sometimes encode integers as `2.0`; accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPartySize {
    Int(i64),
    Float(f64),
}

impl<'de> Deserialize<'de> for PartySize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match RawPartySize::deserialize(deserializer)? {
            RawPartySize::Int(n) => Self::try_from(n),
            RawPartySize::Float(n) => Self::try_from(n),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_rejected() {
        assert!(PartySize::new(0).is_err());
        assert!(PartySize::try_from(-3_i64).is_err());
    }

    #[test]
    fn fits_compares_against_seats() {
        let Ok(size) = PartySize::new(4) else {
            panic!("valid size");
        };
        assert!(size.fits(4));
        assert!(size.fits(6));
        assert!(!size.fits(2));
    }

    #[test]
    fn deserializes_whole_floats() {
        let parsed: Result<PartySize, _> = serde_json::from_str("2.0");
        let Ok(size) = parsed else {
            panic!("2.0 should parse");
        };
        assert_eq!(size.get(), 2);

        let fractional: Result<PartySize, _> = serde_json::from_str("2.5");
        assert!(fractional.is_err());
    }

    #[test]
    fn deserialize_rejects_zero_and_negative() {
        assert!(serde_json::from_str::<PartySize>("0").is_err());
        assert!(serde_json::from_str::<PartySize>("-1").is_err());
    }
}
