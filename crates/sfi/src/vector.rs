//! The SFI vector: a positive arbitrary-precision integer.
//!
//! A vector is the product of the primes assigned to a record's attribute
//! values. It grows with every attribute group, so it is never stored in a
//! fixed-width integer. The textual and serialized form is always a decimal
//! string.

use std::fmt::{self, Display};
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, SfiError};

/// A positive integer encoding a set of attribute values.
///
/// Zero is unrepresentable: every constructor rejects it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SfiVector(BigUint);

impl SfiVector {
    /// Wraps a big integer, rejecting zero.
    pub fn new(value: BigUint) -> Result<Self> {
        if value.is_zero() {
            return Err(SfiError::validation(
                "invalid SFI vector 0: must be a positive integer",
            ));
        }
        Ok(Self(value))
    }

    /// The empty product.
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// Multiplies this vector by a (non-zero) prime factor in place.
    pub(crate) fn mul_prime(&mut self, prime: u64) {
        debug_assert!(prime >= 2);
        self.0 *= prime;
    }

    /// Returns true if `divisor` divides this vector exactly.
    ///
    /// This is the whole filter predicate: one modulus per record.
    pub fn is_divisible_by(&self, divisor: &SfiVector) -> bool {
        (&self.0 % &divisor.0).is_zero()
    }

    /// Number of significant bits in the vector.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }
}

impl Display for SfiVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for SfiVector {
    type Err = SfiError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SfiError::validation(format!(
                "invalid SFI vector {s:?}: must be a positive integer"
            )));
        }
        let value = BigUint::parse_bytes(trimmed.as_bytes(), 10).ok_or_else(|| {
            SfiError::validation(format!("invalid SFI vector {s:?}: must be a positive integer"))
        })?;
        Self::new(value)
    }
}

impl TryFrom<u64> for SfiVector {
    type Error = SfiError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(BigUint::from(value))
    }
}

impl TryFrom<i64> for SfiVector {
    type Error = SfiError;

    fn try_from(value: i64) -> Result<Self> {
        let unsigned = u64::try_from(value).map_err(|_| {
            SfiError::validation(format!(
                "invalid SFI vector {value}: must be a positive integer"
            ))
        })?;
        Self::try_from(unsigned)
    }
}

impl From<SfiVector> for BigUint {
    fn from(vector: SfiVector) -> Self {
        vector.0
    }
}

impl Serialize for SfiVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for SfiVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SfiVectorVisitor)
    }
}

struct SfiVectorVisitor;

impl Visitor<'_> for SfiVectorVisitor {
    type Value = SfiVector;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a positive integer or a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<SfiVector, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<SfiVector, E> {
        SfiVector::try_from(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<SfiVector, E> {
        SfiVector::try_from(v).map_err(E::custom)
    }

    /// JSON integers beyond 64 bits arrive here as floats and have already
    /// lost precision.
    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<SfiVector, E> {
        if v.fract() == 0.0 && v >= 18_446_744_073_709_551_616.0 {
            return Err(E::custom(format!(
                "invalid SFI vector {v}: native JSON number exceeds 64 bits, store it as a decimal string"
            )));
        }
        Err(E::custom(format!(
            "invalid SFI vector {v}: must be an integer"
        )))
    }
}
