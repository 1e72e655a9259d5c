//! Encode attribute mappings into vectors and decode them back.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::assignment::PrimeAssignment;
use crate::error::{Result, SfiError, SfiWarning};
use crate::record::Attributes;
use crate::vector::SfiVector;

/// Placeholder for groups a decoded vector does not mention.
pub const UNKNOWN: &str = "Unknown";

/// How unmapped attributes and unrecognized factors are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Drop or report them as warnings; the operation succeeds.
    #[default]
    Lenient,
    /// Fail the operation.
    Strict,
}

/// Result of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub vector: SfiVector,
    pub warnings: Vec<SfiWarning>,
}

/// Result of [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub vector: SfiVector,
    /// Every catalog group, with [`UNKNOWN`] for those not represented.
    pub decoded: Attributes,
    pub warning: Option<SfiWarning>,
}

impl Decoded {
    /// True when every group was recovered and nothing was left over.
    pub fn is_complete(&self) -> bool {
        self.warning.is_none() && self.decoded.values().all(|v| v != UNKNOWN)
    }
}

/// Multiplies together the primes of every known pair in `attributes`.
///
/// Unknown pairs are skipped with a warning in lenient mode and rejected in
/// strict mode. An empty mapping encodes to 1.
pub fn encode(
    assignment: &PrimeAssignment,
    attributes: &Attributes,
    mode: MatchMode,
) -> Result<Encoded> {
    let mut vector = SfiVector::one();
    let mut warnings = Vec::new();

    for (group, value) in attributes {
        match assignment.prime_for(group, value) {
            Some(prime) => vector.mul_prime(prime),
            None => {
                let warning = unknown_attribute(group, value, mode)?;
                tracing::warn!(%group, %value, "unknown attribute during encoding");
                warnings.push(warning);
            }
        }
    }

    Ok(Encoded { vector, warnings })
}

/// Recovers the attribute mapping a vector encodes.
///
/// Scans the assigned primes in ascending order, dividing each one out
/// completely (so repeated factors in hand-crafted vectors are tolerated)
/// and stopping as soon as the remainder reaches 1. A remainder other than 1
/// means factors outside the assignment: a warning in lenient mode, an
/// error in strict mode.
///
/// The scan is linear in the number of assigned primes.
pub fn decode(assignment: &PrimeAssignment, vector: &SfiVector, mode: MatchMode) -> Result<Decoded> {
    let mut remaining = vector.as_biguint().clone();
    let mut decoded = Attributes::new();

    for (prime, attribute) in assignment.by_prime() {
        if remaining.is_one() {
            break;
        }
        let p = BigUint::from(prime);
        if (&remaining % &p).is_zero() {
            decoded.insert(attribute.group.clone(), attribute.value.clone());
            while (&remaining % &p).is_zero() {
                remaining /= &p;
            }
        }
    }

    let warning = if remaining.is_one() {
        None
    } else {
        let vector_text = vector.to_string();
        let remainder_text = remaining.to_string();
        if mode == MatchMode::Strict {
            return Err(SfiError::UnrecognizedFactors {
                vector: vector_text,
                remainder: remainder_text,
            });
        }
        tracing::warn!(
            vector = %vector_text,
            remainder = %remainder_text,
            "decode left unrecognized factors"
        );
        Some(SfiWarning::UnrecognizedFactor {
            vector: vector_text,
            remainder: remainder_text,
        })
    };

    for group in assignment.catalog().group_names() {
        decoded
            .entry(group.to_string())
            .or_insert_with(|| UNKNOWN.to_string());
    }

    Ok(Decoded {
        vector: vector.clone(),
        decoded,
        warning,
    })
}

/// Applies the match mode to a pair with no assigned prime.
pub(crate) fn unknown_attribute(group: &str, value: &str, mode: MatchMode) -> Result<SfiWarning> {
    match mode {
        MatchMode::Strict => Err(SfiError::UnknownAttribute {
            group: group.to_string(),
            value: value.to_string(),
        }),
        MatchMode::Lenient => Ok(SfiWarning::UnknownCriterion {
            group: group.to_string(),
            value: value.to_string(),
        }),
    }
}
