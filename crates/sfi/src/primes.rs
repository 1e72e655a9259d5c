//! Deterministic prime source.

use crate::error::{Result, SfiError};

/// Returns the first `count` primes in ascending order, starting at 2.
///
/// Each candidate is trial-divided by the primes already found, up to its
/// integer square root. Pure and restartable: nothing is cached.
///
/// # Errors
///
/// Returns [`SfiError::Validation`] if `count` is zero.
///
/// # Examples
///
/// ```
/// assert_eq!(sfi::first_primes(5).unwrap(), vec![2, 3, 5, 7, 11]);
/// ```
pub fn first_primes(count: usize) -> Result<Vec<u64>> {
    if count == 0 {
        return Err(SfiError::validation(
            "prime count must be a positive integer",
        ));
    }

    let mut primes = Vec::with_capacity(count);
    let mut candidate: u64 = 2;
    while primes.len() < count {
        let limit = candidate.isqrt();
        let is_prime = primes
            .iter()
            .take_while(|&&p| p <= limit)
            .all(|&p| candidate % p != 0);
        if is_prime {
            primes.push(candidate);
        }
        candidate += 1;
    }
    Ok(primes)
}
