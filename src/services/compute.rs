//! Numeric operations: Fibonacci, prime filter, LCM, HCF.
//!
//! DESIGN
//! ======
//! Pure functions over request integers. Each returns a [`ComputeError`]
//! for inputs it refuses, and every variant is a caller-side validation
//! failure. Arithmetic is checked; overflow is reported, never wrapped.

use crate::error::ErrorCode;

/// Largest `n` whose Fibonacci prefix fits in `u128` (F(186) is the last).
pub const MAX_FIBONACCI_TERMS: i64 = 187;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComputeError {
    #[error("Invalid fibonacci input")]
    NegativeFibonacci(i64),
    #[error("Fibonacci input too large")]
    FibonacciTooLarge(i64),
    #[error("Empty lcm input")]
    EmptyLcm,
    #[error("Empty hcf input")]
    EmptyHcf,
    #[error("LCM result too large")]
    LcmOverflow,
    #[error("HCF result too large")]
    HcfOverflow,
}

impl ErrorCode for ComputeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NegativeFibonacci(_) => "E_FIBONACCI_NEGATIVE",
            Self::FibonacciTooLarge(_) => "E_FIBONACCI_TOO_LARGE",
            Self::EmptyLcm => "E_LCM_EMPTY",
            Self::EmptyHcf => "E_HCF_EMPTY",
            Self::LcmOverflow => "E_LCM_OVERFLOW",
            Self::HcfOverflow => "E_HCF_OVERFLOW",
        }
    }
}

// =============================================================================
// FIBONACCI
// =============================================================================

/// First `n` Fibonacci numbers, starting `0, 1, 1, 2, ...`.
///
/// # Errors
///
/// [`ComputeError::NegativeFibonacci`] for `n < 0` and
/// [`ComputeError::FibonacciTooLarge`] past [`MAX_FIBONACCI_TERMS`].
pub fn fibonacci(n: i64) -> Result<Vec<u128>, ComputeError> {
    if n < 0 {
        return Err(ComputeError::NegativeFibonacci(n));
    }
    if n > MAX_FIBONACCI_TERMS {
        return Err(ComputeError::FibonacciTooLarge(n));
    }
    let len = usize::try_from(n).map_err(|_| ComputeError::FibonacciTooLarge(n))?;

    let mut out = Vec::with_capacity(len);
    let (mut a, mut b) = (0u128, 1u128);
    for _ in 0..len {
        out.push(a);
        // The successor of the last emitted term may not fit; it is never used.
        let next = a.checked_add(b).unwrap_or(u128::MAX);
        a = b;
        b = next;
    }
    Ok(out)
}

// =============================================================================
// PRIMES
// =============================================================================

/// Trial division up to `floor(sqrt(value))`.
///
/// O(sqrt(n)): a prime near `i64::MAX` takes about 3e9 divisions, run inline
/// on the calling task.
#[must_use]
pub fn is_prime(value: i64) -> bool {
    if value < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor <= value / divisor {
        if value % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Keep the primes of `values`, in input order.
#[must_use]
pub fn primes(values: &[i64]) -> Vec<i64> {
    values.iter().copied().filter(|&v| is_prime(v)).collect()
}

// =============================================================================
// LCM / HCF
// =============================================================================

/// Euclid's algorithm. Result is non-negative.
fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple by left fold from the first element.
///
/// # Errors
///
/// [`ComputeError::EmptyLcm`] for an empty slice and
/// [`ComputeError::LcmOverflow`] when the result leaves `i64`.
pub fn lcm(values: &[i64]) -> Result<i64, ComputeError> {
    let (&first, rest) = values.split_first().ok_or(ComputeError::EmptyLcm)?;
    let mut acc = i128::from(first);
    for &value in rest {
        let value = i128::from(value);
        let divisor = gcd(acc, value);
        acc = if divisor == 0 {
            0
        } else {
            acc.checked_mul(value)
                .ok_or(ComputeError::LcmOverflow)?
                .abs()
                / divisor
        };
        if i64::try_from(acc).is_err() {
            return Err(ComputeError::LcmOverflow);
        }
    }
    i64::try_from(acc).map_err(|_| ComputeError::LcmOverflow)
}

/// Highest common factor by left fold from the first element.
///
/// # Errors
///
/// [`ComputeError::EmptyHcf`] for an empty slice and
/// [`ComputeError::HcfOverflow`] when the result leaves `i64`.
pub fn hcf(values: &[i64]) -> Result<i64, ComputeError> {
    let (&first, rest) = values.split_first().ok_or(ComputeError::EmptyHcf)?;
    let acc = rest
        .iter()
        .fold(i128::from(first), |acc, &value| gcd(acc, i128::from(value)));
    i64::try_from(acc).map_err(|_| ComputeError::HcfOverflow)
}

#[cfg(test)]
#[path = "compute_test.rs"]
mod tests;
