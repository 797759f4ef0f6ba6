//! Error types for the multiplication engine.
//!
//! Sizing violations between the three polynomial buffers are programmer
//! errors and surface as panics at the call site; the variants here are
//! runtime conditions the caller may want to handle (typically by forcing
//! the Karatsuba backend for a hostile prime).

use thiserror::Error;

/// Runtime failures of the NTT backend.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MatPolyError {
    /// The field characteristic does not admit an NTT of the needed size.
    #[error("prime {prime} does not support an NTT of size {points}")]
    NotFftPrime {
        /// The field characteristic.
        prime: u64,
        /// The required transform size (power of two).
        points: u64,
    },

    /// The auxiliary FFT-prime search exhausted its attempt budget.
    #[error(
        "could not find FFT-friendly primes of {bits} bits with 2-adicity {two_adicity} \
         (product bound not reached after {attempts} attempts)"
    )]
    PrimeSearchFailed {
        /// Requested prime bit-length.
        bits: u32,
        /// Required power-of-two divisor of `p - 1`, as an exponent.
        two_adicity: u32,
        /// Number of candidates examined.
        attempts: usize,
    },

    /// The randomized generator search exhausted its attempt budget.
    #[error("no generator of the multiplicative group mod {prime} found after {attempts} attempts")]
    GeneratorSearchFailed {
        /// The field characteristic.
        prime: u64,
        /// Number of candidates examined.
        attempts: usize,
    },
}
