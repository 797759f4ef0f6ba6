//! Generation of FFT-friendly word-sized primes.
//!
//! Primes of the form `c * 2^l + 1` support radix-2 NTTs of length up to
//! `2^l`. The CRT path of [`crate::FftMul`] draws a stream of distinct
//! such primes until their product exceeds a coefficient bound.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use exalg_rings::Integer;

use crate::error::MatPolyError;

/// Candidate budget before prime search gives up.
const MAX_PRIME_ATTEMPTS: usize = 10_000;

/// Generator of random primes `p = c * 2^l + 1` with a prescribed bit
/// size and two-adicity `l` of `p - 1`.
#[derive(Clone, Debug)]
pub struct FftPrimeGen {
    bits: u32,
    two_adicity: u32,
    rng: ChaCha8Rng,
}

impl FftPrimeGen {
    /// Creates a generator of `bits`-bit primes whose `p - 1` is
    /// divisible by `2^two_adicity`.
    ///
    /// # Panics
    ///
    /// Panics unless `two_adicity + 2 <= bits <= 63`.
    #[must_use]
    pub fn new(bits: u32, two_adicity: u32, seed: u64) -> Self {
        assert!(bits <= 63, "prime size exceeds the word backend");
        assert!(
            two_adicity + 2 <= bits,
            "two-adicity {two_adicity} leaves no room for an odd cofactor in {bits} bits"
        );
        Self {
            bits,
            two_adicity,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Draws one random candidate `c * 2^l + 1` with an odd cofactor
    /// sized so the candidate has exactly `self.bits` bits.
    fn candidate(&mut self) -> u64 {
        let l = self.two_adicity;
        let c_bits = self.bits - l;
        let lo = 1u64 << (c_bits - 1);
        let hi = 1u64 << c_bits;
        let c = self.rng.gen_range(lo..hi) | 1;
        (c << l) + 1
    }

    /// Returns distinct primes whose product exceeds `bound`.
    ///
    /// # Errors
    ///
    /// Returns [`MatPolyError::PrimeSearchFailed`] if the candidate
    /// budget is exhausted first.
    pub fn generate_primes(&mut self, bound: &Integer) -> Result<Vec<u64>, MatPolyError> {
        let mut primes = Vec::new();
        let mut product = Integer::from_u64(1);
        for _ in 0..MAX_PRIME_ATTEMPTS {
            if &product > bound {
                return Ok(primes);
            }
            let p = self.candidate();
            if primes.contains(&p) || !is_prime_u64(p) {
                continue;
            }
            product = product * p;
            primes.push(p);
        }
        if &product > bound {
            return Ok(primes);
        }
        Err(MatPolyError::PrimeSearchFailed {
            bits: self.bits,
            two_adicity: self.two_adicity,
            attempts: MAX_PRIME_ATTEMPTS,
        })
    }
}

/// Deterministic Miller-Rabin for `u64`.
///
/// The first twelve primes form a complete witness set below `2^64`.
#[must_use]
pub fn is_prime_u64(n: u64) -> bool {
    const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];
    if n < 2 {
        return false;
    }
    for w in WITNESSES {
        if n == w {
            return true;
        }
        if n % w == 0 {
            return false;
        }
    }
    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'witness: for w in WITNESSES {
        let mut x = pow_mod(w, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

pub(crate) fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

pub(crate) fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut acc = 1u64;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    acc
}
