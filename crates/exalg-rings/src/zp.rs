//! The prime field Z_p with a runtime modulus.

use std::fmt;

use crate::integer::Integer;
use crate::traits::{Domain, FieldDomain, PrimeDomain};

/// The prime field Z_p for an odd prime `p < 2^63`.
///
/// The modulus is a runtime value so that fields over freshly generated
/// FFT primes can be created on the fly. Elements are canonical `u64`
/// representatives in `[0, p)`; products go through `u128` to avoid
/// overflow.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Zp {
    p: u64,
}

impl Zp {
    /// Creates the field Z_p.
    ///
    /// # Panics
    ///
    /// Panics if `p` is not an odd number at least 3 or does not fit in
    /// 63 bits. Primality is the caller's responsibility.
    #[must_use]
    pub fn new(p: u64) -> Self {
        assert!(p >= 3 && p & 1 == 1, "modulus must be an odd prime");
        assert!(p < 1 << 63, "modulus must fit in 63 bits");
        Self { p }
    }

    /// Returns the modulus.
    #[must_use]
    pub const fn modulus(self) -> u64 {
        self.p
    }

    /// Reduces an arbitrary `u64` into the field.
    #[must_use]
    pub const fn reduce(self, value: u64) -> u64 {
        value % self.p
    }

    /// Computes `base^exp` by binary exponentiation.
    #[must_use]
    pub fn pow(self, base: u64, mut exp: u64) -> u64 {
        let mut base = self.reduce(base);
        let mut result = 1u64;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.mul_raw(result, base);
            }
            base = self.mul_raw(base, base);
            exp >>= 1;
        }
        result
    }

    #[inline]
    fn mul_raw(self, a: u64, b: u64) -> u64 {
        ((u128::from(a) * u128::from(b)) % u128::from(self.p)) as u64
    }
}

impl fmt::Display for Zp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Z_{}", self.p)
    }
}

impl Domain for Zp {
    type Element = u64;

    fn zero(&self) -> u64 {
        0
    }

    fn one(&self) -> u64 {
        1
    }

    fn is_zero(&self, a: &u64) -> bool {
        *a == 0
    }

    fn add(&self, a: &u64, b: &u64) -> u64 {
        let s = a + b;
        if s >= self.p {
            s - self.p
        } else {
            s
        }
    }

    fn sub(&self, a: &u64, b: &u64) -> u64 {
        if a >= b {
            a - b
        } else {
            self.p + a - b
        }
    }

    fn mul(&self, a: &u64, b: &u64) -> u64 {
        self.mul_raw(*a, *b)
    }

    fn neg(&self, a: &u64) -> u64 {
        if *a == 0 {
            0
        } else {
            self.p - a
        }
    }

    fn characteristic(&self) -> u64 {
        self.p
    }
}

impl FieldDomain for Zp {
    /// Extended Euclidean inversion.
    fn inv(&self, a: &u64) -> Option<u64> {
        if *a == 0 {
            return None;
        }
        let mut t = 0i128;
        let mut new_t = 1i128;
        let mut r = i128::from(self.p);
        let mut new_r = i128::from(*a);
        while new_r != 0 {
            let quotient = r / new_r;
            (t, new_t) = (new_t, t - quotient * new_t);
            (r, new_r) = (new_r, r - quotient * new_r);
        }
        if r > 1 {
            return None;
        }
        if t < 0 {
            t += i128::from(self.p);
        }
        Some(t as u64)
    }
}

impl PrimeDomain for Zp {
    fn to_canonical(&self, a: &u64) -> u64 {
        *a
    }

    fn from_u64(&self, value: u64) -> u64 {
        self.reduce(value)
    }

    fn from_integer(&self, value: &Integer) -> u64 {
        value % self.p
    }
}
