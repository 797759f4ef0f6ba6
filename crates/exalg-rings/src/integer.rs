//! Arbitrary precision integers.
//!
//! This module provides a wrapper around `dashu::IBig` with the
//! operations needed for multi-modular bounds and Chinese remaindering.

use dashu::base::BitTest;
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Rem, Shl, Sub, SubAssign};

/// An arbitrary precision integer.
///
/// This type wraps `dashu::IBig` and provides the operations needed for
/// CRT products and magnitude bounds.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Creates a new integer from a u64.
    #[must_use]
    pub fn from_u64(value: u64) -> Self {
        Self(IBig::from(value))
    }

    /// Returns the number of bits needed to represent this integer.
    #[must_use]
    pub fn bit_len(&self) -> usize {
        self.0.bit_len()
    }

    /// Converts to a `u64`.
    ///
    /// Returns `None` if the value is negative or does not fit.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        u64::try_from(&self.0).ok()
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == IBig::ZERO
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Integer {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Integer {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign<&Integer> for Integer {
    fn sub_assign(&mut self, rhs: &Integer) {
        self.0 -= &rhs.0;
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul<&Integer> for Integer {
    type Output = Integer;

    fn mul(self, rhs: &Integer) -> Integer {
        Integer(self.0 * &rhs.0)
    }
}

impl Mul<u64> for Integer {
    type Output = Self;

    fn mul(self, rhs: u64) -> Self::Output {
        Self(self.0 * IBig::from(rhs))
    }
}

impl Div for &Integer {
    type Output = Integer;

    fn div(self, rhs: Self) -> Integer {
        Integer(&self.0 / &rhs.0)
    }
}

impl Rem<&Integer> for &Integer {
    type Output = Integer;

    fn rem(self, rhs: &Integer) -> Integer {
        Integer(&self.0 % &rhs.0)
    }
}

impl Rem<u64> for &Integer {
    type Output = u64;

    fn rem(self, rhs: u64) -> u64 {
        u64::try_from(&self.0 % IBig::from(rhs)).unwrap_or(0)
    }
}

impl Shl<u32> for Integer {
    type Output = Self;

    fn shl(self, rhs: u32) -> Self::Output {
        Self(self.0 << rhs as usize)
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}
