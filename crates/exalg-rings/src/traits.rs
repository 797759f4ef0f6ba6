//! Algebraic domain traits.
//!
//! Arithmetic is expressed on a *domain object* rather than on the
//! elements themselves: a `Domain` value carries the modulus (or other
//! runtime parameters) and its elements are plain data. This is what lets
//! the multiplication engine build fields over primes discovered at
//! runtime, which a const-generic modulus cannot express.

use std::fmt::Debug;

use crate::integer::Integer;

/// A commutative ring presented as a domain object.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative and commutative with identity `one()`
/// - Multiplication distributes over addition
/// - Every element has an additive inverse (`neg`)
pub trait Domain: Clone + Send + Sync {
    /// The element representation.
    type Element: Clone + PartialEq + Debug + Send + Sync;

    /// The additive identity.
    fn zero(&self) -> Self::Element;

    /// The multiplicative identity.
    fn one(&self) -> Self::Element;

    /// Returns true if `a` is the additive identity.
    fn is_zero(&self, a: &Self::Element) -> bool;

    /// Computes `a + b`.
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Computes `a - b`.
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Computes `a * b`.
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Computes `-a`.
    fn neg(&self, a: &Self::Element) -> Self::Element;

    /// In-place `a += b`.
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.add(a, b);
    }

    /// In-place `a -= b`.
    fn sub_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.sub(a, b);
    }

    /// In-place `a *= b`.
    fn mul_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = self.mul(a, b);
    }

    /// The characteristic of the domain (0 for characteristic zero).
    fn characteristic(&self) -> u64;
}

/// A field: a domain in which every non-zero element is invertible.
pub trait FieldDomain: Domain {
    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if the element is zero.
    fn inv(&self, a: &Self::Element) -> Option<Self::Element>;
}

/// A prime field whose elements have a canonical integer representation.
///
/// This is the capability the NTT backend requires: elements must be
/// readable as integers mod `p` so they can be reduced into auxiliary
/// fields and reconstructed by Chinese remaindering. Fields without this
/// capability (e.g. extension fields with a structured representation)
/// simply do not implement the trait and are served by the ring-only
/// backends.
pub trait PrimeDomain: FieldDomain {
    /// Returns the canonical representative in `[0, p)`.
    fn to_canonical(&self, a: &Self::Element) -> u64;

    /// Builds an element from an integer, reducing mod `p`.
    fn from_u64(&self, value: u64) -> Self::Element;

    /// Builds an element from a big integer, reducing mod `p`.
    ///
    /// The input must be non-negative.
    fn from_integer(&self, value: &Integer) -> Self::Element;
}
