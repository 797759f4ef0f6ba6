//! # exalg-rings
//!
//! Coefficient domains for the exalg exact linear algebra library.
//!
//! This crate provides:
//! - The `Domain` trait hierarchy (ring, field, prime field) in a
//!   domain-object style: arithmetic lives on a domain value, elements
//!   are plain data
//! - `Zp`, a prime field with a runtime modulus fitting in a `u64`
//! - `Integer`, arbitrary precision integers wrapping `dashu`
//!
//! ## Why domain objects
//!
//! CRT-based multiplication discovers its auxiliary primes at runtime, so
//! moduli cannot be compile-time constants. A domain value carries the
//! modulus once and elements stay a bare `u64`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod traits;
pub mod zp;

pub use integer::Integer;
pub use traits::{Domain, FieldDomain, PrimeDomain};
pub use zp::Zp;
