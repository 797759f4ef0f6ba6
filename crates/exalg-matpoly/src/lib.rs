//! # exalg-matpoly
//!
//! Polynomial-matrix multiplication over finite fields.
//!
//! A polynomial matrix is an ordered sequence of same-shaped dense
//! matrices, index = power of the formal variable. This crate provides
//! three backends for multiplying them exactly:
//! - Schoolbook convolution, the baseline for tiny degrees
//! - Karatsuba divide-and-conquer, ring operations only
//! - NTT evaluation/interpolation, with a multi-modular CRT fallback when
//!   the working prime lacks enough 2-power roots of unity
//!
//! plus the degree-threshold dispatcher `PolyMatrixDomain` that selects
//! among them and exposes a uniform `mul` / `midproduct` /
//! `midproduct_gen` contract.
//!
//! ## Output convention
//!
//! All backends fully overwrite the caller's output buffer; callers never
//! pre-zero it. Buffers are never resized.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod classical;
pub mod domain;
pub mod error;
pub mod fft;
pub mod fft_prime;
pub mod karatsuba;
pub mod polynomial;

pub use classical::ClassicalMul;
pub use domain::{Backend, MulConfig, PolyMatrixDomain};
pub use error::MatPolyError;
pub use fft::{FftMul, PrimeFft};
pub use fft_prime::FftPrimeGen;
pub use karatsuba::KaratsubaMul;
pub use polynomial::PolyMatrix;

#[cfg(test)]
mod proptests;
#[cfg(test)]
mod tests;
