//! # exalg-linalg
//!
//! Dense matrices over exact coefficient domains.
//!
//! This crate provides:
//! - `DenseMatrix`, a row-major dense matrix whose entries live in a
//!   coefficient `Domain`
//! - `MatrixDomain`, the narrow arithmetic service (multiply, axpy,
//!   add/sub in place) consumed by the polynomial-matrix engine
//! - Parallel matrix products via rayon

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod dense;
pub mod matrix_domain;

pub use dense::DenseMatrix;
pub use matrix_domain::MatrixDomain;
