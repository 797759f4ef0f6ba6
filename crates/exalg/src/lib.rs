//! # Exalg
//!
//! Exact linear algebra over finite fields, built around a
//! polynomial-matrix multiplication engine.
//!
//! ## Features
//!
//! - **Exact Arithmetic**: Word-sized prime fields and arbitrary
//!   precision integers, no floating-point rounding anywhere
//! - **Three Backends**: Schoolbook, Karatsuba, and NTT evaluation
//!   selected by degree thresholds
//! - **Multi-Modular Fallback**: Fields without enough 2-power roots of
//!   unity are served through FFT-friendly auxiliary primes and Chinese
//!   remaindering
//! - **Mid-Products**: Half-size windowed products for iterative
//!   approximant algorithms
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use exalg::prelude::*;
//!
//! let f = Zp::new(998_244_353);
//! let engine = PolyMatrixDomain::new(f);
//! let mut a = PolyMatrix::zeros(&f, 2, 2, 3);
//! let b = PolyMatrix::from_coeffs(vec![DenseMatrix::identity(&f, 2); 2]);
//! engine.mul(&mut a, &b, &b)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use exalg_linalg as linalg;
pub use exalg_matpoly as matpoly;
pub use exalg_rings as rings;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use exalg_linalg::{DenseMatrix, MatrixDomain};
    pub use exalg_matpoly::{
        Backend, FftMul, KaratsubaMul, MatPolyError, MulConfig, PolyMatrix, PolyMatrixDomain,
    };
    pub use exalg_rings::{Domain, FieldDomain, Integer, PrimeDomain, Zp};
}
