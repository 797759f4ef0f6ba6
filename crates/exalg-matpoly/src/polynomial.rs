//! Polynomial matrices.
//!
//! A polynomial matrix is a sequence of same-shaped dense coefficient
//! matrices; index = power of the formal variable, so index 0 is the
//! constant term and the degree is `len() - 1`.

use std::ops::{Index, IndexMut};

use exalg_linalg::DenseMatrix;
use exalg_rings::Domain;

/// A polynomial with dense matrix coefficients.
///
/// Every coefficient shares the same `rows x cols` shape; this invariant
/// is checked on construction and push.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyMatrix<D: Domain> {
    coeffs: Vec<DenseMatrix<D>>,
    rows: usize,
    cols: usize,
}

impl<D: Domain> PolyMatrix<D> {
    /// Creates a polynomial of `len` zero coefficients of shape
    /// `rows x cols`.
    #[must_use]
    pub fn zeros(domain: &D, rows: usize, cols: usize, len: usize) -> Self {
        assert!(len > 0, "polynomial needs at least one coefficient");
        Self {
            coeffs: (0..len).map(|_| DenseMatrix::zeros(domain, rows, cols)).collect(),
            rows,
            cols,
        }
    }

    /// Creates a polynomial from its coefficient sequence.
    ///
    /// # Panics
    ///
    /// Panics if `coeffs` is empty or the coefficients disagree in shape.
    #[must_use]
    pub fn from_coeffs(coeffs: Vec<DenseMatrix<D>>) -> Self {
        let first = coeffs.first().expect("polynomial needs at least one coefficient");
        let (rows, cols) = (first.num_rows(), first.num_cols());
        for c in &coeffs {
            assert_eq!(c.num_rows(), rows, "coefficient row dimension mismatch");
            assert_eq!(c.num_cols(), cols, "coefficient column dimension mismatch");
        }
        Self { coeffs, rows, cols }
    }

    /// Number of coefficients (degree + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// Returns true if the polynomial has no coefficients.
    ///
    /// Construction forbids this, so it only holds for moved-from values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Degree of the polynomial (no trailing-zero normalization).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Row dimension of every coefficient.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column dimension of every coefficient.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Appends a coefficient.
    ///
    /// # Panics
    ///
    /// Panics if the shape disagrees with the existing coefficients.
    pub fn push(&mut self, coeff: DenseMatrix<D>) {
        assert_eq!(coeff.num_rows(), self.rows, "coefficient row dimension mismatch");
        assert_eq!(coeff.num_cols(), self.cols, "coefficient column dimension mismatch");
        self.coeffs.push(coeff);
    }

    /// The coefficients as a slice.
    #[must_use]
    pub fn coeffs(&self) -> &[DenseMatrix<D>] {
        &self.coeffs
    }

    /// The coefficients as a mutable slice.
    pub fn coeffs_mut(&mut self) -> &mut [DenseMatrix<D>] {
        &mut self.coeffs
    }

    /// Iterates over the coefficients.
    pub fn iter(&self) -> std::slice::Iter<'_, DenseMatrix<D>> {
        self.coeffs.iter()
    }
}

impl<D: Domain> Index<usize> for PolyMatrix<D> {
    type Output = DenseMatrix<D>;

    fn index(&self, i: usize) -> &Self::Output {
        &self.coeffs[i]
    }
}

impl<D: Domain> IndexMut<usize> for PolyMatrix<D> {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.coeffs[i]
    }
}

impl<'a, D: Domain> IntoIterator for &'a PolyMatrix<D> {
    type Item = &'a DenseMatrix<D>;
    type IntoIter = std::slice::Iter<'a, DenseMatrix<D>>;

    fn into_iter(self) -> Self::IntoIter {
        self.coeffs.iter()
    }
}
