//! The matrix arithmetic service.
//!
//! `MatrixDomain` bundles a coefficient domain with the handful of dense
//! matrix operations the polynomial-matrix engine needs: product, axpy
//! accumulation, and entrywise add/sub/scale. Callers treat it as a black
//! box so a faster kernel can replace the schoolbook loops without
//! touching the engine.

use rayon::prelude::*;

use exalg_rings::Domain;

use crate::dense::DenseMatrix;

/// Dense matrix arithmetic over a coefficient domain.
#[derive(Clone, Debug)]
pub struct MatrixDomain<D: Domain> {
    domain: D,
}

impl<D: Domain> MatrixDomain<D> {
    /// Creates the service for a domain.
    #[must_use]
    pub fn new(domain: D) -> Self {
        Self { domain }
    }

    /// Returns the underlying coefficient domain.
    #[must_use]
    pub fn domain(&self) -> &D {
        &self.domain
    }

    /// Matrix product: `c = a * b` (overwrites `c`).
    ///
    /// # Panics
    ///
    /// Panics on dimension mismatch.
    pub fn mul(&self, c: &mut DenseMatrix<D>, a: &DenseMatrix<D>, b: &DenseMatrix<D>) {
        assert_eq!(a.num_cols(), b.num_rows(), "inner dimension mismatch");
        assert_eq!(c.num_rows(), a.num_rows());
        assert_eq!(c.num_cols(), b.num_cols());

        for i in 0..a.num_rows() {
            for j in 0..b.num_cols() {
                let mut sum = self.domain.zero();
                for k in 0..a.num_cols() {
                    let prod = self.domain.mul(&a[(i, k)], &b[(k, j)]);
                    self.domain.add_assign(&mut sum, &prod);
                }
                c[(i, j)] = sum;
            }
        }
    }

    /// Accumulating product: `acc += a * b`.
    ///
    /// # Panics
    ///
    /// Panics on dimension mismatch.
    pub fn axpy_in(&self, acc: &mut DenseMatrix<D>, a: &DenseMatrix<D>, b: &DenseMatrix<D>) {
        assert_eq!(a.num_cols(), b.num_rows(), "inner dimension mismatch");
        assert_eq!(acc.num_rows(), a.num_rows());
        assert_eq!(acc.num_cols(), b.num_cols());

        for i in 0..a.num_rows() {
            for j in 0..b.num_cols() {
                let mut sum = acc[(i, j)].clone();
                for k in 0..a.num_cols() {
                    let prod = self.domain.mul(&a[(i, k)], &b[(k, j)]);
                    self.domain.add_assign(&mut sum, &prod);
                }
                acc[(i, j)] = sum;
            }
        }
    }

    /// Entrywise sum: `c = a + b`.
    pub fn add(&self, c: &mut DenseMatrix<D>, a: &DenseMatrix<D>, b: &DenseMatrix<D>) {
        Self::check_same_shape(a, b);
        Self::check_same_shape(c, a);
        for (ci, (ai, bi)) in c.data_mut().iter_mut().zip(a.data().iter().zip(b.data())) {
            *ci = self.domain.add(ai, bi);
        }
    }

    /// Entrywise difference: `c = a - b`.
    pub fn sub(&self, c: &mut DenseMatrix<D>, a: &DenseMatrix<D>, b: &DenseMatrix<D>) {
        Self::check_same_shape(a, b);
        Self::check_same_shape(c, a);
        for (ci, (ai, bi)) in c.data_mut().iter_mut().zip(a.data().iter().zip(b.data())) {
            *ci = self.domain.sub(ai, bi);
        }
    }

    /// In-place entrywise sum: `a += b`.
    pub fn add_in(&self, a: &mut DenseMatrix<D>, b: &DenseMatrix<D>) {
        Self::check_same_shape(a, b);
        for (ai, bi) in a.data_mut().iter_mut().zip(b.data()) {
            self.domain.add_assign(ai, bi);
        }
    }

    /// In-place entrywise difference: `a -= b`.
    pub fn sub_in(&self, a: &mut DenseMatrix<D>, b: &DenseMatrix<D>) {
        Self::check_same_shape(a, b);
        for (ai, bi) in a.data_mut().iter_mut().zip(b.data()) {
            self.domain.sub_assign(ai, bi);
        }
    }

    /// In-place scalar multiply: `a *= s` entrywise.
    pub fn scale_in(&self, a: &mut DenseMatrix<D>, s: &D::Element) {
        for ai in a.data_mut() {
            self.domain.mul_assign(ai, s);
        }
    }

    /// Resets every entry to zero.
    pub fn zero_out(&self, a: &mut DenseMatrix<D>) {
        for ai in a.data_mut() {
            *ai = self.domain.zero();
        }
    }

    /// Matrix product with row-parallel evaluation: `c = a * b`.
    ///
    /// # Panics
    ///
    /// Panics on dimension mismatch.
    pub fn mul_parallel(&self, c: &mut DenseMatrix<D>, a: &DenseMatrix<D>, b: &DenseMatrix<D>) {
        assert_eq!(a.num_cols(), b.num_rows(), "inner dimension mismatch");
        assert_eq!(c.num_rows(), a.num_rows());
        assert_eq!(c.num_cols(), b.num_cols());

        let cols = b.num_cols();
        c.data_mut()
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(i, row)| {
                for (j, cij) in row.iter_mut().enumerate() {
                    let mut sum = self.domain.zero();
                    for k in 0..a.num_cols() {
                        let prod = self.domain.mul(&a[(i, k)], &b[(k, j)]);
                        self.domain.add_assign(&mut sum, &prod);
                    }
                    *cij = sum;
                }
            });
    }

    fn check_same_shape(a: &DenseMatrix<D>, b: &DenseMatrix<D>) {
        assert_eq!(a.num_rows(), b.num_rows(), "row dimension mismatch");
        assert_eq!(a.num_cols(), b.num_cols(), "column dimension mismatch");
    }
}
