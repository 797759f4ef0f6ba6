//! Schoolbook polynomial-matrix multiplication.
//!
//! `O(|b| * |c|)` matrix products; the baseline every other backend is
//! checked against and the fallback for single-coefficient operands.

use exalg_linalg::MatrixDomain;
use exalg_rings::Domain;

use crate::polynomial::PolyMatrix;

/// Schoolbook convolution backend.
#[derive(Clone, Debug)]
pub struct ClassicalMul<D: Domain> {
    md: MatrixDomain<D>,
}

impl<D: Domain> ClassicalMul<D> {
    /// Creates the backend for a domain.
    #[must_use]
    pub fn new(domain: D) -> Self {
        Self {
            md: MatrixDomain::new(domain),
        }
    }

    /// Full product: `a[i+j] = sum b[i] * c[j]`.
    ///
    /// # Panics
    ///
    /// Panics unless `a.len() >= b.len() + c.len() - 1`.
    pub fn mul(&self, a: &mut PolyMatrix<D>, b: &PolyMatrix<D>, c: &PolyMatrix<D>) {
        assert!(
            a.len() >= b.len() + c.len() - 1,
            "output too short: {} < {}",
            a.len(),
            b.len() + c.len() - 1
        );
        for coeff in a.coeffs_mut() {
            self.md.zero_out(coeff);
        }
        for i in 0..b.len() {
            for j in 0..c.len() {
                self.md.axpy_in(&mut a[i + j], &b[i], &c[j]);
            }
        }
    }

    /// Balanced mid-product: the window `[|a|-1, 2|a|-2]` of the full
    /// product of `b` and `c`.
    ///
    /// # Panics
    ///
    /// Panics unless `2|a| = |c| + 1` and `2|b| = |c| + 1`.
    pub fn midproduct(&self, a: &mut PolyMatrix<D>, b: &PolyMatrix<D>, c: &PolyMatrix<D>) {
        assert_eq!(2 * a.len(), c.len() + 1, "midproduct output size");
        assert_eq!(2 * b.len(), c.len() + 1, "midproduct operand size");
        self.windowed(a, b, c, a.len() - 1);
    }

    /// Unbalanced mid-product: the window `[|b|-1, |c|-1]` of the full
    /// product of `b` and `c` (exactly `|a|` coefficients).
    ///
    /// # Panics
    ///
    /// Panics unless `|a| + |b| = |c| + 1`.
    pub fn midproduct_gen(&self, a: &mut PolyMatrix<D>, b: &PolyMatrix<D>, c: &PolyMatrix<D>) {
        assert_eq!(a.len() + b.len(), c.len() + 1, "midproduct_gen sizes");
        self.windowed(a, b, c, b.len() - 1);
    }

    /// Accumulates the convolution terms whose index falls in
    /// `[lo, lo + a.len())`, shifted down by `lo`.
    fn windowed(&self, a: &mut PolyMatrix<D>, b: &PolyMatrix<D>, c: &PolyMatrix<D>, lo: usize) {
        let hi = lo + a.len();
        for coeff in a.coeffs_mut() {
            self.md.zero_out(coeff);
        }
        for i in 0..b.len() {
            for j in 0..c.len() {
                if i + j >= lo && i + j < hi {
                    self.md.axpy_in(&mut a[i + j - lo], &b[i], &c[j]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exalg_linalg::DenseMatrix;
    use exalg_rings::Zp;

    fn scalar_poly(f: &Zp, values: &[u64]) -> PolyMatrix<Zp> {
        PolyMatrix::from_coeffs(
            values
                .iter()
                .map(|&v| DenseMatrix::from_rows(vec![vec![f.reduce(v)]]))
                .collect(),
        )
    }

    #[test]
    fn test_scalar_convolution() {
        let f = Zp::new(13);
        let engine = ClassicalMul::new(f);
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        let b = scalar_poly(&f, &[1, 2]);
        let c = scalar_poly(&f, &[3, 4]);
        let mut a = PolyMatrix::zeros(&f, 1, 1, 3);
        engine.mul(&mut a, &b, &c);
        assert_eq!(a[0][(0, 0)], 3);
        assert_eq!(a[1][(0, 0)], 10);
        assert_eq!(a[2][(0, 0)], 8);
    }

    #[test]
    fn test_overwrites_stale_output() {
        let f = Zp::new(13);
        let engine = ClassicalMul::new(f);
        let b = scalar_poly(&f, &[1]);
        let c = scalar_poly(&f, &[1]);
        let mut a = scalar_poly(&f, &[7, 7, 7]);
        engine.mul(&mut a, &b, &c);
        assert_eq!(a[0][(0, 0)], 1);
        // oversized tail is zeroed, not left stale
        assert_eq!(a[1][(0, 0)], 0);
        assert_eq!(a[2][(0, 0)], 0);
    }

    #[test]
    fn test_identity_scaling() {
        let f = Zp::new(13);
        let engine = ClassicalMul::new(f);
        // [I, I] * [I, I] = [I, 2I, I]
        let id = DenseMatrix::identity(&f, 2);
        let b = PolyMatrix::from_coeffs(vec![id.clone(), id.clone()]);
        let c = b.clone();
        let mut a = PolyMatrix::zeros(&f, 2, 2, 3);
        engine.mul(&mut a, &b, &c);
        for i in 0..2 {
            for j in 0..2 {
                let d = u64::from(i == j);
                assert_eq!(a[0][(i, j)], d);
                assert_eq!(a[1][(i, j)], 2 * d);
                assert_eq!(a[2][(i, j)], d);
            }
        }
    }

    #[test]
    fn test_midproduct_window() {
        let f = Zp::new(13);
        let engine = ClassicalMul::new(f);
        // b = 1 + 2x, c = 1 + x + x^2: full product 1 + 3x + 3x^2 + 2x^3,
        // window [1, 2] -> [3, 3]
        let b = scalar_poly(&f, &[1, 2]);
        let c = scalar_poly(&f, &[1, 1, 1]);
        let mut a = PolyMatrix::zeros(&f, 1, 1, 2);
        engine.midproduct(&mut a, &b, &c);
        assert_eq!(a[0][(0, 0)], 3);
        assert_eq!(a[1][(0, 0)], 3);
    }

    #[test]
    fn test_midproduct_gen_window() {
        let f = Zp::new(13);
        let engine = ClassicalMul::new(f);
        // b = 1 + x (len 2), c = 1 + 2x + 3x^2 + 4x^3 (len 4), a len 3.
        // Full product: 1 + 3x + 5x^2 + 7x^3 + 4x^4; window [1, 3] -> [3, 5, 7]
        let b = scalar_poly(&f, &[1, 1]);
        let c = scalar_poly(&f, &[1, 2, 3, 4]);
        let mut a = PolyMatrix::zeros(&f, 1, 1, 3);
        engine.midproduct_gen(&mut a, &b, &c);
        assert_eq!(a[0][(0, 0)], 3);
        assert_eq!(a[1][(0, 0)], 5);
        assert_eq!(a[2][(0, 0)], 7);
    }
}
