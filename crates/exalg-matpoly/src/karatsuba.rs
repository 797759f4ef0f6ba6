//! Karatsuba polynomial-matrix multiplication.
//!
//! Divide-and-conquer with three recursive sub-products instead of four:
//! low*low, high*high, and (low+high)*(low+high), from which the middle
//! cross-term is recovered by subtraction. Only ring operations are used,
//! so the backend applies to every coefficient domain; it is the
//! workhorse for degrees too small to amortize an NTT.
//!
//! The mid-products use a separate recursion tailored to half-sized
//! output windows (Hanrot-Quercia-Zimmermann style): the window of `b*c`
//! is assembled from three recursive windowed products `alpha`, `beta`,
//! `gamma` over halves of `b` and overlapping slices of `c`.

use exalg_linalg::{DenseMatrix, MatrixDomain};
use exalg_rings::Domain;

use crate::polynomial::PolyMatrix;

/// Karatsuba backend.
#[derive(Clone, Debug)]
pub struct KaratsubaMul<D: Domain> {
    md: MatrixDomain<D>,
}

impl<D: Domain> KaratsubaMul<D> {
    /// Creates the backend for a domain.
    #[must_use]
    pub fn new(domain: D) -> Self {
        Self {
            md: MatrixDomain::new(domain),
        }
    }

    fn domain(&self) -> &D {
        self.md.domain()
    }

    /// Full product of `b` and `c` into `a`.
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
        self.mul_rec(a.coeffs_mut(), b.coeffs(), c.coeffs());
    }

    /// Balanced mid-product: the window `[|a|-1, 2|a|-2]` of `b * c`.
    ///
    /// # Panics
    ///
    /// Panics unless `2|a| = |c| + 1` and `2|b| = |c| + 1`.
    pub fn midproduct(&self, a: &mut PolyMatrix<D>, b: &PolyMatrix<D>, c: &PolyMatrix<D>) {
        assert_eq!(2 * a.len(), c.len() + 1, "midproduct output size");
        assert_eq!(2 * b.len(), c.len() + 1, "midproduct operand size");
        self.midp_rec(a.coeffs_mut(), b.coeffs(), c.coeffs());
    }

    /// Unbalanced mid-product: the window `[|b|-1, |c|-1]` of `b * c`.
    ///
    /// # Panics
    ///
    /// Panics unless `|a| + |b| = |c| + 1`.
    pub fn midproduct_gen(&self, a: &mut PolyMatrix<D>, b: &PolyMatrix<D>, c: &PolyMatrix<D>) {
        assert_eq!(a.len() + b.len(), c.len() + 1, "midproduct_gen sizes");
        self.midp_gen_rec(a.coeffs_mut(), b.coeffs(), c.coeffs());
    }

    /// Recursive 3-product split. `out` must cover
    /// `b.len() + c.len() - 1` pre-zeroed (or previously untouched)
    /// coefficients; base cases overwrite their slots, cross-terms
    /// accumulate.
    fn mul_rec(&self, out: &mut [DenseMatrix<D>], b: &[DenseMatrix<D>], c: &[DenseMatrix<D>]) {
        if b.len() == 1 {
            for (i, ci) in c.iter().enumerate() {
                self.md.mul(&mut out[i], &b[0], ci);
            }
            return;
        }
        if c.len() == 1 {
            for (i, bi) in b.iter().enumerate() {
                self.md.mul(&mut out[i], bi, &c[0]);
            }
            return;
        }

        let half_b = (b.len() + 1) / 2;
        let half_c = (c.len() + 1) / 2;
        let split = half_b.max(half_c);

        let (b_low, b_high) = b.split_at(split.min(b.len()));
        let (c_low, c_high) = c.split_at(split.min(c.len()));
        let (lb, lc) = (b_low.len(), c_low.len());
        let (hb, hc) = (b_high.len(), c_high.len());

        // low and high sub-products land in disjoint output ranges
        self.mul_rec(&mut out[..lb + lc - 1], b_low, c_low);
        if hb != 0 && hc != 0 {
            self.mul_rec(&mut out[2 * split..2 * split + hb + hc - 1], b_high, c_high);
        }

        // sum the low and high halves of each operand
        let mut b_sum = b_low.to_vec();
        for (i, hi) in b_high.iter().enumerate() {
            self.md.add_in(&mut b_sum[i], hi);
        }
        let mut c_sum = c_low.to_vec();
        for (i, hi) in c_high.iter().enumerate() {
            self.md.add_in(&mut c_sum[i], hi);
        }

        // (low+high) * (low+high) in a transient buffer
        let mut cross: Vec<DenseMatrix<D>> = (0..lb + lc - 1)
            .map(|_| DenseMatrix::zeros(self.domain(), out[0].num_rows(), out[0].num_cols()))
            .collect();
        self.mul_rec(&mut cross, &b_sum, &c_sum);

        // peel off the low and high products, leaving the middle term
        for (i, x) in cross.iter_mut().enumerate() {
            self.md.sub_in(x, &out[i]);
        }
        if hb != 0 && hc != 0 {
            for i in 0..hb + hc - 1 {
                self.md.sub_in(&mut cross[i], &out[2 * split + i]);
            }
        }

        let mid = (lb + hc).max(lc + hb);
        for i in 0..mid - 1 {
            self.md.add_in(&mut out[split + i], &cross[i]);
        }
    }

    /// Balanced windowed recursion: `out.len() == b.len()` and
    /// `c.len() == 2*b.len() - 1`; fully overwrites `out`.
    fn midp_rec(&self, out: &mut [DenseMatrix<D>], b: &[DenseMatrix<D>], c: &[DenseMatrix<D>]) {
        debug_assert_eq!(out.len(), b.len());
        debug_assert_eq!(c.len(), 2 * b.len() - 1);

        if b.len() == 1 {
            self.md.mul(&mut out[0], &b[0], &c[0]);
            return;
        }

        let k0 = b.len() / 2;
        let k1 = b.len() - k0;
        let (rows, cols) = (out[0].num_rows(), out[0].num_cols());
        let (crows, ccols) = (c[0].num_rows(), c[0].num_cols());

        let b_low = &b[..k0];
        let mut b_high = b[k0..].to_vec();

        // c1[i] = c[i] + c[i+k1], c2 = c shifted by k1
        let mut c1 = Vec::with_capacity(2 * k1 - 1);
        for i in 0..2 * k1 - 1 {
            let mut s = DenseMatrix::zeros(self.domain(), crows, ccols);
            self.md.add(&mut s, &c[i], &c[i + k1]);
            c1.push(s);
        }
        let c2 = &c[k1..3 * k1 - 1];

        let mut alpha = self.zero_seq(k1, rows, cols);
        self.midp_rec(&mut alpha, &b_high, &c1);

        // high part minus low part, alignment depending on parity
        if k0 == k1 {
            for i in 0..k1 {
                self.md.sub_in(&mut b_high[i], &b_low[i]);
            }
        } else {
            for i in 1..k1 {
                self.md.sub_in(&mut b_high[i], &b_low[i - 1]);
            }
        }
        let mut beta = self.zero_seq(k1, rows, cols);
        self.midp_rec(&mut beta, &b_high, c2);

        // c3[i] = c[i+2*k1] + c[i+k1]
        let mut c3 = Vec::with_capacity(2 * k0 - 1);
        for i in 0..2 * k0 - 1 {
            let mut s = DenseMatrix::zeros(self.domain(), crows, ccols);
            self.md.add(&mut s, &c[i + 2 * k1], &c[i + k1]);
            c3.push(s);
        }
        let mut gamma = self.zero_seq(k0, rows, cols);
        self.midp_rec(&mut gamma, b_low, &c3);

        for i in 0..k1 {
            self.md.sub(&mut out[i], &alpha[i], &beta[i]);
        }
        for i in 0..k0 {
            self.md.add(&mut out[k1 + i], &gamma[i], &beta[i]);
        }
    }

    /// Unbalanced windowed recursion: `out.len() == c.len()+1-b.len()`;
    /// fully overwrites `out`.
    fn midp_gen_rec(&self, out: &mut [DenseMatrix<D>], b: &[DenseMatrix<D>], c: &[DenseMatrix<D>]) {
        debug_assert_eq!(out.len() + b.len(), c.len() + 1);

        if b.len() == 1 {
            for (i, ci) in c.iter().enumerate() {
                self.md.mul(&mut out[i], &b[0], ci);
            }
            return;
        }
        if out.len() == 1 {
            // single windowed coefficient; the split below would read past
            // the end of c when b has odd length
            self.md.zero_out(&mut out[0]);
            for (u, bu) in b.iter().enumerate() {
                self.md.axpy_in(&mut out[0], bu, &c[b.len() - 1 - u]);
            }
            return;
        }

        let ak0 = b.len() / 2;
        let ak1 = b.len() - ak0;
        let bk0 = out.len() / 2;
        let bk1 = out.len() - bk0;
        let (rows, cols) = (out[0].num_rows(), out[0].num_cols());
        let (crows, ccols) = (c[0].num_rows(), c[0].num_cols());

        let b_low = &b[..ak0];
        let mut b_high = b[ak0..].to_vec();

        let c1_len = ak1 + bk1 - 1;
        let mut c1 = Vec::with_capacity(c1_len);
        for i in 0..c1_len {
            let mut s = DenseMatrix::zeros(self.domain(), crows, ccols);
            self.md.add(&mut s, &c[i], &c[i + ak1]);
            c1.push(s);
        }
        let c2 = &c[ak1..ak1 + c1_len];

        let mut alpha = self.zero_seq(bk1, rows, cols);
        self.midp_gen_rec(&mut alpha, &b_high, &c1);

        if ak0 == ak1 {
            for i in 0..ak1 {
                self.md.sub_in(&mut b_high[i], &b_low[i]);
            }
        } else {
            for i in 1..ak1 {
                self.md.sub_in(&mut b_high[i], &b_low[i - 1]);
            }
        }
        let mut beta = self.zero_seq(bk1, rows, cols);
        self.midp_gen_rec(&mut beta, &b_high, c2);

        let mut gamma = self.zero_seq(bk0.max(1), rows, cols);
        if bk0 > 0 {
            let c3_len = ak0 + bk0 - 1;
            let mut c3 = Vec::with_capacity(c3_len);
            for i in 0..c3_len {
                let mut s = DenseMatrix::zeros(self.domain(), crows, ccols);
                self.md.add(&mut s, &c[i + ak0 + bk1], &c[i + ak0]);
                c3.push(s);
            }
            self.midp_gen_rec(&mut gamma, b_low, &c3);
        }

        for i in 0..bk1 {
            self.md.sub(&mut out[i], &alpha[i], &beta[i]);
        }
        for i in 0..bk0 {
            self.md.add(&mut out[bk1 + i], &gamma[i], &beta[i]);
        }
    }

    fn zero_seq(&self, len: usize, rows: usize, cols: usize) -> Vec<DenseMatrix<D>> {
        (0..len)
            .map(|_| DenseMatrix::zeros(self.domain(), rows, cols))
            .collect()
    }
}
