//! NTT-based polynomial-matrix multiplication.
//!
//! [`PrimeFft`] evaluates both operands at the powers of a 2-power root
//! of unity, multiplies the resulting point matrices, and interpolates.
//! It requires the field characteristic `p` to satisfy `2^lpts | p - 1`
//! for the transform size `2^lpts` and reports [`MatPolyError::NotFftPrime`]
//! otherwise.
//!
//! [`FftMul`] wraps it with a multi-modular fallback: when `p - 1` lacks
//! the needed 2-power factor, the product is computed modulo a set of
//! FFT-friendly auxiliary primes whose product exceeds the coefficient
//! bound, then reconstructed by Chinese remaindering and reduced back
//! into the working field.
//!
//! The mid-products run the same machinery at roughly half the transform
//! size, `2^lpts >= |c| + 1`: operand `b` enters in reversed coefficient
//! order, `c` is evaluated with the inverse-root table, and the pointwise
//! product is carried back with the forward table. The result holds the
//! window coefficients directly at indices `0..|a|`, with no wraparound
//! because `|c| < 2^lpts`.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use exalg_linalg::{DenseMatrix, MatrixDomain};
use exalg_rings::{Domain, FieldDomain, Integer, PrimeDomain, Zp};

use crate::error::MatPolyError;
use crate::fft_prime::{mul_mod, pow_mod, FftPrimeGen};
use crate::polynomial::PolyMatrix;

/// Candidate budget for the root-of-unity generator search.
const MAX_GENERATOR_ATTEMPTS: usize = 200;

/// Single-prime NTT backend.
///
/// Construction finds, once, an element of order exactly `2^s` where
/// `p - 1 = 2^s * m` with `m` odd; every transform root is a power of it.
#[derive(Clone, Debug)]
pub struct PrimeFft<D: PrimeDomain> {
    md: MatrixDomain<D>,
    p: u64,
    two_adicity: u32,
    generator: u64,
}

/// Twiddle tables for one transform size.
struct Tables<D: PrimeDomain> {
    forward: Vec<D::Element>,
    inverse: Vec<D::Element>,
    inv_points: D::Element,
}

impl<D: PrimeDomain> PrimeFft<D> {
    /// Creates the backend, searching for a `2^s`-order element with a
    /// deterministic seeded draw.
    ///
    /// # Errors
    ///
    /// Returns [`MatPolyError::GeneratorSearchFailed`] if the bounded
    /// random search finds no suitable element (vanishingly unlikely for
    /// a prime characteristic).
    pub fn new(domain: D, seed: u64) -> Result<Self, MatPolyError> {
        let p = domain.characteristic();
        let s = (p - 1).trailing_zeros();
        let m = (p - 1) >> s;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..MAX_GENERATOR_ATTEMPTS {
            let g = rng.gen_range(1..p);
            let z = pow_mod(g, m, p);
            if z == 1 {
                continue;
            }
            // z has order 2^j for some 1 <= j <= s; exact order 2^s iff
            // squaring s-1 times lands on -1
            let mut t = z;
            for _ in 0..s - 1 {
                t = mul_mod(t, t, p);
            }
            if t == p - 1 {
                return Ok(Self {
                    md: MatrixDomain::new(domain),
                    p,
                    two_adicity: s,
                    generator: z,
                });
            }
        }
        Err(MatPolyError::GeneratorSearchFailed {
            prime: p,
            attempts: MAX_GENERATOR_ATTEMPTS,
        })
    }

    /// Largest supported transform size, as an exponent of two.
    #[must_use]
    pub fn two_adicity(&self) -> u32 {
        self.two_adicity
    }

    /// Full product of `b` and `c` into `a`.
    ///
    /// # Errors
    ///
    /// Returns [`MatPolyError::NotFftPrime`] if `p - 1` does not admit a
    /// transform covering `|b| + |c| - 1` points.
    ///
    /// # Panics
    ///
    /// Panics unless `a.len() >= b.len() + c.len() - 1`.
    pub fn mul(
        &self,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
    ) -> Result<(), MatPolyError> {
        let deg = b.len() + c.len() - 1;
        assert!(
            a.len() >= deg,
            "output too short: {} < {deg}",
            a.len()
        );
        let pts = deg.next_power_of_two();
        let (prod, inv_pts) = self.evaluate(b, c, pts, false)?;
        self.scatter(a, &prod, deg, pts);
        for t in 0..deg {
            self.md.scale_in(&mut a[t], &inv_pts);
        }
        for t in deg..a.len() {
            self.md.zero_out(&mut a[t]);
        }
        Ok(())
    }

    /// Balanced mid-product: the window `[|a|-1, 2|a|-2]` of `b * c`.
    ///
    /// # Errors
    ///
    /// Returns [`MatPolyError::NotFftPrime`] if the transform size is not
    /// supported.
    ///
    /// # Panics
    ///
    /// Panics unless `2|a| = |c| + 1` and `2|b| = |c| + 1`.
    pub fn midproduct(
        &self,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
    ) -> Result<(), MatPolyError> {
        assert_eq!(2 * a.len(), c.len() + 1, "midproduct output size");
        assert_eq!(2 * b.len(), c.len() + 1, "midproduct operand size");
        self.windowed(a, b, c)
    }

    /// Unbalanced mid-product: the window `[|b|-1, |c|-1]` of `b * c`.
    ///
    /// # Errors
    ///
    /// Returns [`MatPolyError::NotFftPrime`] if the transform size is not
    /// supported.
    ///
    /// # Panics
    ///
    /// Panics unless `|a| + |b| = |c| + 1`.
    pub fn midproduct_gen(
        &self,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
    ) -> Result<(), MatPolyError> {
        assert_eq!(a.len() + b.len(), c.len() + 1, "midproduct_gen sizes");
        self.windowed(a, b, c)
    }

    /// Half-size transform: `b` reversed, `c` on the inverse-root table,
    /// window at indices `0..|a|` of the carried-back product.
    fn windowed(
        &self,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
    ) -> Result<(), MatPolyError> {
        let pts = (c.len() + 1).next_power_of_two();
        let (prod, inv_pts) = self.evaluate(b, c, pts, true)?;
        self.scatter(a, &prod, a.len(), pts);
        for t in 0..a.len() {
            self.md.scale_in(&mut a[t], &inv_pts);
        }
        Ok(())
    }

    /// Transform both operands, multiply pointwise, carry the product
    /// back. Returns one buffer per row of the product, laid out
    /// `buf[col * pts + t]`, together with the `pts^-1` factor the
    /// caller applies to the coefficients it keeps.
    ///
    /// With `windowed` set, `b` enters reversed and `c` rides the
    /// inverse-root table; index `i` of the result is then coefficient
    /// `|b| - 1 + i` of the plain product.
    #[allow(clippy::type_complexity)]
    fn evaluate(
        &self,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
        pts: usize,
        windowed: bool,
    ) -> Result<(Vec<Vec<D::Element>>, D::Element), MatPolyError> {
        assert_eq!(b.cols(), c.rows(), "inner dimension mismatch");
        let tables = self.tables(pts)?;

        let mut b_rows = self.gather(b, pts, windowed);
        let mut c_rows = self.gather(c, pts, false);
        self.transform(&mut b_rows, pts, &tables.forward);
        let c_table = if windowed {
            &tables.inverse
        } else {
            &tables.forward
        };
        self.transform(&mut c_rows, pts, c_table);

        // one matrix product per evaluation point, row-parallel within
        // each point
        let domain = self.md.domain();
        let points: Vec<DenseMatrix<D>> = (0..pts)
            .into_par_iter()
            .map(|t| {
                let bm = Self::point_matrix(domain, &b_rows, b.cols(), pts, t);
                let cm = Self::point_matrix(domain, &c_rows, c.cols(), pts, t);
                let mut out = DenseMatrix::zeros(domain, b.rows(), c.cols());
                self.md.mul_parallel(&mut out, &bm, &cm);
                out
            })
            .collect();

        let mut prod: Vec<Vec<D::Element>> = (0..b.rows())
            .map(|r| {
                let mut buf = vec![domain.zero(); c.cols() * pts];
                for (t, point) in points.iter().enumerate() {
                    for col in 0..c.cols() {
                        buf[col * pts + t] = point[(r, col)].clone();
                    }
                }
                buf
            })
            .collect();
        let out_table = if windowed {
            &tables.forward
        } else {
            &tables.inverse
        };
        self.transform(&mut prod, pts, out_table);
        Ok((prod, tables.inv_points))
    }

    fn tables(&self, pts: usize) -> Result<Tables<D>, MatPolyError> {
        let lpts = pts.trailing_zeros();
        if lpts > self.two_adicity {
            return Err(MatPolyError::NotFftPrime {
                prime: self.p,
                points: pts as u64,
            });
        }
        let w = pow_mod(self.generator, 1u64 << (self.two_adicity - lpts), self.p);
        let w_inv = pow_mod(w, self.p - 2, self.p);
        let domain = self.md.domain();

        let powers = |base: u64| {
            let mut cur = 1u64;
            (0..pts)
                .map(|_| {
                    let e = domain.from_u64(cur);
                    cur = mul_mod(cur, base, self.p);
                    e
                })
                .collect::<Vec<_>>()
        };
        let inv_points = domain.from_u64(pow_mod(pts as u64 % self.p, self.p - 2, self.p));
        Ok(Tables {
            forward: powers(w),
            inverse: powers(w_inv),
            inv_points,
        })
    }

    /// Zero-padded per-row point buffers, `buf[col * pts + t]`.
    fn gather(&self, poly: &PolyMatrix<D>, pts: usize, reversed: bool) -> Vec<Vec<D::Element>> {
        debug_assert!(poly.len() <= pts);
        let domain = self.md.domain();
        (0..poly.rows())
            .map(|r| {
                let mut buf = vec![domain.zero(); poly.cols() * pts];
                for (t, coeff) in poly.iter().enumerate() {
                    let slot = if reversed { poly.len() - 1 - t } else { t };
                    for col in 0..poly.cols() {
                        buf[col * pts + slot] = coeff[(r, col)].clone();
                    }
                }
                buf
            })
            .collect()
    }

    fn point_matrix(
        domain: &D,
        rows: &[Vec<D::Element>],
        cols: usize,
        pts: usize,
        t: usize,
    ) -> DenseMatrix<D> {
        let mut m = DenseMatrix::zeros(domain, rows.len(), cols);
        for (r, buf) in rows.iter().enumerate() {
            for col in 0..cols {
                m[(r, col)] = buf[col * pts + t].clone();
            }
        }
        m
    }

    fn transform(&self, bufs: &mut [Vec<D::Element>], pts: usize, table: &[D::Element]) {
        let domain = self.md.domain();
        bufs.par_iter_mut().for_each(|row| {
            for seq in row.chunks_mut(pts) {
                Self::ntt_in_place(domain, seq, table);
            }
        });
    }

    /// Iterative radix-2 transform; `table[i]` holds `w^i` for the
    /// primitive `seq.len()`-th root `w`.
    fn ntt_in_place(domain: &D, seq: &mut [D::Element], table: &[D::Element]) {
        let n = seq.len();
        if n == 1 {
            return;
        }
        let bits = n.trailing_zeros();
        for i in 0..n {
            let j = i.reverse_bits() >> (usize::BITS - bits);
            if i < j {
                seq.swap(i, j);
            }
        }
        let mut len = 2;
        while len <= n {
            let w_len = &table[n / len];
            let half = len / 2;
            let mut start = 0;
            while start < n {
                let mut w = domain.one();
                for j in 0..half {
                    let u = seq[start + j].clone();
                    let v = domain.mul(&seq[start + j + half], &w);
                    seq[start + j] = domain.add(&u, &v);
                    seq[start + j + half] = domain.sub(&u, &v);
                    domain.mul_assign(&mut w, w_len);
                }
                start += len;
            }
            len <<= 1;
        }
    }

    /// Writes the first `count` result coefficients into `a`.
    fn scatter(&self, a: &mut PolyMatrix<D>, prod: &[Vec<D::Element>], count: usize, pts: usize) {
        for t in 0..count {
            for r in 0..a.rows() {
                for col in 0..a.cols() {
                    a[t][(r, col)] = prod[r][col * pts + t].clone();
                }
            }
        }
    }
}

enum Op {
    Mul,
    MidProduct,
    MidProductGen,
}

/// NTT backend with multi-modular fallback.
///
/// Products whose transform size fits the 2-adicity of `p - 1` run
/// directly in the working field; larger ones are computed modulo
/// auxiliary FFT-friendly primes and reconstructed by CRT.
#[derive(Clone, Debug)]
pub struct FftMul<D: PrimeDomain> {
    domain: D,
    p: u64,
    two_adicity: u32,
    seed: u64,
}

impl<D: PrimeDomain> FftMul<D> {
    /// Creates the backend.
    #[must_use]
    pub fn new(domain: D, seed: u64) -> Self {
        let p = domain.characteristic();
        Self {
            domain,
            p,
            two_adicity: (p - 1).trailing_zeros(),
            seed,
        }
    }

    /// Full product of `b` and `c` into `a`.
    ///
    /// # Errors
    ///
    /// Propagates prime-search and generator-search failures from the
    /// multi-modular path.
    ///
    /// # Panics
    ///
    /// Panics unless `a.len() >= b.len() + c.len() - 1`.
    pub fn mul(
        &self,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
    ) -> Result<(), MatPolyError> {
        assert!(a.len() >= b.len() + c.len() - 1, "output too short");
        self.dispatch(&Op::Mul, a, b, c, b.len() + c.len() - 1)
    }

    /// Balanced mid-product: the window `[|a|-1, 2|a|-2]` of `b * c`.
    ///
    /// # Errors
    ///
    /// Propagates prime-search and generator-search failures from the
    /// multi-modular path.
    ///
    /// # Panics
    ///
    /// Panics unless `2|a| = |c| + 1` and `2|b| = |c| + 1`.
    pub fn midproduct(
        &self,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
    ) -> Result<(), MatPolyError> {
        assert_eq!(2 * a.len(), c.len() + 1, "midproduct output size");
        assert_eq!(2 * b.len(), c.len() + 1, "midproduct operand size");
        self.dispatch(&Op::MidProduct, a, b, c, c.len() + 1)
    }

    /// Unbalanced mid-product: the window `[|b|-1, |c|-1]` of `b * c`.
    ///
    /// # Errors
    ///
    /// Propagates prime-search and generator-search failures from the
    /// multi-modular path.
    ///
    /// # Panics
    ///
    /// Panics unless `|a| + |b| = |c| + 1`.
    pub fn midproduct_gen(
        &self,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
    ) -> Result<(), MatPolyError> {
        assert_eq!(a.len() + b.len(), c.len() + 1, "midproduct_gen sizes");
        self.dispatch(&Op::MidProductGen, a, b, c, c.len() + 1)
    }

    fn dispatch(
        &self,
        op: &Op,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
        deg: usize,
    ) -> Result<(), MatPolyError> {
        let pts = deg.next_power_of_two();
        let lpts = pts.trailing_zeros();
        if lpts <= self.two_adicity {
            let fft = PrimeFft::new(self.domain.clone(), self.seed)?;
            return Self::run(&fft, op, a, b, c);
        }
        self.multimodular(op, a, b, c, lpts)
    }

    fn run<F: PrimeDomain>(
        fft: &PrimeFft<F>,
        op: &Op,
        a: &mut PolyMatrix<F>,
        b: &PolyMatrix<F>,
        c: &PolyMatrix<F>,
    ) -> Result<(), MatPolyError> {
        match op {
            Op::Mul => fft.mul(a, b, c),
            Op::MidProduct => fft.midproduct(a, b, c),
            Op::MidProductGen => fft.midproduct_gen(a, b, c),
        }
    }

    /// Computes the product modulo auxiliary primes and reconstructs it.
    fn multimodular(
        &self,
        op: &Op,
        a: &mut PolyMatrix<D>,
        b: &PolyMatrix<D>,
        c: &PolyMatrix<D>,
        lpts: u32,
    ) -> Result<(), MatPolyError> {
        let inner = b.cols() as u64;
        let ln = 64 - inner.leading_zeros();
        let p_bits = 64 - self.p.leading_zeros();
        let bits = (53u32.saturating_sub(ln) >> 1)
            .max(p_bits)
            .max(lpts + 2);

        // product of the entries bounded by inner * p^2 * max degree
        let bound = Integer::from_u64(inner)
            * Integer::from_u64(self.p)
            * Integer::from_u64(self.p)
            * Integer::from_u64(b.len().max(c.len()) as u64);

        let mut prime_gen = FftPrimeGen::new(bits, lpts, self.seed);
        let primes = prime_gen.generate_primes(&bound)?;
        debug!(
            prime_count = primes.len(),
            prime_bits = bits,
            two_adicity = lpts,
            "multi-modular ntt"
        );

        let mut residues = Vec::with_capacity(primes.len());
        for &q in &primes {
            let fq = Zp::new(q);
            let bq = self.reduce_poly(b, fq);
            let cq = self.reduce_poly(c, fq);
            let mut aq = PolyMatrix::zeros(&fq, a.rows(), a.cols(), a.len());
            let fft = PrimeFft::new(fq, self.seed)?;
            Self::run(&fft, op, &mut aq, &bq, &cq)?;
            residues.push(aq);
        }

        if primes.len() == 1 {
            // single prime already exceeds the bound, no reconstruction
            let r = &residues[0];
            for t in 0..a.len() {
                for i in 0..a.rows() {
                    for j in 0..a.cols() {
                        a[t][(i, j)] = self.domain.from_u64(r[t][(i, j)]);
                    }
                }
            }
            return Ok(());
        }

        let mut modulus = Integer::from_u64(1);
        for &q in &primes {
            modulus = modulus * q;
        }
        // per-prime CRT basis: M/q and its inverse mod q
        let mut basis = Vec::with_capacity(primes.len());
        for &q in &primes {
            let crt = &modulus / &Integer::from_u64(q);
            let fq = Zp::new(q);
            let residue = &crt % q;
            let inv = fq
                .inv(&residue)
                .expect("auxiliary primes are pairwise coprime");
            basis.push((crt, inv, fq));
        }

        for t in 0..a.len() {
            for i in 0..a.rows() {
                for j in 0..a.cols() {
                    let mut acc = Integer::from_u64(0);
                    for (k, (crt, inv, fq)) in basis.iter().enumerate() {
                        let term = fq.mul(&residues[k][t][(i, j)], inv);
                        acc += Integer::from_u64(term) * crt;
                    }
                    while acc >= modulus {
                        acc -= &modulus;
                    }
                    a[t][(i, j)] = self.domain.from_integer(&acc);
                }
            }
        }
        Ok(())
    }

    fn reduce_poly(&self, x: &PolyMatrix<D>, fq: Zp) -> PolyMatrix<Zp> {
        let coeffs = x
            .iter()
            .map(|coeff| {
                let data = coeff
                    .data()
                    .iter()
                    .map(|e| fq.from_u64(self.domain.to_canonical(e)))
                    .collect();
                DenseMatrix::from_vec(data, coeff.num_rows(), coeff.num_cols())
            })
            .collect();
        PolyMatrix::from_coeffs(coeffs)
    }
}
