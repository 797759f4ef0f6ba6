//! Property tests: the divide-and-conquer and NTT backends must agree
//! with the schoolbook loop on arbitrary shapes and degrees.

use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use exalg_rings::Zp;

use crate::classical::ClassicalMul;
use crate::fft::FftMul;
use crate::karatsuba::KaratsubaMul;
use crate::polynomial::PolyMatrix;

const P: u64 = 998_244_353;

fn random_poly(rng: &mut ChaCha8Rng, rows: usize, cols: usize, len: usize) -> PolyMatrix<Zp> {
    let f = Zp::new(P);
    let mut x = PolyMatrix::zeros(&f, rows, cols, len);
    for t in 0..len {
        for i in 0..rows {
            for j in 0..cols {
                x[t][(i, j)] = rng.gen_range(0..P);
            }
        }
    }
    x
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_karatsuba_mul_matches_classical(
        rows in 1usize..4,
        inner in 1usize..4,
        cols in 1usize..4,
        bs in 1usize..8,
        cs in 1usize..8,
        seed in any::<u64>(),
    ) {
        let f = Zp::new(P);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let b = random_poly(&mut rng, rows, inner, bs);
        let c = random_poly(&mut rng, inner, cols, cs);
        let mut expected = PolyMatrix::zeros(&f, rows, cols, bs + cs - 1);
        let mut got = PolyMatrix::zeros(&f, rows, cols, bs + cs - 1);
        ClassicalMul::new(f).mul(&mut expected, &b, &c);
        KaratsubaMul::new(f).mul(&mut got, &b, &c);
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_fft_mul_matches_classical(
        rows in 1usize..4,
        inner in 1usize..4,
        cols in 1usize..4,
        bs in 1usize..8,
        cs in 1usize..8,
        seed in any::<u64>(),
    ) {
        let f = Zp::new(P);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let b = random_poly(&mut rng, rows, inner, bs);
        let c = random_poly(&mut rng, inner, cols, cs);
        let mut expected = PolyMatrix::zeros(&f, rows, cols, bs + cs - 1);
        let mut got = PolyMatrix::zeros(&f, rows, cols, bs + cs - 1);
        ClassicalMul::new(f).mul(&mut expected, &b, &c);
        FftMul::new(f, 42).mul(&mut got, &b, &c).unwrap();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_midproduct_matches_classical(
        n in 1usize..10,
        dim in 1usize..4,
        seed in any::<u64>(),
    ) {
        let f = Zp::new(P);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let b = random_poly(&mut rng, dim, dim, n);
        let c = random_poly(&mut rng, dim, dim, 2 * n - 1);
        let mut expected = PolyMatrix::zeros(&f, dim, dim, n);
        let mut kara = PolyMatrix::zeros(&f, dim, dim, n);
        let mut ntt = PolyMatrix::zeros(&f, dim, dim, n);
        ClassicalMul::new(f).midproduct(&mut expected, &b, &c);
        KaratsubaMul::new(f).midproduct(&mut kara, &b, &c);
        FftMul::new(f, 42).midproduct(&mut ntt, &b, &c).unwrap();
        prop_assert_eq!(&kara, &expected);
        prop_assert_eq!(&ntt, &expected);
    }

    #[test]
    fn prop_midproduct_gen_matches_classical(
        bs in 1usize..8,
        extra in 0usize..10,
        dim in 1usize..4,
        seed in any::<u64>(),
    ) {
        // |c| = |b| + extra so |a| = extra + 1 is always valid
        let cs = bs + extra;
        let al = cs + 1 - bs;
        let f = Zp::new(P);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let b = random_poly(&mut rng, dim, dim, bs);
        let c = random_poly(&mut rng, dim, dim, cs);
        let mut expected = PolyMatrix::zeros(&f, dim, dim, al);
        let mut kara = PolyMatrix::zeros(&f, dim, dim, al);
        let mut ntt = PolyMatrix::zeros(&f, dim, dim, al);
        ClassicalMul::new(f).midproduct_gen(&mut expected, &b, &c);
        KaratsubaMul::new(f).midproduct_gen(&mut kara, &b, &c);
        FftMul::new(f, 42).midproduct_gen(&mut ntt, &b, &c).unwrap();
        prop_assert_eq!(&kara, &expected);
        prop_assert_eq!(&ntt, &expected);
    }
}
