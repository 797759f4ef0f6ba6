//! Cross-backend agreement and dispatcher behavior.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use exalg_linalg::DenseMatrix;
use exalg_rings::{Domain, Zp};

use crate::classical::ClassicalMul;
use crate::domain::{Backend, MulConfig, PolyMatrixDomain};
use crate::fft::FftMul;
use crate::karatsuba::KaratsubaMul;
use crate::polynomial::PolyMatrix;

fn random_poly(
    f: &Zp,
    rng: &mut ChaCha8Rng,
    rows: usize,
    cols: usize,
    len: usize,
) -> PolyMatrix<Zp> {
    let p = f.characteristic();
    let mut x = PolyMatrix::zeros(f, rows, cols, len);
    for t in 0..len {
        for i in 0..rows {
            for j in 0..cols {
                x[t][(i, j)] = rng.gen_range(0..p);
            }
        }
    }
    x
}

#[test]
fn test_scalar_identity_product() {
    // [1] * [1] = [1] through every backend
    let f = Zp::new(13);
    let one = PolyMatrix::from_coeffs(vec![DenseMatrix::identity(&f, 1)]);

    let mut a = PolyMatrix::zeros(&f, 1, 1, 1);
    ClassicalMul::new(f).mul(&mut a, &one, &one);
    assert_eq!(a[0][(0, 0)], 1);

    KaratsubaMul::new(f).mul(&mut a, &one, &one);
    assert_eq!(a[0][(0, 0)], 1);

    FftMul::new(f, 42).mul(&mut a, &one, &one).unwrap();
    assert_eq!(a[0][(0, 0)], 1);
}

#[test]
fn test_identity_is_noop() {
    // multiplying by the degree-0 identity polynomial returns the
    // operand unchanged, with any oversized tail zeroed
    let f = Zp::new(97);
    let mut rng = ChaCha8Rng::seed_from_u64(105);
    let b = random_poly(&f, &mut rng, 3, 3, 4);
    let one = PolyMatrix::from_coeffs(vec![DenseMatrix::identity(&f, 3)]);

    let mut a = random_poly(&f, &mut rng, 3, 3, 4);
    ClassicalMul::new(f).mul(&mut a, &b, &one);
    assert_eq!(a, b);

    let mut a = random_poly(&f, &mut rng, 3, 3, 4);
    KaratsubaMul::new(f).mul(&mut a, &b, &one);
    assert_eq!(a, b);

    let mut a = random_poly(&f, &mut rng, 3, 3, 4);
    FftMul::new(f, 42).mul(&mut a, &one, &b).unwrap();
    assert_eq!(a, b);

    // oversized output: leading |b| coefficients match, tail is zeroed
    let mut a = random_poly(&f, &mut rng, 3, 3, 7);
    PolyMatrixDomain::new(f).mul(&mut a, &b, &one).unwrap();
    for t in 0..4 {
        assert_eq!(a[t], b[t]);
    }
    let zero = DenseMatrix::zeros(&f, 3, 3);
    for t in 4..7 {
        assert_eq!(a[t], zero);
    }
}

#[test]
fn test_identity_string_squares() {
    // (I + I x)^2 = I + 2I x + I x^2 over GF(13)
    let f = Zp::new(13);
    let id = DenseMatrix::identity(&f, 2);
    let b = PolyMatrix::from_coeffs(vec![id.clone(), id.clone()]);

    let pmd = PolyMatrixDomain::new(f);
    let mut a = PolyMatrix::zeros(&f, 2, 2, 3);
    pmd.mul(&mut a, &b, &b).unwrap();

    let two = DenseMatrix::from_rows(vec![vec![2, 0], vec![0, 2]]);
    assert_eq!(a[0], id);
    assert_eq!(a[1], two);
    assert_eq!(a[2], id);
}

#[test]
fn test_all_backends_agree_on_mul() {
    let f = Zp::new(998_244_353);
    let classical = ClassicalMul::new(f);
    let karatsuba = KaratsubaMul::new(f);
    let fft = FftMul::new(f, 42);
    let mut rng = ChaCha8Rng::seed_from_u64(100);

    for (bs, cs) in [(2, 2), (5, 9), (13, 13), (20, 31)] {
        let b = random_poly(&f, &mut rng, 3, 2, bs);
        let c = random_poly(&f, &mut rng, 2, 3, cs);
        let len = bs + cs - 1;
        let mut r1 = PolyMatrix::zeros(&f, 3, 3, len);
        let mut r2 = PolyMatrix::zeros(&f, 3, 3, len);
        let mut r3 = PolyMatrix::zeros(&f, 3, 3, len);
        classical.mul(&mut r1, &b, &c);
        karatsuba.mul(&mut r2, &b, &c);
        fft.mul(&mut r3, &b, &c).unwrap();
        assert_eq!(r1, r2, "karatsuba disagrees at {bs} x {cs}");
        assert_eq!(r1, r3, "ntt disagrees at {bs} x {cs}");
    }
}

#[test]
fn test_all_backends_agree_on_midproducts() {
    let f = Zp::new(998_244_353);
    let classical = ClassicalMul::new(f);
    let karatsuba = KaratsubaMul::new(f);
    let fft = FftMul::new(f, 42);
    let mut rng = ChaCha8Rng::seed_from_u64(101);

    for n in [2usize, 5, 9, 16] {
        let b = random_poly(&f, &mut rng, 2, 2, n);
        let c = random_poly(&f, &mut rng, 2, 2, 2 * n - 1);
        let mut r1 = PolyMatrix::zeros(&f, 2, 2, n);
        let mut r2 = PolyMatrix::zeros(&f, 2, 2, n);
        let mut r3 = PolyMatrix::zeros(&f, 2, 2, n);
        classical.midproduct(&mut r1, &b, &c);
        karatsuba.midproduct(&mut r2, &b, &c);
        fft.midproduct(&mut r3, &b, &c).unwrap();
        assert_eq!(r1, r2, "karatsuba midproduct disagrees at {n}");
        assert_eq!(r1, r3, "ntt midproduct disagrees at {n}");
    }

    for (bs, cs) in [(2, 5), (4, 11), (3, 16)] {
        let al = cs + 1 - bs;
        let b = random_poly(&f, &mut rng, 2, 2, bs);
        let c = random_poly(&f, &mut rng, 2, 2, cs);
        let mut r1 = PolyMatrix::zeros(&f, 2, 2, al);
        let mut r2 = PolyMatrix::zeros(&f, 2, 2, al);
        let mut r3 = PolyMatrix::zeros(&f, 2, 2, al);
        classical.midproduct_gen(&mut r1, &b, &c);
        karatsuba.midproduct_gen(&mut r2, &b, &c);
        fft.midproduct_gen(&mut r3, &b, &c).unwrap();
        assert_eq!(r1, r2, "karatsuba midproduct_gen disagrees at {bs} x {cs}");
        assert_eq!(r1, r3, "ntt midproduct_gen disagrees at {bs} x {cs}");
    }
}

#[test]
fn test_dispatcher_crt_route_matches_classical() {
    // combined degree 66 exceeds the default threshold; GF(13) then
    // forces the multi-modular path inside the NTT backend
    let f = Zp::new(13);
    let pmd = PolyMatrixDomain::new(f);
    let classical = ClassicalMul::new(f);
    let mut rng = ChaCha8Rng::seed_from_u64(102);

    let b = random_poly(&f, &mut rng, 2, 2, 33);
    let c = random_poly(&f, &mut rng, 2, 2, 33);
    assert_eq!(pmd.backend_for(66), Backend::Fft);

    let mut expected = PolyMatrix::zeros(&f, 2, 2, 65);
    let mut got = PolyMatrix::zeros(&f, 2, 2, 65);
    classical.mul(&mut expected, &b, &c);
    pmd.mul(&mut got, &b, &c).unwrap();
    assert_eq!(got, expected);
}

#[test]
fn test_dispatcher_routes_every_operation() {
    let f = Zp::new(998_244_353);
    let mut rng = ChaCha8Rng::seed_from_u64(103);
    let classical = ClassicalMul::new(f);

    // a low fft threshold exercises the NTT path on small operands
    for fft_threshold in [4usize, 64] {
        let config = MulConfig {
            fft_threshold,
            karatsuba_threshold: 1,
            seed: 42,
        };
        let pmd = PolyMatrixDomain::with_config(f, config);

        let b = random_poly(&f, &mut rng, 2, 2, 6);
        let c = random_poly(&f, &mut rng, 2, 2, 11);
        let mut expected = PolyMatrix::zeros(&f, 2, 2, 16);
        let mut got = PolyMatrix::zeros(&f, 2, 2, 16);
        classical.mul(&mut expected, &b, &c);
        pmd.mul(&mut got, &b, &c).unwrap();
        assert_eq!(got, expected, "mul at fft threshold {fft_threshold}");

        let b = random_poly(&f, &mut rng, 2, 2, 6);
        let c = random_poly(&f, &mut rng, 2, 2, 11);
        let mut expected = PolyMatrix::zeros(&f, 2, 2, 6);
        let mut got = PolyMatrix::zeros(&f, 2, 2, 6);
        classical.midproduct(&mut expected, &b, &c);
        pmd.midproduct(&mut got, &b, &c).unwrap();
        assert_eq!(got, expected, "midproduct at fft threshold {fft_threshold}");

        let b = random_poly(&f, &mut rng, 2, 2, 4);
        let c = random_poly(&f, &mut rng, 2, 2, 11);
        let mut expected = PolyMatrix::zeros(&f, 2, 2, 8);
        let mut got = PolyMatrix::zeros(&f, 2, 2, 8);
        classical.midproduct_gen(&mut expected, &b, &c);
        pmd.midproduct_gen(&mut got, &b, &c).unwrap();
        assert_eq!(got, expected, "midproduct_gen at fft threshold {fft_threshold}");
    }
}

#[test]
fn test_degree_law() {
    // the top coefficient of a 1x1 product is exactly the product of
    // the operands' top coefficients
    let f = Zp::new(101);
    let pmd = PolyMatrixDomain::new(f);
    let mut rng = ChaCha8Rng::seed_from_u64(104);

    let b = random_poly(&f, &mut rng, 1, 1, 5);
    let c = random_poly(&f, &mut rng, 1, 1, 7);
    let mut a = PolyMatrix::zeros(&f, 1, 1, 11);
    pmd.mul(&mut a, &b, &c).unwrap();
    let lead = f.mul(&b[4][(0, 0)], &c[6][(0, 0)]);
    assert_eq!(a[10][(0, 0)], lead);
}
