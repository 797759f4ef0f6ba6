//! The polynomial-matrix multiplication domain.
//!
//! `PolyMatrixDomain` is the front door of the crate: it owns one
//! instance of each backend and routes every call on the combined
//! operand degree `d = |b| + |c|`. The thresholds mirror the cost
//! crossover points of the three algorithms and can be tuned through
//! [`MulConfig`].

use tracing::debug;

use exalg_rings::PrimeDomain;

use crate::classical::ClassicalMul;
use crate::error::MatPolyError;
use crate::fft::FftMul;
use crate::karatsuba::KaratsubaMul;
use crate::polynomial::PolyMatrix;

/// Combined degree above which the NTT backend takes over.
pub const FFT_THRESHOLD: usize = 64;

/// Combined degree above which Karatsuba beats the schoolbook loop.
pub const KARATSUBA_THRESHOLD: usize = 1;

/// Backend selection thresholds and the seed for the randomized
/// prime/generator searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MulConfig {
    /// Combined degree above which the NTT backend is used.
    pub fft_threshold: usize,
    /// Combined degree above which Karatsuba is used.
    pub karatsuba_threshold: usize,
    /// Seed for the auxiliary prime and generator searches.
    pub seed: u64,
}

impl Default for MulConfig {
    fn default() -> Self {
        Self {
            fft_threshold: FFT_THRESHOLD,
            karatsuba_threshold: KARATSUBA_THRESHOLD,
            seed: 42,
        }
    }
}

/// The backend chosen for a given combined degree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    /// Schoolbook convolution.
    Classical,
    /// Karatsuba divide-and-conquer.
    Karatsuba,
    /// NTT with multi-modular fallback.
    Fft,
}

/// Threshold-dispatched polynomial-matrix multiplication.
#[derive(Clone, Debug)]
pub struct PolyMatrixDomain<D: PrimeDomain> {
    classical: ClassicalMul<D>,
    karatsuba: KaratsubaMul<D>,
    fft: FftMul<D>,
    config: MulConfig,
}

impl<D: PrimeDomain> PolyMatrixDomain<D> {
    /// Creates the domain with default thresholds.
    #[must_use]
    pub fn new(domain: D) -> Self {
        Self::with_config(domain, MulConfig::default())
    }

    /// Creates the domain with explicit thresholds.
    #[must_use]
    pub fn with_config(domain: D, config: MulConfig) -> Self {
        Self {
            classical: ClassicalMul::new(domain.clone()),
            karatsuba: KaratsubaMul::new(domain.clone()),
            fft: FftMul::new(domain, config.seed),
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &MulConfig {
        &self.config
    }

    /// The backend that a combined degree `d = |b| + |c|` routes to.
    #[must_use]
    pub fn backend_for(&self, d: usize) -> Backend {
        if d > self.config.fft_threshold {
            Backend::Fft
        } else if d > self.config.karatsuba_threshold {
            Backend::Karatsuba
        } else {
            Backend::Classical
        }
    }

    /// Full product of `b` and `c` into `a`.
    ///
    /// # Errors
    ///
    /// Propagates NTT-backend failures; the ring-only backends cannot
    /// fail.
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
        let backend = self.backend_for(b.len() + c.len());
        debug!(?backend, b_len = b.len(), c_len = c.len(), "mul");
        match backend {
            Backend::Classical => {
                self.classical.mul(a, b, c);
                Ok(())
            }
            Backend::Karatsuba => {
                self.karatsuba.mul(a, b, c);
                Ok(())
            }
            Backend::Fft => self.fft.mul(a, b, c),
        }
    }

    /// Balanced mid-product: the window `[|a|-1, 2|a|-2]` of `b * c`.
    ///
    /// # Errors
    ///
    /// Propagates NTT-backend failures.
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
        let backend = self.backend_for(b.len() + c.len());
        debug!(?backend, b_len = b.len(), c_len = c.len(), "midproduct");
        match backend {
            Backend::Classical => {
                self.classical.midproduct(a, b, c);
                Ok(())
            }
            Backend::Karatsuba => {
                self.karatsuba.midproduct(a, b, c);
                Ok(())
            }
            Backend::Fft => self.fft.midproduct(a, b, c),
        }
    }

    /// Unbalanced mid-product: the window `[|b|-1, |c|-1]` of `b * c`.
    ///
    /// # Errors
    ///
    /// Propagates NTT-backend failures.
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
        let backend = self.backend_for(b.len() + c.len());
        debug!(?backend, b_len = b.len(), c_len = c.len(), "midproduct_gen");
        match backend {
            Backend::Classical => {
                self.classical.midproduct_gen(a, b, c);
                Ok(())
            }
            Backend::Karatsuba => {
                self.karatsuba.midproduct_gen(a, b, c);
                Ok(())
            }
            Backend::Fft => self.fft.midproduct_gen(a, b, c),
        }
    }
}
