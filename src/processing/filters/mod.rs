// src/processing/filters/mod.rs
//! Digital filters for EMG signal conditioning

pub mod butterworth;
pub mod zero_phase;

pub use butterworth::*;
pub use zero_phase::*;

use serde::{Deserialize, Serialize};

/// Response type of a designed filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Passes frequencies below the cutoff
    Lowpass,
    /// Passes frequencies above the cutoff
    Highpass,
}

/// Transfer function coefficients of an IIR filter.
///
/// `b` is the feedforward (numerator) polynomial and `a` the feedback
/// (denominator) polynomial in powers of `z^-1`, with `a[0] == 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCoefficients {
    /// Numerator coefficients
    pub b: Vec<f64>,
    /// Denominator coefficients
    pub a: Vec<f64>,
}

impl FilterCoefficients {
    /// Filter order, the degree of the denominator
    pub fn order(&self) -> usize {
        self.a.len().saturating_sub(1)
    }

    /// Whether every pole lies strictly inside the unit circle.
    ///
    /// Runs the step-down (Schur-Cohn) recursion on the denominator: the
    /// filter is stable iff every reflection coefficient has magnitude < 1.
    pub fn is_stable(&self) -> bool {
        let Some(&a0) = self.a.first() else {
            return false;
        };
        if a0 == 0.0 || !self.a.iter().all(|c| c.is_finite()) {
            return false;
        }

        let mut poly: Vec<f64> = self.a.iter().map(|&c| c / a0).collect();
        while poly.len() > 1 {
            let m = poly.len() - 1;
            let k = poly[m];
            if k.abs() >= 1.0 {
                return false;
            }
            let scale = 1.0 - k * k;
            poly = (0..m)
                .map(|i| (poly[i] - k * poly[m - i]) / scale)
                .collect();
        }
        true
    }

    /// Complex frequency response magnitude at `freq_hz`
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate_hz: f64) -> f64 {
        use rustfft::num_complex::Complex64;

        let omega = 2.0 * std::f64::consts::PI * freq_hz / sample_rate_hz;
        let z_inv = Complex64::from_polar(1.0, -omega);
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
        };

        (eval(&self.b) / eval(&self.a)).norm()
    }
}
