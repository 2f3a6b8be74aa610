// src/processing/filters/butterworth.rs
//! Butterworth coefficient design
//!
//! Designs arbitrary-order low-pass and high-pass Butterworth filters in
//! zero-pole-gain form: analog prototype poles on the left half of the unit
//! circle, frequency scaling (or low-to-high inversion) at the pre-warped
//! cutoff, and a bilinear transform into the z-plane. The resulting
//! polynomials are expanded into transfer function coefficients.

use super::{FilterCoefficients, FilterKind};
use crate::error::{EmgError, EmgResult};
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

/// Sample rate the normalized design is carried out at.
/// Normalised cutoffs are fractions of Nyquist, so fs = 2 makes Nyquist 1.
const DESIGN_FS: f64 = 2.0;

/// Butterworth filter coefficient calculator
pub struct ButterworthDesigner;

/// Zeros, poles and gain of a filter
#[derive(Debug, Clone)]
struct Zpk {
    zeros: Vec<Complex64>,
    poles: Vec<Complex64>,
    gain: f64,
}

impl ButterworthDesigner {
    /// Design coefficients for a `kind` filter of the given order.
    ///
    /// Requires `0 < cutoff_hz < sample_rate_hz / 2` and `order >= 1`.
    pub fn design(
        cutoff_hz: f64,
        sample_rate_hz: f64,
        order: usize,
        kind: FilterKind,
    ) -> EmgResult<FilterCoefficients> {
        if order == 0 {
            return Err(EmgError::invalid_filter("order must be at least 1"));
        }
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(EmgError::invalid_filter(format!(
                "sample rate must be positive and finite, got {} Hz",
                sample_rate_hz
            )));
        }

        let nyquist = sample_rate_hz / 2.0;
        if !cutoff_hz.is_finite() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
            return Err(EmgError::invalid_filter(format!(
                "cutoff {} Hz must lie strictly between 0 and Nyquist ({} Hz)",
                cutoff_hz, nyquist
            )));
        }

        let normalized_cutoff = cutoff_hz / nyquist;

        // Pre-warp frequency for bilinear transform
        let warped = 2.0 * DESIGN_FS * (PI * normalized_cutoff / DESIGN_FS).tan();

        let prototype = Self::analog_prototype(order);
        let analog = match kind {
            FilterKind::Lowpass => Self::lowpass_to_lowpass(prototype, warped),
            FilterKind::Highpass => Self::lowpass_to_highpass(prototype, warped),
        };
        let digital = Self::bilinear(analog, DESIGN_FS);

        Ok(Self::to_transfer_function(&digital))
    }

    /// Unity-cutoff analog prototype: no zeros, poles evenly spaced on the
    /// left half of the unit circle.
    fn analog_prototype(order: usize) -> Zpk {
        let n = order as f64;
        let poles = (0..order)
            .map(|i| {
                let m = -(n - 1.0) + 2.0 * i as f64;
                -Complex64::from_polar(1.0, PI * m / (2.0 * n))
            })
            .collect();

        Zpk { zeros: Vec::new(), poles, gain: 1.0 }
    }

    fn lowpass_to_lowpass(zpk: Zpk, wo: f64) -> Zpk {
        let degree = zpk.poles.len() as i32 - zpk.zeros.len() as i32;
        Zpk {
            zeros: zpk.zeros.iter().map(|&z| z * wo).collect(),
            poles: zpk.poles.iter().map(|&p| p * wo).collect(),
            gain: zpk.gain * wo.powi(degree),
        }
    }

    fn lowpass_to_highpass(zpk: Zpk, wo: f64) -> Zpk {
        let degree = zpk.poles.len() - zpk.zeros.len();

        let mut zeros: Vec<Complex64> = zpk.zeros.iter().map(|&z| wo / z).collect();
        // Zeros at infinity move to the origin
        zeros.extend(std::iter::repeat(Complex64::new(0.0, 0.0)).take(degree));

        let poles = zpk.poles.iter().map(|&p| wo / p).collect();

        let num: Complex64 = zpk.zeros.iter().map(|&z| -z).product();
        let den: Complex64 = zpk.poles.iter().map(|&p| -p).product();

        Zpk { zeros, poles, gain: zpk.gain * (num / den).re }
    }

    /// Bilinear transform `s = 2 fs (z - 1) / (z + 1)`
    fn bilinear(zpk: Zpk, fs: f64) -> Zpk {
        let fs2 = Complex64::new(2.0 * fs, 0.0);
        let degree = zpk.poles.len() - zpk.zeros.len();

        let mut zeros: Vec<Complex64> = zpk.zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
        // Zeros at infinity move to Nyquist
        zeros.extend(std::iter::repeat(Complex64::new(-1.0, 0.0)).take(degree));

        let poles = zpk.poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();

        let num: Complex64 = zpk.zeros.iter().map(|&z| fs2 - z).product();
        let den: Complex64 = zpk.poles.iter().map(|&p| fs2 - p).product();

        Zpk { zeros, poles, gain: zpk.gain * (num / den).re }
    }

    fn to_transfer_function(zpk: &Zpk) -> FilterCoefficients {
        let b = Self::poly(&zpk.zeros).into_iter().map(|c| c * zpk.gain).collect();
        let a = Self::poly(&zpk.poles);
        FilterCoefficients { b, a }
    }

    /// Monic polynomial with the given roots, highest power first.
    /// Roots come in conjugate pairs so the imaginary parts cancel.
    fn poly(roots: &[Complex64]) -> Vec<f64> {
        let mut coeffs = vec![Complex64::new(1.0, 0.0)];
        for &root in roots {
            let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
            for (i, &c) in coeffs.iter().enumerate() {
                next[i] += c;
                next[i + 1] -= c * root;
            }
            coeffs = next;
        }
        coeffs.into_iter().map(|c| c.re).collect()
    }
}
