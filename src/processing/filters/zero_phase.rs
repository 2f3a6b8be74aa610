// src/processing/filters/zero_phase.rs
//! Forward-backward (zero-phase) IIR filtering
//!
//! The signal is extended at both ends by odd reflection, filtered forward
//! with steady-state initial conditions, reversed, filtered again and
//! reversed back. The net phase response is zero and the output has exactly
//! the input length.

use super::FilterCoefficients;
use crate::error::{EmgError, EmgResult, ProcessingStage};

/// Zero-phase filter stage built from a set of designed coefficients
#[derive(Debug, Clone)]
pub struct ZeroPhaseFilter {
    coefficients: FilterCoefficients,
    stage: ProcessingStage,
}

impl ZeroPhaseFilter {
    /// Wrap `coefficients`, tagging errors with `stage`
    pub fn new(coefficients: FilterCoefficients, stage: ProcessingStage) -> Self {
        Self { coefficients, stage }
    }

    /// Transfer function applied in each direction
    pub fn coefficients(&self) -> &FilterCoefficients {
        &self.coefficients
    }

    /// Stage reported in errors
    pub fn stage(&self) -> ProcessingStage {
        self.stage
    }

    /// Number of samples reflected onto each end of the input
    pub fn pad_length(&self) -> usize {
        3 * self.coefficients.a.len().max(self.coefficients.b.len())
    }

    /// Shortest input that receives the full reflection padding.
    /// Shorter inputs are still filtered, with the padding cut to `len - 1`.
    pub fn min_safe_length(&self) -> usize {
        self.pad_length() + 1
    }

    /// Filter `input` forward and backward.
    ///
    /// Fails with [`EmgError::NumericalInstability`] if any output sample is
    /// not finite.
    pub fn apply(&self, input: &[f64]) -> EmgResult<Vec<f64>> {
        let n = input.len();
        if n == 0 {
            return Ok(Vec::new());
        }

        let (b, a) = normalized(&self.coefficients)?;
        let padlen = self.pad_length().min(n - 1);
        let extended = odd_extend(input, padlen);
        let zi = lfilter_zi(&b, &a);

        let x0 = extended[0];
        let initial: Vec<f64> = zi.iter().map(|&z| z * x0).collect();
        let mut forward = lfilter(&b, &a, &extended, &initial);

        forward.reverse();
        let y0 = forward[0];
        let initial: Vec<f64> = zi.iter().map(|&z| z * y0).collect();
        let mut backward = lfilter(&b, &a, &forward, &initial);
        backward.reverse();

        let output = backward[padlen..padlen + n].to_vec();

        if let Some(index) = output.iter().position(|v| !v.is_finite()) {
            return Err(EmgError::NumericalInstability { stage: self.stage, index });
        }

        Ok(output)
    }
}

/// Coefficients divided through by `a[0]` and padded to a common length
fn normalized(coefficients: &FilterCoefficients) -> EmgResult<(Vec<f64>, Vec<f64>)> {
    let a0 = coefficients.a.first().copied().unwrap_or(0.0);
    if a0 == 0.0 || !a0.is_finite() {
        return Err(EmgError::invalid_filter(
            "leading denominator coefficient must be non-zero",
        ));
    }

    let nfilt = coefficients.a.len().max(coefficients.b.len());
    let mut b = vec![0.0; nfilt];
    let mut a = vec![0.0; nfilt];
    for (dst, &src) in b.iter_mut().zip(coefficients.b.iter()) {
        *dst = src / a0;
    }
    for (dst, &src) in a.iter_mut().zip(coefficients.a.iter()) {
        *dst = src / a0;
    }

    Ok((b, a))
}

/// Reflect `padlen` samples about each endpoint: `2 x[0] - x[i]`
fn odd_extend(input: &[f64], padlen: usize) -> Vec<f64> {
    let n = input.len();
    let first = input[0];
    let last = input[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * padlen);
    extended.extend((1..=padlen).rev().map(|i| 2.0 * first - input[i]));
    extended.extend_from_slice(input);
    extended.extend((1..=padlen).map(|i| 2.0 * last - input[n - 1 - i]));
    extended
}

/// Direct Form II transposed filter with initial state `zi`.
///
/// `b` and `a` must be normalized and of equal length; `zi` has one element
/// fewer.
pub fn lfilter(b: &[f64], a: &[f64], input: &[f64], zi: &[f64]) -> Vec<f64> {
    let state_len = b.len().saturating_sub(1);
    let mut z = zi.to_vec();
    z.resize(state_len, 0.0);

    let mut output = Vec::with_capacity(input.len());
    for &x in input {
        let y = b[0] * x + z.first().copied().unwrap_or(0.0);
        for i in 0..state_len {
            let carry = if i + 1 < state_len { z[i + 1] } else { 0.0 };
            z[i] = b[i + 1] * x - a[i + 1] * y + carry;
        }
        output.push(y);
    }
    output
}

/// Steady-state filter state for a unit step input.
///
/// Solves `zi = A zi + B` for the companion-form state matrix in closed
/// form, without a linear solve.
pub fn lfilter_zi(b: &[f64], a: &[f64]) -> Vec<f64> {
    let n = a.len().max(b.len());
    if n < 2 {
        return Vec::new();
    }

    let a_sum: f64 = a.iter().sum();
    let b_minus: Vec<f64> = (1..n).map(|k| b[k] - a[k] * b[0]).collect();

    let mut zi = vec![0.0; n - 1];
    zi[0] = b_minus.iter().sum::<f64>() / a_sum;

    let mut asum = 1.0;
    let mut csum = 0.0;
    for k in 1..n - 1 {
        asum += a[k];
        csum += b_minus[k - 1];
        zi[k] = asum * zi[0] - csum;
    }
    zi
}
