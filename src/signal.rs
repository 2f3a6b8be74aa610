// src/signal.rs
//! Uniformly sampled single-channel signal

use crate::error::{EmgError, EmgResult};
use serde::Serialize;

/// Ordered voltage samples taken at a fixed sample rate.
///
/// A `Signal` is never mutated in place; every processing stage returns a
/// new one. Sample `i` sits at time `i / sample_rate_hz`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate_hz: f64,
}

impl Signal {
    /// Create a signal, rejecting non-positive or non-finite sample rates
    pub fn new(samples: Vec<f64>, sample_rate_hz: f64) -> EmgResult<Self> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(EmgError::invalid_data(format!(
                "sample rate must be positive and finite, got {}",
                sample_rate_hz
            )));
        }

        Ok(Self { samples, sample_rate_hz })
    }

    /// New signal at the same sample rate.
    ///
    /// Used by stages to derive their output from an already validated input.
    pub(crate) fn derive(&self, samples: Vec<f64>) -> Self {
        Self { samples, sample_rate_hz: self.sample_rate_hz }
    }

    /// Voltage samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal has no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration covered by the samples in seconds
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }

    /// Time of every sample, `i / fs`
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sample_rate_hz)
            .collect()
    }

    /// Consume the signal, returning its samples
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}
