// src/processing/segmentation.rs
//! Burst extraction from a windowed signal
//!
//! A burst is a maximal run of samples that are not exactly zero. The
//! comparison is exact: the Hann taper puts true zeros on every block
//! boundary, and any other sample, however small, belongs to a burst.

use crate::error::{EmgError, EmgResult};
use crate::signal::Signal;
use serde::Serialize;
use tracing::debug;

/// Contiguous run of non-zero samples, copied out of a windowed signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Burst {
    samples: Vec<f64>,
    start: usize,
}

impl Burst {
    /// Create a burst from its samples and its offset in the source signal.
    ///
    /// Bursts are never empty.
    pub fn new(samples: Vec<f64>, start: usize) -> EmgResult<Self> {
        if samples.is_empty() {
            return Err(EmgError::invalid_data("a burst must contain at least one sample"));
        }
        Ok(Self { samples, start })
    }

    /// Sample values
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; kept for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Index of the first sample within the windowed signal
    pub fn start(&self) -> usize {
        self.start
    }

    /// Local time axis `i / fs`, starting at zero
    pub fn time_axis(&self, sample_rate_hz: f64) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / sample_rate_hz)
            .collect()
    }

    /// Duration in seconds at `sample_rate_hz`
    pub fn duration_secs(&self, sample_rate_hz: f64) -> f64 {
        self.samples.len() as f64 / sample_rate_hz
    }
}

/// Split `signal` into bursts separated by exact zeros, in order of occurrence
pub fn extract_bursts(signal: &Signal) -> Vec<Burst> {
    let bursts = split_nonzero_runs(signal.samples());
    debug!(samples = signal.len(), bursts = bursts.len(), "extracted bursts");
    bursts
}

fn split_nonzero_runs(samples: &[f64]) -> Vec<Burst> {
    let mut bursts = Vec::new();
    let mut current: Vec<f64> = Vec::new();
    let mut current_start = 0;

    for (i, &sample) in samples.iter().enumerate() {
        if sample != 0.0 {
            if current.is_empty() {
                current_start = i;
            }
            current.push(sample);
        } else if !current.is_empty() {
            bursts.push(Burst { samples: std::mem::take(&mut current), start: current_start });
        }
    }

    if !current.is_empty() {
        bursts.push(Burst { samples: current, start: current_start });
    }

    bursts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::windowing::apply_window;

    fn extract(samples: &[f64]) -> Vec<Vec<f64>> {
        split_nonzero_runs(samples)
            .into_iter()
            .map(|b| b.samples().to_vec())
            .collect()
    }

    #[test]
    fn test_basic_split() {
        let bursts = extract(&[0.0, 1.0, 2.0, 0.0, 0.0, 3.0, 4.0, 5.0, 0.0]);
        assert_eq!(bursts, vec![vec![1.0, 2.0], vec![3.0, 4.0, 5.0]]);
    }

    #[test]
    fn test_trailing_burst_emitted() {
        let bursts = extract(&[0.0, 7.0, 0.0, 8.0, 9.0]);
        assert_eq!(bursts, vec![vec![7.0], vec![8.0, 9.0]]);
    }

    #[test]
    fn test_burst_offsets() {
        let bursts = split_nonzero_runs(&[0.0, 1.0, 2.0, 0.0, 0.0, 3.0]);
        assert_eq!(bursts[0].start(), 1);
        assert_eq!(bursts[1].start(), 5);
    }

    #[test]
    fn test_all_zero_and_empty() {
        assert!(extract(&[0.0; 16]).is_empty());
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_tiny_values_are_not_gaps() {
        let bursts = extract(&[1.0, 1e-300, -1e-300, 2.0]);
        assert_eq!(bursts.len(), 1);
        assert_eq!(bursts[0].len(), 4);
    }

    #[test]
    fn test_negative_zero_is_a_gap() {
        let bursts = extract(&[1.0, -0.0, 2.0]);
        assert_eq!(bursts.len(), 2);
    }

    #[test]
    fn test_windowed_blocks_separate() {
        let input = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 2.0, 2.0, 2.0];
        let windowed = apply_window(&Signal::new(input, 2000.0).unwrap(), 3).unwrap();
        let bursts = extract_bursts(&windowed);

        assert_eq!(bursts.len(), 2);
        assert!(bursts.iter().all(|b| !b.is_empty()));
        assert!((bursts[0].samples()[0] - 1.0).abs() < 1e-12);
        assert!((bursts[1].samples()[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_burst_rejected() {
        assert!(Burst::new(Vec::new(), 0).is_err());
        let burst = Burst::new(vec![1.0, 2.0], 3).unwrap();
        assert_eq!(burst.time_axis(2.0), vec![0.0, 0.5]);
        assert!((burst.duration_secs(2.0) - 1.0).abs() < 1e-12);
    }
}
