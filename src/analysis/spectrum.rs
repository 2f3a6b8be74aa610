// src/analysis/spectrum.rs
//! Magnitude spectrum of a burst

use crate::processing::segmentation::Burst;
use rustfft::{num_complex::Complex64, FftPlanner};
use serde::Serialize;

/// Non-negative half of a burst's DFT magnitude spectrum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumRecord {
    /// Bin centre frequencies in Hz, `k * fs / n`
    pub frequencies_hz: Vec<f64>,
    /// Raw, unnormalized DFT magnitudes
    pub magnitudes: Vec<f64>,
}

impl SpectrumRecord {
    /// Frequency of the largest magnitude, ignoring the DC bin when any other
    /// bin exists
    pub fn peak_frequency(&self) -> Option<f64> {
        let skip = usize::from(self.magnitudes.len() > 1);
        self.magnitudes
            .iter()
            .zip(self.frequencies_hz.iter())
            .skip(skip)
            .max_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, &freq)| freq)
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// Whether the record has no bins
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }
}

/// Reusable spectrum calculator holding an FFT planner
pub struct SpectralAnalyzer {
    planner: FftPlanner<f64>,
}

impl SpectralAnalyzer {
    /// Analyzer with an empty planner cache
    pub fn new() -> Self {
        Self { planner: FftPlanner::new() }
    }

    /// Magnitude spectrum of `burst` over the lower half of the bins.
    ///
    /// For `n` samples that is bins `0..n / 2`, and at least the DC bin for a
    /// single-sample burst. The upper half is the conjugate mirror of the
    /// lower for real input.
    pub fn spectrum(&mut self, burst: &Burst, sample_rate_hz: f64) -> SpectrumRecord {
        let samples = burst.samples();
        let n = samples.len();

        let mut buffer: Vec<Complex64> = samples.iter().map(|&s| Complex64::new(s, 0.0)).collect();
        let fft = self.planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let half = (n / 2).max(1);
        let frequencies_hz = (0..half).map(|k| k as f64 * sample_rate_hz / n as f64).collect();
        let magnitudes = buffer[..half].iter().map(|c| c.norm()).collect();

        SpectrumRecord { frequencies_hz, magnitudes }
    }
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// One-off spectrum of a single burst
pub fn spectrum(burst: &Burst, sample_rate_hz: f64) -> SpectrumRecord {
    SpectralAnalyzer::new().spectrum(burst, sample_rate_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_half_spectrum_length() {
        let even = Burst::new(vec![1.0; 8], 0).unwrap();
        let odd = Burst::new(vec![1.0; 7], 0).unwrap();
        let single = Burst::new(vec![1.0], 0).unwrap();

        assert_eq!(spectrum(&even, 2000.0).len(), 4);
        assert_eq!(spectrum(&odd, 2000.0).len(), 3);
        assert_eq!(
            spectrum(&odd, 2000.0).frequencies_hz,
            vec![0.0, 2000.0 / 7.0, 4000.0 / 7.0]
        );
        assert_eq!(spectrum(&single, 2000.0).len(), 1);
    }

    #[test]
    fn test_dc_magnitude_is_sum() {
        let burst = Burst::new(vec![1.0, 2.0, 3.0, 4.0], 0).unwrap();
        let record = spectrum(&burst, 1000.0);
        assert!((record.magnitudes[0] - 10.0).abs() < 1e-12);
        assert_eq!(record.frequencies_hz, vec![0.0, 250.0]);
    }

    #[test]
    fn test_tone_peak() {
        let fs = 2000.0;
        // 250 Hz falls exactly on bin 32 of a 256-point transform
        let samples: Vec<f64> = (0..256)
            .map(|i| (2.0 * PI * 250.0 * i as f64 / fs).sin())
            .collect();
        let burst = Burst::new(samples, 0).unwrap();
        let record = spectrum(&burst, fs);

        assert_eq!(record.peak_frequency(), Some(250.0));
        // Unnormalized: a unit sine puts n/2 into its bin
        assert!((record.magnitudes[32] - 128.0).abs() < 1e-9);
    }

    #[test]
    fn test_analyzer_reuse() {
        let mut analyzer = SpectralAnalyzer::new();
        let a = analyzer.spectrum(&Burst::new(vec![1.0, -1.0], 0).unwrap(), 2.0);
        let b = analyzer.spectrum(&Burst::new(vec![1.0, 0.5, 0.25], 0).unwrap(), 3.0);
        assert_eq!(a.len(), 1);
        assert_eq!(b.len(), 1);
        assert_eq!(b.frequencies_hz, vec![0.0]);
        assert!((b.magnitudes[0] - 1.75).abs() < 1e-12);
    }
}
