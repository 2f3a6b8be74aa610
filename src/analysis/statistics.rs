// src/analysis/statistics.rs
//! Descriptive statistics of a burst

use crate::processing::segmentation::Burst;
use serde::Serialize;

/// Mean, median and population standard deviation of one burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurstStatisticsRecord {
    /// Arithmetic mean
    pub mean: f64,
    /// Middle value, or the mean of the two middle values
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Summarize a burst's sample values
pub fn summarize(burst: &Burst) -> BurstStatisticsRecord {
    let samples = burst.samples();
    let mean = mean(samples);

    BurstStatisticsRecord {
        mean,
        median: median(samples),
        std_dev: population_std_dev(samples, mean),
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    let variance = values.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn burst(samples: &[f64]) -> Burst {
        Burst::new(samples.to_vec(), 0).unwrap()
    }

    #[test]
    fn test_constant_burst() {
        let stats = summarize(&burst(&[2.0, 2.0, 2.0, 2.0]));
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 2.0);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_single_sample_burst() {
        let stats = summarize(&burst(&[-3.5]));
        assert_eq!(stats.mean, -3.5);
        assert_eq!(stats.median, -3.5);
        assert_eq!(stats.std_dev, 0.0);
    }

    #[test]
    fn test_even_and_odd_median() {
        assert_eq!(summarize(&burst(&[4.0, 1.0, 3.0, 2.0])).median, 2.5);
        assert_eq!(summarize(&burst(&[5.0, -1.0, 3.0])).median, 3.0);
    }

    #[test]
    fn test_population_std_dev() {
        // Population (not sample) deviation: sqrt(((2-5)^2 + ... ) / 8) = 2
        let stats = summarize(&burst(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }
}
