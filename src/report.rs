// src/report.rs
//! Human and machine readable summaries of a pipeline run

use crate::analysis::AnovaResult;
use crate::error::{EmgError, EmgResult};
use crate::processing::PipelineOutput;
use serde::Serialize;
use std::fmt;

/// Per-burst line of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BurstReport {
    /// 1-based burst number in order of occurrence
    pub number: usize,
    /// Offset of the first sample in the windowed signal
    pub start: usize,
    /// Number of samples
    pub length: usize,
    /// Length divided by the sample rate
    pub duration_secs: f64,
    /// Mean sample value
    pub mean: f64,
    /// Median sample value
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Strongest non-DC spectral bin, when the burst has one
    pub peak_frequency_hz: Option<f64>,
}

/// Variance test outcome at a chosen significance level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnovaReport {
    /// F statistic
    pub f_statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Between-group degrees of freedom
    pub df_between: usize,
    /// Within-group degrees of freedom
    pub df_within: usize,
    /// Significance level used for the decision
    pub alpha: f64,
    /// `p_value < alpha`
    pub significant: bool,
    /// Sentence stating the decision
    pub conclusion: String,
}

impl AnovaReport {
    /// Judge `result` at `alpha`
    pub fn new(result: &AnovaResult, alpha: f64) -> Self {
        let significant = result.is_significant(alpha);
        let conclusion = if significant {
            "reject the null hypothesis: the burst means differ significantly"
        } else {
            "fail to reject the null hypothesis: no significant difference between burst means"
        };

        Self {
            f_statistic: result.f_statistic,
            p_value: result.p_value,
            df_between: result.df_between,
            df_within: result.df_within,
            alpha,
            significant,
            conclusion: conclusion.to_string(),
        }
    }
}

/// Summary of one recording's analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Sample rate of the recording
    pub sample_rate_hz: f64,
    /// Samples in the recording
    pub raw_samples: usize,
    /// Samples kept after windowing
    pub windowed_samples: usize,
    /// One entry per burst
    pub bursts: Vec<BurstReport>,
    /// Absent when the variance test was not run
    pub anova: Option<AnovaReport>,
}

impl AnalysisReport {
    /// Build a report from a pipeline run, judging significance at `alpha`
    pub fn from_output(output: &PipelineOutput, alpha: f64) -> Self {
        let fs = output.windowed.sample_rate_hz();

        let bursts = output
            .bursts
            .iter()
            .zip(output.statistics.iter())
            .zip(output.spectra.iter())
            .enumerate()
            .map(|(i, ((burst, stats), spectrum))| BurstReport {
                number: i + 1,
                start: burst.start(),
                length: burst.len(),
                duration_secs: burst.duration_secs(fs),
                mean: stats.mean,
                median: stats.median,
                std_dev: stats.std_dev,
                peak_frequency_hz: spectrum.peak_frequency(),
            })
            .collect();

        Self {
            sample_rate_hz: fs,
            raw_samples: output.conditioned.len(),
            windowed_samples: output.windowed.len(),
            bursts,
            anova: output.anova.as_ref().map(|r| AnovaReport::new(r, alpha)),
        }
    }

    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> EmgResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| EmgError::invalid_data(format!("report serialization failed: {}", e)))
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} samples at {} Hz, {} after windowing, {} bursts",
            self.raw_samples,
            self.sample_rate_hz,
            self.windowed_samples,
            self.bursts.len()
        )?;

        for burst in &self.bursts {
            writeln!(f)?;
            writeln!(
                f,
                "Burst {} ({} samples, {:.4} s):",
                burst.number, burst.length, burst.duration_secs
            )?;
            writeln!(f, "   Mean: {}", burst.mean)?;
            writeln!(f, "   Median: {}", burst.median)?;
            writeln!(f, "   Standard deviation: {}", burst.std_dev)?;
            if let Some(peak) = burst.peak_frequency_hz {
                writeln!(f, "   Peak frequency: {:.1} Hz", peak)?;
            }
        }

        if let Some(anova) = &self.anova {
            writeln!(f)?;
            writeln!(
                f,
                "One-way ANOVA, F({}, {}):",
                anova.df_between, anova.df_within
            )?;
            writeln!(f, "   F statistic: {}", anova.f_statistic)?;
            writeln!(f, "   p-value: {}", anova.p_value)?;
            writeln!(f, "At alpha = {}: {}", anova.alpha, anova.conclusion)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{spectrum, statistics, one_way_anova};
    use crate::processing::Burst;
    use crate::signal::Signal;

    fn output_with(groups: &[&[f64]]) -> PipelineOutput {
        let bursts: Vec<Burst> = groups
            .iter()
            .scan(0, |offset, g| {
                let burst = Burst::new(g.to_vec(), *offset).unwrap();
                *offset += g.len() + 1;
                Some(burst)
            })
            .collect();
        let total: usize = groups.iter().map(|g| g.len() + 1).sum();

        PipelineOutput {
            conditioned: Signal::new(vec![0.0; total], 10.0).unwrap(),
            windowed: Signal::new(vec![0.0; total], 10.0).unwrap(),
            spectra: bursts.iter().map(|b| spectrum(b, 10.0)).collect(),
            statistics: bursts.iter().map(statistics::summarize).collect(),
            anova: Some(one_way_anova(groups).unwrap()),
            bursts,
        }
    }

    #[test]
    fn test_significant_report() {
        let output = output_with(&[&[1.0, 1.1, 0.9], &[10.0, 10.1, 9.9]]);
        let report = AnalysisReport::from_output(&output, 0.05);

        assert_eq!(report.bursts.len(), 2);
        assert_eq!(report.bursts[0].number, 1);
        assert_eq!(report.bursts[1].start, 4);
        assert!((report.bursts[1].mean - 10.0).abs() < 1e-12);
        assert!((report.bursts[0].duration_secs - 0.3).abs() < 1e-12);

        let anova = report.anova.as_ref().unwrap();
        assert!(anova.significant);
        assert!(anova.conclusion.starts_with("reject"));

        let text = report.to_string();
        assert!(text.contains("Burst 2 (3 samples"));
        assert!(text.contains("reject the null hypothesis"));
    }

    #[test]
    fn test_non_significant_report() {
        let output = output_with(&[&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]]);
        let report = AnalysisReport::from_output(&output, 0.05);
        let anova = report.anova.unwrap();
        assert!(!anova.significant);
        assert!(anova.conclusion.starts_with("fail to reject"));
    }

    #[test]
    fn test_json_report() {
        let mut output = output_with(&[&[1.0, 2.0], &[3.0, 4.0]]);
        output.anova = None;
        let report = AnalysisReport::from_output(&output, 0.05);

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["bursts"].as_array().unwrap().len(), 2);
        assert_eq!(json["bursts"][1]["number"], 2);
        assert!(json["anova"].is_null());
    }
}
