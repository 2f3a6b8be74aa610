// src/processing/pipeline.rs
//! Batch burst analysis pipeline
//!
//! raw signal -> conditioning -> windowing -> burst extraction ->
//! {spectra, statistics, ANOVA}. Each stage's output is handed to the next
//! explicitly and kept in [`PipelineOutput`].

use crate::analysis::{
    anova, statistics, AnovaResult, BurstStatisticsRecord, SpectralAnalyzer, SpectrumRecord,
};
use crate::config::AnalysisConfig;
use crate::error::{EmgError, EmgResult};
use crate::processing::conditioner::SignalConditioner;
use crate::processing::segmentation::{extract_bursts, Burst};
use crate::processing::windowing::Windower;
use crate::signal::Signal;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};

/// Burst analysis pipeline over a whole recording
#[derive(Debug, Clone)]
pub struct BurstPipeline {
    conditioner: SignalConditioner,
    windower: Windower,
    sample_rate_hz: f64,
}

/// Every intermediate and final product of a pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Band-passed signal, same length as the input
    pub conditioned: Signal,
    /// Tapered whole blocks of the conditioned signal
    pub windowed: Signal,
    /// Bursts in order of occurrence
    pub bursts: Vec<Burst>,
    /// One spectrum per burst, in burst order
    pub spectra: Vec<SpectrumRecord>,
    /// One summary per burst, in burst order
    pub statistics: Vec<BurstStatisticsRecord>,
    /// Present after [`BurstPipeline::run`], absent after
    /// [`BurstPipeline::run_descriptive`]
    pub anova: Option<AnovaResult>,
}

impl BurstPipeline {
    /// Build the pipeline from a validated configuration
    pub fn new(config: &AnalysisConfig) -> EmgResult<Self> {
        config.validate()?;

        Ok(Self {
            conditioner: SignalConditioner::from_config(&config.conditioning, config.sample_rate_hz)?,
            windower: Windower::new(config.window_size)?,
            sample_rate_hz: config.sample_rate_hz,
        })
    }

    /// Pipeline with the fixed EMG conditioning cascade at `sample_rate_hz`
    pub fn emg_default(sample_rate_hz: f64, window_size: usize) -> EmgResult<Self> {
        Ok(Self {
            conditioner: SignalConditioner::emg_default(sample_rate_hz)?,
            windower: Windower::new(window_size)?,
            sample_rate_hz,
        })
    }

    /// Conditioning cascade
    pub fn conditioner(&self) -> &SignalConditioner {
        &self.conditioner
    }

    /// Block windower
    pub fn windower(&self) -> &Windower {
        &self.windower
    }

    /// Sample rate the filters were designed for
    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Run every stage including the ANOVA across bursts.
    ///
    /// Fails with [`EmgError::InsufficientGroups`] when fewer than two
    /// bursts are found.
    pub fn run(&self, raw: &Signal) -> EmgResult<PipelineOutput> {
        let mut output = self.run_descriptive(raw)?;

        let result = anova::compare(&output.bursts)?;
        info!(
            f_statistic = result.f_statistic,
            p_value = result.p_value,
            df_between = result.df_between,
            df_within = result.df_within,
            "burst means compared"
        );

        output.anova = Some(result);
        Ok(output)
    }

    /// Run every stage except the ANOVA
    pub fn run_descriptive(&self, raw: &Signal) -> EmgResult<PipelineOutput> {
        if raw.sample_rate_hz() != self.sample_rate_hz {
            return Err(EmgError::invalid_data(format!(
                "signal sampled at {} Hz but pipeline designed for {} Hz",
                raw.sample_rate_hz(),
                self.sample_rate_hz
            )));
        }

        let start = Instant::now();

        let conditioned = self.conditioner.condition(raw)?;
        let windowed = self.windower.apply(&conditioned);
        let bursts = extract_bursts(&windowed);

        if bursts.is_empty() {
            warn!(samples = windowed.len(), "windowed signal contains no bursts");
        }

        let mut analyzer = SpectralAnalyzer::new();
        let spectra = bursts
            .iter()
            .map(|burst| analyzer.spectrum(burst, self.sample_rate_hz))
            .collect();
        let statistics = bursts.iter().map(statistics::summarize).collect();

        info!(
            raw_samples = raw.len(),
            windowed_samples = windowed.len(),
            bursts = bursts.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "pipeline stages complete"
        );

        Ok(PipelineOutput {
            conditioned,
            windowed,
            bursts,
            spectra,
            statistics,
            anova: None,
        })
    }
}
