// src/processing/conditioner.rs
//! High-pass then low-pass zero-phase conditioning cascade

use crate::config::{ConditioningConfig, FilterStageConfig};
use crate::error::{EmgError, EmgResult, ProcessingStage};
use crate::processing::filters::{ButterworthDesigner, FilterKind, ZeroPhaseFilter};
use crate::signal::Signal;
use tracing::{debug, warn};

/// Applies a fixed high-pass stage followed by a low-pass stage, each
/// filtered forward and backward.
///
/// Inputs shorter than [`SignalConditioner::min_safe_length`] are still
/// filtered but receive less edge padding, so their ends carry more
/// transient.
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    highpass: ZeroPhaseFilter,
    lowpass: ZeroPhaseFilter,
}

impl SignalConditioner {
    /// The EMG cascade: 200 Hz order-4 high-pass, then 300 Hz order-4 low-pass
    pub fn emg_default(sample_rate_hz: f64) -> EmgResult<Self> {
        Self::from_config(&ConditioningConfig::default(), sample_rate_hz)
    }

    /// Build the cascade from explicit stage settings
    pub fn from_config(config: &ConditioningConfig, sample_rate_hz: f64) -> EmgResult<Self> {
        let highpass = Self::design_stage(
            &config.highpass,
            sample_rate_hz,
            FilterKind::Highpass,
            ProcessingStage::HighPass,
        )?;
        let lowpass = Self::design_stage(
            &config.lowpass,
            sample_rate_hz,
            FilterKind::Lowpass,
            ProcessingStage::LowPass,
        )?;

        Ok(Self { highpass, lowpass })
    }

    fn design_stage(
        stage_config: &FilterStageConfig,
        sample_rate_hz: f64,
        kind: FilterKind,
        stage: ProcessingStage,
    ) -> EmgResult<ZeroPhaseFilter> {
        let coefficients = ButterworthDesigner::design(
            stage_config.cutoff_hz,
            sample_rate_hz,
            stage_config.order,
            kind,
        )
        .map_err(|source| EmgError::FilterDesignError { stage, source: Box::new(source) })?;

        debug!(
            %stage,
            cutoff_hz = stage_config.cutoff_hz,
            order = stage_config.order,
            "designed conditioning stage"
        );
        Ok(ZeroPhaseFilter::new(coefficients, stage))
    }

    /// Filter `signal` through both stages; output length equals input length
    pub fn condition(&self, signal: &Signal) -> EmgResult<Signal> {
        if !signal.is_empty() && signal.len() < self.min_safe_length() {
            warn!(
                samples = signal.len(),
                min_safe = self.min_safe_length(),
                "signal shorter than the conditioner's padding, edges will ring"
            );
        }

        let highpassed = self.highpass.apply(signal.samples())?;
        let conditioned = self.lowpass.apply(&highpassed)?;

        Ok(signal.derive(conditioned))
    }

    /// Shortest input that both stages pad fully
    pub fn min_safe_length(&self) -> usize {
        self.highpass.min_safe_length().max(self.lowpass.min_safe_length())
    }

    /// First stage
    pub fn highpass(&self) -> &ZeroPhaseFilter {
        &self.highpass
    }

    /// Second stage
    pub fn lowpass(&self) -> &ZeroPhaseFilter {
        &self.lowpass
    }
}
