// src/config/mod.rs
//! Analysis configuration

pub mod constants;
pub mod loader;

pub use constants::*;
pub use loader::{load_config, ConfigLoader};

use crate::error::{EmgError, EmgResult};
use serde::{Deserialize, Serialize};

/// Complete analysis configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Sample rate of the recording; never derived from its timestamps
    #[serde(default = "defaults::sample_rate_hz")]
    pub sample_rate_hz: f64,

    /// Samples per tapering window
    #[serde(default = "defaults::window_size")]
    pub window_size: usize,

    /// Alpha the ANOVA p-value is judged against
    #[serde(default = "defaults::significance_level")]
    pub significance_level: f64,

    /// Filter cascade settings
    #[serde(default)]
    pub conditioning: ConditioningConfig,
}

/// High-pass and low-pass stage settings of the conditioning cascade
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConditioningConfig {
    /// First stage
    #[serde(default = "defaults::highpass")]
    pub highpass: FilterStageConfig,

    /// Second stage
    #[serde(default = "defaults::lowpass")]
    pub lowpass: FilterStageConfig,
}

/// One Butterworth stage
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FilterStageConfig {
    /// Cutoff frequency in Hz
    pub cutoff_hz: f64,
    /// Butterworth order
    pub order: usize,
}

/// Default value providers using constants
mod defaults {
    use super::FilterStageConfig;
    use crate::config::constants::*;

    pub fn sample_rate_hz() -> f64 { signal::DEFAULT_SAMPLE_RATE_HZ }
    pub fn window_size() -> usize { windowing::DEFAULT_WINDOW_SIZE }
    pub fn significance_level() -> f64 { analysis::DEFAULT_SIGNIFICANCE_LEVEL }

    pub fn highpass() -> FilterStageConfig {
        FilterStageConfig {
            cutoff_hz: conditioning::HIGHPASS_CUTOFF_HZ,
            order: conditioning::HIGHPASS_ORDER,
        }
    }

    pub fn lowpass() -> FilterStageConfig {
        FilterStageConfig {
            cutoff_hz: conditioning::LOWPASS_CUTOFF_HZ,
            order: conditioning::LOWPASS_ORDER,
        }
    }
}

impl Default for ConditioningConfig {
    fn default() -> Self {
        Self {
            highpass: defaults::highpass(),
            lowpass: defaults::lowpass(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: defaults::sample_rate_hz(),
            window_size: defaults::window_size(),
            significance_level: defaults::significance_level(),
            conditioning: ConditioningConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Check configuration consistency
    pub fn validate(&self) -> EmgResult<()> {
        let mut errors = Vec::new();

        if !self.sample_rate_hz.is_finite() || self.sample_rate_hz <= 0.0 {
            errors.push(format!("sample_rate_hz must be positive, got {}", self.sample_rate_hz));
        }

        if self.window_size < windowing::MIN_WINDOW_SIZE {
            errors.push(format!(
                "window_size must be at least {}, got {}",
                windowing::MIN_WINDOW_SIZE,
                self.window_size
            ));
        }

        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            errors.push(format!(
                "significance_level must lie in (0, 1), got {}",
                self.significance_level
            ));
        }

        // Cutoff frequencies vs sampling rate
        let nyquist = self.sample_rate_hz / 2.0;
        for (name, stage) in [
            ("highpass", &self.conditioning.highpass),
            ("lowpass", &self.conditioning.lowpass),
        ] {
            if !(stage.cutoff_hz > 0.0 && stage.cutoff_hz < nyquist) {
                errors.push(format!(
                    "{} cutoff ({} Hz) must lie between 0 and the Nyquist frequency ({} Hz)",
                    name, stage.cutoff_hz, nyquist
                ));
            }
            if stage.order == 0 {
                errors.push(format!("{} order must be at least 1", name));
            }
        }

        if self.conditioning.lowpass.cutoff_hz <= self.conditioning.highpass.cutoff_hz {
            errors.push(format!(
                "lowpass cutoff ({} Hz) must be above the highpass cutoff ({} Hz)",
                self.conditioning.lowpass.cutoff_hz, self.conditioning.highpass.cutoff_hz
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EmgError::configuration(errors.join("; ")))
        }
    }

    /// Serialize as pretty TOML
    pub fn to_toml(&self) -> EmgResult<String> {
        toml::to_string_pretty(self).map_err(|e| EmgError::configuration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_creation() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sample_rate_hz, 2000.0);
        assert_eq!(config.window_size, 256);
        assert_eq!(config.significance_level, 0.05);
        assert_eq!(config.conditioning.highpass.cutoff_hz, 200.0);
        assert_eq!(config.conditioning.lowpass.cutoff_hz, 300.0);
        assert_eq!(config.conditioning.highpass.order, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AnalysisConfig::default();
        let toml_str = config.to_toml().unwrap();
        let deserialized: AnalysisConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AnalysisConfig = toml::from_str(
            r#"
window_size = 128

[conditioning.lowpass]
cutoff_hz = 400.0
order = 2
"#,
        )
        .unwrap();

        assert_eq!(config.window_size, 128);
        assert_eq!(config.sample_rate_hz, 2000.0);
        assert_eq!(config.conditioning.lowpass.order, 2);
        assert_eq!(config.conditioning.highpass.cutoff_hz, 200.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AnalysisConfig::default();
        config.conditioning.lowpass.cutoff_hz = 1500.0;
        config.window_size = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("lowpass cutoff"));
        assert!(err.contains("window_size"));
    }

    #[test]
    fn test_significance_level_bounds() {
        let mut config = AnalysisConfig::default();
        config.significance_level = 1.5;
        assert!(config.validate().is_err());
        config.significance_level = 0.0;
        assert!(config.validate().is_err());
    }
}
