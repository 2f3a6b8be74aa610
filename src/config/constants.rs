// src/config/constants.rs
//! Analysis constants

/// Acquisition constants
pub mod signal {
    /// Sample rate of the recordings the pipeline is tuned for
    pub const DEFAULT_SAMPLE_RATE_HZ: f64 = 2000.0;
}

/// Fixed conditioning cascade
pub mod conditioning {
    /// High-pass cutoff in Hz
    pub const HIGHPASS_CUTOFF_HZ: f64 = 200.0;
    /// High-pass Butterworth order
    pub const HIGHPASS_ORDER: usize = 4;
    /// Low-pass cutoff in Hz
    pub const LOWPASS_CUTOFF_HZ: f64 = 300.0;
    /// Low-pass Butterworth order
    pub const LOWPASS_ORDER: usize = 4;
}

/// Windowing and segmentation constants
pub mod windowing {
    /// Samples per tapering window
    pub const DEFAULT_WINDOW_SIZE: usize = 256;
    /// Smallest accepted window size
    pub const MIN_WINDOW_SIZE: usize = 1;
}

/// Statistical analysis constants
pub mod analysis {
    /// Threshold the ANOVA p-value is judged against
    pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
}

/// Configuration file locations and environment overrides
pub mod paths {
    /// Optional configuration file read from the working directory
    pub const DEFAULT_CONFIG_FILE: &str = "emg-burst.toml";
    /// Prefix of environment variables that override configuration keys.
    /// Nested keys are separated by a double underscore.
    pub const ENV_PREFIX: &str = "EMG_BURST_";
    /// Separator between nested keys in an override variable
    pub const ENV_NESTING_SEPARATOR: &str = "__";
}
