//! EMG-Burst: offline EMG burst extraction and analysis
//!
//! This library turns a single-channel surface EMG recording into per-burst
//! statistics and a one-way variance test across bursts. It features:
//!
//! - Zero-phase Butterworth high-pass and low-pass conditioning
//! - Hann block windowing and zero-delimited burst extraction
//! - Per-burst magnitude spectra and descriptive statistics
//! - One-way ANOVA of burst means with an F-distribution p-value
//! - Layered TOML / environment configuration
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use emg_burst::config::AnalysisConfig;
//! use emg_burst::io::load_recording;
//! use emg_burst::processing::BurstPipeline;
//! use emg_burst::report::AnalysisReport;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AnalysisConfig::default();
//!     let recording = load_recording("recording.csv", config.sample_rate_hz)?;
//!
//!     let pipeline = BurstPipeline::new(&config)?;
//!     let output = pipeline.run(&recording.signal)?;
//!
//!     println!("{}", AnalysisReport::from_output(&output, config.significance_level));
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod processing;
pub mod report;
pub mod signal;

// Re-export commonly used types for convenience
pub use analysis::{AnovaResult, BurstStatisticsRecord, SpectrumRecord};
pub use config::AnalysisConfig;
pub use error::{EmgError, EmgResult, ProcessingStage};
pub use processing::{Burst, BurstPipeline, PipelineOutput, SignalConditioner, Windower};
pub use signal::Signal;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: "Offline EMG burst extraction and analysis library".to_string(),
        features: vec![
            "Zero-phase Butterworth conditioning".to_string(),
            "Hann windowing and burst extraction".to_string(),
            "Burst spectra and statistics".to_string(),
            "One-way ANOVA across bursts".to_string(),
        ],
    }
}

/// Library version information
#[derive(Debug, Clone)]
pub struct VersionInfo {
    /// Library name
    pub name: String,
    /// Version string
    pub version: String,
    /// Description
    pub description: String,
    /// List of features
    pub features: Vec<String>,
}
