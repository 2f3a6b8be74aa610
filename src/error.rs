// src/error.rs
//! Unified error handling for the burst analysis pipeline
//!
//! Every fallible operation in the crate returns [`EmgResult`]. The variants
//! are terminal for the operation that raised them: filter design, filtering
//! and segmentation are deterministic, so repeating a failed call with the
//! same inputs fails the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unified error type for the burst analysis system
#[derive(Debug, Error)]
pub enum EmgError {
    /// Cutoff outside `(0, fs/2)`, non-finite parameters, or order of zero
    #[error("[FILTER] Invalid filter specification: {reason}")]
    InvalidFilterSpecification {
        /// Human readable description of the violated precondition
        reason: String,
    },

    /// A conditioner stage could not be designed
    #[error("[FILTER] Filter design failed for {stage} stage")]
    FilterDesignError {
        /// Stage whose coefficients could not be produced
        stage: ProcessingStage,
        /// Underlying design failure
        #[source]
        source: Box<EmgError>,
    },

    /// Filtering produced a NaN or infinite sample
    #[error("[PROCESSING] Numerical instability in {stage} stage at sample {index}")]
    NumericalInstability {
        /// Stage that produced the non-finite value
        stage: ProcessingStage,
        /// Index of the first non-finite output sample
        index: usize,
    },

    /// Fewer than two bursts were available for a group comparison
    #[error("[ANALYSIS] At least 2 non-empty groups are required, found {found}")]
    InsufficientGroups {
        /// Number of groups supplied
        found: usize,
    },

    /// Malformed input data
    #[error("[DATA] Invalid data: {reason}")]
    InvalidData {
        /// What was wrong with the data
        reason: String,
    },

    /// Configuration could not be parsed or failed validation
    #[error("[CONFIG] Configuration error: {reason}")]
    Configuration {
        /// Parse or validation message
        reason: String,
    },

    /// Filesystem access failed
    #[error("[IO] {0}")]
    Io(#[from] std::io::Error),
}

/// Signal processing stages for error tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingStage {
    /// High-pass conditioning stage
    HighPass,
    /// Low-pass conditioning stage
    LowPass,
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingStage::HighPass => write!(f, "high-pass"),
            ProcessingStage::LowPass => write!(f, "low-pass"),
        }
    }
}

impl EmgError {
    /// Shorthand for [`EmgError::InvalidFilterSpecification`]
    pub fn invalid_filter(reason: impl Into<String>) -> Self {
        EmgError::InvalidFilterSpecification { reason: reason.into() }
    }

    /// Shorthand for [`EmgError::InvalidData`]
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        EmgError::InvalidData { reason: reason.into() }
    }

    /// Shorthand for [`EmgError::Configuration`]
    pub fn configuration(reason: impl Into<String>) -> Self {
        EmgError::Configuration { reason: reason.into() }
    }
}

impl From<toml::de::Error> for EmgError {
    fn from(err: toml::de::Error) -> Self {
        EmgError::Configuration { reason: err.to_string() }
    }
}

/// Result type alias for EMG operations
pub type EmgResult<T> = Result<T, EmgError>;
