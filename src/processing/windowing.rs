// src/processing/windowing.rs
//! Block tapering of a conditioned signal

use crate::config::constants::windowing::MIN_WINDOW_SIZE;
use crate::error::{EmgError, EmgResult};
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::debug;

/// Tapering window shapes.
///
/// Only shapes whose endpoints are exactly zero are offered: burst
/// segmentation treats those zeros as block boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Hann raised cosine
    #[default]
    Hanning,
}

/// Splits a signal into non-overlapping blocks and tapers each block
#[derive(Debug, Clone)]
pub struct Windower {
    window_size: usize,
    window_function: Vec<f64>,
}

impl Windower {
    /// Create a windower with the default Hann taper
    pub fn new(window_size: usize) -> EmgResult<Self> {
        Self::with_window_type(window_size, WindowType::default())
    }

    /// Create a windower with an explicit taper
    pub fn with_window_type(window_size: usize, window_type: WindowType) -> EmgResult<Self> {
        if window_size < MIN_WINDOW_SIZE {
            return Err(EmgError::invalid_data(format!(
                "window size must be at least {}, got {}",
                MIN_WINDOW_SIZE, window_size
            )));
        }

        Ok(Self {
            window_size,
            window_function: generate_window_function(window_type, window_size),
        })
    }

    /// Samples per block
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Taper applied to every block
    pub fn window_function(&self) -> &[f64] {
        &self.window_function
    }

    /// Number of samples kept from an input of `len` samples
    pub fn output_len(&self, len: usize) -> usize {
        (len / self.window_size) * self.window_size
    }

    /// Taper every full block of `signal` and concatenate the results.
    ///
    /// The trailing `len % window_size` samples are dropped; a signal shorter
    /// than one block yields an empty signal.
    pub fn apply(&self, signal: &Signal) -> Signal {
        let windowed: Vec<f64> = signal
            .samples()
            .chunks_exact(self.window_size)
            .flat_map(|block| {
                block
                    .iter()
                    .zip(self.window_function.iter())
                    .map(|(&sample, &window)| sample * window)
            })
            .collect();

        debug!(
            input = signal.len(),
            output = windowed.len(),
            blocks = windowed.len() / self.window_size,
            "applied window"
        );
        signal.derive(windowed)
    }
}

/// Window `signal` with a Hann taper of `window_size` samples
pub fn apply_window(signal: &Signal, window_size: usize) -> EmgResult<Signal> {
    Ok(Windower::new(window_size)?.apply(signal))
}

/// Symmetric window of `size` samples; a single-sample window is `[1.0]`
pub fn generate_window_function(window_type: WindowType, size: usize) -> Vec<f64> {
    if size == 1 {
        return vec![1.0];
    }

    match window_type {
        WindowType::Hanning => (0..size)
            .map(|i| 0.5 - 0.5 * (2.0 * PI * i as f64 / (size - 1) as f64).cos())
            .collect(),
    }
}
