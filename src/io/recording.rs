// src/io/recording.rs
//! Two-column `time,voltage` recordings
//!
//! One sample per line. Blank lines and lines starting with `#` are
//! skipped, and whitespace around fields is ignored. Columns past the second
//! are ignored. The time column is kept for plotting only: the sample rate
//! always comes from the caller.

use crate::error::{EmgError, EmgResult};
use crate::signal::Signal;
use std::path::Path;
use tracing::{debug, info};

/// Parsed recording: the timestamp column plus the voltage signal
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// Timestamps as written in the file
    pub time: Vec<f64>,
    /// Voltage column sampled at the supplied rate
    pub signal: Signal,
}

impl Recording {
    /// Number of rows read
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether no rows were read
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Parse recording text sampled at `sample_rate_hz`
pub fn parse_recording(text: &str, sample_rate_hz: f64) -> EmgResult<Recording> {
    let mut time = Vec::new();
    let mut voltage = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (t, v) = parse_row(line).ok_or_else(|| {
            EmgError::invalid_data(format!(
                "line {}: expected two numeric columns, got {:?}",
                line_no + 1,
                line
            ))
        })?;
        time.push(t);
        voltage.push(v);
    }

    debug!(samples = voltage.len(), sample_rate_hz, "parsed recording");

    Ok(Recording {
        time,
        signal: Signal::new(voltage, sample_rate_hz)?,
    })
}

fn parse_row(line: &str) -> Option<(f64, f64)> {
    let mut fields = line.split(',').map(str::trim);
    let time = fields.next()?.parse().ok()?;
    let voltage = fields.next()?.parse().ok()?;
    Some((time, voltage))
}

/// Read and parse the recording at `path`
pub fn load_recording<P: AsRef<Path>>(path: P, sample_rate_hz: f64) -> EmgResult<Recording> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let recording = parse_recording(&text, sample_rate_hz)?;

    info!(
        path = %path.display(),
        samples = recording.len(),
        duration_secs = recording.signal.duration_secs(),
        "loaded recording"
    );
    Ok(recording)
}
