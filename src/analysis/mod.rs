// src/analysis/mod.rs
//! Per-burst analysis: spectra, descriptive statistics and the one-way
//! variance test across bursts

pub mod anova;
pub mod special;
pub mod spectrum;
pub mod statistics;

pub use anova::*;
pub use spectrum::*;
pub use statistics::*;
