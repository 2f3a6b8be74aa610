// src/processing/mod.rs
//! Signal processing stages for burst analysis

pub mod conditioner;
pub mod filters;
pub mod pipeline;
pub mod segmentation;
pub mod windowing;

pub use conditioner::*;
pub use filters::{ButterworthDesigner, FilterCoefficients, FilterKind, ZeroPhaseFilter};
pub use pipeline::*;
pub use segmentation::*;
pub use windowing::*;
