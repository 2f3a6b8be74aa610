// src/io/mod.rs
//! Reading recordings from disk

pub mod recording;

pub use recording::{load_recording, parse_recording, Recording};
