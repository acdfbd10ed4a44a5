//! Simulation driver and program loading.
//!
//! Provides the run loop that steps the pipeline to completion and the
//! helpers that turn raw images into instruction words.

/// Raw program image loading.
pub mod loader;

/// Run loop and cycle estimation.
pub mod simulator;

pub use simulator::{RunReport, Simulator};
