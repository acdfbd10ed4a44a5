//! Random instruction-stream generator.
//!
//! Produces reproducible timing programs for the pipeline model:
//! 1. **RNG:** A caller-owned xorshift32 state.
//! 2. **Program:** Category-weighted instruction draws wrapped in a clock-reading
//!    prologue and epilogue.

/// Random program layout and instruction draws.
pub mod program;

/// Xorshift32 pseudo-random source.
pub mod rng;

pub use program::{Categories, GeneratedProgram, Generator, listing};
pub use rng::Xorshift32;
