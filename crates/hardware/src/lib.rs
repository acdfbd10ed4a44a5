//! Dual-lane pipeline timing model library.
//!
//! This crate implements a cycle-level timing model of a scalar unit paired
//! with a SIMD vector coprocessor, with the following:
//! 1. **ISA:** Opcode classification, decoding, encoding and disassembly.
//! 2. **Core:** The five-stage, two-lane pipeline (fetch packing, hazards, locks).
//! 3. **Generator:** Reproducible random timing programs.
//! 4. **Simulation:** Run loop, cycle estimation, image loading, configuration and statistics.

/// Common types and constants (register ids, masks, errors).
pub mod common;
/// Run configuration (defaults, generator categories, JSON loading).
pub mod config;
/// Instruction memory and the pipeline.
pub mod core;
/// Random program generator and RNG.
pub mod generator;
/// Instruction set (opcodes, decode, encode, disassembly, ABI).
pub mod isa;
/// Run loop and program loading.
pub mod sim;
/// Pipeline statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Pipeline state; construct with `Pipeline::new` and advance with `step`.
pub use crate::core::Pipeline;
/// Run driver; owns the safety cap and warm-up subtraction.
pub use crate::sim::Simulator;
