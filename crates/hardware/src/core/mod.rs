//! Core timing model.
//!
//! This module contains the instruction-memory view the pipeline fetches from
//! and the dual-lane five-stage pipeline itself.

/// Read-only instruction-memory window.
pub mod imem;

/// Dual-lane pipeline implementation (stages, latches, locks, hazards).
pub mod pipeline;

pub use self::imem::InstructionMemory;
pub use self::pipeline::Pipeline;
