//! Common utilities and types used throughout the pipeline timing model.
//!
//! This module provides the small building blocks shared by every other module:
//! 1. **Constants:** Instruction-memory geometry, the terminator word, run-loop defaults.
//! 2. **Error Handling:** The caller-level `SimError` type.
//! 3. **Register Ids:** Conversion between `Option<usize>` register ids and the raw `-1` sentinel.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for caller-level failures.
pub mod error;

/// Register id helpers.
pub mod reg;

pub use constants::{IMEM_ADDR_MASK, INSTRUCTION_SIZE, TERMINATOR_WORD};
pub use error::SimError;
pub use reg::{RegId, VRegMask, VcMask};
