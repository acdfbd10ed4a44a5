//! Instruction pipeline implementation.
//!
//! This module contains the dual-lane five-stage timing pipeline. It includes
//! the following components:
//! 1. **Engine:** Pipeline state and the per-cycle step.
//! 2. **Hazards:** Scalar bypass rules, vector in-flight checks, the load/store interlock.
//! 3. **Latches:** Inter-stage buffers, one entry per lane.
//! 4. **Locks:** Per-register outstanding-writer counters.
//! 5. **Stages:** Fetch, Read, Execute, Retire-prep and Writeback.

/// Pipeline state and cycle stepping.
pub mod engine;

/// Pipeline hazard detection.
pub mod hazards;

/// Inter-stage pipeline latches (IF/RD, RD/EX, EX/DF, DF/WB).
pub mod latches;

/// Register lock counters.
pub mod locks;

/// Pipeline stage implementations (fetch, read, execute, retire-prep, writeback).
pub mod stages;

pub use self::engine::{FetchCursor, Pipeline};
