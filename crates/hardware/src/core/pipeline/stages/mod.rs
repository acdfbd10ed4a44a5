//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! dual-lane pipeline. It includes:
//! 1. **Fetch:** Packs up to one scalar and one vector instruction per cycle.
//! 2. **Read:** Checks hazards and acquires register locks.
//! 3. **Execute:** Resolves the load/store interlock and delay-slot state.
//! 4. **Retire-prep:** Fixed pass-through depth.
//! 5. **Writeback:** Releases locks and detects the terminator.

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Register read stage implementation.
pub mod read;

/// Retire-prep stage implementation.
pub mod retire_prep;

/// Writeback stage implementation.
pub mod writeback;

/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Read stage entry point (RD stage).
pub use read::read_stage;
/// Retire-prep stage entry point (DF stage).
pub use retire_prep::retire_prep_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::writeback_stage;
