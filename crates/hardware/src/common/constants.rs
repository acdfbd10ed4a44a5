//! Global Constants.
//!
//! This module defines constants used across the model. It includes:
//! 1. **Instruction Memory:** Size, address mask and word size of the coprocessor IMEM.
//! 2. **Register Files:** Scalar and vector register counts.
//! 3. **Run Loop:** Fill/drain depth and the default iteration safety cap.

/// Size of one instruction word in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Instruction memory size in bytes (4 KiB).
pub const IMEM_SIZE: u32 = 0x1000;

/// Mask applied to the fetch PC before the window test.
pub const IMEM_ADDR_MASK: u32 = IMEM_SIZE - 1;

/// Word returned for any fetch outside the instruction-memory window (`BREAK`).
pub const TERMINATOR_WORD: u32 = 0x0000_000D;

/// Number of scalar general-purpose registers.
pub const SCALAR_REG_COUNT: usize = 32;

/// Number of vector registers.
pub const VECTOR_REG_COUNT: usize = 32;

/// Cycles subtracted from a raw step count: four fill cycles plus the
/// cycle in which the terminator retires.
pub const DEFAULT_WARMUP_CYCLES: u64 = 5;

/// Default iteration cap for the caller-driven run loop.
pub const DEFAULT_MAX_CYCLES: u64 = 2000;
