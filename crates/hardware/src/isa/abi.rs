//! MIPS ABI register names and coprocessor register numbers.
//!
//! Defines the conventional register indices used by generated programs and
//! the name tables used by the disassembler.

/// Register $0 (hardwired zero).
pub const REG_ZERO: usize = 0;
/// Register $1 (assembler temporary, at).
pub const REG_AT: usize = 1;
/// Register $16 (saved, s0).
pub const REG_S0: usize = 16;
/// Register $17 (saved, s1).
pub const REG_S1: usize = 17;
/// Register $18 (saved, s2).
pub const REG_S2: usize = 18;
/// Register $31 (return address, ra). Implicit destination of `JAL`, `BLTZAL`, `BGEZAL`.
pub const REG_RA: usize = 31;

/// COP0 register: DMA/DP status (writes control the clock counter).
pub const COP0_DP_STATUS: u32 = 11;
/// COP0 register: DP clock counter.
pub const COP0_DP_CLOCK: u32 = 12;

/// `DP_STATUS` write bit that resets the clock counter.
pub const DP_WSTATUS_RESET_CLOCK_COUNTER: i32 = 0x200;

/// ABI names for scalar registers $0-$31.
pub const REG_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "fp", "ra",
];

/// Returns the ABI name of a scalar register.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("$?")
}
