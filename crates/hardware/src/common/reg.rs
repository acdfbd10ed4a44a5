//! Register ids and register masks.
//!
//! Scalar operands are reported as `Option<usize>` ids: `None` means the
//! instruction has no such operand. Vector and vector-control operands are
//! fixed-width bitmasks so hazard tests stay a single bitwise AND.
//!
//! Binary consumers that expect the classic integer encoding use `to_raw` /
//! `from_raw`, which keep the `-1` "no register" sentinel bit-exact.

/// A scalar register id, or `None` when the operand is absent.
pub type RegId = Option<usize>;

/// Set of vector registers (bit `n` = `v<n>`).
pub type VRegMask = u32;

/// Set of vector control registers (bit0 = VCO, bit1 = VCC, bit2 = VCE).
pub type VcMask = u8;

/// Raw value used for "no register" at integer boundaries.
pub const RAW_NONE: i32 = -1;

/// Vector-control carry/not-equal register.
pub const VC_VCO: VcMask = 1 << 0;
/// Vector-control compare register.
pub const VC_VCC: VcMask = 1 << 1;
/// Vector-control clip-compare extension register.
pub const VC_VCE: VcMask = 1 << 2;

/// Converts a register id to its raw integer form.
#[inline]
pub fn to_raw(reg: RegId) -> i32 {
    reg.map_or(RAW_NONE, |r| r as i32)
}

/// Converts a raw integer register id back; anything outside `0..32` is `None`.
#[inline]
pub fn from_raw(raw: i32) -> RegId {
    (0..32).contains(&raw).then_some(raw as usize)
}

/// Mask selecting a single vector register.
#[inline(always)]
pub const fn vreg(n: u32) -> VRegMask {
    1 << (n & 31)
}

/// Mask selecting the group of eight consecutive vector registers containing `n`.
#[inline(always)]
pub const fn vreg_block(n: u32) -> VRegMask {
    0xFF << (n & 31 & !7)
}

/// Iterates the register indices set in a vector mask, lowest first.
pub fn mask_regs(mask: VRegMask) -> impl Iterator<Item = usize> {
    (0..32usize).filter(move |i| mask & (1 << i) != 0)
}
