//! Register lock counters.
//!
//! Each architectural register has a count of in-flight writers. Read
//! acquires a lock for every register an issuing instruction writes and
//! Writeback releases it. Scalar register 0 is never locked.

use tracing::warn;

use crate::common::constants::{SCALAR_REG_COUNT, VECTOR_REG_COUNT};
use crate::common::reg::{RegId, VRegMask, mask_regs};

/// Outstanding-writer counters for the scalar and vector register files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterLocks {
    scalar: [u8; SCALAR_REG_COUNT],
    vector: [u8; VECTOR_REG_COUNT],
}

impl Default for RegisterLocks {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterLocks {
    /// All registers unlocked.
    pub const fn new() -> Self {
        Self {
            scalar: [0; SCALAR_REG_COUNT],
            vector: [0; VECTOR_REG_COUNT],
        }
    }

    /// Number of pending writers of scalar register `reg`.
    pub fn scalar(&self, reg: usize) -> u8 {
        self.scalar.get(reg).copied().unwrap_or(0)
    }

    /// Number of pending writers of vector register `reg`.
    pub fn vector(&self, reg: usize) -> u8 {
        self.vector.get(reg).copied().unwrap_or(0)
    }

    /// Whether scalar register `reg` has a pending writer.
    pub fn is_locked(&self, reg: usize) -> bool {
        self.scalar(reg) > 0
    }

    /// Locks a scalar destination. No-op for `None` and register 0.
    pub fn acquire_scalar(&mut self, reg: RegId) {
        if let Some(count) = Self::scalar_slot(&mut self.scalar, reg) {
            *count = count.saturating_add(1);
        }
    }

    /// Releases a scalar destination. No-op for `None` and register 0.
    pub fn release_scalar(&mut self, reg: RegId) {
        if let Some(count) = Self::scalar_slot(&mut self.scalar, reg) {
            match count.checked_sub(1) {
                Some(n) => *count = n,
                None => warn!(reg = ?reg, "scalar lock released while not held"),
            }
        }
    }

    /// Locks every register in `mask`.
    pub fn acquire_vector(&mut self, mask: VRegMask) {
        for reg in mask_regs(mask) {
            self.vector[reg] = self.vector[reg].saturating_add(1);
        }
    }

    /// Releases every register in `mask`.
    pub fn release_vector(&mut self, mask: VRegMask) {
        for reg in mask_regs(mask) {
            match self.vector[reg].checked_sub(1) {
                Some(n) => self.vector[reg] = n,
                None => warn!(reg, "vector lock released while not held"),
            }
        }
    }

    /// Whether every counter is zero.
    pub fn is_clear(&self) -> bool {
        self.scalar.iter().chain(self.vector.iter()).all(|&c| c == 0)
    }

    fn scalar_slot(scalar: &mut [u8; SCALAR_REG_COUNT], reg: RegId) -> Option<&mut u8> {
        match reg {
            Some(r) if r > 0 => scalar.get_mut(r),
            _ => None,
        }
    }
}
