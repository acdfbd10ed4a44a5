//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the entries carried between the five stages:
//! Fetch → Read → Execute → Retire-prep → Writeback.
//!
//! 1. **Lane Pairs:** Every boundary carries one scalar-lane and one vector-lane entry.
//! 2. **Bubbles:** Empty slots are explicit entries with `bubble` set and no outputs.
//! 3. **Metadata Only:** Entries carry opcode and output registers, never values.

use crate::common::reg::{RegId, VRegMask};
use crate::isa::opcode::Opcode;

/// One entry per lane at a stage boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LanePair<T> {
    /// Scalar-unit lane.
    pub su: T,
    /// Vector-unit lane.
    pub vu: T,
}

impl<T: Copy> LanePair<T> {
    /// Both lanes set to `slot`.
    pub const fn splat(slot: T) -> Self {
        Self { su: slot, vu: slot }
    }
}

/// Entry in the IF/RD latch: the raw word picked by Fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchSlot {
    /// Address the word was fetched from.
    pub pc: u32,
    /// Instruction word.
    pub word: u32,
    /// Whether this lane was left empty.
    pub bubble: bool,
}

impl FetchSlot {
    /// Empty fetch slot.
    pub const BUBBLE: Self = Self {
        pc: 0,
        word: 0,
        bubble: true,
    };
}

/// Entry in the RD/EX latch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IssueSlot {
    /// Address of the instruction.
    pub pc: u32,
    /// Decoded opcode.
    pub opcode: Opcode,
    /// Scalar destination (always `None` on the vector lane).
    pub r_out: RegId,
    /// Vector registers written.
    pub v_out: VRegMask,
    /// Whether this lane carries no instruction.
    pub bubble: bool,
}

impl IssueSlot {
    /// Empty issue slot.
    pub const BUBBLE: Self = Self {
        pc: 0,
        opcode: Opcode::Invalid,
        r_out: None,
        v_out: 0,
        bubble: true,
    };
}

/// Entry in the EX/DF and DF/WB latches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetireSlot {
    /// Opcode in flight.
    pub opcode: Opcode,
    /// Scalar destination holding a lock.
    pub r_out: RegId,
    /// Vector registers holding locks.
    pub v_out: VRegMask,
    /// Whether this lane carries no instruction.
    pub bubble: bool,
}

impl RetireSlot {
    /// Empty retire slot.
    pub const BUBBLE: Self = Self {
        opcode: Opcode::Invalid,
        r_out: None,
        v_out: 0,
        bubble: true,
    };
}

impl From<IssueSlot> for RetireSlot {
    fn from(slot: IssueSlot) -> Self {
        Self {
            opcode: slot.opcode,
            r_out: slot.r_out,
            v_out: slot.v_out,
            bubble: slot.bubble,
        }
    }
}

/// Record of what Writeback retired last cycle.
///
/// Its vector mask stays hazard-visible to Read for one more cycle, and its
/// scalar opcode drives the load/store interlock in Execute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RetiredSlot {
    /// Opcode retired.
    pub opcode: Opcode,
    /// Vector registers written.
    pub v_out: VRegMask,
}

impl From<RetireSlot> for RetiredSlot {
    fn from(slot: RetireSlot) -> Self {
        Self {
            opcode: slot.opcode,
            v_out: slot.v_out,
        }
    }
}
