//! Instruction field extraction and the decoded instruction record.
//!
//! Provides bit extraction functions for the MIPS-style scalar encodings and
//! the coprocessor-2 vector encodings, plus the `Decoded` record that the
//! decoder produces and the pipeline consumes.

use crate::common::reg::{RegId, VRegMask, VcMask};
use crate::isa::opcode::Opcode;

/// Bit mask for a 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the 6-bit major opcode and function fields.
pub const FUNCT_MASK: u32 = 0x3F;
/// Bit mask for a 4-bit element selector.
pub const ELEMENT_MASK: u32 = 0xF;
/// Bit mask for the 3-bit destination element of the reciprocal/move group.
pub const DEST_ELEMENT_MASK: u32 = 0x7;
/// Bit mask for the 26-bit jump target field.
pub const TARGET_MASK: u32 = 0x03FF_FFFF;
/// Bit mask for the 7-bit vector load/store offset field.
pub const VOFFSET_MASK: u32 = 0x7F;

/// Bit position of the major opcode field (bits 26-31).
pub const MAJOR_SHIFT: u32 = 26;
/// Bit position of the `rs` / vector-element field (bits 21-25).
pub const RS_SHIFT: u32 = 21;
/// Bit position of the `rt` / `vt` field (bits 16-20).
pub const RT_SHIFT: u32 = 16;
/// Bit position of the `rd` / `vs` / vector-memory-op field (bits 11-15).
pub const RD_SHIFT: u32 = 11;
/// Bit position of the `sa` / `vd` field (bits 6-10).
pub const SA_SHIFT: u32 = 6;
/// Bit position of the element field in moves and vector loads/stores (bits 7-10).
pub const MOVE_ELEMENT_SHIFT: u32 = 7;
/// Bit that selects vector arithmetic within the COP2 major opcode.
pub const VU_COMPUTE_BIT: u32 = 25;

/// Trait for extracting instruction fields from encoded instructions.
pub trait InstructionBits {
    /// Major opcode (bits 26-31).
    fn major(&self) -> u32;
    /// Function field of SPECIAL and vector arithmetic (bits 0-5).
    fn funct(&self) -> u32;
    /// Shift amount (bits 6-10).
    fn sa(&self) -> usize;
    /// Destination register (bits 11-15).
    fn rd(&self) -> usize;
    /// Target / second source register (bits 16-20).
    fn rt(&self) -> usize;
    /// Source / base register (bits 21-25).
    fn rs(&self) -> usize;
    /// Vector destination register (bits 6-10).
    fn vd(&self) -> u32;
    /// Vector source register (bits 11-15).
    fn vs(&self) -> u32;
    /// Vector target register (bits 16-20).
    fn vt(&self) -> u32;
    /// Element selector of vector arithmetic (bits 21-24).
    fn vu_element(&self) -> u8;
    /// Destination element of the reciprocal/move group (bits 11-13).
    fn dest_element(&self) -> u8;
    /// Element selector of vector moves and vector loads/stores (bits 7-10).
    fn move_element(&self) -> u8;
    /// Sub-operation of `LWC2`/`SWC2` (bits 11-15).
    fn vmem_op(&self) -> u32;
    /// Whether a COP2 word is vector arithmetic rather than a move.
    fn is_vu_compute(&self) -> bool;
    /// Sign-extended 7-bit vector load/store offset.
    fn imm_i7(&self) -> i32;
    /// Sign-extended 16-bit immediate.
    fn imm_i16(&self) -> i32;
    /// Zero-extended 16-bit immediate.
    fn imm_u16(&self) -> i32;
    /// 26-bit jump target field.
    fn imm_u26(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn major(&self) -> u32 {
        self >> MAJOR_SHIFT
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn sa(&self) -> usize {
        ((self >> SA_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn vd(&self) -> u32 {
        (self >> SA_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn vs(&self) -> u32 {
        (self >> RD_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn vt(&self) -> u32 {
        (self >> RT_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn vu_element(&self) -> u8 {
        ((self >> RS_SHIFT) & ELEMENT_MASK) as u8
    }

    #[inline(always)]
    fn dest_element(&self) -> u8 {
        ((self >> RD_SHIFT) & DEST_ELEMENT_MASK) as u8
    }

    #[inline(always)]
    fn move_element(&self) -> u8 {
        ((self >> MOVE_ELEMENT_SHIFT) & ELEMENT_MASK) as u8
    }

    #[inline(always)]
    fn vmem_op(&self) -> u32 {
        (self >> RD_SHIFT) & REG_MASK
    }

    #[inline(always)]
    fn is_vu_compute(&self) -> bool {
        (self >> VU_COMPUTE_BIT) & 1 != 0
    }

    /// Shifts the 7-bit field to the top of a byte and back to sign-extend it.
    #[inline(always)]
    fn imm_i7(&self) -> i32 {
        (((self << 1) as u8 as i8) >> 1) as i32
    }

    #[inline(always)]
    fn imm_i16(&self) -> i32 {
        *self as u16 as i16 as i32
    }

    #[inline(always)]
    fn imm_u16(&self) -> i32 {
        *self as u16 as i32
    }

    #[inline(always)]
    fn imm_u26(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// A decoded instruction.
///
/// Register ids are `None` when the instruction has no such operand. Vector
/// operands are bitmasks (bit `n` = `v<n>`) so block loads/stores can name
/// eight registers at once; `vc_in`/`vc_out` use the control namespace from
/// [`crate::common::reg`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Decoded {
    /// Opcode tag; `Invalid` for unrecognized words.
    pub opcode: Opcode,
    /// First scalar source register.
    pub r_in: RegId,
    /// Second scalar source register.
    pub r_in2: RegId,
    /// Scalar destination register.
    pub r_out: RegId,
    /// Vector registers read.
    pub v_in: VRegMask,
    /// Vector registers written.
    pub v_out: VRegMask,
    /// Vector control registers read.
    pub vc_in: VcMask,
    /// Vector control registers written.
    pub vc_out: VcMask,
    /// Immediate. Branch offsets are in bytes, jump targets are byte
    /// addresses, `MFC0`/`MTC0` carry the COP0 register number. Zero when the
    /// instruction has no immediate.
    pub imm: i32,
    /// Element selector of vector instructions.
    pub element: u8,
}

impl Decoded {
    /// The record every unrecognized word decodes to.
    pub const INVALID: Self = Self {
        opcode: Opcode::Invalid,
        r_in: None,
        r_in2: None,
        r_out: None,
        v_in: 0,
        v_out: 0,
        vc_in: 0,
        vc_out: 0,
        imm: 0,
        element: 0,
    };

    /// Scalar source registers that can take part in a hazard.
    pub fn sources(&self) -> impl Iterator<Item = usize> {
        [self.r_in, self.r_in2].into_iter().flatten()
    }
}
