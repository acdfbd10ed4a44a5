//! Instruction encoder.
//!
//! The inverse of [`crate::isa::decode`]: builds instruction words from an
//! opcode and its operands. Used by the random program generator and by tests
//! that need hand-assembled windows.
//!
//! `Operands` holds values in the same units the decoder reports them, so
//! `decode(encode(op, &o))` reproduces `o` for every field the opcode uses:
//! branch offsets are byte offsets, jump targets are byte addresses and
//! `MFC0`/`MTC0` take the COP0 register number in `imm`.

use crate::isa::decode::major;
use crate::isa::instruction::{
    ELEMENT_MASK, MAJOR_SHIFT, MOVE_ELEMENT_SHIFT, RD_SHIFT, REG_MASK, RS_SHIFT, RT_SHIFT,
    SA_SHIFT, TARGET_MASK, VOFFSET_MASK, VU_COMPUTE_BIT,
};
use crate::isa::opcode::Opcode;

/// Word emitted for `Opcode::Invalid` (major opcode 0x3F is unassigned).
pub const INVALID_WORD: u32 = 0xFC00_0000;

/// Operand values for [`encode`]. Fields an opcode does not use are ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Operands {
    /// Destination register, or the control register index of `CFC2`/`CTC2`.
    pub rd: u32,
    /// Source / base register.
    pub rs: u32,
    /// Target register.
    pub rt: u32,
    /// Shift amount.
    pub sa: u32,
    /// Immediate, offset or target in decoder units.
    pub imm: i32,
    /// Vector destination register.
    pub vd: u32,
    /// Vector source register; destination element for `VRCP`-style ops.
    pub vs: u32,
    /// Vector target register.
    pub vt: u32,
    /// Element selector.
    pub element: u32,
}

impl Operands {
    /// `rt, rs, imm` for immediate ALU ops and `LUI`.
    pub const fn alu_imm(rt: u32, rs: u32, imm: i32) -> Self {
        Self {
            rt,
            rs,
            imm,
            ..Self::ZERO
        }
    }

    /// `rd, rs, rt` for register ALU ops.
    pub const fn alu_reg(rd: u32, rs: u32, rt: u32) -> Self {
        Self {
            rd,
            rs,
            rt,
            ..Self::ZERO
        }
    }

    /// `rd, rt, sa` for immediate shifts.
    pub const fn shift(rd: u32, rt: u32, sa: u32) -> Self {
        Self {
            rd,
            rt,
            sa,
            ..Self::ZERO
        }
    }

    /// `rd, rt, rs` for variable shifts.
    pub const fn shift_var(rd: u32, rt: u32, rs: u32) -> Self {
        Self {
            rd,
            rt,
            rs,
            ..Self::ZERO
        }
    }

    /// `rs, rt, offset` for branches; `offset` is in bytes relative to the delay slot.
    pub const fn branch(rs: u32, rt: u32, offset: i32) -> Self {
        Self {
            rs,
            rt,
            imm: offset,
            ..Self::ZERO
        }
    }

    /// Absolute jump target in bytes.
    pub const fn jump(target: u32) -> Self {
        Self {
            imm: target as i32,
            ..Self::ZERO
        }
    }

    /// `rd, rs` for `JR`/`JALR`.
    pub const fn jump_reg(rd: u32, rs: u32) -> Self {
        Self {
            rd,
            rs,
            ..Self::ZERO
        }
    }

    /// `rt, offset(base)` for scalar loads and stores.
    pub const fn mem(rt: u32, offset: i32, base: u32) -> Self {
        Self {
            rt,
            rs: base,
            imm: offset,
            ..Self::ZERO
        }
    }

    /// `rt, reg` for `MFC0`/`MTC0`.
    pub const fn cop0(rt: u32, reg: u32) -> Self {
        Self {
            rt,
            imm: reg as i32,
            ..Self::ZERO
        }
    }

    /// `rt, vs[e]` for `MFC2`/`MTC2`.
    pub const fn vmove(rt: u32, vs: u32, element: u32) -> Self {
        Self {
            rt,
            vs,
            element,
            ..Self::ZERO
        }
    }

    /// `rt, vc` for `CFC2`/`CTC2`.
    pub const fn vcontrol(rt: u32, vc: u32) -> Self {
        Self {
            rt,
            rd: vc,
            ..Self::ZERO
        }
    }

    /// `vd, vs, vt[e]` for vector arithmetic.
    pub const fn vector(vd: u32, vs: u32, vt: u32, element: u32) -> Self {
        Self {
            vd,
            vs,
            vt,
            element,
            ..Self::ZERO
        }
    }

    /// `vt[e], offset(base)` for vector loads and stores.
    pub const fn vmem(vt: u32, element: u32, offset: i32, base: u32) -> Self {
        Self {
            vt,
            element,
            imm: offset,
            rs: base,
            ..Self::ZERO
        }
    }

    const ZERO: Self = Self {
        rd: 0,
        rs: 0,
        rt: 0,
        sa: 0,
        imm: 0,
        vd: 0,
        vs: 0,
        vt: 0,
        element: 0,
    };
}

/// SPECIAL format: `rs | rt | rd | sa | funct`.
pub const fn special(funct: u32, rs: u32, rt: u32, rd: u32, sa: u32) -> u32 {
    ((rs & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | ((rd & REG_MASK) << RD_SHIFT)
        | ((sa & REG_MASK) << SA_SHIFT)
        | funct
}

/// REGIMM format with a word offset.
pub const fn regimm(code: u32, rs: u32, offset_words: i32) -> u32 {
    (major::REGIMM << MAJOR_SHIFT)
        | ((rs & REG_MASK) << RS_SHIFT)
        | ((code & REG_MASK) << RT_SHIFT)
        | (offset_words as u32 & 0xFFFF)
}

/// I-type format: `major | rs | rt | imm16`. Shared by branches, immediate ALU
/// ops and scalar loads/stores.
pub const fn itype(op: u32, rs: u32, rt: u32, imm: i32) -> u32 {
    (op << MAJOR_SHIFT)
        | ((rs & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | (imm as u32 & 0xFFFF)
}

/// J-type format with a word target.
pub const fn jtype(op: u32, target_words: u32) -> u32 {
    (op << MAJOR_SHIFT) | (target_words & TARGET_MASK)
}

/// COP0 move format.
pub const fn cop0(op: u32, rt: u32, rd: u32) -> u32 {
    (major::COP0 << MAJOR_SHIFT)
        | ((op & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | ((rd & REG_MASK) << RD_SHIFT)
}

/// COP2 move format.
pub const fn cop2_move(op: u32, rt: u32, rd: u32, element: u32) -> u32 {
    (major::COP2 << MAJOR_SHIFT)
        | ((op & REG_MASK) << RS_SHIFT)
        | ((rt & REG_MASK) << RT_SHIFT)
        | ((rd & REG_MASK) << RD_SHIFT)
        | ((element & ELEMENT_MASK) << MOVE_ELEMENT_SHIFT)
}

/// Vector arithmetic format.
pub const fn vu(funct: u32, vd: u32, vs: u32, vt: u32, element: u32) -> u32 {
    (major::COP2 << MAJOR_SHIFT)
        | (1 << VU_COMPUTE_BIT)
        | ((element & ELEMENT_MASK) << RS_SHIFT)
        | ((vt & REG_MASK) << RT_SHIFT)
        | ((vs & REG_MASK) << RD_SHIFT)
        | ((vd & REG_MASK) << SA_SHIFT)
        | funct
}

/// `LWC2`/`SWC2` format.
pub const fn vmem(op: u32, code: u32, vt: u32, element: u32, offset: i32, base: u32) -> u32 {
    (op << MAJOR_SHIFT)
        | ((base & REG_MASK) << RS_SHIFT)
        | ((vt & REG_MASK) << RT_SHIFT)
        | ((code & REG_MASK) << RD_SHIFT)
        | ((element & ELEMENT_MASK) << MOVE_ELEMENT_SHIFT)
        | (offset as u32 & VOFFSET_MASK)
}

fn special_funct(opcode: Opcode) -> Option<u32> {
    use Opcode as Op;
    Some(match opcode {
        Op::Sll => 0x00,
        Op::Srl => 0x02,
        Op::Sra => 0x03,
        Op::Sllv => 0x04,
        Op::Srlv => 0x06,
        Op::Srav => 0x07,
        Op::Jr => 0x08,
        Op::Jalr => 0x09,
        Op::Break => 0x0D,
        Op::Add => 0x20,
        Op::Addu => 0x21,
        Op::Sub => 0x22,
        Op::Subu => 0x23,
        Op::And => 0x24,
        Op::Or => 0x25,
        Op::Xor => 0x26,
        Op::Nor => 0x27,
        Op::Slt => 0x2A,
        Op::Sltu => 0x2B,
        _ => return None,
    })
}

fn vu_funct(opcode: Opcode) -> Option<u32> {
    use Opcode as Op;
    // The multiply/accumulate block occupies funct 0x00..=0x0F in opcode order.
    if (Op::Vmulf..=Op::Vmadh).contains(&opcode) {
        return Some(opcode as u32 - Op::Vmulf as u32);
    }
    Some(match opcode {
        Op::Vadd => 0x10,
        Op::Vsub => 0x11,
        Op::Vabs => 0x13,
        Op::Vaddc => 0x14,
        Op::Vsubc => 0x15,
        Op::Vsar => 0x1D,
        Op::Vlt => 0x20,
        Op::Veq => 0x21,
        Op::Vne => 0x22,
        Op::Vge => 0x23,
        Op::Vcl => 0x24,
        Op::Vch => 0x25,
        Op::Vcr => 0x26,
        Op::Vmrg => 0x27,
        Op::Vand => 0x28,
        Op::Vnand => 0x29,
        Op::Vor => 0x2A,
        Op::Vnor => 0x2B,
        Op::Vxor => 0x2C,
        Op::Vnxor => 0x2D,
        Op::Vrcp => 0x30,
        Op::Vrcpl => 0x31,
        Op::Vrcph => 0x32,
        Op::Vmov => 0x33,
        Op::Vrsq => 0x34,
        Op::Vrsql => 0x35,
        Op::Vrsqh => 0x36,
        Op::Vnop => 0x37,
        _ => return None,
    })
}

fn itype_major(opcode: Opcode) -> Option<u32> {
    use Opcode as Op;
    Some(match opcode {
        Op::Beq => major::BEQ,
        Op::Bne => major::BNE,
        Op::Blez => major::BLEZ,
        Op::Bgtz => major::BGTZ,
        Op::Addi => major::ADDI,
        Op::Addiu => major::ADDIU,
        Op::Slti => major::SLTI,
        Op::Sltiu => major::SLTIU,
        Op::Andi => major::ANDI,
        Op::Ori => major::ORI,
        Op::Xori => major::XORI,
        Op::Lui => major::LUI,
        Op::Lb => major::LB,
        Op::Lh => major::LH,
        Op::Lw => major::LW,
        Op::Lbu => major::LBU,
        Op::Lhu => major::LHU,
        Op::Lwu => major::LWU,
        Op::Sb => major::SB,
        Op::Sh => major::SH,
        Op::Sw => major::SW,
        _ => return None,
    })
}

/// Encodes an instruction.
///
/// # Examples
///
/// ```
/// use rspsim_core::isa::encode::{encode, Operands};
/// use rspsim_core::isa::opcode::Opcode;
///
/// assert_eq!(encode(Opcode::Addiu, &Operands::alu_imm(8, 0, 1)), 0x2408_0001);
/// assert_eq!(encode(Opcode::Break, &Operands::default()), 0x0000_000D);
/// ```
pub fn encode(opcode: Opcode, o: &Operands) -> u32 {
    use Opcode as Op;

    if let Some(funct) = special_funct(opcode) {
        return match opcode {
            Op::Sll | Op::Srl | Op::Sra => special(funct, 0, o.rt, o.rd, o.sa),
            Op::Jr => special(funct, o.rs, 0, 0, 0),
            Op::Jalr => special(funct, o.rs, 0, o.rd, 0),
            Op::Break => funct,
            _ => special(funct, o.rs, o.rt, o.rd, 0),
        };
    }
    if let Some(funct) = vu_funct(opcode) {
        return vu(funct, o.vd, o.vs, o.vt, o.element);
    }
    if let Some(op) = itype_major(opcode) {
        let imm = match opcode {
            Op::Beq | Op::Bne => return itype(op, o.rs, o.rt, o.imm >> 2),
            Op::Blez | Op::Bgtz => return itype(op, o.rs, 0, o.imm >> 2),
            Op::Lui => return itype(op, 0, o.rt, o.imm),
            _ => o.imm,
        };
        return itype(op, o.rs, o.rt, imm);
    }

    match opcode {
        Op::Bltz => regimm(0x00, o.rs, o.imm >> 2),
        Op::Bgez => regimm(0x01, o.rs, o.imm >> 2),
        Op::Bltzal => regimm(0x10, o.rs, o.imm >> 2),
        Op::Bgezal => regimm(0x11, o.rs, o.imm >> 2),
        Op::J => jtype(major::J, (o.imm as u32) >> 2),
        Op::Jal => jtype(major::JAL, (o.imm as u32) >> 2),
        Op::Mfc0 => cop0(0x00, o.rt, o.imm as u32),
        Op::Mtc0 => cop0(0x04, o.rt, o.imm as u32),
        Op::Mfc2 => cop2_move(0x00, o.rt, o.vs, o.element),
        Op::Cfc2 => cop2_move(0x02, o.rt, o.rd, 0),
        Op::Mtc2 => cop2_move(0x04, o.rt, o.vs, o.element),
        Op::Ctc2 => cop2_move(0x06, o.rt, o.rd, 0),
        op if (Op::Lbv..=Op::Lfv).contains(&op) => vmem(
            major::LWC2,
            opcode as u32 - Op::Lbv as u32,
            o.vt,
            o.element,
            o.imm,
            o.rs,
        ),
        Op::Ltv => vmem(major::LWC2, 0x0B, o.vt, o.element, o.imm, o.rs),
        op if (Op::Sbv..=Op::Stv).contains(&op) => vmem(
            major::SWC2,
            opcode as u32 - Op::Sbv as u32,
            o.vt,
            o.element,
            o.imm,
            o.rs,
        ),
        _ => INVALID_WORD,
    }
}
