//! Instruction decoder.
//!
//! This module turns a raw 32-bit instruction word into a `Decoded` record.
//! Decoding happens in two steps:
//! 1. **Identification:** `identify` walks the major opcode and the relevant
//!    sub-fields (function, `rt`, `rs`, vector-memory op) to pick an `Opcode`.
//! 2. **Operand extraction:** `decode` fills in registers, masks, immediate and
//!    element according to the operand shape of that opcode.
//!
//! Decoding is total. Any word that does not identify as a known opcode yields
//! `Decoded::INVALID`.

use crate::common::reg::{vreg, vreg_block, VC_VCC, VC_VCE, VC_VCO, VcMask};
use crate::isa::abi::REG_RA;
use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::opcode::Opcode;

/// Major opcode values.
pub mod major {
    /// Register-register ALU, shifts, `JR`/`JALR`, `BREAK` (dispatch on funct).
    pub const SPECIAL: u32 = 0x00;
    /// Compare-with-zero branches (dispatch on `rt`).
    pub const REGIMM: u32 = 0x01;
    /// Absolute jump.
    pub const J: u32 = 0x02;
    /// Absolute jump and link.
    pub const JAL: u32 = 0x03;
    /// Branch if equal.
    pub const BEQ: u32 = 0x04;
    /// Branch if not equal.
    pub const BNE: u32 = 0x05;
    /// Branch if less than or equal to zero.
    pub const BLEZ: u32 = 0x06;
    /// Branch if greater than zero.
    pub const BGTZ: u32 = 0x07;
    /// Add immediate.
    pub const ADDI: u32 = 0x08;
    /// Add immediate unsigned.
    pub const ADDIU: u32 = 0x09;
    /// Set on less than immediate.
    pub const SLTI: u32 = 0x0A;
    /// Set on less than immediate unsigned.
    pub const SLTIU: u32 = 0x0B;
    /// And immediate.
    pub const ANDI: u32 = 0x0C;
    /// Or immediate.
    pub const ORI: u32 = 0x0D;
    /// Xor immediate.
    pub const XORI: u32 = 0x0E;
    /// Load upper immediate.
    pub const LUI: u32 = 0x0F;
    /// System control coprocessor moves (dispatch on `rs`).
    pub const COP0: u32 = 0x10;
    /// Vector unit: arithmetic when bit 25 is set, moves otherwise.
    pub const COP2: u32 = 0x12;
    /// Load byte.
    pub const LB: u32 = 0x20;
    /// Load halfword.
    pub const LH: u32 = 0x21;
    /// Load word.
    pub const LW: u32 = 0x23;
    /// Load byte unsigned.
    pub const LBU: u32 = 0x24;
    /// Load halfword unsigned.
    pub const LHU: u32 = 0x25;
    /// Load word unsigned.
    pub const LWU: u32 = 0x27;
    /// Store byte.
    pub const SB: u32 = 0x28;
    /// Store halfword.
    pub const SH: u32 = 0x29;
    /// Store word.
    pub const SW: u32 = 0x2B;
    /// Vector loads (dispatch on bits 11-15).
    pub const LWC2: u32 = 0x32;
    /// Vector stores (dispatch on bits 11-15).
    pub const SWC2: u32 = 0x3A;
}

/// Opcodes reachable through SPECIAL, indexed by funct.
fn special(funct: u32) -> Opcode {
    match funct {
        0x00 => Opcode::Sll,
        0x02 => Opcode::Srl,
        0x03 => Opcode::Sra,
        0x04 => Opcode::Sllv,
        0x06 => Opcode::Srlv,
        0x07 => Opcode::Srav,
        0x08 => Opcode::Jr,
        0x09 => Opcode::Jalr,
        0x0D => Opcode::Break,
        0x20 => Opcode::Add,
        0x21 => Opcode::Addu,
        0x22 => Opcode::Sub,
        0x23 => Opcode::Subu,
        0x24 => Opcode::And,
        0x25 => Opcode::Or,
        0x26 => Opcode::Xor,
        0x27 => Opcode::Nor,
        0x2A => Opcode::Slt,
        0x2B => Opcode::Sltu,
        _ => Opcode::Invalid,
    }
}

fn regimm(rt: usize) -> Opcode {
    match rt {
        0x00 => Opcode::Bltz,
        0x01 => Opcode::Bgez,
        0x10 => Opcode::Bltzal,
        0x11 => Opcode::Bgezal,
        _ => Opcode::Invalid,
    }
}

fn vu_compute(funct: u32) -> Opcode {
    match funct {
        0x00 => Opcode::Vmulf,
        0x01 => Opcode::Vmulu,
        0x02 => Opcode::Vrndp,
        0x03 => Opcode::Vmulq,
        0x04 => Opcode::Vmudl,
        0x05 => Opcode::Vmudm,
        0x06 => Opcode::Vmudn,
        0x07 => Opcode::Vmudh,
        0x08 => Opcode::Vmacf,
        0x09 => Opcode::Vmacu,
        0x0A => Opcode::Vrndn,
        0x0B => Opcode::Vmacq,
        0x0C => Opcode::Vmadl,
        0x0D => Opcode::Vmadm,
        0x0E => Opcode::Vmadn,
        0x0F => Opcode::Vmadh,
        0x10 => Opcode::Vadd,
        0x11 => Opcode::Vsub,
        0x13 => Opcode::Vabs,
        0x14 => Opcode::Vaddc,
        0x15 => Opcode::Vsubc,
        0x1D => Opcode::Vsar,
        0x20 => Opcode::Vlt,
        0x21 => Opcode::Veq,
        0x22 => Opcode::Vne,
        0x23 => Opcode::Vge,
        0x24 => Opcode::Vcl,
        0x25 => Opcode::Vch,
        0x26 => Opcode::Vcr,
        0x27 => Opcode::Vmrg,
        0x28 => Opcode::Vand,
        0x29 => Opcode::Vnand,
        0x2A => Opcode::Vor,
        0x2B => Opcode::Vnor,
        0x2C => Opcode::Vxor,
        0x2D => Opcode::Vnxor,
        0x30 => Opcode::Vrcp,
        0x31 => Opcode::Vrcpl,
        0x32 => Opcode::Vrcph,
        0x33 => Opcode::Vmov,
        0x34 => Opcode::Vrsq,
        0x35 => Opcode::Vrsql,
        0x36 => Opcode::Vrsqh,
        0x37 => Opcode::Vnop,
        _ => Opcode::Invalid,
    }
}

fn vu_move(rs: usize) -> Opcode {
    match rs {
        0x00 => Opcode::Mfc2,
        0x02 => Opcode::Cfc2,
        0x04 => Opcode::Mtc2,
        0x06 => Opcode::Ctc2,
        _ => Opcode::Invalid,
    }
}

fn vector_load(op: u32) -> Opcode {
    match op {
        0x00 => Opcode::Lbv,
        0x01 => Opcode::Lsv,
        0x02 => Opcode::Llv,
        0x03 => Opcode::Ldv,
        0x04 => Opcode::Lqv,
        0x05 => Opcode::Lrv,
        0x06 => Opcode::Lpv,
        0x07 => Opcode::Luv,
        0x08 => Opcode::Lhv,
        0x09 => Opcode::Lfv,
        0x0B => Opcode::Ltv,
        _ => Opcode::Invalid,
    }
}

fn vector_store(op: u32) -> Opcode {
    match op {
        0x00 => Opcode::Sbv,
        0x01 => Opcode::Ssv,
        0x02 => Opcode::Slv,
        0x03 => Opcode::Sdv,
        0x04 => Opcode::Sqv,
        0x05 => Opcode::Srv,
        0x06 => Opcode::Spv,
        0x07 => Opcode::Suv,
        0x08 => Opcode::Shv,
        0x09 => Opcode::Sfv,
        0x0A => Opcode::Swv,
        0x0B => Opcode::Stv,
        _ => Opcode::Invalid,
    }
}

/// Identifies the opcode of an instruction word without extracting operands.
pub fn identify(word: u32) -> Opcode {
    match word.major() {
        major::SPECIAL => special(word.funct()),
        major::REGIMM => regimm(word.rt()),
        major::J => Opcode::J,
        major::JAL => Opcode::Jal,
        major::BEQ => Opcode::Beq,
        major::BNE => Opcode::Bne,
        major::BLEZ => Opcode::Blez,
        major::BGTZ => Opcode::Bgtz,
        major::ADDI => Opcode::Addi,
        major::ADDIU => Opcode::Addiu,
        major::SLTI => Opcode::Slti,
        major::SLTIU => Opcode::Sltiu,
        major::ANDI => Opcode::Andi,
        major::ORI => Opcode::Ori,
        major::XORI => Opcode::Xori,
        major::LUI => Opcode::Lui,
        major::COP0 => match word.rs() {
            0x00 => Opcode::Mfc0,
            0x04 => Opcode::Mtc0,
            _ => Opcode::Invalid,
        },
        major::COP2 if word.is_vu_compute() => vu_compute(word.funct()),
        major::COP2 => vu_move(word.rs()),
        major::LB => Opcode::Lb,
        major::LH => Opcode::Lh,
        major::LW => Opcode::Lw,
        major::LBU => Opcode::Lbu,
        major::LHU => Opcode::Lhu,
        major::LWU => Opcode::Lwu,
        major::SB => Opcode::Sb,
        major::SH => Opcode::Sh,
        major::SW => Opcode::Sw,
        major::LWC2 => vector_load(word.vmem_op()),
        major::SWC2 => vector_store(word.vmem_op()),
        _ => Opcode::Invalid,
    }
}

/// Vector control registers read and written by a vector arithmetic opcode.
fn vc_touched(opcode: Opcode) -> VcMask {
    use Opcode as Op;
    match opcode {
        Op::Vadd | Op::Vsub | Op::Vabs | Op::Vaddc | Op::Vsubc => VC_VCO,
        Op::Vlt | Op::Veq | Op::Vne | Op::Vge | Op::Vmrg => VC_VCO | VC_VCC,
        Op::Vcl | Op::Vch | Op::Vcr => VC_VCO | VC_VCC | VC_VCE,
        _ => 0,
    }
}

/// Decodes a 32-bit instruction word.
///
/// # Examples
///
/// ```
/// use rspsim_core::isa::decode::decode;
/// use rspsim_core::isa::opcode::Opcode;
///
/// // ADDIU t0, zero, 1
/// let d = decode(0x2408_0001);
/// assert_eq!(d.opcode, Opcode::Addiu);
/// assert_eq!(d.r_out, Some(8));
/// assert_eq!(d.r_in, Some(0));
/// assert_eq!(d.imm, 1);
/// ```
pub fn decode(word: u32) -> Decoded {
    use Opcode as Op;

    let opcode = identify(word);
    let mut d = Decoded {
        opcode,
        ..Decoded::INVALID
    };

    match opcode {
        Op::Invalid | Op::Break => {}

        Op::Sll | Op::Srl | Op::Sra => {
            d.r_out = Some(word.rd());
            d.r_in = Some(word.rt());
            d.imm = word.sa() as i32;
        }
        Op::Sllv | Op::Srlv | Op::Srav => {
            d.r_out = Some(word.rd());
            d.r_in = Some(word.rt());
            d.r_in2 = Some(word.rs());
        }
        Op::Jr => d.r_in = Some(word.rs()),
        Op::Jalr => {
            d.r_out = Some(word.rd());
            d.r_in = Some(word.rs());
        }
        Op::Add
        | Op::Addu
        | Op::Sub
        | Op::Subu
        | Op::And
        | Op::Or
        | Op::Xor
        | Op::Nor
        | Op::Slt
        | Op::Sltu => {
            d.r_out = Some(word.rd());
            d.r_in = Some(word.rs());
            d.r_in2 = Some(word.rt());
        }

        Op::Bltz | Op::Bgez | Op::Blez | Op::Bgtz => {
            d.r_in = Some(word.rs());
            d.imm = word.imm_i16() << 2;
        }
        Op::Bltzal | Op::Bgezal => {
            d.r_out = Some(REG_RA);
            d.r_in = Some(word.rs());
            d.imm = word.imm_i16() << 2;
        }
        Op::Beq | Op::Bne => {
            d.r_in = Some(word.rs());
            d.r_in2 = Some(word.rt());
            d.imm = word.imm_i16() << 2;
        }
        Op::J => d.imm = (word.imm_u26() << 2) as i32,
        Op::Jal => {
            d.r_out = Some(REG_RA);
            d.imm = (word.imm_u26() << 2) as i32;
        }

        Op::Addi | Op::Addiu | Op::Slti | Op::Sltiu => {
            d.r_out = Some(word.rt());
            d.r_in = Some(word.rs());
            d.imm = word.imm_i16();
        }
        Op::Andi | Op::Ori | Op::Xori => {
            d.r_out = Some(word.rt());
            d.r_in = Some(word.rs());
            d.imm = word.imm_u16();
        }
        Op::Lui => {
            d.r_out = Some(word.rt());
            d.imm = word.imm_u16();
        }

        Op::Mfc0 => {
            d.r_out = Some(word.rt());
            d.imm = word.rd() as i32;
        }
        Op::Mtc0 => {
            d.r_in = Some(word.rt());
            d.imm = word.rd() as i32;
        }

        Op::Lb | Op::Lh | Op::Lw | Op::Lbu | Op::Lhu | Op::Lwu => {
            d.r_out = Some(word.rt());
            d.r_in = Some(word.rs());
            d.imm = word.imm_i16();
        }
        Op::Sb | Op::Sh | Op::Sw => {
            d.r_in = Some(word.rt());
            d.r_in2 = Some(word.rs());
            d.imm = word.imm_i16();
        }

        Op::Mfc2 => {
            d.r_out = Some(word.rt());
            d.v_in = vreg(word.vs());
            d.element = word.move_element();
        }
        Op::Cfc2 => {
            d.r_out = Some(word.rt());
            d.vc_in = 1 << (word.rd() & 3);
            d.element = word.move_element();
        }
        Op::Mtc2 => {
            d.r_in = Some(word.rt());
            d.v_out = vreg(word.vs());
            d.element = word.move_element();
        }
        Op::Ctc2 => {
            d.r_in = Some(word.rt());
            d.vc_out = 1 << (word.rd() & 3);
            d.element = word.move_element();
        }

        Op::Vnop => d.element = word.vu_element(),
        Op::Vmacq | Op::Vsar => {
            d.v_out = vreg(word.vd());
            d.element = word.vu_element();
        }
        Op::Vrndp
        | Op::Vrndn
        | Op::Vrcp
        | Op::Vrcpl
        | Op::Vrcph
        | Op::Vmov
        | Op::Vrsq
        | Op::Vrsql
        | Op::Vrsqh => {
            d.v_out = vreg(word.vd());
            d.v_in = vreg(word.vt());
            d.element = word.vu_element();
        }
        Op::Vmulf
        | Op::Vmulu
        | Op::Vmulq
        | Op::Vmudl
        | Op::Vmudm
        | Op::Vmudn
        | Op::Vmudh
        | Op::Vmacf
        | Op::Vmacu
        | Op::Vmadl
        | Op::Vmadm
        | Op::Vmadn
        | Op::Vmadh
        | Op::Vadd
        | Op::Vsub
        | Op::Vabs
        | Op::Vaddc
        | Op::Vsubc
        | Op::Vlt
        | Op::Veq
        | Op::Vne
        | Op::Vge
        | Op::Vcl
        | Op::Vch
        | Op::Vcr
        | Op::Vmrg
        | Op::Vand
        | Op::Vnand
        | Op::Vor
        | Op::Vnor
        | Op::Vxor
        | Op::Vnxor => {
            d.v_out = vreg(word.vd());
            d.v_in = vreg(word.vs()) | vreg(word.vt());
            d.vc_in = vc_touched(opcode);
            d.vc_out = d.vc_in;
            d.element = word.vu_element();
        }

        Op::Lbv
        | Op::Lsv
        | Op::Llv
        | Op::Ldv
        | Op::Lqv
        | Op::Lrv
        | Op::Lpv
        | Op::Luv
        | Op::Lhv
        | Op::Lfv
        | Op::Ltv => {
            d.v_out = if opcode == Op::Ltv {
                vreg_block(word.vt())
            } else {
                vreg(word.vt())
            };
            d.r_in = Some(word.rs());
            d.imm = word.imm_i7();
            d.element = word.move_element();
        }
        Op::Sbv
        | Op::Ssv
        | Op::Slv
        | Op::Sdv
        | Op::Sqv
        | Op::Srv
        | Op::Spv
        | Op::Suv
        | Op::Shv
        | Op::Sfv
        | Op::Swv
        | Op::Stv => {
            d.v_in = if opcode == Op::Stv {
                vreg_block(word.vt())
            } else {
                vreg(word.vt())
            };
            d.r_in = Some(word.rs());
            d.imm = word.imm_i7();
            d.element = word.move_element();
        }
    }

    d
}
