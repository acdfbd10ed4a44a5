//! Encoder/Decoder Agreement.
//!
//! Encodes instructions at the edges of each field and checks the decoder
//! recovers the opcode and operands.

use pretty_assertions::assert_eq;
use rstest::rstest;

use rspsim_core::common::reg::{VC_VCC, VC_VCE, VC_VCO, VcMask, vreg, vreg_block};
use rspsim_core::isa::abi::REG_RA;
use rspsim_core::isa::decode::decode;
use rspsim_core::isa::encode::{Operands, encode};
use rspsim_core::isa::instruction::{Decoded, TARGET_MASK};
use rspsim_core::isa::opcode::Opcode;

#[rstest]
#[case(0, 0, 0)]
#[case(31, 31, 31)]
#[case(8, 0, 31)]
#[case(1, 30, 2)]
fn register_alu_fields(#[case] rd: u32, #[case] rs: u32, #[case] rt: u32) {
    let d = decode(encode(Opcode::Subu, &Operands::alu_reg(rd, rs, rt)));
    assert_eq!(
        d,
        Decoded {
            opcode: Opcode::Subu,
            r_out: Some(rd as usize),
            r_in: Some(rs as usize),
            r_in2: Some(rt as usize),
            ..Decoded::INVALID
        }
    );
}

#[rstest]
#[case(i32::from(i16::MIN))]
#[case(-1)]
#[case(0)]
#[case(i32::from(i16::MAX))]
fn signed_immediate_extremes(#[case] imm: i32) {
    let d = decode(encode(Opcode::Addi, &Operands::alu_imm(31, 1, imm)));
    assert_eq!(d.opcode, Opcode::Addi);
    assert_eq!(d.imm, imm);
    assert_eq!(d.r_out, Some(31));
    assert_eq!(d.r_in, Some(1));
}

#[rstest]
#[case(Opcode::Andi, 0xFFFF)]
#[case(Opcode::Ori, 0x8000)]
#[case(Opcode::Xori, 0)]
fn unsigned_immediates_zero_extend(#[case] op: Opcode, #[case] imm: i32) {
    let d = decode(encode(op, &Operands::alu_imm(2, 3, imm)));
    assert_eq!(d.opcode, op);
    assert_eq!(d.imm, imm);
}

#[test]
fn lui_has_no_source() {
    let d = decode(encode(Opcode::Lui, &Operands::alu_imm(1, 0, 0xFFFF)));
    assert_eq!(d.opcode, Opcode::Lui);
    assert_eq!(d.r_out, Some(1));
    assert_eq!(d.r_in, None);
    assert_eq!(d.imm, 0xFFFF);
}

#[rstest]
#[case(-64)]
#[case(-1)]
#[case(0)]
#[case(63)]
fn vector_memory_offset_extremes(#[case] offset: i32) {
    let d = decode(encode(Opcode::Lqv, &Operands::vmem(5, 0, offset, 4)));
    assert_eq!(d.opcode, Opcode::Lqv);
    assert_eq!(d.imm, offset);
    assert_eq!(d.r_in, Some(4));
    assert_eq!(d.v_out, vreg(5));
}

#[rstest]
#[case(Opcode::Beq, -0x20000)]
#[case(Opcode::Bne, 4)]
#[case(Opcode::Bgez, 0x1FFFC)]
#[case(Opcode::Bltzal, -4)]
fn branch_offsets_are_bytes(#[case] op: Opcode, #[case] offset: i32) {
    let d = decode(encode(op, &Operands::branch(3, 0, offset)));
    assert_eq!(d.opcode, op);
    assert_eq!(d.imm, offset);
    assert_eq!(d.r_in, Some(3));
}

#[rstest]
#[case(0)]
#[case(0x0FFF_FFFC)]
fn jump_targets(#[case] target: u32) {
    let d = decode(encode(Opcode::Jal, &Operands::jump(target)));
    assert_eq!(d.opcode, Opcode::Jal);
    assert_eq!(d.imm as u32, target);
    assert_eq!(d.r_out, Some(31));
}

#[rstest]
#[case(0, 0)]
#[case(31, 15)]
fn vector_moves(#[case] reg: u32, #[case] element: u32) {
    let d = decode(encode(Opcode::Mtc2, &Operands::vmove(reg, reg, element)));
    assert_eq!(d.opcode, Opcode::Mtc2);
    assert_eq!(d.r_in, Some(reg as usize));
    assert_eq!(d.v_out, vreg(reg));
    assert_eq!(u32::from(d.element), element);
}

#[test]
fn block_transfers_cover_a_register_group() {
    let ltv = decode(encode(Opcode::Ltv, &Operands::vmem(9, 0, 0, 0)));
    assert_eq!(ltv.opcode, Opcode::Ltv);
    assert_eq!(ltv.v_out, vreg_block(9));
    assert_eq!(ltv.v_out, 0x0000_FF00);

    let stv = decode(encode(Opcode::Stv, &Operands::vmem(31, 0, 0, 0)));
    assert_eq!(stv.opcode, Opcode::Stv);
    assert_eq!(stv.v_in, 0xFF00_0000);
}

// ══════════════════════════════════════════════════════════
// Every opcode at the field boundaries
// ══════════════════════════════════════════════════════════

/// Operand layout of an opcode as the decoder reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    Bare,
    ShiftImm,
    ShiftVar,
    RegAlu,
    JumpReg,
    JumpLinkReg,
    BranchPair,
    BranchZero,
    BranchLink,
    Jump,
    JumpLink,
    ImmSigned,
    ImmUnsigned,
    Lui,
    Cop0From,
    Cop0To,
    Load,
    Store,
    VMoveFrom,
    VMoveTo,
    VControlFrom,
    VControlTo,
    VElementOnly,
    VWrite,
    VUnary,
    VBinary,
    VLoad,
    VStore,
}

fn shape(op: Opcode) -> Shape {
    use Opcode as Op;
    match op {
        Op::Break | Op::Invalid => Shape::Bare,
        Op::Sll | Op::Srl | Op::Sra => Shape::ShiftImm,
        Op::Sllv | Op::Srlv | Op::Srav => Shape::ShiftVar,
        Op::Add
        | Op::Addu
        | Op::Sub
        | Op::Subu
        | Op::And
        | Op::Or
        | Op::Xor
        | Op::Nor
        | Op::Slt
        | Op::Sltu => Shape::RegAlu,
        Op::Jr => Shape::JumpReg,
        Op::Jalr => Shape::JumpLinkReg,
        Op::Beq | Op::Bne => Shape::BranchPair,
        Op::Bltz | Op::Bgez | Op::Blez | Op::Bgtz => Shape::BranchZero,
        Op::Bltzal | Op::Bgezal => Shape::BranchLink,
        Op::J => Shape::Jump,
        Op::Jal => Shape::JumpLink,
        Op::Addi | Op::Addiu | Op::Slti | Op::Sltiu => Shape::ImmSigned,
        Op::Andi | Op::Ori | Op::Xori => Shape::ImmUnsigned,
        Op::Lui => Shape::Lui,
        Op::Mfc0 => Shape::Cop0From,
        Op::Mtc0 => Shape::Cop0To,
        Op::Lb | Op::Lh | Op::Lw | Op::Lbu | Op::Lhu | Op::Lwu => Shape::Load,
        Op::Sb | Op::Sh | Op::Sw => Shape::Store,
        Op::Mfc2 => Shape::VMoveFrom,
        Op::Mtc2 => Shape::VMoveTo,
        Op::Cfc2 => Shape::VControlFrom,
        Op::Ctc2 => Shape::VControlTo,
        Op::Vnop => Shape::VElementOnly,
        Op::Vmacq | Op::Vsar => Shape::VWrite,
        Op::Vrndp
        | Op::Vrndn
        | Op::Vrcp
        | Op::Vrcpl
        | Op::Vrcph
        | Op::Vmov
        | Op::Vrsq
        | Op::Vrsql
        | Op::Vrsqh => Shape::VUnary,
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
        | Op::Vnxor => Shape::VBinary,
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
        | Op::Ltv => Shape::VLoad,
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
        | Op::Stv => Shape::VStore,
    }
}

/// Control registers a vector arithmetic op reads and writes back.
fn control(op: Opcode) -> VcMask {
    use Opcode as Op;
    match op {
        Op::Vadd | Op::Vsub | Op::Vabs | Op::Vaddc | Op::Vsubc => VC_VCO,
        Op::Vlt | Op::Veq | Op::Vne | Op::Vge | Op::Vmrg => VC_VCO | VC_VCC,
        Op::Vcl | Op::Vch | Op::Vcr => VC_VCO | VC_VCC | VC_VCE,
        _ => 0,
    }
}

/// Which end of each immediate and element range to encode.
#[derive(Clone, Copy, Debug)]
enum Bound {
    Low,
    High,
}

/// Immediate range in decoder units. Branch offsets are byte offsets of a
/// 16-bit word offset, jump targets byte addresses of a 26-bit word target.
fn imm_range(shape: Shape) -> (i32, i32) {
    let i16_range = (i32::from(i16::MIN), i32::from(i16::MAX));
    match shape {
        Shape::BranchPair | Shape::BranchZero | Shape::BranchLink => {
            (i16_range.0 << 2, i16_range.1 << 2)
        }
        Shape::Jump | Shape::JumpLink => (0, (TARGET_MASK << 2) as i32),
        Shape::ImmSigned | Shape::Load | Shape::Store => i16_range,
        Shape::ImmUnsigned | Shape::Lui => (0, 0xFFFF),
        Shape::Cop0From | Shape::Cop0To => (0, 31),
        Shape::VLoad | Shape::VStore => (-64, 63),
        _ => (0, 0),
    }
}

/// The record `decode` must report for `op` encoded with every register
/// field set to `reg`.
fn expected(op: Opcode, reg: u32, element: u8, imm: i32) -> Decoded {
    let r = Some(reg as usize);
    let v = vreg(reg);
    let block = if matches!(op, Opcode::Ltv | Opcode::Stv) {
        vreg_block(reg)
    } else {
        v
    };
    let vc: VcMask = 1 << (reg & 3);
    let base = Decoded {
        opcode: op,
        ..Decoded::INVALID
    };
    match shape(op) {
        Shape::Bare => base,
        Shape::ShiftImm => Decoded {
            r_out: r,
            r_in: r,
            imm: reg as i32,
            ..base
        },
        Shape::ShiftVar | Shape::RegAlu => Decoded {
            r_out: r,
            r_in: r,
            r_in2: r,
            ..base
        },
        Shape::JumpReg => Decoded { r_in: r, ..base },
        Shape::JumpLinkReg => Decoded {
            r_out: r,
            r_in: r,
            ..base
        },
        Shape::BranchPair | Shape::Store => Decoded {
            r_in: r,
            r_in2: r,
            imm,
            ..base
        },
        Shape::BranchZero => Decoded {
            r_in: r,
            imm,
            ..base
        },
        Shape::BranchLink => Decoded {
            r_out: Some(REG_RA),
            r_in: r,
            imm,
            ..base
        },
        Shape::Jump => Decoded { imm, ..base },
        Shape::JumpLink => Decoded {
            r_out: Some(REG_RA),
            imm,
            ..base
        },
        Shape::ImmSigned | Shape::ImmUnsigned | Shape::Load => Decoded {
            r_out: r,
            r_in: r,
            imm,
            ..base
        },
        Shape::Lui | Shape::Cop0From => Decoded {
            r_out: r,
            imm,
            ..base
        },
        Shape::Cop0To => Decoded {
            r_in: r,
            imm,
            ..base
        },
        Shape::VMoveFrom => Decoded {
            r_out: r,
            v_in: v,
            element,
            ..base
        },
        Shape::VMoveTo => Decoded {
            r_in: r,
            v_out: v,
            element,
            ..base
        },
        // CFC2/CTC2 have no element field; the encoder leaves it zero.
        Shape::VControlFrom => Decoded {
            r_out: r,
            vc_in: vc,
            ..base
        },
        Shape::VControlTo => Decoded {
            r_in: r,
            vc_out: vc,
            ..base
        },
        Shape::VElementOnly => Decoded { element, ..base },
        Shape::VWrite => Decoded {
            v_out: v,
            element,
            ..base
        },
        Shape::VUnary => Decoded {
            v_out: v,
            v_in: v,
            element,
            ..base
        },
        Shape::VBinary => Decoded {
            v_out: v,
            v_in: v,
            vc_in: control(op),
            vc_out: control(op),
            element,
            ..base
        },
        Shape::VLoad => Decoded {
            r_in: r,
            v_out: block,
            imm,
            element,
            ..base
        },
        Shape::VStore => Decoded {
            r_in: r,
            v_in: block,
            imm,
            element,
            ..base
        },
    }
}

#[rstest]
fn every_opcode_round_trips_at_field_bounds(
    #[values(0, 31)] reg: u32,
    #[values(Bound::Low, Bound::High)] bound: Bound,
) {
    for op in Opcode::ALL {
        let (low, high) = imm_range(shape(op));
        let (imm, element) = match bound {
            Bound::Low => (low, 0),
            Bound::High => (high, 15),
        };
        let operands = Operands {
            rd: reg,
            rs: reg,
            rt: reg,
            sa: reg,
            imm,
            vd: reg,
            vs: reg,
            vt: reg,
            element: u32::from(element),
        };
        let word = encode(op, &operands);
        let element = match shape(op) {
            Shape::VControlFrom | Shape::VControlTo => 0,
            _ => element,
        };
        assert_eq!(
            decode(word),
            expected(op, reg, element, imm),
            "{op} reg={reg} {bound:?} encoded as {word:08X}"
        );
    }
}
