//! Instruction disassembler.
//!
//! Converts a 32-bit instruction word into assembler text for debug tracing,
//! generator listings and test diagnostics. Output is upper-case mnemonic
//! followed by operands, e.g. `"ADDU t1, t0, zero"` or `"LQV v1[0], 0(zero)"`.
//! Branch targets are printed as absolute addresses computed from `pc`.
//!
//! ```
//! use rspsim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x2408_0001, 0), "ADDIU t0, zero, 1");
//! assert_eq!(disassemble(0x1000_0001, 0x20), "BEQ zero, zero, 0x28");
//! assert_eq!(disassemble(0, 0), "NOP");
//! ```

use crate::isa::abi::reg_name;
use crate::isa::decode::identify;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcode::Opcode;

/// Disassembles one instruction located at `pc`.
///
/// Returns `"NOP"` for the all-zero word and `"INVALID"` for unrecognized
/// encodings.
pub fn disassemble(word: u32, pc: u32) -> String {
    use Opcode as Op;

    if word == 0 {
        return "NOP".to_string();
    }

    let opcode = identify(word);
    let m = opcode.mnemonic();
    let rd = reg_name(word.rd());
    let rt = reg_name(word.rt());
    let rs = reg_name(word.rs());
    let branch_target = pc
        .wrapping_add(4)
        .wrapping_add((word.imm_i16() << 2) as u32);

    match opcode {
        Op::Invalid | Op::Break => m.to_string(),

        Op::Sll | Op::Srl | Op::Sra => format!("{m} {rd}, {rt}, {}", word.sa()),
        Op::Sllv | Op::Srlv | Op::Srav => format!("{m} {rd}, {rt}, {rs}"),
        Op::Jr => format!("{m} {rs}"),
        Op::Jalr => format!("{m} {rd}, {rs}"),
        Op::Add
        | Op::Addu
        | Op::Sub
        | Op::Subu
        | Op::And
        | Op::Or
        | Op::Xor
        | Op::Nor
        | Op::Slt
        | Op::Sltu => format!("{m} {rd}, {rs}, {rt}"),

        Op::Bltz | Op::Bgez | Op::Bltzal | Op::Bgezal | Op::Blez | Op::Bgtz => {
            format!("{m} {rs}, 0x{branch_target:X}")
        }
        Op::Beq | Op::Bne => format!("{m} {rs}, {rt}, 0x{branch_target:X}"),
        Op::J | Op::Jal => format!("{m} 0x{:X}", word.imm_u26() << 2),

        Op::Addi | Op::Addiu | Op::Slti | Op::Sltiu => {
            format!("{m} {rt}, {rs}, {}", word.imm_i16())
        }
        Op::Andi | Op::Ori | Op::Xori => format!("{m} {rt}, {rs}, {}", word.imm_u16()),
        Op::Lui => format!("{m} {rt}, {}", word.imm_u16()),

        Op::Mfc0 | Op::Mtc0 | Op::Cfc2 | Op::Ctc2 => format!("{m} {rt}, {}", word.rd()),
        Op::Mfc2 | Op::Mtc2 => {
            format!("{m} {rt}, v{}[{}]", word.vs(), word.move_element())
        }

        Op::Lb | Op::Lh | Op::Lw | Op::Lbu | Op::Lhu | Op::Lwu | Op::Sb | Op::Sh | Op::Sw => {
            format!("{m} {rt}, {}({rs})", word.imm_i16())
        }

        Op::Vrcp
        | Op::Vrcpl
        | Op::Vrcph
        | Op::Vmov
        | Op::Vrsq
        | Op::Vrsql
        | Op::Vrsqh
        | Op::Vnop => format!(
            "{m} v{}[{}], v{}[{}]",
            word.vd(),
            word.dest_element(),
            word.vt(),
            word.vu_element()
        ),
        op if op.is_vu() => format!(
            "{m} v{}, v{}, v{}[{}]",
            word.vd(),
            word.vs(),
            word.vt(),
            word.vu_element()
        ),

        // Vector loads and stores.
        _ => format!(
            "{m} v{}[{}], {}({rs})",
            word.vt(),
            word.move_element(),
            word.imm_i7()
        ),
    }
}
