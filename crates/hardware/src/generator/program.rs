//! Random program generation.
//!
//! This module builds complete, self-timing test programs. It provides:
//! 1. **Instruction Draws:** One random instruction (or short sequence) per call,
//!    picked from weighted categories with small register and immediate ranges.
//! 2. **Program Layout:** A clock-reading prologue, the measured window, and an
//!    epilogue that stores the clock delta and ends in `BREAK`.
//! 3. **Listing:** Disassembly of the measured window.

use serde::Serialize;
use tracing::debug;

use crate::config::CategoryMode;
use crate::generator::rng::Xorshift32;
use crate::isa::abi::{
    COP0_DP_CLOCK, COP0_DP_STATUS, DP_WSTATUS_RESET_CLOCK_COUNTER, REG_AT, REG_S0, REG_S1,
    REG_S2, REG_ZERO,
};
use crate::isa::disasm::disassemble;
use crate::isa::encode::{Operands, encode};
use crate::isa::opcode::Opcode;

bitflags::bitflags! {
    /// Instruction categories the generator may draw from.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Categories: u8 {
        /// Scalar-unit instructions (ALU, branches, memory, COP0/COP2 moves).
        const SCALAR = 1 << 0;
        /// Vector arithmetic.
        const VECTOR = 1 << 1;
    }
}

impl From<CategoryMode> for Categories {
    fn from(mode: CategoryMode) -> Self {
        match mode {
            CategoryMode::Scalar => Self::SCALAR,
            CategoryMode::Vector => Self::VECTOR,
            CategoryMode::Both => Self::all(),
        }
    }
}

/// Register ALU ops drawn by the scalar ALU group, in draw order.
const ALU_OPS: [Opcode; 24] = [
    Opcode::Addi,
    Opcode::Addiu,
    Opcode::Slti,
    Opcode::Sltiu,
    Opcode::Andi,
    Opcode::Ori,
    Opcode::Xori,
    Opcode::Lui,
    Opcode::Sll,
    Opcode::Srl,
    Opcode::Sra,
    Opcode::Sllv,
    Opcode::Srlv,
    Opcode::Srav,
    Opcode::Add,
    Opcode::Addu,
    Opcode::Sub,
    Opcode::Subu,
    Opcode::And,
    Opcode::Or,
    Opcode::Xor,
    Opcode::Nor,
    Opcode::Slt,
    Opcode::Sltu,
];

const MEM_OPS: [Opcode; 9] = [
    Opcode::Lb,
    Opcode::Lh,
    Opcode::Lw,
    Opcode::Lbu,
    Opcode::Lhu,
    Opcode::Lwu,
    Opcode::Sb,
    Opcode::Sh,
    Opcode::Sw,
];

const VMEM_OPS: [Opcode; 23] = [
    Opcode::Lbv,
    Opcode::Lsv,
    Opcode::Llv,
    Opcode::Ldv,
    Opcode::Lqv,
    Opcode::Lrv,
    Opcode::Lpv,
    Opcode::Luv,
    Opcode::Lhv,
    Opcode::Lfv,
    Opcode::Ltv,
    Opcode::Sbv,
    Opcode::Ssv,
    Opcode::Slv,
    Opcode::Sdv,
    Opcode::Sqv,
    Opcode::Srv,
    Opcode::Spv,
    Opcode::Suv,
    Opcode::Shv,
    Opcode::Sfv,
    Opcode::Swv,
    Opcode::Stv,
];

/// Conditional branches drawn by the branch group, each skipping its delay slot.
const COND_BRANCHES: [Opcode; 8] = [
    Opcode::Beq,
    Opcode::Bne,
    Opcode::Blez,
    Opcode::Bgtz,
    Opcode::Bltz,
    Opcode::Bgez,
    Opcode::Bltzal,
    Opcode::Bgezal,
];

/// Number of vector arithmetic opcodes (`VMULF` through `VNOP`).
const VU_OP_COUNT: u32 = Opcode::Vnop as u32 - Opcode::Vmulf as u32 + 1;

/// Instruction groups. Groups 7-10 are all vector arithmetic, which
/// weights it at four elevenths when both categories are enabled.
mod group {
    pub const NOP: u32 = 0;
    pub const BRANCH: u32 = 1;
    pub const ALU: u32 = 2;
    pub const MEM: u32 = 3;
    pub const COP0: u32 = 4;
    pub const VMOVE: u32 = 5;
    pub const VMEM: u32 = 6;
    pub const VU: u32 = 7;
    /// Group draw range when only scalar categories are enabled.
    pub const SCALAR_RANGE: u32 = 7;
    /// Group draw range when both categories are enabled.
    pub const ALL_RANGE: u32 = 11;
}

/// Result of one `generate` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GeneratedProgram {
    /// Size of the program in bytes, rounded up to 8.
    pub bytes_written: usize,
    /// Words emitted into the measured window.
    pub emitted: usize,
    /// Byte address of the first measured instruction.
    pub window_start: u32,
    /// Byte address one past the last measured instruction.
    pub window_end: u32,
}

/// Random program generator with a caller-owned RNG.
#[derive(Clone, Debug, Default)]
pub struct Generator {
    rng: Xorshift32,
}

/// Appends words to a program buffer.
struct Emitter<'a> {
    code: &'a mut Vec<u32>,
}

impl Emitter<'_> {
    fn emit(&mut self, opcode: Opcode, operands: &Operands) {
        self.code.push(encode(opcode, operands));
    }

    fn nop(&mut self) {
        self.code.push(0);
    }

    /// Word index of the instruction after the one about to be emitted.
    fn npc(&self) -> u32 {
        self.code.len() as u32 + 1
    }

    /// Byte address of the next word.
    fn pc(&self) -> u32 {
        self.code.len() as u32 * 4
    }
}

impl Generator {
    /// Creates a generator seeded with `seed` (0 is treated as 1).
    pub const fn new(seed: u32) -> Self {
        Self {
            rng: Xorshift32::new(seed),
        }
    }

    /// Generates a complete timing program into `code`.
    ///
    /// `code` is cleared first. The measured window holds `instruction_count`
    /// draws (jump-register draws expand to three words) and, if the last
    /// draw was a branch, a trailing `NOP` for its delay slot. The first and
    /// last draws are restricted to scalar categories so boundary fetches are
    /// never dual-issued with the prologue or epilogue.
    pub fn generate(
        &mut self,
        code: &mut Vec<u32>,
        instruction_count: usize,
        categories: Categories,
    ) -> GeneratedProgram {
        code.clear();
        let mut out = Emitter { code };

        out.emit(
            Opcode::Addiu,
            &Operands::alu_imm(REG_S2 as u32, REG_ZERO as u32, DP_WSTATUS_RESET_CLOCK_COUNTER),
        );
        out.emit(Opcode::Mtc0, &Operands::cop0(REG_S2 as u32, COP0_DP_STATUS));
        out.emit(Opcode::Mfc0, &Operands::cop0(REG_S0 as u32, COP0_DP_CLOCK));
        for _ in 0..3 {
            out.nop();
        }

        let window_start = out.pc();
        let mut delay = false;
        for i in 0..instruction_count {
            let mut cats = categories;
            if i == 0 || i + 1 == instruction_count {
                cats &= Categories::SCALAR;
            }
            delay = self.draw(&mut out, delay, cats);
        }
        if delay {
            out.nop();
        }
        let window_end = out.pc();

        out.nop();
        out.nop();
        out.emit(Opcode::Mfc0, &Operands::cop0(REG_S1 as u32, COP0_DP_CLOCK));
        out.emit(Opcode::Sw, &Operands::mem(REG_S0 as u32, 0, REG_ZERO as u32));
        out.emit(Opcode::Sw, &Operands::mem(REG_S1 as u32, 4, REG_ZERO as u32));
        out.emit(Opcode::Break, &Operands::default());
        out.nop();
        if out.code.len() % 2 != 0 {
            out.nop();
        }

        for line in listing(&out.code[..], window_start, window_end) {
            debug!("{line}");
        }

        GeneratedProgram {
            bytes_written: out.code.len() * 4,
            emitted: ((window_end - window_start) / 4) as usize,
            window_start,
            window_end,
        }
    }

    /// Emits one random instruction. Returns whether it was a branch, i.e.
    /// whether the next word is a delay slot.
    fn draw(&mut self, out: &mut Emitter<'_>, in_delay: bool, categories: Categories) -> bool {
        let rng = &mut self.rng;
        let mut g = draw_group(rng, categories);
        while g == group::BRANCH && in_delay {
            g = draw_group(rng, categories);
        }

        match g {
            group::BRANCH => {
                let skip = Operands::branch(REG_ZERO as u32, REG_ZERO as u32, 4);
                match rng.below(12) {
                    0 => out.emit(Opcode::J, &Operands::jump((out.npc() + 1) * 4)),
                    1 => out.emit(Opcode::Jal, &Operands::jump((out.npc() + 1) * 4)),
                    n @ 2..=9 => out.emit(COND_BRANCHES[(n - 2) as usize], &skip),
                    n => {
                        let rd = rng.below(4);
                        let target = (out.npc() + 3) << 2;
                        out.emit(
                            Opcode::Lui,
                            &Operands::alu_imm(REG_AT as u32, 0, (target >> 16) as i32),
                        );
                        out.emit(
                            Opcode::Ori,
                            &Operands::alu_imm(REG_AT as u32, REG_AT as u32, (target & 0xFFFF) as i32),
                        );
                        if n == 10 {
                            out.emit(Opcode::Jr, &Operands::jump_reg(0, REG_AT as u32));
                        } else {
                            out.emit(Opcode::Jalr, &Operands::jump_reg(rd, REG_AT as u32));
                        }
                    }
                }
                true
            }
            group::ALU => {
                let rt = rng.below(4);
                let rs = rng.below(4);
                let rd = rng.below(4);
                let imm = rng.below(3);
                let op = ALU_OPS[rng.below(24) as usize];
                let operands = match op {
                    Opcode::Sll | Opcode::Srl | Opcode::Sra => Operands::shift(rd, rt, imm),
                    Opcode::Sllv | Opcode::Srlv | Opcode::Srav => Operands::shift_var(rd, rt, rs),
                    Opcode::Lui => Operands::alu_imm(rt, 0, imm as i32),
                    op if (Opcode::Addi..=Opcode::Xori).contains(&op) => {
                        Operands::alu_imm(rt, rs, imm as i32)
                    }
                    _ => Operands::alu_reg(rd, rs, rt),
                };
                out.emit(op, &operands);
                false
            }
            group::MEM => {
                let rt = rng.below(4);
                let base = rng.below(4);
                let offset = rng.below(3) as i32;
                let op = MEM_OPS[rng.below(9) as usize];
                out.emit(op, &Operands::mem(rt, offset, base));
                false
            }
            group::COP0 => {
                let rt = rng.below(4);
                let op = if rng.below(2) == 0 {
                    Opcode::Mfc0
                } else {
                    Opcode::Mtc0
                };
                out.emit(op, &Operands::cop0(rt, 0));
                false
            }
            group::VMOVE => {
                let rt = rng.below(4);
                let vs = rng.below(4);
                let vc = rng.below(4);
                match rng.below(4) {
                    0 => out.emit(Opcode::Mfc2, &Operands::vmove(rt, vs, 0)),
                    1 => out.emit(Opcode::Cfc2, &Operands::vcontrol(rt, vc)),
                    2 => out.emit(Opcode::Mtc2, &Operands::vmove(rt, vs, 0)),
                    _ => out.emit(Opcode::Ctc2, &Operands::vcontrol(rt, vc)),
                }
                false
            }
            group::VMEM => {
                let vt = rng.below(4);
                let base = rng.below(4);
                let offset = rng.below(3) as i32;
                let op = VMEM_OPS[rng.below(23) as usize];
                out.emit(op, &Operands::vmem(vt, 0, offset, base));
                false
            }
            group::NOP => {
                out.nop();
                false
            }
            _ => {
                let de = rng.below(4);
                let vsar_e = 8 + rng.below(4);
                let vd = rng.below(4);
                let vs = rng.below(4);
                let vt = rng.below(4);
                let op = Opcode::ALL[(Opcode::Vmulf as u32 + rng.below(VU_OP_COUNT)) as usize];
                let operands = match op {
                    Opcode::Vsar => Operands::vector(vd, vs, vt, vsar_e),
                    Opcode::Vmacq => Operands::vector(vd, 0, 0, 0),
                    Opcode::Vnop => Operands::vector(0, 0, 0, 0),
                    op if (Opcode::Vrcp..=Opcode::Vrsqh).contains(&op) => {
                        Operands::vector(vd, de, vt, 0)
                    }
                    _ => Operands::vector(vd, vs, vt, 0),
                };
                out.emit(op, &operands);
                false
            }
        }
    }
}

/// Picks the instruction group for one draw.
fn draw_group(rng: &mut Xorshift32, categories: Categories) -> u32 {
    if categories == Categories::all() {
        rng.below(group::ALL_RANGE)
    } else if categories == Categories::SCALAR {
        rng.below(group::SCALAR_RANGE)
    } else if categories == Categories::VECTOR {
        group::VU
    } else {
        group::NOP
    }
}

/// Disassembly of `code[start..end]`, one `"  AAA WWWWWWWW TEXT"` line per word.
pub fn listing(code: &[u32], start: u32, end: u32) -> impl Iterator<Item = String> + '_ {
    (start..end).step_by(4).map(move |pc| {
        let word = code.get((pc >> 2) as usize).copied().unwrap_or(0);
        format!("  {pc:03X} {word:08X} {}", disassemble(word, pc))
    })
}
