use rspsim_core::common::constants::TERMINATOR_WORD;
use rspsim_core::isa::encode::{Operands, encode};
use rspsim_core::isa::opcode::Opcode;

/// Assembles an instruction window one word at a time.
#[derive(Debug, Default)]
pub struct WindowBuilder {
    words: Vec<u32>,
}

impl WindowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn op(mut self, opcode: Opcode, operands: Operands) -> Self {
        self.words.push(encode(opcode, &operands));
        self
    }

    pub fn word(mut self, word: u32) -> Self {
        self.words.push(word);
        self
    }

    pub fn nop(self) -> Self {
        self.word(0)
    }

    /// `BREAK`, the terminator.
    pub fn brk(self) -> Self {
        self.word(TERMINATOR_WORD)
    }

    pub fn addiu(self, rt: u32, rs: u32, imm: i32) -> Self {
        self.op(Opcode::Addiu, Operands::alu_imm(rt, rs, imm))
    }

    pub fn addu(self, rd: u32, rs: u32, rt: u32) -> Self {
        self.op(Opcode::Addu, Operands::alu_reg(rd, rs, rt))
    }

    pub fn lw(self, rt: u32, offset: i32, base: u32) -> Self {
        self.op(Opcode::Lw, Operands::mem(rt, offset, base))
    }

    pub fn sw(self, rt: u32, offset: i32, base: u32) -> Self {
        self.op(Opcode::Sw, Operands::mem(rt, offset, base))
    }

    pub fn lqv(self, vt: u32) -> Self {
        self.op(Opcode::Lqv, Operands::vmem(vt, 0, 0, 0))
    }

    pub fn vadd(self, vd: u32, vs: u32, vt: u32) -> Self {
        self.op(Opcode::Vadd, Operands::vector(vd, vs, vt, 0))
    }

    pub fn build(self) -> Vec<u32> {
        self.words
    }
}
