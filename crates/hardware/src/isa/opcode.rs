//! Opcode enumeration and behavioral classification.
//!
//! Every instruction the decoder recognizes maps to exactly one `Opcode`. The
//! pipeline never looks at raw encodings past decode: it asks `classify` for a
//! small flag set describing how the instruction interacts with bypassing,
//! memory, control flow and the vector unit.
//!
//! The opcode list, mnemonics and flags live in a single table (`OPCODE_TABLE`)
//! indexed by the opcode's discriminant, so the three can never drift apart.

use bitflags::bitflags;

bitflags! {
    /// Behavioral attributes of an opcode.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct OpcodeFlags: u8 {
        /// Result can be forwarded to a dependent read one cycle early.
        const BYPASS        = 1 << 0;
        /// Reads data memory.
        const LOAD_MEM      = 1 << 1;
        /// Coprocessor register transfer; counts as both load and store.
        const LOADSTORE_COP = 1 << 2;
        /// Writes data memory.
        const STORE_MEM     = 1 << 3;
        /// Unconditional jump.
        const BRANCH_UNCOND = 1 << 4;
        /// Conditional branch.
        const BRANCH_COND   = 1 << 5;
        /// Executes on the vector lane.
        const VU            = 1 << 6;
    }
}

impl OpcodeFlags {
    /// Flags that make an opcode a control-flow instruction.
    pub const BRANCH: Self = Self::BRANCH_UNCOND.union(Self::BRANCH_COND);
    /// Flags that make an opcode count as a load for the load/store interlock.
    pub const LOAD: Self = Self::LOAD_MEM.union(Self::LOADSTORE_COP);
    /// Flags that make an opcode count as a store for the load/store interlock.
    pub const STORE: Self = Self::STORE_MEM.union(Self::LOADSTORE_COP);
}

/// Canonical opcode tag produced by the decoder.
///
/// Discriminants are contiguous from zero in table order; `Invalid` sits one
/// past the last real opcode and has no table entry.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Opcode {
    Sll,
    Srl,
    Sra,
    Sllv,
    Srlv,
    Srav,
    Jr,
    Jalr,
    Break,
    Add,
    Addu,
    Sub,
    Subu,
    And,
    Or,
    Xor,
    Nor,
    Slt,
    Sltu,
    Bltz,
    Bgez,
    Bltzal,
    Bgezal,
    J,
    Jal,
    Beq,
    Bne,
    Blez,
    Bgtz,
    Addi,
    Addiu,
    Slti,
    Sltiu,
    Andi,
    Ori,
    Xori,
    Lui,
    Mfc0,
    Mtc0,
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Lwu,
    Sb,
    Sh,
    Sw,
    Mfc2,
    Cfc2,
    Mtc2,
    Ctc2,
    Vmulf,
    Vmulu,
    Vrndp,
    Vmulq,
    Vmudl,
    Vmudm,
    Vmudn,
    Vmudh,
    Vmacf,
    Vmacu,
    Vrndn,
    Vmacq,
    Vmadl,
    Vmadm,
    Vmadn,
    Vmadh,
    Vadd,
    Vsub,
    Vabs,
    Vaddc,
    Vsubc,
    Vsar,
    Vlt,
    Veq,
    Vne,
    Vge,
    Vcl,
    Vch,
    Vcr,
    Vmrg,
    Vand,
    Vnand,
    Vor,
    Vnor,
    Vxor,
    Vnxor,
    Vrcp,
    Vrcpl,
    Vrcph,
    Vmov,
    Vrsq,
    Vrsql,
    Vrsqh,
    Vnop,
    Lbv,
    Lsv,
    Llv,
    Ldv,
    Lqv,
    Lrv,
    Lpv,
    Luv,
    Lhv,
    Lfv,
    Ltv,
    Sbv,
    Ssv,
    Slv,
    Sdv,
    Sqv,
    Srv,
    Spv,
    Suv,
    Shv,
    Sfv,
    Swv,
    Stv,
    /// Unrecognized encoding.
    #[default]
    Invalid,
}

/// One row of the opcode table.
#[derive(Debug, Clone, Copy)]
struct OpcodeInfo {
    opcode: Opcode,
    mnemonic: &'static str,
    flags: OpcodeFlags,
}

const fn row(opcode: Opcode, mnemonic: &'static str, flags: OpcodeFlags) -> OpcodeInfo {
    OpcodeInfo {
        opcode,
        mnemonic,
        flags,
    }
}

const NONE: OpcodeFlags = OpcodeFlags::empty();
const BYP: OpcodeFlags = OpcodeFlags::BYPASS;
const JMP: OpcodeFlags = OpcodeFlags::BRANCH_UNCOND;
const BRC: OpcodeFlags = OpcodeFlags::BRANCH_COND;
const LDM: OpcodeFlags = OpcodeFlags::LOAD_MEM;
const STM: OpcodeFlags = OpcodeFlags::STORE_MEM;
const COP: OpcodeFlags = OpcodeFlags::LOADSTORE_COP;
const VU: OpcodeFlags = OpcodeFlags::VU;

/// Opcode table, indexed by discriminant.
const OPCODE_TABLE: [OpcodeInfo; Opcode::COUNT] = [
    row(Opcode::Sll, "SLL", BYP),
    row(Opcode::Srl, "SRL", BYP),
    row(Opcode::Sra, "SRA", BYP),
    row(Opcode::Sllv, "SLLV", BYP),
    row(Opcode::Srlv, "SRLV", BYP),
    row(Opcode::Srav, "SRAV", BYP),
    row(Opcode::Jr, "JR", JMP),
    row(Opcode::Jalr, "JALR", BYP.union(JMP)),
    row(Opcode::Break, "BREAK", NONE),
    row(Opcode::Add, "ADD", BYP),
    row(Opcode::Addu, "ADDU", BYP),
    row(Opcode::Sub, "SUB", BYP),
    row(Opcode::Subu, "SUBU", BYP),
    row(Opcode::And, "AND", BYP),
    row(Opcode::Or, "OR", BYP),
    row(Opcode::Xor, "XOR", BYP),
    row(Opcode::Nor, "NOR", BYP),
    row(Opcode::Slt, "SLT", BYP),
    row(Opcode::Sltu, "SLTU", BYP),
    row(Opcode::Bltz, "BLTZ", BRC),
    row(Opcode::Bgez, "BGEZ", BRC),
    row(Opcode::Bltzal, "BLTZAL", BYP.union(BRC)),
    row(Opcode::Bgezal, "BGEZAL", BYP.union(BRC)),
    row(Opcode::J, "J", JMP),
    row(Opcode::Jal, "JAL", BYP.union(JMP)),
    row(Opcode::Beq, "BEQ", BRC),
    row(Opcode::Bne, "BNE", BRC),
    row(Opcode::Blez, "BLEZ", BRC),
    row(Opcode::Bgtz, "BGTZ", BRC),
    row(Opcode::Addi, "ADDI", BYP),
    row(Opcode::Addiu, "ADDIU", BYP),
    row(Opcode::Slti, "SLTI", BYP),
    row(Opcode::Sltiu, "SLTIU", BYP),
    row(Opcode::Andi, "ANDI", BYP),
    row(Opcode::Ori, "ORI", BYP),
    row(Opcode::Xori, "XORI", BYP),
    row(Opcode::Lui, "LUI", BYP),
    row(Opcode::Mfc0, "MFC0", COP),
    row(Opcode::Mtc0, "MTC0", COP),
    row(Opcode::Lb, "LB", LDM),
    row(Opcode::Lh, "LH", LDM),
    row(Opcode::Lw, "LW", LDM),
    row(Opcode::Lbu, "LBU", LDM),
    row(Opcode::Lhu, "LHU", LDM),
    row(Opcode::Lwu, "LWU", LDM),
    row(Opcode::Sb, "SB", STM),
    row(Opcode::Sh, "SH", STM),
    row(Opcode::Sw, "SW", STM),
    row(Opcode::Mfc2, "MFC2", COP),
    row(Opcode::Cfc2, "CFC2", COP),
    row(Opcode::Mtc2, "MTC2", COP),
    row(Opcode::Ctc2, "CTC2", COP),
    row(Opcode::Vmulf, "VMULF", VU),
    row(Opcode::Vmulu, "VMULU", VU),
    row(Opcode::Vrndp, "VRNDP", VU),
    row(Opcode::Vmulq, "VMULQ", VU),
    row(Opcode::Vmudl, "VMUDL", VU),
    row(Opcode::Vmudm, "VMUDM", VU),
    row(Opcode::Vmudn, "VMUDN", VU),
    row(Opcode::Vmudh, "VMUDH", VU),
    row(Opcode::Vmacf, "VMACF", VU),
    row(Opcode::Vmacu, "VMACU", VU),
    row(Opcode::Vrndn, "VRNDN", VU),
    row(Opcode::Vmacq, "VMACQ", VU),
    row(Opcode::Vmadl, "VMADL", VU),
    row(Opcode::Vmadm, "VMADM", VU),
    row(Opcode::Vmadn, "VMADN", VU),
    row(Opcode::Vmadh, "VMADH", VU),
    row(Opcode::Vadd, "VADD", VU),
    row(Opcode::Vsub, "VSUB", VU),
    row(Opcode::Vabs, "VABS", VU),
    row(Opcode::Vaddc, "VADDC", VU),
    row(Opcode::Vsubc, "VSUBC", VU),
    row(Opcode::Vsar, "VSAR", VU),
    row(Opcode::Vlt, "VLT", VU),
    row(Opcode::Veq, "VEQ", VU),
    row(Opcode::Vne, "VNE", VU),
    row(Opcode::Vge, "VGE", VU),
    row(Opcode::Vcl, "VCL", VU),
    row(Opcode::Vch, "VCH", VU),
    row(Opcode::Vcr, "VCR", VU),
    row(Opcode::Vmrg, "VMRG", VU),
    row(Opcode::Vand, "VAND", VU),
    row(Opcode::Vnand, "VNAND", VU),
    row(Opcode::Vor, "VOR", VU),
    row(Opcode::Vnor, "VNOR", VU),
    row(Opcode::Vxor, "VXOR", VU),
    row(Opcode::Vnxor, "VNXOR", VU),
    row(Opcode::Vrcp, "VRCP", VU),
    row(Opcode::Vrcpl, "VRCPL", VU),
    row(Opcode::Vrcph, "VRCPH", VU),
    row(Opcode::Vmov, "VMOV", VU),
    row(Opcode::Vrsq, "VRSQ", VU),
    row(Opcode::Vrsql, "VRSQL", VU),
    row(Opcode::Vrsqh, "VRSQH", VU),
    row(Opcode::Vnop, "VNOP", VU),
    row(Opcode::Lbv, "LBV", LDM),
    row(Opcode::Lsv, "LSV", LDM),
    row(Opcode::Llv, "LLV", LDM),
    row(Opcode::Ldv, "LDV", LDM),
    row(Opcode::Lqv, "LQV", LDM),
    row(Opcode::Lrv, "LRV", LDM),
    row(Opcode::Lpv, "LPV", LDM),
    row(Opcode::Luv, "LUV", LDM),
    row(Opcode::Lhv, "LHV", LDM),
    row(Opcode::Lfv, "LFV", LDM),
    row(Opcode::Ltv, "LTV", LDM),
    row(Opcode::Sbv, "SBV", STM),
    row(Opcode::Ssv, "SSV", STM),
    row(Opcode::Slv, "SLV", STM),
    row(Opcode::Sdv, "SDV", STM),
    row(Opcode::Sqv, "SQV", STM),
    row(Opcode::Srv, "SRV", STM),
    row(Opcode::Spv, "SPV", STM),
    row(Opcode::Suv, "SUV", STM),
    row(Opcode::Shv, "SHV", STM),
    row(Opcode::Sfv, "SFV", STM),
    row(Opcode::Swv, "SWV", STM),
    row(Opcode::Stv, "STV", STM),
];

impl Opcode {
    /// Number of real opcodes (excludes `Invalid`).
    pub const COUNT: usize = Self::Invalid as usize;

    /// All real opcodes in discriminant order.
    pub const ALL: [Self; Self::COUNT] = {
        let mut all = [Self::Invalid; Self::COUNT];
        let mut i = 0;
        while i < Self::COUNT {
            all[i] = OPCODE_TABLE[i].opcode;
            i += 1;
        }
        all
    };

    /// Looks up an opcode by its integer id. Returns `None` outside `0..COUNT`.
    pub fn from_index(index: i32) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| OPCODE_TABLE.get(i))
            .map(|info| info.opcode)
    }

    /// Integer id of the opcode; `Invalid` maps to `-1`.
    pub const fn index(self) -> i32 {
        match self {
            Self::Invalid => -1,
            op => op as i32,
        }
    }

    /// Upper-case assembler mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Invalid => "INVALID",
            op => OPCODE_TABLE[op as usize].mnemonic,
        }
    }

    /// Behavioral flags of this opcode (see [`classify`]).
    #[inline]
    pub const fn flags(self) -> OpcodeFlags {
        classify(self)
    }

    /// Jump or conditional branch.
    #[inline]
    pub const fn is_branch(self) -> bool {
        self.flags().intersects(OpcodeFlags::BRANCH)
    }

    /// Result may be bypassed to a dependent read.
    #[inline]
    pub const fn is_bypassable(self) -> bool {
        self.flags().intersects(OpcodeFlags::BYPASS)
    }

    /// Counts as a load for the load/store interlock.
    #[inline]
    pub const fn is_load(self) -> bool {
        self.flags().intersects(OpcodeFlags::LOAD)
    }

    /// Counts as a store for the load/store interlock.
    #[inline]
    pub const fn is_store(self) -> bool {
        self.flags().intersects(OpcodeFlags::STORE)
    }

    /// Issues on the vector lane.
    #[inline]
    pub const fn is_vu(self) -> bool {
        self.flags().intersects(OpcodeFlags::VU)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Returns the flag set of an opcode. `Invalid` has no flags.
#[inline]
pub const fn classify(opcode: Opcode) -> OpcodeFlags {
    match opcode {
        Opcode::Invalid => OpcodeFlags::empty(),
        op => OPCODE_TABLE[op as usize].flags,
    }
}

/// Returns the flag set for a raw opcode id; empty outside `0..Opcode::COUNT`.
pub fn flags_for_index(index: i32) -> OpcodeFlags {
    Opcode::from_index(index).map_or(OpcodeFlags::empty(), classify)
}
