//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the opcode catalogue, field extraction, decoding, encoding and
//! disassembly for the scalar unit (a MIPS R4000 subset) and the coprocessor-2
//! vector unit.
//!
//! # Layers
//!
//! * `opcode`: Opcode tags, mnemonics and pipeline classification flags.
//! * `instruction`: Bit field extraction and the `Decoded` record.
//! * `decode`: Word to `Decoded`.
//! * `encode`: Opcode plus operands to word (used by the program generator).
//! * `disasm`: Word to assembler text.

/// Application Binary Interface (ABI) register name mappings.
pub mod abi;

/// Instruction decoding logic for the scalar and vector encodings.
pub mod decode;

/// Instruction disassembler for debug tracing and diagnostics.
pub mod disasm;

/// Instruction encoders, the inverse of `decode`.
pub mod encode;

/// Instruction encoding structures and bit extraction utilities.
pub mod instruction;

/// Opcode catalogue and classification flags.
pub mod opcode;
