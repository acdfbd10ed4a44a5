//! Instruction-memory view.
//!
//! A read-only window over a caller-owned program image. Fetch addresses are
//! masked to the 4 KiB instruction memory, and anything outside
//! `start..end` reads as the terminator word, so a runaway fetch always
//! reaches `BREAK`.

use crate::common::constants::{IMEM_ADDR_MASK, TERMINATOR_WORD};

/// Borrowed program image plus the measured `[start, end)` window.
///
/// `words[i]` holds the instruction at byte address `i * 4`.
#[derive(Clone, Copy, Debug)]
pub struct InstructionMemory<'a> {
    words: &'a [u32],
    start: u32,
    end: u32,
}

impl<'a> InstructionMemory<'a> {
    /// Creates a view over `words` that only exposes `[start, end)`.
    pub const fn new(words: &'a [u32], start: u32, end: u32) -> Self {
        Self { words, start, end }
    }

    /// Creates a view exposing the whole image.
    pub fn whole(words: &'a [u32]) -> Self {
        let end = u32::try_from(words.len() * 4).unwrap_or(u32::MAX);
        Self::new(words, 0, end)
    }

    /// First byte address of the window.
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// One past the last byte address of the window.
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Reads the instruction word at `pc`.
    pub fn read(&self, pc: u32) -> u32 {
        let pc = pc & IMEM_ADDR_MASK;
        if pc < self.start || pc >= self.end {
            return TERMINATOR_WORD;
        }
        self.words
            .get((pc >> 2) as usize)
            .copied()
            .unwrap_or(TERMINATOR_WORD)
    }
}
