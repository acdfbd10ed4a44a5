//! Pipeline state and the per-cycle step.
//!
//! `Pipeline` owns every latch, the register locks and the fetch cursor for
//! one simulation run. `step` advances exactly one cycle by running the
//! stages back to front, so each stage reads the latch its successor has
//! not yet overwritten this cycle:
//!
//! Writeback → Retire-prep → Execute → Read → Fetch
//!
//! A stall in Execute skips Read and Fetch; a stall in Read skips Fetch.

use crate::core::imem::InstructionMemory;
use crate::core::pipeline::latches::{FetchSlot, IssueSlot, LanePair, RetireSlot, RetiredSlot};
use crate::core::pipeline::locks::RegisterLocks;
use crate::core::pipeline::stages::{
    execute_stage, fetch_stage, read_stage, retire_prep_stage, writeback_stage,
};
use crate::stats::PipelineStats;

/// Fetch program counter plus the single-issue-next flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchCursor {
    /// Address of the next instruction to scan.
    pub pc: u32,
    /// Restricts the next scan to one instruction.
    pub single_issue: bool,
}

/// Dual-lane five-stage pipeline state.
#[derive(Clone, Debug)]
pub struct Pipeline<'a> {
    /// Instruction memory being fetched from.
    pub imem: InstructionMemory<'a>,
    /// Fetch cursor.
    pub fetch: FetchCursor,
    /// IF/RD latch.
    pub rd_in: LanePair<FetchSlot>,
    /// RD/EX latch.
    pub ex_in: LanePair<IssueSlot>,
    /// EX/DF latch.
    pub df_in: LanePair<RetireSlot>,
    /// DF/WB latch.
    pub wb_in: LanePair<RetireSlot>,
    /// What Writeback retired last cycle.
    pub wb_out: LanePair<RetiredSlot>,
    /// Outstanding-writer counters.
    pub locks: RegisterLocks,
    /// Set by a taken branch in Execute; Fetch emits bubbles while set.
    pub delay_slot: bool,
    /// Set once the terminator retires.
    pub broken: bool,
    /// Counters; never affect timing.
    pub stats: PipelineStats,
}

impl<'a> Pipeline<'a> {
    /// Creates an empty pipeline that starts fetching at the window start.
    pub fn new(imem: InstructionMemory<'a>) -> Self {
        Self {
            fetch: FetchCursor {
                pc: imem.start(),
                single_issue: false,
            },
            imem,
            rd_in: LanePair::splat(FetchSlot::BUBBLE),
            ex_in: LanePair::splat(IssueSlot::BUBBLE),
            df_in: LanePair::splat(RetireSlot::BUBBLE),
            wb_in: LanePair::splat(RetireSlot::BUBBLE),
            wb_out: LanePair::default(),
            locks: RegisterLocks::new(),
            delay_slot: false,
            broken: false,
            stats: PipelineStats::default(),
        }
    }

    /// Advances the pipeline by one cycle.
    pub fn step(&mut self) {
        self.stats.cycles += 1;
        writeback_stage(self);
        retire_prep_stage(self);
        if execute_stage(self) && read_stage(self) {
            fetch_stage(self);
        }
    }
}
