//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. It scans at most
//! one instruction pair starting at the fetch PC and packs up to one
//! scalar-lane and one vector-lane instruction into the IF/RD latch.
//! Packing stops at a lane conflict, a vector dependency on the previous
//! scanned instruction, a branch, the terminator, or single-issue mode.

use tracing::trace;

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::pipeline::Pipeline;
use crate::core::pipeline::latches::FetchSlot;
use crate::isa::decode::decode;
use crate::isa::opcode::Opcode;

/// Number of instruction slots examined per cycle.
const SCAN_WIDTH: u32 = 2;

/// Executes the instruction fetch stage.
///
/// # Behavior
///
/// - Inside a branch delay slot both lanes receive a bubble and the PC holds.
///   A PC at the second word of a pair forces the next scan to single issue.
/// - Otherwise scans `pc .. pc + 8`, advancing the PC only past issued words.
/// - The terminator issues but does not advance the PC, so it is re-fetched
///   until it retires.
pub fn fetch_stage(p: &mut Pipeline<'_>) {
    let mut su: Option<FetchSlot> = None;
    let mut vu: Option<FetchSlot> = None;

    if p.delay_slot {
        trace!(target: "rspsim::pipeline", pc = p.fetch.pc, "if delay-slot bubble");
        if p.fetch.pc & INSTRUCTION_SIZE != 0 {
            p.fetch.single_issue = true;
        }
        p.stats.delay_slot_bubbles += 1;
    } else {
        let single = p.fetch.single_issue;
        let end = p.fetch.pc.wrapping_add(SCAN_WIDTH * INSTRUCTION_SIZE);
        let mut prev_v_out = 0;

        while p.fetch.pc != end {
            let pc = p.fetch.pc;
            let word = p.imem.read(pc);
            let d = decode(word);

            let lane = if d.opcode.is_vu() { &mut vu } else { &mut su };
            if lane.is_some() {
                break;
            }
            if prev_v_out & (d.v_in | d.v_out) != 0 {
                trace!(target: "rspsim::pipeline", pc, prev_v_out, "if vector dependency");
                break;
            }
            *lane = Some(FetchSlot {
                pc,
                word,
                bubble: false,
            });
            trace!(
                target: "rspsim::pipeline",
                pc,
                lane = if d.opcode.is_vu() { "vu" } else { "su" },
                op = %d.opcode,
                "if issue"
            );

            if d.opcode == Opcode::Break {
                break;
            }
            p.fetch.pc = pc.wrapping_add(INSTRUCTION_SIZE);
            p.fetch.single_issue = d.opcode.is_branch();
            if single || p.fetch.single_issue {
                break;
            }
            prev_v_out = d.v_out;
        }
    }

    if su.is_some() {
        p.stats.scalar_issued += 1;
    }
    if vu.is_some() {
        p.stats.vector_issued += 1;
    }
    if su.is_some() && vu.is_some() {
        p.stats.dual_issue_cycles += 1;
    }
    p.rd_in.su = su.unwrap_or(FetchSlot::BUBBLE);
    p.rd_in.vu = vu.unwrap_or(FetchSlot::BUBBLE);
}
