//! Register Read (RD) Stage.
//!
//! This module implements the hazard check of the pipeline. It re-decodes
//! both lanes of the IF/RD latch, checks scalar and vector sources against
//! in-flight writers, and either issues the pair into Execute (acquiring
//! register locks) or cancels the whole stage for this cycle.

use tracing::trace;

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::hazards::{scalar_hazard, vector_hazard};
use crate::core::pipeline::latches::{FetchSlot, IssueSlot, LanePair};
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;

fn decode_slot(slot: &FetchSlot) -> Decoded {
    if slot.bubble {
        Decoded::INVALID
    } else {
        decode(slot.word)
    }
}

/// Executes the register read stage.
///
/// Returns `false` when a hazard stalls the stage. Both lanes entering
/// Execute are then bubbles, the IF/RD latch is held, and Fetch must not run
/// this cycle.
pub fn read_stage(p: &mut Pipeline<'_>) -> bool {
    let su = decode_slot(&p.rd_in.su);
    let vu = decode_slot(&p.rd_in.vu);

    if let Some(r) = su
        .sources()
        .find(|&r| scalar_hazard(Some(r), &p.locks, &p.df_in.su, &p.wb_in.su))
    {
        trace!(target: "rspsim::pipeline", reg = r, "rd scalar hazard");
        p.stats.scalar_hazard_stalls += 1;
        p.ex_in = LanePair::splat(IssueSlot::BUBBLE);
        return false;
    }

    for (lane, v_in) in [("su", su.v_in), ("vu", vu.v_in)] {
        if vector_hazard(v_in, &p.df_in, &p.wb_in, &p.wb_out) {
            trace!(target: "rspsim::pipeline", lane, v_in, "rd vector hazard");
            p.stats.vector_hazard_stalls += 1;
            p.ex_in = LanePair::splat(IssueSlot::BUBBLE);
            return false;
        }
    }

    if su.r_out.is_some_and(|r| r > 0) {
        trace!(target: "rspsim::pipeline", reg = ?su.r_out, "rd lock");
    }
    p.locks.acquire_scalar(su.r_out);
    p.locks.acquire_vector(su.v_out);
    p.locks.acquire_vector(vu.v_out);

    p.ex_in.su = IssueSlot {
        pc: p.rd_in.su.pc,
        opcode: su.opcode,
        r_out: su.r_out,
        v_out: su.v_out,
        bubble: p.rd_in.su.bubble,
    };
    p.ex_in.vu = IssueSlot {
        pc: p.rd_in.vu.pc,
        opcode: vu.opcode,
        r_out: None,
        v_out: vu.v_out,
        bubble: p.rd_in.vu.bubble,
    };
    true
}
