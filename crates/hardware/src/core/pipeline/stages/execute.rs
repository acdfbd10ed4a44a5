//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. No values are
//! computed; the stage resolves the load/store structural interlock and the
//! branch delay-slot state, then passes opcode and output metadata on to
//! Retire-prep.

use tracing::trace;

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::hazards::{branch_taken, load_store_interlock};
use crate::core::pipeline::latches::{LanePair, RetireSlot};

/// Executes the execute stage.
///
/// Returns `false` on a load/store interlock: the entries flowing to
/// Retire-prep are cleared, the RD/EX latch is held, and neither Read nor
/// Fetch runs this cycle.
pub fn execute_stage(p: &mut Pipeline<'_>) -> bool {
    let su = p.ex_in.su;
    let vu = p.ex_in.vu;

    if load_store_interlock(p.wb_out.su.opcode, su.opcode) {
        trace!(target: "rspsim::pipeline", pc = su.pc, "ex load/store interlock");
        p.stats.load_store_interlocks += 1;
        p.df_in = LanePair::splat(RetireSlot::BUBBLE);
        return false;
    }

    if su.opcode.is_branch() && branch_taken(su.opcode) {
        trace!(target: "rspsim::pipeline", pc = su.pc, op = %su.opcode, "ex enter delay slot");
        p.delay_slot = true;
    } else if p.delay_slot && (!su.bubble || !vu.bubble) {
        trace!(
            target: "rspsim::pipeline",
            lane = if su.bubble { "vu" } else { "su" },
            "ex leave delay slot"
        );
        p.delay_slot = false;
    }

    p.df_in.su = RetireSlot::from(su);
    p.df_in.vu = RetireSlot::from(vu);
    true
}
