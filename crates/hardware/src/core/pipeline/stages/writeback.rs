//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the pipeline. It releases the
//! register locks taken in Read, detects retirement of the terminator, and
//! publishes the retired vector writes for one more cycle of hazard
//! visibility.

use tracing::trace;

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::latches::RetiredSlot;
use crate::isa::opcode::Opcode;

/// Executes the writeback stage.
///
/// # Behavior
///
/// - Releases the scalar lock of the scalar lane's destination.
/// - Releases vector locks for both lanes' vector writes.
/// - Sets `broken` when the scalar lane retires `BREAK`.
/// - Copies opcode and vector writes into the just-retired record.
pub fn writeback_stage(p: &mut Pipeline<'_>) {
    let su = p.wb_in.su;
    let vu = p.wb_in.vu;

    if su.r_out.is_some_and(|r| r > 0) {
        trace!(target: "rspsim::pipeline", reg = ?su.r_out, "wb unlock");
    }
    p.locks.release_scalar(su.r_out);
    p.locks.release_vector(su.v_out);
    p.locks.release_vector(vu.v_out);

    if su.opcode == Opcode::Break {
        trace!(target: "rspsim::pipeline", "wb terminator retired");
        p.broken = true;
    }

    p.stats.retired += u64::from(!su.bubble) + u64::from(!vu.bubble);

    p.wb_out.su = RetiredSlot::from(su);
    p.wb_out.vu = RetiredSlot::from(vu);
}
