//! Data and Structural Hazard Detection.
//!
//! This module implements the predicates the Read and Execute stages use to
//! decide whether the pipeline must stall. It provides:
//! 1. **Scalar Hazards:** A locked source register stalls unless every in-flight writer can bypass.
//! 2. **Vector Hazards:** A vector source stalls while any lane has it in flight.
//! 3. **Load/Store Interlock:** A store may not enter Execute right behind a retiring load.
//! 4. **Branch Outcome:** The fixed taken/not-taken table.

use crate::common::reg::{RegId, VRegMask};
use crate::core::pipeline::latches::{LanePair, RetireSlot, RetiredSlot};
use crate::core::pipeline::locks::RegisterLocks;
use crate::isa::opcode::Opcode;

/// Checks whether scalar source `r_in` must stall the Read stage.
///
/// The writers that can still be in flight for `r_in` are the scalar
/// entries entering Retire-prep (`df`) and Writeback (`wb`). The hazard is
/// suppressed only when each of them that targets `r_in` is bypass-eligible.
///
/// # Arguments
///
/// * `r_in` - Source register of the instruction being read.
/// * `locks` - Register lock counters.
/// * `df` - Scalar entry entering Retire-prep this cycle.
/// * `wb` - Scalar entry entering Writeback this cycle.
pub fn scalar_hazard(r_in: RegId, locks: &RegisterLocks, df: &RetireSlot, wb: &RetireSlot) -> bool {
    let Some(r) = r_in else {
        return false;
    };
    if r == 0 || !locks.is_locked(r) {
        return false;
    }

    let in_df = df.r_out == Some(r);
    let in_wb = wb.r_out == Some(r);
    let bypassed = match (in_df, in_wb) {
        (false, true) => wb.opcode.is_bypassable(),
        (true, false) => df.opcode.is_bypassable(),
        (true, true) => df.opcode.is_bypassable() && wb.opcode.is_bypassable(),
        (false, false) => false,
    };
    !bypassed
}

/// Checks whether vector sources `v_in` overlap any in-flight vector write.
///
/// Both lanes of Retire-prep, Writeback and the just-retired record are
/// consulted. Lock counters are not.
pub fn vector_hazard(
    v_in: VRegMask,
    df: &LanePair<RetireSlot>,
    wb: &LanePair<RetireSlot>,
    retired: &LanePair<RetiredSlot>,
) -> bool {
    if v_in == 0 {
        return false;
    }
    let in_flight = df.su.v_out
        | df.vu.v_out
        | wb.su.v_out
        | wb.vu.v_out
        | retired.su.v_out
        | retired.vu.v_out;
    v_in & in_flight != 0
}

/// Whether a store entering Execute collides with a load that just retired.
pub const fn load_store_interlock(retired: Opcode, issuing: Opcode) -> bool {
    retired.is_load() && issuing.is_store()
}

/// Fixed branch outcome, assuming the compared register is zero.
///
/// Unconditional jumps, and any non-branch opcode, report taken.
pub const fn branch_taken(opcode: Opcode) -> bool {
    !matches!(
        opcode,
        Opcode::Bne | Opcode::Bgtz | Opcode::Bltz | Opcode::Bltzal
    )
}
