//! Retire-prep (DF) Stage.
//!
//! A pure pass-through that gives the pipeline its fixed depth between
//! Execute and Writeback.

use crate::core::pipeline::Pipeline;

/// Moves the EX/DF latch into the DF/WB latch.
pub fn retire_prep_stage(p: &mut Pipeline<'_>) {
    p.wb_in = p.df_in;
}
