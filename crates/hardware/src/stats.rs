//! Pipeline statistics collection and reporting.
//!
//! This module tracks what the pipeline did during one run. It provides:
//! 1. **Cycles and retirement:** Steps taken and non-bubble instructions retired.
//! 2. **Issue:** Per-lane fetch issue counts and dual-issue cycles.
//! 3. **Stalls:** Scalar and vector hazard stalls, load/store interlocks, delay-slot bubbles.
//!
//! Counters are observational only and never feed back into timing.

use serde::Serialize;

/// Per-run pipeline counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Steps taken.
    pub cycles: u64,
    /// Cycles in which Fetch issued a scalar-lane instruction.
    pub scalar_issued: u64,
    /// Cycles in which Fetch issued a vector-lane instruction.
    pub vector_issued: u64,
    /// Cycles in which Fetch issued on both lanes.
    pub dual_issue_cycles: u64,
    /// Read stalls caused by a locked scalar source.
    pub scalar_hazard_stalls: u64,
    /// Read stalls caused by an in-flight vector write.
    pub vector_hazard_stalls: u64,
    /// Execute stalls caused by a store following a retiring load.
    pub load_store_interlocks: u64,
    /// Fetch cycles lost to a taken branch's delay slot.
    pub delay_slot_bubbles: u64,
    /// Non-bubble lane entries retired by Writeback.
    pub retired: u64,
}

/// Section names accepted by [`PipelineStats::render_sections`].
pub const STATS_SECTIONS: &[&str] = &["summary", "issue", "stalls"];

impl PipelineStats {
    /// Total cycles lost to any kind of stall.
    pub const fn stall_cycles(&self) -> u64 {
        self.scalar_hazard_stalls
            + self.vector_hazard_stalls
            + self.load_store_interlocks
            + self.delay_slot_bubbles
    }

    /// Renders the requested sections as text.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an
    /// empty slice renders everything.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;
        let mut out = Vec::new();

        out.push("==========================================================".to_string());
        out.push("PIPELINE STATISTICS".to_string());
        out.push("==========================================================".to_string());
        if want("summary") {
            out.push(format!("sim_cycles               {}", self.cycles));
            out.push(format!("sim_retired              {}", self.retired));
            out.push(format!(
                "sim_ipc                  {:.4}",
                self.retired as f64 / cyc
            ));
            out.push("----------------------------------------------------------".to_string());
        }
        if want("issue") {
            out.push("ISSUE".to_string());
            out.push(format!("  issue.scalar           {}", self.scalar_issued));
            out.push(format!("  issue.vector           {}", self.vector_issued));
            out.push(format!(
                "  issue.dual             {} ({:.2}%)",
                self.dual_issue_cycles,
                pct(self.dual_issue_cycles)
            ));
            out.push("----------------------------------------------------------".to_string());
        }
        if want("stalls") {
            out.push("STALLS".to_string());
            for (name, n) in [
                ("stalls.scalar_hazard ", self.scalar_hazard_stalls),
                ("stalls.vector_hazard ", self.vector_hazard_stalls),
                ("stalls.load_store    ", self.load_store_interlocks),
                ("stalls.delay_slot    ", self.delay_slot_bubbles),
            ] {
                out.push(format!("  {name}  {n} ({:.2}%)", pct(n)));
            }
            let total = self.stall_cycles();
            out.push(format!("  stalls.total           {total} ({:.2}%)", pct(total)));
        }
        out.push("==========================================================".to_string());
        out.join("\n")
    }

    /// Prints the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        println!("{}", self.render_sections(sections));
    }
}
