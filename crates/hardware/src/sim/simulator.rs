//! Simulator: drives the pipeline over a measured window.
//!
//! The pipeline itself only knows how to step. The simulator owns the run
//! loop around it: window validation, the iteration safety cap, and turning
//! a raw step count into a cycle estimate by removing fill/drain cycles.

use serde::Serialize;
use tracing::{debug, warn};

use crate::common::constants::{IMEM_SIZE, INSTRUCTION_SIZE};
use crate::common::error::SimError;
use crate::config::{Config, PipelineConfig};
use crate::core::imem::InstructionMemory;
use crate::core::pipeline::Pipeline;
use crate::generator::{Categories, GeneratedProgram, Generator};
use crate::stats::PipelineStats;

/// Outcome of one timed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Steps taken until the terminator retired.
    pub raw_cycles: u64,
    /// `raw_cycles` minus the configured fill/drain cycles.
    pub estimate: u64,
    /// Pipeline counters for the run.
    pub stats: PipelineStats,
}

/// Top-level run driver.
#[derive(Clone, Debug, Default)]
pub struct Simulator {
    /// Run-loop settings.
    pub pipeline: PipelineConfig,
}

impl Simulator {
    /// Creates a simulator from a configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            pipeline: config.pipeline.clone(),
        }
    }

    /// Estimates the cycle count of `code[start..end]` (byte addresses).
    ///
    /// # Errors
    ///
    /// - `WindowOutOfRange` if the window is misaligned, reversed, or extends
    ///   past the image or the instruction memory.
    /// - `CycleCapExceeded` if the terminator never retires.
    pub fn estimate(&self, code: &[u32], start: u32, end: u32) -> Result<RunReport, SimError> {
        validate_window(code, start, end)?;
        let mut pipeline = Pipeline::new(InstructionMemory::new(code, start, end));

        let cap = self.pipeline.max_cycles;
        let mut cycles = 0;
        while !pipeline.broken && cycles < cap {
            pipeline.step();
            cycles += 1;
        }
        if !pipeline.broken {
            warn!(cap, start, end, "cycle cap reached without retiring the terminator");
            return Err(SimError::CycleCapExceeded { cap });
        }

        let estimate = cycles.saturating_sub(self.pipeline.warmup_cycles);
        debug!(raw_cycles = cycles, estimate, "run complete");
        Ok(RunReport {
            raw_cycles: cycles,
            estimate,
            stats: pipeline.stats,
        })
    }

    /// Estimates the whole image.
    pub fn estimate_image(&self, code: &[u32]) -> Result<RunReport, SimError> {
        let end = u32::try_from(code.len() * INSTRUCTION_SIZE as usize).unwrap_or(u32::MAX);
        self.estimate(code, 0, end)
    }

    /// Generates a program into `code` and estimates its measured window.
    pub fn generate_and_estimate(
        &self,
        generator: &mut Generator,
        code: &mut Vec<u32>,
        instruction_count: usize,
        categories: Categories,
    ) -> Result<(GeneratedProgram, RunReport), SimError> {
        let program = generator.generate(code, instruction_count, categories);
        let report = self.estimate(code, program.window_start, program.window_end)?;
        Ok((program, report))
    }
}

fn validate_window(code: &[u32], start: u32, end: u32) -> Result<(), SimError> {
    let image_end = code.len() as u64 * u64::from(INSTRUCTION_SIZE);
    let aligned = start % INSTRUCTION_SIZE == 0 && end % INSTRUCTION_SIZE == 0;
    if !aligned || start > end || u64::from(end) > image_end || end > IMEM_SIZE {
        return Err(SimError::WindowOutOfRange {
            start,
            end,
            len: code.len() * INSTRUCTION_SIZE as usize,
        });
    }
    Ok(())
}
