//! Configuration system for the pipeline timing model.
//!
//! This module defines all configuration structures and enums used to parameterize
//! a run. It provides:
//! 1. **Defaults:** Baseline run-loop and generator constants.
//! 2. **Structures:** Hierarchical config for general, pipeline, and generator settings.
//! 3. **Enums:** Instruction category selection for the generator.
//!
//! Configuration is supplied as JSON (`Config::from_json_str`, `Config::from_file`)
//! or use `Config::default()` for the canonical setup.

use std::path::Path;

use serde::Deserialize;

use crate::common::constants::{DEFAULT_MAX_CYCLES, DEFAULT_WARMUP_CYCLES};
use crate::common::error::SimError;

/// Default configuration constants.
mod defaults {
    /// Generator seed. Zero is a fixed point of xorshift32, so the seed is
    /// never allowed to be zero.
    pub const SEED: u32 = 1;

    /// Instructions generated into the measured window.
    pub const INSTRUCTION_COUNT: usize = 16;
}

/// Which instruction categories the generator may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum CategoryMode {
    /// Scalar-unit instructions only.
    Scalar,
    /// Vector arithmetic only.
    Vector,
    /// Both scalar and vector instructions.
    #[default]
    Both,
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rspsim_core::config::{CategoryMode, Config};
///
/// let json = r#"{
///     "general": { "trace": true },
///     "pipeline": { "max_cycles": 500 },
///     "generator": { "seed": 42, "categories": "Scalar" }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.pipeline.max_cycles, 500);
/// assert_eq!(config.pipeline.warmup_cycles, 5);
/// assert_eq!(config.generator.seed, 42);
/// assert_eq!(config.generator.categories, CategoryMode::Scalar);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,
    /// Run-loop settings
    pub pipeline: PipelineConfig,
    /// Random program generator settings
    pub generator: GeneratorConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// General settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeneralConfig {
    /// Enable per-stage pipeline tracing
    #[serde(default)]
    pub trace: bool,
}

/// Run-loop settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Fill/drain cycles subtracted from the raw step count
    #[serde(default = "PipelineConfig::default_warmup_cycles")]
    pub warmup_cycles: u64,

    /// Iteration safety cap
    #[serde(default = "PipelineConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl PipelineConfig {
    fn default_warmup_cycles() -> u64 {
        DEFAULT_WARMUP_CYCLES
    }

    fn default_max_cycles() -> u64 {
        DEFAULT_MAX_CYCLES
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            warmup_cycles: DEFAULT_WARMUP_CYCLES,
            max_cycles: DEFAULT_MAX_CYCLES,
        }
    }
}

/// Random program generator settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// RNG seed (0 is treated as 1)
    #[serde(default = "GeneratorConfig::default_seed")]
    pub seed: u32,

    /// Instructions in the measured window
    #[serde(default = "GeneratorConfig::default_instruction_count")]
    pub instruction_count: usize,

    /// Categories to draw from
    #[serde(default)]
    pub categories: CategoryMode,
}

impl GeneratorConfig {
    fn default_seed() -> u32 {
        defaults::SEED
    }

    fn default_instruction_count() -> usize {
        defaults::INSTRUCTION_COUNT
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: defaults::SEED,
            instruction_count: defaults::INSTRUCTION_COUNT,
            categories: CategoryMode::Both,
        }
    }
}
