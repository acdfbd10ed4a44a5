//! # Configuration Tests
//!
//! Defaults, partial JSON overrides, file loading and parse failures.

use std::io::Write;

use rspsim_core::common::constants::{DEFAULT_MAX_CYCLES, DEFAULT_WARMUP_CYCLES};
use rspsim_core::common::error::SimError;
use rspsim_core::config::*;
use rspsim_core::generator::Categories;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.general.trace);
    assert_eq!(config.pipeline.warmup_cycles, DEFAULT_WARMUP_CYCLES);
    assert_eq!(config.pipeline.max_cycles, DEFAULT_MAX_CYCLES);
    assert_eq!(config.generator.seed, 1);
    assert_eq!(config.generator.instruction_count, 16);
    assert_eq!(config.generator.categories, CategoryMode::Both);
}

#[test]
fn test_empty_object_is_default() {
    let config = Config::from_json_str("{}").unwrap();
    assert_eq!(config.pipeline.max_cycles, DEFAULT_MAX_CYCLES);
    assert_eq!(config.generator.seed, 1);
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = Config::from_json_str(
        r#"{ "generator": { "instruction_count": 40, "categories": "Vector" } }"#,
    )
    .unwrap();
    assert_eq!(config.generator.instruction_count, 40);
    assert_eq!(config.generator.seed, 1);
    assert_eq!(
        Categories::from(config.generator.categories),
        Categories::VECTOR
    );
    assert_eq!(config.pipeline.warmup_cycles, DEFAULT_WARMUP_CYCLES);
}

#[test]
fn test_category_modes_map_to_flags() {
    assert_eq!(Categories::from(CategoryMode::Scalar), Categories::SCALAR);
    assert_eq!(Categories::from(CategoryMode::Vector), Categories::VECTOR);
    assert_eq!(Categories::from(CategoryMode::Both), Categories::all());
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "general": {{ "trace": true }}, "pipeline": {{ "max_cycles": 64 }} }}"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert!(config.general.trace);
    assert_eq!(config.pipeline.max_cycles, 64);
    assert_eq!(config.pipeline.warmup_cycles, DEFAULT_WARMUP_CYCLES);
}

#[test]
fn test_bad_json_is_a_config_error() {
    let err = Config::from_json_str(r#"{ "pipeline": { "max_cycles": "many" } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));

    let err = Config::from_json_str(r#"{ "generator": { "categories": "scalar" } }"#).unwrap_err();
    assert!(matches!(err, SimError::Config(_)));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
