//! RSP pipeline timing model CLI.
//!
//! This binary provides a single entry point for the timing model. It performs:
//! 1. **Generate:** Build a random timing program, print its listing and cycle estimate.
//! 2. **Disassemble:** Turn hex instruction words into text.
//! 3. **Time:** Load a big-endian raw image and estimate a window of it.

use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::process;

use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use rspsim_core::common::error::SimError;
use rspsim_core::config::{CategoryMode, Config};
use rspsim_core::generator::{Categories, Generator, listing};
use rspsim_core::isa::disasm::disassemble;
use rspsim_core::sim::{RunReport, loader};
use rspsim_core::stats::STATS_SECTIONS;
use rspsim_core::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "rspsim",
    author,
    version,
    about = "Dual-issue scalar + vector pipeline timing model",
    long_about = "Estimate the cycle cost of straight-line instruction windows on a five-stage, two-lane pipeline.\n\nExamples:\n  rspsim gen --seed 7 --count 32 --categories vector\n  rspsim disasm 24080001 0000000D\n  rspsim time ucode.bin --start 0x18 --end 0x58"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print the report as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a random program and estimate its measured window.
    Gen {
        /// RNG seed (defaults to the configured seed).
        #[arg(long)]
        seed: Option<u32>,

        /// Instructions in the measured window.
        #[arg(long)]
        count: Option<usize>,

        /// Instruction categories to draw from.
        #[arg(long, value_enum)]
        categories: Option<CategoryArg>,

        /// Also print the pipeline statistics.
        #[arg(long)]
        stats: bool,

        /// Statistics sections to print (comma separated; all by default).
        #[arg(long, value_delimiter = ',', requires = "stats", value_parser = sections_parser())]
        sections: Vec<String>,
    },

    /// Disassemble hex instruction words.
    Disasm {
        /// Words in hex, with or without a `0x` prefix.
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Estimate a window of a raw big-endian image.
    Time {
        /// Image path.
        file: PathBuf,

        /// First byte address of the window (defaults to 0).
        #[arg(long, value_parser = parse_addr)]
        start: Option<u32>,

        /// Byte address one past the window (defaults to the image size).
        #[arg(long, value_parser = parse_addr)]
        end: Option<u32>,

        /// Also print the pipeline statistics.
        #[arg(long)]
        stats: bool,

        /// Statistics sections to print (comma separated; all by default).
        #[arg(long, value_delimiter = ',', requires = "stats", value_parser = sections_parser())]
        sections: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CategoryArg {
    Scalar,
    Vector,
    Both,
}

impl From<CategoryArg> for CategoryMode {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Scalar => Self::Scalar,
            CategoryArg::Vector => Self::Vector,
            CategoryArg::Both => Self::Both,
        }
    }
}

/// Failures reported by the command line front end.
#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Sim(#[from] SimError),

    #[error("{}: {source}", path.display())]
    Image { path: PathBuf, source: SimError },

    #[error("invalid word '{text}': {source}")]
    Word { text: String, source: ParseIntError },

    #[error("cannot encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    init_tracing(cli.verbose, config.general.trace);

    match cli.command {
        Commands::Gen {
            seed,
            count,
            categories,
            stats,
            sections,
        } => cmd_gen(
            &config,
            seed,
            count,
            categories,
            stats.then_some(sections).as_deref(),
            cli.json,
        ),
        Commands::Disasm { words } => cmd_disasm(&words),
        Commands::Time {
            file,
            start,
            end,
            stats,
            sections,
        } => cmd_time(
            &config,
            &file,
            start,
            end,
            stats.then_some(sections).as_deref(),
            cli.json,
        ),
    }
}

fn sections_parser() -> PossibleValuesParser {
    PossibleValuesParser::new(STATS_SECTIONS.iter().copied())
}

fn load_config(path: Option<&Path>) -> Result<Config, SimError> {
    path.map_or_else(|| Ok(Config::default()), Config::from_file)
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v` and the config trace flag.
fn init_tracing(verbose: u8, trace: bool) {
    let level = match (verbose, trace) {
        (_, true) | (2.., _) => "trace",
        (1, _) => "debug",
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_gen(
    config: &Config,
    seed: Option<u32>,
    count: Option<usize>,
    categories: Option<CategoryArg>,
    stats: Option<&[String]>,
    json: bool,
) -> Result<(), CliError> {
    let seed = seed.unwrap_or(config.generator.seed);
    let count = count.unwrap_or(config.generator.instruction_count);
    let mode = categories.map_or(config.generator.categories, CategoryMode::from);
    debug!(seed, count, ?mode, "generating");

    let sim = Simulator::new(config);
    let mut generator = Generator::new(seed);
    let mut code = Vec::new();
    let (program, report) = sim
        .generate_and_estimate(&mut generator, &mut code, count, Categories::from(mode))?;

    if json {
        let value = serde_json::json!({
            "seed": seed,
            "program": program,
            "report": report,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "seed {seed}: {} words, window {:#05X}..{:#05X}",
        program.emitted, program.window_start, program.window_end
    );
    for line in listing(&code, program.window_start, program.window_end) {
        println!("{line}");
    }
    print_report(&report, stats);
    Ok(())
}

fn cmd_disasm(words: &[String]) -> Result<(), CliError> {
    for (i, text) in words.iter().enumerate() {
        let word = parse_hex(text)?;
        let pc = u32::try_from(i * 4).unwrap_or(u32::MAX);
        println!("{word:08X}  {}", disassemble(word, pc));
    }
    Ok(())
}

fn cmd_time(
    config: &Config,
    file: &Path,
    start: Option<u32>,
    end: Option<u32>,
    stats: Option<&[String]>,
    json: bool,
) -> Result<(), CliError> {
    let code = loader::load_image(file).map_err(|source| CliError::Image {
        path: file.to_path_buf(),
        source,
    })?;
    let sim = Simulator::new(config);
    let report = match (start, end) {
        (None, None) => sim.estimate_image(&code),
        (start, end) => {
            let image_end = u32::try_from(code.len() * 4).unwrap_or(u32::MAX);
            sim.estimate(&code, start.unwrap_or(0), end.unwrap_or(image_end))
        }
    }?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    print_report(&report, stats);
    Ok(())
}

/// Prints the estimate, then the requested statistics sections if any
/// (an empty list prints them all).
fn print_report(report: &RunReport, stats: Option<&[String]>) {
    println!(
        "estimate: {} cycles ({} raw)",
        report.estimate, report.raw_cycles
    );
    if let Some(sections) = stats {
        report.stats.print_sections(sections);
    }
}

fn parse_hex(text: &str) -> Result<u32, CliError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 16).map_err(|source| CliError::Word {
        text: text.to_string(),
        source,
    })
}

/// Byte address: hex with a `0x` prefix, decimal otherwise.
fn parse_addr(text: &str) -> Result<u32, String> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u32::from_str_radix(digits, 16),
        None => text.parse(),
    }
    .map_err(|e| format!("invalid address '{text}': {e}"))
}
