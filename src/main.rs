//! bga-fanout: automatic escape routing for BGA footprints
//!
//! Reads a board file, fans out one footprint and writes the result back.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use bga_fanout::board::Board;
use bga_fanout::config::{self, FanoutConfig};
use bga_fanout::fanout::{BgaFanout, FanoutReport, SkipReason};

/// Automatic escape routing for BGA footprints.
///
/// Adds a short track and a via to every electrical pad of the footprint,
/// using the alignment and geometry from the configuration file unless
/// overridden on the command line.
#[derive(Parser, Debug)]
#[command(name = "bga-fanout")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Board file to fan out
    #[arg(short, long, value_name = "BOARD_FILE")]
    board: PathBuf,

    /// Reference designator of the footprint (e.g. U1)
    #[arg(short, long)]
    reference: String,

    /// Alignment: Quadrant, Diagonal or X-pattern
    #[arg(short, long)]
    alignment: Option<String>,

    /// Direction: a corner for Diagonal, a sweep for X-pattern
    #[arg(short, long)]
    direction: Option<String>,

    /// Write the result here instead of overwriting the board file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compute the fanout but do not write anything
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Determines the log level from CLI arguments.
#[allow(clippy::match_same_arms)] // Explicit "warn" arm for clarity
fn get_log_level(verbose: u8, quiet: bool, config_level: &str) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => match config_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::WARN, // Default to warn for unknown levels
        },
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber for logging.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Applies command-line overrides on top of the configured fanout settings.
fn fanout_settings(base: &FanoutConfig, args: &Args) -> FanoutConfig {
    let mut settings = base.clone();
    if let Some(alignment) = &args.alignment {
        settings.alignment.clone_from(alignment);
        // A direction from the file belongs to the file's alignment.
        settings.direction = None;
    }
    if let Some(direction) = &args.direction {
        settings.direction = Some(direction.clone());
    }
    settings
}

/// One-line summary of a fanout call.
fn describe(reference: &str, report: &FanoutReport) -> String {
    match report.skipped {
        Some(SkipReason::NoPitch(failure)) => {
            format!("{reference}: skipped, no pitch ({failure})")
        }
        Some(SkipReason::NotImplemented(alignment)) => {
            format!("{reference}: skipped, {alignment} is not available at this rotation")
        }
        None => format!(
            "{reference}: {} tracks, {} vias ({} pads without track)",
            report.tracks, report.vias, report.zero_length
        ),
    }
}

/// Entry point for the bga-fanout tool.
fn main() -> ExitCode {
    let args = Args::parse();

    // Load configuration
    let config_path = args.config.as_deref();
    let cfg = match config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialise logging
    let log_level = get_log_level(args.verbose, args.quiet, &cfg.logging.level);
    init_tracing(log_level);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting bga-fanout");

    let settings = fanout_settings(&cfg.fanout, &args);
    if let Err(e) = settings.validate() {
        eprintln!("Configuration error: {e}");
        return ExitCode::FAILURE;
    }
    let plan = settings.to_plan();

    let mut board = match Board::read(&args.board) {
        Ok(board) => board,
        Err(e) => {
            error!(error = %e, "Failed to read board");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = BgaFanout::new(&mut board, &args.reference, plan)
        .and_then(|mut fanout| {
            if let Some(pitch) = fanout.pitch() {
                info!(pitch = %pitch, bucket = ?fanout.bucket(), "Footprint analysed");
            }
            fanout.fanout(&mut board)
        });
    let report = match report {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, "Fanout failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", describe(&args.reference, &report));

    if args.dry_run || report.skipped.is_some() {
        return ExitCode::SUCCESS;
    }

    let output = args.output.as_ref().unwrap_or(&args.board);
    match board.write(output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Failed to write board");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
