mod logic;
mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use factionroll_game::{RollSource, SeededRolls, thread_rolls};
use logic::{evaluate_protection, load_roll_config, parse_instant, resolve_instant, run_rolls};
use reports::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Build faction pools and pick from them
    Roll,
    /// Evaluate the effective last game and welcome deferral
    Protection,
    /// Run both groups
    Both,
}

impl RunMode {
    const fn includes_rolls(self) -> bool {
        matches!(self, Self::Roll | Self::Both)
    }

    const fn includes_protection(self) -> bool {
        matches!(self, Self::Protection | Self::Both)
    }
}

#[derive(Debug, Parser)]
#[command(name = "factionroll", version = "0.1.0")]
#[command(about = "Roll factions and evaluate protection scheduling for a given instant")]
struct Args {
    /// Which helpers to run: roll, protection, or both
    #[arg(long, value_enum, default_value_t = RunMode::Both)]
    mode: RunMode,

    /// Reference instant (RFC 3339); defaults to the local clock
    #[arg(long)]
    at: Option<String>,

    /// Seed for reproducible rolls; omitted means OS entropy
    #[arg(long)]
    seed: Option<u64>,

    /// Number of pool build + pick rounds
    #[arg(long, default_value_t = 1)]
    rolls: usize,

    /// Path to a JSON roll config overriding the built-in tables
    #[arg(long)]
    config: Option<PathBuf>,

    /// Last recorded game session (RFC 3339)
    #[arg(long)]
    last_game_at: Option<String>,

    /// Day the welcome notice was last shown, e.g. "Wed Jan 03 2024"
    #[arg(long)]
    last_welcome: Option<String>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,

    /// Show the full pool for every round
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.report == "console" {
        announce_banner();
    }

    let report = build_report(&args)?;
    write_report(&args, &report)?;
    Ok(())
}

fn announce_banner() {
    println!("{}", "🎮 Factionroll".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn roll_source(seed: Option<u64>) -> Box<dyn RollSource> {
    match seed {
        Some(seed) => Box::new(SeededRolls::from_user_seed(seed)),
        None => Box::new(thread_rolls()),
    }
}

fn build_report(args: &Args) -> Result<RunReport> {
    let now = resolve_instant(args.at.as_deref())?;
    let mut report = RunReport::default();

    if args.mode.includes_rolls() {
        let cfg = load_roll_config(args.config.as_deref())?;
        let mut rng = roll_source(args.seed);
        report.rolls = Some(run_rolls(&cfg, &now, args.rolls, args.seed, rng.as_mut())?);
    }

    if args.mode.includes_protection() {
        let last_game_at = args
            .last_game_at
            .as_deref()
            .map(parse_instant)
            .transpose()
            .context("invalid --last-game-at")?;
        report.protection = Some(evaluate_protection(
            &now,
            last_game_at,
            args.last_welcome.as_deref(),
        ));
    }

    Ok(report)
}

fn write_report(args: &Args, report: &RunReport) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        _ => reports::generate_console_report(&mut output_target, report, args.verbose)?,
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
