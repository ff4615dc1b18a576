//! Tessel CLI: converts elaborated netlists to structural VHDL.
//!
//! `tessel generate` lowers a design file to VHDL; `tessel check` only runs
//! the structural validation. Exit status is 0 on success, 1 when any
//! error diagnostic was emitted, and 2 on fatal errors.

#![warn(missing_docs)]

mod check;
mod generate;
mod report;

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Tessel: netlist to VHDL converter.
#[derive(Parser, Debug)]
#[command(name = "tessel", version, about = "Netlist to VHDL converter")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate VHDL from a design file.
    Generate(GenerateArgs),
    /// Validate a design file without generating anything.
    Check(CheckArgs),
}

/// Arguments for the `tessel generate` subcommand.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Design file (JSON) to convert.
    pub design: PathBuf,

    /// Output VHDL file. Writes to stdout if omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to a `tessel.toml`. Defaults to the one next to the design file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Generate modules on all cores. Overrides `codegen.parallel`.
    #[arg(short = 'j', long)]
    pub parallel: bool,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `tessel check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Design file (JSON) to validate.
    pub design: PathBuf,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// `--color` setting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr looks like a terminal and `NO_COLOR` is unset.
    Auto,
    /// Always color.
    Always,
    /// Never color.
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::env::var_os("TERM").is_some()
            }
        }
    }
}

/// How diagnostics are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// One line per diagnostic.
    Text,
    /// A JSON array on stderr.
    Json,
}

/// Flags shared by every subcommand.
pub struct GlobalArgs {
    /// Print errors only.
    pub quiet: bool,
    /// Print debug logs and diagnostic footnotes.
    pub verbose: bool,
    /// Use ANSI colors.
    pub color: bool,
}

impl GlobalArgs {
    fn log_level(&self) -> log::LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => log::LevelFilter::Error,
            (false, true) => log::LevelFilter::Debug,
            (false, false) => log::LevelFilter::Warn,
        }
    }
}

impl Cli {
    fn global(&self) -> GlobalArgs {
        GlobalArgs {
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color.enabled(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let global = cli.global();
    init_logging(&global);

    match run(&cli.command, &global) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}

fn run(command: &Command, global: &GlobalArgs) -> Result<i32, Box<dyn Error>> {
    match command {
        Command::Generate(args) => generate::run(args, global),
        Command::Check(args) => check::run(args, global),
    }
}

/// Installs the logger. `RUST_LOG` overrides the level chosen by `-q`/`-v`.
fn init_logging(global: &GlobalArgs) {
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(global.log_level());
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
}
