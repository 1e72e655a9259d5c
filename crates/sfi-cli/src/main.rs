//! SFI command-line interface.
//!
//! Encodes shipment attributes as products of primes, generates and stores
//! synthetic datasets, and filters them with a single divisibility test.
//!
//! # Quick Start
//!
//! ```bash
//! # Show the attribute-to-prime assignment
//! sfi primes
//!
//! # Generate 1000 shipments into ./shipments.json
//! sfi generate --count 1000
//!
//! # Find every overnight shipment out of Chicago
//! sfi filter --criteria '{"origin": "Chicago", "priority": "Overnight"}'
//! ```

mod commands;
mod context;
mod input;
mod style;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::context::AppContext;

/// SFI - filter shipments with one divisibility check.
#[derive(Parser)]
#[command(name = "sfi")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Project directory holding sfi.toml and the dataset.
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    /// Emit machine-readable JSON on stdout.
    #[arg(long, global = true)]
    json: bool,

    /// Fail on unknown attributes and unrecognized factors instead of warning.
    #[arg(long, global = true)]
    strict: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information.
    Version,

    /// Show the attribute-to-prime assignment.
    Primes,

    /// Generate a random shipment dataset and store it.
    Generate {
        /// Number of records (defaults to generator.default_count).
        #[arg(short, long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// RNG seed for a reproducible dataset.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Filter the stored dataset by attribute criteria.
    Filter {
        /// JSON object of group to value, e.g. '{"origin": "Chicago"}'.
        #[arg(long)]
        criteria: String,
    },

    /// Decode a vector back into its attributes.
    Decode {
        /// Decimal SFI vector.
        #[arg(short, long, allow_hyphen_values = true)]
        vector: String,
    },

    /// Encode attributes into a vector.
    Encode {
        /// JSON object of group to value.
        #[arg(short, long)]
        attributes: String,
    },

    /// Configuration commands.
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the merged configuration.
    Show {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ConfigFormat::Text)]
        format: ConfigFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ConfigFormat {
    Text,
    Json,
    Toml,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    style::set_no_color(cli.no_color || std::env::var_os("NO_COLOR").is_some());
    let json = cli.json;

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            commands::report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Version = cli.command {
        init_tracing("warn");
        commands::version::run(cli.json);
        return Ok(());
    }

    let ctx = AppContext::load(&cli.project, cli.json, cli.strict)?;
    init_tracing(&ctx.config.logging.filter);

    match cli.command {
        Commands::Version => Ok(()),
        Commands::Primes => commands::primes::run(&ctx),
        Commands::Generate { count, seed } => commands::generate::run(&ctx, count, seed),
        Commands::Filter { criteria } => commands::filter::run(&ctx, &criteria),
        Commands::Decode { vector } => commands::decode::run(&ctx, &vector),
        Commands::Encode { attributes } => commands::encode::run(&ctx, &attributes),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show { format } => commands::config::show(&ctx, format),
        },
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
/// `RUST_LOG` wins over the configured filter.
fn init_tracing(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
