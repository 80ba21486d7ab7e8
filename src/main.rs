// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Cobidder CLI - co-bidding graphs from auction bid tables

use anyhow::Result;
use clap::{Parser, Subcommand};
use cobidder::builder::BuildOptions;
use cobidder::commands;
use cobidder::commands::build::EmitFormat;
use cobidder::config;
use cobidder::ingest::InputFormat;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cobidder")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(short, long, env = "COBIDDER_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Input options shared by every graph-building command
#[derive(clap::Args)]
struct InputArgs {
    /// Bid table (CSV or JSON)
    input: PathBuf,

    /// Input format (csv, json); guessed from the extension if omitted
    #[arg(short, long)]
    format: Option<InputFormat>,

    /// Bids at or above this percentage are ignored
    #[arg(short, long)]
    threshold: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the co-bidder graph and write it out
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Output format (json, csv)
        #[arg(short, long, default_value = "json")]
        emit: EmitFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the co-bidders of a company
    Partners {
        #[command(flatten)]
        input: InputArgs,

        /// Company to look up
        company: String,
    },

    /// Show the strongest co-bidding pairs
    Top {
        #[command(flatten)]
        input: InputArgs,

        /// Number of pairs to show (at least 1)
        #[arg(
            short = 'n',
            long,
            default_value_t = 10,
            value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
        )]
        limit: usize,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => config.log_level.parse().unwrap_or(tracing::Level::INFO),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // RUST_LOG, when set, takes precedence over the flags and config
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(log_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Build { input, emit, output } => {
            let options = build_options(&config.build, &input)?;
            commands::build::run(&input.input, input.format, emit, output, &options)
        }
        Commands::Partners { input, company } => {
            let options = build_options(&config.build, &input)?;
            commands::partners::run(&input.input, input.format, &company, &options)
        }
        Commands::Top { input, limit } => {
            let options = build_options(&config.build, &input)?;
            commands::top::run(&input.input, input.format, limit, &options)
        }
        Commands::Config => commands::config::run(&config),
    }
}

/// Apply command-line overrides on top of the configured options
fn build_options(base: &BuildOptions, input: &InputArgs) -> Result<BuildOptions> {
    let mut options = base.clone();
    if let Some(threshold) = input.threshold {
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            anyhow::bail!("--threshold must be within 0..=100, got {}", threshold);
        }
        options.threshold = threshold;
    }
    Ok(options)
}
