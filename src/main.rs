use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use cobertura_merge::cli::{self, Style};

/// cobertura-merge — Combine sharded Cobertura coverage reports into one.
#[derive(Parser)]
#[command(name = "cobertura-merge", version, about)]
struct Cli {
    /// Path the merged report is written to.
    output: PathBuf,

    /// Cobertura reports to merge, in order.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Print totals for the merged report.
    #[arg(long, value_enum)]
    summary: Option<Style>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let out = cli::cmd_merge(&cli.output, &cli.inputs, cli.summary)?;
    print!("{}", out);
    Ok(())
}
