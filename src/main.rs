//! Thin CLI driver over the `qrlp` library: reads one JSON config file, loads the
//! catalog data file it points to, solves, and prints the report — matching
//! `linear_solver.py`'s `-c/--config`/`-o/--output` contract rather than
//! `factorio_solver.py`'s fuller flag surface.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;
use qrlp::{build_and_solve, Catalog, Config};

/// Optimizes prod/qual ratios in factories to minimize the inputs needed for a given
/// output.
#[derive(Parser, Debug)]
#[command(name = "qrlp", about = "Quality-aware Recipe Linear Program solver")]
struct Cli {
    /// Config file describing module choices, allow/deny lists, and the declared
    /// supplies and demands.
    #[arg(short, long)]
    config: PathBuf,

    /// Optional CSV output file for the solved activities.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    match run(&Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config_text = fs::read_to_string(&cli.config)
        .with_context(|| format!("reading config file {}", cli.config.display()))?;
    let config: Config = serde_json::from_str(&config_text)
        .with_context(|| format!("parsing config file {}", cli.config.display()))?;

    let config_dir = cli.config.parent().unwrap_or_else(|| Path::new("."));
    let data_path = config_dir.join(&config.data);
    let catalog_text = fs::read_to_string(&data_path)
        .with_context(|| format!("reading catalog data file {}", data_path.display()))?;
    let catalog = Catalog::from_json(&catalog_text, config.max_tier_unlocked()?)
        .context("normalizing catalog data")?;

    let report = build_and_solve(&catalog, &config)?;
    println!("{}", report.render());

    if let Some(output) = &cli.output {
        fs::write(output, report.to_csv())
            .with_context(|| format!("writing output file {}", output.display()))?;
        println!("Wrote output to: {}", output.display());
    }

    Ok(())
}
