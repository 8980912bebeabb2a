use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phasefold::manager::Manager;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[arg(long)]
    run_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write synthetic observations from the signal config.
    Generate,

    /// Compute the dispersion at every configured period.
    Fold,

    /// Remove the computed dispersion.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.run_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Generate => mgr.generate_observations()?,
        Command::Fold => mgr.fold_observations()?,
        Command::Clean => mgr.clean_run()?,
    }

    Ok(())
}
