// main.rs - Console front end: run the banded simulation and print the result

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use halo_life::{Cli, render, simulation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the grid on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.simulation_config();
    let initial = cli.initial_grid().context("could not set up the run")?;
    info!(
        workers = config.workers,
        band_rows = config.band_rows(),
        iterations = config.iterations,
        "starting"
    );

    let report = simulation::run(&config, initial.clone()).await.context("simulation aborted")?;
    if cli.verify {
        simulation::verify_against_reference(&initial, &report)?;
    }

    println!("Final grid:");
    print!("{}", render::render(&report.grid));
    print!("{}", render::summary(&report));
    Ok(())
}
