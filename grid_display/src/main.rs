// main.rs - Viewer: run the banded simulation and paint the collected grid

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use egui::Color32;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use halo_life::{Cli, RunReport, simulation};

mod ui;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new().context("could not start the worker runtime")?;
    let mut app = GridApp::new(cli, runtime);
    app.run_simulation();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 950.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Banded Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

/// Viewer state: the arguments of the run, its last result and display colours.
pub struct GridApp {
    cli: Cli,
    runtime: tokio::runtime::Runtime,

    pub report: Option<RunReport>,
    pub last_error: Option<String>,
    pub live_color: Color32,
    pub dead_color: Color32,
}

impl GridApp {
    fn new(cli: Cli, runtime: tokio::runtime::Runtime) -> Self {
        Self {
            cli,
            runtime,
            report: None,
            last_error: None,
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
        }
    }

    /// Distributes a fresh starting grid, steps it and keeps the collected
    /// result. The collected grid is only displayed, never run again.
    pub fn run_simulation(&mut self) {
        let config = self.cli.simulation_config();
        let outcome = self.cli.initial_grid().and_then(|initial| {
            self.runtime.block_on(async {
                let report = simulation::run(&config, initial.clone()).await?;
                if self.cli.verify {
                    simulation::verify_against_reference(&initial, &report)?;
                }
                Ok::<_, halo_life::LifeError>(report)
            })
        });

        match outcome {
            Ok(report) => {
                info!(fingerprint = report.grid.fingerprint(), population = report.grid.population(), "run collected");
                self.report = Some(report);
                self.last_error = None;
            }
            Err(err) => {
                error!(%err, "run failed");
                self.report = None;
                self.last_error = Some(err.to_string());
            }
        }

        // Later runs draw a new seed unless a pattern is fixed.
        self.cli.seed = None;
    }
}
