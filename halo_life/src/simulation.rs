// simulation.rs - Distribute, step in lock-step, collect
//
// The coordinator splits the grid into one band per worker, spawns a tokio
// task for each band and waits for the bands to come back. Workers only talk
// to each other through their halo links and a shared step barrier.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Barrier, mpsc};
use tokio::task::AbortHandle;
use tracing::{Instrument, debug, info, info_span, trace};

use crate::error::{LifeError, Phase, Result};
use crate::grid::{Band, GlobalGrid};
use crate::halo::{self, HaloLink};
use crate::stencil;

/// Fixed parameters of one run. Worker count comes from the environment the
/// run is launched in, not from the grid itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub width: usize,
    pub height: usize,
    pub workers: usize,
    pub iterations: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::config(format!("grid must not be empty, got {}x{}", self.width, self.height)));
        }
        if self.workers == 0 {
            return Err(LifeError::config("worker count must be at least 1"));
        }
        if self.height % self.workers != 0 {
            return Err(LifeError::config(format!(
                "height {} is not divisible by {} workers",
                self.height, self.workers
            )));
        }
        if self.iterations == 0 {
            return Err(LifeError::config("iteration count must be a positive integer"));
        }
        Ok(())
    }

    pub fn band_rows(&self) -> usize {
        self.height / self.workers
    }
}

/// What the coordinator hands to reporting once the run is done.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub grid: GlobalGrid,
    pub workers: usize,
    pub generations: u64,
    /// Wall-clock time of the stepping phase, slowest worker.
    pub elapsed: Duration,
}

#[derive(Debug)]
struct WorkerOutcome {
    cells: Vec<bool>,
    elapsed: Duration,
}

/// Runs `config.iterations` generations of `initial` across
/// `config.workers` bands and returns the collected grid.
pub async fn run(config: &SimulationConfig, initial: GlobalGrid) -> Result<RunReport> {
    debug!(phase = %Phase::Uninitialized, ?config, "validating configuration");
    config.validate()?;
    if (initial.width(), initial.height()) != (config.width, config.height) {
        return Err(LifeError::config(format!(
            "initial grid is {}x{}, configured for {}x{}",
            initial.width(),
            initial.height(),
            config.width,
            config.height
        )));
    }

    let workers = config.workers;
    info!(phase = %Phase::Distributing, workers, width = config.width, height = config.height, "distributing bands");
    let bands = initial.split_into_bands(workers)?;
    let (bands, elapsed) = step_bands(config.width, config.iterations, bands).await?;

    info!(phase = %Phase::Collecting, "collecting bands");
    let grid = GlobalGrid::assemble(config.width, bands)?;

    info!(phase = %Phase::Done, generations = config.iterations, elapsed = ?elapsed, population = grid.population(), "run complete");
    Ok(RunReport { grid, workers, generations: config.iterations, elapsed })
}

/// Spawns one worker per delivered band and waits for every band to come
/// back in ordinal order. The first failure aborts all remaining workers.
async fn step_bands(width: usize, iterations: u64, bands: Vec<Vec<bool>>) -> Result<(Vec<Vec<bool>>, Duration)> {
    let workers = bands.len();
    let links = halo::wire(workers, width);
    let barrier = Arc::new(Barrier::new(workers));

    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut aborts: Vec<AbortHandle> = Vec::with_capacity(workers);
    for (ordinal, (cells, link)) in bands.into_iter().zip(links).enumerate() {
        let task = worker(ordinal, width, cells, link, barrier.clone(), iterations)
            .instrument(info_span!("worker", ordinal));
        let handle = tokio::spawn(task);
        aborts.push(handle.abort_handle());

        let done = done_tx.clone();
        tokio::spawn(async move {
            let _ = done.send((ordinal, handle.await));
        });
    }
    drop(done_tx);

    let stepping = Phase::Stepping { generation: 0 };
    info!(phase = %stepping, iterations, "stepping");
    let mut collected: Vec<Option<Vec<bool>>> = vec![None; workers];
    let mut elapsed = Duration::ZERO;
    while let Some((ordinal, joined)) = done_rx.recv().await {
        let failure = match joined {
            Ok(Ok(outcome)) => {
                debug!(worker = ordinal, elapsed = ?outcome.elapsed, "band returned");
                elapsed = elapsed.max(outcome.elapsed);
                collected[ordinal] = Some(outcome.cells);
                continue;
            }
            Ok(Err(err)) => err,
            Err(join_err) => LifeError::WorkerFailed { worker: ordinal, reason: join_err.to_string() },
        };
        // Peers would wait at the barrier forever.
        for abort in &aborts {
            abort.abort();
        }
        return Err(failure);
    }

    let bands = collected
        .into_iter()
        .enumerate()
        .map(|(ordinal, band)| {
            band.ok_or_else(|| LifeError::WorkerFailed { worker: ordinal, reason: "band was never returned".into() })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((bands, elapsed))
}

/// One band's life: receive, step `iterations` times, hand the band back.
async fn worker(
    ordinal: usize,
    width: usize,
    cells: Vec<bool>,
    mut link: HaloLink,
    barrier: Arc<Barrier>,
    iterations: u64,
) -> Result<WorkerOutcome> {
    let mut band = Band::from_cells(ordinal, width, cells)?;
    let neighbors = link.neighbors();
    debug!(
        rows = band.rows(),
        above = neighbors.above,
        below = neighbors.below,
        top_edge = ?neighbors.top_edge(),
        bottom_edge = ?neighbors.bottom_edge(),
        "band received"
    );

    // Everyone holds a band before the clock starts.
    barrier.wait().await;
    let started = Instant::now();

    for generation in 0..iterations {
        let ghosts = link.exchange(&band, generation).await?;
        let (current, next) = band.buffers();
        stencil::compute_next(current, &ghosts.above, &ghosts.below, width, next);
        drop(ghosts);

        // No band starts generation + 1 until every band has finished this one.
        barrier.wait().await;
        band.swap();
        trace!(generation, "step complete");
    }

    Ok(WorkerOutcome { cells: band.into_cells(), elapsed: started.elapsed() })
}

/// Replays `initial` on the unpartitioned reference torus and compares it
/// with the collected grid.
pub fn verify_against_reference(initial: &GlobalGrid, report: &RunReport) -> Result<()> {
    let mut reference = initial.clone();
    for _ in 0..report.generations {
        reference = stencil::step_torus(&reference);
    }
    let mismatched = if (reference.width(), reference.height()) == (report.grid.width(), report.grid.height()) {
        reference.cells().iter().zip(report.grid.cells()).filter(|(a, b)| a != b).count()
    } else {
        reference.cells().len()
    };
    if mismatched > 0 {
        return Err(LifeError::Verification { generations: report.generations, mismatched });
    }
    info!(generations = report.generations, "collected grid matches the reference torus");
    Ok(())
}
