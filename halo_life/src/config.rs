// config.rs - Command line and environment settings shared by both binaries

use clap::Parser;
use tracing::info;

use crate::error::Result;
use crate::grid::GlobalGrid;
use crate::patterns;
use crate::simulation::SimulationConfig;

pub const DEFAULT_WIDTH: usize = 32;
pub const DEFAULT_HEIGHT: usize = 32;

#[derive(Debug, Clone, Parser)]
#[command(name = "halo_life", about = "Game of Life on a torus split into row bands, one worker per band")]
pub struct Cli {
    /// Number of generations to run (positive)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    pub iterations: u64,

    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells, must be divisible by the worker count
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Number of band workers
    #[arg(long, env = "HALO_LIFE_WORKERS", default_value_t = 4)]
    pub workers: usize,

    /// Seed for the random starting grid (drawn from the OS when omitted)
    #[arg(long, conflicts_with = "pattern")]
    pub seed: Option<u64>,

    /// Start from a named pattern instead of a random grid
    #[arg(long)]
    pub pattern: Option<String>,

    /// Top-left corner of the pattern as ROW,COL
    #[arg(long, value_name = "ROW,COL", value_parser = parse_corner, default_value = "1,1")]
    pub at: Corner,

    /// Check the collected grid against a single-torus replay
    #[arg(long)]
    pub verify: bool,
}

/// Where a pattern's top-left cell goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub row: usize,
    pub col: usize,
}

fn parse_corner(value: &str) -> std::result::Result<Corner, String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {value:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|e| format!("{part:?} in {value:?} is not a cell index: {e}"))
    };
    Ok(Corner { row: parse(row)?, col: parse(col)? })
}

impl Cli {
    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            width: self.width,
            height: self.height,
            workers: self.workers,
            iterations: self.iterations,
        }
    }

    /// Builds the coordinator's starting grid. A fresh seed is drawn when
    /// none was given, and is logged so the run can be repeated.
    pub fn initial_grid(&self) -> Result<GlobalGrid> {
        self.simulation_config().validate()?;
        match &self.pattern {
            Some(name) => {
                let pattern = patterns::find(name)?;
                let Corner { row, col } = self.at;
                let mut grid = GlobalGrid::new(self.width, self.height);
                patterns::place(&mut grid, pattern, row, col)?;
                info!(pattern = pattern.name, row, col, "placed starting pattern");
                Ok(grid)
            }
            None => {
                let seed = self.seed.unwrap_or_else(rand::random);
                info!(seed, "filling starting grid at random");
                Ok(patterns::random_grid(self.width, self.height, seed))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;

    fn parse(args: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("halo_life").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_match_the_classic_grid() {
        let cli = parse(&["10", "--workers", "4"]).unwrap();
        assert_eq!(
            cli.simulation_config(),
            SimulationConfig { width: 32, height: 32, workers: 4, iterations: 10 }
        );
        assert!(!cli.verify);
    }

    #[test]
    fn missing_or_zero_iterations_is_a_usage_error() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["0"]).is_err());
        assert!(parse(&["-3"]).is_err());
        assert!(parse(&["many"]).is_err());
    }

    #[test]
    fn pattern_and_seed_do_not_mix() {
        assert!(parse(&["5", "--pattern", "glider", "--seed", "7"]).is_err());
    }

    #[test]
    fn pattern_is_placed_at_the_requested_corner() {
        let cli = parse(&["5", "--workers", "2", "--width", "8", "--height", "8", "--pattern", "blinker", "--at", "7,6"])
            .unwrap();
        let grid = cli.initial_grid().unwrap();
        assert!(grid.get(7, 6) && grid.get(7, 7) && grid.get(7, 0));
        assert_eq!(grid.population(), 3);
    }

    #[test]
    fn corner_needs_exactly_row_and_col() {
        let base = ["5", "--pattern", "glider", "--at"];
        for bad in ["7", "7,6,5", "7,", "a,b", "-1,2"] {
            let args: Vec<&str> = base.iter().copied().chain([bad]).collect();
            assert!(parse(&args).is_err(), "--at {bad} should be rejected");
        }
        let cli = parse(&["5", "--pattern", "glider", "--at", "3, 4"]).unwrap();
        assert_eq!(cli.at, Corner { row: 3, col: 4 });
    }

    #[test]
    fn corner_defaults_to_one_one() {
        let cli = parse(&["5", "--pattern", "glider"]).unwrap();
        assert_eq!(cli.at, Corner { row: 1, col: 1 });
    }

    #[test]
    fn seeded_grid_is_reproducible() {
        let cli = parse(&["5", "--workers", "2", "--seed", "99"]).unwrap();
        assert_eq!(cli.initial_grid().unwrap(), cli.initial_grid().unwrap());
    }

    #[test]
    fn indivisible_height_is_caught_before_building_the_grid() {
        let cli = parse(&["5", "--workers", "3"]).unwrap();
        assert!(matches!(cli.initial_grid(), Err(LifeError::Configuration(_))));
    }
}
