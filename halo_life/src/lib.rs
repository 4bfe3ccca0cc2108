// lib.rs - Conway's Game of Life on a torus split into row bands
//
// Each band is advanced by its own worker task. Every generation the workers
// swap edge rows with the bands above and below, compute the next band into
// a second buffer, wait for each other, then flip buffers.

pub mod config;
pub mod error;
pub mod grid;
pub mod halo;
pub mod patterns;
pub mod render;
pub mod simulation;
pub mod stencil;
pub mod topology;

pub use config::{Cli, Corner};
pub use error::{LifeError, Phase, Result};
pub use grid::{Band, GlobalGrid, Row};
pub use simulation::{RunReport, SimulationConfig, run, verify_against_reference};
