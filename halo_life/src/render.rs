// render.rs - Text rendering of a collected grid and run summary

use std::fmt::Write;

use crate::grid::GlobalGrid;
use crate::simulation::RunReport;

pub const ALIVE: char = 'X';
pub const DEAD: char = '.';

/// One line per row, one glyph per cell.
pub fn render(grid: &GlobalGrid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in 0..grid.height() {
        out.extend(grid.row(row).iter().map(|&alive| if alive { ALIVE } else { DEAD }));
        out.push('\n');
    }
    out
}

pub fn population_percent(grid: &GlobalGrid) -> f64 {
    let total = grid.width() * grid.height();
    if total == 0 {
        return 0.0;
    }
    grid.population() as f64 / total as f64 * 100.0
}

pub fn summary(report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Generations: {}", report.generations);
    let _ = writeln!(out, "Number of workers: {}", report.workers);
    let _ = writeln!(out, "Time taken: {:.6} seconds", report.elapsed.as_secs_f64());
    let _ = writeln!(
        out,
        "Live cells: {} ({:.1}%)",
        report.grid.population(),
        population_percent(&report.grid)
    );
    out
}
