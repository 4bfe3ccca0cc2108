// patterns.rs - Named starting patterns and random fill

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{LifeError, Result};
use crate::grid::GlobalGrid;

/// Live cells as (row, col) offsets from the pattern's top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

impl Pattern {
    /// Bounding box as (rows, cols).
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(rows, cols), &(r, c)| (rows.max(r + 1), cols.max(c + 1)))
    }
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "pulsar",
        cells: &[
            // Top half
            (0, 2), (0, 3), (0, 4), (0, 8), (0, 9), (0, 10),
            (2, 0), (2, 5), (2, 7), (2, 12),
            (3, 0), (3, 5), (3, 7), (3, 12),
            (4, 0), (4, 5), (4, 7), (4, 12),
            (5, 2), (5, 3), (5, 4), (5, 8), (5, 9), (5, 10),
            // Bottom half (mirrored)
            (7, 2), (7, 3), (7, 4), (7, 8), (7, 9), (7, 10),
            (8, 0), (8, 5), (8, 7), (8, 12),
            (9, 0), (9, 5), (9, 7), (9, 12),
            (10, 0), (10, 5), (10, 7), (10, 12),
            (12, 2), (12, 3), (12, 4), (12, 8), (12, 9), (12, 10),
        ],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "gosper-glider-gun",
        cells: &[
            (4, 0), (4, 1), (5, 0), (5, 1),
            (4, 10), (5, 10), (6, 10), (3, 11), (7, 11), (2, 12), (8, 12),
            (2, 13), (8, 13), (5, 14), (3, 15), (7, 15), (4, 16), (5, 16),
            (6, 16), (5, 17), (2, 20), (3, 20), (4, 20), (2, 21), (3, 21),
            (4, 21), (1, 22), (5, 22), (0, 24), (1, 24), (5, 24), (6, 24),
            (2, 34), (3, 34), (2, 35), (3, 35),
        ],
    },
];

/// Case-insensitive lookup; `_` and spaces match `-`.
pub fn find(name: &str) -> Result<&'static Pattern> {
    let wanted = name.trim().to_ascii_lowercase().replace(['_', ' '], "-");
    PATTERNS.iter().find(|p| p.name == wanted).ok_or_else(|| {
        let known: Vec<_> = PATTERNS.iter().map(|p| p.name).collect();
        LifeError::config(format!("unknown pattern {name:?}, expected one of {}", known.join(", ")))
    })
}

/// Stamps `pattern` with its corner at (`row`, `col`), wrapping around the
/// torus. Cells already alive stay alive.
pub fn place(grid: &mut GlobalGrid, pattern: &Pattern, row: usize, col: usize) -> Result<()> {
    let (rows, cols) = pattern.extent();
    if rows > grid.height() || cols > grid.width() {
        return Err(LifeError::config(format!(
            "pattern {} needs {rows}x{cols} cells, grid is {}x{}",
            pattern.name,
            grid.height(),
            grid.width()
        )));
    }
    // Reduce the corner first so large offsets cannot overflow.
    let (height, width) = (grid.height(), grid.width());
    let (row, col) = (row % height, col % width);
    for &(r, c) in pattern.cells {
        grid.set((row + r) % height, (col + c) % width, true);
    }
    Ok(())
}

/// Every cell alive or dead with equal probability.
pub fn random_grid(width: usize, height: usize, seed: u64) -> GlobalGrid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = GlobalGrid::new(width, height);
    for row in 0..height {
        for col in 0..width {
            grid.set(row, col, rng.random_bool(0.5));
        }
    }
    grid
}
