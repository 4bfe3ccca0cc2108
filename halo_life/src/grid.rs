// grid.rs - Global grid and per-worker band storage

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{LifeError, Phase, Result};

/// One row of cells, `true` is alive.
pub type Row = Vec<bool>;

/// The full W x H torus. Only the coordinator ever holds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl GlobalGrid {
    /// All-dead grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![false; width * height] }
    }

    pub fn from_cells(width: usize, height: usize, cells: Vec<bool>) -> Result<Self> {
        if cells.len() != width * height {
            return Err(LifeError::config(format!(
                "{} cells cannot form a {width}x{height} grid",
                cells.len()
            )));
        }
        Ok(Self { width, height, cells })
    }

    /// Builds a grid from `X`/`.` lines, mostly for tests.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut cells = Vec::with_capacity(width * height);
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(LifeError::config(format!("row {i} is not {width} cells wide")));
            }
            cells.extend(row.chars().map(|c| c == 'X'));
        }
        Self::from_cells(width, height, cells)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        self.cells[row * self.width + col] = alive;
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Hash of the cell contents, stable within one build.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Splits the grid into `workers` contiguous row bands in ordinal order.
    pub fn split_into_bands(&self, workers: usize) -> Result<Vec<Vec<bool>>> {
        if workers == 0 {
            return Err(LifeError::config("worker count must be at least 1"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::config("cannot split an empty grid"));
        }
        if self.height % workers != 0 {
            return Err(LifeError::config(format!(
                "height {} is not divisible by {workers} workers",
                self.height
            )));
        }
        let band_cells = (self.height / workers) * self.width;
        Ok(self.cells.chunks(band_cells).map(<[bool]>::to_vec).collect())
    }

    /// Reassembles bands delivered in ordinal order.
    pub fn assemble(width: usize, bands: Vec<Vec<bool>>) -> Result<Self> {
        let total: usize = bands.iter().map(Vec::len).sum();
        if width == 0 || total % width != 0 {
            return Err(LifeError::config(format!("{total} collected cells do not tile rows of {width}")));
        }
        let mut cells = Vec::with_capacity(total);
        for band in bands {
            cells.extend(band);
        }
        Self::from_cells(width, total / width, cells)
    }
}

/// One worker's slice of the grid, double buffered.
///
/// `current` holds the generation being read, `next` receives the one being
/// written. [`Band::swap`] flips them without copying.
#[derive(Debug)]
pub struct Band {
    width: usize,
    rows: usize,
    current: Vec<bool>,
    next: Vec<bool>,
}

impl Band {
    /// Takes ownership of a delivered band and allocates its second buffer.
    pub fn from_cells(worker: usize, width: usize, cells: Vec<bool>) -> Result<Self> {
        if width == 0 || cells.is_empty() || cells.len() % width != 0 {
            return Err(LifeError::config(format!(
                "worker {worker} received {} cells, not whole rows of {width}",
                cells.len()
            )));
        }
        let mut next = Vec::new();
        next.try_reserve_exact(cells.len()).map_err(|_| LifeError::Allocation {
            worker,
            cells: cells.len(),
            phase: Phase::Distributing,
        })?;
        next.resize(cells.len(), false);

        Ok(Self { width, rows: cells.len() / width, current: cells, next })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[cfg(test)]
    pub fn current(&self) -> &[bool] {
        &self.current
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.current[row * self.width..(row + 1) * self.width]
    }

    pub fn first_row(&self) -> &[bool] {
        self.row(0)
    }

    pub fn last_row(&self) -> &[bool] {
        self.row(self.rows - 1)
    }

    /// Read side and write side of one step.
    pub fn buffers(&mut self) -> (&[bool], &mut [bool]) {
        (&self.current, &mut self.next)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn into_cells(self) -> Vec<bool> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(width: usize, height: usize) -> GlobalGrid {
        let cells = (0..width * height).map(|i| i % 3 == 0).collect();
        GlobalGrid::from_cells(width, height, cells).unwrap()
    }

    #[test]
    fn bands_reassemble_to_the_original_grid() {
        for (height, workers) in [(8, 1), (8, 2), (8, 4), (12, 3), (32, 8)] {
            let grid = numbered(5, height);
            let bands = grid.split_into_bands(workers).unwrap();
            assert_eq!(bands.len(), workers);
            assert!(bands.iter().all(|b| b.len() == 5 * height / workers));
            assert_eq!(GlobalGrid::assemble(5, bands).unwrap(), grid);
        }
    }

    #[test]
    fn uneven_split_is_a_configuration_error() {
        let grid = numbered(4, 10);
        assert!(matches!(grid.split_into_bands(3), Err(LifeError::Configuration(_))));
        assert!(matches!(grid.split_into_bands(0), Err(LifeError::Configuration(_))));
    }

    #[test]
    fn swap_flips_buffers_without_copying() {
        let mut band = Band::from_cells(0, 2, vec![true, false, false, true]).unwrap();
        let before = band.current().as_ptr();
        {
            let (_, next) = band.buffers();
            next.copy_from_slice(&[false, false, true, true]);
        }
        band.swap();
        assert_eq!(band.current(), &[false, false, true, true]);
        assert_ne!(band.current().as_ptr(), before);
        band.swap();
        assert_eq!(band.current().as_ptr(), before);
    }

    #[test]
    fn edge_rows() {
        let band = Band::from_cells(1, 3, vec![true, true, false, false, false, true]).unwrap();
        assert_eq!(band.rows(), 2);
        assert_eq!(band.first_row(), &[true, true, false]);
        assert_eq!(band.last_row(), &[false, false, true]);
    }

    #[test]
    fn from_rows_parses_glyphs() {
        let grid = GlobalGrid::from_rows(&["X..", ".X."]).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert!(grid.get(0, 0) && grid.get(1, 1));
        assert_eq!(grid.population(), 2);
        assert!(GlobalGrid::from_rows(&["X..", "X"]).is_err());
    }

    #[test]
    fn fingerprint_tracks_contents() {
        let mut grid = GlobalGrid::new(4, 4);
        let empty = grid.fingerprint();
        grid.set(2, 2, true);
        assert_ne!(grid.fingerprint(), empty);
        grid.set(2, 2, false);
        assert_eq!(grid.fingerprint(), empty);
    }
}
