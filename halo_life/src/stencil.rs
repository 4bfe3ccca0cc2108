// stencil.rs - Conway's rule over a band and its two ghost rows

use crate::grid::GlobalGrid;

/// Next state of one cell given its live Moore neighbor count.
#[inline]
pub fn next_state(alive: bool, count: u8) -> bool {
    match (alive, count) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Writes the next generation of one row from the rows above and below it.
/// Columns wrap around the torus.
#[inline]
fn next_row(up: &[bool], mid: &[bool], down: &[bool], out: &mut [bool]) {
    let width = mid.len();
    for col in 0..width {
        let left = (col + width - 1) % width;
        let right = (col + 1) % width;

        let mut count = 0u8;
        for row in [up, mid, down] {
            count += row[left] as u8 + row[col] as u8 + row[right] as u8;
        }
        count -= mid[col] as u8;

        out[col] = next_state(mid[col], count);
    }
}

/// Advances a band of `current.len() / width` rows into `next`.
///
/// Row 0 reads `ghost_above` as its upper neighbor and the last row reads
/// `ghost_below`; every other row reads inside the band. Only `next` is
/// written.
pub fn compute_next(
    current: &[bool],
    ghost_above: &[bool],
    ghost_below: &[bool],
    width: usize,
    next: &mut [bool],
) {
    debug_assert_eq!(current.len(), next.len());
    debug_assert_eq!(ghost_above.len(), width);
    debug_assert_eq!(ghost_below.len(), width);

    let rows = current.len() / width;
    let row = |i: usize| &current[i * width..(i + 1) * width];

    for (i, out) in next.chunks_mut(width).enumerate() {
        let up = if i == 0 { ghost_above } else { row(i - 1) };
        let down = if i + 1 == rows { ghost_below } else { row(i + 1) };
        next_row(up, row(i), down, out);
    }
}

/// Reference evaluator: one generation of the whole grid as a single torus,
/// wrapping both rows and columns by modular indexing.
pub fn step_torus(grid: &GlobalGrid) -> GlobalGrid {
    let (width, height) = (grid.width() as isize, grid.height() as isize);
    let mut next = GlobalGrid::new(grid.width(), grid.height());

    for i in 0..height {
        for j in 0..width {
            let mut count = 0u8;
            for dy in -1..=1isize {
                for dx in -1..=1isize {
                    if dy == 0 && dx == 0 {
                        continue;
                    }
                    let row = (i + dy).rem_euclid(height) as usize;
                    let col = (j + dx).rem_euclid(width) as usize;
                    count += grid.get(row, col) as u8;
                }
            }
            let (i, j) = (i as usize, j as usize);
            next.set(i, j, next_state(grid.get(i, j), count));
        }
    }
    next
}
