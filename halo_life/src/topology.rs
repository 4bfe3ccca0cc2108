// topology.rs - Which bands sit above and below a worker on the torus

/// Kind of edge a band shares with a neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Top of the first band or bottom of the last band.
    Wraparound,
    /// Shared with the adjacent band inside the grid.
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    pub ordinal: usize,
    pub above: usize,
    pub below: usize,
}

impl Neighbors {
    pub fn top_edge(&self) -> Edge {
        if self.above >= self.ordinal { Edge::Wraparound } else { Edge::Internal }
    }

    pub fn bottom_edge(&self) -> Edge {
        if self.below <= self.ordinal { Edge::Wraparound } else { Edge::Internal }
    }
}

/// Every worker derives this locally from its own ordinal, so no message is
/// needed to agree on the layout. `total` must be at least 1.
pub fn neighbors(ordinal: usize, total: usize) -> Neighbors {
    Neighbors {
        ordinal,
        above: (ordinal + total - 1) % total,
        below: (ordinal + 1) % total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_worker_is_its_own_neighbor() {
        let n = neighbors(0, 1);
        assert_eq!((n.above, n.below), (0, 0));
        assert_eq!(n.top_edge(), Edge::Wraparound);
        assert_eq!(n.bottom_edge(), Edge::Wraparound);
    }

    #[test]
    fn partners_agree_in_both_directions() {
        for total in 1..=9 {
            for r in 0..total {
                let below = neighbors(r, total).below;
                assert_eq!(neighbors(below, total).above, r, "r={r} total={total}");
                let above = neighbors(r, total).above;
                assert_eq!(neighbors(above, total).below, r, "r={r} total={total}");
            }
        }
    }

    #[test]
    fn first_and_last_bands_wrap() {
        let first = neighbors(0, 4);
        let last = neighbors(3, 4);
        assert_eq!(first.above, 3);
        assert_eq!(last.below, 0);
        assert_eq!(first.top_edge(), Edge::Wraparound);
        assert_eq!(first.bottom_edge(), Edge::Internal);
        assert_eq!(last.bottom_edge(), Edge::Wraparound);
        assert_eq!(neighbors(2, 4).top_edge(), Edge::Internal);
    }
}
