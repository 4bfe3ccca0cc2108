// halo.rs - Per-step boundary row exchange between neighboring bands
//
// Each worker owns two inbound channels:
//   from_above  carries the above-neighbor's last row  -> ghost row above
//   from_below  carries the below-neighbor's first row -> ghost row below
// and holds senders into its neighbors' inbound channels. With one worker the
// senders point back at its own receivers, so the band wraps onto itself.

use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::trace;

use crate::error::{LifeError, Phase, Result};
use crate::grid::{Band, Row};
use crate::topology::{self, Neighbors};

/// One boundary row in flight.
#[derive(Debug, Clone)]
pub struct HaloMessage {
    pub from: usize,
    pub generation: u64,
    pub row: Row,
}

/// Ghost rows for a single step. Dropped before the next exchange.
#[derive(Debug)]
pub struct GhostRows {
    pub above: Row,
    pub below: Row,
}

/// A worker's end of the halo wiring.
#[derive(Debug)]
pub struct HaloLink {
    neighbors: Neighbors,
    width: usize,
    to_above: Sender<HaloMessage>,
    to_below: Sender<HaloMessage>,
    from_above: Receiver<HaloMessage>,
    from_below: Receiver<HaloMessage>,
}

/// Builds the links for `workers` bands of rows `width` cells wide, indexed
/// by ordinal.
pub fn wire(workers: usize, width: usize) -> Vec<HaloLink> {
    // One message per channel per step; the barrier drains it before the next.
    let (down_tx, down_rx): (Vec<_>, Vec<_>) = (0..workers).map(|_| mpsc::channel(1)).unzip();
    let (up_tx, up_rx): (Vec<_>, Vec<_>) = (0..workers).map(|_| mpsc::channel(1)).unzip();

    down_rx
        .into_iter()
        .zip(up_rx)
        .enumerate()
        .map(|(ordinal, (from_above, from_below))| {
            let neighbors = topology::neighbors(ordinal, workers);
            HaloLink {
                neighbors,
                width,
                to_above: up_tx[neighbors.above].clone(),
                to_below: down_tx[neighbors.below].clone(),
                from_above,
                from_below,
            }
        })
        .collect()
}

impl HaloLink {
    pub fn neighbors(&self) -> Neighbors {
        self.neighbors
    }

    /// Sends this band's edge rows out and waits for both ghost rows of
    /// `generation`.
    pub async fn exchange(&mut self, band: &Band, generation: u64) -> Result<GhostRows> {
        let worker = self.neighbors.ordinal;
        let phase = Phase::Stepping { generation };

        let outgoing = |row: &[bool]| HaloMessage { from: worker, generation, row: row.to_vec() };
        self.to_above
            .send(outgoing(band.first_row()))
            .await
            .map_err(|_| LifeError::transport(worker, phase, format!("worker {} stopped receiving", self.neighbors.above)))?;
        self.to_below
            .send(outgoing(band.last_row()))
            .await
            .map_err(|_| LifeError::transport(worker, phase, format!("worker {} stopped receiving", self.neighbors.below)))?;

        let above = self.from_above.recv().await;
        let above = self.accept(above, self.neighbors.above, generation)?;
        let below = self.from_below.recv().await;
        let below = self.accept(below, self.neighbors.below, generation)?;

        trace!(worker, generation, above = self.neighbors.above, below = self.neighbors.below, "halo exchanged");
        Ok(GhostRows { above, below })
    }

    fn accept(&self, message: Option<HaloMessage>, expected: usize, generation: u64) -> Result<Row> {
        let worker = self.neighbors.ordinal;
        let phase = Phase::Stepping { generation };

        let Some(message) = message else {
            return Err(LifeError::transport(worker, phase, format!("worker {expected} hung up")));
        };
        if message.from != expected {
            return Err(LifeError::transport(
                worker,
                phase,
                format!("expected a row from worker {expected}, got one from worker {}", message.from),
            ));
        }
        if message.generation != generation {
            return Err(LifeError::transport(
                worker,
                phase,
                format!("worker {expected} sent generation {}", message.generation),
            ));
        }
        if message.row.len() != self.width {
            return Err(LifeError::transport(
                worker,
                phase,
                format!("worker {expected} sent {} cells, expected {}", message.row.len(), self.width),
            ));
        }
        Ok(message.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(worker: usize, rows: &[[bool; 3]]) -> Band {
        Band::from_cells(worker, 3, rows.concat()).unwrap()
    }

    #[tokio::test]
    async fn single_worker_receives_its_own_edges() {
        let mut links = wire(1, 3);
        let b = band(0, &[[true, false, false], [false, true, false], [false, false, true]]);

        let ghosts = links[0].exchange(&b, 0).await.unwrap();
        assert_eq!(ghosts.above, vec![false, false, true]);
        assert_eq!(ghosts.below, vec![true, false, false]);

        // Channels are drained, so the next step goes through the same path.
        let ghosts = links[0].exchange(&b, 1).await.unwrap();
        assert_eq!(ghosts.above, vec![false, false, true]);
    }

    #[tokio::test]
    async fn two_workers_swap_adjoining_rows() {
        let mut links = wire(2, 3);
        let mut second = links.pop().unwrap();
        let mut first = links.pop().unwrap();
        let top = band(0, &[[true, true, true], [true, false, false]]);
        let bottom = band(1, &[[false, true, false], [false, false, true]]);

        let (a, b) = tokio::join!(first.exchange(&top, 0), second.exchange(&bottom, 0));
        let (a, b) = (a.unwrap(), b.unwrap());

        // Worker 0: above wraps to worker 1's last row, below is worker 1's first row.
        assert_eq!(a.above, vec![false, false, true]);
        assert_eq!(a.below, vec![false, true, false]);
        // Worker 1: above is worker 0's last row, below wraps to worker 0's first row.
        assert_eq!(b.above, vec![true, false, false]);
        assert_eq!(b.below, vec![true, true, true]);
    }

    #[tokio::test]
    async fn generation_mismatch_is_a_transport_error() {
        let mut links = wire(2, 3);
        let mut second = links.pop().unwrap();
        let mut first = links.pop().unwrap();
        let b0 = band(0, &[[true, false, false]]);
        let b1 = band(1, &[[false, true, false]]);

        let (a, b) = tokio::join!(first.exchange(&b0, 4), second.exchange(&b1, 5));
        assert!(matches!(a, Err(LifeError::Transport { worker: 0, .. })));
        assert!(matches!(b, Err(LifeError::Transport { worker: 1, .. })));
    }

    #[tokio::test]
    async fn departed_neighbor_is_a_transport_error() {
        let mut links = wire(3, 3);
        links.truncate(1);
        let b0 = band(0, &[[true, false, false]]);

        // Worker 1's receivers are gone, so the send below fails.
        let err = links[0].exchange(&b0, 0).await.unwrap_err();
        assert!(matches!(err, LifeError::Transport { worker: 0, phase: Phase::Stepping { generation: 0 }, .. }));
    }

    #[test]
    fn wiring_follows_the_topology() {
        let links = wire(4, 8);
        for (ordinal, link) in links.iter().enumerate() {
            assert_eq!(link.neighbors(), topology::neighbors(ordinal, 4));
        }
    }
}
