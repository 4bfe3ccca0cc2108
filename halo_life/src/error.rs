// error.rs - Error taxonomy for a banded simulation run

use std::fmt;
use thiserror::Error;

/// Where in the run an error was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Distributing,
    Stepping { generation: u64 },
    Collecting,
    Done,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Uninitialized => write!(f, "uninitialized"),
            Phase::Distributing => write!(f, "distributing"),
            Phase::Stepping { generation } => write!(f, "stepping (generation {generation})"),
            Phase::Collecting => write!(f, "collecting"),
            Phase::Done => write!(f, "done"),
        }
    }
}

/// Every failure is fatal to the whole worker group.
#[derive(Debug, Error)]
pub enum LifeError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("worker {worker} could not allocate {cells} cells during {phase}")]
    Allocation {
        worker: usize,
        cells: usize,
        phase: Phase,
    },

    #[error("worker {worker} halo transport failed during {phase}: {reason}")]
    Transport {
        worker: usize,
        phase: Phase,
        reason: String,
    },

    #[error("worker {worker} did not finish: {reason}")]
    WorkerFailed { worker: usize, reason: String },

    #[error("verification failed after {generations} generations: {mismatched} cells differ from the reference torus")]
    Verification { generations: u64, mismatched: usize },
}

impl LifeError {
    pub fn config(message: impl Into<String>) -> Self {
        LifeError::Configuration(message.into())
    }

    pub fn transport(worker: usize, phase: Phase, reason: impl Into<String>) -> Self {
        LifeError::Transport { worker, phase, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_error_names_worker_and_phase() {
        let err = LifeError::transport(3, Phase::Stepping { generation: 7 }, "peer hung up");
        let text = err.to_string();
        assert!(text.contains("worker 3"));
        assert!(text.contains("generation 7"));
        assert!(text.contains("peer hung up"));
    }

    #[test]
    fn configuration_error_is_prefixed() {
        let err = LifeError::config("height 10 is not divisible by 3 workers");
        assert_eq!(err.to_string(), "configuration error: height 10 is not divisible by 3 workers");
    }
}
