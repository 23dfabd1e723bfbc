//! Errors surfaced at the environment boundary
//!
//! Geometry and collision math is total over validated input, so everything
//! here is caller misuse or bad configuration. Misuse is always an explicit
//! `Err`, never a silent no-op: a learning loop that trains on a stale or
//! inconsistent transition is worse than one that crashes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Action index outside the fixed nine-maneuver set
    #[error("invalid action index {0}, expected 0..9")]
    InvalidAction(usize),

    /// A pose or observation was queried before the first `reset`
    #[error("environment queried before the first reset")]
    NotReset,

    /// `step` was called on a finished episode
    #[error("episode is done, call reset before stepping again")]
    EpisodeDone,

    /// Degenerate lot geometry detected at construction
    #[error("degenerate geometry: {0}")]
    InvalidGeometry(String),
}
