//! Deterministic parking simulation
//!
//! - `geometry`: oriented rectangles and the separating-axis overlap test
//! - `action`: the discrete maneuver set
//! - `kinematics`: single-track pose integration
//! - `lot`: static lot geometry and collision queries
//! - `stage`: pose discretization and goal-stage tracking
//! - `episode`: outcomes, the episode clock and cumulative counters
//! - `env`: the environment facade agents drive

pub mod action;
pub mod env;
pub mod episode;
pub mod geometry;
pub mod kinematics;
pub mod lot;
pub mod stage;

pub use action::Action;
pub use env::ParkingEnv;
pub use episode::{Outcome, Statistics};
pub use geometry::{Aabb, OrientedRect, intersects};
pub use kinematics::{Pose, advance};
pub use lot::Lot;
pub use stage::{QuantizedPose, Region};
