//! The discrete maneuver set
//!
//! Nine fixed maneuvers, each a `(displacement, steering delta)` pair
//! applied for exactly one tick. There is no persistent momentum: the
//! displacement parameterizes that tick only.

use serde::{Deserialize, Serialize};

use crate::consts::{SPEED_STEP, STEER_STEP};
use crate::error::EnvError;

/// One tick's worth of control input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Drive forward, wheel held
    Accelerate,
    /// Drive backward, wheel held
    Reverse,
    /// Drive forward while turning the wheel left
    ForwardLeft,
    /// Drive forward while turning the wheel right
    ForwardRight,
    /// Drive backward while turning the wheel right
    ReverseLeft,
    /// Drive backward while turning the wheel left
    ReverseRight,
    /// Hold position and wheel
    Hold,
    /// Turn the wheel left in place
    SteerLeft,
    /// Turn the wheel right in place
    SteerRight,
}

impl Action {
    pub const COUNT: usize = 9;

    /// All maneuvers, in the index order agents use for policy outputs
    pub const ALL: [Action; Action::COUNT] = [
        Action::Accelerate,
        Action::Reverse,
        Action::ForwardLeft,
        Action::ForwardRight,
        Action::ReverseLeft,
        Action::ReverseRight,
        Action::Hold,
        Action::SteerLeft,
        Action::SteerRight,
    ];

    /// The `(displacement, steering delta)` this maneuver applies for one
    /// tick. Reverse maneuvers flip the steering sense so that e.g.
    /// `ReverseLeft` swings the tail left the way a real car does.
    pub fn deltas(self) -> (f32, f32) {
        match self {
            Action::Accelerate => (SPEED_STEP, 0.0),
            Action::Reverse => (-SPEED_STEP, 0.0),
            Action::ForwardLeft => (SPEED_STEP, STEER_STEP),
            Action::ForwardRight => (SPEED_STEP, -STEER_STEP),
            Action::ReverseLeft => (-SPEED_STEP, -STEER_STEP),
            Action::ReverseRight => (-SPEED_STEP, STEER_STEP),
            Action::Hold => (0.0, 0.0),
            Action::SteerLeft => (0.0, STEER_STEP),
            Action::SteerRight => (0.0, -STEER_STEP),
        }
    }

    /// Decode an agent-side action index (e.g. the argmax of a policy
    /// head). The only fallible entry point into the maneuver set.
    pub fn from_index(index: usize) -> Result<Self, EnvError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(EnvError::InvalidAction(index))
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&a| a == self)
            .unwrap_or_default()
    }
}
