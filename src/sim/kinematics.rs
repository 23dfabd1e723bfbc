//! Single-track vehicle kinematics
//!
//! One integration step per tick: the maneuver's displacement moves the
//! pivot along the current heading, the steering wheel saturates at its
//! lock angle, and the heading turns by the single-track relation
//! `Δh = (|v| / wheelbase) · tan(steering)`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::action::Action;
use crate::consts::{MAX_STEER_ANGLE, WHEELBASE};
use crate::wrap_angle;

/// Vehicle pose: pivot position, heading, and wheel state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f32,
    pub y: f32,
    /// Heading in radians, kept in [0, 2π)
    pub heading: f32,
    /// Displacement applied on the last tick (informational, not momentum)
    pub speed: f32,
    /// Steering-wheel angle, clamped to ±`MAX_STEER_ANGLE`
    pub steering: f32,
}

impl Pose {
    pub fn new(x: f32, y: f32, heading: f32) -> Self {
        Self {
            x,
            y,
            heading: wrap_angle(heading),
            speed: 0.0,
            steering: 0.0,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Advance a pose by one tick of the given maneuver.
///
/// Displacement uses the heading before the turn is applied, and the wheel
/// clamps symmetrically at both lock angles.
pub fn advance(pose: Pose, action: Action) -> Pose {
    let (v, steer_delta) = action.deltas();
    let steering = (pose.steering + steer_delta).clamp(-MAX_STEER_ANGLE, MAX_STEER_ANGLE);
    let heading = wrap_angle(pose.heading + (v.abs() / WHEELBASE) * steering.tan());
    Pose {
        x: pose.x + v * pose.heading.cos(),
        y: pose.y + v * pose.heading.sin(),
        heading,
        speed: v,
        steering,
    }
}
