//! Parklot - a deterministic car-parking simulation environment
//!
//! Core modules:
//! - `sim`: deterministic simulation (kinematics, collisions, goal stages)
//! - `config`: environment behavior switches
//! - `shared`: mutex-guarded session for hosts that render while stepping
//!
//! The crate owns the physical/episodic core only. The learning agent and
//! any visualization are external collaborators: the agent feeds an
//! [`sim::Action`] into [`sim::ParkingEnv::step`] and gets back a
//! `(Pose, reward)` transition, a renderer reads poses and rectangles.

pub mod config;
pub mod error;
pub mod shared;
pub mod sim;

pub use config::EnvConfig;
pub use error::EnvError;
pub use sim::{Action, ParkingEnv, Pose};

use glam::Vec2;

/// Physical constants of the lot and the vehicle
pub mod consts {
    use glam::Vec2;

    /// Vehicle body length in meters
    pub const CAR_LENGTH: f32 = 4.800;
    /// Vehicle body width in meters
    pub const CAR_WIDTH: f32 = 1.830;
    /// Longitudinal extents of the vehicle footprint in its local frame.
    /// The pose pivot sits near the rear axle, so the body reaches much
    /// further ahead of the pivot than behind it.
    pub const CAR_REAR_EXTENT: f32 = -1.100;
    pub const CAR_FRONT_EXTENT: f32 = 3.690;

    /// Displacement covered by one driving tick
    pub const SPEED_STEP: f32 = 0.05;
    /// Steering-wheel increment per steering tick (radians)
    pub const STEER_STEP: f32 = 0.03491;
    /// Steering-wheel saturation angle (radians)
    pub const MAX_STEER_ANGLE: f32 = std::f32::consts::FRAC_PI_4;
    /// Radius of the circle the vehicle center traces at full forward lock
    pub const FORWARD_TURN_RADIUS: f32 = 0.59;
    /// Single-track wheelbase
    pub const WHEELBASE: f32 = 2.0 * FORWARD_TURN_RADIUS;
    /// Grid pitch used when converting distances into deadline ticks
    pub const STEP_LENGTH: f32 = 0.1;

    /// Boundary wall: a hollow 15 x 10.5 frame
    pub const WALL_CENTER: Vec2 = Vec2::new(0.0, -2.75);
    pub const WALL_LENGTH: f32 = 15.0;
    pub const WALL_WIDTH: f32 = 10.5;
    /// Radial thickness of the wall frame band used for contact tests
    pub const WALL_FRAME_THICKNESS: f32 = 0.5;

    /// The two parked vehicles flanking the target space
    pub const OBSTACLE_CENTERS: [Vec2; 2] =
        [Vec2::new(-4.65, 0.0), Vec2::new(4.65, 0.0)];
    pub const OBSTACLE_LENGTH: f32 = 5.7;
    pub const OBSTACLE_WIDTH: f32 = 5.0;

    /// Default spawn pose (heading east)
    pub const START_POSITION: Vec2 = Vec2::new(-5.25, -4.25);
    pub const START_HEADING: f32 = 0.0;

    /// Parking destination and the half-extent of the success box around it
    pub const DESTINATION: Vec2 = Vec2::new(0.0, 0.0);
    pub const TERMINAL_HALF_EXTENT: f32 = 0.25;

    /// Heading discretization: 16 sectors of pi/8
    pub const HEADING_SECTOR_WIDTH: f32 = std::f32::consts::PI / 8.0;
    pub const HEADING_SECTORS: i32 = 16;

    /// Fine goal grid pitch (near the destination)
    pub const FINE_GRID: f32 = 0.1;
    /// Coarse grid pitch and cell offset (far from the destination)
    pub const COARSE_GRID: f32 = 1.0;
    pub const COARSE_OFFSET: f32 = 0.55;

    /// Ticks of grace before the stuck-car detector may fire
    pub const STUCK_GRACE_TICKS: u32 = 30;
    /// Longitudinal progress below this after the grace period means stuck
    pub const STUCK_PROGRESS_EPS: f32 = 0.05;

    /// Absolute tick ceiling, independent of the per-episode deadline
    pub const HARD_TIME_LIMIT: u32 = 1000;
    /// Deadline ticks per unit of Manhattan grid distance
    pub const DEADLINE_SCALE: u32 = 4;
    pub const DEADLINE_MIN: u32 = 20;
    pub const DEADLINE_MAX: u32 = 150;

    /// Reward shaping
    pub const STEP_PENALTY: f32 = -1.0;
    pub const PROGRESS_GAIN: f32 = 5.0;
    pub const COLLISION_REWARD: f32 = -100.0;
    pub const STUCK_REWARD: f32 = -10.0;
    pub const SECOND_ZONE_REWARD: f32 = 50.0;
    pub const SUCCESS_REWARD: f32 = 10000.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Rotate a vector counter-clockwise by `angle` radians
#[inline]
pub fn rotate_ccw(v: Vec2, angle: f32) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}
