//! The parking environment: episode protocol, reward shaping and terminal
//! outcome detection on top of the kinematics and lot geometry.
//!
//! One episode is a sequence of [`ParkingEnv::step`] calls between a
//! [`ParkingEnv::reset`] and a terminal outcome. Every step costs a small
//! penalty plus a shaping term proportional to the progress made toward the
//! destination; collisions, stalls and goal events override the shaped
//! reward outright.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::action::Action;
use super::episode::{EpisodeClock, Outcome, Statistics};
use super::geometry::OrientedRect;
use super::kinematics::{Pose, advance};
use super::lot::Lot;
use super::stage::{QuantizedPose, Region, StageTracker};
use crate::config::EnvConfig;
use crate::consts::*;
use crate::error::EnvError;

/// Attempts at sampling a collision-free spawn before giving up
const MAX_SPAWN_ATTEMPTS: u32 = 1000;

fn footprint(pose: &Pose) -> OrientedRect {
    OrientedRect::from_pose(pose.position(), CAR_LENGTH, CAR_WIDTH, pose.heading)
}

/// A parking session: fixed lot geometry plus mutable episode state
#[derive(Debug, Clone)]
pub struct ParkingEnv {
    config: EnvConfig,
    lot: Lot,
    stage: StageTracker,
    stats: Statistics,
    clock: EpisodeClock,
    rng: Pcg32,
    pose: Pose,
    vehicle: OrientedRect,
    start_pose: Pose,
    /// Distance to the destination after the previous tick, the baseline
    /// for the progress shaping term
    distance: f32,
    observation: QuantizedPose,
    last_outcome: Option<Outcome>,
    started: bool,
}

impl ParkingEnv {
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        let lot = Lot::new()?;
        let pose = Pose::new(START_POSITION.x, START_POSITION.y, START_HEADING);
        let mut stage = StageTracker::new();
        let observation = stage.observe(&pose, &lot);
        Ok(Self {
            rng: Pcg32::seed_from_u64(config.seed),
            clock: EpisodeClock::new(config.hard_time_limit),
            config,
            stage,
            stats: Statistics::default(),
            vehicle: footprint(&pose),
            start_pose: pose,
            distance: pose.position().distance(lot.destination),
            observation,
            last_outcome: None,
            started: false,
            pose,
            lot,
        })
    }

    /// Begin a fresh episode and return its spawn pose.
    ///
    /// With `repeat` the previous spawn pose is reused; otherwise the spawn
    /// is the fixed start point, or a sampled collision-free pose when the
    /// session runs with random starts.
    pub fn reset(&mut self, repeat: bool) -> Pose {
        let start = if repeat {
            self.start_pose
        } else if self.config.random_start {
            self.sample_spawn()
        } else {
            Pose::new(START_POSITION.x, START_POSITION.y, START_HEADING)
        };
        self.pose = start;
        self.start_pose = start;
        self.vehicle = footprint(&start);
        self.distance = start.position().distance(self.lot.destination);
        self.stage.reset();
        self.observation = self.stage.observe(&start, &self.lot);
        self.clock.restart(start.position(), self.lot.destination);
        self.last_outcome = None;
        self.started = true;
        log::debug!(
            "reset at ({:.2}, {:.2}), deadline {} ticks",
            start.x,
            start.y,
            self.clock.deadline
        );
        start
    }

    /// Rejection-sample a spawn pose that is clear of the wall and the
    /// parked cars. Falls back to the fixed start if the sampler keeps
    /// missing.
    fn sample_spawn(&mut self) -> Pose {
        let region = self.lot.start_region;
        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let candidate = Pose::new(
                self.rng.random_range(region.x_min..region.x_max),
                self.rng.random_range(region.y_min..region.y_max),
                self.rng.random_range(0.0..std::f32::consts::TAU),
            );
            let rect = footprint(&candidate);
            let pivot = candidate.position();
            if !self.lot.hits_wall(&rect, pivot) && !self.lot.hits_obstacles(&rect, pivot) {
                return candidate;
            }
        }
        log::warn!(
            "no collision-free spawn after {MAX_SPAWN_ATTEMPTS} attempts, using the fixed start"
        );
        Pose::new(START_POSITION.x, START_POSITION.y, START_HEADING)
    }

    /// Apply one maneuver and return the resulting pose and reward.
    ///
    /// Terminal events override the shaped reward and end the episode; the
    /// tick-limit checks run last and only when nothing else already ended
    /// it.
    pub fn step(&mut self, action: Action) -> Result<(Pose, f32), EnvError> {
        if !self.started {
            return Err(EnvError::NotReset);
        }
        if self.clock.done {
            return Err(EnvError::EpisodeDone);
        }

        self.clock.t += 1;
        self.pose = advance(self.pose, action);
        self.vehicle = footprint(&self.pose);
        self.observation = self.stage.observe(&self.pose, &self.lot);

        let pivot = self.pose.position();
        let dist = pivot.distance(self.lot.destination);
        let mut reward = STEP_PENALTY + PROGRESS_GAIN * (self.distance - dist);
        self.distance = dist;

        let mut outcome = None;
        if self.lot.hits_wall(&self.vehicle, pivot) {
            reward = COLLISION_REWARD;
            outcome = Some(Outcome::HitWall);
        } else if self.lot.hits_obstacles(&self.vehicle, pivot) {
            reward = COLLISION_REWARD;
            outcome = Some(Outcome::HitCar);
        } else if self.clock.t > STUCK_GRACE_TICKS
            && (self.pose.x - self.start_pose.x).abs() < STUCK_PROGRESS_EPS
        {
            reward = STUCK_REWARD;
            outcome = Some(Outcome::TimeOver);
        } else if self.stage.enter_second_zone(&self.pose) {
            // Milestone bonus, the episode keeps going
            reward = SECOND_ZONE_REWARD;
        } else if self.lot.terminal.contains(pivot) {
            reward = SUCCESS_REWARD;
            outcome = Some(Outcome::Success);
        }

        if outcome.is_none() {
            if self.clock.t >= self.clock.hard_time_limit {
                outcome = Some(Outcome::HitTimeLimit);
            } else if self.config.enforce_deadline && self.clock.t >= self.clock.deadline {
                outcome = Some(Outcome::OutOfTime);
            }
        }

        if let Some(outcome) = outcome {
            self.clock.done = true;
            self.last_outcome = Some(outcome);
            self.stats.record(outcome);
            log::info!("episode over after {} ticks: {:?}", self.clock.t, outcome);
        }
        log::debug!("t={} reward={reward:.2}", self.clock.t);

        Ok((self.pose, reward))
    }

    /// Pose after the last step, once an episode has begun
    pub fn pose(&self) -> Result<Pose, EnvError> {
        self.require_started()?;
        Ok(self.pose)
    }

    /// Vehicle footprint matching the current pose
    pub fn vehicle_rect(&self) -> Result<&OrientedRect, EnvError> {
        self.require_started()?;
        Ok(&self.vehicle)
    }

    /// Discretized pose the agent observes
    pub fn observation(&self) -> Result<QuantizedPose, EnvError> {
        self.require_started()?;
        Ok(self.observation)
    }

    fn require_started(&self) -> Result<(), EnvError> {
        if self.started {
            Ok(())
        } else {
            Err(EnvError::NotReset)
        }
    }

    pub fn tick(&self) -> u32 {
        self.clock.t
    }

    pub fn deadline(&self) -> u32 {
        self.clock.deadline
    }

    pub fn is_done(&self) -> bool {
        self.clock.done
    }

    pub fn region(&self) -> Region {
        self.stage.region()
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    /// Cumulative outcome totals since the last [`Self::clear_counters`]
    pub fn counters(&self) -> &Statistics {
        &self.stats
    }

    pub fn clear_counters(&mut self) {
        self.stats.clear();
    }

    pub fn lot(&self) -> &Lot {
        &self.lot
    }
}
