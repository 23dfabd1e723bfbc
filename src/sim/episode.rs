//! Episode lifecycle: terminal outcomes, the per-episode clock, and the
//! cumulative outcome counters that survive across resets.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEADLINE_MAX, DEADLINE_MIN, DEADLINE_SCALE, HARD_TIME_LIMIT, STEP_LENGTH};

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Touched the boundary wall or left the lot
    HitWall,
    /// Overlapped a parked car
    HitCar,
    /// Made no lateral progress past the grace period
    TimeOver,
    /// Parked inside the terminal box
    Success,
    /// Ran into the hard tick ceiling
    HitTimeLimit,
    /// Missed the per-episode deadline
    OutOfTime,
}

/// Outcome totals across every episode of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub success: u32,
    pub hit_wall: u32,
    pub hit_car: u32,
    pub hit_time_limit: u32,
    pub out_of_time: u32,
    pub time_over: u32,
}

impl Statistics {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Success => self.success += 1,
            Outcome::HitWall => self.hit_wall += 1,
            Outcome::HitCar => self.hit_car += 1,
            Outcome::HitTimeLimit => self.hit_time_limit += 1,
            Outcome::OutOfTime => self.out_of_time += 1,
            Outcome::TimeOver => self.time_over += 1,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Episodes accounted for so far
    pub fn total(&self) -> u32 {
        self.success
            + self.hit_wall
            + self.hit_car
            + self.hit_time_limit
            + self.out_of_time
            + self.time_over
    }
}

/// Tick counter and deadlines for the episode in flight
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EpisodeClock {
    /// Ticks elapsed this episode
    pub t: u32,
    /// Soft deadline derived from the start pose, enforced only when the
    /// session asks for it
    pub deadline: u32,
    /// Ceiling no episode may outlive
    pub hard_time_limit: u32,
    pub done: bool,
}

/// Deadline budget for an episode starting at `start`: the Manhattan
/// distance to `destination` in step lengths, four ticks per step, clamped
/// to a sane band.
pub fn deadline_for(start: Vec2, destination: Vec2) -> u32 {
    let steps = ((start.x - destination.x).abs() / STEP_LENGTH
        + (start.y - destination.y).abs() / STEP_LENGTH)
        .trunc() as u32;
    (steps * DEADLINE_SCALE).clamp(DEADLINE_MIN, DEADLINE_MAX)
}

impl EpisodeClock {
    pub fn new(hard_time_limit: u32) -> Self {
        Self {
            t: 0,
            deadline: DEADLINE_MAX,
            hard_time_limit,
            done: false,
        }
    }

    /// Rearm for a fresh episode starting at `start`
    pub fn restart(&mut self, start: Vec2, destination: Vec2) {
        self.t = 0;
        self.deadline = deadline_for(start, destination);
        self.done = false;
    }
}

impl Default for EpisodeClock {
    fn default() -> Self {
        Self::new(HARD_TIME_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DESTINATION, START_POSITION};

    #[test]
    fn test_deadline_from_default_start_hits_the_cap() {
        // 52.5 + 42.5 step lengths, times four, well past the cap
        assert_eq!(deadline_for(START_POSITION, DESTINATION), DEADLINE_MAX);
    }

    #[test]
    fn test_deadline_clamps_to_floor_near_destination() {
        assert_eq!(deadline_for(Vec2::new(0.1, 0.2), DESTINATION), DEADLINE_MIN);
    }

    #[test]
    fn test_deadline_in_band_is_untouched() {
        // 5 + 3 step lengths -> 8 * 4 = 32 ticks
        assert_eq!(deadline_for(Vec2::new(0.5, -0.3), DESTINATION), 32);
    }

    #[test]
    fn test_restart_rearms_clock() {
        let mut clock = EpisodeClock::new(40);
        clock.t = 17;
        clock.done = true;
        clock.restart(Vec2::new(0.5, -0.3), DESTINATION);
        assert_eq!(clock.t, 0);
        assert!(!clock.done);
        assert_eq!(clock.deadline, 32);
        assert_eq!(clock.hard_time_limit, 40);
    }

    #[test]
    fn test_statistics_record_and_total() {
        let mut stats = Statistics::default();
        stats.record(Outcome::Success);
        stats.record(Outcome::HitWall);
        stats.record(Outcome::HitWall);
        stats.record(Outcome::TimeOver);
        assert_eq!(stats.success, 1);
        assert_eq!(stats.hit_wall, 2);
        assert_eq!(stats.time_over, 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut stats = Statistics::default();
        for outcome in [
            Outcome::Success,
            Outcome::HitCar,
            Outcome::HitTimeLimit,
            Outcome::OutOfTime,
            Outcome::TimeOver,
        ] {
            stats.record(outcome);
        }
        stats.clear();
        assert_eq!(stats, Statistics::default());
        stats.clear();
        assert_eq!(stats.total(), 0);
    }
}
