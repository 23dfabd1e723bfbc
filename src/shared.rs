//! Mutex-guarded session handle for hosts that render while an agent steps
//!
//! The agent thread and a render loop can hold clones of the same
//! [`SharedEnv`]; every operation takes the lock exactly once, so a
//! snapshot is always a consistent view of one tick.

use std::sync::{Arc, Mutex, PoisonError};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::EnvConfig;
use crate::error::EnvError;
use crate::sim::{Action, Outcome, ParkingEnv, Pose, Statistics};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub pose: Pose,
    /// Vehicle outline as a closed polygon
    pub vehicle: [Vec2; 5],
    pub tick: u32,
    pub done: bool,
    pub last_outcome: Option<Outcome>,
}

/// Cloneable handle to a single shared parking session
#[derive(Debug, Clone)]
pub struct SharedEnv {
    inner: Arc<Mutex<ParkingEnv>>,
}

impl SharedEnv {
    pub fn new(config: EnvConfig) -> Result<Self, EnvError> {
        Ok(Self {
            inner: Arc::new(Mutex::new(ParkingEnv::new(config)?)),
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ParkingEnv> {
        // A panicked holder cannot leave the environment in a torn state;
        // every mutation completes before the lock drops
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn reset(&self, repeat: bool) -> Pose {
        self.lock().reset(repeat)
    }

    pub fn step(&self, action: Action) -> Result<(Pose, f32), EnvError> {
        self.lock().step(action)
    }

    /// Consistent single-tick view for a render loop
    pub fn snapshot(&self) -> Result<RenderSnapshot, EnvError> {
        let env = self.lock();
        Ok(RenderSnapshot {
            pose: env.pose()?,
            vehicle: env.vehicle_rect()?.closed_vertices(),
            tick: env.tick(),
            done: env.is_done(),
            last_outcome: env.last_outcome(),
        })
    }

    pub fn counters(&self) -> Statistics {
        *self.lock().counters()
    }

    pub fn clear_counters(&self) {
        self.lock().clear_counters();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_requires_reset() {
        let shared = SharedEnv::new(EnvConfig::default()).unwrap();
        assert!(shared.snapshot().is_err());
        shared.reset(false);
        let snap = shared.snapshot().unwrap();
        assert_eq!(snap.tick, 0);
        assert!(!snap.done);
        assert_eq!(snap.vehicle[0], snap.vehicle[4]);
    }

    #[test]
    fn test_clones_share_one_session() {
        let shared = SharedEnv::new(EnvConfig::default()).unwrap();
        let other = shared.clone();
        shared.reset(false);
        shared.step(Action::Accelerate).unwrap();
        assert_eq!(other.snapshot().unwrap().tick, 1);
    }

    #[test]
    fn test_stepping_from_two_threads_stays_consistent() {
        let shared = SharedEnv::new(EnvConfig::default()).unwrap();
        shared.reset(false);
        let worker = {
            let shared = shared.clone();
            std::thread::spawn(move || {
                for _ in 0..10 {
                    let _ = shared.step(Action::SteerLeft);
                }
            })
        };
        for _ in 0..10 {
            let _ = shared.step(Action::SteerRight);
        }
        worker.join().unwrap();
        assert_eq!(shared.snapshot().unwrap().tick, 20);
    }
}
