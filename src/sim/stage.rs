//! Goal-stage tracking over a discretized pose
//!
//! The continuous pose is compressed into a grid cell plus a heading
//! sector: a fine 0.1 grid near the destination, a coarse offset 1.0 grid
//! far from it. The stage machine latches progress through the stage-two
//! sub-goals off those cells. The discrete values are observational; reward
//! and collision always work on the raw pose.

use serde::{Deserialize, Serialize};

use super::kinematics::Pose;
use super::lot::Lot;
use crate::consts::{COARSE_GRID, COARSE_OFFSET, FINE_GRID, HEADING_SECTORS, HEADING_SECTOR_WIDTH};

/// Pose snapped to a grid cell and a heading sector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantizedPose {
    pub x: f32,
    pub y: f32,
    /// Heading sector in `0..16`; sector 0 is centered on east, sector 8
    /// on west
    pub sector: i32,
}

/// Coarse classification of where the vehicle stands on its way in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Region {
    /// Stage two complete, lining up on the space itself
    Docking,
    /// Inside the near zone, working through the stage-two sub-goals
    Approach,
    /// Far from the destination
    Cruise,
}

impl Region {
    pub fn index(self) -> u8 {
        match self {
            Region::Docking => 0,
            Region::Approach => 1,
            Region::Cruise => 2,
        }
    }
}

/// Round to the nearest grid multiple, ties away from the lower cell
fn round_to_grid(value: f32, width: f32) -> f32 {
    (((value / (width / 2.0)).floor() + 1.0) / 2.0).floor() * width
}

/// Snap into the coarse cell, offset so cell centers sit off the grid lines
fn snap_coarse(value: f32) -> f32 {
    (value / COARSE_GRID).floor() * COARSE_GRID + COARSE_OFFSET * COARSE_GRID
}

/// Fold a heading into one of 16 sectors of width π/8, rounding half-sector
/// remainders up
pub fn heading_sector(heading: f32) -> i32 {
    let half = (heading / (HEADING_SECTOR_WIDTH / 2.0)).floor() as i64;
    let folded = if half.rem_euclid(2) == 0 {
        half / 2
    } else {
        (half + 1) / 2
    };
    folded.rem_euclid(HEADING_SECTORS as i64) as i32
}

fn quantize_fine(pose: &Pose) -> QuantizedPose {
    QuantizedPose {
        x: round_to_grid(pose.x, FINE_GRID),
        y: round_to_grid(pose.y, FINE_GRID),
        sector: heading_sector(pose.heading),
    }
}

fn quantize_coarse(pose: &Pose) -> QuantizedPose {
    QuantizedPose {
        x: snap_coarse(pose.x),
        y: snap_coarse(pose.y),
        sector: heading_sector(pose.heading),
    }
}

/// Per-episode stage progress; fully reinitialized on every reset
#[derive(Debug, Clone)]
pub struct StageTracker {
    region: Region,
    to_terminal_idx: usize,
    finished_stage_two: bool,
    reached_second_zone: bool,
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            region: Region::Approach,
            to_terminal_idx: 0,
            finished_stage_two: false,
            reached_second_zone: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Classify the raw pose and update the stage flags.
    ///
    /// The fine grid applies inside the near zone, and keeps applying once
    /// stage two has been finished even if the vehicle wanders back out.
    pub fn observe(&mut self, pose: &Pose, lot: &Lot) -> QuantizedPose {
        if lot.stage_one.contains(pose.position()) || self.finished_stage_two {
            let q = quantize_fine(pose);
            if let Some(idx) = self.match_stage_two(&q, lot) {
                self.finished_stage_two = true;
                self.to_terminal_idx = idx;
            }
            self.region = if self.finished_stage_two {
                Region::Docking
            } else {
                Region::Approach
            };
            q
        } else {
            self.region = Region::Cruise;
            quantize_coarse(pose)
        }
    }

    fn match_stage_two(&self, q: &QuantizedPose, lot: &Lot) -> Option<usize> {
        lot.stage_two
            .iter()
            .position(|zone| zone.bounds.contains(glam::Vec2::new(q.x, q.y)) && q.sector == zone.sector)
    }

    /// One-shot latch for the first entry into the second zone; never
    /// re-fires until the next reset
    pub fn enter_second_zone(&mut self, pose: &Pose) -> bool {
        if pose.x > 0.0 && pose.y > -0.5 && !self.reached_second_zone {
            self.reached_second_zone = true;
            return true;
        }
        false
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Which stage-two sub-goal was matched, meaningful once
    /// [`Self::finished_stage_two`] returns true
    pub fn to_terminal_idx(&self) -> usize {
        self.to_terminal_idx
    }

    pub fn finished_stage_two(&self) -> bool {
        self.finished_stage_two
    }

    pub fn reached_second_zone(&self) -> bool {
        self.reached_second_zone
    }
}
