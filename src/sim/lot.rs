//! Static lot geometry: boundary wall, parked obstacles and goal zones
//!
//! The wall is a hollow frame, not a solid body: a vehicle fully inside the
//! interior is clear of it, and contact with the boundary line counts as a
//! hit. All of this is immutable for the lifetime of a session.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, OrientedRect, intersects};
use crate::consts::*;
use crate::error::EnvError;

/// A stage-two sub-goal: a fine-grid cell plus a required heading sector
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StageTwoZone {
    pub bounds: Aabb,
    pub sector: i32,
}

/// Immutable geometry for one session
#[derive(Debug, Clone)]
pub struct Lot {
    /// Full wall outline, for renderers
    pub wall_rect: OrientedRect,
    /// Interior of the lot; the drivable area
    pub wall_bounds: Aabb,
    /// The four frame segments the wall contact test runs against
    frame: [OrientedRect; 4],
    pub obstacles: [OrientedRect; 2],
    obstacle_centers: [Vec2; 2],
    /// Pivot-to-obstacle-center distance beyond which no contact is
    /// possible; the distance pre-check may only skip work below this
    obstacle_clearance: f32,
    pub terminal: Aabb,
    pub stage_one: Aabb,
    pub stage_two: [StageTwoZone; 4],
    pub destination: Vec2,
    /// Region spawn poses are sampled from when random starts are enabled
    pub start_region: Aabb,
}

fn checked_dims(what: &str, length: f32, width: f32) -> Result<(), EnvError> {
    if length <= 0.0 || width <= 0.0 {
        return Err(EnvError::InvalidGeometry(format!(
            "{what} must have positive extent, got {length} x {width}"
        )));
    }
    Ok(())
}

impl Lot {
    pub fn new() -> Result<Self, EnvError> {
        checked_dims("wall", WALL_LENGTH, WALL_WIDTH)?;
        checked_dims("obstacle", OBSTACLE_LENGTH, OBSTACLE_WIDTH)?;
        checked_dims("vehicle", CAR_LENGTH, CAR_WIDTH)?;

        let wall_rect = OrientedRect::from_pose(WALL_CENTER, WALL_LENGTH, WALL_WIDTH, 0.0);
        let wall_bounds = Aabb::around(WALL_CENTER, WALL_LENGTH / 2.0, WALL_WIDTH / 2.0);

        // Frame segments hug the interior from the outside, with corners
        // extended so the band is closed all the way around.
        let t = WALL_FRAME_THICKNESS;
        let cx = WALL_CENTER.x;
        let cy = WALL_CENTER.y;
        let frame = [
            OrientedRect::from_pose(
                Vec2::new(wall_bounds.x_min - t / 2.0, cy),
                t,
                WALL_WIDTH + 2.0 * t,
                0.0,
            ),
            OrientedRect::from_pose(
                Vec2::new(wall_bounds.x_max + t / 2.0, cy),
                t,
                WALL_WIDTH + 2.0 * t,
                0.0,
            ),
            OrientedRect::from_pose(
                Vec2::new(cx, wall_bounds.y_min - t / 2.0),
                WALL_LENGTH + 2.0 * t,
                t,
                0.0,
            ),
            OrientedRect::from_pose(
                Vec2::new(cx, wall_bounds.y_max + t / 2.0),
                WALL_LENGTH + 2.0 * t,
                t,
                0.0,
            ),
        ];

        let obstacles = OBSTACLE_CENTERS
            .map(|c| OrientedRect::from_pose(c, OBSTACLE_LENGTH, OBSTACLE_WIDTH, 0.0));

        // Worst-case reach of any vehicle corner from its pivot, plus the
        // obstacle's own bounding radius
        let vehicle = OrientedRect::from_pose(Vec2::ZERO, CAR_LENGTH, CAR_WIDTH, 0.0);
        let vehicle_reach = vehicle
            .vertices()
            .iter()
            .map(|v| v.length())
            .fold(0.0, f32::max);
        let obstacle_clearance = vehicle_reach + obstacles[0].bounding_radius();

        let terminal = Aabb::around(DESTINATION, TERMINAL_HALF_EXTENT, TERMINAL_HALF_EXTENT);
        let stage_one = Aabb::new(-1.75, 1.75, -3.15, -0.85);
        let sub = |x: f32, y: f32, sector: i32| StageTwoZone {
            bounds: Aabb::around(Vec2::new(x, y), 0.049, 0.049),
            sector,
        };
        let stage_two = [
            sub(0.8, -1.4, 0),
            sub(-0.8, -1.4, 8),
            sub(-0.8, -2.6, 8),
            sub(0.8, -2.6, 0),
        ];

        let start_region = Aabb::new(
            wall_bounds.x_min + CAR_LENGTH,
            wall_bounds.x_max - CAR_LENGTH,
            wall_bounds.y_min + CAR_LENGTH,
            wall_bounds.y_max - CAR_LENGTH,
        );

        for (name, zone) in [("terminal", terminal), ("stage one", stage_one)] {
            if zone.is_degenerate() {
                return Err(EnvError::InvalidGeometry(format!(
                    "{name} zone has no interior"
                )));
            }
        }
        if stage_two.iter().any(|z| z.bounds.is_degenerate()) {
            return Err(EnvError::InvalidGeometry(
                "stage-two zone has no interior".into(),
            ));
        }

        Ok(Self {
            wall_rect,
            wall_bounds,
            frame,
            obstacles,
            obstacle_centers: OBSTACLE_CENTERS,
            obstacle_clearance,
            terminal,
            stage_one,
            stage_two,
            destination: DESTINATION,
            start_region,
        })
    }

    /// True when the vehicle touches the wall frame or its pivot has left
    /// the lot interior. Being fully inside the interior is not a hit.
    pub fn hits_wall(&self, vehicle: &OrientedRect, pivot: Vec2) -> bool {
        if !self.wall_bounds.contains(pivot) {
            return true;
        }
        self.frame.iter().any(|edge| intersects(vehicle, edge))
    }

    /// True when the vehicle overlaps either parked car. The distance
    /// pre-check can only rule a pair out, never rule one in.
    pub fn hits_obstacles(&self, vehicle: &OrientedRect, pivot: Vec2) -> bool {
        self.obstacles
            .iter()
            .zip(self.obstacle_centers)
            .any(|(rect, center)| {
                pivot.distance(center) <= self.obstacle_clearance && intersects(vehicle, rect)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle_at(x: f32, y: f32, heading: f32) -> OrientedRect {
        OrientedRect::from_pose(Vec2::new(x, y), CAR_LENGTH, CAR_WIDTH, heading)
    }

    #[test]
    fn test_vehicle_inside_lot_clears_wall() {
        let lot = Lot::new().unwrap();
        let vehicle = vehicle_at(0.0, 0.0, 0.0);
        assert!(!lot.hits_wall(&vehicle, Vec2::ZERO));
    }

    #[test]
    fn test_vehicle_poking_past_boundary_hits_wall() {
        let lot = Lot::new().unwrap();
        // Pivot inside, but the nose reaches past x = 7.5
        let vehicle = vehicle_at(6.0, -2.0, 0.0);
        assert!(lot.hits_wall(&vehicle, Vec2::new(6.0, -2.0)));
    }

    #[test]
    fn test_pivot_outside_interior_hits_wall() {
        let lot = Lot::new().unwrap();
        let vehicle = vehicle_at(8.5, 0.0, std::f32::consts::PI);
        assert!(lot.hits_wall(&vehicle, Vec2::new(8.5, 0.0)));
    }

    #[test]
    fn test_pivot_on_boundary_counts_as_out() {
        let lot = Lot::new().unwrap();
        let pivot = Vec2::new(lot.wall_bounds.x_max, 0.0);
        let vehicle = vehicle_at(pivot.x, pivot.y, std::f32::consts::PI);
        assert!(lot.hits_wall(&vehicle, pivot));
    }

    #[test]
    fn test_spawn_pose_clears_obstacles() {
        let lot = Lot::new().unwrap();
        let vehicle = vehicle_at(START_POSITION.x, START_POSITION.y, START_HEADING);
        assert!(!lot.hits_obstacles(&vehicle, START_POSITION));
        assert!(!lot.hits_wall(&vehicle, START_POSITION));
    }

    #[test]
    fn test_vehicle_overlapping_parked_car_detected() {
        let lot = Lot::new().unwrap();
        let vehicle = vehicle_at(-4.65, 0.0, 0.0);
        assert!(lot.hits_obstacles(&vehicle, Vec2::new(-4.65, 0.0)));
    }

    #[test]
    fn test_nose_reaching_into_parked_car_detected() {
        // Pivot well clear of the obstacle but the long nose crosses its
        // edge; the distance pre-check must not skip this pair
        let lot = Lot::new().unwrap();
        let vehicle = vehicle_at(-0.5, 0.0, 0.0);
        assert!(lot.hits_obstacles(&vehicle, Vec2::new(-0.5, 0.0)));
    }

    #[test]
    fn test_channel_is_drivable_heading_down() {
        // Nose-down between the two parked cars: the only way in
        let lot = Lot::new().unwrap();
        let heading = 3.0 * std::f32::consts::FRAC_PI_2;
        let vehicle = vehicle_at(0.0, 0.0, heading);
        assert!(!lot.hits_obstacles(&vehicle, Vec2::ZERO));
        assert!(!lot.hits_wall(&vehicle, Vec2::ZERO));
    }

    #[test]
    fn test_terminal_zone_is_strict() {
        let lot = Lot::new().unwrap();
        assert!(lot.terminal.contains(Vec2::new(0.1, -0.1)));
        assert!(!lot.terminal.contains(Vec2::new(0.25, 0.0)));
        assert!(!lot.terminal.contains(Vec2::new(0.0, -0.25)));
    }

    #[test]
    fn test_stage_two_zones_sit_on_the_fine_grid() {
        let lot = Lot::new().unwrap();
        for zone in &lot.stage_two {
            let cx = (zone.bounds.x_min + zone.bounds.x_max) / 2.0;
            let cy = (zone.bounds.y_min + zone.bounds.y_max) / 2.0;
            // Each center is a multiple of the fine grid pitch
            assert!((cx / FINE_GRID - (cx / FINE_GRID).round()).abs() < 1e-4);
            assert!((cy / FINE_GRID - (cy / FINE_GRID).round()).abs() < 1e-4);
        }
    }
}
