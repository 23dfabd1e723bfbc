//! Oriented rectangles and the separating-axis overlap test
//!
//! Every solid in the lot (the vehicle, the two parked cars, the wall frame
//! segments) is an oriented rectangle. [`intersects`] is the single source
//! of truth for positive collision decisions; distance pre-checks elsewhere
//! may only skip work, never report a hit on their own.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CAR_FRONT_EXTENT, CAR_LENGTH, CAR_REAR_EXTENT};
use crate::rotate_ccw;

/// Axis-aligned box, used for zone containment and wall-interior tests
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Aabb {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        Self { x_min, x_max, y_min, y_max }
    }

    /// Box of half-extent `hx`/`hy` around `center`
    pub fn around(center: Vec2, hx: f32, hy: f32) -> Self {
        Self::new(center.x - hx, center.x + hx, center.y - hy, center.y + hy)
    }

    /// Strict containment: a point on the boundary counts as outside
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x_min && p.x < self.x_max && p.y > self.y_min && p.y < self.y_max
    }

    pub fn is_degenerate(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }
}

/// A rectangle with arbitrary rotation, stored as four corners in order
/// (rear-left, front-left, front-right, rear-right in the local frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    verts: [Vec2; 4],
}

impl OrientedRect {
    /// Build a rectangle of `length` x `width` rotated counter-clockwise by
    /// `angle` about the origin, then translated to `center`.
    ///
    /// At the canonical vehicle length the footprint is not symmetric about
    /// the center: the local-x extents are `[CAR_REAR_EXTENT,
    /// CAR_FRONT_EXTENT]`, matching a body whose pivot sits near the rear
    /// axle. Every other rectangle uses the symmetric form.
    pub fn from_pose(center: Vec2, length: f32, width: f32, angle: f32) -> Self {
        let (x_min, x_max) = if length == CAR_LENGTH {
            (CAR_REAR_EXTENT, CAR_FRONT_EXTENT)
        } else {
            (-length / 2.0, length / 2.0)
        };
        let hw = width / 2.0;
        let local = [
            Vec2::new(x_min, hw),
            Vec2::new(x_max, hw),
            Vec2::new(x_max, -hw),
            Vec2::new(x_min, -hw),
        ];
        Self {
            verts: local.map(|v| rotate_ccw(v, angle) + center),
        }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2; 4] {
        &self.verts
    }

    /// Closed five-point polygon (first vertex repeated) for renderers
    pub fn closed_vertices(&self) -> [Vec2; 5] {
        [
            self.verts[0],
            self.verts[1],
            self.verts[2],
            self.verts[3],
            self.verts[0],
        ]
    }

    pub fn center(&self) -> Vec2 {
        (self.verts[0] + self.verts[1] + self.verts[2] + self.verts[3]) / 4.0
    }

    /// Largest distance from the centroid to any corner, a conservative
    /// bounding radius for distance pre-checks
    pub fn bounding_radius(&self) -> f32 {
        let c = self.center();
        self.verts
            .iter()
            .map(|v| v.distance(c))
            .fold(0.0, f32::max)
    }
}

/// Separating-axis overlap test for two convex quadrilaterals.
///
/// Projects both rectangles onto every edge normal of both; a gap on any
/// axis proves separation. Touching edges count as intersecting.
pub fn intersects(a: &OrientedRect, b: &OrientedRect) -> bool {
    for rect in [a, b] {
        let verts = rect.vertices();
        for i in 0..4 {
            let edge = verts[(i + 1) % 4] - verts[i];
            let axis = Vec2::new(-edge.y, edge.x);
            let (a_min, a_max) = project(a, axis);
            let (b_min, b_max) = project(b, axis);
            if a_max < b_min || b_max < a_min {
                return false;
            }
        }
    }
    true
}

fn project(rect: &OrientedRect, axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for v in rect.vertices() {
        let d = v.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}
