// Capsule geometry
//
// A capsule is a segment swept by a sphere. Attack volumes and the passive
// hurt volume are both capsules, and every hit/no-hit decision reduces to the
// sign of `capsule_distance`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::math::clamp;

/// Squared lengths and denominators below this are treated as zero
const EPSILON: f32 = 1e-8;

/// A line segment with a radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capsule {
    pub start: Vec3,
    pub end: Vec3,
    pub radius: f32,
}

impl Capsule {
    pub fn new(start: Vec3, end: Vec3, radius: f32) -> Self {
        Self { start, end, radius }
    }

    /// Distance between the two capsule surfaces, floored at zero
    pub fn distance(&self, other: &Capsule) -> f32 {
        capsule_distance(self, other)
    }

    /// True when the capsules touch or interpenetrate
    pub fn overlaps(&self, other: &Capsule) -> bool {
        self.distance(other) <= 0.0
    }
}

/// Closest points between segments `p1-q1` and `p2-q2`
///
/// Returns `(c1, c2)` with `c1` on the first segment and `c2` on the second.
/// Zero-length segments degrade to point queries and parallel segments pick
/// the parameter `s = 0` on the first segment before clamping the second.
pub fn closest_points_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    if a <= EPSILON && e <= EPSILON {
        return (p1, p2);
    }

    let (s, t) = if a <= EPSILON {
        // First segment is a point
        (0.0, clamp(f / e, 0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e <= EPSILON {
            // Second segment is a point
            (clamp(-c / a, 0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;

            let mut s = if denom > EPSILON {
                clamp((b * f - c * e) / denom, 0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;

            if t < 0.0 {
                t = 0.0;
                s = clamp(-c / a, 0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = clamp((b - c) / a, 0.0, 1.0);
            }
            (s, t)
        }
    };

    (p1 + d1 * s, p2 + d2 * t)
}

/// Surface distance between two capsules: closest segment distance minus both
/// radii, never negative
pub fn capsule_distance(a: &Capsule, b: &Capsule) -> f32 {
    let (c1, c2) = closest_points_segments(a.start, a.end, b.start, b.end);
    (c1.distance(c2) - (a.radius + b.radius)).max(0.0)
}
