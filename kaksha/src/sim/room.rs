//! Axis-aligned box geometry for ray casting.

use serde::{Deserialize, Serialize};

use crate::core::Point3D;

/// Direction components smaller than this are treated as parallel.
const PARALLEL_EPSILON: f32 = 1e-9;

/// An axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner (m)
    pub min: Point3D,
    /// Maximum corner (m)
    pub max: Point3D,
}

impl Aabb {
    /// Create a box from two corners.
    pub fn new(min: Point3D, max: Point3D) -> Self {
        Self { min, max }
    }

    /// True if `p` is inside or on the boundary.
    pub fn contains(&self, p: Point3D) -> bool {
        (0..3).all(|a| axis(&p, a) >= axis(&self.min, a) && axis(&p, a) <= axis(&self.max, a))
    }

    /// Ray parameter where a ray starting inside the box leaves it.
    pub fn exit(&self, origin: Point3D, dir: Point3D) -> Option<f32> {
        let mut t_exit = f32::INFINITY;
        for a in 0..3 {
            let d = axis(&dir, a);
            let o = axis(&origin, a);
            let t = if d > PARALLEL_EPSILON {
                (axis(&self.max, a) - o) / d
            } else if d < -PARALLEL_EPSILON {
                (axis(&self.min, a) - o) / d
            } else {
                continue;
            };
            t_exit = t_exit.min(t);
        }
        (t_exit.is_finite() && t_exit > 0.0).then_some(t_exit)
    }

    /// Ray parameter where a ray starting outside the box enters it.
    pub fn entry(&self, origin: Point3D, dir: Point3D) -> Option<f32> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;
        for a in 0..3 {
            let d = axis(&dir, a);
            let o = axis(&origin, a);
            let (lo, hi) = (axis(&self.min, a), axis(&self.max, a));
            if d.abs() <= PARALLEL_EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let (t1, t2) = ((lo - o) / d, (hi - o) / d);
            t_near = t_near.max(t1.min(t2));
            t_far = t_far.min(t1.max(t2));
        }
        (t_near <= t_far && t_near > 0.0).then_some(t_near)
    }
}

#[inline]
fn axis(p: &Point3D, a: usize) -> f32 {
    match a {
        0 => p.x,
        1 => p.y,
        _ => p.z,
    }
}

/// A closed box room with box obstacles inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Walls, floor and ceiling
    #[serde(default = "default_bounds")]
    pub bounds: Aabb,

    /// Solid boxes standing in the room
    #[serde(default = "default_obstacles")]
    pub obstacles: Vec<Aabb>,
}

fn default_bounds() -> Aabb {
    Aabb::new(Point3D::new(-3.0, -3.2, -1.0), Point3D::new(3.0, 3.0, 1.8))
}

fn default_obstacles() -> Vec<Aabb> {
    vec![
        // Low table in front of the default camera
        Aabb::new(Point3D::new(-0.6, -1.6, -1.0), Point3D::new(0.6, -1.0, -0.25)),
        // Cabinet to the left
        Aabb::new(Point3D::new(-2.2, -2.0, -1.0), Point3D::new(-1.6, -1.2, 0.8)),
    ]
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            bounds: default_bounds(),
            obstacles: default_obstacles(),
        }
    }
}

impl RoomConfig {
    /// Nearest surface hit along `origin + t * dir`, if any.
    pub fn ray_cast(&self, origin: Point3D, dir: Point3D) -> Option<f32> {
        let walls = if self.bounds.contains(origin) {
            self.bounds.exit(origin, dir)
        } else {
            None
        };
        self.obstacles
            .iter()
            .filter_map(|o| o.entry(origin, dir))
            .chain(walls)
            .min_by(f32::total_cmp)
    }
}
