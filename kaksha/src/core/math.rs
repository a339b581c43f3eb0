//! Mathematical primitives.

use std::f32::consts::{PI, TAU};

/// Normalize angle to [-π, π].
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle;
    while a > PI {
        a -= TAU;
    }
    while a < -PI {
        a += TAU;
    }
    a
}

/// Convert millimeters to meters.
#[inline]
pub fn mm_to_m(mm: u16) -> f32 {
    mm as f32 / 1000.0
}
