//! Ground-plane coordinates and facing math.
//!
//! Every body in the simulation stands on the ground plane, so only the world
//! `x` and `z` axes matter. Positions are plain [`glam::Vec2`] values whose
//! `y` component carries world `z`.

use std::f32::consts::{PI, TAU};

pub use glam::Vec2;

/// A point on the ground plane (`y` component = world `z`).
pub type GroundPos = Vec2;

/// Builds a ground position from world `x` and `z`.
#[must_use]
pub const fn ground(x: f32, z: f32) -> GroundPos {
    Vec2::new(x, z)
}

/// Facing angle (radians about the vertical axis) for travel along `direction`.
///
/// Uses `atan2(dx, dz)`, so a facing of zero looks down +z.
#[must_use]
pub fn facing_toward(direction: Vec2) -> f32 {
    direction.x.atan2(direction.y)
}

/// Wraps an angle into `(-PI, PI]`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Eases `current` toward `target` by `factor` along the shortest arc.
#[must_use]
pub fn ease_angle(current: f32, target: f32, factor: f32) -> f32 {
    let diff = wrap_angle(target - current);
    wrap_angle(current + diff * factor.clamp(0.0, 1.0))
}

/// Returns true if both components are finite.
#[must_use]
pub fn is_finite(pos: GroundPos) -> bool {
    pos.x.is_finite() && pos.y.is_finite()
}
