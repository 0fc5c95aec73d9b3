//! Player locomotion against static geometry.
//!
//! Movement intent is split into an X delta and a Z delta. Each axis is
//! tested and applied on its own against the current value of the other
//! axis, X first. Running diagonally into a wall therefore slides along it
//! instead of stopping dead. If both axes are blocked the player stays put.
//!
//! Only the player goes through here. Enemies chase in a straight line and
//! ignore colliders so they always reach melee range.

use aethelgard_common::{ease_angle, facing_toward, GroundPos, Vec2};

use crate::collision::CollisionQuery;
use crate::config::SimConfig;
use crate::entity::{Locomotion, Player};
use crate::input::MoveIntent;

/// Result of one per-axis move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Position after resolution
    pub position: GroundPos,
    /// Whether the X component was rejected
    pub blocked_x: bool,
    /// Whether the Z component was rejected
    pub blocked_z: bool,
}

impl MoveOutcome {
    /// Returns true if the position changed.
    #[must_use]
    pub fn moved(&self, start: GroundPos) -> bool {
        self.position != start
    }
}

/// Resolves `delta` from `start`, one axis at a time.
///
/// A zero component is never tested and never reported as blocked.
pub fn resolve_per_axis<C: CollisionQuery + ?Sized>(
    start: GroundPos,
    delta: Vec2,
    radius: f32,
    world: &C,
) -> MoveOutcome {
    let mut position = start;
    let mut blocked_x = false;
    let mut blocked_z = false;

    if delta.x != 0.0 {
        let next = GroundPos::new(position.x + delta.x, position.y);
        if world.is_blocked(next, radius) {
            blocked_x = true;
        } else {
            position = next;
        }
    }

    if delta.y != 0.0 {
        let next = GroundPos::new(position.x, position.y + delta.y);
        if world.is_blocked(next, radius) {
            blocked_z = true;
        } else {
            position = next;
        }
    }

    MoveOutcome {
        position,
        blocked_x,
        blocked_z,
    }
}

/// Applies held-movement intent to the player each frame.
#[derive(Debug, Clone, Copy)]
pub struct MovementEngine {
    speed: f32,
    radius: f32,
    facing_smoothing: f32,
}

impl MovementEngine {
    /// Creates a movement engine from the simulation tuning.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            speed: config.player_speed,
            radius: config.player_radius,
            facing_smoothing: config.facing_smoothing,
        }
    }

    /// Footprint radius used for collision.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Moves the player for one frame.
    ///
    /// Facing eases toward the intended direction of travel even when the
    /// move is blocked. Returns true if the player's position changed.
    pub fn step<C: CollisionQuery + ?Sized>(
        &self,
        player: &mut Player,
        intent: MoveIntent,
        dt: f32,
        world: &C,
    ) -> bool {
        let direction = intent.direction();
        if direction == Vec2::ZERO {
            player.locomotion = Locomotion::Idle;
            return false;
        }
        player.locomotion = Locomotion::Run;

        let delta = direction * (self.speed * dt);
        let start = player.position;
        let outcome = resolve_per_axis(start, delta, self.radius, world);
        player.position = outcome.position;
        player.facing = ease_angle(
            player.facing,
            facing_toward(direction),
            self.facing_smoothing,
        );

        outcome.moved(start)
    }
}
