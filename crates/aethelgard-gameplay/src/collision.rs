//! Static collision geometry for the active zone.
//!
//! Colliders are axis-aligned rectangles on the ground plane. They are built
//! once per zone load and never change while the zone is active. The only
//! moving body tested against them is the player's circular footprint.

use aethelgard_common::{GroundPos, LayoutError};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle of impassable ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    /// Minimum X coordinate
    pub min_x: f32,
    /// Maximum X coordinate
    pub max_x: f32,
    /// Minimum Z coordinate
    pub min_z: f32,
    /// Maximum Z coordinate
    pub max_z: f32,
}

impl Collider {
    /// Creates a collider from its bounds.
    #[must_use]
    pub const fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// Creates a collider from a center and full width/depth.
    #[must_use]
    pub fn from_center(center: GroundPos, width: f32, depth: f32) -> Self {
        Self {
            min_x: center.x - width / 2.0,
            max_x: center.x + width / 2.0,
            min_z: center.y - depth / 2.0,
            max_z: center.y + depth / 2.0,
        }
    }

    /// Returns the center of the rectangle.
    #[must_use]
    pub fn center(&self) -> GroundPos {
        GroundPos::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Width along X.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    /// Depth along Z.
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    /// Checks a circle of `radius` at `pos` against this rectangle.
    ///
    /// The rectangle is grown by `radius` on every side and the circle
    /// center is tested against it. Touching edges do not overlap.
    #[must_use]
    pub fn overlaps_circle(&self, pos: GroundPos, radius: f32) -> bool {
        pos.x + radius > self.min_x
            && pos.x - radius < self.max_x
            && pos.y + radius > self.min_z
            && pos.y - radius < self.max_z
    }

    /// Checks if the point lies strictly inside the rectangle.
    #[must_use]
    pub fn contains(&self, pos: GroundPos) -> bool {
        self.overlaps_circle(pos, 0.0)
    }

    fn validate(&self, zone: &'static str, index: usize) -> Result<(), LayoutError> {
        let bounds = [self.min_x, self.max_x, self.min_z, self.max_z];
        if bounds.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::NonFinite {
                zone,
                what: format!("collider {index}"),
            });
        }
        if self.min_x > self.max_x || self.min_z > self.max_z {
            return Err(LayoutError::InvertedCollider { zone, index });
        }
        Ok(())
    }
}

/// Collision query interface for the movement engine.
///
/// Abstracts the static geometry so movement can be tested against simple
/// fixtures.
pub trait CollisionQuery {
    /// Returns true if a circle of `radius` at `pos` overlaps any geometry.
    fn is_blocked(&self, pos: GroundPos, radius: f32) -> bool;
}

/// The full collider set of the active zone.
///
/// A linear scan is used; zones hold tens of colliders and there is a single
/// moving body, so no spatial partitioning is needed. An empty index blocks
/// nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionIndex {
    colliders: Vec<Collider>,
}

impl CollisionIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from a validated collider list.
    pub fn build(zone: &'static str, colliders: Vec<Collider>) -> Result<Self, LayoutError> {
        for (index, collider) in colliders.iter().enumerate() {
            collider.validate(zone, index)?;
        }
        Ok(Self { colliders })
    }

    /// Number of colliders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Returns true when the index holds no colliders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// All colliders, in build order.
    #[must_use]
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Removes every collider.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }
}

impl CollisionQuery for CollisionIndex {
    fn is_blocked(&self, pos: GroundPos, radius: f32) -> bool {
        self.colliders
            .iter()
            .any(|collider| collider.overlaps_circle(pos, radius))
    }
}

impl CollisionQuery for [Collider] {
    fn is_blocked(&self, pos: GroundPos, radius: f32) -> bool {
        self.iter().any(|collider| collider.overlaps_circle(pos, radius))
    }
}
