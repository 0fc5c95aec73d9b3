//! Mutable state of the active zone.

use crate::collision::CollisionIndex;
use crate::entity::Player;
use crate::loot::LootMirror;
use crate::registry::EntityRegistry;
use crate::target::TargetSelection;
use crate::zone::Zone;

/// Everything the frame scheduler mutates.
///
/// Only [`crate::lifecycle::ZoneLifecycle::load_zone`] changes the zone,
/// colliders or population; the per-frame steps only move, damage and
/// despawn what is already there.
#[derive(Debug, Clone)]
pub struct World {
    /// Active zone
    pub zone: Zone,
    /// Static geometry of the active zone
    pub colliders: CollisionIndex,
    /// Live enemies and NPCs
    pub registry: EntityRegistry,
    /// The player body
    pub player: Player,
    /// Current target
    pub target: TargetSelection,
    /// Ground-loot placeholders
    pub loot: LootMirror,
}

impl World {
    /// Creates an unpopulated world. Call `load_zone` before the first frame.
    #[must_use]
    pub fn empty(zone: Zone) -> Self {
        Self {
            zone,
            colliders: CollisionIndex::new(),
            registry: EntityRegistry::new(),
            player: Player::new(aethelgard_common::Vec2::ZERO),
            target: TargetSelection::new(),
            loot: LootMirror::new(),
        }
    }
}
