//! Zone teardown and rebuild.
//!
//! [`ZoneLifecycle::load_zone`] is the only way the population of the world
//! changes. It runs to completion between frames, so no AI or collision
//! pass ever spans two zones.

use aethelgard_common::LayoutError;
use tracing::info;

use crate::entity::{Enemy, Npc};
use crate::world::World;
use crate::zone::{Zone, ZoneCatalog};

/// Rebuilds the world from the zone layout tables.
#[derive(Debug, Clone)]
pub struct ZoneLifecycle {
    catalog: ZoneCatalog,
    loads: u64,
}

impl ZoneLifecycle {
    /// Builds and validates every zone layout.
    pub fn new() -> Result<Self, LayoutError> {
        Ok(Self::with_catalog(ZoneCatalog::new()?))
    }

    /// Uses an already built catalog.
    #[must_use]
    pub fn with_catalog(catalog: ZoneCatalog) -> Self {
        Self { catalog, loads: 0 }
    }

    /// The layout catalog.
    #[must_use]
    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    /// Number of completed zone loads.
    #[must_use]
    pub const fn loads(&self) -> u64 {
        self.loads
    }

    /// Replaces the world's contents with `zone`.
    ///
    /// In order: drop every enemy, NPC and collider; rebuild colliders and
    /// population from the layout; put the player on the zone spawn point;
    /// clear the target and the loot placeholders. Calling it twice for the
    /// same zone gives the same counts and positions both times.
    pub fn load_zone(&mut self, zone: Zone, world: &mut World) {
        let previous = world.zone;
        world.registry.clear();
        world.colliders.clear();

        let layout = self.catalog.layout(zone);
        world.colliders = layout.colliders.clone();
        for spawn in &layout.enemies {
            world.registry.spawn_enemy(Enemy::new(spawn.kind, spawn.position));
        }
        for spawn in &layout.npcs {
            let mut npc = Npc::new(spawn.name, spawn.dialogue_key, spawn.position);
            npc.facing = spawn.facing;
            world.registry.spawn_npc(npc);
        }

        world.zone = zone;
        world.player.respawn_at(layout.spawn);
        world.target.reset();
        world.loot.clear();
        self.loads += 1;

        info!(
            %zone,
            %previous,
            colliders = world.colliders.len(),
            enemies = world.registry.enemy_count(),
            npcs = world.registry.npc_count(),
            "Zone loaded"
        );
    }
}
