//! Pointer click resolution.
//!
//! A click arrives already projected onto the ground plane. It is tested in
//! priority order: a reachable loot placeholder, then the nearest enemy,
//! then the nearest NPC. A click that hits nothing clears the target.

use aethelgard_common::GroundPos;
use tracing::debug;

use crate::config::SimConfig;
use crate::events::{EventBus, SimEvent};
use crate::world::World;

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Asked the host to pick up loot
    Pickup,
    /// Selected an enemy
    SelectedEnemy,
    /// Selected an NPC; `interacted` if it was close enough to talk to
    SelectedNpc {
        /// Whether an interaction event was emitted
        interacted: bool,
    },
    /// Hit nothing
    Cleared,
}

/// Resolves clicks against the live world.
#[derive(Debug, Clone, Copy)]
pub struct ClickResolver {
    pick_radius: f32,
    interaction_radius: f32,
}

impl ClickResolver {
    /// Creates a resolver from the simulation tuning.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            pick_radius: config.pick_radius,
            interaction_radius: config.interaction_radius,
        }
    }

    /// Resolves one click at `pos`.
    pub fn resolve(
        &self,
        pos: GroundPos,
        world: &mut World,
        events: &mut EventBus,
    ) -> ClickOutcome {
        let player = world.player.position;

        // Loot out of reach falls through to entity picking.
        if let Some((id, _)) = world
            .loot
            .pick(pos, self.pick_radius)
            .filter(|(_, p)| p.position.distance(player) <= self.interaction_radius)
        {
            debug!(%id, "Loot pickup requested");
            events.publish(SimEvent::PickupLoot { id: id.clone() });
            return ClickOutcome::Pickup;
        }

        if let Some(enemy) = world.registry.nearest_enemy(pos, self.pick_radius) {
            events.publish(world.target.select_enemy(enemy));
            return ClickOutcome::SelectedEnemy;
        }

        if let Some(npc) = world.registry.nearest_npc(pos, self.pick_radius) {
            events.publish(world.target.select_npc(npc));
            let interacted = npc.position.distance(player) <= self.interaction_radius;
            if interacted {
                debug!(npc = %npc.name, "NPC interaction");
                events.publish(SimEvent::Interaction {
                    npc: npc.name.clone(),
                    dialogue_key: npc.dialogue_key.clone(),
                });
            }
            return ClickOutcome::SelectedNpc { interacted };
        }

        if let Some(event) = world.target.clear() {
            events.publish(event);
        }
        ClickOutcome::Cleared
    }
}
