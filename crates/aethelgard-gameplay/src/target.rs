//! The player's current target.
//!
//! The selection stores only the entity id. The `{name, hp, max, kind}` view
//! sent to the host is always rebuilt from the live entity, so it can never
//! show HP from before the last hit.

use aethelgard_common::EntityId;
use serde::{Deserialize, Serialize};

use crate::entity::{Enemy, Npc};
use crate::events::SimEvent;
use crate::registry::EntityRegistry;

/// HP shown for NPC targets.
const NPC_DISPLAY_HP: i32 = 100;

/// What kind of entity is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    /// A combat enemy
    Enemy,
    /// A non-combat NPC
    Npc,
}

/// Target view sent to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetInfo {
    /// Display name
    pub name: String,
    /// Current HP
    pub current_hp: i32,
    /// Maximum HP
    pub max_hp: i32,
    /// Entity kind
    pub kind: TargetKind,
}

impl TargetInfo {
    /// View of a live enemy.
    #[must_use]
    pub fn enemy(enemy: &Enemy) -> Self {
        Self {
            name: enemy.kind.name().to_string(),
            current_hp: enemy.hp,
            max_hp: enemy.max_hp,
            kind: TargetKind::Enemy,
        }
    }

    /// View of an NPC.
    #[must_use]
    pub fn npc(npc: &Npc) -> Self {
        Self {
            name: npc.name.clone(),
            current_hp: NPC_DISPLAY_HP,
            max_hp: NPC_DISPLAY_HP,
            kind: TargetKind::Npc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Selected {
    id: EntityId,
    kind: TargetKind,
    shown_hp: i32,
}

/// Current target selection.
#[derive(Debug, Clone, Default)]
pub struct TargetSelection {
    selected: Option<Selected>,
}

impl TargetSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected entity id, if any.
    #[must_use]
    pub fn entity(&self) -> Option<EntityId> {
        self.selected.map(|s| s.id)
    }

    /// Selected enemy id, if the target is an enemy.
    #[must_use]
    pub fn enemy(&self) -> Option<EntityId> {
        self.selected
            .filter(|s| s.kind == TargetKind::Enemy)
            .map(|s| s.id)
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }

    /// Selects an enemy and returns the change event.
    pub fn select_enemy(&mut self, enemy: &Enemy) -> SimEvent {
        self.selected = Some(Selected {
            id: enemy.id,
            kind: TargetKind::Enemy,
            shown_hp: enemy.hp,
        });
        SimEvent::TargetChanged(Some(TargetInfo::enemy(enemy)))
    }

    /// Selects an NPC and returns the change event.
    pub fn select_npc(&mut self, npc: &Npc) -> SimEvent {
        self.selected = Some(Selected {
            id: npc.id,
            kind: TargetKind::Npc,
            shown_hp: NPC_DISPLAY_HP,
        });
        SimEvent::TargetChanged(Some(TargetInfo::npc(npc)))
    }

    /// Re-derives the target view from `enemy` after its HP changed.
    ///
    /// Returns `None` if `enemy` is not the selected target.
    pub fn refresh_enemy(&mut self, enemy: &Enemy) -> Option<SimEvent> {
        let selected = self.selected.as_mut()?;
        if selected.id != enemy.id {
            return None;
        }
        selected.shown_hp = enemy.hp;
        Some(SimEvent::TargetChanged(Some(TargetInfo::enemy(enemy))))
    }

    /// Clears the selection. Returns the change event if something was
    /// selected.
    pub fn clear(&mut self) -> Option<SimEvent> {
        self.selected
            .take()
            .map(|_| SimEvent::TargetChanged(None))
    }

    /// Drops the selection without producing an event.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    /// Checks the selection against the live registry.
    ///
    /// A target that no longer resolves is cleared. An enemy whose HP moved
    /// since the last emitted view is refreshed.
    pub fn revalidate(&mut self, registry: &EntityRegistry) -> Option<SimEvent> {
        let selected = self.selected?;
        match selected.kind {
            TargetKind::Enemy => match registry.enemy(selected.id) {
                Some(enemy) if enemy.hp != selected.shown_hp => self.refresh_enemy(enemy),
                Some(_) => None,
                None => self.clear(),
            },
            TargetKind::Npc => {
                if registry.npc(selected.id).is_some() {
                    None
                } else {
                    self.clear()
                }
            }
        }
    }
}
