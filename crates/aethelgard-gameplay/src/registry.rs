//! Authoritative list of live enemies and NPCs in the active zone.
//!
//! Only the frame scheduler writes to the registry. Enemy HP lives here and
//! nowhere else; player HP lives in the host store.

use aethelgard_common::{EntityId, GroundPos};

use crate::entity::{Enemy, EnemyKind, Npc};

/// Live enemies and NPCs.
///
/// Entries are kept in spawn order so every per-frame pass visits enemies in
/// the same sequence and seeded rolls stay reproducible.
#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    enemies: Vec<Enemy>,
    npcs: Vec<Npc>,
}

impl EntityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every enemy and NPC.
    pub fn clear(&mut self) {
        self.enemies.clear();
        self.npcs.clear();
    }

    /// Adds an enemy and returns its id.
    pub fn spawn_enemy(&mut self, enemy: Enemy) -> EntityId {
        let id = enemy.id;
        self.enemies.push(enemy);
        id
    }

    /// Adds an NPC and returns its id.
    pub fn spawn_npc(&mut self, npc: Npc) -> EntityId {
        let id = npc.id;
        self.npcs.push(npc);
        id
    }

    /// Removes an enemy, returning it if it was present.
    pub fn despawn_enemy(&mut self, id: EntityId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Looks up an enemy.
    #[must_use]
    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// Looks up an enemy mutably.
    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Looks up an NPC.
    #[must_use]
    pub fn npc(&self, id: EntityId) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.id == id)
    }

    /// All live enemies.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// All live enemies, mutably.
    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// All NPCs.
    #[must_use]
    pub fn npcs(&self) -> &[Npc] {
        &self.npcs
    }

    /// Number of live enemies.
    #[must_use]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// Number of NPCs.
    #[must_use]
    pub fn npc_count(&self) -> usize {
        self.npcs.len()
    }

    /// Number of live enemies of one kind.
    #[must_use]
    pub fn count_kind(&self, kind: EnemyKind) -> usize {
        self.enemies.iter().filter(|e| e.kind == kind).count()
    }

    /// Nearest enemy within `radius` of `pos`.
    #[must_use]
    pub fn nearest_enemy(&self, pos: GroundPos, radius: f32) -> Option<&Enemy> {
        nearest(&self.enemies, pos, radius, |e| e.position)
    }

    /// Nearest NPC within `radius` of `pos`.
    #[must_use]
    pub fn nearest_npc(&self, pos: GroundPos, radius: f32) -> Option<&Npc> {
        nearest(&self.npcs, pos, radius, |n| n.position)
    }
}

fn nearest<T>(
    items: &[T],
    pos: GroundPos,
    radius: f32,
    position: impl Fn(&T) -> GroundPos,
) -> Option<&T> {
    items
        .iter()
        .map(|item| (item, position(item).distance(pos)))
        .filter(|(_, dist)| *dist <= radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(item, _)| item)
}
