//! Visual placeholders mirroring the host's ground-loot list.
//!
//! The simulation never adds or removes loot itself. Each frame the mirror
//! is reconciled against the host list: new ids get a placeholder, vanished
//! ids lose theirs. Placeholders are also the click targets for pickups.

use ahash::AHashMap;
use aethelgard_common::{GroundPos, LootId};

use crate::external::GroundLoot;

/// Spin speed of a placeholder (radians per second).
const SPIN_RATE: f32 = 2.0;

/// A loot marker in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LootPlaceholder {
    /// Where the loot lies
    pub position: GroundPos,
    /// Current spin angle
    pub spin: f32,
}

/// Placeholders added and removed by one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LootDiff {
    /// New placeholders
    pub added: usize,
    /// Removed placeholders
    pub removed: usize,
}

/// Placeholders keyed by loot id.
#[derive(Debug, Clone, Default)]
pub struct LootMirror {
    placeholders: AHashMap<LootId, LootPlaceholder>,
}

impl LootMirror {
    /// Creates an empty mirror.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the mirror in line with `ground`.
    pub fn reconcile(&mut self, ground: &[GroundLoot]) -> LootDiff {
        let before = self.placeholders.len();
        self.placeholders
            .retain(|id, _| ground.iter().any(|loot| &loot.id == id));
        let removed = before - self.placeholders.len();

        let mut added = 0;
        for loot in ground {
            self.placeholders.entry(loot.id.clone()).or_insert_with(|| {
                added += 1;
                LootPlaceholder {
                    position: loot.position,
                    spin: 0.0,
                }
            });
        }

        LootDiff { added, removed }
    }

    /// Advances placeholder spin.
    pub fn animate(&mut self, delta: f32) {
        for placeholder in self.placeholders.values_mut() {
            placeholder.spin = (placeholder.spin + delta * SPIN_RATE) % std::f32::consts::TAU;
        }
    }

    /// Nearest placeholder within `radius` of `pos`.
    #[must_use]
    pub fn pick(&self, pos: GroundPos, radius: f32) -> Option<(&LootId, &LootPlaceholder)> {
        self.placeholders
            .iter()
            .map(|(id, p)| (id, p, p.position.distance(pos)))
            .filter(|(_, _, dist)| *dist <= radius)
            .min_by(|a, b| a.2.total_cmp(&b.2).then_with(|| a.0.cmp(b.0)))
            .map(|(id, p, _)| (id, p))
    }

    /// Looks up a placeholder.
    #[must_use]
    pub fn get(&self, id: &LootId) -> Option<&LootPlaceholder> {
        self.placeholders.get(id)
    }

    /// Number of placeholders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.placeholders.len()
    }

    /// Returns true if there are no placeholders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placeholders.is_empty()
    }

    /// Removes every placeholder.
    pub fn clear(&mut self) {
        self.placeholders.clear();
    }
}
