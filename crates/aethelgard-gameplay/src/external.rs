//! Read-only snapshot of the host-owned game state.
//!
//! The host store is the single source of truth for player health and mana,
//! the ground-loot list and the freeze flags. The simulation reads a fresh
//! snapshot every frame and never writes back except through events.

use aethelgard_common::{GroundPos, LootId};
use serde::{Deserialize, Serialize};

use crate::freeze::FreezeFlags;

/// Player stats as the host last reported them.
///
/// There are no setters; changing these values means emitting an event and
/// waiting for the next snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerVitals {
    health: u32,
    max_health: u32,
    mana: u32,
    max_mana: u32,
    power_shots: bool,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::new(100, 100, 50, 50, false)
    }
}

impl PlayerVitals {
    /// Creates a vitals view.
    #[must_use]
    pub const fn new(
        health: u32,
        max_health: u32,
        mana: u32,
        max_mana: u32,
        power_shots: bool,
    ) -> Self {
        Self {
            health,
            max_health,
            mana,
            max_mana,
            power_shots,
        }
    }

    /// Current health.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Current mana.
    #[must_use]
    pub const fn mana(&self) -> u32 {
        self.mana
    }

    /// Maximum mana.
    #[must_use]
    pub const fn max_mana(&self) -> u32 {
        self.max_mana
    }

    /// Whether the power-shot damage bonus is active.
    #[must_use]
    pub const fn power_shots(&self) -> bool {
        self.power_shots
    }
}

/// What a ground pickup holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootKind {
    /// A pile of gold
    Gold {
        /// Coins
        amount: u32,
    },
    /// A named item
    Item {
        /// Item name
        name: String,
    },
}

/// One entry of the host's ground-loot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundLoot {
    /// Unique id
    pub id: LootId,
    /// Contents
    pub kind: LootKind,
    /// Where it lies
    pub position: GroundPos,
}

/// Everything the simulation reads from the host each frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalState {
    /// Freeze flags
    pub flags: FreezeFlags,
    /// Player stats
    pub vitals: PlayerVitals,
    /// Ground loot list
    pub ground_loot: Vec<GroundLoot>,
}
