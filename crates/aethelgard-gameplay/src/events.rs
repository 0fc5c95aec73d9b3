//! Outbound events for the host game-state store.
//!
//! Events are queued in emission order on a bounded channel and handed to
//! the host as one batch per frame. The host applies them to its own state;
//! the effects show up in the [`crate::external::ExternalState`] it passes to
//! a later frame, never the same one.

use aethelgard_common::{GroundPos, LootId};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entity::EnemyKind;
use crate::target::TargetInfo;

/// Something the simulation tells the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// The player's position changed this frame
    PlayerMoved {
        /// World X
        x: f32,
        /// World Z
        z: f32,
    },
    /// The selected target changed or its HP was refreshed
    TargetChanged(Option<TargetInfo>),
    /// The player hit an enemy
    DamageDealt {
        /// Damage rolled
        amount: u32,
    },
    /// An enemy hit the player
    DamageTaken {
        /// Damage amount
        amount: u32,
        /// Attacker species
        source: EnemyKind,
    },
    /// An enemy died and was removed
    EnemyDefeated {
        /// Species
        kind: EnemyKind,
        /// Death position X
        x: f32,
        /// Death position Z
        z: f32,
    },
    /// The player clicked a reachable loot pickup
    PickupLoot {
        /// Loot id from the host's ground list
        id: LootId,
    },
    /// The player clicked an NPC within reach
    Interaction {
        /// NPC display name
        npc: String,
        /// Dialogue key
        dialogue_key: String,
    },
    /// The skill spent mana
    UseMana {
        /// Mana spent
        amount: u32,
    },
    /// The skill was used
    AbilityUsed,
}

impl SimEvent {
    /// Builds a movement event from a ground position.
    #[must_use]
    pub fn moved(pos: GroundPos) -> Self {
        Self::PlayerMoved { x: pos.x, z: pos.y }
    }
}

/// Bounded outbound event queue.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<SimEvent>,
    receiver: Receiver<SimEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Creates an event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self {
            sender,
            receiver,
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    /// Queues an event. Returns false if the queue was full and the event
    /// was dropped.
    pub fn publish(&mut self, event: SimEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event) | TrySendError::Disconnected(event)) => {
                self.dropped += 1;
                warn!(?event, dropped = self.dropped, "Event queue full, dropping event");
                false
            }
        }
    }

    /// Takes every queued event, oldest first.
    pub fn drain(&self) -> Vec<SimEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of queued events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Queue capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total events dropped because the queue was full.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }
}
