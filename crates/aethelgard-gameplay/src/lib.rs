//! # Aethelgard Gameplay
//!
//! The per-frame simulation core of Aethelgard.
//!
//! This crate owns everything that must stay consistent from one frame to
//! the next:
//! - Static collision geometry and per-axis player movement
//! - Entity registry and zone layouts with their load lifecycle
//! - Input mailbox, sampler and single-slot action trigger
//! - Combat resolution and target selection
//! - Enemy AI (wander, chase, autoattack)
//! - Ground-loot mirror and freeze handling
//! - The frame scheduler and its outbound event batch
//!
//! Player health, mana, gold, quests and loot are owned by the host. The
//! simulation reads them through [`ExternalState`] and reports changes as
//! [`SimEvent`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod ai;
pub mod collision;
pub mod combat;
pub mod config;
pub mod entity;
pub mod events;
pub mod external;
pub mod freeze;
pub mod input;
pub mod lifecycle;
pub mod loot;
pub mod movement;
pub mod pointer;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod target;
pub mod world;
pub mod zone;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::ai::*;
    pub use crate::collision::*;
    pub use crate::combat::*;
    pub use crate::config::*;
    pub use crate::entity::*;
    pub use crate::events::*;
    pub use crate::external::*;
    pub use crate::freeze::*;
    pub use crate::input::*;
    pub use crate::lifecycle::*;
    pub use crate::loot::*;
    pub use crate::movement::*;
    pub use crate::pointer::*;
    pub use crate::registry::*;
    pub use crate::render::*;
    pub use crate::scheduler::*;
    pub use crate::target::*;
    pub use crate::world::*;
    pub use crate::zone::*;
}

pub use prelude::*;
