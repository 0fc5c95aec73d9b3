//! # Aethelgard Common
//!
//! Common types shared by every Aethelgard crate.
//!
//! This crate provides the foundational vocabulary of the simulation:
//! - Ground-plane coordinates and facing math
//! - ID types (EntityId, LootId)
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;
pub mod ids;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
    pub use crate::ids::*;
}

pub use prelude::*;
