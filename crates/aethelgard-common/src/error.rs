//! Error types for Aethelgard.
//!
//! Frame-time problems (no target, out of range, cooldown) are never errors.
//! Everything here is raised at construction or load time.

use thiserror::Error;

/// Top-level error type for Aethelgard operations.
#[derive(Debug, Error)]
pub enum AethelgardError {
    /// Zone lookup errors
    #[error("Zone error: {0}")]
    Zone(#[from] ZoneError),

    /// Zone layout table errors
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Zone identification errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoneError {
    /// No zone with this name exists
    #[error("unknown zone: {0}")]
    Unknown(String),
}

/// A per-zone layout table that fails validation.
///
/// These indicate a content defect and are raised while the layout catalog
/// is built, never while frames are running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Collider has min > max on some axis
    #[error("{zone}: collider {index} is inverted")]
    InvertedCollider {
        /// Zone name
        zone: &'static str,
        /// Index in the collider list
        index: usize,
    },

    /// A coordinate is NaN or infinite
    #[error("{zone}: non-finite coordinate in {what}")]
    NonFinite {
        /// Zone name
        zone: &'static str,
        /// Which table entry
        what: String,
    },

    /// The player would spawn inside static geometry
    #[error("{zone}: spawn point ({x}, {z}) is blocked")]
    SpawnBlocked {
        /// Zone name
        zone: &'static str,
        /// Spawn x
        x: f32,
        /// Spawn z
        z: f32,
    },

    /// Scatter placement could not find a free position
    #[error("{zone}: could not place {what} after {attempts} attempts")]
    PlacementExhausted {
        /// Zone name
        zone: &'static str,
        /// What was being placed
        what: &'static str,
        /// Attempts made
        attempts: u32,
    },
}

/// Invalid tuning values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A value must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NotPositive {
        /// Field name
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// A damage band has min > max
    #[error("{field} band is inverted ({min} > {max})")]
    InvertedBand {
        /// Field name
        field: &'static str,
        /// Lowest roll
        min: u32,
        /// Highest roll
        max: u32,
    },

    /// A continuous range has min > max
    #[error("{field} range is inverted ({min} > {max})")]
    InvertedRange {
        /// Field name
        field: &'static str,
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },

    /// A queue capacity of zero
    #[error("{0} capacity must be at least 1")]
    ZeroCapacity(&'static str),
}

/// Result type alias for Aethelgard operations.
pub type AethelgardResult<T> = Result<T, AethelgardError>;
