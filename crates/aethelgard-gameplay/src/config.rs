//! Simulation tuning.
//!
//! Every gameplay constant the frame loop depends on lives here so a host
//! can override it from its config file. Enemy statistics are not in here;
//! they belong to the per-kind behavior table in [`crate::entity`].

use aethelgard_common::ConfigError;
use serde::{Deserialize, Serialize};

/// Default RNG seed for damage rolls and wander targets.
const DEFAULT_SEED: u64 = 0x00AE_7E16;

/// Tunable simulation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Player locomotion ===
    /// Player movement speed (world units per second, per held axis)
    pub player_speed: f32,
    /// Radius of the player's circular collision footprint
    pub player_radius: f32,
    /// Fraction of the remaining turn applied to facing each frame
    pub facing_smoothing: f32,

    // === Player attack ===
    /// Maximum player-to-enemy distance for a basic attack
    pub attack_range: f32,
    /// Minimum seconds between two resolved attacks
    pub attack_cooldown: f32,
    /// Lowest basic attack damage roll
    pub attack_damage_min: u32,
    /// Highest basic attack damage roll (inclusive)
    pub attack_damage_max: u32,
    /// Flat bonus added to any roll while power shots are active
    pub power_shot_bonus: u32,

    // === Skill ===
    /// Mana consumed by one skill use
    pub skill_cost: u32,
    /// Lowest skill damage roll
    pub skill_damage_min: u32,
    /// Highest skill damage roll (inclusive)
    pub skill_damage_max: u32,
    /// Maximum player-to-enemy distance for the skill
    pub skill_range: f32,
    /// Minimum seconds between two skill uses
    pub skill_cooldown: f32,

    // === Pointer ===
    /// Max player distance for loot pickup and NPC interaction
    pub interaction_radius: f32,
    /// Radius around an entity or loot placeholder that counts as a click hit
    pub pick_radius: f32,

    // === Enemy wandering ===
    /// Radius around the spawn origin wander targets are drawn from
    pub wander_radius: f32,
    /// Distance below which a wander target counts as reached
    pub wander_epsilon: f32,
    /// Speed while wandering
    pub wander_speed: f32,

    // === Camera ===
    /// Initial camera zoom
    pub zoom_default: f32,
    /// Lowest zoom
    pub zoom_min: f32,
    /// Highest zoom
    pub zoom_max: f32,
    /// Zoom change per scroll unit
    pub zoom_per_scroll: f32,

    // === Mailboxes ===
    /// Capacity of the inbound intent mailbox
    pub intent_capacity: usize,
    /// Capacity of the outbound event queue
    pub event_capacity: usize,

    /// Seed for the simulation RNG
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            player_speed: 80.0,
            player_radius: 8.0,
            facing_smoothing: 0.15,

            attack_range: 65.0,
            attack_cooldown: 0.6,
            attack_damage_min: 10,
            attack_damage_max: 25,
            power_shot_bonus: 10,

            skill_cost: 20,
            skill_damage_min: 30,
            skill_damage_max: 50,
            skill_range: 120.0,
            skill_cooldown: 5.0,

            interaction_radius: 60.0,
            pick_radius: 15.0,

            wander_radius: 60.0,
            wander_epsilon: 2.0,
            wander_speed: 15.0,

            zoom_default: 1.2,
            zoom_min: 0.3,
            zoom_max: 2.5,
            zoom_per_scroll: 0.001,

            intent_capacity: 64,
            event_capacity: 256,

            seed: DEFAULT_SEED,
        }
    }
}

impl SimConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with a different RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("player_radius", self.player_radius),
            ("attack_range", self.attack_range),
            ("skill_range", self.skill_range),
            ("interaction_radius", self.interaction_radius),
            ("pick_radius", self.pick_radius),
            ("wander_radius", self.wander_radius),
            ("wander_epsilon", self.wander_epsilon),
            ("wander_speed", self.wander_speed),
            ("zoom_min", self.zoom_min),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("attack_cooldown", self.attack_cooldown),
            ("skill_cooldown", self.skill_cooldown),
            ("facing_smoothing", self.facing_smoothing),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        // Integer bands, compared without casting
        let bands = [
            ("attack_damage", self.attack_damage_min, self.attack_damage_max),
            ("skill_damage", self.skill_damage_min, self.skill_damage_max),
        ];
        for (field, min, max) in bands {
            if min > max {
                return Err(ConfigError::InvertedBand { field, min, max });
            }
        }

        if self.zoom_min > self.zoom_max {
            return Err(ConfigError::InvertedRange {
                field: "zoom",
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }

        if self.intent_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("intent_capacity"));
        }
        if self.event_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("event_capacity"));
        }
        Ok(())
    }
}
