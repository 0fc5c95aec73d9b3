//! Simulated entity records: the player, enemies and NPCs.
//!
//! Enemy behavior is keyed by [`EnemyKind`] through a fixed table, so a new
//! kind must be given its stats here before it can be spawned.

use aethelgard_common::{EntityId, GroundPos};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Animation state exposed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locomotion {
    /// Standing still
    #[default]
    Idle,
    /// Moving
    Run,
}

/// Enemy species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Forest wolf
    Wolf,
    /// Village skeleton
    Skeleton,
    /// Castle practice target that never dies
    TrainingDummy,
}

/// Combat stats for enemies that chase and bite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileStats {
    /// Player distance below which the enemy starts chasing
    pub aggro_radius: f32,
    /// Player distance below which the enemy can attack
    pub melee_radius: f32,
    /// Chase speed (units per second)
    pub chase_speed: f32,
    /// Damage dealt per autoattack
    pub damage: u32,
    /// Seconds between autoattacks
    pub cooldown: f32,
}

/// How an enemy kind behaves each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnemyBehavior {
    /// Wanders, chases and autoattacks
    Hostile(HostileStats),
    /// Never moves, never attacks, resets instead of dying
    Stationary,
}

impl EnemyKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 3] = [Self::Wolf, Self::Skeleton, Self::TrainingDummy];

    /// Display name, also carried by the defeat event.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wolf => "Wolf",
            Self::Skeleton => "Skeleton",
            Self::TrainingDummy => "Training Dummy",
        }
    }

    /// Hit points at spawn.
    #[must_use]
    pub const fn max_hp(self) -> i32 {
        match self {
            Self::Wolf => 50,
            Self::Skeleton => 100,
            Self::TrainingDummy => 999,
        }
    }

    /// Behavior table entry.
    #[must_use]
    pub const fn behavior(self) -> EnemyBehavior {
        match self {
            Self::Wolf => EnemyBehavior::Hostile(HostileStats {
                aggro_radius: 150.0,
                melee_radius: 25.0,
                chase_speed: 30.0,
                damage: 10,
                cooldown: 2.0,
            }),
            Self::Skeleton => EnemyBehavior::Hostile(HostileStats {
                aggro_radius: 150.0,
                melee_radius: 30.0,
                chase_speed: 30.0,
                damage: 12,
                cooldown: 2.0,
            }),
            Self::TrainingDummy => EnemyBehavior::Stationary,
        }
    }

    /// Returns true if reaching zero HP resets the enemy instead of killing it.
    #[must_use]
    pub const fn never_dies(self) -> bool {
        matches!(self.behavior(), EnemyBehavior::Stationary)
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enemy AI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AiState {
    /// Patrolling around the spawn origin
    #[default]
    Wander,
    /// Pursuing the player
    Chase,
    /// Pursuing the player, autoattack on cooldown
    AttackCooldown,
}

/// A live enemy in the active zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    /// Unique id
    pub id: EntityId,
    /// Species
    pub kind: EnemyKind,
    /// Current position
    pub position: GroundPos,
    /// Facing angle
    pub facing: f32,
    /// Current HP; may be observed at or below zero right after a hit
    pub hp: i32,
    /// Maximum HP
    pub max_hp: i32,
    /// Elapsed time of the last autoattack
    pub last_attack: Option<f64>,
    /// Current patrol destination
    pub wander_target: GroundPos,
    /// Anchor of the patrol area; never changes
    spawn_origin: GroundPos,
    /// AI state
    pub state: AiState,
    /// Animation state
    pub locomotion: Locomotion,
}

impl Enemy {
    /// Creates a full-health enemy standing at its spawn origin.
    #[must_use]
    pub fn new(kind: EnemyKind, position: GroundPos) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            position,
            facing: 0.0,
            hp: kind.max_hp(),
            max_hp: kind.max_hp(),
            last_attack: None,
            wander_target: position,
            spawn_origin: position,
            state: AiState::Wander,
            locomotion: Locomotion::Idle,
        }
    }

    /// Where this enemy was spawned.
    #[must_use]
    pub const fn spawn_origin(&self) -> GroundPos {
        self.spawn_origin
    }

    /// Behavior table entry for this enemy's kind.
    #[must_use]
    pub const fn behavior(&self) -> EnemyBehavior {
        self.kind.behavior()
    }

    /// Subtracts damage and returns the new HP.
    pub fn apply_damage(&mut self, amount: u32) -> i32 {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.hp = self.hp.saturating_sub(amount);
        self.hp
    }

    /// Returns true once HP has crossed zero.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.hp <= 0
    }

    /// Restores HP to maximum.
    pub fn reset_hp(&mut self) {
        self.hp = self.max_hp;
    }

    /// Distance to a point.
    #[must_use]
    pub fn distance_to(&self, pos: GroundPos) -> f32 {
        self.position.distance(pos)
    }
}

/// A non-combat character.
#[derive(Debug, Clone, PartialEq)]
pub struct Npc {
    /// Unique id
    pub id: EntityId,
    /// Display name, sent with interaction events
    pub name: String,
    /// Key the host uses to pick dialogue
    pub dialogue_key: String,
    /// Fixed position
    pub position: GroundPos,
    /// Facing angle
    pub facing: f32,
}

impl Npc {
    /// Creates an NPC.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        dialogue_key: impl Into<String>,
        position: GroundPos,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            dialogue_key: dialogue_key.into(),
            position,
            facing: 0.0,
        }
    }
}

/// The simulated player body.
///
/// Health and mana are not stored here; they are read from the host each
/// frame through [`crate::external::PlayerVitals`].
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    /// Current position
    pub position: GroundPos,
    /// Facing angle
    pub facing: f32,
    /// Animation state
    pub locomotion: Locomotion,
}

impl Player {
    /// Creates an idle player at `position`.
    #[must_use]
    pub fn new(position: GroundPos) -> Self {
        Self {
            position,
            facing: 0.0,
            locomotion: Locomotion::Idle,
        }
    }

    /// Moves the player back to a spawn point.
    pub fn respawn_at(&mut self, position: GroundPos) {
        self.position = position;
        self.facing = 0.0;
        self.locomotion = Locomotion::Idle;
    }
}
