//! Player attack and skill resolution.
//!
//! A drained action resolves completely within the frame or not at all. On
//! success the steps are: roll damage, subtract it from the enemy, emit
//! `DamageDealt`, re-emit the target with post-hit HP, then handle defeat.
//! A training dummy resets to full HP and is re-emitted; anything else is
//! removed, announced with `EnemyDefeated` and the target is cleared.
//!
//! A failed precondition is a silent no-op. The trigger has already been
//! drained, so a wasted swing never carries over to the next frame.

use aethelgard_common::EntityId;
use tracing::debug;

use crate::config::SimConfig;
use crate::entity::EnemyKind;
use crate::events::{EventBus, SimEvent};
use crate::external::PlayerVitals;
use crate::input::ActionKind;
use crate::world::World;

// ============================================================================
// Outcome
// ============================================================================

/// Why an action did nothing, or what it did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatOutcome {
    /// No enemy is selected, or the selection no longer resolves
    NoTarget,
    /// The target is too far away
    OutOfRange,
    /// The action's cooldown has not elapsed
    OnCooldown,
    /// Not enough mana for the skill
    NotEnoughMana,
    /// The enemy survived the hit
    Hit {
        /// Damage dealt
        damage: u32,
        /// HP after the hit
        remaining: i32,
    },
    /// A never-dying enemy crossed zero and was reset
    Reset {
        /// Damage dealt
        damage: u32,
    },
    /// The enemy died and was removed
    Defeated {
        /// Damage dealt
        damage: u32,
        /// Species
        kind: EnemyKind,
    },
}

impl CombatOutcome {
    /// Returns true if damage was dealt.
    #[must_use]
    pub const fn landed(&self) -> bool {
        matches!(
            self,
            Self::Hit { .. } | Self::Reset { .. } | Self::Defeated { .. }
        )
    }
}

// ============================================================================
// Resolver
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct ActionProfile {
    range: f32,
    cooldown: f32,
    damage_min: u32,
    damage_max: u32,
}

/// Resolves attack and skill triggers against the current target.
#[derive(Debug, Clone)]
pub struct CombatResolver {
    attack: ActionProfile,
    skill: ActionProfile,
    power_shot_bonus: u32,
    skill_cost: u32,
    last_attack: Option<f64>,
    last_skill: Option<f64>,
}

impl CombatResolver {
    /// Creates a resolver from the simulation tuning.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            attack: ActionProfile {
                range: config.attack_range,
                cooldown: config.attack_cooldown,
                damage_min: config.attack_damage_min,
                damage_max: config.attack_damage_max,
            },
            skill: ActionProfile {
                range: config.skill_range,
                cooldown: config.skill_cooldown,
                damage_min: config.skill_damage_min,
                damage_max: config.skill_damage_max,
            },
            power_shot_bonus: config.power_shot_bonus,
            skill_cost: config.skill_cost,
            last_attack: None,
            last_skill: None,
        }
    }

    /// Resolves one drained action.
    pub fn resolve(
        &mut self,
        action: ActionKind,
        world: &mut World,
        vitals: &PlayerVitals,
        now: f64,
        rng: &mut fastrand::Rng,
        events: &mut EventBus,
    ) -> CombatOutcome {
        let outcome = match action {
            ActionKind::Attack => self.resolve_attack(world, vitals, now, rng, events),
            ActionKind::Skill => self.resolve_skill(world, vitals, now, rng, events),
        };
        debug!(?action, ?outcome, "Action resolved");
        outcome
    }

    /// Basic attack. Power shots add a flat bonus to the roll.
    pub fn resolve_attack(
        &mut self,
        world: &mut World,
        vitals: &PlayerVitals,
        now: f64,
        rng: &mut fastrand::Rng,
        events: &mut EventBus,
    ) -> CombatOutcome {
        let profile = self.attack;
        let target = match Self::check(world, &profile, self.last_attack, now) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };

        self.last_attack = Some(now);
        let bonus = if vitals.power_shots() {
            self.power_shot_bonus
        } else {
            0
        };
        let damage = rng.u32(profile.damage_min..=profile.damage_max) + bonus;
        Self::apply_hit(world, target, damage, events)
    }

    /// Mana-costing skill with its own cooldown and damage band.
    pub fn resolve_skill(
        &mut self,
        world: &mut World,
        vitals: &PlayerVitals,
        now: f64,
        rng: &mut fastrand::Rng,
        events: &mut EventBus,
    ) -> CombatOutcome {
        let profile = self.skill;
        let target = match Self::check(world, &profile, self.last_skill, now) {
            Ok(target) => target,
            Err(outcome) => return outcome,
        };
        if vitals.mana() < self.skill_cost {
            return CombatOutcome::NotEnoughMana;
        }

        self.last_skill = Some(now);
        events.publish(SimEvent::UseMana {
            amount: self.skill_cost,
        });
        events.publish(SimEvent::AbilityUsed);
        let damage = rng.u32(profile.damage_min..=profile.damage_max);
        Self::apply_hit(world, target, damage, events)
    }

    /// Seconds until the basic attack is ready again.
    #[must_use]
    pub fn attack_ready_in(&self, now: f64) -> f32 {
        remaining(self.last_attack, self.attack.cooldown, now)
    }

    /// Seconds until the skill is ready again.
    #[must_use]
    pub fn skill_ready_in(&self, now: f64) -> f32 {
        remaining(self.last_skill, self.skill.cooldown, now)
    }

    /// Player melee range.
    #[must_use]
    pub const fn attack_range(&self) -> f32 {
        self.attack.range
    }

    fn check(
        world: &World,
        profile: &ActionProfile,
        last: Option<f64>,
        now: f64,
    ) -> Result<EntityId, CombatOutcome> {
        let enemy = world
            .target
            .enemy()
            .and_then(|id| world.registry.enemy(id))
            .ok_or(CombatOutcome::NoTarget)?;
        if enemy.distance_to(world.player.position) > profile.range {
            return Err(CombatOutcome::OutOfRange);
        }
        if remaining(last, profile.cooldown, now) > 0.0 {
            return Err(CombatOutcome::OnCooldown);
        }
        Ok(enemy.id)
    }

    fn apply_hit(
        world: &mut World,
        id: EntityId,
        damage: u32,
        events: &mut EventBus,
    ) -> CombatOutcome {
        let Some(enemy) = world.registry.enemy_mut(id) else {
            return CombatOutcome::NoTarget;
        };

        let remaining = enemy.apply_damage(damage);
        events.publish(SimEvent::DamageDealt { amount: damage });
        if let Some(event) = world.target.refresh_enemy(enemy) {
            events.publish(event);
        }

        if !enemy.is_depleted() {
            return CombatOutcome::Hit { damage, remaining };
        }

        if enemy.kind.never_dies() {
            enemy.reset_hp();
            if let Some(event) = world.target.refresh_enemy(enemy) {
                events.publish(event);
            }
            debug!(id = %id, kind = %enemy.kind, "Training enemy reset");
            return CombatOutcome::Reset { damage };
        }

        let kind = enemy.kind;
        let position = enemy.position;
        world.registry.despawn_enemy(id);
        events.publish(SimEvent::EnemyDefeated {
            kind,
            x: position.x,
            z: position.y,
        });
        if let Some(event) = world.target.clear() {
            events.publish(event);
        }
        debug!(id = %id, %kind, x = position.x, z = position.y, "Enemy defeated");
        CombatOutcome::Defeated { damage, kind }
    }
}

fn remaining(last: Option<f64>, cooldown: f32, now: f64) -> f32 {
    last.map_or(0.0, |last| {
        let left = f64::from(cooldown) - (now - last);
        left.max(0.0) as f32
    })
}
