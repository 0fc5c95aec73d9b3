//! Enemy behavior state machine.
//!
//! Every hostile enemy is re-evaluated once per frame, independently of the
//! others:
//! - **Wander**: walk toward a patrol point drawn around the spawn origin,
//!   drawing a new one on arrival.
//! - **Chase**: the player is inside the aggro radius; walk straight at it.
//!   Colliders are ignored so the enemy always reaches melee range.
//! - **AttackCooldown**: still chasing, but the last autoattack is too
//!   recent to bite again.
//!
//! A player who leaves the aggro radius sends the enemy back to Wander with
//! a fresh patrol point. Stationary kinds are skipped entirely.

use aethelgard_common::{facing_toward, GroundPos, Vec2};
use std::f32::consts::TAU;
use tracing::{debug, trace};

use crate::config::SimConfig;
use crate::entity::{AiState, Enemy, EnemyBehavior, HostileStats, Locomotion};
use crate::events::{EventBus, SimEvent};
use crate::registry::EntityRegistry;

/// Drives every enemy once per frame.
#[derive(Debug, Clone, Copy)]
pub struct EnemyAi {
    wander_radius: f32,
    wander_epsilon: f32,
    wander_speed: f32,
}

impl EnemyAi {
    /// Creates the controller from the simulation tuning.
    #[must_use]
    pub fn new(config: &SimConfig) -> Self {
        Self {
            wander_radius: config.wander_radius,
            wander_epsilon: config.wander_epsilon,
            wander_speed: config.wander_speed,
        }
    }

    /// Advances every enemy by `dt` seconds at clock time `now`.
    ///
    /// `player` is the player position from before this frame's movement.
    pub fn update(
        &self,
        registry: &mut EntityRegistry,
        player: GroundPos,
        now: f64,
        dt: f32,
        rng: &mut fastrand::Rng,
        events: &mut EventBus,
    ) {
        for enemy in registry.enemies_mut() {
            if let Some(event) = self.update_enemy(enemy, player, now, dt, rng) {
                events.publish(event);
            }
        }
    }

    /// Advances one enemy. Returns the autoattack event, if it bit.
    pub fn update_enemy(
        &self,
        enemy: &mut Enemy,
        player: GroundPos,
        now: f64,
        dt: f32,
        rng: &mut fastrand::Rng,
    ) -> Option<SimEvent> {
        let stats = match enemy.behavior() {
            EnemyBehavior::Hostile(stats) => stats,
            EnemyBehavior::Stationary => {
                enemy.locomotion = Locomotion::Idle;
                return None;
            }
        };

        let distance = enemy.distance_to(player);
        if distance < stats.aggro_radius {
            if enemy.state == AiState::Wander {
                debug!(id = %enemy.id, kind = %enemy.kind, distance, "Enemy aggro");
                enemy.state = AiState::Chase;
            }
            Self::chase(enemy, player, &stats, now, dt, distance)
        } else {
            if enemy.state != AiState::Wander {
                debug!(id = %enemy.id, kind = %enemy.kind, distance, "Enemy lost player");
                enemy.state = AiState::Wander;
                enemy.wander_target = self.draw_wander_target(enemy.spawn_origin(), rng);
            }
            self.wander(enemy, dt, rng);
            None
        }
    }

    fn chase(
        enemy: &mut Enemy,
        player: GroundPos,
        stats: &HostileStats,
        now: f64,
        dt: f32,
        distance: f32,
    ) -> Option<SimEvent> {
        step_toward(enemy, player, stats.chase_speed * dt);

        let ready = enemy
            .last_attack
            .map_or(true, |last| now - last >= f64::from(stats.cooldown));

        if distance < stats.melee_radius && ready {
            enemy.last_attack = Some(now);
            enemy.state = AiState::AttackCooldown;
            debug!(id = %enemy.id, kind = %enemy.kind, damage = stats.damage, "Enemy autoattack");
            return Some(SimEvent::DamageTaken {
                amount: stats.damage,
                source: enemy.kind,
            });
        }

        if enemy.state == AiState::AttackCooldown && ready {
            enemy.state = AiState::Chase;
        }
        None
    }

    fn wander(&self, enemy: &mut Enemy, dt: f32, rng: &mut fastrand::Rng) {
        if enemy.position.distance(enemy.wander_target) < self.wander_epsilon {
            enemy.wander_target = self.draw_wander_target(enemy.spawn_origin(), rng);
            trace!(id = %enemy.id, target = ?enemy.wander_target, "New wander target");
        }
        let target = enemy.wander_target;
        step_toward(enemy, target, self.wander_speed * dt);
    }

    /// Uniform point in the disc of `wander_radius` around `origin`.
    fn draw_wander_target(&self, origin: GroundPos, rng: &mut fastrand::Rng) -> GroundPos {
        let angle = rng.f32() * TAU;
        let radius = self.wander_radius * rng.f32().sqrt();
        origin + Vec2::new(angle.cos(), angle.sin()) * radius
    }
}

/// Moves straight toward `target` by at most `max_step`, without overshoot.
fn step_toward(enemy: &mut Enemy, target: GroundPos, max_step: f32) {
    let offset = target - enemy.position;
    let distance = offset.length();
    if distance <= f32::EPSILON || max_step <= 0.0 {
        enemy.locomotion = Locomotion::Idle;
        return;
    }
    let direction = offset / distance;
    enemy.position += direction * max_step.min(distance);
    enemy.facing = facing_toward(direction);
    enemy.locomotion = Locomotion::Run;
}
