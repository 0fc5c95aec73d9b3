//! The per-frame driver.
//!
//! [`FrameScheduler::tick`] is called once per display refresh. Each tick
//! runs, in this order:
//!
//! 1. Drain the input mailbox and apply a pending zone request.
//! 2. Sample the host freeze flags. A frozen frame skips to rendering.
//! 3. Reconcile loot placeholders and revalidate the target.
//! 4. Advance enemy AI.
//! 5. Drain the action trigger and resolve it.
//! 6. Resolve a pending click.
//! 7. Apply held movement and report the new position.
//! 8. Render.
//!
//! AI and combat therefore see the player where it stood before this
//! frame's movement. Events are collected on the outbound bus and returned
//! from `tick` as one ordered batch.

use aethelgard_common::AethelgardResult;
use tracing::{info, trace};

use crate::ai::EnemyAi;
use crate::combat::CombatResolver;
use crate::config::SimConfig;
use crate::events::{EventBus, SimEvent};
use crate::external::ExternalState;
use crate::freeze::{FreezeGate, FreezeReason};
use crate::input::{ActionKind, InputHandle, InputSampler, InputSession};
use crate::lifecycle::ZoneLifecycle;
use crate::movement::MovementEngine;
use crate::pointer::ClickResolver;
use crate::render::{FrameRenderer, FrameView};
use crate::world::World;
use crate::zone::Zone;

/// Longest delta a single frame may advance (seconds).
const MAX_DELTA: f32 = 0.25;

/// Owns the world and drives it one frame at a time.
#[derive(Debug)]
pub struct FrameScheduler {
    config: SimConfig,
    lifecycle: ZoneLifecycle,
    world: World,

    // === Input ===
    session: InputSession,
    sampler: InputSampler,

    // === Systems ===
    freeze: FreezeGate,
    ai: EnemyAi,
    combat: CombatResolver,
    clicks: ClickResolver,
    movement: MovementEngine,

    events: EventBus,
    rng: fastrand::Rng,
    elapsed: f64,
    frame: u64,
}

impl FrameScheduler {
    /// Validates the tuning, builds every zone layout and loads `zone`.
    pub fn new(config: SimConfig, zone: Zone) -> AethelgardResult<Self> {
        config.validate()?;
        let lifecycle = ZoneLifecycle::new()?;

        let mut scheduler = Self {
            session: InputSession::open(config.intent_capacity),
            sampler: InputSampler::new(&config),
            freeze: FreezeGate::new(),
            ai: EnemyAi::new(&config),
            combat: CombatResolver::new(&config),
            clicks: ClickResolver::new(&config),
            movement: MovementEngine::new(&config),
            events: EventBus::new(config.event_capacity),
            rng: fastrand::Rng::with_seed(config.seed),
            world: World::empty(zone),
            lifecycle,
            config,
            elapsed: 0.0,
            frame: 0,
        };
        scheduler.load_zone(zone);
        info!(%zone, seed = scheduler.config.seed, "Simulation session started");
        Ok(scheduler)
    }

    /// A handle for posting input into this session.
    #[must_use]
    pub fn input(&self) -> InputHandle {
        self.session.handle()
    }

    /// Tears down the current zone and builds `zone`.
    ///
    /// A pending action is discarded with the old zone.
    pub fn load_zone(&mut self, zone: Zone) {
        self.lifecycle.load_zone(zone, &mut self.world);
        if let Some(action) = self.sampler.take_action() {
            trace!(?action, "Discarded pending action on zone load");
        }
    }

    /// Runs one frame and returns the events it produced.
    ///
    /// `delta` is clamped to `[0, 0.25]` seconds; a non-finite delta counts
    /// as zero.
    ///
    /// Input is still sampled on a frozen frame. Its click is dropped, while
    /// a pending action stays queued and resolves on the first live frame.
    pub fn tick<R: FrameRenderer + ?Sized>(
        &mut self,
        delta: f32,
        external: &ExternalState,
        renderer: &mut R,
    ) -> Vec<SimEvent> {
        let delta = if delta.is_finite() {
            delta.clamp(0.0, MAX_DELTA)
        } else {
            0.0
        };
        self.frame += 1;
        self.elapsed += f64::from(delta);
        let now = self.elapsed;

        let intents = self.sampler.sample(&self.session);
        if let Some(zone) = intents.zone_request {
            self.load_zone(zone);
        }

        let frozen = self.freeze.sample(external.flags, delta);
        if !frozen {
            let diff = self.world.loot.reconcile(&external.ground_loot);
            if diff.added + diff.removed > 0 {
                trace!(?diff, "Loot mirror reconciled");
            }
            self.world.loot.animate(delta);
            if let Some(event) = self.world.target.revalidate(&self.world.registry) {
                self.events.publish(event);
            }

            let player = self.world.player.position;
            self.ai.update(
                &mut self.world.registry,
                player,
                now,
                delta,
                &mut self.rng,
                &mut self.events,
            );

            if let Some(action) = self.sampler.take_action() {
                self.combat.resolve(
                    action,
                    &mut self.world,
                    &external.vitals,
                    now,
                    &mut self.rng,
                    &mut self.events,
                );
            }

            if let Some(click) = intents.click {
                self.clicks.resolve(click, &mut self.world, &mut self.events);
            }

            let moved = self.movement.step(
                &mut self.world.player,
                intents.movement,
                delta,
                &self.world.colliders,
            );
            if moved {
                self.events.publish(SimEvent::moved(self.world.player.position));
            }
        }

        renderer.render(&FrameView {
            frame: self.frame,
            elapsed: self.elapsed,
            frozen,
            zoom: self.sampler.zoom(),
            world: &self.world,
        });

        self.events.drain()
    }

    /// Current world state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Active zone.
    #[must_use]
    pub fn zone(&self) -> Zone {
        self.world.zone
    }

    /// Simulation tuning.
    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Simulation clock in seconds.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Frames run so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Camera zoom.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.sampler.zoom()
    }

    /// Why the last frame was frozen, if it was.
    #[must_use]
    pub const fn freeze_reason(&self) -> Option<FreezeReason> {
        self.freeze.reason()
    }

    /// Action waiting for the next unfrozen frame.
    #[must_use]
    pub const fn pending_action(&self) -> Option<ActionKind> {
        self.sampler.pending_action()
    }

    /// Seconds until the basic attack is ready.
    #[must_use]
    pub fn attack_ready_in(&self) -> f32 {
        self.combat.attack_ready_in(self.elapsed)
    }

    /// Seconds until the skill is ready.
    #[must_use]
    pub fn skill_ready_in(&self) -> f32 {
        self.combat.skill_ready_in(self.elapsed)
    }

    /// Player melee range.
    #[must_use]
    pub fn attack_range(&self) -> f32 {
        self.combat.attack_range()
    }

    /// Total events dropped because the outbound queue was full.
    #[must_use]
    pub const fn dropped_events(&self) -> u64 {
        self.events.dropped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Enemy, EnemyKind};
    use crate::freeze::FreezeFlags;
    use crate::input::MoveKey;
    use crate::render::NullRenderer;
    use aethelgard_common::{ground, EntityId, GroundPos};
    use proptest::prelude::*;

    const FRAME: f32 = 1.0 / 60.0;

    fn scheduler(zone: Zone) -> FrameScheduler {
        FrameScheduler::new(SimConfig::default(), zone).expect("scheduler")
    }

    /// Replaces the population with a single enemy.
    fn lone_enemy(scheduler: &mut FrameScheduler, kind: EnemyKind, at: GroundPos) -> EntityId {
        scheduler.world.registry.clear();
        scheduler.world.registry.spawn_enemy(Enemy::new(kind, at))
    }

    fn tick(scheduler: &mut FrameScheduler, delta: f32) -> Vec<SimEvent> {
        scheduler.tick(delta, &ExternalState::default(), &mut NullRenderer)
    }

    fn count(events: &[SimEvent], pred: impl Fn(&SimEvent) -> bool) -> usize {
        events.iter().filter(|e| pred(e)).count()
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: u64,
        frozen: u64,
    }

    impl FrameRenderer for CountingRenderer {
        fn render(&mut self, view: &FrameView<'_>) {
            self.frames += 1;
            if view.frozen {
                self.frozen += 1;
            }
        }
    }

    #[test]
    fn test_new_loads_start_zone() {
        let scheduler = scheduler(Zone::Castle);
        assert_eq!(scheduler.zone(), Zone::Castle);
        assert_eq!(scheduler.world().player.position, ground(0.0, 150.0));
        assert_eq!(scheduler.world().registry.npc_count(), 7);
        assert!((scheduler.zoom() - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimConfig {
            intent_capacity: 0,
            ..SimConfig::default()
        };
        assert!(FrameScheduler::new(config, Zone::Castle).is_err());
    }

    #[test]
    fn test_wolf_scenario() {
        let mut sim = scheduler(Zone::Forest);
        let player = sim.world().player.position;
        let wolf = lone_enemy(&mut sim, EnemyKind::Wolf, player + ground(0.0, -40.0));
        let input = sim.input();

        // The wolf closes in and bites once it is inside melee range.
        let mut bitten = false;
        for _ in 0..120 {
            let events = tick(&mut sim, FRAME);
            if events.contains(&SimEvent::DamageTaken {
                amount: 10,
                source: EnemyKind::Wolf,
            }) {
                let distance = sim.world().registry.enemy(wolf).map(|e| e.distance_to(player));
                assert!(distance.is_some_and(|d| d < 25.0));
                bitten = true;
                break;
            }
        }
        assert!(bitten);

        // Select it, then swing whenever the cooldown allows.
        let wolf_pos = sim.world().registry.enemy(wolf).map(|e| e.position);
        input.click(wolf_pos.expect("wolf alive")).expect("send");
        let events = tick(&mut sim, FRAME);
        assert_eq!(sim.world().target.enemy(), Some(wolf));
        assert_eq!(count(&events, |e| matches!(e, SimEvent::TargetChanged(Some(_)))), 1);

        let mut hits = 0;
        let mut defeats = Vec::new();
        for _ in 0..6 {
            input.trigger(ActionKind::Attack).expect("send");
            for _ in 0..3 {
                for event in tick(&mut sim, 0.25) {
                    match event {
                        SimEvent::DamageDealt { .. } => hits += 1,
                        SimEvent::EnemyDefeated { kind, .. } => defeats.push(kind),
                        _ => {}
                    }
                }
            }
        }
        assert_eq!(defeats, vec![EnemyKind::Wolf]);
        assert!((2..=5).contains(&hits), "took {hits} hits");
        assert!(sim.world().registry.enemy(wolf).is_none());
        assert!(sim.world().target.is_empty());
    }

    #[test]
    fn test_two_triggers_inside_cooldown_resolve_once() {
        let mut sim = scheduler(Zone::Castle);
        let player = sim.world().player.position;
        let dummy = lone_enemy(&mut sim, EnemyKind::TrainingDummy, player + ground(20.0, 0.0));
        if let Some(enemy) = sim.world.registry.enemy(dummy) {
            sim.world.target.select_enemy(enemy);
        }
        let input = sim.input();

        input.trigger(ActionKind::Attack).expect("send");
        let first = tick(&mut sim, 0.1);
        input.trigger(ActionKind::Attack).expect("send");
        let second = tick(&mut sim, 0.1);

        let hits =
            |events: &[SimEvent]| count(events, |e| matches!(e, SimEvent::DamageDealt { .. }));
        assert_eq!(hits(&first), 1);
        assert_eq!(hits(&second), 0);
        assert_eq!(sim.pending_action(), None);
    }

    #[test]
    fn test_dummy_never_defeated() {
        let mut sim = scheduler(Zone::Castle);
        let player = sim.world().player.position;
        let dummy = lone_enemy(&mut sim, EnemyKind::TrainingDummy, player + ground(0.0, -30.0));
        if let Some(enemy) = sim.world.registry.enemy_mut(dummy) {
            enemy.hp = 3;
        }
        if let Some(enemy) = sim.world.registry.enemy(dummy) {
            sim.world.target.select_enemy(enemy);
        }
        let input = sim.input();

        input.trigger(ActionKind::Attack).expect("send");
        let events = tick(&mut sim, FRAME);
        assert_eq!(count(&events, |e| matches!(e, SimEvent::EnemyDefeated { .. })), 0);
        assert_eq!(sim.world().registry.enemy(dummy).map(|e| e.hp), Some(999));
        assert_eq!(
            events.last(),
            Some(&SimEvent::TargetChanged(Some(crate::target::TargetInfo {
                name: "Training Dummy".to_string(),
                current_hp: 999,
                max_hp: 999,
                kind: crate::target::TargetKind::Enemy,
            })))
        );
    }

    #[test]
    fn test_zone_request_rebuilds() {
        let mut sim = scheduler(Zone::Castle);
        let input = sim.input();
        input.request_zone(Zone::Forest).expect("send");
        tick(&mut sim, FRAME);
        let first = (
            sim.world().registry.enemy_count(),
            sim.world().registry.npc_count(),
            sim.world().colliders.len(),
        );
        assert_eq!(sim.zone(), Zone::Forest);

        input.key_down(MoveKey::Right).expect("send");
        tick(&mut sim, FRAME);
        input.key_up(MoveKey::Right).expect("send");
        input.request_zone(Zone::Forest).expect("send");
        tick(&mut sim, FRAME);

        let second = (
            sim.world().registry.enemy_count(),
            sim.world().registry.npc_count(),
            sim.world().colliders.len(),
        );
        assert_eq!(first, (15, 0, 40));
        assert_eq!(first, second);
        assert_eq!(sim.world().player.position, ground(0.0, 150.0));
    }

    #[test]
    fn test_frozen_frame_skips_simulation_but_renders() {
        let mut sim = scheduler(Zone::Forest);
        let player = sim.world().player.position;
        let wolf = lone_enemy(&mut sim, EnemyKind::Wolf, player + ground(0.0, -40.0));
        let input = sim.input();
        input.key_down(MoveKey::Left).expect("send");
        input.trigger(ActionKind::Attack).expect("send");

        let paused = ExternalState {
            flags: FreezeFlags {
                paused: true,
                ..FreezeFlags::default()
            },
            ..ExternalState::default()
        };
        let mut renderer = CountingRenderer::default();
        for _ in 0..10 {
            assert!(sim.tick(FRAME, &paused, &mut renderer).is_empty());
        }
        assert_eq!(renderer.frames, 10);
        assert_eq!(renderer.frozen, 10);
        assert_eq!(sim.world().player.position, player);
        assert_eq!(
            sim.world().registry.enemy(wolf).map(|e| e.position),
            Some(player + ground(0.0, -40.0))
        );
        assert_eq!(sim.pending_action(), Some(ActionKind::Attack));
        assert_eq!(sim.freeze_reason(), Some(FreezeReason::Paused));

        // Unfreezing resumes with the key still held.
        let events = tick(&mut sim, FRAME);
        assert!(events.iter().any(|e| matches!(e, SimEvent::PlayerMoved { .. })));
        assert_eq!(sim.pending_action(), None);
    }

    #[test]
    fn test_frozen_click_dropped_but_action_kept() {
        let mut sim = scheduler(Zone::Castle);
        let player = sim.world().player.position;
        let at = player + ground(20.0, 0.0);
        lone_enemy(&mut sim, EnemyKind::TrainingDummy, at);
        let input = sim.input();

        let transitioning = ExternalState {
            flags: FreezeFlags {
                transitioning: true,
                ..FreezeFlags::default()
            },
            ..ExternalState::default()
        };
        input.click(at).expect("send");
        input.trigger(ActionKind::Attack).expect("send");
        assert!(sim.tick(FRAME, &transitioning, &mut NullRenderer).is_empty());
        assert!(sim.world().target.is_empty());
        assert_eq!(sim.pending_action(), Some(ActionKind::Attack));

        // The click never selected anything, so the kept attack has no target.
        let events = tick(&mut sim, FRAME);
        assert_eq!(count(&events, |e| matches!(e, SimEvent::TargetChanged(_))), 0);
        assert_eq!(count(&events, |e| matches!(e, SimEvent::DamageDealt { .. })), 0);
        assert!(sim.world().target.is_empty());
        assert_eq!(sim.pending_action(), None);

        input.click(at).expect("send");
        let events = tick(&mut sim, FRAME);
        assert_eq!(count(&events, |e| matches!(e, SimEvent::TargetChanged(Some(_)))), 1);
    }

    #[test]
    fn test_movement_event_only_when_moved() {
        let mut sim = scheduler(Zone::Castle);
        lone_enemy(&mut sim, EnemyKind::TrainingDummy, ground(-300.0, -300.0));
        let input = sim.input();

        assert!(tick(&mut sim, FRAME).is_empty());
        input.key_down(MoveKey::Forward).expect("send");
        let events = tick(&mut sim, 0.1);
        assert_eq!(events, vec![SimEvent::PlayerMoved { x: 0.0, z: 142.0 }]);
    }

    #[test]
    fn test_despawned_target_cleared_next_frame() {
        let mut sim = scheduler(Zone::Village);
        let player = sim.world().player.position;
        let skeleton = lone_enemy(&mut sim, EnemyKind::Skeleton, player + ground(300.0, 0.0));
        if let Some(enemy) = sim.world.registry.enemy(skeleton) {
            sim.world.target.select_enemy(enemy);
        }
        sim.world.registry.despawn_enemy(skeleton);

        let events = tick(&mut sim, FRAME);
        assert_eq!(events, vec![SimEvent::TargetChanged(None)]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_trigger_consumed_once(sets in 1usize..8, frames in 2usize..6) {
            let mut sim = scheduler(Zone::Castle);
            let player = sim.world().player.position;
            let dummy = lone_enemy(&mut sim, EnemyKind::TrainingDummy, player + ground(0.0, -30.0));
            if let Some(enemy) = sim.world.registry.enemy(dummy) {
                sim.world.target.select_enemy(enemy);
            }
            let input = sim.input();
            for _ in 0..sets {
                input.trigger(ActionKind::Attack).expect("send");
            }

            // 0.75 s per three frames, longer than the attack cooldown.
            let mut hits = 0;
            for _ in 0..frames * 3 {
                let events = tick(&mut sim, 0.25);
                hits += count(&events, |e| matches!(e, SimEvent::DamageDealt { .. }));
            }
            prop_assert_eq!(hits, 1);
        }
    }
}
