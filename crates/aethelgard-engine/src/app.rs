//! Headless session driver.
//!
//! Wires the frame scheduler to the reference store and steers the player
//! with a simple autopilot: collect nearby loot, otherwise walk to the
//! nearest enemy, select it and attack whenever the cooldown allows.
//! After a death the player respawns in the Castle and teleports back to
//! the start zone if the fare can be paid.

use aethelgard_common::GroundPos;
use aethelgard_gameplay::{
    ActionKind, Enemy, FrameScheduler, InputError, InputHandle, MoveIntent, MoveKey, Zone,
};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::render::LogRenderer;
use crate::store::{teleport_cost, GameStore};
use crate::timing::FrameClock;

/// Every movement key, in a fixed order.
const MOVE_KEYS: [MoveKey; 4] = [MoveKey::Forward, MoveKey::Right, MoveKey::Back, MoveKey::Left];

/// Per-axis distance under which the autopilot stops pressing that axis.
const DEADZONE: f32 = 3.0;

/// Fraction of a reach radius the autopilot closes to before acting.
const REACH_MARGIN: f32 = 0.8;

/// Frames without progress before taking a detour.
const STUCK_FRAMES: u32 = 20;

/// Frames a detour key is held.
const DETOUR_FRAMES: u32 = 30;

/// Scripted player input.
#[derive(Debug, Default)]
pub struct Autopilot {
    held: MoveIntent,
    last_position: Option<GroundPos>,
    stalled: u32,
    detour: Option<(MoveKey, u32)>,
    detours: usize,
}

impl Autopilot {
    /// Creates an autopilot holding no keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Posts this frame's input.
    pub fn steer(
        &mut self,
        sim: &FrameScheduler,
        store: &GameStore,
        input: &InputHandle,
    ) -> Result<(), InputError> {
        let world = sim.world();
        let player = world.player.position;
        self.track_progress(player);

        let reach = sim.config().interaction_radius * REACH_MARGIN;
        let loot = store
            .ground_loot()
            .iter()
            .min_by(|a, b| {
                a.position
                    .distance(player)
                    .total_cmp(&b.position.distance(player))
            });
        if let Some(loot) = loot {
            if loot.position.distance(player) <= reach {
                self.hold(MoveIntent::default(), input)?;
                return input.click(loot.position);
            }
            return self.walk_toward(loot.position, player, input);
        }

        let Some(enemy) = pick_enemy(world.registry.enemies(), player) else {
            return self.hold(MoveIntent::default(), input);
        };
        let selected = world.target.enemy() == Some(enemy.id);
        if !selected {
            input.click(enemy.position)?;
        }

        if enemy.distance_to(player) <= sim.attack_range() * REACH_MARGIN {
            self.hold(MoveIntent::default(), input)?;
            if selected && sim.pending_action().is_none() {
                if sim.attack_ready_in() <= 0.0 {
                    input.trigger(ActionKind::Attack)?;
                } else if sim.skill_ready_in() <= 0.0
                    && store.stats().mana >= sim.config().skill_cost
                {
                    input.trigger(ActionKind::Skill)?;
                }
            }
            Ok(())
        } else {
            self.walk_toward(enemy.position, player, input)
        }
    }

    /// Releases every held key.
    pub fn release(&mut self, input: &InputHandle) -> Result<(), InputError> {
        self.hold(MoveIntent::default(), input)
    }

    fn track_progress(&mut self, player: GroundPos) {
        let stalled = self
            .last_position
            .is_some_and(|last| last.distance(player) < 0.01);
        self.last_position = Some(player);
        if stalled && !self.held.is_empty() {
            self.stalled += 1;
        } else {
            self.stalled = 0;
        }
    }

    fn walk_toward(
        &mut self,
        goal: GroundPos,
        player: GroundPos,
        input: &InputHandle,
    ) -> Result<(), InputError> {
        if self.stalled >= STUCK_FRAMES && self.detour.is_none() {
            let key = MOVE_KEYS[self.detours % MOVE_KEYS.len()];
            self.detours += 1;
            self.detour = Some((key, DETOUR_FRAMES));
            debug!(?key, "Autopilot stuck, taking a detour");
        }

        let mut want = MoveIntent::default();
        match self.detour {
            Some((key, frames)) => {
                want.press(key);
                self.detour = (frames > 1).then_some((key, frames - 1));
            },
            None => {
                let delta = goal - player;
                if delta.x > DEADZONE {
                    want.press(MoveKey::Right);
                } else if delta.x < -DEADZONE {
                    want.press(MoveKey::Left);
                }
                if delta.y > DEADZONE {
                    want.press(MoveKey::Back);
                } else if delta.y < -DEADZONE {
                    want.press(MoveKey::Forward);
                }
            },
        }
        self.hold(want, input)
    }

    /// Sends only the key transitions needed to reach `want`.
    fn hold(&mut self, want: MoveIntent, input: &InputHandle) -> Result<(), InputError> {
        for key in MOVE_KEYS {
            match (self.held.is_held(key), want.is_held(key)) {
                (false, true) => {
                    input.key_down(key)?;
                    self.held.press(key);
                },
                (true, false) => {
                    input.key_up(key)?;
                    self.held.release(key);
                },
                _ => {},
            }
        }
        Ok(())
    }
}

/// Nearest enemy that can die, else the nearest of any kind.
fn pick_enemy(enemies: &[Enemy], player: GroundPos) -> Option<&Enemy> {
    let nearest = |mortal: bool| {
        enemies
            .iter()
            .filter(|e| !mortal || !e.kind.never_dies())
            .min_by(|a, b| a.distance_to(player).total_cmp(&b.distance_to(player)))
    };
    nearest(true).or_else(|| nearest(false))
}

/// End-of-session report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    /// Zone at the end of the session
    pub zone: String,
    /// Frames run
    pub frames: u64,
    /// Simulated seconds
    pub elapsed: f64,
    /// Final player X
    pub x: f32,
    /// Final player Z
    pub z: f32,
    /// Name of the last selected target
    pub target: Option<String>,
    /// Enemies defeated
    pub kills: u32,
    /// Kill quests turned in
    pub quests_completed: u32,
    /// Skill uses
    pub abilities_used: u32,
    /// Total damage dealt
    pub damage_dealt: u64,
    /// Total damage taken
    pub damage_taken: u64,
    /// Gold at the end
    pub gold: u32,
    /// Items picked up
    pub items: usize,
    /// Level at the end
    pub level: u32,
    /// Health at the end
    pub health: u32,
    /// Whether the player was dead at the end
    pub game_over: bool,
    /// Times the player died
    pub deaths: u32,
    /// Events lost to a full outbound queue
    pub dropped_events: u64,
    /// Frames rendered while frozen
    pub frozen_frames: u64,
    /// Frames the player spent running
    pub running_frames: u64,
}

/// One headless play session.
#[derive(Debug)]
pub struct AethelgardApp {
    config: EngineConfig,
    sim: FrameScheduler,
    input: InputHandle,
    store: GameStore,
    clock: FrameClock,
    renderer: LogRenderer,
    pilot: Autopilot,
    start_zone: Zone,
    homeward: bool,
    quests_completed: u32,
}

impl AethelgardApp {
    /// Builds the world and the store from `config`.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let zone = config.start_zone().context("invalid start_zone")?;
        let sim = FrameScheduler::new(config.simulation.clone(), zone)?;
        let input = sim.input();
        let mut store = GameStore::new(config.player_class, config.simulation.seed)
            .with_power_shots(config.power_shots);
        let quest_ids: Vec<u32> = store.quests().iter().map(|q| q.id).collect();
        for id in quest_ids {
            store.accept_quest(id);
        }

        Ok(Self {
            clock: FrameClock::new(config.target_fps, config.fixed_timestep),
            renderer: LogRenderer::new(u64::from(config.target_fps)),
            pilot: Autopilot::new(),
            start_zone: zone,
            homeward: false,
            config,
            sim,
            input,
            store,
            quests_completed: 0,
        })
    }

    /// Runs one frame: travel, steer, tick, apply the events.
    pub fn step(&mut self) -> Result<()> {
        self.travel()?;
        self.pilot.steer(&self.sim, &self.store, &self.input)?;

        let delta = self.clock.delta_time();
        let events = self.sim.tick(delta, &self.store.snapshot(), &mut self.renderer);
        self.store.apply_all(&events);
        self.store.advance_transition(delta);
        self.turn_in_quests();

        self.clock.sleep_remainder();
        Ok(())
    }

    /// Respawns a dead player, heads back to the start zone once in the
    /// Castle, and forwards any zone the store wants loaded.
    fn travel(&mut self) -> Result<(), InputError> {
        if self.config.respawn_on_death && self.store.respawn() {
            self.homeward = self.start_zone != Zone::Castle;
        }

        if self.homeward && self.sim.zone() == Zone::Castle && !self.store.is_transitioning() {
            self.homeward = false;
            let cost = teleport_cost(self.start_zone);
            if let Err(refusal) = self.store.teleport(self.start_zone, cost) {
                info!(zone = %self.start_zone, ?refusal, "Staying in the Castle");
            }
        }

        match self.store.take_zone_request() {
            Some(zone) => self.input.request_zone(zone),
            None => Ok(()),
        }
    }

    /// Turns in finished quests and takes them again.
    fn turn_in_quests(&mut self) {
        let ready: Vec<u32> = self
            .store
            .quests()
            .iter()
            .filter(|q| q.is_ready())
            .map(|q| q.id)
            .collect();
        for id in ready {
            if self.store.complete_quest(id) {
                self.quests_completed += 1;
                self.store.accept_quest(id);
            }
        }
    }

    /// Runs until `max_frames`, or until the player dies with respawning off.
    pub fn run_session(&mut self) -> Result<SessionSummary> {
        info!(
            zone = %self.sim.zone(),
            class = ?self.store.class(),
            max_frames = self.config.max_frames,
            "Session starting"
        );

        while self.sim.frame_count() < self.config.max_frames {
            if self.store.is_game_over() && !self.config.respawn_on_death {
                info!(frame = self.sim.frame_count(), "Session ended by player death");
                break;
            }
            self.step()?;
        }
        self.pilot.release(&self.input)?;

        Ok(self.summary())
    }

    /// Current session statistics.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        let stats = self.store.stats();
        let position = self.store.position();
        SessionSummary {
            zone: self.sim.zone().to_string(),
            frames: self.renderer.frames(),
            elapsed: self.sim.elapsed(),
            x: position.x,
            z: position.y,
            target: self.store.target().map(|t| t.name.clone()),
            kills: self.store.kills(),
            quests_completed: self.quests_completed,
            abilities_used: self.store.abilities_used(),
            damage_dealt: self.store.damage_dealt(),
            damage_taken: self.store.damage_taken(),
            gold: stats.gold,
            items: self.store.inventory().len(),
            level: stats.level,
            health: stats.health,
            game_over: self.store.is_game_over(),
            deaths: self.store.deaths(),
            dropped_events: self.sim.dropped_events(),
            frozen_frames: self.renderer.frozen_frames(),
            running_frames: self.renderer.running_frames(),
        }
    }
}

/// Runs a headless session with `config`.
pub fn run(config: EngineConfig) -> Result<SessionSummary> {
    let mut app = AethelgardApp::new(config)?;
    let summary = app.run_session()?;

    info!(
        fps = format_args!("{:.1}", app.clock.current_fps()),
        avg_frame_ms = format_args!("{:.2}", app.clock.average_frame_time_ms()),
        summary = %serde_json::to_string(&summary)?,
        "Session finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aethelgard_gameplay::{EnemyKind, Intent, InputSession, LootKind, SimEvent};

    fn config(zone: Zone, frames: u64) -> EngineConfig {
        EngineConfig {
            start_zone: zone.name().to_string(),
            max_frames: frames,
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_session_runs_to_frame_limit() {
        let mut app = AethelgardApp::new(config(Zone::Forest, 30)).expect("app");
        let summary = app.run_session().expect("session");
        assert_eq!(summary.frames, 30);
        assert_eq!(summary.zone, "Forest");
        assert!((summary.elapsed - 0.5).abs() < 1e-3);
        assert_eq!(summary.dropped_events, 0);
    }

    #[test]
    fn test_unknown_start_zone_is_rejected() {
        let mut config = EngineConfig::default();
        config.start_zone = "Atlantis".to_string();
        assert!(AethelgardApp::new(config).is_err());
    }

    #[test]
    fn test_invalid_simulation_is_rejected() {
        let mut config = EngineConfig::default();
        config.simulation.attack_cooldown = -1.0;
        assert!(AethelgardApp::new(config).is_err());
    }

    #[test]
    fn test_hold_sends_only_transitions() {
        let session = InputSession::open(16);
        let input = session.handle();
        let mut pilot = Autopilot::new();

        let mut want = MoveIntent::default();
        want.press(MoveKey::Right);
        want.press(MoveKey::Back);
        pilot.hold(want, &input).expect("send");
        pilot.hold(want, &input).expect("send");
        assert_eq!(
            session.drain(),
            vec![Intent::KeyDown(MoveKey::Right), Intent::KeyDown(MoveKey::Back)]
        );

        pilot.release(&input).expect("send");
        assert_eq!(
            session.drain(),
            vec![Intent::KeyUp(MoveKey::Right), Intent::KeyUp(MoveKey::Back)]
        );
    }

    #[test]
    fn test_walk_presses_toward_goal() {
        let session = InputSession::open(16);
        let input = session.handle();
        let mut pilot = Autopilot::new();

        pilot
            .walk_toward(GroundPos::new(-50.0, 1.0), GroundPos::ZERO, &input)
            .expect("send");
        assert_eq!(session.drain(), vec![Intent::KeyDown(MoveKey::Left)]);
    }

    #[test]
    fn test_stuck_pilot_takes_detour() {
        let session = InputSession::open(64);
        let input = session.handle();
        let mut pilot = Autopilot::new();
        let goal = GroundPos::new(100.0, 0.0);

        for _ in 0..=STUCK_FRAMES {
            pilot.track_progress(GroundPos::ZERO);
            pilot.walk_toward(goal, GroundPos::ZERO, &input).expect("send");
        }
        let intents = session.drain();
        assert_eq!(intents.first(), Some(&Intent::KeyDown(MoveKey::Right)));
        assert!(intents.contains(&Intent::KeyUp(MoveKey::Right)));
        assert!(intents.contains(&Intent::KeyDown(MoveKey::Forward)));
    }

    #[test]
    fn test_pilot_collects_adjacent_loot() {
        let mut app = AethelgardApp::new(config(Zone::Castle, 10)).expect("app");
        let at = app.sim.world().player.position + GroundPos::new(5.0, 0.0);
        let id = app.store.spawn_loot(at, LootKind::Gold { amount: 20 });

        app.pilot.steer(&app.sim, &app.store, &app.input).expect("steer");
        let events = app.sim.tick(1.0 / 60.0, &app.store.snapshot(), &mut app.renderer);
        assert!(events.contains(&SimEvent::PickupLoot { id }));

        app.store.apply_all(&events);
        assert!(app.store.ground_loot().is_empty());
        assert_eq!(app.store.stats().gold, 120);
    }

    #[test]
    fn test_finished_quests_are_turned_in_and_retaken() {
        let mut app = AethelgardApp::new(config(Zone::Forest, 10)).expect("app");
        for _ in 0..5 {
            app.store.apply(&SimEvent::EnemyDefeated {
                kind: EnemyKind::Wolf,
                x: 0.0,
                z: 0.0,
            });
        }
        app.turn_in_quests();

        assert_eq!(app.quests_completed, 1);
        let wolf_quest = &app.store.quests()[0];
        assert!(wolf_quest.completed);
        assert!(wolf_quest.active);
        assert_eq!(wolf_quest.progress, 0);
    }

    fn kill_player(app: &mut AethelgardApp) {
        app.store.apply(&SimEvent::DamageTaken {
            amount: u32::MAX,
            source: EnemyKind::Wolf,
        });
        assert!(app.store.is_game_over());
    }

    #[test]
    fn test_death_respawns_in_castle_and_teleports_home() {
        let mut app = AethelgardApp::new(config(Zone::Forest, 400)).expect("app");
        kill_player(&mut app);

        app.step().expect("step");
        assert_eq!(app.sim.zone(), Zone::Castle);
        assert!(!app.store.is_game_over());
        assert_eq!(app.store.stats().health, app.store.stats().max_health);

        // Fare is charged before the world unfreezes
        app.step().expect("step");
        assert!(app.store.is_transitioning());
        assert_eq!(app.store.stats().gold, 100 - teleport_cost(Zone::Forest));
        let frozen_before = app.renderer.frozen_frames();

        for _ in 0..150 {
            app.step().expect("step");
        }
        assert_eq!(app.sim.zone(), Zone::Forest);
        assert!(!app.store.is_transitioning());
        assert!(app.renderer.frozen_frames() - frozen_before >= 100);

        let summary = app.summary();
        assert_eq!(summary.deaths, 1);
        assert!(!summary.game_over);
    }

    #[test]
    fn test_broke_player_stays_in_castle() {
        let mut app = AethelgardApp::new(config(Zone::Village, 100)).expect("app");
        kill_player(&mut app);

        for _ in 0..5 {
            app.step().expect("step");
        }
        assert_eq!(app.sim.zone(), Zone::Castle);
        assert!(!app.store.is_transitioning());
        assert_eq!(app.store.stats().gold, 100);
    }

    #[test]
    fn test_death_ends_session_without_respawn() {
        let mut config = config(Zone::Forest, 100);
        config.respawn_on_death = false;
        let mut app = AethelgardApp::new(config).expect("app");
        kill_player(&mut app);

        let summary = app.run_session().expect("session");
        assert_eq!(summary.frames, 0);
        assert!(summary.game_over);
        assert_eq!(summary.deaths, 1);
        assert_eq!(summary.zone, "Forest");
    }

    #[test]
    fn test_pick_enemy_prefers_mortal() {
        let dummy = Enemy::new(EnemyKind::TrainingDummy, GroundPos::new(1.0, 0.0));
        let wolf = Enemy::new(EnemyKind::Wolf, GroundPos::new(100.0, 0.0));
        let enemies = [dummy.clone(), wolf.clone()];
        assert_eq!(pick_enemy(&enemies, GroundPos::ZERO).map(|e| e.id), Some(wolf.id));
        assert_eq!(
            pick_enemy(&[dummy.clone()], GroundPos::ZERO).map(|e| e.id),
            Some(dummy.id)
        );
        assert!(pick_enemy(&[], GroundPos::ZERO).is_none());
    }
}
