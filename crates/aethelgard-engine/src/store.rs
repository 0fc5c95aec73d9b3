//! Reference game-state store.
//!
//! The simulation core owns no player stats, loot or quests. This store
//! plays the host's part: it applies each frame's event batch and hands a
//! fresh [`ExternalState`] snapshot to the next frame.

use aethelgard_common::{GroundPos, LootId};
use aethelgard_gameplay::{
    EnemyKind, ExternalState, FreezeFlags, GroundLoot, LootKind, PlayerVitals, SimEvent,
    TargetInfo, Zone,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Smallest gold drop.
const GOLD_DROP_MIN: u32 = 15;
/// Largest gold drop (inclusive).
const GOLD_DROP_MAX: u32 = 34;
/// Experience granted per defeated enemy.
const DEFEAT_XP: u32 = 25;
/// Experience granted on quest turn-in.
const QUEST_XP: u32 = 100;
/// Experience lost on respawn.
const DEATH_XP_PENALTY: u32 = 50;
/// Chance that a wolf also drops a pelt.
const PELT_DROP_CHANCE: f32 = 0.3;
/// Item dropped by wolves.
pub const WOLF_PELT: &str = "Wolf Pelt";
/// Seconds into a teleport at which the destination loads.
const TRANSITION_LOAD_AT: f32 = 1.0;
/// Seconds a teleport keeps the world frozen.
const TRANSITION_LENGTH: f32 = 2.0;

/// Gold charged to teleport to `zone`.
#[must_use]
pub const fn teleport_cost(zone: Zone) -> u32 {
    match zone {
        Zone::Castle => 0,
        Zone::Forest => 50,
        Zone::Village => 150,
    }
}

/// Why a teleport was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeleportRefusal {
    /// Not enough gold for the fare
    Fare {
        /// Gold required
        cost: u32,
        /// Gold held
        gold: u32,
    },
    /// Another transition is still running
    Busy,
}

/// A teleport in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    zone: Zone,
    elapsed: f32,
    loaded: bool,
}

/// Playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    /// Heavy melee
    Warrior,
    /// Caster
    Mage,
    /// Ranged
    Archer,
}

impl CharacterClass {
    /// Level-one stats for this class.
    #[must_use]
    pub const fn initial_stats(self) -> PlayerStats {
        let (health, mana) = match self {
            Self::Warrior => (150, 50),
            Self::Mage => (80, 150),
            Self::Archer => (100, 80),
        };
        PlayerStats {
            health,
            max_health: health,
            mana,
            max_mana: mana,
            level: 1,
            xp: 0,
            gold: 100,
        }
    }
}

/// Player progression as the store tracks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Current health
    pub health: u32,
    /// Maximum health
    pub max_health: u32,
    /// Current mana
    pub mana: u32,
    /// Maximum mana
    pub max_mana: u32,
    /// Character level
    pub level: u32,
    /// Experience toward the next level
    pub xp: u32,
    /// Gold
    pub gold: u32,
}

impl PlayerStats {
    /// Adds experience, levelling up at `level * 100`.
    ///
    /// Returns true if a level was gained.
    pub fn gain_xp(&mut self, amount: u32) -> bool {
        self.xp = self.xp.saturating_add(amount);
        if self.xp >= self.level * 100 {
            self.level += 1;
            self.xp = 0;
            self.health = self.max_health;
            return true;
        }
        false
    }
}

/// A quest that counts defeats of one enemy name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillQuest {
    /// Quest id
    pub id: u32,
    /// Title
    pub title: String,
    /// Enemy display name that counts
    pub target: String,
    /// Kills required
    pub count: u32,
    /// Kills so far
    pub progress: u32,
    /// Accepted and not yet turned in
    pub active: bool,
    /// Turned in at least once
    pub completed: bool,
    /// Gold on turn-in
    pub reward_gold: u32,
}

impl KillQuest {
    fn new(id: u32, title: &str, target: &str, count: u32, reward_gold: u32) -> Self {
        Self {
            id,
            title: title.to_string(),
            target: target.to_string(),
            count,
            progress: 0,
            active: false,
            completed: false,
            reward_gold,
        }
    }

    /// Whether the kill count has been reached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.active && self.progress >= self.count
    }
}

fn default_quests() -> Vec<KillQuest> {
    vec![
        KillQuest::new(1, "The Wolf Menace", EnemyKind::Wolf.name(), 5, 50),
        KillQuest::new(2, "Restless Bones", EnemyKind::Skeleton.name(), 5, 120),
        KillQuest::new(4, "Undead King Fall", "Undead King", 1, 500),
    ]
}

/// The host-side state the simulation reports into.
#[derive(Debug)]
pub struct GameStore {
    class: CharacterClass,
    stats: PlayerStats,
    flags: FreezeFlags,
    power_shots: bool,
    ground_loot: Vec<GroundLoot>,
    quests: Vec<KillQuest>,
    inventory: Vec<String>,
    position: GroundPos,
    target: Option<TargetInfo>,
    kills: u32,
    damage_dealt: u64,
    damage_taken: u64,
    abilities_used: u32,
    deaths: u32,
    transition: Option<Transition>,
    zone_request: Option<Zone>,
    next_loot: u64,
    rng: fastrand::Rng,
}

impl GameStore {
    /// Creates a store with level-one stats for `class`.
    #[must_use]
    pub fn new(class: CharacterClass, seed: u64) -> Self {
        Self {
            class,
            stats: class.initial_stats(),
            flags: FreezeFlags::default(),
            power_shots: false,
            ground_loot: Vec::new(),
            quests: default_quests(),
            inventory: Vec::new(),
            position: GroundPos::ZERO,
            target: None,
            kills: 0,
            damage_dealt: 0,
            damage_taken: 0,
            abilities_used: 0,
            deaths: 0,
            transition: None,
            zone_request: None,
            next_loot: 1,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Snapshot for the next frame.
    #[must_use]
    pub fn snapshot(&self) -> ExternalState {
        ExternalState {
            flags: self.flags,
            vitals: PlayerVitals::new(
                self.stats.health,
                self.stats.max_health,
                self.stats.mana,
                self.stats.max_mana,
                self.power_shots,
            ),
            ground_loot: self.ground_loot.clone(),
        }
    }

    /// Applies one frame's events in order.
    pub fn apply_all(&mut self, events: &[SimEvent]) {
        for event in events {
            self.apply(event);
        }
    }

    /// Applies a single event.
    pub fn apply(&mut self, event: &SimEvent) {
        match event {
            SimEvent::PlayerMoved { x, z } => self.position = GroundPos::new(*x, *z),
            SimEvent::TargetChanged(target) => self.target = target.clone(),
            SimEvent::DamageDealt { amount } => {
                self.damage_dealt += u64::from(*amount);
                debug!(amount, "Dealt damage");
            },
            SimEvent::DamageTaken { amount, source } => self.take_damage(*amount, *source),
            SimEvent::EnemyDefeated { kind, x, z } => {
                self.record_defeat(*kind, GroundPos::new(*x, *z));
            },
            SimEvent::PickupLoot { id } => self.pickup(id),
            SimEvent::Interaction { npc, dialogue_key } => {
                info!(%npc, %dialogue_key, "Conversation started");
            },
            SimEvent::UseMana { amount } => {
                self.stats.mana = self.stats.mana.saturating_sub(*amount);
            },
            SimEvent::AbilityUsed => self.abilities_used += 1,
        }
    }

    fn take_damage(&mut self, amount: u32, source: EnemyKind) {
        self.damage_taken += u64::from(amount);
        self.stats.health = self.stats.health.saturating_sub(amount);
        debug!(amount, %source, health = self.stats.health, "Took damage");
        if self.stats.health == 0 && !self.flags.game_over {
            self.flags.game_over = true;
            self.deaths += 1;
            info!(%source, "Player was defeated");
        }
    }

    fn record_defeat(&mut self, kind: EnemyKind, at: GroundPos) {
        self.kills += 1;
        info!(%kind, "{kind} slain");

        let amount = self.rng.u32(GOLD_DROP_MIN..=GOLD_DROP_MAX);
        self.spawn_loot(at, LootKind::Gold { amount });
        if kind == EnemyKind::Wolf && self.rng.f32() < PELT_DROP_CHANCE {
            self.spawn_loot(at, LootKind::Item { name: WOLF_PELT.to_string() });
        }

        for quest in self.quests.iter_mut().filter(|q| q.active && q.target == kind.name()) {
            quest.progress = (quest.progress + 1).min(quest.count);
        }

        if self.stats.gain_xp(DEFEAT_XP) {
            info!(level = self.stats.level, "Level up");
        }
    }

    /// Drops loot on the ground under a fresh id.
    pub fn spawn_loot(&mut self, position: GroundPos, kind: LootKind) -> LootId {
        let id = LootId::new(format!("loot-{}", self.next_loot));
        self.next_loot += 1;
        self.ground_loot.push(GroundLoot {
            id: id.clone(),
            kind,
            position,
        });
        id
    }

    fn pickup(&mut self, id: &LootId) {
        let Some(index) = self.ground_loot.iter().position(|loot| &loot.id == id) else {
            debug!(%id, "Pickup of loot that is already gone");
            return;
        };
        match self.ground_loot.remove(index).kind {
            LootKind::Gold { amount } => {
                self.stats.gold = self.stats.gold.saturating_add(amount);
                info!(amount, gold = self.stats.gold, "Picked up gold");
            },
            LootKind::Item { name } => {
                info!(%name, "Picked up item");
                self.inventory.push(name);
            },
        }
    }

    /// Turns the power-shot damage bonus on or off.
    #[must_use]
    pub fn with_power_shots(mut self, active: bool) -> Self {
        self.power_shots = active;
        self
    }

    /// Accepts a quest. Returns false if it is unknown or already active.
    pub fn accept_quest(&mut self, id: u32) -> bool {
        match self.quests.iter_mut().find(|q| q.id == id && !q.active) {
            Some(quest) => {
                quest.active = true;
                quest.progress = 0;
                info!(title = %quest.title, "Quest accepted");
                true
            },
            None => false,
        }
    }

    /// Turns in a finished quest for its rewards.
    pub fn complete_quest(&mut self, id: u32) -> bool {
        let Some(quest) = self.quests.iter_mut().find(|q| q.id == id && q.is_ready()) else {
            return false;
        };
        info!(title = %quest.title, repeat = quest.completed, "Quest completed");
        quest.active = false;
        quest.completed = true;
        quest.progress = 0;
        self.stats.gold = self.stats.gold.saturating_add(quest.reward_gold);
        self.stats.gain_xp(QUEST_XP);
        true
    }

    /// Brings a dead player back in the Castle at full health and mana,
    /// minus 50 experience (floored at zero).
    ///
    /// Cancels any teleport in flight. Returns false if the player is alive.
    pub fn respawn(&mut self) -> bool {
        if !self.flags.game_over {
            return false;
        }
        self.flags.game_over = false;
        self.flags.transitioning = false;
        self.transition = None;
        self.stats.health = self.stats.max_health;
        self.stats.mana = self.stats.max_mana;
        self.stats.xp = self.stats.xp.saturating_sub(DEATH_XP_PENALTY);
        self.position = GroundPos::ZERO;
        self.zone_request = Some(Zone::Castle);
        info!(xp = self.stats.xp, "Returning to the safety of the Castle");
        true
    }

    /// Pays `cost` gold and starts a transition to `zone`.
    ///
    /// The world stays frozen for the whole transition; the destination is
    /// requested partway through (see [`Self::advance_transition`]).
    pub fn teleport(&mut self, zone: Zone, cost: u32) -> Result<(), TeleportRefusal> {
        if self.transition.is_some() {
            return Err(TeleportRefusal::Busy);
        }
        if self.stats.gold < cost {
            info!(%zone, cost, gold = self.stats.gold, "Not enough gold to teleport");
            return Err(TeleportRefusal::Fare {
                cost,
                gold: self.stats.gold,
            });
        }
        self.stats.gold -= cost;
        self.flags.transitioning = true;
        self.transition = Some(Transition {
            zone,
            elapsed: 0.0,
            loaded: false,
        });
        info!(%zone, cost, "Entering {zone}...");
        Ok(())
    }

    /// Advances a running transition by `delta` seconds.
    pub fn advance_transition(&mut self, delta: f32) {
        let Some(transition) = self.transition.as_mut() else {
            return;
        };
        transition.elapsed += delta;
        if !transition.loaded && transition.elapsed >= TRANSITION_LOAD_AT {
            transition.loaded = true;
            self.zone_request = Some(transition.zone);
            self.position = GroundPos::ZERO;
        }
        if transition.elapsed >= TRANSITION_LENGTH {
            debug!(zone = %transition.zone, "Transition finished");
            self.transition = None;
            self.flags.transitioning = false;
        }
    }

    /// Takes the zone the simulation should load next, if any.
    pub fn take_zone_request(&mut self) -> Option<Zone> {
        self.zone_request.take()
    }

    /// Whether a teleport is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.flags.transitioning
    }

    /// Times the player has died.
    #[must_use]
    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    /// Chosen class.
    #[must_use]
    pub fn class(&self) -> CharacterClass {
        self.class
    }

    /// Current stats.
    #[must_use]
    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    /// Whether the player has died.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.flags.game_over
    }

    /// Loot lying on the ground.
    #[must_use]
    pub fn ground_loot(&self) -> &[GroundLoot] {
        &self.ground_loot
    }

    /// Quest log.
    #[must_use]
    pub fn quests(&self) -> &[KillQuest] {
        &self.quests
    }

    /// Picked-up items.
    #[must_use]
    pub fn inventory(&self) -> &[String] {
        &self.inventory
    }

    /// Last reported player position.
    #[must_use]
    pub fn position(&self) -> GroundPos {
        self.position
    }

    /// Last reported target.
    #[must_use]
    pub fn target(&self) -> Option<&TargetInfo> {
        self.target.as_ref()
    }

    /// Enemies defeated.
    #[must_use]
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Total damage dealt.
    #[must_use]
    pub fn damage_dealt(&self) -> u64 {
        self.damage_dealt
    }

    /// Total damage taken.
    #[must_use]
    pub fn damage_taken(&self) -> u64 {
        self.damage_taken
    }

    /// Skill uses.
    #[must_use]
    pub fn abilities_used(&self) -> u32 {
        self.abilities_used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aethelgard_gameplay::TargetKind;

    fn store() -> GameStore {
        GameStore::new(CharacterClass::Warrior, 7)
    }

    #[test]
    fn test_class_stats() {
        assert_eq!(CharacterClass::Warrior.initial_stats().max_health, 150);
        assert_eq!(CharacterClass::Mage.initial_stats().max_mana, 150);
        assert_eq!(CharacterClass::Archer.initial_stats().health, 100);
        assert_eq!(CharacterClass::Archer.initial_stats().gold, 100);
    }

    #[test]
    fn test_damage_until_game_over() {
        let mut store = store();
        store.apply(&SimEvent::DamageTaken { amount: 100, source: EnemyKind::Wolf });
        assert_eq!(store.stats().health, 50);
        assert!(!store.is_game_over());

        store.apply(&SimEvent::DamageTaken { amount: 60, source: EnemyKind::Wolf });
        assert_eq!(store.stats().health, 0);
        assert!(store.is_game_over());
        assert!(store.snapshot().flags.game_over);
    }

    #[test]
    fn test_mana_never_underflows() {
        let mut store = store();
        store.apply(&SimEvent::UseMana { amount: 20 });
        assert_eq!(store.snapshot().vitals.mana(), 30);
        store.apply(&SimEvent::UseMana { amount: 80 });
        assert_eq!(store.snapshot().vitals.mana(), 0);
    }

    #[test]
    fn test_defeat_drops_gold_and_pickup_collects_it() {
        let mut store = store();
        store.apply(&SimEvent::EnemyDefeated { kind: EnemyKind::Wolf, x: 10.0, z: -5.0 });

        let loot = store.ground_loot()[0].clone();
        assert_eq!(loot.position, GroundPos::new(10.0, -5.0));
        let LootKind::Gold { amount } = loot.kind else {
            panic!("expected gold");
        };
        assert!((GOLD_DROP_MIN..=GOLD_DROP_MAX).contains(&amount));

        store.apply(&SimEvent::PickupLoot { id: loot.id.clone() });
        assert!(store.ground_loot().is_empty());
        assert_eq!(store.stats().gold, 100 + amount);

        // Second pickup of the same id is ignored
        store.apply(&SimEvent::PickupLoot { id: loot.id });
        assert_eq!(store.stats().gold, 100 + amount);
    }

    #[test]
    fn test_loot_ids_are_unique() {
        let mut store = store();
        let a = store.spawn_loot(GroundPos::ZERO, LootKind::Gold { amount: 1 });
        let b = store.spawn_loot(GroundPos::ZERO, LootKind::Item { name: "Wolf Pelt".into() });
        assert_ne!(a, b);

        store.apply(&SimEvent::PickupLoot { id: b });
        assert_eq!(store.inventory(), ["Wolf Pelt".to_string()]);
    }

    #[test]
    fn test_kill_quest_progress_is_capped() {
        let mut store = store();
        assert!(store.accept_quest(1));
        for _ in 0..7 {
            store.apply(&SimEvent::EnemyDefeated { kind: EnemyKind::Wolf, x: 0.0, z: 0.0 });
        }
        store.apply(&SimEvent::EnemyDefeated { kind: EnemyKind::Skeleton, x: 0.0, z: 0.0 });

        let quest = &store.quests()[0];
        assert_eq!(quest.progress, 5);
        assert!(quest.is_ready());

        let gold = store.stats().gold;
        assert!(store.complete_quest(1));
        assert_eq!(store.stats().gold, gold + 50);
        assert!(!store.complete_quest(1));
    }

    #[test]
    fn test_level_up_restores_health() {
        let mut store = store();
        store.apply(&SimEvent::DamageTaken { amount: 40, source: EnemyKind::Skeleton });
        for _ in 0..4 {
            store.apply(&SimEvent::EnemyDefeated { kind: EnemyKind::Skeleton, x: 0.0, z: 0.0 });
        }
        assert_eq!(store.stats().level, 2);
        assert_eq!(store.stats().xp, 0);
        assert_eq!(store.stats().health, 150);
        assert_eq!(store.kills(), 4);
    }

    fn kill(store: &mut GameStore, kind: EnemyKind) {
        store.apply(&SimEvent::EnemyDefeated { kind, x: 0.0, z: 0.0 });
    }

    fn die(store: &mut GameStore) {
        store.apply(&SimEvent::DamageTaken {
            amount: u32::MAX,
            source: EnemyKind::Skeleton,
        });
    }

    #[test]
    fn test_respawn_restores_vitals_in_castle() {
        let mut store = store();
        assert!(!store.respawn());

        kill(&mut store, EnemyKind::Skeleton);
        kill(&mut store, EnemyKind::Skeleton);
        kill(&mut store, EnemyKind::Skeleton);
        assert_eq!(store.stats().xp, 75);
        store.apply(&SimEvent::UseMana { amount: 30 });
        store.apply(&SimEvent::PlayerMoved { x: 40.0, z: 12.0 });
        die(&mut store);
        assert!(store.is_game_over());
        assert_eq!(store.deaths(), 1);

        assert!(store.respawn());
        assert!(!store.is_game_over());
        assert_eq!(store.stats().health, 150);
        assert_eq!(store.stats().mana, 50);
        assert_eq!(store.stats().xp, 25);
        assert_eq!(store.position(), GroundPos::ZERO);
        assert_eq!(store.take_zone_request(), Some(Zone::Castle));
        assert_eq!(store.take_zone_request(), None);
    }

    #[test]
    fn test_respawn_xp_floors_at_zero() {
        let mut store = store();
        kill(&mut store, EnemyKind::Skeleton);
        die(&mut store);
        assert!(store.respawn());
        assert_eq!(store.stats().xp, 0);
        assert_eq!(store.stats().level, 1);
    }

    #[test]
    fn test_teleport_refused_without_gold() {
        let mut store = store();
        assert_eq!(
            store.teleport(Zone::Village, teleport_cost(Zone::Village)),
            Err(TeleportRefusal::Fare { cost: 150, gold: 100 })
        );
        assert_eq!(store.stats().gold, 100);
        assert!(!store.is_transitioning());
        assert!(!store.snapshot().flags.any());
    }

    #[test]
    fn test_teleport_charges_and_transitions() {
        let mut store = store();
        assert_eq!(store.teleport(Zone::Forest, teleport_cost(Zone::Forest)), Ok(()));
        assert_eq!(store.stats().gold, 50);
        assert!(store.snapshot().flags.transitioning);
        assert_eq!(store.teleport(Zone::Castle, 0), Err(TeleportRefusal::Busy));

        store.advance_transition(0.5);
        assert_eq!(store.take_zone_request(), None);
        store.advance_transition(0.5);
        assert_eq!(store.take_zone_request(), Some(Zone::Forest));
        assert!(store.is_transitioning());

        store.advance_transition(0.5);
        assert_eq!(store.take_zone_request(), None);
        store.advance_transition(0.5);
        assert!(!store.is_transitioning());
        assert!(!store.snapshot().flags.any());

        // Exact fare leaves nothing
        assert_eq!(store.teleport(Zone::Forest, 50), Ok(()));
        assert_eq!(store.stats().gold, 0);
    }

    #[test]
    fn test_respawn_cancels_teleport() {
        let mut store = store();
        assert_eq!(store.teleport(Zone::Forest, 50), Ok(()));
        die(&mut store);
        assert!(store.respawn());
        assert!(!store.snapshot().flags.any());

        store.advance_transition(5.0);
        assert_eq!(store.take_zone_request(), Some(Zone::Castle));
        assert_eq!(store.take_zone_request(), None);
    }

    #[test]
    fn test_gold_saturates() {
        let mut store = store();
        let id = store.spawn_loot(GroundPos::ZERO, LootKind::Gold { amount: u32::MAX });
        store.apply(&SimEvent::PickupLoot { id });
        assert_eq!(store.stats().gold, u32::MAX);

        let id = store.spawn_loot(GroundPos::ZERO, LootKind::Gold { amount: 20 });
        store.apply(&SimEvent::PickupLoot { id });
        assert_eq!(store.stats().gold, u32::MAX);

        assert!(store.accept_quest(1));
        for _ in 0..5 {
            kill(&mut store, EnemyKind::Wolf);
        }
        assert!(store.complete_quest(1));
        assert_eq!(store.stats().gold, u32::MAX);
    }

    #[test]
    fn test_wolves_drop_pelts() {
        let mut store = store();
        for _ in 0..50 {
            kill(&mut store, EnemyKind::Skeleton);
        }
        assert!(store
            .ground_loot()
            .iter()
            .all(|loot| matches!(loot.kind, LootKind::Gold { .. })));

        for _ in 0..50 {
            kill(&mut store, EnemyKind::Wolf);
        }
        let pelts: Vec<LootId> = store
            .ground_loot()
            .iter()
            .filter(|loot| matches!(&loot.kind, LootKind::Item { name } if name == WOLF_PELT))
            .map(|loot| loot.id.clone())
            .collect();
        assert!(!pelts.is_empty());
        assert!(pelts.len() < 50);

        for id in pelts.clone() {
            store.apply(&SimEvent::PickupLoot { id });
        }
        assert_eq!(store.inventory().len(), pelts.len());
        assert!(store.inventory().iter().all(|name| name == WOLF_PELT));
    }

    #[test]
    fn test_mirrors() {
        let mut store = store();
        store.apply(&SimEvent::PlayerMoved { x: 3.0, z: 4.0 });
        store.apply(&SimEvent::TargetChanged(Some(TargetInfo {
            name: "Wolf".into(),
            current_hp: 30,
            max_hp: 50,
            kind: TargetKind::Enemy,
        })));
        assert_eq!(store.position(), GroundPos::new(3.0, 4.0));
        assert_eq!(store.target().map(|t| t.current_hp), Some(30));

        store.apply(&SimEvent::TargetChanged(None));
        assert!(store.target().is_none());
    }
}
