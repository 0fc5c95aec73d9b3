//! Zones and their static layout tables.
//!
//! Each zone's colliders, enemy spawn groups and NPC roster are produced by a
//! builder below. Scattered content is drawn from a generator seeded per
//! zone, so a layout is identical every time it is built. All layouts are
//! built and validated together in [`ZoneCatalog::new`]; a defect in the
//! tables surfaces there, never while frames are running.

use aethelgard_common::{ground, is_finite, GroundPos, LayoutError, ZoneError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::collision::{Collider, CollisionIndex, CollisionQuery};
use crate::entity::EnemyKind;

/// Player entry point shared by every zone.
const SPAWN_POINT: GroundPos = ground(0.0, 150.0);

/// Clearance kept free of scattered obstacles around the spawn point.
const SPAWN_CLEARANCE: f32 = 16.0;

/// Upper bound on re-draws for one scattered placement.
const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

/// A world region. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Walled town with guilds, shops and training dummies
    Castle,
    /// Wolf-infested woods
    Forest,
    /// Ruined village haunted by skeletons
    Village,
}

impl Zone {
    /// Every zone, in catalog order.
    pub const ALL: [Self; 3] = [Self::Castle, Self::Forest, Self::Village];

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Castle => "Castle",
            Self::Forest => "Forest",
            Self::Village => "Village",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Castle => 0,
            Self::Forest => 1,
            Self::Village => 2,
        }
    }

    const fn scatter_seed(self) -> u64 {
        match self {
            Self::Castle => 0xCA57_1E00,
            Self::Forest => 0xF0_2E57,
            Self::Village => 0x0071_1A6E,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Zone {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|zone| zone.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ZoneError::Unknown(s.to_string()))
    }
}

/// One enemy in a zone's spawn table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    /// Species
    pub kind: EnemyKind,
    /// Spawn origin
    pub position: GroundPos,
}

/// One NPC in a zone's roster.
#[derive(Debug, Clone, PartialEq)]
pub struct NpcSpawn {
    /// Display name
    pub name: &'static str,
    /// Dialogue key resolved by the host
    pub dialogue_key: &'static str,
    /// Fixed position
    pub position: GroundPos,
    /// Facing angle
    pub facing: f32,
}

/// Static content of a zone.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneLayout {
    /// Which zone this describes
    pub zone: Zone,
    /// Player entry point
    pub spawn: GroundPos,
    /// Validated static geometry
    pub colliders: CollisionIndex,
    /// Enemy spawn table
    pub enemies: Vec<EnemySpawn>,
    /// NPC roster
    pub npcs: Vec<NpcSpawn>,
}

impl ZoneLayout {
    /// Builds and validates the layout for `zone`.
    pub fn build(zone: Zone) -> Result<Self, LayoutError> {
        let draft = match zone {
            Zone::Castle => castle(),
            Zone::Forest => forest()?,
            Zone::Village => village()?,
        };
        draft.finish(zone)
    }

    /// Number of enemies of one kind in the spawn table.
    #[must_use]
    pub fn enemy_count(&self, kind: EnemyKind) -> usize {
        self.enemies.iter().filter(|e| e.kind == kind).count()
    }
}

/// Every zone's layout, built once.
#[derive(Debug, Clone)]
pub struct ZoneCatalog {
    layouts: Vec<ZoneLayout>,
}

impl ZoneCatalog {
    /// Builds and validates every zone layout.
    pub fn new() -> Result<Self, LayoutError> {
        let layouts = Zone::ALL
            .into_iter()
            .map(ZoneLayout::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { layouts })
    }

    /// Layout of `zone`.
    #[must_use]
    pub fn layout(&self, zone: Zone) -> &ZoneLayout {
        &self.layouts[zone.index()]
    }
}

// ============================================================================
// Layout construction
// ============================================================================

#[derive(Default)]
struct Draft {
    colliders: Vec<Collider>,
    enemies: Vec<EnemySpawn>,
    npcs: Vec<NpcSpawn>,
}

impl Draft {
    fn finish(self, zone: Zone) -> Result<ZoneLayout, LayoutError> {
        let name = zone.name();
        let colliders = CollisionIndex::build(name, self.colliders)?;

        if colliders.is_blocked(SPAWN_POINT, SPAWN_CLEARANCE / 2.0) {
            return Err(LayoutError::SpawnBlocked {
                zone: name,
                x: SPAWN_POINT.x,
                z: SPAWN_POINT.y,
            });
        }
        for (index, enemy) in self.enemies.iter().enumerate() {
            if !is_finite(enemy.position) {
                return Err(LayoutError::NonFinite {
                    zone: name,
                    what: format!("enemy {index}"),
                });
            }
        }
        for npc in &self.npcs {
            if !is_finite(npc.position) {
                return Err(LayoutError::NonFinite {
                    zone: name,
                    what: format!("npc {}", npc.name),
                });
            }
        }

        debug!(
            zone = name,
            colliders = colliders.len(),
            enemies = self.enemies.len(),
            npcs = self.npcs.len(),
            "Built zone layout"
        );

        Ok(ZoneLayout {
            zone,
            spawn: SPAWN_POINT,
            colliders,
            enemies: self.enemies,
            npcs: self.npcs,
        })
    }

    /// Walled building with a door gap in the north or south wall.
    fn building(&mut self, center: GroundPos, width: f32, depth: f32, north_door: bool) {
        const THICKNESS: f32 = 2.0;
        const DOOR: f32 = 30.0;

        let mut wall = |dx: f32, dz: f32, w: f32, d: f32| {
            self.colliders
                .push(Collider::from_center(center + ground(dx, dz), w, d));
        };

        wall(-width / 2.0, 0.0, THICKNESS, depth);
        wall(width / 2.0, 0.0, THICKNESS, depth);

        let half_segment = (width - DOOR) / 2.0;
        let offset = (width - DOOR) / 4.0 + DOOR / 2.0;
        for (dz, has_door) in [(-depth / 2.0, north_door), (depth / 2.0, !north_door)] {
            if has_door {
                wall(-offset, dz, half_segment, THICKNESS);
                wall(offset, dz, half_segment, THICKNESS);
            } else {
                wall(0.0, dz, width, THICKNESS);
            }
        }
    }

    fn npc(&mut self, name: &'static str, dialogue_key: &'static str, x: f32, z: f32, facing: f32) {
        self.npcs.push(NpcSpawn {
            name,
            dialogue_key,
            position: ground(x, z),
            facing,
        });
    }

    /// Square obstacles scattered in `±half`, never covering the spawn point.
    fn scatter_obstacles(
        &mut self,
        rng: &mut fastrand::Rng,
        zone: Zone,
        count: usize,
        size: f32,
        half: f32,
    ) -> Result<(), LayoutError> {
        for _ in 0..count {
            let collider = place(rng, zone, "obstacle", half, |pos| {
                let collider = Collider::from_center(pos, size, size);
                (!collider.overlaps_circle(SPAWN_POINT, SPAWN_CLEARANCE)).then_some(collider)
            })?;
            self.colliders.push(collider);
        }
        Ok(())
    }

    /// Enemies scattered in `±half`, never inside static geometry.
    fn scatter_enemies(
        &mut self,
        rng: &mut fastrand::Rng,
        zone: Zone,
        kind: EnemyKind,
        count: usize,
        half: f32,
    ) -> Result<(), LayoutError> {
        for _ in 0..count {
            let colliders = &self.colliders;
            let position = place(rng, zone, "enemy", half, |pos| {
                (!colliders.iter().any(|c| c.contains(pos))).then_some(pos)
            })?;
            self.enemies.push(EnemySpawn { kind, position });
        }
        Ok(())
    }
}

/// Draws uniform points in `±half` until `accept` yields a value.
fn place<T>(
    rng: &mut fastrand::Rng,
    zone: Zone,
    what: &'static str,
    half: f32,
    mut accept: impl FnMut(GroundPos) -> Option<T>,
) -> Result<T, LayoutError> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let pos = ground(
            (rng.f32() - 0.5) * 2.0 * half,
            (rng.f32() - 0.5) * 2.0 * half,
        );
        if let Some(value) = accept(pos) {
            return Ok(value);
        }
    }
    Err(LayoutError::PlacementExhausted {
        zone: zone.name(),
        what,
        attempts: MAX_PLACEMENT_ATTEMPTS,
    })
}

fn castle() -> Draft {
    const CITY_HALF: f32 = 400.0;
    const GATE_HALF_WIDTH: f32 = 60.0;
    const BLOCK: f32 = 20.0;

    let mut draft = Draft::default();

    let mut i = -CITY_HALF;
    while i <= CITY_HALF {
        if i.abs() > GATE_HALF_WIDTH {
            draft
                .colliders
                .push(Collider::from_center(ground(i, -CITY_HALF), BLOCK, BLOCK));
        }
        draft
            .colliders
            .push(Collider::from_center(ground(i, CITY_HALF), BLOCK, BLOCK));
        draft
            .colliders
            .push(Collider::from_center(ground(-CITY_HALF, i), BLOCK, BLOCK));
        draft
            .colliders
            .push(Collider::from_center(ground(CITY_HALF, i), BLOCK, BLOCK));
        i += BLOCK;
    }

    // Fountain
    draft.colliders.push(Collider::new(-55.0, 55.0, -55.0, 55.0));

    draft.building(ground(-320.0, -250.0), 100.0, 120.0, false);
    draft.npc("Warrior Master", "warrior_master", -320.0, -170.0, std::f32::consts::PI);
    draft.building(ground(320.0, -250.0), 100.0, 120.0, false);
    draft.npc("Magister", "magister", 320.0, -170.0, 0.0);
    draft.building(ground(-320.0, 250.0), 100.0, 120.0, true);
    draft.npc("Master Archer", "master_archer", -320.0, 170.0, 0.0);
    draft.building(ground(320.0, 250.0), 100.0, 120.0, true);
    draft.npc("Blacksmith", "blacksmith", 320.0, 170.0, 0.0);
    draft.building(ground(0.0, 330.0), 120.0, 80.0, true);
    draft.npc("Magic Seller", "magic_seller", 0.0, 270.0, 0.0);

    for x in [-285.0, -355.0] {
        let position = ground(x, -170.0);
        draft.enemies.push(EnemySpawn {
            kind: EnemyKind::TrainingDummy,
            position,
        });
        draft
            .colliders
            .push(Collider::from_center(position, 20.0, 20.0));
    }

    // Workbenches
    draft
        .colliders
        .push(Collider::from_center(ground(320.0, 140.0), 40.0, 24.0));
    draft
        .colliders
        .push(Collider::from_center(ground(0.0, 240.0), 50.0, 24.0));

    draft.npc("Aether Sage", "aether_sage", 120.0, 0.0, 0.0);
    draft.npc("Gatekeeper Milia", "gatekeeper_milia", 250.0, 80.0, 0.0);

    draft
}

fn forest() -> Result<Draft, LayoutError> {
    let mut rng = fastrand::Rng::with_seed(Zone::Forest.scatter_seed());
    let mut draft = Draft::default();
    draft.scatter_obstacles(&mut rng, Zone::Forest, 40, 10.0, 750.0)?;
    draft.scatter_enemies(&mut rng, Zone::Forest, EnemyKind::Wolf, 15, 400.0)?;
    Ok(draft)
}

fn village() -> Result<Draft, LayoutError> {
    let mut rng = fastrand::Rng::with_seed(Zone::Village.scatter_seed());
    let mut draft = Draft::default();
    draft.scatter_obstacles(&mut rng, Zone::Village, 20, 30.0, 500.0)?;
    draft.scatter_enemies(&mut rng, Zone::Village, EnemyKind::Skeleton, 10, 400.0)?;
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_from_str() {
        assert_eq!("Forest".parse::<Zone>(), Ok(Zone::Forest));
        assert_eq!("village".parse::<Zone>(), Ok(Zone::Village));
        assert_eq!(
            "Swamp".parse::<Zone>(),
            Err(ZoneError::Unknown("Swamp".to_string()))
        );
    }

    #[test]
    fn test_catalog_builds_every_zone() {
        let catalog = ZoneCatalog::new().expect("layouts valid");
        for zone in Zone::ALL {
            let layout = catalog.layout(zone);
            assert_eq!(layout.zone, zone);
            assert_eq!(layout.spawn, ground(0.0, 150.0));
        }
    }

    #[test]
    fn test_castle_counts() {
        let layout = ZoneLayout::build(Zone::Castle).expect("castle");
        // 34 north blocks (gate gap) + 3 * 41 other runs, fountain,
        // 5 buildings of 5 segments, 2 dummies, 2 workbenches.
        assert_eq!(layout.colliders.len(), 34 + 123 + 1 + 25 + 2 + 2);
        assert_eq!(layout.enemy_count(EnemyKind::TrainingDummy), 2);
        assert_eq!(layout.enemies.len(), 2);
        assert_eq!(layout.npcs.len(), 7);
        assert!(layout.npcs.iter().any(|n| n.name == "Gatekeeper Milia"));
    }

    #[test]
    fn test_castle_gate_is_open() {
        let layout = ZoneLayout::build(Zone::Castle).expect("castle");
        assert!(!layout.colliders.is_blocked(ground(0.0, -400.0), 8.0));
        assert!(layout.colliders.is_blocked(ground(100.0, -400.0), 8.0));
    }

    #[test]
    fn test_building_door_gap() {
        let mut draft = Draft::default();
        draft.building(ground(0.0, 0.0), 100.0, 120.0, true);
        let walls = draft.colliders;
        assert_eq!(walls.len(), 5);
        // North door: the center of the north wall is open, the south is solid.
        assert!(!walls.as_slice().is_blocked(ground(0.0, -60.0), 8.0));
        assert!(walls.as_slice().is_blocked(ground(0.0, 60.0), 8.0));
    }

    #[test]
    fn test_forest_and_village_counts() {
        let forest = ZoneLayout::build(Zone::Forest).expect("forest");
        assert_eq!(forest.colliders.len(), 40);
        assert_eq!(forest.enemy_count(EnemyKind::Wolf), 15);
        assert!(forest.npcs.is_empty());

        let village = ZoneLayout::build(Zone::Village).expect("village");
        assert_eq!(village.colliders.len(), 20);
        assert_eq!(village.enemy_count(EnemyKind::Skeleton), 10);
    }

    #[test]
    fn test_scatter_is_deterministic() {
        let a = ZoneLayout::build(Zone::Forest).expect("forest");
        let b = ZoneLayout::build(Zone::Forest).expect("forest");
        assert_eq!(a, b);
    }

    #[test]
    fn test_scattered_enemies_outside_colliders() {
        for zone in [Zone::Forest, Zone::Village] {
            let layout = ZoneLayout::build(zone).expect("layout");
            for enemy in &layout.enemies {
                assert!(!layout
                    .colliders
                    .colliders()
                    .iter()
                    .any(|c| c.contains(enemy.position)));
            }
        }
    }
}
