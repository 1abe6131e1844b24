//! Enemy spawning and population bookkeeping.
//!
//! The spawn scheduler is driven by the external day/night clock: it books a
//! spawn hour, waits for the clock to reach it, places one enemy on a fresh
//! spawnable tile, and books the next. Night narrows the interval, so more
//! enemies appear after dark. The single necromancer is placed at manager
//! construction and is exempt from the whole flow.

use std::collections::HashSet;

use hecs::{Entity, World};
use rand::Rng;

use crate::archetypes::EnemyKind;
use crate::components::{
    Animation, BossFacing, CombatState, EnemyState, Health, Hitbox, Hitboxes, Locomotion,
    Position, SpellCaster,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::game_time::{DayCycle, TimeOfDay};
use crate::grid::CollisionGrid;

/// Spawn one enemy bundle at a world position.
pub fn spawn_enemy(world: &mut World, kind: EnemyKind, x: f32, y: f32) -> Entity {
    let arch = kind.archetype();
    world.spawn((
        Position::new(x, y),
        Health::new(arch.health),
        Hitboxes {
            solid: Hitbox::new(x, y, arch.solid_size.x, arch.solid_size.y),
            damage: Hitbox::new(
                x - arch.damage_offset.x,
                y - arch.damage_offset.y,
                arch.damage_size.x,
                arch.damage_size.y,
            ),
            weapon: Hitbox::new(
                x - arch.weapon_offset.x,
                y - arch.weapon_offset.y,
                arch.weapon_size.x,
                arch.weapon_size.y,
            ),
        },
        Locomotion::new(arch.speed, x, y, true),
        CombatState::new(arch.damage, arch.health, arch.attack_hold),
        EnemyState::new(kind),
        Animation::new(),
    ))
}

/// Spawn the necromancer: a regular enemy bundle plus the spell sub-machine
/// and the sprite-mirroring facing.
pub fn spawn_boss(world: &mut World, x: f32, y: f32) -> Entity {
    let boss = spawn_enemy(world, EnemyKind::Necromancer, x, y);
    let _ = world.insert(
        boss,
        (SpellCaster::new(SPELL_THRESHOLD_INITIAL), BossFacing::Left),
    );
    boss
}

/// Weighted archetype rates, evaluated cumulatively against one 0..100 draw
#[derive(Debug, Clone, Copy)]
pub struct SpawnRates {
    pub skeleton: u32,
    pub zombie: u32,
    pub eyeball: u32,
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            skeleton: SKELETON_RATE,
            zombie: ZOMBIE_RATE,
            eyeball: EYEBALL_RATE,
        }
    }
}

/// Pick an archetype from a single 0..100 draw against cumulative rates.
pub fn pick_archetype(roll: u32, rates: &SpawnRates) -> EnemyKind {
    if roll <= rates.skeleton {
        EnemyKind::Skeleton
    } else if roll <= rates.skeleton + rates.zombie {
        EnemyKind::Zombie
    } else {
        EnemyKind::Eyeball
    }
}

/// Owns the live enemy set, the spawn schedule, and death bookkeeping.
pub struct EnemyManager {
    enemies: Vec<Entity>,
    necromancer: Entity,
    boss_dead: bool,
    enemy_count: u32,
    spawn_hour: i32,
    expected_cycle: DayCycle,
    min_interval: i32,
    max_interval: i32,
    rates: SpawnRates,
    /// Tiles ever used (or even drawn) for a spawn; never pruned, so no two
    /// spawns in an area's lifetime share an origin tile
    used_tiles: HashSet<(i32, i32)>,
}

impl EnemyManager {
    /// Build the manager, place the boss, and book the first spawn.
    pub fn new(world: &mut World, time: TimeOfDay, rng: &mut impl Rng) -> Self {
        let necromancer = spawn_boss(
            world,
            NECRO_SPAWN_TILE.0 as f32 * TILE_SIZE,
            NECRO_SPAWN_TILE.1 as f32 * TILE_SIZE,
        );

        let mut manager = Self {
            enemies: Vec::new(),
            necromancer,
            boss_dead: false,
            enemy_count: 0,
            spawn_hour: 0,
            expected_cycle: time.cycle,
            min_interval: FIRST_SPAWN_MIN,
            max_interval: FIRST_SPAWN_MAX,
            rates: SpawnRates::default(),
            used_tiles: HashSet::new(),
        };
        manager.schedule_next(time.hours, rng);
        log::info!(
            "first enemy spawn booked for {} {:?}",
            manager.spawn_hour,
            manager.expected_cycle
        );
        manager
    }

    /// Per-tick spawner step: refresh the interval bounds from the clock,
    /// then spawn if the booked hour has come and the cap allows it.
    pub fn update(
        &mut self,
        world: &mut World,
        grid: &CollisionGrid,
        time: TimeOfDay,
        rng: &mut impl Rng,
        events: &mut EventQueue,
    ) {
        self.set_interval(time);
        self.check_time_to_spawn(world, grid, time, rng, events);
    }

    /// Night tightens the spawn interval, day relaxes it.
    fn set_interval(&mut self, time: TimeOfDay) {
        if time.is_day() {
            self.min_interval = DAY_SPAWN_MIN;
            self.max_interval = DAY_SPAWN_MAX;
        } else {
            self.min_interval = NIGHT_SPAWN_MIN;
            self.max_interval = NIGHT_SPAWN_MAX;
        }
    }

    fn check_time_to_spawn(
        &mut self,
        world: &mut World,
        grid: &CollisionGrid,
        time: TimeOfDay,
        rng: &mut impl Rng,
        events: &mut EventQueue,
    ) {
        if self.enemy_count >= ENEMY_CAP {
            return;
        }
        let due = (time.hours >= self.spawn_hour && time.cycle == self.expected_cycle)
            || (time.hours < self.spawn_hour && time.cycle != self.expected_cycle);
        if !due {
            return;
        }

        if self.spawn_one(world, grid, rng, events).is_some() {
            self.enemy_count += 1;
        }
        self.schedule_next(time.hours, rng);
        log::info!(
            "next enemy spawn booked for {} {:?}",
            self.spawn_hour,
            self.expected_cycle
        );
    }

    /// Book the next spawn hour; wrapping past the 12-hour mark flips the
    /// expected day cycle.
    fn schedule_next(&mut self, current_hour: i32, rng: &mut impl Rng) {
        self.spawn_hour = current_hour + rng.gen_range(self.min_interval..=self.max_interval);
        if self.spawn_hour >= 12 {
            self.spawn_hour = 1;
            self.expected_cycle = self.expected_cycle.flip();
        }
    }

    /// Place one enemy on a fresh, spawn-valid tile. The archetype is fixed
    /// by a single draw before the tile search; every drawn tile is burned
    /// whether or not it validates.
    fn spawn_one(
        &mut self,
        world: &mut World,
        grid: &CollisionGrid,
        rng: &mut impl Rng,
        events: &mut EventQueue,
    ) -> Option<Entity> {
        let roll = rng.gen_range(0..100);
        let kind = pick_archetype(roll, &self.rates);

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let tx = rng.gen_range(0..grid.tiles_wide() as i32);
            let ty = rng.gen_range(0..grid.tiles_tall() as i32);
            if !self.used_tiles.insert((tx, ty)) {
                continue;
            }

            let x = tx as f32 * TILE_SIZE;
            let y = ty as f32 * TILE_SIZE;
            if !grid.is_spawn_valid(x, y, SPAWN_PROBE_SIZE, SPAWN_PROBE_SIZE) {
                continue;
            }

            let entity = spawn_enemy(world, kind, x, y);
            self.enemies.push(entity);
            events.push(GameEvent::EnemySpawned {
                entity,
                kind,
                x,
                y,
            });
            log::info!("spawned {kind:?} at tile ({tx}, {ty})");
            return Some(entity);
        }

        log::warn!("no free spawnable tile found after {MAX_SPAWN_ATTEMPTS} draws");
        None
    }

    /// Death bookkeeping, run once per tick after hit resolution: remove
    /// dead enemies from the live set, free their population slot, and
    /// notify the reward collaborator. This is the only point in a tick
    /// where the live set shrinks.
    pub fn reap(&mut self, world: &mut World, events: &mut EventQueue) {
        let dead: Vec<Entity> = self
            .enemies
            .iter()
            .copied()
            .filter(|&e| {
                world
                    .get::<&Health>(e)
                    .map(|h| h.is_dead())
                    .unwrap_or(true)
            })
            .collect();

        for entity in dead {
            let kind = world
                .get::<&EnemyState>(entity)
                .map(|s| s.kind)
                .unwrap_or(EnemyKind::Skeleton);
            let (x, y) = world
                .get::<&Position>(entity)
                .map(|p| (p.x, p.y))
                .unwrap_or((0.0, 0.0));
            events.push(GameEvent::EnemySlain { entity, kind, x, y });
            log::info!("{kind:?} slain at ({x}, {y})");

            let _ = world.despawn(entity);
            self.enemies.retain(|&e| e != entity);
            self.enemy_count = self.enemy_count.saturating_sub(1);
        }
    }

    /// Boss death is terminal: flag it once and tell the collaborators.
    pub fn check_boss(&mut self, world: &World, events: &mut EventQueue) {
        if self.boss_dead {
            return;
        }
        let dead = world
            .get::<&Health>(self.necromancer)
            .map(|h| h.is_dead())
            .unwrap_or(false);
        if dead {
            self.boss_dead = true;
            events.push(GameEvent::BossDefeated);
            log::info!("necromancer defeated");
        }
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn enemy_count(&self) -> u32 {
        self.enemy_count
    }

    pub fn necromancer(&self) -> Entity {
        self.necromancer
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss_dead
    }

    /// The booked spawn hour and the cycle it belongs to.
    pub fn next_spawn(&self) -> (i32, DayCycle) {
        (self.spawn_hour, self.expected_cycle)
    }

    /// Remove every live spawned enemy (save restore rebuilds from records).
    pub fn despawn_all(&mut self, world: &mut World) {
        for entity in self.enemies.drain(..) {
            let _ = world.despawn(entity);
        }
        self.enemy_count = 0;
    }

    /// Adopt an externally spawned enemy into the live set.
    pub fn register(&mut self, entity: Entity) {
        self.enemies.push(entity);
        self.enemy_count += 1;
    }
}
