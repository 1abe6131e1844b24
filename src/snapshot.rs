//! Persistence views for the external save collaborator.
//!
//! Only durable identity survives a save: enemy type, position, and health
//! per live enemy, plus boss and player position/health. Frame-local
//! counters (animation cursors, cooldowns, spawn schedule) intentionally
//! reset to defaults on restore.

use serde::{Deserialize, Serialize};

use crate::archetypes::EnemyKind;
use crate::components::{Health, Locomotion, Position};
use crate::engine::GameSim;
use crate::spawning::spawn_enemy;

/// One live enemy, as persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyRecord {
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub health: i32,
}

/// Boss state, as persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BossRecord {
    pub x: f32,
    pub y: f32,
    pub health: i32,
}

/// Player state, as persisted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: f32,
    pub y: f32,
    pub health: i32,
}

/// Everything the save collaborator stores about the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub player: PlayerRecord,
    pub enemies: Vec<EnemyRecord>,
    pub boss: BossRecord,
}

/// Capture the persistable state of a running simulation.
pub fn capture(sim: &GameSim) -> WorldSnapshot {
    let world = &sim.world;

    let record_of = |entity: hecs::Entity| {
        let (x, y) = world
            .get::<&Position>(entity)
            .map(|p| (p.x, p.y))
            .unwrap_or((0.0, 0.0));
        let health = world
            .get::<&Health>(entity)
            .map(|h| h.current)
            .unwrap_or(0);
        (x, y, health)
    };

    let enemies = sim
        .manager
        .enemies()
        .iter()
        .map(|&entity| {
            let (x, y, health) = record_of(entity);
            let kind = world
                .get::<&crate::components::EnemyState>(entity)
                .map(|s| s.kind)
                .unwrap_or(EnemyKind::Skeleton);
            EnemyRecord { kind, x, y, health }
        })
        .collect();

    let (bx, by, boss_health) = record_of(sim.manager.necromancer());
    let (px, py, player_health) = record_of(sim.player);

    WorldSnapshot {
        player: PlayerRecord {
            x: px,
            y: py,
            health: player_health,
        },
        enemies,
        boss: BossRecord {
            x: bx,
            y: by,
            health: boss_health,
        },
    }
}

/// Rebuild the live state from a snapshot. Spawned enemies come back with
/// fresh counters; the spawn schedule restarts on the next tick.
pub fn restore(sim: &mut GameSim, snapshot: &WorldSnapshot) {
    sim.manager.despawn_all(&mut sim.world);

    for record in &snapshot.enemies {
        let entity = spawn_enemy(&mut sim.world, record.kind, record.x, record.y);
        if let Ok(mut health) = sim.world.get::<&mut Health>(entity) {
            health.set(record.health);
        }
        sim.manager.register(entity);
    }

    place(
        &mut sim.world,
        sim.manager.necromancer(),
        snapshot.boss.x,
        snapshot.boss.y,
        snapshot.boss.health,
    );
    place(
        &mut sim.world,
        sim.player,
        snapshot.player.x,
        snapshot.player.y,
        snapshot.player.health,
    );
}

fn place(world: &mut hecs::World, entity: hecs::Entity, x: f32, y: f32, health: i32) {
    if let Ok(mut pos) = world.get::<&mut Position>(entity) {
        pos.x = x;
        pos.y = y;
    }
    if let Ok(mut loco) = world.get::<&mut Locomotion>(entity) {
        loco.rest_x = x;
        loco.rest_y = y;
    }
    if let Ok(mut hp) = world.get::<&mut Health>(entity) {
        hp.set(health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_time::{DayCycle, TimeOfDay};
    use crate::grid::CollisionGrid;

    fn new_sim() -> GameSim {
        let rows: Vec<Vec<u8>> = (0..50)
            .map(|y| {
                (0..50)
                    .map(|x| {
                        if x == 0 || y == 0 || x == 49 || y == 49 {
                            1
                        } else {
                            8
                        }
                    })
                    .collect()
            })
            .collect();
        let grid = CollisionGrid::from_rows(&rows).unwrap();
        GameSim::with_seed(grid, TimeOfDay::new(1, DayCycle::Am), 7)
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut sim = new_sim();

        // Get a couple of enemies live, then wound one and the player
        let time = TimeOfDay::new(11, sim.manager.next_spawn().1);
        sim.tick(&time);
        let time = TimeOfDay::new(11, sim.manager.next_spawn().1);
        sim.tick(&time);
        assert!(sim.manager.enemy_count() >= 2);

        let victim = sim.manager.enemies()[0];
        sim.world.get::<&mut Health>(victim).unwrap().set(3);
        sim.set_player_health(55);

        let saved = capture(&sim);
        // The save collaborator serializes records as JSON
        let json = serde_json::to_string(&saved).unwrap();
        let loaded: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(saved, loaded);

        // Restore into a fresh simulation
        let mut fresh = new_sim();
        restore(&mut fresh, &loaded);
        assert_eq!(capture(&fresh), saved);
    }
}
