//! The fixed-order simulation tick.
//!
//! Ordering is a designed invariant, not an accident: the spawner runs
//! first, then every enemy's self-update, then the boss with its spell
//! sub-machine, then hit resolution for every enemy/player pair, then the
//! player controller, and finally death reaping - the single point in a
//! tick where the live enemy set shrinks. No entity observes another's
//! half-updated state outside of the hit-resolution step, which mutates
//! both sides on purpose.

use crate::engine::GameSim;
use crate::game_time::TimeOfDay;
use crate::systems;

/// Advance the whole simulation by one tick.
pub fn tick(sim: &mut GameSim, time: TimeOfDay) {
    puffin::profile_function!();

    let GameSim {
        world,
        grid,
        player,
        manager,
        events,
        rng,
    } = sim;

    // Spawner first: enemies born this tick update this tick
    manager.update(world, grid, time, rng, events);

    let roster: Vec<hecs::Entity> = manager.enemies().to_vec();
    for &enemy in &roster {
        systems::update_enemy(world, grid, enemy, *player, rng);
    }

    let boss = manager.necromancer();
    if !manager.boss_defeated() {
        systems::update_enemy(world, grid, boss, *player, rng);
        systems::update_boss(world, boss, *player, events, rng);
    }

    // Hit resolution runs against the post-move enemies and the player's
    // previous-tick position
    for &enemy in &roster {
        systems::resolve(world, enemy, *player, events);
    }
    if !manager.boss_defeated() {
        systems::resolve(world, boss, *player, events);
    }

    systems::update_player(world, grid, *player, events);

    manager.reap(world, events);
    manager.check_boss(world, events);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::EnemyKind;
    use crate::components::{Direction, Health, Locomotion, Position, SwordTier};
    use crate::constants::*;
    use crate::events::GameEvent;
    use crate::game_time::{DayCycle, TimeOfDay};
    use crate::grid::CollisionGrid;
    use crate::spawning::spawn_enemy;

    fn bordered_spawnable_grid(size: usize) -> CollisionGrid {
        let rows: Vec<Vec<u8>> = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| {
                        if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                            1
                        } else {
                            8
                        }
                    })
                    .collect()
            })
            .collect();
        CollisionGrid::from_rows(&rows).unwrap()
    }

    fn sim() -> GameSim {
        GameSim::with_seed(
            bordered_spawnable_grid(50),
            TimeOfDay::new(1, DayCycle::Am),
            21,
        )
    }

    /// A time value that always triggers the booked spawn.
    fn due(sim: &GameSim) -> TimeOfDay {
        TimeOfDay::new(11, sim.manager.next_spawn().1)
    }

    #[test]
    fn test_spawned_enemies_update_same_tick() {
        let mut sim = sim();
        let time = due(&sim);
        sim.tick(&time);
        assert_eq!(sim.enemy_count(), 1);
        // The wander timer moved, proof the fresh enemy ran its self-update
        let enemy = sim.manager.enemies()[0];
        let state = sim
            .world
            .get::<&crate::components::EnemyState>(enemy)
            .unwrap();
        assert_eq!(state.wander_timer, 1);
    }

    #[test]
    fn test_health_stays_in_archetype_bounds_over_many_ticks() {
        let mut sim = sim();
        // Drop an enemy right on the player and let the melee play out
        let (px, py) = {
            let p = sim.world.get::<&Position>(sim.player).unwrap();
            (p.x, p.y)
        };
        let enemy = spawn_enemy(&mut sim.world, EnemyKind::Eyeball, px + 10.0, py + 10.0);
        sim.manager.register(enemy);
        sim.set_player_sword(SwordTier::Red);

        let quiet = TimeOfDay::new(1, DayCycle::Am);
        for i in 0..500 {
            if i % 3 == 0 {
                sim.request_player_attack();
            }
            sim.tick(&quiet);

            for view in sim.enemy_views() {
                let max = view.kind.archetype().health;
                assert!(view.health >= 0 && view.health <= max);
            }
            let player = sim.player_view().unwrap();
            assert!(player.health >= 0 && player.health <= player.max_health);
            if sim.enemy_count() == 0 {
                return;
            }
        }
        // The red sword always finishes a 30-health eyeball within budget
        panic!("eyeball survived 500 ticks of melee");
    }

    #[test]
    fn test_dead_enemy_removed_at_end_of_same_tick() {
        let mut sim = sim();
        let time = due(&sim);
        sim.tick(&time);
        let enemy = sim.manager.enemies()[0];

        sim.world.get::<&mut Health>(enemy).unwrap().set(1);
        // Park the player on top with a live swing so check 3 kills it
        let (x, y) = {
            let p = sim.world.get::<&Position>(enemy).unwrap();
            (p.x, p.y)
        };
        crate::systems::player::reset_position(&mut sim.world, sim.player, x, y);
        crate::systems::player::set_teleported(&mut sim.world, sim.player, true);
        sim.set_player_sword(SwordTier::Green);
        sim.world
            .get::<&mut crate::components::CombatState>(sim.player)
            .unwrap()
            .begin_attack();
        // Recovery window already filled, so the first connecting swing lands
        {
            let mut combat = sim
                .world
                .get::<&mut crate::components::CombatState>(enemy)
                .unwrap();
            for _ in 0..GET_HIT_THRESHOLD {
                combat.tick_pair_counters();
            }
        }

        let quiet = TimeOfDay::new(1, DayCycle::Am);
        let mut survived = 0;
        for _ in 0..GET_HIT_THRESHOLD + 2 {
            sim.tick(&quiet);
            if sim.world.contains(enemy) {
                survived += 1;
            } else {
                break;
            }
        }
        assert!(!sim.world.contains(enemy));
        // It died the tick its health hit zero, not a tick later
        let slain = sim
            .drain_events()
            .into_iter()
            .any(|e| matches!(e, GameEvent::EnemySlain { entity, .. } if entity == enemy));
        assert!(slain);
        assert!(survived <= GET_HIT_THRESHOLD + 1);
    }

    #[test]
    fn test_defeated_boss_stops_updating() {
        let mut sim = sim();
        let boss = sim.necromancer();
        sim.world.get::<&mut Health>(boss).unwrap().set(0);

        let quiet = TimeOfDay::new(1, DayCycle::Am);
        sim.tick(&quiet);
        assert!(sim.manager.boss_defeated());
        assert!(sim
            .drain_events()
            .into_iter()
            .any(|e| matches!(e, GameEvent::BossDefeated)));

        // Frozen where it fell, still present for the renderer's corpse
        let before = {
            let p = sim.world.get::<&Position>(boss).unwrap();
            (p.x, p.y)
        };
        sim.world.get::<&mut Locomotion>(boss).unwrap().moving = true;
        for _ in 0..50 {
            sim.tick(&quiet);
        }
        let after = {
            let p = sim.world.get::<&Position>(boss).unwrap();
            (p.x, p.y)
        };
        assert_eq!(before, after);
        // And excluded from the live views
        assert!(sim
            .enemy_views()
            .iter()
            .all(|v| v.kind != EnemyKind::Necromancer));
    }

    #[test]
    fn test_player_movement_through_input_api() {
        let mut sim = sim();
        let quiet = TimeOfDay::new(1, DayCycle::Am);
        let start = sim.player_view().unwrap().x;

        for _ in 0..10 {
            sim.set_player_direction(Direction::Right);
            sim.tick(&quiet);
        }
        assert_eq!(sim.player_view().unwrap().x, start + 10.0 * PLAYER_SPEED);

        sim.stop_player();
        sim.tick(&quiet);
        assert_eq!(sim.player_view().unwrap().x, start + 10.0 * PLAYER_SPEED);
    }
}
