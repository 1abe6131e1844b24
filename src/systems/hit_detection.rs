//! Cross-entity hit resolution.
//!
//! Invoked once per enemy per tick, after every enemy has self-updated and
//! before the player controller runs. Three independent checks convert
//! hitbox overlaps into state changes; absence of overlap is a no-op, never
//! an error. The pair-cooldown counters live on the enemy's `CombatState`,
//! so every enemy/player pair throttles independently.

use hecs::{Entity, World};

use crate::components::{CombatState, EnemyAction, EnemyState, Health, Hitboxes, Locomotion, Position};
use crate::constants::{
    ATTACK_DELAY_THRESHOLD, COLLISION_THRESHOLD, GET_HIT_THRESHOLD, UNSTICK_FACTOR,
};
use crate::events::{EventQueue, GameEvent};

/// Resolve one enemy/player pair for this tick.
pub fn resolve(world: &mut World, enemy: Entity, player: Entity, events: &mut EventQueue) {
    puffin::profile_function!();

    if let Ok(mut combat) = world.get::<&mut CombatState>(enemy) {
        combat.tick_pair_counters();
    }

    check_hit_player(world, enemy, player, events);
    check_player_collision(world, enemy, player);
    check_get_hit(world, enemy, player, events);
}

/// Check 1: the enemy's weapon box overlapping the player's damage box deals
/// the enemy's contact damage, throttled to once per recovery window. A
/// casting necromancer deals no contact damage.
fn check_hit_player(world: &mut World, enemy: Entity, player: Entity, events: &mut EventQueue) {
    let overlap = match (
        world.get::<&Hitboxes>(enemy),
        world.get::<&Hitboxes>(player),
    ) {
        (Ok(e), Ok(p)) => e.weapon.intersects(&p.damage),
        _ => return,
    };
    if !overlap {
        return;
    }

    let casting = world
        .get::<&EnemyState>(enemy)
        .map(|s| s.action == EnemyAction::Spell)
        .unwrap_or(false);
    if casting {
        return;
    }

    let damage = {
        let Ok(mut combat) = world.get::<&mut CombatState>(enemy) else {
            return;
        };
        if combat.attack_delay() < ATTACK_DELAY_THRESHOLD {
            return;
        }
        combat.reset_attack_delay();
        combat.damage
    };

    if let Ok(mut health) = world.get::<&mut Health>(player) {
        health.apply_damage(damage);
        log::debug!("player hit for {damage}, health {}", health.current);
        events.push(GameEvent::PlayerDamaged {
            damage,
            remaining: health.current,
        });
    }
}

/// Check 2: proximity forces the enemy into its attack, and interpenetrating
/// solid boxes push both actors back along their own movement vectors. The
/// collision throttle keeps a jostled enemy planted for a while before its
/// movement flag is forced back on.
fn check_player_collision(world: &mut World, enemy: Entity, player: Entity) {
    let (weapon_overlap, solid_overlap) = match (
        world.get::<&Hitboxes>(enemy),
        world.get::<&Hitboxes>(player),
    ) {
        (Ok(e), Ok(p)) => (
            e.weapon.intersects(&p.damage),
            e.solid.intersects(&p.solid),
        ),
        _ => return,
    };

    if weapon_overlap {
        if let Ok(mut combat) = world.get::<&mut CombatState>(enemy) {
            combat.force_attack();
        }
        if let Ok(mut loco) = world.get::<&mut Locomotion>(enemy) {
            loco.moving = false;
        }
    }

    if solid_overlap {
        // Enemy backs off along its own vector, amplified to unstick it
        let step = world
            .get::<&Locomotion>(enemy)
            .map(|l| l.dir * l.speed * UNSTICK_FACTOR)
            .ok();
        if let (Some(step), Ok(mut pos)) = (step, world.get::<&mut Position>(enemy)) {
            pos.x -= step.x;
            pos.y -= step.y;
        }

        // The player gives ground along its own vector
        let step = world
            .get::<&Locomotion>(player)
            .map(|l| l.dir * l.speed)
            .ok();
        if let (Some(step), Ok(mut pos)) = (step, world.get::<&mut Position>(player)) {
            pos.x -= step.x;
            pos.y -= step.y;
        }
    }

    let resume = match world.get::<&mut CombatState>(enemy) {
        Ok(mut combat) => combat.tick_collision_throttle(COLLISION_THRESHOLD),
        Err(_) => false,
    };
    if resume {
        if let Ok(mut loco) = world.get::<&mut Locomotion>(enemy) {
            loco.moving = true;
        }
    }
}

/// Check 3: the player's swing overlapping the enemy's damage box deals the
/// sword damage, throttled by the enemy's get-hit recovery window.
fn check_get_hit(world: &mut World, enemy: Entity, player: Entity, events: &mut EventQueue) {
    let overlap = match (
        world.get::<&Hitboxes>(enemy),
        world.get::<&Hitboxes>(player),
    ) {
        (Ok(e), Ok(p)) => e.damage.intersects(&p.weapon),
        _ => return,
    };
    if !overlap {
        return;
    }

    let (attacking, damage) = match world.get::<&CombatState>(player) {
        Ok(c) => (c.is_attacking(), c.damage),
        Err(_) => return,
    };
    if !attacking {
        return;
    }

    {
        let Ok(mut combat) = world.get::<&mut CombatState>(enemy) else {
            return;
        };
        if combat.get_hit() < GET_HIT_THRESHOLD {
            return;
        }
        combat.reset_get_hit();
    }

    if let Ok(mut health) = world.get::<&mut Health>(enemy) {
        health.apply_damage(damage);
        log::debug!("enemy hit for {damage}, health {}", health.current);
        events.push(GameEvent::EnemyDamaged {
            entity: enemy,
            damage,
            remaining: health.current,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archetypes::EnemyKind;
    use crate::components::SwordTier;
    use crate::constants::TILE_SIZE;
    use crate::spawning::spawn_enemy;
    use crate::systems::player::spawn_player;

    /// Enemy and player stacked so every hitbox pair overlaps.
    fn overlapping_pair(kind: EnemyKind) -> (World, Entity, Entity) {
        let mut world = World::new();
        let x = TILE_SIZE * 4.0;
        let y = TILE_SIZE * 4.0;
        let player = spawn_player(&mut world, x, y);
        let enemy = spawn_enemy(&mut world, kind, x, y);
        (world, enemy, player)
    }

    fn player_health(world: &World, player: Entity) -> i32 {
        world.get::<&Health>(player).unwrap().current
    }

    #[test]
    fn test_damage_to_player_respects_recovery_window() {
        let (mut world, enemy, player) = overlapping_pair(EnemyKind::Skeleton);
        let mut events = EventQueue::new();

        // Counter starts cold: the first window must fill before any damage
        for _ in 0..ATTACK_DELAY_THRESHOLD - 1 {
            resolve(&mut world, enemy, player, &mut events);
        }
        assert_eq!(player_health(&world, player), 120);

        resolve(&mut world, enemy, player, &mut events);
        assert_eq!(player_health(&world, player), 120 - 25);

        // 69 more ticks of continuous overlap: nothing
        for _ in 0..ATTACK_DELAY_THRESHOLD - 1 {
            resolve(&mut world, enemy, player, &mut events);
        }
        assert_eq!(player_health(&world, player), 120 - 25);

        // Tick 70 of the new window: exactly one more application
        resolve(&mut world, enemy, player, &mut events);
        assert_eq!(player_health(&world, player), 120 - 50);
    }

    #[test]
    fn test_continuous_overlap_scenario_140_ticks() {
        // 120 health, 25 damage, threshold 70, 140 ticks of overlap:
        // exactly two applications, health ends at 70
        let (mut world, enemy, player) = overlapping_pair(EnemyKind::Skeleton);
        let mut events = EventQueue::new();

        for _ in 0..140 {
            resolve(&mut world, enemy, player, &mut events);
        }
        assert_eq!(player_health(&world, player), 70);
        let hits = events
            .drain()
            .filter(|e| matches!(e, GameEvent::PlayerDamaged { .. }))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn test_proximity_forces_enemy_attack_and_stops_it() {
        let (mut world, enemy, player) = overlapping_pair(EnemyKind::Zombie);
        let mut events = EventQueue::new();

        // First call also rolls the pre-loaded collision throttle over, which
        // re-enables movement; from the second call on the stop holds
        resolve(&mut world, enemy, player, &mut events);
        resolve(&mut world, enemy, player, &mut events);
        assert!(world.get::<&CombatState>(enemy).unwrap().is_attacking());
        assert!(!world.get::<&Locomotion>(enemy).unwrap().moving);
    }

    #[test]
    fn test_solid_overlap_pushes_both_actors_back() {
        let (mut world, enemy, player) = overlapping_pair(EnemyKind::Zombie);
        let mut events = EventQueue::new();

        // Both were heading right when they interlocked
        world.get::<&mut Locomotion>(enemy).unwrap().dir = glam::Vec2::X;
        world.get::<&mut Locomotion>(player).unwrap().dir = glam::Vec2::X;

        let ex = world.get::<&Position>(enemy).unwrap().x;
        let px = world.get::<&Position>(player).unwrap().x;
        resolve(&mut world, enemy, player, &mut events);

        let arch = EnemyKind::Zombie.archetype();
        assert_eq!(
            world.get::<&Position>(enemy).unwrap().x,
            ex - arch.speed * UNSTICK_FACTOR
        );
        assert_eq!(
            world.get::<&Position>(player).unwrap().x,
            px - crate::constants::PLAYER_SPEED
        );
    }

    #[test]
    fn test_player_damage_requires_attack_flag() {
        let (mut world, enemy, player) = overlapping_pair(EnemyKind::Eyeball);
        let mut events = EventQueue::new();
        crate::systems::player::set_sword(&mut world, player, SwordTier::Red);

        // Overlap without an active swing: no damage ever
        for _ in 0..GET_HIT_THRESHOLD * 3 {
            resolve(&mut world, enemy, player, &mut events);
        }
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 30);

        // With the swing live, the recovery window gates each application
        world.get::<&mut CombatState>(player).unwrap().begin_attack();
        resolve(&mut world, enemy, player, &mut events);
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 0);
    }

    #[test]
    fn test_enemy_damage_uses_sword_damage_and_window() {
        let (mut world, enemy, player) = overlapping_pair(EnemyKind::Skeleton);
        let mut events = EventQueue::new();
        crate::systems::player::set_sword(&mut world, player, SwordTier::Green);
        world.get::<&mut CombatState>(player).unwrap().begin_attack();

        // The recovery counter starts cold and must fill before the first hit
        for _ in 0..GET_HIT_THRESHOLD - 1 {
            resolve(&mut world, enemy, player, &mut events);
        }
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 100);
        resolve(&mut world, enemy, player, &mut events);
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 100 - 15);

        // And recover again before the next application
        for _ in 0..GET_HIT_THRESHOLD - 1 {
            resolve(&mut world, enemy, player, &mut events);
        }
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 100 - 15);
        resolve(&mut world, enemy, player, &mut events);
        assert_eq!(world.get::<&Health>(enemy).unwrap().current, 100 - 30);
    }
}
