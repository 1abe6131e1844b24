//! Necromancer spell sub-state machine and boss bookkeeping.
//!
//! Runs right after the boss's shared enemy update. The cast timer forces
//! the SPELL action on a randomized threshold; once the casting animation
//! completes, a two-phase hazard (appear, then fade) runs at the player
//! position captured at that instant. The capture happens exactly once per
//! cast, which is what makes the hazard dodgeable: move before it appears,
//! not after.

use hecs::{Entity, World};
use rand::Rng;

use crate::animation::{self, AnimEvent, HAZARD_APPEAR_FRAMES, HAZARD_FADE_FRAMES};
use crate::archetypes;
use crate::components::{
    Animation, BossFacing, CombatState, EnemyAction, EnemyState, HazardPhase, Health, Hitbox,
    Hitboxes, Locomotion, Position, SpellCaster,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};

/// Boss health-bar display value, recomputed from the authoritative health
/// every tick; it has no lifecycle of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BossHealthBar {
    pub current: i32,
    pub max: i32,
}

/// Read the boss health bar for display.
pub fn boss_health_bar(world: &World, boss: Entity) -> BossHealthBar {
    world
        .get::<&Health>(boss)
        .map(|h| BossHealthBar {
            current: h.current,
            max: h.max,
        })
        .unwrap_or(BossHealthBar { current: 0, max: 0 })
}

/// Run the boss-specific update for this tick.
pub fn update_boss(
    world: &mut World,
    boss: Entity,
    player: Entity,
    events: &mut EventQueue,
    rng: &mut impl Rng,
) {
    puffin::profile_function!();

    update_facing(world, boss);
    update_weapon_hitbox(world, boss);
    tick_cast_timer(world, boss, rng);
    hold_spell_freeze(world, boss);
    advance_hazard(world, boss, player, events);
    check_hazard_dwell(world, boss, player, events);
}

/// Flip the boss's facing with the sign of its movement direction.
fn update_facing(world: &mut World, boss: Entity) {
    let dx = match world.get::<&Locomotion>(boss) {
        Ok(l) => l.dir.x,
        Err(_) => return,
    };
    if dx == 0.0 {
        return;
    }
    if let Ok(mut facing) = world.get::<&mut BossFacing>(boss) {
        *facing = if dx < 0.0 {
            BossFacing::Left
        } else {
            BossFacing::Right
        };
    }
}

/// Mirror the weapon hitbox with the facing so it stays in front of the
/// off-center sprite.
fn update_weapon_hitbox(world: &mut World, boss: Entity) {
    let facing = match world.get::<&BossFacing>(boss) {
        Ok(f) => *f,
        Err(_) => return,
    };
    let (x, y) = match world.get::<&Position>(boss) {
        Ok(p) => (p.x, p.y),
        Err(_) => return,
    };

    let offset = archetypes::NECROMANCER.weapon_offset;
    let weapon_x = match facing {
        BossFacing::Left => x - offset.x,
        BossFacing::Right => x + offset.x - NECRO_MIRROR_CORRECTION,
    };
    if let Ok(mut boxes) = world.get::<&mut Hitboxes>(boss) {
        boxes.weapon.set_pos(weapon_x, y - offset.y);
    }
}

/// Enter the SPELL action when the cast timer fills, and re-roll the next
/// threshold so casts stay unpredictable.
fn tick_cast_timer(world: &mut World, boss: Entity, rng: &mut impl Rng) {
    let due = {
        let Ok(mut caster) = world.get::<&mut SpellCaster>(boss) else {
            return;
        };
        caster.cast_timer += 1;
        if caster.cast_timer < caster.cast_threshold {
            false
        } else {
            caster.cast_timer = 0;
            caster.cast_threshold = rng.gen_range(SPELL_THRESHOLD_MIN..SPELL_THRESHOLD_MAX);
            caster.casting = true;
            true
        }
    };
    if !due {
        return;
    }

    if let Ok(mut state) = world.get::<&mut EnemyState>(boss) {
        state.action = EnemyAction::Spell;
    }
    if let Ok(mut anim) = world.get::<&mut Animation>(boss) {
        anim.reset();
    }
}

/// The SPELL action overrides and freezes every other state for its whole
/// duration.
fn hold_spell_freeze(world: &mut World, boss: Entity) {
    let casting = world
        .get::<&EnemyState>(boss)
        .map(|s| s.action == EnemyAction::Spell)
        .unwrap_or(false);
    if !casting {
        return;
    }
    if let Ok(mut combat) = world.get::<&mut CombatState>(boss) {
        combat.cancel_attack();
        combat.clear_hit();
    }
    if let Ok(mut loco) = world.get::<&mut Locomotion>(boss) {
        loco.moving = false;
    }
}

/// Drive the hazard sequence. When the casting animation has completed (the
/// shared controller reverts the action to RUNNING), capture the player's
/// position once and run the appear phase, then the fade phase; afterwards
/// the hazard is disarmed until the next cast.
fn advance_hazard(world: &mut World, boss: Entity, player: Entity, events: &mut EventQueue) {
    let action = match world.get::<&EnemyState>(boss) {
        Ok(s) => s.action,
        Err(_) => return,
    };
    let player_pos = match world.get::<&Position>(player) {
        Ok(p) => p.vec(),
        Err(_) => return,
    };

    let Ok(mut caster) = world.get::<&mut SpellCaster>(boss) else {
        return;
    };

    if caster.casting && action != EnemyAction::Spell {
        // Casting finished this tick: pin the hazard where the player stands
        caster.casting = false;
        caster.phase = HazardPhase::Appearing;
        caster.anim.reset();
        caster.target = Some(player_pos);
        caster.hazard = Hitbox::new(
            player_pos.x + HAZARD_OFFSET_X,
            player_pos.y + HAZARD_OFFSET_Y,
            HAZARD_WIDTH,
            HAZARD_HEIGHT,
        );
        caster.dwell = 0;
        events.push(GameEvent::HazardPlaced {
            x: caster.hazard.x,
            y: caster.hazard.y,
        });
    }

    match caster.phase {
        HazardPhase::Appearing => {
            if animation::advance(&mut caster.anim, HAZARD_APPEAR_FRAMES, ENEMY_ANI_DIVISOR)
                == AnimEvent::Completed
            {
                caster.phase = HazardPhase::Fading;
            }
        }
        HazardPhase::Fading => {
            if animation::advance(&mut caster.anim, HAZARD_FADE_FRAMES, ENEMY_ANI_DIVISOR)
                == AnimEvent::Completed
            {
                caster.phase = HazardPhase::Inactive;
                caster.target = None;
                caster.hazard = Hitbox::new(0.0, 0.0, 0.0, 0.0);
                caster.dwell = 0;
            }
        }
        HazardPhase::Inactive => {}
    }
}

/// While the player stands in the live hazard the dwell counter climbs; at
/// the threshold a lump of damage lands and the counter restarts. Identical
/// throttling to the contact-damage window, but independent of the hit
/// detector.
fn check_hazard_dwell(world: &mut World, boss: Entity, player: Entity, events: &mut EventQueue) {
    let (active, hazard) = match world.get::<&SpellCaster>(boss) {
        Ok(c) => (c.hazard_active(), c.hazard),
        Err(_) => return,
    };
    if !active {
        return;
    }

    let overlap = match world.get::<&Hitboxes>(player) {
        Ok(b) => b.damage.intersects(&hazard),
        Err(_) => return,
    };
    if !overlap {
        return;
    }

    let struck = {
        let Ok(mut caster) = world.get::<&mut SpellCaster>(boss) else {
            return;
        };
        caster.dwell += 1;
        if caster.dwell < SPELL_DWELL_THRESHOLD {
            false
        } else {
            caster.dwell = 0;
            true
        }
    };
    if !struck {
        return;
    }

    if let Ok(mut health) = world.get::<&mut Health>(player) {
        health.apply_damage(SPELL_DAMAGE);
        log::debug!("hazard struck player, health {}", health.current);
        events.push(GameEvent::HazardDamage {
            damage: SPELL_DAMAGE,
            remaining: health.current,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TILE_SIZE;
    use crate::grid::CollisionGrid;
    use crate::spawning::spawn_boss;
    use crate::systems::enemy::update_enemy;
    use crate::systems::player::spawn_player;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn open_grid(size: usize) -> CollisionGrid {
        let rows: Vec<Vec<u8>> = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| u8::from(x == 0 || y == 0 || x == size - 1 || y == size - 1))
                    .collect()
            })
            .collect();
        CollisionGrid::from_rows(&rows).unwrap()
    }

    fn setup() -> (World, CollisionGrid, Entity, Entity) {
        let mut world = World::new();
        let grid = open_grid(40);
        let player = spawn_player(&mut world, TILE_SIZE * 30.0, TILE_SIZE * 30.0);
        let boss = spawn_boss(&mut world, TILE_SIZE * 5.0, TILE_SIZE * 5.0);
        (world, grid, player, boss)
    }

    /// Tick boss + spell systems until the cast completes and the hazard is
    /// placed, or the budget runs out.
    fn run_until_hazard(
        world: &mut World,
        grid: &CollisionGrid,
        boss: Entity,
        player: Entity,
        rng: &mut StdRng,
        budget: i32,
    ) -> bool {
        let mut events = EventQueue::new();
        for _ in 0..budget {
            update_enemy(world, grid, boss, player, rng);
            update_boss(world, boss, player, &mut events, rng);
            if world.get::<&SpellCaster>(boss).unwrap().hazard_active() {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_cast_enters_spell_state_and_freezes() {
        let (mut world, _grid, player, boss) = setup();
        let mut events = EventQueue::new();
        let mut rng = StdRng::seed_from_u64(11);

        // Force the timer to the brink, then tick once
        world.get::<&mut SpellCaster>(boss).unwrap().cast_timer = SPELL_THRESHOLD_INITIAL - 1;
        world.get::<&mut Locomotion>(boss).unwrap().moving = true;
        update_boss(&mut world, boss, player, &mut events, &mut rng);

        assert_eq!(
            world.get::<&EnemyState>(boss).unwrap().action,
            EnemyAction::Spell
        );
        assert!(!world.get::<&Locomotion>(boss).unwrap().moving);
        let caster = *world.get::<&SpellCaster>(boss).unwrap();
        assert!(caster.casting);
        assert!(caster.cast_threshold >= SPELL_THRESHOLD_MIN);
        assert!(caster.cast_threshold < SPELL_THRESHOLD_MAX);
    }

    #[test]
    fn test_hazard_pins_to_captured_position() {
        let (mut world, grid, player, boss) = setup();
        let mut rng = StdRng::seed_from_u64(5);

        world.get::<&mut SpellCaster>(boss).unwrap().cast_timer = SPELL_THRESHOLD_INITIAL - 1;
        assert!(run_until_hazard(
            &mut world, &grid, boss, player, &mut rng, 2_000
        ));

        let captured = world.get::<&SpellCaster>(boss).unwrap().hazard;
        let player_pos = *world.get::<&Position>(player).unwrap();
        assert_eq!(captured.x, player_pos.x + HAZARD_OFFSET_X);
        assert_eq!(captured.y, player_pos.y + HAZARD_OFFSET_Y);

        // Move the player; the hazard must not follow
        crate::systems::player::reset_position(
            &mut world,
            player,
            TILE_SIZE * 10.0,
            TILE_SIZE * 10.0,
        );
        let mut events = EventQueue::new();
        for _ in 0..10 {
            update_boss(&mut world, boss, player, &mut events, &mut rng);
        }
        assert_eq!(world.get::<&SpellCaster>(boss).unwrap().hazard, captured);
    }

    #[test]
    fn test_hazard_expires_after_appear_and_fade() {
        let (mut world, grid, player, boss) = setup();
        let mut rng = StdRng::seed_from_u64(5);
        let mut events = EventQueue::new();

        world.get::<&mut SpellCaster>(boss).unwrap().cast_timer = SPELL_THRESHOLD_INITIAL - 1;
        assert!(run_until_hazard(
            &mut world, &grid, boss, player, &mut rng, 2_000
        ));

        let lifetime = (HAZARD_APPEAR_FRAMES + HAZARD_FADE_FRAMES) * ENEMY_ANI_DIVISOR;
        for _ in 0..lifetime {
            update_boss(&mut world, boss, player, &mut events, &mut rng);
        }
        let caster = *world.get::<&SpellCaster>(boss).unwrap();
        assert_eq!(caster.phase, HazardPhase::Inactive);
        assert_eq!(caster.target, None);
        assert_eq!(caster.dwell, 0);
    }

    #[test]
    fn test_dwell_damage_throttled_by_threshold() {
        let (mut world, _grid, player, boss) = setup();
        let mut rng = StdRng::seed_from_u64(2);
        let mut events = EventQueue::new();

        // Hand-arm a hazard on top of the player
        {
            let player_pos = world.get::<&Position>(player).unwrap().vec();
            let mut caster = world.get::<&mut SpellCaster>(boss).unwrap();
            caster.phase = HazardPhase::Appearing;
            caster.hazard = Hitbox::new(
                player_pos.x + HAZARD_OFFSET_X,
                player_pos.y + HAZARD_OFFSET_Y,
                HAZARD_WIDTH,
                HAZARD_HEIGHT,
            );
        }

        for _ in 0..SPELL_DWELL_THRESHOLD - 1 {
            check_hazard_dwell(&mut world, boss, player, &mut events);
        }
        assert_eq!(world.get::<&Health>(player).unwrap().current, 120);

        check_hazard_dwell(&mut world, boss, player, &mut events);
        assert_eq!(
            world.get::<&Health>(player).unwrap().current,
            120 - SPELL_DAMAGE
        );
        assert!(events
            .drain()
            .any(|e| matches!(e, GameEvent::HazardDamage { .. })));
    }

    #[test]
    fn test_weapon_box_mirrors_with_facing() {
        let (mut world, _grid, player, boss) = setup();
        let mut rng = StdRng::seed_from_u64(8);
        let mut events = EventQueue::new();

        let (x, y) = {
            let p = world.get::<&Position>(boss).unwrap();
            (p.x, p.y)
        };
        let offset = archetypes::NECROMANCER.weapon_offset;

        world.get::<&mut Locomotion>(boss).unwrap().dir = glam::Vec2::new(-1.0, 0.0);
        update_boss(&mut world, boss, player, &mut events, &mut rng);
        assert_eq!(
            world.get::<&Hitboxes>(boss).unwrap().weapon.x,
            x - offset.x
        );

        world.get::<&mut Locomotion>(boss).unwrap().dir = glam::Vec2::new(1.0, 0.0);
        update_boss(&mut world, boss, player, &mut events, &mut rng);
        update_boss(&mut world, boss, player, &mut events, &mut rng);
        assert_eq!(
            world.get::<&Hitboxes>(boss).unwrap().weapon.x,
            x + offset.x - NECRO_MIRROR_CORRECTION
        );
    }

    #[test]
    fn test_health_bar_tracks_authoritative_health() {
        let (mut world, _grid, _player, boss) = setup();
        assert_eq!(
            boss_health_bar(&world, boss),
            BossHealthBar {
                current: NECRO_HEALTH,
                max: NECRO_HEALTH
            }
        );
        world.get::<&mut Health>(boss).unwrap().apply_damage(120);
        assert_eq!(boss_health_bar(&world, boss).current, NECRO_HEALTH - 120);
    }
}
