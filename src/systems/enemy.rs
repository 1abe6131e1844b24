//! Shared enemy controller.
//!
//! Every archetype runs the same per-tick pipeline: sense incoming damage,
//! pick a movement direction, move with rollback, tick the post-swing hold,
//! advance the animation, then transition the action state. The action
//! transition and the animation advance are separate pure steps; gameplay
//! side effects hang off the animation events.

use glam::Vec2;
use hecs::{Entity, World};
use rand::Rng;

use crate::animation::{self, AnimEvent};
use crate::archetypes::EnemyArchetype;
use crate::components::{
    Animation, CombatState, EnemyAction, EnemyState, Health, Hitboxes, Locomotion, Position,
};
use crate::constants::{ENEMY_ANI_DIVISOR, VISIBLE_RADIUS, WANDER_THRESHOLD};
use crate::grid::CollisionGrid;
use crate::systems::movement;

/// Run one enemy's full self-update for this tick.
pub fn update_enemy(
    world: &mut World,
    grid: &CollisionGrid,
    enemy: Entity,
    player: Entity,
    rng: &mut impl Rng,
) {
    puffin::profile_function!();

    sense_damage(world, enemy);
    choose_direction(world, enemy, player, rng);
    apply_movement(world, grid, enemy);
    tick_attack_hold(world, enemy);
    advance_animation(world, enemy);
    transition_action(world, enemy);
}

/// Edge-triggered damage sense: entering HIT is driven by observing the
/// health value drop, not by the attacker.
fn sense_damage(world: &mut World, enemy: Entity) {
    let current = match world.get::<&Health>(enemy) {
        Ok(h) => h.current,
        Err(_) => return,
    };
    if let Ok(mut combat) = world.get::<&mut CombatState>(enemy) {
        combat.observe_health(current);
    }
}

/// Pick this tick's movement direction.
///
/// A visible player is pursued along the normalized direct vector, re-aimed
/// every tick; there is no pathfinding, so a pursuing enemy can stall
/// against a wall. Out of sight, a new wander direction is rolled every
/// [`WANDER_THRESHOLD`] ticks with a meaningful chance of standing still.
fn choose_direction(world: &mut World, enemy: Entity, player: Entity, rng: &mut impl Rng) {
    let enemy_pos = match world.get::<&Position>(enemy) {
        Ok(p) => p.vec(),
        Err(_) => return,
    };
    let player_pos = match world.get::<&Position>(player) {
        Ok(p) => p.vec(),
        Err(_) => return,
    };

    let diff = player_pos - enemy_pos;
    let player_visible = diff.length() <= VISIBLE_RADIUS;

    let Ok(mut state) = world.get::<&mut EnemyState>(enemy) else {
        return;
    };
    let Ok(mut loco) = world.get::<&mut Locomotion>(enemy) else {
        return;
    };

    state.wander_timer += 1;

    if player_visible {
        loco.dir = diff.normalize_or_zero();
    } else if state.wander_timer >= WANDER_THRESHOLD {
        state.wander_timer = 0;
        loco.moving = true;
        match rng.gen_range(0..50) {
            0..=9 => loco.dir = Vec2::X,
            10..=19 => loco.dir = -Vec2::X,
            20..=29 => loco.dir = Vec2::Y,
            30..=39 => loco.dir = -Vec2::Y,
            _ => loco.moving = false,
        }
    }
}

/// Move with full rollback, then drag all three hitboxes along.
fn apply_movement(world: &mut World, grid: &CollisionGrid, enemy: Entity) {
    let arch = match world.get::<&EnemyState>(enemy) {
        Ok(s) => s.kind.archetype(),
        Err(_) => return,
    };

    {
        let Ok(mut pos) = world.get::<&mut Position>(enemy) else {
            return;
        };
        let Ok(mut loco) = world.get::<&mut Locomotion>(enemy) else {
            return;
        };
        movement::update_position(
            &mut pos,
            &mut loco,
            grid,
            arch.solid_size.x,
            arch.solid_size.y,
            false,
        );
    }

    reposition_hitboxes(world, enemy, arch);
}

/// Snap the hitboxes to the entity's current position plus archetype offsets.
pub(crate) fn reposition_hitboxes(world: &mut World, enemy: Entity, arch: &EnemyArchetype) {
    let (x, y) = match world.get::<&Position>(enemy) {
        Ok(p) => (p.x, p.y),
        Err(_) => return,
    };
    if let Ok(mut boxes) = world.get::<&mut Hitboxes>(enemy) {
        boxes.solid.set_pos(x, y);
        boxes
            .damage
            .set_pos(x - arch.damage_offset.x, y - arch.damage_offset.y);
        boxes
            .weapon
            .set_pos(x - arch.weapon_offset.x, y - arch.weapon_offset.y);
    }
}

/// Suppress the attack flag while the post-swing hold window is live.
fn tick_attack_hold(world: &mut World, enemy: Entity) {
    let hold = match world.get::<&EnemyState>(enemy) {
        Ok(s) => s.kind.archetype().attack_hold,
        Err(_) => return,
    };
    if let Ok(mut combat) = world.get::<&mut CombatState>(enemy) {
        combat.tick_attack_hold();
        if combat.attack_hold() < hold {
            combat.cancel_attack();
        }
    }
}

/// Advance the animation cursor and apply the gameplay side effects of the
/// frame events: the contact frame freezes the swing in place, and a
/// completed cycle clears the transient flags.
fn advance_animation(world: &mut World, enemy: Entity) {
    let (kind, action) = match world.get::<&EnemyState>(enemy) {
        Ok(s) => (s.kind, s.action),
        Err(_) => return,
    };
    let frames = animation::enemy_frames(kind, action);

    let event = match world.get::<&mut Animation>(enemy) {
        Ok(mut anim) => animation::advance(&mut anim, frames, ENEMY_ANI_DIVISOR),
        Err(_) => return,
    };

    match event {
        AnimEvent::Midpoint if action == EnemyAction::Attack => {
            // The swing connects here; hold the enemy on the spot
            if let Ok(mut combat) = world.get::<&mut CombatState>(enemy) {
                combat.clear_hit();
            }
            if let Ok(mut loco) = world.get::<&mut Locomotion>(enemy) {
                loco.moving = false;
            }
        }
        AnimEvent::Completed => {
            if let Ok(mut combat) = world.get::<&mut CombatState>(enemy) {
                if combat.is_attacking() {
                    combat.end_swing();
                }
                combat.clear_hit();
            }
            if action == EnemyAction::Spell {
                if let Ok(mut state) = world.get::<&mut EnemyState>(enemy) {
                    state.action = EnemyAction::Running;
                }
            }
        }
        _ => {}
    }
}

/// Pure action-transition step: strict priority over the combat flags.
/// A live SPELL state overrides everything until its animation completes.
pub fn next_action(current: EnemyAction, hit: bool, attacking: bool, moving: bool) -> EnemyAction {
    if current == EnemyAction::Spell {
        return EnemyAction::Spell;
    }
    if hit {
        EnemyAction::Hit
    } else if attacking {
        EnemyAction::Attack
    } else if moving {
        EnemyAction::Running
    } else {
        EnemyAction::Idle
    }
}

/// Apply the transition; a changed action restarts its animation.
fn transition_action(world: &mut World, enemy: Entity) {
    let (hit, attacking) = match world.get::<&CombatState>(enemy) {
        Ok(c) => (c.is_hit(), c.is_attacking()),
        Err(_) => return,
    };
    let moving = match world.get::<&Locomotion>(enemy) {
        Ok(l) => l.moving,
        Err(_) => return,
    };

    let Ok(mut state) = world.get::<&mut EnemyState>(enemy) else {
        return;
    };
    let next = next_action(state.action, hit, attacking, moving);
    if next != state.action {
        state.action = next;
        if let Ok(mut anim) = world.get::<&mut Animation>(enemy) {
            anim.reset();
        }
    }
}
