//! Player controller.
//!
//! Input arrives through the setter functions (the scene layer calls them
//! while keys are held); `update_player` then runs the per-tick pipeline:
//! movement with rollback, weapon-box placement, animation advance, action
//! transition, damage sense, and region-trigger detection.

use glam::Vec2;
use hecs::{Entity, World};

use crate::animation::{self, AnimEvent};
use crate::components::{
    Animation, CombatState, Direction, Health, Hitbox, Hitboxes, Locomotion, PlayerAction,
    PlayerState, Position, SwordTier,
};
use crate::constants::*;
use crate::events::{EventQueue, GameEvent};
use crate::grid::{CollisionGrid, RegionTransition};
use crate::systems::movement;

/// Spawn the player bundle at a world position.
pub fn spawn_player(world: &mut World, x: f32, y: f32) -> Entity {
    world.spawn((
        Position::new(x, y),
        Health::new(PLAYER_MAX_HEALTH),
        Hitboxes {
            solid: Hitbox::new(x, y, PLAYER_SOLID_WIDTH, PLAYER_SOLID_HEIGHT),
            damage: Hitbox::new(
                x,
                y - PLAYER_DMG_OFFSET_Y,
                PLAYER_DMG_WIDTH,
                PLAYER_DMG_HEIGHT,
            ),
            weapon: Hitbox::new(x, y, 50.0, 50.0),
        },
        Locomotion::new(PLAYER_SPEED, x, y, false),
        CombatState::new(SwordTier::Unarmed.damage(), PLAYER_MAX_HEALTH, 0),
        PlayerState::new(CollisionGrid::tile_of(x, y)),
        Animation::new(),
    ))
}

/// Run the player's full self-update for this tick.
pub fn update_player(
    world: &mut World,
    grid: &CollisionGrid,
    player: Entity,
    events: &mut EventQueue,
) {
    puffin::profile_function!();

    apply_movement(world, grid, player);
    update_weapon_hitbox(world, player);
    advance_animation(world, player);
    transition_action(world, player);
    sense_damage(world, player, events);
    check_region_trigger(world, grid, player, events);
}

/// Point the player somewhere. Ignored while a swing is in progress (the
/// movement vector is zeroed instead so the swing stays planted).
pub fn set_direction(world: &mut World, player: Entity, dir: Direction) {
    let attacking = match world.get::<&CombatState>(player) {
        Ok(c) => c.is_attacking(),
        Err(_) => return,
    };
    let Ok(mut loco) = world.get::<&mut Locomotion>(player) else {
        return;
    };
    if attacking {
        loco.dir = Vec2::ZERO;
        return;
    }
    loco.moving = true;
    loco.dir = dir.offset();
    if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
        state.facing = dir;
    }
}

/// Directional input released.
pub fn stop(world: &mut World, player: Entity) {
    if let Ok(mut loco) = world.get::<&mut Locomotion>(player) {
        loco.moving = false;
    }
}

/// Request an attack. Dropped unless a damage-dealing sword is equipped and
/// the cooldown has elapsed.
pub fn request_attack(world: &mut World, player: Entity) {
    let sword = match world.get::<&PlayerState>(player) {
        Ok(s) => s.sword,
        Err(_) => return,
    };
    if sword == SwordTier::Unarmed {
        return;
    }
    if let Ok(mut combat) = world.get::<&mut CombatState>(player) {
        if combat.attack_hold() >= PLAYER_ATTACK_COOLDOWN {
            combat.begin_attack();
        }
    }
}

/// Equip a sword tier; the tier fixes the player's damage output.
pub fn set_sword(world: &mut World, player: Entity, tier: SwordTier) {
    if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
        state.sword = tier;
    }
    if let Ok(mut combat) = world.get::<&mut CombatState>(player) {
        combat.damage = tier.damage();
    }
}

/// Set health directly (clamped); food and debug tooling go through here.
pub fn set_health(world: &mut World, player: Entity, value: i32) {
    if let Ok(mut health) = world.get::<&mut Health>(player) {
        health.set(value);
    }
}

/// Scripted repositioning (area transitions). Pair with [`set_teleported`]
/// so the next tick does not pin the player back.
pub fn reset_position(world: &mut World, player: Entity, x: f32, y: f32) {
    if let Ok(mut pos) = world.get::<&mut Position>(player) {
        pos.x = x;
        pos.y = y;
    }
}

/// Suppress the resting-position pin for one tick.
pub fn set_teleported(world: &mut World, player: Entity, teleported: bool) {
    if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
        state.teleported = teleported;
    }
}

fn apply_movement(world: &mut World, grid: &CollisionGrid, player: Entity) {
    let teleported = match world.get::<&PlayerState>(player) {
        Ok(s) => s.teleported,
        Err(_) => return,
    };

    {
        let Ok(mut pos) = world.get::<&mut Position>(player) else {
            return;
        };
        let Ok(mut loco) = world.get::<&mut Locomotion>(player) else {
            return;
        };
        movement::update_position(
            &mut pos,
            &mut loco,
            grid,
            PLAYER_SOLID_WIDTH,
            PLAYER_SOLID_HEIGHT,
            teleported,
        );
    }

    if teleported {
        if let Ok(mut state) = world.get::<&mut PlayerState>(player) {
            state.teleported = false;
        }
    }

    let (x, y) = match world.get::<&Position>(player) {
        Ok(p) => (p.x, p.y),
        Err(_) => return,
    };
    if let Ok(mut boxes) = world.get::<&mut Hitboxes>(player) {
        boxes.solid.set_pos(x, y);
        boxes.damage.set_pos(x, y - PLAYER_DMG_OFFSET_Y);
    }
}

/// Place the weapon hitbox for the current facing. Only a live swing has a
/// meaningful weapon box; each facing has its own reach and size.
fn update_weapon_hitbox(world: &mut World, player: Entity) {
    let attacking = match world.get::<&CombatState>(player) {
        Ok(c) => c.is_attacking(),
        Err(_) => return,
    };
    if !attacking {
        return;
    }
    let facing = match world.get::<&PlayerState>(player) {
        Ok(s) => s.facing,
        Err(_) => return,
    };
    let (x, y) = match world.get::<&Position>(player) {
        Ok(p) => (p.x, p.y),
        Err(_) => return,
    };

    let (dx, dy, w, h) = match facing {
        Direction::Up => WEAPON_BOX_UP,
        Direction::Down => WEAPON_BOX_DOWN,
        Direction::Left => WEAPON_BOX_LEFT,
        Direction::Right => WEAPON_BOX_RIGHT,
    };
    if let Ok(mut boxes) = world.get::<&mut Hitboxes>(player) {
        boxes.weapon = Hitbox::new(x + dx, y + dy, w, h);
    }
}

/// Advance the animation; swings animate on a faster divider than runs.
/// Frame events clear the transient flags exactly like the enemy pipeline.
fn advance_animation(world: &mut World, player: Entity) {
    let (action, facing) = match world.get::<&PlayerState>(player) {
        Ok(s) => (s.action, s.facing),
        Err(_) => return,
    };

    let Ok(mut combat) = world.get::<&mut CombatState>(player) else {
        return;
    };
    combat.tick_attack_hold();

    let divisor = if combat.is_attacking() {
        PLAYER_ATTACK_ANI_DIVISOR
    } else {
        PLAYER_MOVE_ANI_DIVISOR
    };
    let frames = animation::player_frames(action, facing);

    let event = match world.get::<&mut Animation>(player) {
        Ok(mut anim) => animation::advance(&mut anim, frames, divisor),
        Err(_) => return,
    };
    if event == AnimEvent::Ticked {
        return;
    }

    match action {
        PlayerAction::Hit => {
            combat.cancel_attack();
            if event == AnimEvent::Completed {
                combat.clear_hit();
            }
            drop(combat);
            if let Ok(mut loco) = world.get::<&mut Locomotion>(player) {
                loco.moving = false;
            }
        }
        PlayerAction::Attacking => {
            combat.clear_hit();
            if event == AnimEvent::Completed {
                combat.cancel_attack();
            }
            drop(combat);
            if let Ok(mut loco) = world.get::<&mut Locomotion>(player) {
                loco.moving = false;
            }
        }
        _ => {
            combat.cancel_attack();
            combat.clear_hit();
        }
    }
}

/// Pure action-transition step: HIT > ATTACKING > RUNNING > IDLE.
pub fn next_player_action(hit: bool, attacking: bool, moving: bool) -> PlayerAction {
    if hit {
        PlayerAction::Hit
    } else if attacking {
        PlayerAction::Attacking
    } else if moving {
        PlayerAction::Running
    } else {
        PlayerAction::Idle
    }
}

fn transition_action(world: &mut World, player: Entity) {
    let (hit, attacking) = match world.get::<&CombatState>(player) {
        Ok(c) => (c.is_hit(), c.is_attacking()),
        Err(_) => return,
    };
    let moving = match world.get::<&Locomotion>(player) {
        Ok(l) => l.moving,
        Err(_) => return,
    };

    let Ok(mut state) = world.get::<&mut PlayerState>(player) else {
        return;
    };
    let next = next_player_action(hit, attacking, moving);
    if next != state.action {
        state.action = next;
        if let Ok(mut anim) = world.get::<&mut Animation>(player) {
            anim.reset();
        }
    }
}

/// Edge-triggered damage sense; a drop to zero is terminal.
fn sense_damage(world: &mut World, player: Entity, events: &mut EventQueue) {
    let current = match world.get::<&Health>(player) {
        Ok(h) => h.current,
        Err(_) => return,
    };
    let dropped = match world.get::<&mut CombatState>(player) {
        Ok(mut c) => c.observe_health(current),
        Err(_) => return,
    };
    if dropped && current == 0 {
        events.push(GameEvent::PlayerDied);
    }
}

/// Fire a region transition when the occupied tile changes onto a trigger.
fn check_region_trigger(
    world: &mut World,
    grid: &CollisionGrid,
    player: Entity,
    events: &mut EventQueue,
) {
    let tile = match world.get::<&Position>(player) {
        Ok(p) => CollisionGrid::tile_of(p.x, p.y),
        Err(_) => return,
    };
    let Ok(mut state) = world.get::<&mut PlayerState>(player) else {
        return;
    };
    if tile == state.last_tile {
        return;
    }
    state.last_tile = tile;
    match grid.trigger_at(tile.0, tile.1) {
        Some(RegionTransition::Enter) => events.push(GameEvent::AreaEntered),
        Some(RegionTransition::Exit) => events.push(GameEvent::AreaExited),
        None => {}
    }
}
