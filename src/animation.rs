//! Animation frame tables and the pure frame-advance step.
//!
//! Controllers split every update into two phases: a pure action-transition
//! step (which state am I in) and this pure animation-advance step (which
//! frame am I on). The advance step reports what happened so the caller can
//! apply the gameplay side effects (clearing flags on completion, freezing
//! mid-swing) without the two concerns bleeding into each other.

use crate::archetypes::EnemyKind;
use crate::components::{Animation, Direction, EnemyAction, PlayerAction};

/// Frames in the hazard's appear phase
pub const HAZARD_APPEAR_FRAMES: u32 = 5;
/// Frames in the hazard's fade phase
pub const HAZARD_FADE_FRAMES: u32 = 3;

/// Outcome of one animation-advance tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimEvent {
    /// The divider ticked but the frame did not change
    Ticked,
    /// The frame index advanced
    Advanced,
    /// The frame index advanced onto the contact frame of a swing
    Midpoint,
    /// The animation wrapped past its last frame and reset
    Completed,
}

/// Advance an animation cursor by one tick against a frame table entry.
/// The cursor's frame index stays strictly below `frame_count`.
pub fn advance(anim: &mut Animation, frame_count: u32, divisor: u32) -> AnimEvent {
    debug_assert!(frame_count > 0, "animation with no frames");
    debug_assert!(divisor > 0, "animation with zero divisor");

    anim.timer += 1;
    if anim.timer < divisor {
        return AnimEvent::Ticked;
    }
    anim.timer = 0;
    anim.frame += 1;

    if anim.frame >= frame_count {
        anim.frame = 0;
        return AnimEvent::Completed;
    }
    if anim.frame == frame_count / 2 {
        return AnimEvent::Midpoint;
    }
    AnimEvent::Advanced
}

/// Frame count for an enemy archetype/action pair. Total over both enums;
/// a pairing without sprites animates as a single frame.
pub fn enemy_frames(kind: EnemyKind, action: EnemyAction) -> u32 {
    match (kind, action) {
        (EnemyKind::Skeleton, EnemyAction::Running) => 12,
        (EnemyKind::Skeleton, EnemyAction::Attack) => 13,
        (EnemyKind::Skeleton, EnemyAction::Hit) => 3,

        (EnemyKind::Zombie, EnemyAction::Running) => 8,
        (EnemyKind::Zombie, EnemyAction::Attack) => 7,
        (EnemyKind::Zombie, EnemyAction::Hit) => 3,

        (EnemyKind::Eyeball, EnemyAction::Running) => 4,
        (EnemyKind::Eyeball, EnemyAction::Attack) => 4,
        (EnemyKind::Eyeball, EnemyAction::Hit) => 4,

        (EnemyKind::Necromancer, EnemyAction::Running) => 5,
        (EnemyKind::Necromancer, EnemyAction::Attack) => 5,
        (EnemyKind::Necromancer, EnemyAction::Hit) => 4,
        (EnemyKind::Necromancer, EnemyAction::Spell) => 8,

        (_, EnemyAction::Idle) => 1,
        // Only the necromancer casts; the pairing is unreachable for the rest
        (_, EnemyAction::Spell) => 1,
    }
}

/// Frame count for a player action/facing pair
pub fn player_frames(action: PlayerAction, facing: Direction) -> u32 {
    match action {
        PlayerAction::Idle | PlayerAction::Hit => 1,
        PlayerAction::Running => match facing {
            Direction::Up => 2,
            Direction::Down => 3,
            Direction::Left | Direction::Right => 6,
        },
        PlayerAction::Attacking => match facing {
            Direction::Up => 4,
            Direction::Down => 7,
            Direction::Left | Direction::Right => 5,
        },
    }
}
