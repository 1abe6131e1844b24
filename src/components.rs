//! Simulation components shared by the player and all enemy archetypes.
//!
//! Entities are plain component bundles in a `hecs::World`; there is no type
//! hierarchy. Archetype-specific behavior hangs off extra components (the
//! necromancer's [`SpellCaster`]) rather than subtypes.

use glam::Vec2;

use crate::archetypes::EnemyKind;
use crate::constants::COLLISION_THRESHOLD;

/// World position in units. Anchors the solid hitbox; the damage and weapon
/// boxes trail it by per-archetype offsets.
#[derive(Debug, Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Axis-aligned hitbox, repositioned every tick to track its entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Hitbox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn set_pos(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Strict interior overlap; boxes that merely touch do not intersect
    pub fn intersects(&self, other: &Hitbox) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// The three hitboxes every actor carries
#[derive(Debug, Clone, Copy)]
pub struct Hitboxes {
    /// Blocks movement; tested against the collision grid
    pub solid: Hitbox,
    /// Area where this entity can receive damage
    pub damage: Hitbox,
    /// Area where this entity deals damage
    pub weapon: Hitbox,
}

/// Health component, clamped to `[0, max]` by its methods
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, clamping at zero
    pub fn apply_damage(&mut self, amount: i32) {
        self.current = (self.current - amount).max(0);
    }

    /// Set health directly, clamped into range
    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }
}

/// Four-way facing used by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit movement vector for this facing
    pub fn offset(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Binary facing used by the boss sprite mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossFacing {
    Left,
    Right,
}

/// Enemy action states, in animation-table order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    Idle,
    Running,
    Attack,
    Hit,
    /// Necromancer only: casting freezes every other state
    Spell,
}

/// Player action states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Idle,
    Running,
    Attacking,
    Hit,
}

/// Equipped sword tier; the tier fixes the player's damage output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwordTier {
    Unarmed,
    Green,
    Blue,
    Red,
}

impl SwordTier {
    pub fn damage(self) -> i32 {
        use crate::constants::{BLUE_SWORD_DAMAGE, GREEN_SWORD_DAMAGE, RED_SWORD_DAMAGE};
        match self {
            SwordTier::Unarmed => 0,
            SwordTier::Green => GREEN_SWORD_DAMAGE,
            SwordTier::Blue => BLUE_SWORD_DAMAGE,
            SwordTier::Red => RED_SWORD_DAMAGE,
        }
    }
}

/// Animation cursor: tick divider plus current frame index
#[derive(Debug, Clone, Copy, Default)]
pub struct Animation {
    pub timer: u32,
    pub frame: u32,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.timer = 0;
        self.frame = 0;
    }
}

/// Movement state. `rest_x`/`rest_y` hold the last validated position; an
/// entity that is not actively moving is pinned back to it every tick so
/// concurrent entities cannot displace it into a wall.
#[derive(Debug, Clone, Copy)]
pub struct Locomotion {
    pub dir: Vec2,
    pub speed: f32,
    pub moving: bool,
    pub rest_x: f32,
    pub rest_y: f32,
}

impl Locomotion {
    pub fn new(speed: f32, x: f32, y: f32, moving: bool) -> Self {
        Self {
            dir: Vec2::ZERO,
            speed,
            moving,
            rest_x: x,
            rest_y: y,
        }
    }
}

/// Per-enemy controller state
#[derive(Debug, Clone, Copy)]
pub struct EnemyState {
    pub kind: EnemyKind,
    pub action: EnemyAction,
    pub wander_timer: i32,
}

impl EnemyState {
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            action: EnemyAction::Idle,
            wander_timer: 0,
        }
    }
}

/// Player-only controller state
#[derive(Debug, Clone, Copy)]
pub struct PlayerState {
    pub facing: Direction,
    pub action: PlayerAction,
    pub sword: SwordTier,
    /// Suppresses the resting-position pin for one tick after a scripted move
    pub teleported: bool,
    /// Tile occupied last tick, for edge-triggered region transitions
    pub last_tile: (i32, i32),
}

impl PlayerState {
    pub fn new(last_tile: (i32, i32)) -> Self {
        Self {
            facing: Direction::Down,
            action: PlayerAction::Idle,
            sword: SwordTier::Unarmed,
            teleported: false,
            last_tile,
        }
    }
}

/// Combat flags and cooldown counters for one actor.
///
/// This is the one struct other components are allowed to mutate across the
/// controller boundary, and only through its methods. The pair-cooldown
/// counters live here (on the actor, not on the hit detector) so every
/// enemy/player pair throttles independently.
#[derive(Debug, Clone, Copy)]
pub struct CombatState {
    attacking: bool,
    hit: bool,
    prev_health: i32,
    /// Damage dealt on a connecting hit
    pub damage: i32,
    attack_delay: i32,
    get_hit: i32,
    attack_hold: i32,
    collision_throttle: i32,
}

impl CombatState {
    /// `initial_hold` pre-loads the post-swing hold counter; enemies start
    /// past it so the first swing is not suppressed.
    pub fn new(damage: i32, health: i32, initial_hold: i32) -> Self {
        Self {
            attacking: false,
            hit: false,
            prev_health: health,
            damage,
            attack_delay: 0,
            get_hit: 0,
            attack_hold: initial_hold,
            collision_throttle: COLLISION_THRESHOLD,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn is_hit(&self) -> bool {
        self.hit
    }

    /// Begin an attack and restart the hold/cooldown counter
    pub fn begin_attack(&mut self) {
        self.attacking = true;
        self.attack_hold = 0;
    }

    /// Force the attack flag on without touching the hold counter
    /// (proximity-triggered enemy attacks)
    pub fn force_attack(&mut self) {
        self.attacking = true;
    }

    pub fn cancel_attack(&mut self) {
        self.attacking = false;
    }

    /// A swing animation finished: drop the flag and arm the hold window
    pub fn end_swing(&mut self) {
        self.attacking = false;
        self.attack_hold = 0;
    }

    pub fn clear_hit(&mut self) {
        self.hit = false;
    }

    /// Edge-triggered damage sense: flags `hit` only when the observed
    /// health is lower than the last observed value.
    pub fn observe_health(&mut self, current: i32) -> bool {
        let dropped = current < self.prev_health;
        if dropped {
            self.hit = true;
        }
        self.prev_health = current;
        dropped
    }

    pub fn attack_hold(&self) -> i32 {
        self.attack_hold
    }

    pub fn tick_attack_hold(&mut self) {
        self.attack_hold += 1;
    }

    /// Advance both pair-cooldown counters; called once per tick by the hit
    /// detector.
    pub fn tick_pair_counters(&mut self) {
        self.attack_delay += 1;
        self.get_hit += 1;
    }

    pub fn attack_delay(&self) -> i32 {
        self.attack_delay
    }

    pub fn reset_attack_delay(&mut self) {
        self.attack_delay = 0;
    }

    pub fn get_hit(&self) -> i32 {
        self.get_hit
    }

    pub fn reset_get_hit(&mut self) {
        self.get_hit = 0;
    }

    /// Advance the post-collision throttle; returns true when it rolls over
    /// and the enemy's movement flag should be forced back on.
    pub fn tick_collision_throttle(&mut self, threshold: i32) -> bool {
        self.collision_throttle += 1;
        if self.collision_throttle >= threshold {
            self.collision_throttle = 0;
            return true;
        }
        false
    }
}

/// Hazard lifecycle for the necromancer's ranged spell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardPhase {
    Inactive,
    Appearing,
    Fading,
}

/// Necromancer spell sub-state machine.
///
/// The cast timer drives entry into the SPELL action; once the casting
/// animation completes, the hazard runs its appear/fade sequence at the
/// target captured when casting finished. The target is frozen for the whole
/// sequence, which is what makes the hazard dodgeable.
#[derive(Debug, Clone, Copy)]
pub struct SpellCaster {
    pub cast_timer: i32,
    pub cast_threshold: i32,
    /// True from cast start until the casting animation completes
    pub casting: bool,
    pub phase: HazardPhase,
    pub anim: Animation,
    pub target: Option<Vec2>,
    pub hazard: Hitbox,
    pub dwell: i32,
}

impl SpellCaster {
    pub fn new(initial_threshold: i32) -> Self {
        Self {
            cast_timer: 0,
            cast_threshold: initial_threshold,
            casting: false,
            phase: HazardPhase::Inactive,
            anim: Animation::new(),
            target: None,
            hazard: Hitbox::new(0.0, 0.0, 0.0, 0.0),
            dwell: 0,
        }
    }

    /// Whether the hazard is live and can accumulate dwell time
    pub fn hazard_active(&self) -> bool {
        self.phase != HazardPhase::Inactive
    }
}
