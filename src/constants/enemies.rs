//! Enemy stats, AI, and animation constants.

/// Straight-line distance at which an enemy notices the player
pub const VISIBLE_RADIUS: f32 = 300.0;

/// Ticks between wander-direction re-rolls while the player is out of sight
pub const WANDER_THRESHOLD: i32 = 100;

/// Ticks between enemy animation frames
pub const ENEMY_ANI_DIVISOR: u32 = 7;

/// Ticks an enemy holds still after finishing a swing before it may attack again
pub const ENEMY_ATTACK_HOLD: i32 = 30;
/// The necromancer's swings are spaced much wider than the melee archetypes'
pub const NECRO_ATTACK_HOLD: i32 = 120;

// SKELETON
pub const SKEL_HEALTH: i32 = 100;
pub const SKEL_DAMAGE: i32 = 25;
pub const SKEL_SPEED: f32 = 1.5;
pub const SKEL_PIX_SIZE: u32 = 132;

// ZOMBIE
pub const ZOM_HEALTH: i32 = 70;
pub const ZOM_DAMAGE: i32 = 20;
pub const ZOM_SPEED: f32 = 2.0;
pub const ZOM_PIX_SIZE: u32 = 64;

// EYEBALL
pub const EYE_HEALTH: i32 = 30;
pub const EYE_DAMAGE: i32 = 10;
pub const EYE_SPEED: f32 = 3.0;
pub const EYE_PIX_SIZE: u32 = 32;

// NECROMANCER
pub const NECRO_HEALTH: i32 = 300;
pub const NECRO_DAMAGE: i32 = 30;
pub const NECRO_SPEED: f32 = 2.0;
pub const NECRO_PIX_SIZE: u32 = 200;

/// Lower bound (inclusive) for the re-rolled spell-cast threshold, in ticks
pub const SPELL_THRESHOLD_MIN: i32 = 300;
/// Upper bound (exclusive) for the re-rolled spell-cast threshold
pub const SPELL_THRESHOLD_MAX: i32 = 700;
/// Spell-cast threshold before the first re-roll
pub const SPELL_THRESHOLD_INITIAL: i32 = 400;
/// Lump damage applied when the player dwells in the hazard long enough
pub const SPELL_DAMAGE: i32 = 20;
/// Ticks the player must overlap the hazard before the lump damage lands
pub const SPELL_DWELL_THRESHOLD: i32 = 35;
/// Hazard hitbox size
pub const HAZARD_WIDTH: f32 = 40.0;
pub const HAZARD_HEIGHT: f32 = 70.0;
/// Hazard hitbox offset from the captured player position
pub const HAZARD_OFFSET_X: f32 = -5.0;
pub const HAZARD_OFFSET_Y: f32 = -40.0;
/// Horizontal correction applied to the weapon hitbox when the boss faces right,
/// mirroring the off-center sprite sheet
pub const NECRO_MIRROR_CORRECTION: f32 = 80.0;
