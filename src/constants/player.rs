//! Player stats and animation constants.

/// Player maximum (and starting) health
pub const PLAYER_MAX_HEALTH: i32 = 120;
/// Player movement speed in world units per tick
pub const PLAYER_SPEED: f32 = 4.0;

/// Ticks between animation frames while moving or idle
pub const PLAYER_MOVE_ANI_DIVISOR: u32 = 8;
/// Ticks between animation frames while attacking (swings animate faster)
pub const PLAYER_ATTACK_ANI_DIVISOR: u32 = 4;

/// Minimum ticks between accepted attack requests
pub const PLAYER_ATTACK_COOLDOWN: i32 = 40;

/// Player solid hitbox width
pub const PLAYER_SOLID_WIDTH: f32 = 30.0;
/// Player solid hitbox height
pub const PLAYER_SOLID_HEIGHT: f32 = 35.0;

/// Player damage hitbox width
pub const PLAYER_DMG_WIDTH: f32 = 40.0;
/// Player damage hitbox height
pub const PLAYER_DMG_HEIGHT: f32 = 60.0;
/// Vertical offset of the damage hitbox above the position anchor
pub const PLAYER_DMG_OFFSET_Y: f32 = 30.0;

// Weapon hitbox placement while attacking, per facing: (dx, dy, width, height).
// The asymmetry encodes the sword's reach in front of the character.
pub const WEAPON_BOX_UP: (f32, f32, f32, f32) = (-30.0, -40.0, 80.0, 50.0);
pub const WEAPON_BOX_DOWN: (f32, f32, f32, f32) = (-15.0, 10.0, 60.0, 40.0);
pub const WEAPON_BOX_LEFT: (f32, f32, f32, f32) = (-30.0, -30.0, 70.0, 50.0);
pub const WEAPON_BOX_RIGHT: (f32, f32, f32, f32) = (-10.0, -30.0, 70.0, 50.0);

/// Damage dealt per sword tier (unarmed deals nothing)
pub const GREEN_SWORD_DAMAGE: i32 = 15;
pub const BLUE_SWORD_DAMAGE: i32 = 25;
pub const RED_SWORD_DAMAGE: i32 = 40;
