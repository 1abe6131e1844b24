//! Spawn scheduling constants.

/// Maximum number of concurrently live spawned enemies
pub const ENEMY_CAP: u32 = 8;

/// Spawn-interval bounds (in game hours) during the day
pub const DAY_SPAWN_MIN: i32 = 2;
pub const DAY_SPAWN_MAX: i32 = 6;
/// Spawn-interval bounds during the night; nights are more dangerous
pub const NIGHT_SPAWN_MIN: i32 = 1;
pub const NIGHT_SPAWN_MAX: i32 = 2;
/// Interval bounds used for the very first schedule, before the time of day
/// has been sampled
pub const FIRST_SPAWN_MIN: i32 = 1;
pub const FIRST_SPAWN_MAX: i32 = 3;

/// Weighted archetype rates, evaluated cumulatively against one 0..100 draw
pub const SKELETON_RATE: u32 = 20;
pub const ZOMBIE_RATE: u32 = 38;
pub const EYEBALL_RATE: u32 = 42;

/// Edge length of the box probed for spawn validity
pub const SPAWN_PROBE_SIZE: f32 = 32.0;

/// Upper bound on tile draws per spawn before giving up; a map with no free
/// spawnable tiles left must not hang the tick
pub const MAX_SPAWN_ATTEMPTS: u32 = 1_000;

/// Tile where the single necromancer is placed at startup
pub const NECRO_SPAWN_TILE: (i32, i32) = (20, 26);
