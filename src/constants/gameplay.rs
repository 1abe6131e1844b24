//! World layout constants.

/// Edge length of one map tile, in world units
pub const TILE_SIZE: f32 = 48.0;

/// Default playable area width in tiles
pub const TILES_IN_WIDTH: usize = 50;
/// Default playable area height in tiles
pub const TILES_IN_HEIGHT: usize = 50;

/// Player starting tile (x)
pub const PLAYER_START_TILE_X: i32 = 14;
/// Player starting tile (y)
pub const PLAYER_START_TILE_Y: i32 = 29;
