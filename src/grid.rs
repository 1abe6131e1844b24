//! Tile collision grid.
//!
//! Answers solidity, movement, and spawn-validity queries against the loaded
//! collision map, and identifies region-transition trigger tiles. The map
//! image itself and the area switching it triggers belong to external
//! collaborators; this module only classifies tiles.

use thiserror::Error;

use crate::constants::TILE_SIZE;

/// Classification of one collision-map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    /// Walkable ground
    Open,
    /// Blocks movement
    Solid,
    /// Stepping here moves the player into the sub-area
    EnterArea,
    /// Stepping here moves the player back out
    ExitArea,
    /// Open ground that enemies may be spawned on
    Spawnable,
}

impl TileKind {
    /// Decode the raw collision-map value. Unknown values are plain ground.
    pub fn from_raw(value: u8) -> Self {
        match value {
            1 => TileKind::Solid,
            2 => TileKind::EnterArea,
            3 => TileKind::ExitArea,
            8 => TileKind::Spawnable,
            _ => TileKind::Open,
        }
    }
}

/// Region transition fired by a trigger tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionTransition {
    Enter,
    Exit,
}

/// Errors raised while building a grid from raw map rows
#[derive(Debug, Error)]
pub enum GridError {
    /// The map has no rows or no columns.
    #[error("collision map is empty")]
    EmptyMap,

    /// A row's length differs from the first row's.
    #[error("collision map row {row} has {got} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
}

/// The collision grid. Read-only after construction and safe to share.
#[derive(Debug)]
pub struct CollisionGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl CollisionGrid {
    /// Build a grid from raw collision-map rows (row-major, y then x).
    /// The map must be rectangular and non-empty; a malformed map is a
    /// configuration error and is rejected up front.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyMap);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    got: row.len(),
                });
            }
            tiles.extend(row.iter().map(|&v| TileKind::from_raw(v)));
        }

        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Width of the playable area in tiles
    pub fn tiles_wide(&self) -> usize {
        self.width
    }

    /// Height of the playable area in tiles
    pub fn tiles_tall(&self) -> usize {
        self.height
    }

    /// Width of the playable area in world units
    pub fn width_units(&self) -> f32 {
        self.width as f32 * TILE_SIZE
    }

    /// Height of the playable area in world units
    pub fn height_units(&self) -> f32 {
        self.height as f32 * TILE_SIZE
    }

    /// Tile coordinates under a world-space point
    pub fn tile_of(x: f32, y: f32) -> (i32, i32) {
        (
            (x / TILE_SIZE).floor() as i32,
            (y / TILE_SIZE).floor() as i32,
        )
    }

    /// Look up the tile under a world-space point.
    ///
    /// The grid must cover the full playable bounds; a lookup outside the map
    /// is a precondition violation and panics.
    pub fn kind_at(&self, x: f32, y: f32) -> TileKind {
        let (tx, ty) = Self::tile_of(x, y);
        self.kind_at_tile(tx, ty)
    }

    /// Look up a tile by tile coordinates. Panics outside the map bounds.
    pub fn kind_at_tile(&self, tx: i32, ty: i32) -> TileKind {
        if tx < 0 || ty < 0 || tx >= self.width as i32 || ty >= self.height as i32 {
            panic!(
                "collision lookup outside loaded map: tile ({tx}, {ty}), map {}x{}",
                self.width, self.height
            );
        }
        self.tiles[ty as usize * self.width + tx as usize]
    }

    /// Whether the point sits on a solid tile
    pub fn is_solid(&self, x: f32, y: f32) -> bool {
        self.kind_at(x, y) == TileKind::Solid
    }

    /// Whether a box may rest here: all four corners must be non-solid
    pub fn is_move_valid(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        !self.is_solid(x, y)
            && !self.is_solid(x + w, y)
            && !self.is_solid(x, y + h)
            && !self.is_solid(x + w, y + h)
    }

    /// Whether a box may be spawned here: all four corners must be spawnable
    pub fn is_spawn_valid(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        self.is_spawnable(x, y)
            && self.is_spawnable(x + w, y)
            && self.is_spawnable(x, y + h)
            && self.is_spawnable(x + w, y + h)
    }

    fn is_spawnable(&self, x: f32, y: f32) -> bool {
        self.kind_at(x, y) == TileKind::Spawnable
    }

    /// Region transition attached to a tile, if any
    pub fn trigger_at(&self, tx: i32, ty: i32) -> Option<RegionTransition> {
        match self.kind_at_tile(tx, ty) {
            TileKind::EnterArea => Some(RegionTransition::Enter),
            TileKind::ExitArea => Some(RegionTransition::Exit),
            _ => None,
        }
    }
}
