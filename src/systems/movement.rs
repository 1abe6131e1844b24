//! Shared displacement and rollback contract.
//!
//! Both the player and every enemy move the same way: apply the whole
//! displacement, validate the solid box against the grid, and roll the whole
//! displacement back if any corner lands in a wall. There is no partial
//! clipping. Entities that are not actively moving are pinned to their last
//! validated resting position so concurrent entities cannot shove them into
//! terrain.

use crate::components::{Locomotion, Position};
use crate::grid::CollisionGrid;

/// Advance one entity's position by its movement vector.
///
/// `bypass_pin` suppresses the resting-position pin for this tick (the
/// player's teleport flag); the displacement itself is still validated.
pub fn update_position(
    pos: &mut Position,
    loco: &mut Locomotion,
    grid: &CollisionGrid,
    solid_w: f32,
    solid_h: f32,
    bypass_pin: bool,
) {
    if loco.moving || bypass_pin {
        let (from_x, from_y) = (pos.x, pos.y);
        pos.x += loco.dir.x * loco.speed;
        pos.y += loco.dir.y * loco.speed;

        // Invalid destination: full rollback, never a partial clip
        if !grid.is_move_valid(pos.x, pos.y, solid_w, solid_h) {
            pos.x = from_x;
            pos.y = from_y;
        }

        loco.rest_x = pos.x;
        loco.rest_y = pos.y;
    } else {
        pos.x = loco.rest_x;
        pos.y = loco.rest_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TILE_SIZE;
    use glam::Vec2;

    fn walled_grid() -> CollisionGrid {
        // 5x5, solid ring, open interior
        let rows: Vec<Vec<u8>> = (0..5)
            .map(|y| {
                (0..5)
                    .map(|x| u8::from(x == 0 || y == 0 || x == 4 || y == 4))
                    .collect()
            })
            .collect();
        CollisionGrid::from_rows(&rows).unwrap()
    }

    #[test]
    fn test_valid_move_updates_rest_position() {
        let grid = walled_grid();
        let mut pos = Position::new(TILE_SIZE * 2.0, TILE_SIZE * 2.0);
        let mut loco = Locomotion::new(4.0, pos.x, pos.y, true);
        loco.dir = Vec2::new(1.0, 0.0);

        update_position(&mut pos, &mut loco, &grid, 20.0, 20.0, false);
        assert_eq!(pos.x, TILE_SIZE * 2.0 + 4.0);
        assert_eq!(loco.rest_x, pos.x);
    }

    #[test]
    fn test_blocked_move_rolls_back_exactly() {
        let grid = walled_grid();
        // Hug the east wall: one step right would poke the solid column
        let start_x = TILE_SIZE * 4.0 - 21.0;
        let mut pos = Position::new(start_x, TILE_SIZE * 2.0);
        let mut loco = Locomotion::new(4.0, pos.x, pos.y, true);
        loco.dir = Vec2::new(1.0, 0.0);

        update_position(&mut pos, &mut loco, &grid, 20.0, 20.0, false);
        assert_eq!(pos.x, start_x);
        assert_eq!(pos.y, TILE_SIZE * 2.0);
    }

    #[test]
    fn test_stationary_entity_is_pinned_to_rest() {
        let grid = walled_grid();
        let mut pos = Position::new(TILE_SIZE * 2.0, TILE_SIZE * 2.0);
        let mut loco = Locomotion::new(4.0, pos.x, pos.y, false);

        // Someone shoved the entity between ticks
        pos.x += 13.0;
        update_position(&mut pos, &mut loco, &grid, 20.0, 20.0, false);
        assert_eq!(pos.x, TILE_SIZE * 2.0);
    }

    #[test]
    fn test_bypass_pin_accepts_scripted_position() {
        let grid = walled_grid();
        let mut pos = Position::new(TILE_SIZE * 2.0, TILE_SIZE * 2.0);
        let mut loco = Locomotion::new(4.0, TILE_SIZE * 3.0, TILE_SIZE * 3.0, false);

        update_position(&mut pos, &mut loco, &grid, 20.0, 20.0, true);
        // Not snapped back to the stale rest position; rest now tracks here
        assert_eq!(pos.x, TILE_SIZE * 2.0);
        assert_eq!(loco.rest_x, pos.x);
    }
}
