//! Simulation systems organized by domain.
//!
//! - `movement`: shared displacement/rollback contract
//! - `player`: player controller (input, movement, animation, weapon box)
//! - `enemy`: shared enemy controller (AI, movement, animation)
//! - `spellcast`: necromancer spell sub-state machine
//! - `hit_detection`: cross-entity hitbox resolution

pub mod enemy;
pub mod hit_detection;
pub mod movement;
pub mod player;
pub mod spellcast;

// Re-export commonly used items
pub use enemy::update_enemy;
pub use hit_detection::resolve;
pub use player::{spawn_player, update_player};
pub use spellcast::{boss_health_bar, update_boss, BossHealthBar};
