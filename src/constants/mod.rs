//! Simulation constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod combat;
mod enemies;
mod gameplay;
mod player;
mod spawn;

// Re-export all constants at the module level
pub use combat::*;
pub use enemies::*;
pub use gameplay::*;
pub use player::*;
pub use spawn::*;
