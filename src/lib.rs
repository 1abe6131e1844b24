//! Real-time entity simulation core for a 2D tile action-RPG.
//!
//! Owns per-frame movement, tile collision resolution, the timed combat
//! state machines of the player and every enemy archetype, cross-entity hit
//! detection, the day/night-driven spawn scheduler, and the scripted boss.
//! Rendering, scene navigation, persistence storage, and the wall-clock
//! timer are external collaborators: they feed input through [`GameSim`]'s
//! setters, tick it against a [`game_time::TimeSource`], drain its events,
//! and read its view structs.
//!
//! The whole simulation advances in one deterministic, fixed-order tick;
//! see [`engine::tick`].

pub mod animation;
pub mod archetypes;
pub mod components;
pub mod constants;
pub mod engine;
pub mod events;
pub mod game_time;
pub mod grid;
pub mod snapshot;
pub mod spawning;
pub mod systems;

pub use archetypes::EnemyKind;
pub use components::{Direction, EnemyAction, PlayerAction, SwordTier};
pub use engine::{EnemyView, GameSim, PlayerView};
pub use events::GameEvent;
pub use game_time::{DayCycle, TimeOfDay, TimeSource};
pub use grid::{CollisionGrid, GridError, RegionTransition};
pub use snapshot::WorldSnapshot;
