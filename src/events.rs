//! Simulation events for decoupled communication with collaborators.
//!
//! Systems emit events during the tick; the host drains them afterwards.
//! Rendering, audio, the reward/coin collaborator, and the area manager all
//! react to these without reaching into the simulation state.

use hecs::Entity;

use crate::archetypes::EnemyKind;

/// Events emitted by the simulation during one tick
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// The spawner placed a new enemy
    EnemySpawned {
        entity: Entity,
        kind: EnemyKind,
        x: f32,
        y: f32,
    },
    /// An enemy died and was removed; the reward collaborator listens here
    EnemySlain {
        entity: Entity,
        kind: EnemyKind,
        x: f32,
        y: f32,
    },
    /// An enemy's contact damage connected with the player
    PlayerDamaged { damage: i32, remaining: i32 },
    /// The player's swing connected with an enemy
    EnemyDamaged {
        entity: Entity,
        damage: i32,
        remaining: i32,
    },
    /// The spell hazard's dwell damage landed on the player
    HazardDamage { damage: i32, remaining: i32 },
    /// The necromancer pinned a hazard at the captured position
    HazardPlaced { x: f32, y: f32 },
    /// The player stepped onto an enter-trigger tile
    AreaEntered,
    /// The player stepped onto an exit-trigger tile
    AreaExited,
    /// The player's health reached zero
    PlayerDied,
    /// The boss's health reached zero; terminal, fired once
    BossDefeated,
}

/// Simple event queue - events are pushed during the tick, drained after
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
