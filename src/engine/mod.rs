//! Simulation engine - owns all simulation state and exposes a clean API to
//! the host application.
//!
//! The engine owns:
//! - the ECS world and the collision grid
//! - the player entity and the enemy manager
//! - the event queue and the RNG
//!
//! The host (scene layer, renderer, save system) only calls the input
//! setters, ticks the simulation against its clock, drains events, and reads
//! the view structs.

mod simulation;

pub use simulation::tick;

use glam::Vec2;
use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::archetypes::EnemyKind;
use crate::components::{
    Animation, Direction, EnemyAction, EnemyState, Health, PlayerAction, PlayerState, Position,
    SwordTier,
};
use crate::constants::{PLAYER_START_TILE_X, PLAYER_START_TILE_Y, TILE_SIZE};
use crate::events::{EventQueue, GameEvent};
use crate::game_time::{TimeOfDay, TimeSource};
use crate::grid::CollisionGrid;
use crate::spawning::EnemyManager;
use crate::systems;
use crate::systems::spellcast::{self, BossHealthBar};

/// Per-entity render/persistence view of one enemy
#[derive(Debug, Clone, Copy)]
pub struct EnemyView {
    pub entity: Entity,
    pub kind: EnemyKind,
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub action: EnemyAction,
    pub frame: u32,
}

/// Render/persistence view of the player
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub health: i32,
    pub max_health: i32,
    pub facing: Direction,
    pub action: PlayerAction,
    pub frame: u32,
    pub sword: SwordTier,
}

/// The simulation context: every update threads through this object, there
/// is no global state.
pub struct GameSim {
    pub world: World,
    pub grid: CollisionGrid,
    pub player: Entity,
    pub manager: EnemyManager,
    pub events: EventQueue,
    pub(crate) rng: StdRng,
}

impl GameSim {
    /// Build a simulation over a loaded collision grid.
    pub fn new(grid: CollisionGrid, time: TimeOfDay) -> Self {
        Self::with_seed(grid, time, rand::random())
    }

    /// Build with a fixed RNG seed; the tick sequence is then deterministic
    /// for a given input and clock sequence.
    pub fn with_seed(grid: CollisionGrid, time: TimeOfDay, seed: u64) -> Self {
        let mut world = World::new();
        let mut rng = StdRng::seed_from_u64(seed);

        let player = systems::spawn_player(
            &mut world,
            PLAYER_START_TILE_X as f32 * TILE_SIZE,
            PLAYER_START_TILE_Y as f32 * TILE_SIZE,
        );
        let manager = EnemyManager::new(&mut world, time, &mut rng);

        Self {
            world,
            grid,
            player,
            manager,
            events: EventQueue::new(),
            rng,
        }
    }

    /// Advance the simulation by one tick against the external clock.
    pub fn tick(&mut self, time: &impl TimeSource) {
        simulation::tick(self, TimeOfDay::sample(time));
    }

    /// Drain the events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }

    // ---- player input passthrough ----

    pub fn set_player_direction(&mut self, dir: Direction) {
        systems::player::set_direction(&mut self.world, self.player, dir);
    }

    pub fn stop_player(&mut self) {
        systems::player::stop(&mut self.world, self.player);
    }

    pub fn request_player_attack(&mut self) {
        systems::player::request_attack(&mut self.world, self.player);
    }

    pub fn set_player_sword(&mut self, tier: SwordTier) {
        systems::player::set_sword(&mut self.world, self.player, tier);
    }

    pub fn set_player_health(&mut self, value: i32) {
        systems::player::set_health(&mut self.world, self.player, value);
    }

    /// Scripted repositioning: move the player and skip the pin for one tick.
    pub fn reset_player_position(&mut self, x: f32, y: f32) {
        systems::player::reset_position(&mut self.world, self.player, x, y);
        systems::player::set_teleported(&mut self.world, self.player, true);
    }

    // ---- views ----

    pub fn player_view(&self) -> Option<PlayerView> {
        let pos = self.world.get::<&Position>(self.player).ok()?;
        let health = self.world.get::<&Health>(self.player).ok()?;
        let state = self.world.get::<&PlayerState>(self.player).ok()?;
        let anim = self.world.get::<&Animation>(self.player).ok()?;
        Some(PlayerView {
            x: pos.x,
            y: pos.y,
            health: health.current,
            max_health: health.max,
            facing: state.facing,
            action: state.action,
            frame: anim.frame,
            sword: state.sword,
        })
    }

    /// Views of every live spawned enemy, in spawn order, plus the boss
    /// while it lives.
    pub fn enemy_views(&self) -> Vec<EnemyView> {
        let mut views: Vec<EnemyView> = self
            .manager
            .enemies()
            .iter()
            .filter_map(|&entity| self.enemy_view(entity))
            .collect();
        if !self.manager.boss_defeated() {
            if let Some(view) = self.enemy_view(self.manager.necromancer()) {
                views.push(view);
            }
        }
        views
    }

    fn enemy_view(&self, entity: Entity) -> Option<EnemyView> {
        let pos = self.world.get::<&Position>(entity).ok()?;
        let health = self.world.get::<&Health>(entity).ok()?;
        let state = self.world.get::<&EnemyState>(entity).ok()?;
        let anim = self.world.get::<&Animation>(entity).ok()?;
        Some(EnemyView {
            entity,
            kind: state.kind,
            x: pos.x,
            y: pos.y,
            health: health.current,
            action: state.action,
            frame: anim.frame,
        })
    }

    pub fn enemy_count(&self) -> u32 {
        self.manager.enemy_count()
    }

    pub fn necromancer(&self) -> Entity {
        self.manager.necromancer()
    }

    pub fn boss_health_bar(&self) -> BossHealthBar {
        spellcast::boss_health_bar(&self.world, self.manager.necromancer())
    }

    /// The live hazard position, if one is pinned (for the renderer).
    pub fn hazard_position(&self) -> Option<Vec2> {
        self.world
            .get::<&crate::components::SpellCaster>(self.manager.necromancer())
            .ok()
            .and_then(|c| c.target)
    }

    /// Which sprite set the boss is showing (for the renderer).
    pub fn boss_facing(&self) -> crate::components::BossFacing {
        self.world
            .get::<&crate::components::BossFacing>(self.manager.necromancer())
            .map(|f| *f)
            .unwrap_or(crate::components::BossFacing::Left)
    }
}
