//! Data-driven enemy archetype catalog.
//!
//! Each archetype is an immutable descriptor holding stats, hitbox geometry,
//! and animation pacing for one enemy type. Descriptors are `'static` and
//! shared by reference across every instance of the type. Lookup is total
//! over [`EnemyKind`], so an unknown archetype cannot exist at runtime.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Enemy archetype tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Skeleton,
    Zombie,
    Eyeball,
    Necromancer,
}

impl EnemyKind {
    /// The immutable stat/geometry descriptor for this kind
    pub fn archetype(self) -> &'static EnemyArchetype {
        match self {
            EnemyKind::Skeleton => &SKELETON,
            EnemyKind::Zombie => &ZOMBIE,
            EnemyKind::Eyeball => &EYEBALL,
            EnemyKind::Necromancer => &NECROMANCER,
        }
    }

    /// Whether this kind is the scripted boss (exempt from spawn scheduling)
    pub fn is_boss(self) -> bool {
        self == EnemyKind::Necromancer
    }
}

/// Immutable per-archetype attribute table.
///
/// Hitbox geometry: the solid box sits directly on the entity position; the
/// damage and weapon boxes trail the position minus their offset. The sprite
/// anchor is the offset between the sprite's top-left corner and the solid
/// box, consumed by the rendering collaborator only.
#[derive(Debug, Clone, Copy)]
pub struct EnemyArchetype {
    pub kind: EnemyKind,
    pub health: i32,
    pub damage: i32,
    pub speed: f32,
    /// Source sprite edge length in pixels
    pub pix_size: u32,
    pub solid_size: Vec2,
    pub damage_size: Vec2,
    pub weapon_size: Vec2,
    pub damage_offset: Vec2,
    pub weapon_offset: Vec2,
    pub sprite_anchor: Vec2,
    /// Ticks the attack flag stays suppressed after a finished swing
    pub attack_hold: i32,
}

pub const SKELETON: EnemyArchetype = EnemyArchetype {
    kind: EnemyKind::Skeleton,
    health: SKEL_HEALTH,
    damage: SKEL_DAMAGE,
    speed: SKEL_SPEED,
    pix_size: SKEL_PIX_SIZE,
    solid_size: Vec2::new(45.0, 50.0),
    damage_size: Vec2::new(45.0, 90.0),
    weapon_size: Vec2::new(180.0, 80.0),
    damage_offset: Vec2::new(0.0, 45.0),
    weapon_offset: Vec2::new(60.0, 60.0),
    sprite_anchor: Vec2::new(70.0, 100.0),
    attack_hold: ENEMY_ATTACK_HOLD,
};

pub const ZOMBIE: EnemyArchetype = EnemyArchetype {
    kind: EnemyKind::Zombie,
    health: ZOM_HEALTH,
    damage: ZOM_DAMAGE,
    speed: ZOM_SPEED,
    pix_size: ZOM_PIX_SIZE,
    solid_size: Vec2::new(40.0, 40.0),
    damage_size: Vec2::new(35.0, 70.0),
    weapon_size: Vec2::new(70.0, 65.0),
    damage_offset: Vec2::new(-5.0, 35.0),
    weapon_offset: Vec2::new(10.0, 45.0),
    sprite_anchor: Vec2::new(25.0, 60.0),
    attack_hold: ENEMY_ATTACK_HOLD,
};

pub const EYEBALL: EnemyArchetype = EnemyArchetype {
    kind: EnemyKind::Eyeball,
    health: EYE_HEALTH,
    damage: EYE_DAMAGE,
    speed: EYE_SPEED,
    pix_size: EYE_PIX_SIZE,
    solid_size: Vec2::new(30.0, 30.0),
    damage_size: Vec2::new(38.0, 40.0),
    weapon_size: Vec2::new(60.0, 60.0),
    damage_offset: Vec2::new(1.0, 1.0),
    weapon_offset: Vec2::new(10.0, 10.0),
    sprite_anchor: Vec2::new(10.0, 0.0),
    attack_hold: ENEMY_ATTACK_HOLD,
};

pub const NECROMANCER: EnemyArchetype = EnemyArchetype {
    kind: EnemyKind::Necromancer,
    health: NECRO_HEALTH,
    damage: NECRO_DAMAGE,
    speed: NECRO_SPEED,
    pix_size: NECRO_PIX_SIZE,
    solid_size: Vec2::new(45.0, 50.0),
    damage_size: Vec2::new(110.0, 140.0),
    weapon_size: Vec2::new(130.0, 150.0),
    damage_offset: Vec2::new(30.0, 90.0),
    weapon_offset: Vec2::new(100.0, 100.0),
    sprite_anchor: Vec2::new(175.0, 180.0),
    attack_hold: NECRO_ATTACK_HOLD,
};

/// All archetypes, in spawn-rate order
pub const ALL_KINDS: [EnemyKind; 4] = [
    EnemyKind::Skeleton,
    EnemyKind::Zombie,
    EnemyKind::Eyeball,
    EnemyKind::Necromancer,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_total_and_consistent() {
        for kind in ALL_KINDS {
            let arch = kind.archetype();
            assert_eq!(arch.kind, kind);
            assert!(arch.health > 0);
            assert!(arch.damage > 0);
            assert!(arch.speed > 0.0);
            assert!(arch.solid_size.x > 0.0 && arch.solid_size.y > 0.0);
        }
    }

    #[test]
    fn test_only_the_necromancer_is_boss() {
        assert!(EnemyKind::Necromancer.is_boss());
        assert!(!EnemyKind::Skeleton.is_boss());
        assert!(!EnemyKind::Zombie.is_boss());
        assert!(!EnemyKind::Eyeball.is_boss());
    }
}
