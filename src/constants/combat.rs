//! Hit-detection thresholds.

/// Ticks of recovery required between two damage applications to the player.
/// Throttles contact damage to roughly once per window no matter how long the
/// hitboxes overlap.
pub const ATTACK_DELAY_THRESHOLD: i32 = 70;

/// Ticks of recovery required between two damage applications to an enemy
pub const GET_HIT_THRESHOLD: i32 = 35;

/// Ticks a jostled enemy stays put after a solid-box collision before its
/// movement flag is forced back on
pub const COLLISION_THRESHOLD: i32 = 100;

/// Pushback amplification applied to an enemy overlapping the player's solid
/// hitbox, enough to separate the boxes in one step
pub const UNSTICK_FACTOR: f32 = 1.5;
