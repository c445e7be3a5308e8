//! Fixed simulation constants. Distances and speeds are in UU unless noted.

/// Default simulation tick rate in Hz.
pub const TICK_RATE_HZ: f32 = 120.0;
/// Duration of one tick at the default rate, in seconds.
pub const TICK_TIME: f32 = 1.0 / TICK_RATE_HZ;

/// Gravity along Z.
pub const GRAVITY_Z: f32 = -650.0;

/// Ball mass handed to the engine.
pub const BALL_MASS: f32 = 30.0;
/// Collision radius of the ball sphere.
pub const BALL_RADIUS: f32 = 91.25;
/// Height of the ball center when resting on the floor.
pub const BALL_REST_Z: f32 = 93.15;
/// Linear speed cap enforced after every tick.
pub const BALL_MAX_SPEED: f32 = 6000.0;
/// Angular speed cap in rad/s.
pub const BALL_MAX_ANG_SPEED: f32 = 6.0;
/// Linear damping applied by the engine each step.
pub const BALL_DRAG: f32 = 0.03;
/// Friction coefficient against world geometry.
pub const BALL_WORLD_FRICTION: f32 = 0.35;
/// Bounciness against world geometry.
pub const BALL_WORLD_RESTITUTION: f32 = 0.6;

/// Rounding grid for position and linear velocity.
pub const PHYSICS_ROUNDING_GRID: f32 = 0.01;
/// Rounding grid for angular velocity (rad/s).
pub const ANG_VEL_ROUNDING_GRID: f32 = 0.00001;

/// Tuning for the heatseeker game mode.
pub mod heatseeker {
    use std::f32::consts::PI;

    /// Target speed the ball starts ramping from.
    pub const INITIAL_TARGET_SPEED: f32 = 2900.0;
    /// Added to the target speed on each qualifying hit.
    pub const TARGET_SPEED_INCREMENT: f32 = 85.0;
    /// Seconds that must pass between hits for the target speed to increase.
    pub const MIN_SPEEDUP_INTERVAL: f32 = 1.0;
    /// Absolute Y of the homing target points.
    pub const TARGET_Y: f32 = 5120.0;
    /// Height of the homing target points.
    pub const TARGET_Z: f32 = 320.0;
    /// Scale on the per-tick yaw correction.
    pub const HORIZONTAL_BLEND: f32 = 1.45;
    /// Scale on the per-tick pitch correction.
    pub const VERTICAL_BLEND: f32 = 0.78;
    /// Fraction of the gap to the target speed closed each tick.
    pub const SPEED_BLEND: f32 = 0.3;
    /// Steered pitch is clamped to this magnitude (radians).
    pub const MAX_TURN_PITCH: f32 = 7000.0 * PI / 32768.0;
    /// Target speed ceiling. Current speed over this scales the turn rate.
    pub const MAX_SPEED: f32 = 4600.0;
    /// A wall normal whose Y component (relative to the target direction)
    /// is at or below the negation of this reverses the target.
    pub const WALL_BOUNCE_CHANGE_NORMAL_Y: f32 = 0.5;
}
