//! Conversion between the physics engine's internal distance units and
//! public simulation units (UU).
//!
//! Positions and linear velocities scale by a fixed factor. Angular velocity
//! is in rad/s on both sides and is never scaled.

use glam::Vec3;

/// Engine units to UU.
pub const BT_TO_UU: f32 = 50.0;
/// UU to engine units.
pub const UU_TO_BT: f32 = 1.0 / 50.0;

/// Scale a UU length (or speed) into engine units.
pub fn uu_to_engine_len(len: f32) -> f32 {
    len * UU_TO_BT
}

/// Scale an engine-unit length (or speed) into UU.
pub fn engine_to_uu_len(len: f32) -> f32 {
    len * BT_TO_UU
}

/// Scale a UU position or linear velocity into engine units.
pub fn uu_to_engine(v: Vec3) -> Vec3 {
    v * UU_TO_BT
}

/// Scale an engine-unit position or linear velocity into UU.
pub fn engine_to_uu(v: Vec3) -> Vec3 {
    v * BT_TO_UU
}
