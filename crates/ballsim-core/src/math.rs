use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::Sub;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Euler angle in radians. Yaw turns about +Z starting from +X, pitch
/// raises toward +Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Angle {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
}

impl Angle {
    pub const fn new(yaw: f32, pitch: f32, roll: f32) -> Self {
        Self { yaw, pitch, roll }
    }

    /// Direction angle of `forward`. Roll is always zero. A zero vector
    /// yields a zero angle.
    pub fn from_vec(forward: Vec3) -> Self {
        if forward.x != 0.0 || forward.y != 0.0 {
            let yaw = forward.y.atan2(forward.x);
            let dist_2d = (forward.x * forward.x + forward.y * forward.y).sqrt();
            let pitch = forward.z.atan2(dist_2d);
            Self::new(yaw, pitch, 0.0)
        } else if forward.z > 0.0 {
            Self::new(0.0, FRAC_PI_2, 0.0)
        } else if forward.z < 0.0 {
            Self::new(0.0, -FRAC_PI_2, 0.0)
        } else {
            Self::default()
        }
    }

    /// Unit vector pointing along yaw/pitch.
    pub fn forward(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        Vec3::new(cy * cp, sy * cp, sp)
    }

    /// Wrap every component into `[-PI, PI]`.
    pub fn normalize_fix(&mut self) {
        self.yaw = wrap_angle(self.yaw);
        self.pitch = wrap_angle(self.pitch);
        self.roll = wrap_angle(self.roll);
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::new(
            self.yaw - rhs.yaw,
            self.pitch - rhs.pitch,
            self.roll - rhs.roll,
        )
    }
}

/// Wrap a radian value into `[-PI, PI]`.
pub fn wrap_angle(a: f32) -> f32 {
    if (-PI..=PI).contains(&a) {
        return a;
    }
    (a + PI).rem_euclid(TAU) - PI
}

/// Snap each component of `v` to the nearest multiple of `precision`.
/// A non-positive precision leaves `v` untouched.
pub fn round_vec(v: Vec3, precision: f32) -> Vec3 {
    if precision <= 0.0 {
        return v;
    }
    (v / precision).round() * precision
}
