use std::io::{Read, Write};

use ballsim_core::consts::{BALL_REST_Z, heatseeker};
use ballsim_core::error::StateCodecError;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Heatseeker sub-state. Inert while `y_target_dir == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatseekerInfo {
    /// `0` inactive, `1` or `-1` homing toward that goal's target.
    pub y_target_dir: f32,
    /// Speed the ball blends toward while homing (UU/s).
    pub cur_target_speed: f32,
    /// Seconds since the last hit that raised the target speed.
    pub time_since_hit: f32,
}

impl Default for HeatseekerInfo {
    fn default() -> Self {
        Self {
            y_target_dir: 0.0,
            cur_target_speed: heatseeker::INITIAL_TARGET_SPEED,
            time_since_hit: 0.0,
        }
    }
}

impl HeatseekerInfo {
    pub fn is_active(&self) -> bool {
        self.y_target_dir != 0.0
    }
}

/// Snapshot of the ball. Distances in UU, angular velocity in rad/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    pub pos: Vec3,
    pub vel: Vec3,
    pub ang_vel: Vec3,
    pub hs_info: HeatseekerInfo,
}

impl Default for BallState {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, 0.0, BALL_REST_Z),
            vel: Vec3::ZERO,
            ang_vel: Vec3::ZERO,
            hs_info: HeatseekerInfo::default(),
        }
    }
}

/// Wire layout: pos, vel, ang_vel, y_target_dir, cur_target_speed,
/// time_since_hit. Changing this breaks every stored or transmitted state.
type WireFields = ([f32; 3], [f32; 3], [f32; 3], f32, f32, f32);

impl BallState {
    /// Whether `pos`, `vel` and `ang_vel` each lie strictly within their
    /// margin of `other`'s. `hs_info` is not compared.
    pub fn matches(
        &self,
        other: &BallState,
        margin_pos: f32,
        margin_vel: f32,
        margin_ang_vel: f32,
    ) -> bool {
        self.pos.distance_squared(other.pos) < margin_pos * margin_pos
            && self.vel.distance_squared(other.vel) < margin_vel * margin_vel
            && self.ang_vel.distance_squared(other.ang_vel) < margin_ang_vel * margin_ang_vel
    }

    /// Field-for-field equality, including `hs_info`.
    pub fn exact_matches(&self, other: &BallState) -> bool {
        self == other
    }

    fn wire_fields(&self) -> WireFields {
        (
            self.pos.to_array(),
            self.vel.to_array(),
            self.ang_vel.to_array(),
            self.hs_info.y_target_dir,
            self.hs_info.cur_target_speed,
            self.hs_info.time_since_hit,
        )
    }

    fn from_wire_fields(fields: WireFields) -> Self {
        let (pos, vel, ang_vel, y_target_dir, cur_target_speed, time_since_hit) = fields;
        Self {
            pos: Vec3::from_array(pos),
            vel: Vec3::from_array(vel),
            ang_vel: Vec3::from_array(ang_vel),
            hs_info: HeatseekerInfo {
                y_target_dir,
                cur_target_speed,
                time_since_hit,
            },
        }
    }

    /// Write the fixed field list to `out`.
    pub fn serialize<W: Write>(&self, out: &mut W) -> Result<(), StateCodecError> {
        rmp_serde::encode::write(out, &self.wire_fields())
            .map_err(|e| StateCodecError::Encode(e.to_string()))
    }

    /// Read a state previously written by [`BallState::serialize`].
    pub fn deserialize<R: Read>(input: &mut R) -> Result<Self, StateCodecError> {
        rmp_serde::decode::from_read::<_, WireFields>(input)
            .map(Self::from_wire_fields)
            .map_err(|e| StateCodecError::Decode(e.to_string()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StateCodecError> {
        let mut buf = Vec::with_capacity(64);
        self.serialize(&mut buf)?;
        Ok(buf)
    }

    pub fn from_bytes(mut data: &[u8]) -> Result<Self, StateCodecError> {
        Self::deserialize(&mut data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> BallState {
        BallState {
            pos: Vec3::new(-1200.5, 3400.25, 512.0),
            vel: Vec3::new(1500.0, -220.75, 13.125),
            ang_vel: Vec3::new(0.5, -2.25, 5.875),
            hs_info: HeatseekerInfo {
                y_target_dir: -1.0,
                cur_target_speed: 3070.0,
                time_since_hit: 0.4,
            },
        }
    }

    #[test]
    fn default_rests_on_floor_inactive() {
        let s = BallState::default();
        assert_eq!(s.pos, Vec3::new(0.0, 0.0, BALL_REST_Z));
        assert!(!s.hs_info.is_active());
        assert_eq!(
            s.hs_info.cur_target_speed,
            heatseeker::INITIAL_TARGET_SPEED
        );
    }

    #[test]
    fn matches_respects_each_margin() {
        let a = sample_state();
        let mut b = a;
        b.pos.x += 0.5;
        assert!(a.matches(&b, 1.0, 1.0, 1.0));
        assert!(!a.matches(&b, 0.4, 1.0, 1.0));

        let mut c = a;
        c.vel.y -= 2.0;
        assert!(!a.matches(&c, 1.0, 1.0, 1.0));
        assert!(a.matches(&c, 1.0, 2.5, 1.0));

        let mut d = a;
        d.ang_vel.z += 0.1;
        assert!(!a.matches(&d, 1.0, 1.0, 0.05));
    }

    #[test]
    fn matches_ignores_heatseeker_info() {
        let a = sample_state();
        let mut b = a;
        b.hs_info.y_target_dir = 1.0;
        assert!(a.matches(&b, 0.01, 0.01, 0.01));
        assert!(!a.exact_matches(&b));
    }

    #[test]
    fn serialization_roundtrip_is_exact() {
        let a = sample_state();
        let bytes = a.to_bytes().unwrap();
        let b = BallState::from_bytes(&bytes).unwrap();
        assert!(a.exact_matches(&b), "{a:?} != {b:?}");
    }

    #[test]
    fn serialization_field_order_is_fixed() {
        let a = sample_state();
        let bytes = a.to_bytes().unwrap();
        let raw: (Vec<f32>, Vec<f32>, Vec<f32>, f32, f32, f32) =
            rmp_serde::from_slice(&bytes).unwrap();
        assert_eq!(raw.0, vec![-1200.5, 3400.25, 512.0]);
        assert_eq!(raw.1, vec![1500.0, -220.75, 13.125]);
        assert_eq!(raw.2, vec![0.5, -2.25, 5.875]);
        assert_eq!(raw.3, -1.0);
        assert_eq!(raw.4, 3070.0);
        assert_eq!(raw.5, 0.4);
    }

    #[test]
    fn stream_holds_consecutive_states() {
        let a = sample_state();
        let b = BallState::default();
        let mut buf = Vec::new();
        a.serialize(&mut buf).unwrap();
        b.serialize(&mut buf).unwrap();

        let mut cursor = std::io::Cursor::new(buf);
        assert!(BallState::deserialize(&mut cursor).unwrap().exact_matches(&a));
        assert!(BallState::deserialize(&mut cursor).unwrap().exact_matches(&b));
    }

    #[test]
    fn truncated_input_is_decode_error() {
        let bytes = sample_state().to_bytes().unwrap();
        let err = BallState::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, StateCodecError::Decode(_)), "got {err:?}");
        assert!(BallState::from_bytes(&[]).is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn vec3() -> impl Strategy<Value = Vec3> {
            (-1e4f32..1e4, -1e4f32..1e4, -1e4f32..1e4).prop_map(|(x, y, z)| Vec3::new(x, y, z))
        }

        proptest! {
            #[test]
            fn any_state_roundtrips_exactly(
                pos in vec3(),
                vel in vec3(),
                ang_vel in vec3(),
                dir in prop_oneof![Just(-1.0f32), Just(0.0f32), Just(1.0f32)],
                speed in 0.0f32..5000.0,
                t in 0.0f32..60.0,
            ) {
                let s = BallState {
                    pos,
                    vel,
                    ang_vel,
                    hs_info: HeatseekerInfo {
                        y_target_dir: dir,
                        cur_target_speed: speed,
                        time_since_hit: t,
                    },
                };
                let back = BallState::from_bytes(&s.to_bytes().unwrap()).unwrap();
                prop_assert!(s.exact_matches(&back));
            }
        }
    }
}
