//! Game-mode behavior layered on top of the engine-driven ball.
//!
//! [`Ball`](crate::ball::Ball) calls every hook unconditionally; modes that
//! don't care keep the empty defaults.

use std::fmt::Debug;

use ballsim_core::consts::heatseeker;
use ballsim_core::game_mode::{GameMode, Team};
use ballsim_core::math::Angle;
use glam::Vec3;

use crate::state::{BallState, HeatseekerInfo};

/// Per-mode hooks into the tick pipeline.
pub trait BallBehavior: Debug + Send + Sync {
    /// Runs before the engine step with a freshly read state. Returns a
    /// linear velocity (UU/s) to write straight to the engine body.
    fn pre_tick(&self, _state: &mut BallState, _tick_time: f32) -> Option<Vec3> {
        None
    }

    /// A car touched the ball.
    fn on_hit(&self, _hs_info: &mut HeatseekerInfo, _car_team: Team) {}

    /// The ball touched static world geometry. `normal` is the surface
    /// normal pointing toward the ball.
    fn on_world_collision(&self, _hs_info: &mut HeatseekerInfo, _normal: Vec3) {}
}

/// Pick the behavior for a game mode.
pub fn behavior_for(mode: GameMode) -> Box<dyn BallBehavior> {
    match mode {
        GameMode::Soccar => Box::new(DefaultBehavior),
        GameMode::Heatseeker => Box::new(HeatseekerBehavior),
    }
}

/// Plain physics, no overrides.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehavior;

impl BallBehavior for DefaultBehavior {}

/// Homes toward a goal after a hit, ramping speed on spaced-out hits and
/// reversing on near head-on wall contact.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatseekerBehavior;

impl BallBehavior for HeatseekerBehavior {
    fn pre_tick(&self, state: &mut BallState, tick_time: f32) -> Option<Vec3> {
        let y_target_dir = state.hs_info.y_target_dir;
        if y_target_dir == 0.0 {
            return None;
        }

        let vel_angle = Angle::from_vec(state.vel);
        let target = Vec3::new(
            0.0,
            heatseeker::TARGET_Y * y_target_dir,
            heatseeker::TARGET_Z,
        );
        let angle_to_goal = Angle::from_vec(target - state.pos);
        let delta = angle_to_goal - vel_angle;

        let cur_speed = state.vel.length();
        let speed_ratio = cur_speed / heatseeker::MAX_SPEED;
        let interp = speed_ratio * tick_time;

        let mut new_angle = vel_angle;
        new_angle.yaw += delta.yaw * interp * heatseeker::HORIZONTAL_BLEND;
        new_angle.pitch += delta.pitch * interp * heatseeker::VERTICAL_BLEND;
        new_angle.normalize_fix();
        new_angle.pitch = new_angle
            .pitch
            .clamp(-heatseeker::MAX_TURN_PITCH, heatseeker::MAX_TURN_PITCH);

        let new_speed =
            cur_speed + (state.hs_info.cur_target_speed - cur_speed) * heatseeker::SPEED_BLEND;

        state.hs_info.time_since_hit += tick_time;
        Some(new_angle.forward() * new_speed)
    }

    fn on_hit(&self, hs_info: &mut HeatseekerInfo, car_team: Team) {
        let increase_speed =
            hs_info.time_since_hit > heatseeker::MIN_SPEEDUP_INTERVAL || !hs_info.is_active();
        hs_info.y_target_dir = car_team.attack_dir_y();
        if increase_speed {
            hs_info.time_since_hit = 0.0;
            hs_info.cur_target_speed = (hs_info.cur_target_speed
                + heatseeker::TARGET_SPEED_INCREMENT)
                .min(heatseeker::MAX_SPEED);
        }
        tracing::debug!(
            y_target_dir = hs_info.y_target_dir,
            target_speed = hs_info.cur_target_speed,
            increase_speed,
            "Heatseeker retargeted"
        );
    }

    fn on_world_collision(&self, hs_info: &mut HeatseekerInfo, normal: Vec3) {
        if !hs_info.is_active() {
            return;
        }
        let rel_normal_y = normal.y * hs_info.y_target_dir;
        if rel_normal_y <= -heatseeker::WALL_BOUNCE_CHANGE_NORMAL_Y {
            hs_info.y_target_dir *= -1.0;
            tracing::debug!(
                y_target_dir = hs_info.y_target_dir,
                "Heatseeker target flipped off wall"
            );
        }
    }
}
