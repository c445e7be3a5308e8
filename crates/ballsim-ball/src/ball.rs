use ballsim_core::consts::{ANG_VEL_ROUNDING_GRID, BALL_MAX_ANG_SPEED, PHYSICS_ROUNDING_GRID};
use ballsim_core::game_mode::{GameMode, Team, UserInfoType};
use ballsim_core::math::round_vec;
use ballsim_core::mutator::MutatorConfig;
use ballsim_core::units::{engine_to_uu, engine_to_uu_len, uu_to_engine, uu_to_engine_len};
use glam::Vec3;
use rapier3d::prelude::*;

use crate::behavior::{BallBehavior, behavior_for};
use crate::state::BallState;
use crate::world::{PhysicsWorld, from_na, to_na};

/// The simulation's single dynamic sphere.
///
/// Owns its engine body and collider by handle and mirrors them in a cached
/// [`BallState`]. The engine does the dynamics; the ball enforces speed caps
/// and rounding after each step and runs the game mode's hooks.
#[derive(Debug)]
pub struct Ball {
    body: RigidBodyHandle,
    collider: ColliderHandle,
    radius_engine: f32,
    internal_state: BallState,
    /// Pending linear-velocity delta in engine units, consumed by the next
    /// [`Ball::finish_physics_tick`].
    velocity_impulse_cache: Vec3,
    game_mode: GameMode,
    behavior: Box<dyn BallBehavior>,
}

impl Ball {
    /// Build the ball's body from `mutators` and register it with `world`.
    /// The ball spawns resting at `(0, 0, radius)` with no velocity.
    pub fn new(world: &mut PhysicsWorld, mutators: &MutatorConfig, game_mode: GameMode) -> Self {
        let radius_engine = uu_to_engine_len(mutators.ball_radius);

        let body = RigidBodyBuilder::dynamic()
            .translation(vector![0.0, 0.0, radius_engine])
            .linear_damping(mutators.ball_drag)
            .ccd_enabled(true)
            .user_data(UserInfoType::Ball.user_data())
            .build();

        // Mass on the collider lets the engine derive inertia from the sphere.
        // The contact hook puts this ball's contacts in the world's recorder.
        let collider = ColliderBuilder::ball(radius_engine)
            .mass(mutators.ball_mass)
            .friction(mutators.ball_world_friction)
            .restitution(mutators.ball_world_restitution)
            .active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS)
            .user_data(UserInfoType::Ball.user_data())
            .build();

        let (body, collider) = world.add_body(body, collider);

        let internal_state = BallState {
            pos: Vec3::new(0.0, 0.0, mutators.ball_radius),
            ..BallState::default()
        };

        tracing::debug!(?game_mode, radius = mutators.ball_radius, "Ball created");

        Self {
            body,
            collider,
            radius_engine,
            internal_state,
            velocity_impulse_cache: Vec3::ZERO,
            game_mode,
            behavior: behavior_for(game_mode),
        }
    }

    /// Deregister the ball's body and collider from `world`.
    pub fn remove(self, world: &mut PhysicsWorld) {
        world.remove_body(self.body);
    }

    pub fn body_handle(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn collider_handle(&self) -> ColliderHandle {
        self.collider
    }

    pub fn game_mode(&self) -> GameMode {
        self.game_mode
    }

    /// Collision radius in engine units.
    pub fn radius_engine(&self) -> f32 {
        self.radius_engine
    }

    /// Collision radius in UU.
    pub fn radius(&self) -> f32 {
        engine_to_uu_len(self.radius_engine)
    }

    /// Refresh the cached state from the engine body and return a copy.
    pub fn get_state(&mut self, bodies: &RigidBodySet) -> BallState {
        let rb = &bodies[self.body];
        self.internal_state.pos = engine_to_uu(from_na(rb.translation()));
        self.internal_state.vel = engine_to_uu(from_na(rb.linvel()));
        self.internal_state.ang_vel = from_na(rb.angvel());
        self.internal_state
    }

    /// Force both the cache and the engine body into `state`. Rotation is
    /// reset to identity and any pending impulse is dropped.
    pub fn set_state(&mut self, bodies: &mut RigidBodySet, state: &BallState) {
        self.internal_state = *state;

        let pos = uu_to_engine(state.pos);
        let rb = &mut bodies[self.body];
        rb.set_position(Isometry::translation(pos.x, pos.y, pos.z), true);
        rb.set_linvel(to_na(uu_to_engine(state.vel)), true);
        rb.set_angvel(to_na(state.ang_vel), true);

        self.velocity_impulse_cache = Vec3::ZERO;
        tracing::debug!(pos = ?state.pos, vel = ?state.vel, "Ball state set");
    }

    /// Queue a linear-velocity change (UU/s) for the next
    /// [`Ball::finish_physics_tick`]. Call only between ticks.
    pub fn add_velocity_impulse(&mut self, delta: Vec3) {
        self.velocity_impulse_cache += uu_to_engine(delta);
    }

    /// Pending impulse in UU/s.
    pub fn velocity_impulse_cache(&self) -> Vec3 {
        engine_to_uu(self.velocity_impulse_cache)
    }

    /// Mode-specific work before the engine step. A velocity returned by the
    /// behavior is written straight to the body, bypassing the impulse cache.
    pub fn pre_tick_update(&mut self, bodies: &mut RigidBodySet, tick_time: f32) {
        self.get_state(bodies);
        if let Some(new_vel) = self.behavior.pre_tick(&mut self.internal_state, tick_time) {
            bodies[self.body].set_linvel(to_na(uu_to_engine(new_vel)), true);
            self.internal_state.vel = new_vel;
        }
    }

    /// Stabilize the body after the engine step: apply the pending impulse,
    /// cap linear and angular speed, then optionally round to fixed grids.
    ///
    /// Rounding runs after the caps, so a rounded speed can sit above its cap
    /// by at most one grid step.
    pub fn finish_physics_tick(&mut self, bodies: &mut RigidBodySet, mutators: &MutatorConfig) {
        let rb = &mut bodies[self.body];
        let mut vel = from_na(rb.linvel());
        let mut ang_vel = from_na(rb.angvel());

        if self.velocity_impulse_cache != Vec3::ZERO {
            vel += self.velocity_impulse_cache;
            self.velocity_impulse_cache = Vec3::ZERO;
        }

        let max_speed = uu_to_engine_len(mutators.ball_max_speed).max(0.0);
        if vel.length_squared() > max_speed * max_speed {
            tracing::trace!(speed = engine_to_uu_len(vel.length()), "Ball speed clamped");
            vel = vel.clamp_length_max(max_speed);
        }
        if ang_vel.length_squared() > BALL_MAX_ANG_SPEED * BALL_MAX_ANG_SPEED {
            ang_vel = ang_vel.clamp_length_max(BALL_MAX_ANG_SPEED);
        }

        if mutators.enable_physics_rounding {
            let grid = uu_to_engine_len(PHYSICS_ROUNDING_GRID);
            let pos = round_vec(from_na(rb.translation()), grid);
            rb.set_translation(to_na(pos), true);
            vel = round_vec(vel, grid);
            ang_vel = round_vec(ang_vel, ANG_VEL_ROUNDING_GRID);
        }

        rb.set_linvel(to_na(vel), true);
        rb.set_angvel(to_na(ang_vel), true);
    }

    /// A car of `car_team` touched the ball.
    pub fn on_hit(&mut self, car_team: Team) {
        self.behavior.on_hit(&mut self.internal_state.hs_info, car_team);
    }

    /// The ball touched static world geometry whose surface normal is
    /// `normal`.
    pub fn on_world_collision(&mut self, normal: Vec3) {
        self.behavior.on_world_collision(&mut self.internal_state.hs_info, normal);
    }
}
