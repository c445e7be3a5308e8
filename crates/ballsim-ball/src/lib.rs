pub mod ball;
pub mod behavior;
pub mod state;
pub mod world;

pub use ball::Ball;
pub use behavior::{BallBehavior, DefaultBehavior, HeatseekerBehavior, behavior_for};
pub use state::{BallState, HeatseekerInfo};
pub use world::{ContactRecorder, PhysicsWorld, RecordedContact};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use ballsim_core::consts::TICK_TIME;
    use ballsim_core::mutator::MutatorConfig;
    use glam::Vec3;

    use crate::ball::Ball;
    use crate::world::PhysicsWorld;

    /// Half-size of the test box arena floor along X.
    pub const ARENA_HALF_X: f32 = 4096.0;
    /// Y of the two back walls' inner faces.
    pub const ARENA_HALF_Y: f32 = 5120.0;
    pub const ARENA_HEIGHT: f32 = 2048.0;
    const WALL_THICKNESS: f32 = 200.0;

    /// A world holding a closed box: floor at z = 0 plus four walls.
    pub fn arena_world(mutators: &MutatorConfig) -> PhysicsWorld {
        let mut world = PhysicsWorld::new(mutators, TICK_TIME);
        let t = WALL_THICKNESS / 2.0;
        let half_h = ARENA_HEIGHT / 2.0;

        world.add_static_box(
            Vec3::new(ARENA_HALF_X + WALL_THICKNESS, ARENA_HALF_Y + WALL_THICKNESS, t),
            Vec3::new(0.0, 0.0, -t),
        );
        for sign in [-1.0, 1.0] {
            world.add_static_box(
                Vec3::new(ARENA_HALF_X, t, half_h),
                Vec3::new(0.0, sign * (ARENA_HALF_Y + t), half_h),
            );
            world.add_static_box(
                Vec3::new(t, ARENA_HALF_Y, half_h),
                Vec3::new(sign * (ARENA_HALF_X + t), 0.0, half_h),
            );
        }
        world
    }

    /// Drive `n` ticks in the fixed order: pre-tick, engine step, world
    /// contact hooks, post-tick stabilization. Car hits are not generated.
    pub fn run_ball_ticks(
        ball: &mut Ball,
        world: &mut PhysicsWorld,
        mutators: &MutatorConfig,
        n: usize,
        tick_time: f32,
    ) {
        for _ in 0..n {
            ball.pre_tick_update(&mut world.bodies, tick_time);
            world.step();
            for normal in world.take_world_contact_normals(ball.collider_handle()) {
                ball.on_world_collision(normal);
            }
            ball.finish_physics_tick(&mut world.bodies, mutators);
        }
    }
}
