//! Thin owner of the rapier sets and pipeline the ball registers with.

use std::sync::{Mutex, PoisonError};

use ballsim_core::game_mode::UserInfoType;
use ballsim_core::mutator::MutatorConfig;
use ballsim_core::units::uu_to_engine;
use glam::Vec3;
use rapier3d::prelude::*;

pub(crate) fn to_na(v: Vec3) -> Vector<Real> {
    vector![v.x, v.y, v.z]
}

pub(crate) fn from_na(v: &Vector<Real>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

/// A contact reported during a step by a collider that asked for
/// [`ActiveHooks::MODIFY_SOLVER_CONTACTS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedContact {
    pub collider1: ColliderHandle,
    pub collider2: ColliderHandle,
    /// Contact normal pointing from `collider1` toward `collider2`.
    pub normal: Vec3,
}

/// Physics hooks that log every solver contact of hooked colliders while
/// the pipeline steps. Drained by the dispatcher after the step.
#[derive(Debug, Default)]
pub struct ContactRecorder {
    contacts: Mutex<Vec<RecordedContact>>,
}

impl ContactRecorder {
    /// Take every contact recorded since the last drain.
    pub fn drain(&self) -> Vec<RecordedContact> {
        let mut contacts = self.contacts.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *contacts)
    }
}

impl PhysicsHooks for ContactRecorder {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        if context.solver_contacts.is_empty() {
            return;
        }
        let contact = RecordedContact {
            collider1: context.collider1,
            collider2: context.collider2,
            normal: from_na(&*context.normal),
        };
        self.contacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(contact);
    }
}

/// Engine-side dynamics world. Everything stored here is in engine units.
pub struct PhysicsWorld {
    pub gravity: Vector<Real>,
    pub integration_parameters: IntegrationParameters,
    pub pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    pub impulse_joints: ImpulseJointSet,
    pub multibody_joints: MultibodyJointSet,
    pub ccd_solver: CCDSolver,
    pub contact_recorder: ContactRecorder,
}

impl PhysicsWorld {
    /// World with the mutators' gravity stepping `tick_time` seconds per step.
    pub fn new(mutators: &MutatorConfig, tick_time: f32) -> Self {
        let integration_parameters = IntegrationParameters {
            dt: tick_time,
            ..IntegrationParameters::default()
        };
        Self {
            gravity: to_na(uu_to_engine(mutators.gravity)),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            contact_recorder: ContactRecorder::default(),
        }
    }

    /// Integrate, detect and resolve one step. Contacts of hooked colliders
    /// are recorded in [`PhysicsWorld::contact_recorder`].
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &self.contact_recorder,
            &(),
        );
    }

    /// Register a body together with its single collider.
    pub fn add_body(
        &mut self,
        body: RigidBody,
        collider: Collider,
    ) -> (RigidBodyHandle, ColliderHandle) {
        let body_handle = self.bodies.insert(body);
        let collider_handle =
            self.colliders.insert_with_parent(collider, body_handle, &mut self.bodies);
        (body_handle, collider_handle)
    }

    /// Deregister a body and everything attached to it.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Add a fixed box of world geometry. Sizes and position are in UU.
    pub fn add_static_box(&mut self, half_extents: Vec3, center: Vec3) -> ColliderHandle {
        let he = uu_to_engine(half_extents);
        let collider = ColliderBuilder::cuboid(he.x, he.y, he.z)
            .translation(to_na(uu_to_engine(center)))
            .user_data(UserInfoType::World.user_data())
            .build();
        self.colliders.insert(collider)
    }

    /// Drain the contacts recorded during the last step and return the
    /// world-geometry ones involving `ball`, as surface normals pointing
    /// toward the ball.
    pub fn take_world_contact_normals(&self, ball: ColliderHandle) -> Vec<Vec3> {
        let mut normals = Vec::new();
        for contact in self.contact_recorder.drain() {
            let (other, ball_is_first) = if contact.collider1 == ball {
                (contact.collider2, true)
            } else if contact.collider2 == ball {
                (contact.collider1, false)
            } else {
                continue;
            };
            let is_world = self
                .colliders
                .get(other)
                .is_some_and(|c| UserInfoType::from_user_data(c.user_data) == UserInfoType::World);
            if is_world {
                normals.push(if ball_is_first { -contact.normal } else { contact.normal });
            }
        }
        normals
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_bridge_roundtrips() {
        let v = Vec3::new(1.5, -2.0, 3.25);
        assert_eq!(from_na(&to_na(v)), v);
    }

    #[test]
    fn gravity_is_in_engine_units() {
        let world = PhysicsWorld::new(&MutatorConfig::default(), 1.0 / 120.0);
        assert!((world.gravity.z - (-13.0)).abs() < 1e-4);
        assert!((world.integration_parameters.dt - 1.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn static_box_is_tagged_world() {
        let mut world = PhysicsWorld::new(&MutatorConfig::default(), 1.0 / 120.0);
        let h = world.add_static_box(Vec3::new(100.0, 100.0, 10.0), Vec3::ZERO);
        assert_eq!(
            UserInfoType::from_user_data(world.colliders[h].user_data),
            UserInfoType::World
        );
    }

    fn resting_ball(world: &mut PhysicsWorld, hooked: bool) -> ColliderHandle {
        let body = RigidBodyBuilder::dynamic().translation(vector![0.0, 0.0, 1.8]).build();
        let mut collider = ColliderBuilder::ball(1.825).user_data(UserInfoType::Ball.user_data());
        if hooked {
            collider = collider.active_hooks(ActiveHooks::MODIFY_SOLVER_CONTACTS);
        }
        world.add_body(body, collider.build()).1
    }

    #[test]
    fn hooked_ball_reports_floor_contact() {
        let mut world = PhysicsWorld::new(&MutatorConfig::default(), 1.0 / 120.0);
        world.add_static_box(Vec3::new(1000.0, 1000.0, 50.0), Vec3::new(0.0, 0.0, -50.0));
        let ball = resting_ball(&mut world, true);

        world.step();
        let normals = world.take_world_contact_normals(ball);
        assert!(!normals.is_empty(), "floor contact should be recorded during the step");
        for n in &normals {
            assert!(n.z > 0.9, "normal should point up toward the ball, got {n:?}");
        }

        // Drained: nothing left until the next step.
        assert!(world.take_world_contact_normals(ball).is_empty());
    }

    #[test]
    fn unhooked_collider_records_nothing() {
        let mut world = PhysicsWorld::new(&MutatorConfig::default(), 1.0 / 120.0);
        world.add_static_box(Vec3::new(1000.0, 1000.0, 50.0), Vec3::new(0.0, 0.0, -50.0));
        let ball = resting_ball(&mut world, false);

        world.step();
        assert!(world.take_world_contact_normals(ball).is_empty());
    }
}
