//! The rigid-body engine seam.
//!
//! Vehicles only ever hold [`BodyHandle`]s and [`JointHandle`]s and talk to the engine through
//! [`PhysicsEngine`], so they can be driven by any 2D engine that exposes this surface.
//! [`World`] is the engine bundled with this crate.

mod joint;
mod rigid_body;
mod world;

pub use joint::{JointDef, PrismaticJointDef, RevoluteJointDef};
pub use rigid_body::{BodyDef, BoxShape, FixtureDef, RigidBody};
pub use world::World;

use crate::math::{cross_sv, rotate, unrotate};
use glam::Vec2;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyHandle(pub(crate) usize);

impl BodyHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointHandle(pub(crate) usize);

impl JointHandle {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EngineError {
    #[error("body {0:?} does not exist")]
    UnknownBody(BodyHandle),

    #[error("joint {0:?} does not exist")]
    UnknownJoint(JointHandle),

    #[error("box shape needs positive, finite half extents (got {0})")]
    InvalidShape(Vec2),

    #[error("fixture density must be finite and non-negative (got {0})")]
    InvalidFixture(f32),

    #[error("cannot join body {0:?} to itself")]
    SelfJoint(BodyHandle),

    #[error("prismatic joint axis must be non-zero (got {0})")]
    InvalidJointAxis(Vec2),
}

/// Minimal capability surface a vehicle needs from a 2D rigid-body engine.
///
/// Queries on a handle the engine no longer knows about are a logic error and may panic.
pub trait PhysicsEngine {
    fn create_body(&mut self, def: &BodyDef) -> Result<BodyHandle, EngineError>;
    fn destroy_body(&mut self, body: BodyHandle) -> Result<(), EngineError>;

    fn create_joint(&mut self, def: &JointDef) -> Result<JointHandle, EngineError>;
    fn destroy_joint(&mut self, joint: JointHandle) -> Result<(), EngineError>;

    fn position(&self, body: BodyHandle) -> Vec2;
    fn set_position(&mut self, body: BodyHandle, position: Vec2);

    /// World angle in radians
    fn angle(&self, body: BodyHandle) -> f32;
    fn set_angle(&mut self, body: BodyHandle, angle: f32);

    fn linear_velocity(&self, body: BodyHandle) -> Vec2;
    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2);

    fn angular_velocity(&self, body: BodyHandle) -> f32;
    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: f32);

    fn world_center(&self, body: BodyHandle) -> Vec2;

    /// Accumulates `force` at the world point `point` until the next engine step
    fn apply_force(&mut self, body: BodyHandle, force: Vec2, point: Vec2);

    fn world_point(&self, body: BodyHandle, local_point: Vec2) -> Vec2 {
        self.position(body) + rotate(local_point, self.angle(body))
    }

    fn world_vector(&self, body: BodyHandle, local_vector: Vec2) -> Vec2 {
        rotate(local_vector, self.angle(body))
    }

    fn local_vector(&self, body: BodyHandle, world_vector: Vec2) -> Vec2 {
        unrotate(world_vector, self.angle(body))
    }

    fn linear_velocity_from_world_point(&self, body: BodyHandle, world_point: Vec2) -> Vec2 {
        self.linear_velocity(body)
            + cross_sv(
                self.angular_velocity(body),
                world_point - self.world_center(body),
            )
    }

    fn linear_velocity_from_local_point(&self, body: BodyHandle, local_point: Vec2) -> Vec2 {
        self.linear_velocity_from_world_point(body, self.world_point(body, local_point))
    }
}
