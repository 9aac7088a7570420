use super::{
    BodyDef, BodyHandle, EngineError, JointDef, JointHandle, PhysicsEngine, RigidBody, joint::Joint,
};
use crate::consts::world::{LINEAR_SLOP, POSITION_ITERATIONS, VELOCITY_ITERATIONS};
use glam::Vec2;

/// A small 2D rigid-body world: force integration, damping and joint constraints.
///
/// Contacts are not simulated. Handles are never reused, so a stale handle can't alias a
/// newer body.
#[derive(Clone, Debug)]
pub struct World {
    bodies: Vec<Option<RigidBody>>,
    joints: Vec<Option<Joint>>,
    gravity: Vec2,
    velocity_iterations: usize,
    position_iterations: usize,
}

impl Default for World {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl World {
    #[must_use]
    pub const fn new(gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            joints: Vec::new(),
            gravity,
            velocity_iterations: VELOCITY_ITERATIONS,
            position_iterations: POSITION_ITERATIONS,
        }
    }

    #[must_use]
    pub const fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub const fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub const fn set_iterations(&mut self, velocity_iterations: usize, position_iterations: usize) {
        self.velocity_iterations = velocity_iterations;
        self.position_iterations = position_iterations;
    }

    #[must_use]
    pub fn body(&self, body: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(body.0).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.iter().flatten().count()
    }

    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.iter().flatten().count()
    }

    #[must_use]
    pub fn has_joint(&self, joint: JointHandle) -> bool {
        matches!(self.joints.get(joint.0), Some(Some(_)))
    }

    fn rb(&self, body: BodyHandle) -> &RigidBody {
        match self.body(body) {
            Some(rb) => rb,
            None => panic!("World: {body:?} does not exist"),
        }
    }

    fn rb_mut(&mut self, body: BodyHandle) -> &mut RigidBody {
        match self.bodies.get_mut(body.0).and_then(Option::as_mut) {
            Some(rb) => rb,
            None => panic!("World: {body:?} does not exist"),
        }
    }

    /// Advances the simulation by `time_step` seconds and clears accumulated forces.
    ///
    /// A non-positive step only clears forces.
    pub fn step(&mut self, time_step: f32) {
        if time_step > 0.0 {
            for rb in self.bodies.iter_mut().flatten() {
                rb.integrate_velocities(self.gravity, time_step);
            }

            for joint in self.joints.iter_mut().flatten() {
                if let Some((a, b)) = pair_mut(&mut self.bodies, joint.body_a, joint.body_b) {
                    joint.prepare(a, b);
                }
            }

            for _ in 0..self.velocity_iterations {
                for joint in self.joints.iter_mut().flatten() {
                    if let Some((a, b)) = pair_mut(&mut self.bodies, joint.body_a, joint.body_b) {
                        joint.solve_velocity(a, b, time_step);
                    }
                }
            }

            for rb in self.bodies.iter_mut().flatten() {
                rb.integrate_transform(time_step);
            }

            for _ in 0..self.position_iterations {
                let mut max_error = 0.0f32;
                for joint in self.joints.iter().flatten() {
                    if let Some((a, b)) = pair_mut(&mut self.bodies, joint.body_a, joint.body_b) {
                        max_error = max_error.max(joint.solve_position(a, b));
                    }
                }

                if max_error <= LINEAR_SLOP {
                    break;
                }
            }
        }

        for rb in self.bodies.iter_mut().flatten() {
            rb.clear_forces();
        }
    }
}

/// Borrows two distinct live bodies at once
fn pair_mut(
    bodies: &mut [Option<RigidBody>],
    a: BodyHandle,
    b: BodyHandle,
) -> Option<(&mut RigidBody, &mut RigidBody)> {
    let (ia, ib) = (a.0, b.0);
    if ia == ib || ia.max(ib) >= bodies.len() {
        return None;
    }

    let (lo, hi) = (ia.min(ib), ia.max(ib));
    let (left, right) = bodies.split_at_mut(hi);
    let lo_rb = left[lo].as_mut()?;
    let hi_rb = right[0].as_mut()?;

    if ia < ib {
        Some((lo_rb, hi_rb))
    } else {
        Some((hi_rb, lo_rb))
    }
}

impl PhysicsEngine for World {
    fn create_body(&mut self, def: &BodyDef) -> Result<BodyHandle, EngineError> {
        let rb = RigidBody::new(def)?;
        self.bodies.push(Some(rb));

        Ok(BodyHandle(self.bodies.len() - 1))
    }

    fn destroy_body(&mut self, body: BodyHandle) -> Result<(), EngineError> {
        let slot = self
            .bodies
            .get_mut(body.0)
            .ok_or(EngineError::UnknownBody(body))?;
        if slot.take().is_none() {
            return Err(EngineError::UnknownBody(body));
        }

        for slot in &mut self.joints {
            if slot
                .as_ref()
                .is_some_and(|joint| joint.body_a == body || joint.body_b == body)
            {
                *slot = None;
            }
        }

        Ok(())
    }

    fn create_joint(&mut self, def: &JointDef) -> Result<JointHandle, EngineError> {
        let (body_a, body_b) = def.bodies();
        if body_a == body_b {
            return Err(EngineError::SelfJoint(body_a));
        }

        if let JointDef::Prismatic(prismatic) = def {
            let axis = prismatic.axis;
            if !axis.is_finite() || axis.length_squared() == 0.0 {
                return Err(EngineError::InvalidJointAxis(axis));
            }
        }

        let a = self.body(body_a).ok_or(EngineError::UnknownBody(body_a))?;
        let b = self.body(body_b).ok_or(EngineError::UnknownBody(body_b))?;
        let joint = Joint::new(def, a, b);
        self.joints.push(Some(joint));

        Ok(JointHandle(self.joints.len() - 1))
    }

    fn destroy_joint(&mut self, joint: JointHandle) -> Result<(), EngineError> {
        match self.joints.get_mut(joint.0) {
            Some(slot) if slot.is_some() => {
                *slot = None;
                Ok(())
            }
            _ => Err(EngineError::UnknownJoint(joint)),
        }
    }

    fn position(&self, body: BodyHandle) -> Vec2 {
        self.rb(body).position
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec2) {
        self.rb_mut(body).position = position;
    }

    fn angle(&self, body: BodyHandle) -> f32 {
        self.rb(body).angle
    }

    fn set_angle(&mut self, body: BodyHandle, angle: f32) {
        self.rb_mut(body).angle = angle;
    }

    fn linear_velocity(&self, body: BodyHandle) -> Vec2 {
        self.rb(body).linear_velocity
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2) {
        debug_assert!(velocity.is_finite());
        self.rb_mut(body).linear_velocity = velocity;
    }

    fn angular_velocity(&self, body: BodyHandle) -> f32 {
        self.rb(body).angular_velocity
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, velocity: f32) {
        self.rb_mut(body).angular_velocity = velocity;
    }

    fn world_center(&self, body: BodyHandle) -> Vec2 {
        self.rb(body).world_center()
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec2, point: Vec2) {
        self.rb_mut(body).apply_force(force, point);
    }
}
