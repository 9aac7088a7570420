use super::{BodyHandle, RigidBody};
use crate::{
    consts::world::{LINEAR_SLOP, MAX_LINEAR_CORRECTION},
    math::{cross, cross_sv, rotate, solve22, unrotate},
};
use glam::{Mat2, Vec2};

/// Pins two bodies together at a world anchor, leaving relative rotation free
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevoluteJointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    /// World point, captured in both bodies' frames at creation
    pub anchor: Vec2,
    pub enable_motor: bool,
    /// rad/s
    pub motor_speed: f32,
    /// A motor with no torque spins freely
    pub max_motor_torque: f32,
}

impl RevoluteJointDef {
    #[must_use]
    pub const fn new(body_a: BodyHandle, body_b: BodyHandle, anchor: Vec2) -> Self {
        Self {
            body_a,
            body_b,
            anchor,
            enable_motor: false,
            motor_speed: 0.0,
            max_motor_torque: 0.0,
        }
    }
}

/// Lets `body_b` slide along `axis` relative to `body_a`, with relative rotation locked
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrismaticJointDef {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub anchor: Vec2,
    /// World axis, captured in `body_a`'s frame at creation
    pub axis: Vec2,
    pub enable_limit: bool,
    pub lower_translation: f32,
    pub upper_translation: f32,
}

impl PrismaticJointDef {
    #[must_use]
    pub const fn new(body_a: BodyHandle, body_b: BodyHandle, anchor: Vec2, axis: Vec2) -> Self {
        Self {
            body_a,
            body_b,
            anchor,
            axis,
            enable_limit: false,
            lower_translation: 0.0,
            upper_translation: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JointDef {
    Revolute(RevoluteJointDef),
    Prismatic(PrismaticJointDef),
}

impl JointDef {
    #[must_use]
    pub const fn bodies(&self) -> (BodyHandle, BodyHandle) {
        match self {
            Self::Revolute(def) => (def.body_a, def.body_b),
            Self::Prismatic(def) => (def.body_a, def.body_b),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Motor {
    speed: f32,
    max_torque: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LimitState {
    Inactive,
    AtLower,
    AtUpper,
    Locked,
}

#[derive(Clone, Copy, Debug)]
enum JointKind {
    Revolute {
        motor: Option<Motor>,
        motor_impulse: f32,
    },
    Prismatic {
        local_axis_a: Vec2,
        limit: Option<(f32, f32)>,
        limit_state: LimitState,
        axial_impulse: f32,
    },
}

#[derive(Clone, Debug)]
pub(crate) struct Joint {
    pub(crate) body_a: BodyHandle,
    pub(crate) body_b: BodyHandle,
    local_anchor_a: Vec2,
    local_anchor_b: Vec2,
    reference_angle: f32,
    kind: JointKind,
}

impl Joint {
    pub(crate) fn new(def: &JointDef, a: &RigidBody, b: &RigidBody) -> Self {
        let (body_a, body_b) = def.bodies();
        let anchor = match def {
            JointDef::Revolute(def) => def.anchor,
            JointDef::Prismatic(def) => def.anchor,
        };

        let kind = match def {
            JointDef::Revolute(def) => JointKind::Revolute {
                motor: def.enable_motor.then_some(Motor {
                    speed: def.motor_speed,
                    max_torque: def.max_motor_torque.max(0.0),
                }),
                motor_impulse: 0.0,
            },
            JointDef::Prismatic(def) => JointKind::Prismatic {
                local_axis_a: unrotate(def.axis.normalize_or_zero(), a.angle),
                limit: def.enable_limit.then(|| {
                    (
                        def.lower_translation.min(def.upper_translation),
                        def.lower_translation.max(def.upper_translation),
                    )
                }),
                limit_state: LimitState::Inactive,
                axial_impulse: 0.0,
            },
        };

        Self {
            body_a,
            body_b,
            local_anchor_a: unrotate(anchor - a.world_center(), a.angle),
            local_anchor_b: unrotate(anchor - b.world_center(), b.angle),
            reference_angle: b.angle - a.angle,
            kind,
        }
    }

    fn anchors(&self, a: &RigidBody, b: &RigidBody) -> (Vec2, Vec2) {
        (
            rotate(self.local_anchor_a, a.angle),
            rotate(self.local_anchor_b, b.angle),
        )
    }

    /// Resets accumulated impulses and evaluates limits for the coming step
    pub(crate) fn prepare(&mut self, a: &RigidBody, b: &RigidBody) {
        let (r_a, r_b) = self.anchors(a, b);

        match &mut self.kind {
            JointKind::Revolute { motor_impulse, .. } => *motor_impulse = 0.0,
            JointKind::Prismatic {
                local_axis_a,
                limit,
                limit_state,
                axial_impulse,
            } => {
                *axial_impulse = 0.0;
                *limit_state = match *limit {
                    None => LimitState::Inactive,
                    Some((lower, upper)) if upper - lower < 2.0 * LINEAR_SLOP => LimitState::Locked,
                    Some((lower, upper)) => {
                        let axis = rotate(*local_axis_a, a.angle);
                        let d = b.position + r_b - a.position - r_a;
                        let translation = axis.dot(d);

                        if translation <= lower {
                            LimitState::AtLower
                        } else if translation >= upper {
                            LimitState::AtUpper
                        } else {
                            LimitState::Inactive
                        }
                    }
                };
            }
        }
    }

    pub(crate) fn solve_velocity(&mut self, a: &mut RigidBody, b: &mut RigidBody, time_step: f32) {
        let (r_a, r_b) = self.anchors(a, b);

        match &mut self.kind {
            JointKind::Revolute {
                motor,
                motor_impulse,
            } => {
                if let Some(motor) = motor {
                    let k = a.inverse_inertia + b.inverse_inertia;
                    if k > 0.0 {
                        let cdot = b.angular_velocity - a.angular_velocity - motor.speed;
                        let max_impulse = motor.max_torque * time_step;
                        let old_impulse = *motor_impulse;
                        *motor_impulse = (old_impulse - cdot / k).clamp(-max_impulse, max_impulse);
                        apply_angular_impulse(a, b, *motor_impulse - old_impulse);
                    }
                }

                let cdot = relative_velocity(a, b, r_a, r_b);
                let impulse = solve22(point_mass(a, b, r_a, r_b), -cdot);
                apply_impulse(a, b, r_a, r_b, impulse);
            }
            JointKind::Prismatic {
                local_axis_a,
                limit_state,
                axial_impulse,
                ..
            } => {
                let k = a.inverse_inertia + b.inverse_inertia;
                if k > 0.0 {
                    let cdot = b.angular_velocity - a.angular_velocity;
                    apply_angular_impulse(a, b, -cdot / k);
                }

                let axis = rotate(*local_axis_a, a.angle);
                let perp = cross_sv(1.0, axis);
                solve_axis(a, b, r_a, r_b, perp);

                let (lower, upper) = match *limit_state {
                    LimitState::Inactive => return,
                    LimitState::Locked => (f32::NEG_INFINITY, f32::INFINITY),
                    LimitState::AtLower => (0.0, f32::INFINITY),
                    LimitState::AtUpper => (f32::NEG_INFINITY, 0.0),
                };

                let k = axis_mass(a, b, r_a, r_b, axis);
                if k > 0.0 {
                    let cdot = axis.dot(relative_velocity(a, b, r_a, r_b));
                    let old_impulse = *axial_impulse;
                    *axial_impulse = (old_impulse - cdot / k).clamp(lower, upper);
                    apply_impulse(a, b, r_a, r_b, axis * (*axial_impulse - old_impulse));
                }
            }
        }
    }

    /// Returns the remaining linear error
    pub(crate) fn solve_position(&self, a: &mut RigidBody, b: &mut RigidBody) -> f32 {
        match self.kind {
            JointKind::Revolute { .. } => {
                let (r_a, r_b) = self.anchors(a, b);
                let c = b.position + r_b - a.position - r_a;
                let impulse = -solve22(point_mass(a, b, r_a, r_b), c);
                apply_position_impulse(a, b, r_a, r_b, impulse);

                c.length()
            }
            JointKind::Prismatic {
                local_axis_a,
                limit,
                ..
            } => {
                let k = a.inverse_inertia + b.inverse_inertia;
                if k > 0.0 {
                    let c = b.angle - a.angle - self.reference_angle;
                    let impulse = -c / k;
                    a.angle -= a.inverse_inertia * impulse;
                    b.angle += b.inverse_inertia * impulse;
                }

                let (r_a, r_b) = self.anchors(a, b);
                let axis = rotate(local_axis_a, a.angle);
                let perp = cross_sv(1.0, axis);
                let d = b.position + r_b - a.position - r_a;

                let perp_error = perp.dot(d);
                let translation = axis.dot(d);
                let axial_error = limit.map_or(0.0, |(lower, upper)| {
                    translation - translation.clamp(lower, upper)
                });

                for (n, error) in [(perp, perp_error), (axis, axial_error)] {
                    let k = axis_mass(a, b, r_a, r_b, n);
                    if error != 0.0 && k > 0.0 {
                        let c = error.clamp(-MAX_LINEAR_CORRECTION, MAX_LINEAR_CORRECTION);
                        apply_position_impulse(a, b, r_a, r_b, n * (-c / k));
                    }
                }

                perp_error.abs().max(axial_error.abs())
            }
        }
    }
}

fn relative_velocity(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2) -> Vec2 {
    b.linear_velocity + cross_sv(b.angular_velocity, r_b)
        - a.linear_velocity
        - cross_sv(a.angular_velocity, r_a)
}

fn point_mass(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2) -> Mat2 {
    let (m_a, m_b) = (a.inverse_mass, b.inverse_mass);
    let (i_a, i_b) = (a.inverse_inertia, b.inverse_inertia);

    let k11 = m_a + m_b + r_a.y * r_a.y * i_a + r_b.y * r_b.y * i_b;
    let k12 = -r_a.y * r_a.x * i_a - r_b.y * r_b.x * i_b;
    let k22 = m_a + m_b + r_a.x * r_a.x * i_a + r_b.x * r_b.x * i_b;

    Mat2::from_cols(Vec2::new(k11, k12), Vec2::new(k12, k22))
}

fn axis_mass(a: &RigidBody, b: &RigidBody, r_a: Vec2, r_b: Vec2, n: Vec2) -> f32 {
    let rn_a = cross(r_a, n);
    let rn_b = cross(r_b, n);

    a.inverse_mass
        + b.inverse_mass
        + a.inverse_inertia * rn_a * rn_a
        + b.inverse_inertia * rn_b * rn_b
}

/// Removes the relative velocity along `n` at the anchors
fn solve_axis(a: &mut RigidBody, b: &mut RigidBody, r_a: Vec2, r_b: Vec2, n: Vec2) {
    let k = axis_mass(a, b, r_a, r_b, n);
    if k > 0.0 {
        let cdot = n.dot(relative_velocity(a, b, r_a, r_b));
        apply_impulse(a, b, r_a, r_b, n * (-cdot / k));
    }
}

fn apply_impulse(a: &mut RigidBody, b: &mut RigidBody, r_a: Vec2, r_b: Vec2, impulse: Vec2) {
    a.linear_velocity -= a.inverse_mass * impulse;
    a.angular_velocity -= a.inverse_inertia * cross(r_a, impulse);
    b.linear_velocity += b.inverse_mass * impulse;
    b.angular_velocity += b.inverse_inertia * cross(r_b, impulse);
}

fn apply_angular_impulse(a: &mut RigidBody, b: &mut RigidBody, impulse: f32) {
    a.angular_velocity -= a.inverse_inertia * impulse;
    b.angular_velocity += b.inverse_inertia * impulse;
}

fn apply_position_impulse(
    a: &mut RigidBody,
    b: &mut RigidBody,
    r_a: Vec2,
    r_b: Vec2,
    impulse: Vec2,
) {
    a.position -= a.inverse_mass * impulse;
    a.angle -= a.inverse_inertia * cross(r_a, impulse);
    b.position += b.inverse_mass * impulse;
    b.angle += b.inverse_inertia * cross(r_b, impulse);
}
