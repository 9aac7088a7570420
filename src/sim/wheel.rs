use crate::{
    VehicleError,
    engine::{
        BodyDef, BodyHandle, BoxShape, FixtureDef, JointDef, JointHandle, PhysicsEngine,
        PrismaticJointDef, RevoluteJointDef,
    },
    math::rotate,
};
use glam::Vec2;

/// Position of a wheel on the car, also its index in [`Car::wheels`](super::Car::wheels)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelPos {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl WheelPos {
    pub const ALL: [Self; 4] = [
        Self::FrontLeft,
        Self::FrontRight,
        Self::RearLeft,
        Self::RearRight,
    ];

    #[must_use]
    pub const fn is_front(self) -> bool {
        matches!(self, Self::FrontLeft | Self::FrontRight)
    }

    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::FrontLeft | Self::RearLeft)
    }
}

/// One wheel body jointed to a chassis.
///
/// The wheel is a sensor: it never collides, it only carries the velocity the car
/// corrects every tick and the drive force the car applies.
///
/// A wheel owns its body and joint handles, so it can't be cloned:
///
/// ```compile_fail
/// use topdown_car::{create_vehicle, engine::World, sim::{Wheel, WheelPos}};
///
/// let mut world = World::default();
/// let car = create_vehicle(2.0, 4.0, 0.0, 0.4, 0.8, &mut world).unwrap();
/// let _twin: Wheel = car.wheel(WheelPos::FrontLeft).clone();
/// ```
#[derive(Debug)]
pub struct Wheel {
    body: BodyHandle,
    joint: JointHandle,
    chassis: BodyHandle,
    mount_offset: Vec2,
    revolving: bool,
}

impl Wheel {
    /// Creates the wheel body at the chassis-space `mount_offset` and joints it to `chassis`.
    ///
    /// Revolving wheels get a free-spinning revolute joint so they can be steered, fixed wheels
    /// get a prismatic joint with a zero translation range, which pins them to the chassis.
    pub fn new<E: PhysicsEngine>(
        engine: &mut E,
        chassis: BodyHandle,
        mount_offset: Vec2,
        wheel_width: f32,
        wheel_diameter: f32,
        density: f32,
        revolving: bool,
    ) -> Result<Self, VehicleError> {
        let fixture = FixtureDef {
            density,
            is_sensor: true,
            ..FixtureDef::DEFAULT
        };
        let mut def = BodyDef::new(BoxShape::new(wheel_width, wheel_diameter), fixture);
        def.position = engine.world_point(chassis, mount_offset);
        def.angle = engine.angle(chassis);

        let body = engine.create_body(&def)?;
        let anchor = engine.world_center(body);

        let joint_def = if revolving {
            let mut def = RevoluteJointDef::new(chassis, body, anchor);
            def.enable_motor = true;
            JointDef::Revolute(def)
        } else {
            let mut def = PrismaticJointDef::new(chassis, body, anchor, Vec2::X);
            def.enable_limit = true;
            def.lower_translation = 0.0;
            def.upper_translation = 0.0;
            JointDef::Prismatic(def)
        };

        let joint = match engine.create_joint(&joint_def) {
            Ok(joint) => joint,
            Err(err) => {
                // Don't leak a loose wheel body into the engine
                let _ = engine.destroy_body(body);
                return Err(err.into());
            }
        };

        Ok(Self {
            body,
            joint,
            chassis,
            mount_offset,
            revolving,
        })
    }

    #[must_use]
    pub const fn body(&self) -> BodyHandle {
        self.body
    }

    #[must_use]
    pub const fn joint(&self) -> JointHandle {
        self.joint
    }

    #[must_use]
    pub const fn chassis(&self) -> BodyHandle {
        self.chassis
    }

    #[must_use]
    pub const fn mount_offset(&self) -> Vec2 {
        self.mount_offset
    }

    #[must_use]
    pub const fn is_revolving(&self) -> bool {
        self.revolving
    }

    /// Unit vector the wheel rolls along, in world space.
    ///
    /// It points the way the chassis is moving at the mount point (backwards when reversing).
    pub fn rolling_axis<E: PhysicsEngine>(&self, engine: &E) -> Vec2 {
        let mount_vel = engine.linear_velocity_from_local_point(self.chassis, self.mount_offset);
        let local_vel = engine.local_vector(self.chassis, mount_vel);
        let forward = if local_vel.y > 0.0 { Vec2::Y } else { Vec2::NEG_Y };

        rotate(forward, engine.angle(self.body))
    }

    /// Drops the part of the wheel's velocity that isn't along its rolling axis
    pub fn eliminate_sideways_velocity<E: PhysicsEngine>(&self, engine: &mut E) {
        let axis = self.rolling_axis(engine);
        let speed_along = engine.linear_velocity(self.body).dot(axis);

        engine.set_linear_velocity(self.body, axis * speed_along);
    }

    /// Turns the wheel to `angle` radians off the chassis heading. Not clamped.
    pub fn set_steer_angle<E: PhysicsEngine>(&self, engine: &mut E, angle: f32) {
        let chassis_angle = engine.angle(self.chassis);
        engine.set_angle(self.body, chassis_angle + angle);
    }

    /// Applies a force given in the wheel's own frame at its center of mass
    pub fn apply_force<E: PhysicsEngine>(&self, engine: &mut E, local_force: Vec2) {
        let point = engine.world_center(self.body);
        let force = engine.world_vector(self.body, local_force);
        engine.apply_force(self.body, force, point);
    }

    /// Moves the wheel back onto its mount point, moving with the chassis
    pub(crate) fn snap_to_chassis<E: PhysicsEngine>(&self, engine: &mut E, steer_angle: f32) {
        let position = engine.world_point(self.chassis, self.mount_offset);
        let velocity = engine.linear_velocity_from_local_point(self.chassis, self.mount_offset);
        let angular_velocity = engine.angular_velocity(self.chassis);

        engine.set_position(self.body, position);
        engine.set_linear_velocity(self.body, velocity);
        engine.set_angular_velocity(self.body, angular_velocity);
        self.set_steer_angle(engine, if self.revolving { steer_angle } else { 0.0 });
    }

    /// Releases the joint, then the wheel body.
    ///
    /// The body is released even if the joint is already gone.
    pub fn destroy<E: PhysicsEngine>(self, engine: &mut E) -> Result<(), VehicleError> {
        let joint = engine.destroy_joint(self.joint);
        let body = engine.destroy_body(self.body);

        joint.and(body).map_err(VehicleError::from)
    }
}
