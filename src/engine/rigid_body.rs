use super::EngineError;
use crate::math::cross;
use glam::Vec2;

/// Axis-aligned box centered on the body origin
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoxShape {
    pub half_extents: Vec2,
}

impl BoxShape {
    /// `width` and `height` are the FULL size, not the half-size
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            half_extents: Vec2::new(width * 0.5, height * 0.5),
        }
    }

    #[must_use]
    pub fn area(&self) -> f32 {
        4.0 * self.half_extents.x * self.half_extents.y
    }

    /// Rotational inertia about the center for the given mass
    #[must_use]
    pub fn inertia(&self, mass: f32) -> f32 {
        mass * self.half_extents.length_squared() / 3.0
    }

    fn validate(&self) -> Result<(), EngineError> {
        let he = self.half_extents;
        if he.is_finite() && he.x > 0.0 && he.y > 0.0 {
            Ok(())
        } else {
            Err(EngineError::InvalidShape(he))
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixtureDef {
    /// kg/m^2, zero makes the body static
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Sensors have mass but never take part in collision response
    pub is_sensor: bool,
}

impl Default for FixtureDef {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl FixtureDef {
    pub const DEFAULT: Self = Self {
        density: 1.0,
        friction: 0.2,
        restitution: 0.0,
        is_sensor: false,
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyDef {
    pub position: Vec2,
    /// Radians
    pub angle: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Continuous collision against other dynamic bodies (prevents tunneling)
    pub bullet: bool,
    pub shape: BoxShape,
    pub fixture: FixtureDef,
}

impl BodyDef {
    #[must_use]
    pub const fn new(shape: BoxShape, fixture: FixtureDef) -> Self {
        Self {
            position: Vec2::ZERO,
            angle: 0.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
            bullet: false,
            shape,
            fixture,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RigidBody {
    pub(crate) position: Vec2,
    pub(crate) angle: f32,
    pub(crate) linear_velocity: Vec2,
    pub(crate) angular_velocity: f32,
    pub(crate) total_force: Vec2,
    pub(crate) total_torque: f32,
    pub(crate) inverse_mass: f32,
    pub(crate) inverse_inertia: f32,
    pub(crate) linear_damping: f32,
    pub(crate) angular_damping: f32,
    bullet: bool,
    shape: BoxShape,
    fixture: FixtureDef,
}

impl RigidBody {
    pub(crate) fn new(def: &BodyDef) -> Result<Self, EngineError> {
        def.shape.validate()?;

        let density = def.fixture.density;
        if !density.is_finite() || density < 0.0 {
            return Err(EngineError::InvalidFixture(density));
        }

        let mass = density * def.shape.area();
        let (inverse_mass, inverse_inertia) = if mass == 0.0 {
            (0.0, 0.0)
        } else {
            (1.0 / mass, 1.0 / def.shape.inertia(mass))
        };

        Ok(Self {
            position: def.position,
            angle: def.angle,
            linear_velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            total_force: Vec2::ZERO,
            total_torque: 0.0,
            inverse_mass,
            inverse_inertia,
            linear_damping: def.linear_damping.max(0.0),
            angular_damping: def.angular_damping.max(0.0),
            bullet: def.bullet,
            shape: def.shape,
            fixture: def.fixture,
        })
    }

    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    #[must_use]
    pub const fn linear_velocity(&self) -> Vec2 {
        self.linear_velocity
    }

    #[must_use]
    pub const fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    /// Force accumulated since the last step
    #[must_use]
    pub const fn total_force(&self) -> Vec2 {
        self.total_force
    }

    #[must_use]
    pub const fn total_torque(&self) -> f32 {
        self.total_torque
    }

    #[must_use]
    pub fn mass(&self) -> f32 {
        if self.inverse_mass == 0.0 {
            0.0
        } else {
            1.0 / self.inverse_mass
        }
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.inverse_mass == 0.0
    }

    #[must_use]
    pub const fn is_bullet(&self) -> bool {
        self.bullet
    }

    #[must_use]
    pub const fn is_sensor(&self) -> bool {
        self.fixture.is_sensor
    }

    #[must_use]
    pub const fn shape(&self) -> &BoxShape {
        &self.shape
    }

    #[must_use]
    pub const fn fixture(&self) -> &FixtureDef {
        &self.fixture
    }

    /// The box is centered on the body origin, so the center of mass is the position
    #[must_use]
    pub const fn world_center(&self) -> Vec2 {
        self.position
    }

    pub fn apply_force(&mut self, force: Vec2, point: Vec2) {
        debug_assert!(force.is_finite());
        if self.is_static() {
            return;
        }

        self.total_force += force;
        self.total_torque += cross(point - self.world_center(), force);
    }

    pub(crate) fn integrate_velocities(&mut self, gravity: Vec2, time_step: f32) {
        if self.is_static() {
            return;
        }

        self.linear_velocity += time_step * (gravity + self.inverse_mass * self.total_force);
        self.angular_velocity += time_step * self.inverse_inertia * self.total_torque;

        self.linear_velocity *= 1.0 / time_step.mul_add(self.linear_damping, 1.0);
        self.angular_velocity *= 1.0 / time_step.mul_add(self.angular_damping, 1.0);
    }

    pub(crate) fn integrate_transform(&mut self, time_step: f32) {
        if self.is_static() {
            return;
        }

        self.position += self.linear_velocity * time_step;
        self.angle += self.angular_velocity * time_step;
    }

    pub(crate) const fn clear_forces(&mut self) {
        self.total_force = Vec2::ZERO;
        self.total_torque = 0.0;
    }
}
