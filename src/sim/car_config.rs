use crate::{
    consts::{self, car, chassis, wheel},
    error::{VehicleError, ensure_finite, ensure_non_negative, ensure_positive},
};
use glam::Vec2;

/// Construction geometry of a car
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarConfig {
    /// Full chassis width (NOT the half-size), meters
    pub width: f32,
    /// Full chassis length, meters
    pub length: f32,
    /// Initial heading, degrees counter-clockwise
    pub initial_angle_deg: f32,
    pub wheel_width: f32,
    pub wheel_diameter: f32,
    /// Right-hand front wheel mount point in chassis space
    ///
    /// NOTE: X should ALWAYS be positive. It is negated for the left wheel.
    pub front_wheel_offset: Vec2,
    /// Right-hand rear wheel mount point in chassis space, mirrored like `front_wheel_offset`
    pub rear_wheel_offset: Vec2,
}

impl Default for CarConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarConfig {
    pub const DEFAULT: Self = Self {
        width: chassis::WIDTH,
        length: chassis::LENGTH,
        initial_angle_deg: 0.0,
        wheel_width: wheel::WIDTH,
        wheel_diameter: wheel::DIAMETER,
        front_wheel_offset: wheel::FRONT_OFFSET,
        rear_wheel_offset: wheel::REAR_OFFSET,
    };

    #[must_use]
    pub const fn new(
        width: f32,
        length: f32,
        initial_angle_deg: f32,
        wheel_width: f32,
        wheel_diameter: f32,
    ) -> Self {
        Self {
            width,
            length,
            initial_angle_deg,
            wheel_width,
            wheel_diameter,
            ..Self::DEFAULT
        }
    }

    pub fn validate(&self) -> Result<(), VehicleError> {
        ensure_positive("width", self.width)?;
        ensure_positive("length", self.length)?;
        ensure_positive("wheel_width", self.wheel_width)?;
        ensure_positive("wheel_diameter", self.wheel_diameter)?;

        ensure_finite("initial_angle_deg", self.initial_angle_deg)?;

        // X is mirrored for the left wheels, so it has to be on the right-hand side
        ensure_positive("front_wheel_offset.x", self.front_wheel_offset.x)?;
        ensure_finite("front_wheel_offset.y", self.front_wheel_offset.y)?;
        ensure_positive("rear_wheel_offset.x", self.rear_wheel_offset.x)?;
        ensure_finite("rear_wheel_offset.y", self.rear_wheel_offset.y)
    }
}

/// Rigid-body tuning of the chassis and wheel bodies
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChassisConfig {
    /// Stands in for rolling friction
    pub linear_damping: f32,
    pub angular_damping: f32,
    /// Continuous collision for the chassis
    pub bullet: bool,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub wheel_density: f32,
}

impl Default for ChassisConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ChassisConfig {
    pub const DEFAULT: Self = Self {
        linear_damping: chassis::LINEAR_DAMPING,
        angular_damping: chassis::ANGULAR_DAMPING,
        bullet: true,
        density: chassis::DENSITY,
        friction: chassis::FRICTION,
        restitution: chassis::RESTITUTION,
        wheel_density: wheel::DENSITY,
    };

    pub fn validate(&self) -> Result<(), VehicleError> {
        ensure_non_negative("linear_damping", self.linear_damping)?;
        ensure_non_negative("angular_damping", self.angular_damping)?;
        ensure_positive("density", self.density)?;
        ensure_non_negative("friction", self.friction)?;
        ensure_non_negative("restitution", self.restitution)?;
        ensure_positive("wheel_density", self.wheel_density)
    }
}

/// Steering and drive tuning
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveConfig {
    pub max_steer_angle_deg: f32,
    /// Time to go from center to full lock, ms
    pub max_steer_time_ms: f32,
    /// km/h
    pub max_forward_speed: f32,
    /// km/h
    pub max_reverse_speed: f32,
    /// An idle car slower than this (km/h) is stopped outright
    pub min_speed: f32,
    pub engine_power: f32,
    pub reverse_force_scale: f32,
    pub brake_force_scale: f32,
    /// Converts engine velocity units to km/h
    pub engine_speed_to_kmh: f32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DriveConfig {
    pub const DEFAULT: Self = Self {
        max_steer_angle_deg: car::MAX_STEER_ANGLE_DEG,
        max_steer_time_ms: car::MAX_STEER_TIME_MS,
        max_forward_speed: car::MAX_FORWARD_SPEED,
        max_reverse_speed: car::MAX_REVERSE_SPEED,
        min_speed: car::MIN_SPEED,
        engine_power: car::ENGINE_POWER,
        reverse_force_scale: car::REVERSE_FORCE_SCALE,
        brake_force_scale: car::BRAKE_FORCE_SCALE,
        engine_speed_to_kmh: consts::ENGINE_SPEED_TO_KMH,
    };

    #[must_use]
    pub fn max_steer_angle(&self) -> f32 {
        self.max_steer_angle_deg.to_radians()
    }

    /// How far the wheels turn during a tick of `tick_duration_ms`
    #[must_use]
    pub fn steer_step(&self, tick_duration_ms: f32) -> f32 {
        self.max_steer_angle() / self.max_steer_time_ms * tick_duration_ms
    }

    pub fn validate(&self) -> Result<(), VehicleError> {
        ensure_positive("max_steer_angle_deg", self.max_steer_angle_deg)?;
        ensure_positive("max_steer_time_ms", self.max_steer_time_ms)?;
        ensure_non_negative("max_forward_speed", self.max_forward_speed)?;
        ensure_non_negative("max_reverse_speed", self.max_reverse_speed)?;
        ensure_non_negative("min_speed", self.min_speed)?;
        ensure_non_negative("engine_power", self.engine_power)?;
        ensure_non_negative("reverse_force_scale", self.reverse_force_scale)?;
        ensure_non_negative("brake_force_scale", self.brake_force_scale)?;
        ensure_positive("engine_speed_to_kmh", self.engine_speed_to_kmh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        CarConfig::DEFAULT.validate().unwrap();
        ChassisConfig::DEFAULT.validate().unwrap();
        DriveConfig::DEFAULT.validate().unwrap();
    }

    #[test]
    fn non_positive_dimensions_are_rejected() {
        let config = CarConfig::new(0.0, 4.0, 0.0, 0.4, 0.8);
        assert_eq!(
            config.validate(),
            Err(VehicleError::InvalidConfig {
                name: "width",
                value: 0.0
            })
        );

        let config = CarConfig::new(2.0, 4.0, 0.0, 0.4, -0.8);
        assert!(matches!(
            config.validate(),
            Err(VehicleError::InvalidConfig {
                name: "wheel_diameter",
                ..
            })
        ));

        let config = CarConfig::new(2.0, f32::NAN, 0.0, 0.4, 0.8);
        assert!(config.validate().is_err());
    }

    #[test]
    fn wheel_offsets_must_be_on_the_right_hand_side() {
        let config = CarConfig {
            front_wheel_offset: Vec2::new(-1.0, 1.2),
            ..CarConfig::DEFAULT
        };
        assert_eq!(
            config.validate(),
            Err(VehicleError::InvalidConfig {
                name: "front_wheel_offset.x",
                value: -1.0
            })
        );

        let config = CarConfig {
            rear_wheel_offset: Vec2::new(0.0, -1.2),
            ..CarConfig::DEFAULT
        };
        assert!(matches!(
            config.validate(),
            Err(VehicleError::InvalidConfig {
                name: "rear_wheel_offset.x",
                ..
            })
        ));

        let config = CarConfig {
            rear_wheel_offset: Vec2::new(1.0, f32::INFINITY),
            ..CarConfig::DEFAULT
        };
        assert_eq!(
            config.validate(),
            Err(VehicleError::InvalidConfig {
                name: "rear_wheel_offset.y",
                value: f32::INFINITY
            })
        );
    }

    #[test]
    fn steer_step_reaches_full_lock_in_max_steer_time() {
        let drive = DriveConfig::DEFAULT;
        let full = drive.steer_step(drive.max_steer_time_ms);
        assert!((full - 25f32.to_radians()).abs() < 1e-6);
        assert_eq!(drive.steer_step(0.0), 0.0);
    }
}
