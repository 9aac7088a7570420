use super::{
    Acceleration, CarConfig, CarControls, CarState, ChassisConfig, DriveConfig, SteerDirection,
    Wheel, WheelPos,
};
use crate::{
    VehicleError,
    engine::{BodyDef, BodyHandle, BoxShape, FixtureDef, PhysicsEngine},
};
use arrayvec::ArrayVec;
use glam::Vec2;
use log::{debug, trace, warn};

/// A four-wheeled, front-wheel-drive, front-steered car.
///
/// The car only holds engine handles: every operation takes the engine it was created in.
/// It owns those handles, so it can't be cloned:
///
/// ```compile_fail
/// use topdown_car::{Car, create_vehicle, engine::World};
///
/// let mut world = World::default();
/// let car = create_vehicle(2.0, 4.0, 0.0, 0.4, 0.8, &mut world).unwrap();
/// let _twin: Car = car.clone();
/// ```
#[derive(Debug)]
pub struct Car {
    body: BodyHandle,
    wheels: [Wheel; 4],
    config: CarConfig,
    chassis_config: ChassisConfig,
    drive: DriveConfig,
    /// Radians, shared by both front wheels
    steer_angle: f32,
    /// km/h, measured at the start of the last update
    measured_speed: f32,
    drive_force: Vec2,
}

/// Creates a car with the default chassis and drive tuning
pub fn create_vehicle<E: PhysicsEngine>(
    width: f32,
    length: f32,
    initial_angle_deg: f32,
    wheel_width: f32,
    wheel_diameter: f32,
    engine: &mut E,
) -> Result<Car, VehicleError> {
    let config = CarConfig::new(width, length, initial_angle_deg, wheel_width, wheel_diameter);
    Car::new(engine, &config, ChassisConfig::DEFAULT, DriveConfig::DEFAULT)
}

impl Car {
    pub fn new<E: PhysicsEngine>(
        engine: &mut E,
        config: &CarConfig,
        chassis_config: ChassisConfig,
        drive: DriveConfig,
    ) -> Result<Self, VehicleError> {
        config.validate()?;
        chassis_config.validate()?;
        drive.validate()?;

        let fixture = FixtureDef {
            density: chassis_config.density,
            friction: chassis_config.friction,
            restitution: chassis_config.restitution,
            is_sensor: false,
        };
        let mut def = BodyDef::new(BoxShape::new(config.width, config.length), fixture);
        def.angle = config.initial_angle_deg.to_radians();
        def.linear_damping = chassis_config.linear_damping;
        def.angular_damping = chassis_config.angular_damping;
        def.bullet = chassis_config.bullet;

        let body = engine.create_body(&def)?;

        let mut wheels = ArrayVec::<Wheel, 4>::new();
        for pos in WheelPos::ALL {
            let mut offset = if pos.is_front() {
                config.front_wheel_offset
            } else {
                config.rear_wheel_offset
            };

            if pos.is_left() {
                offset.x *= -1.0;
            }

            let wheel = Wheel::new(
                engine,
                body,
                offset,
                config.wheel_width,
                config.wheel_diameter,
                chassis_config.wheel_density,
                pos.is_front(),
            );

            match wheel {
                Ok(wheel) => wheels.push(wheel),
                Err(err) => {
                    for wheel in wheels {
                        let _ = wheel.destroy(engine);
                    }
                    let _ = engine.destroy_body(body);
                    return Err(err);
                }
            }
        }

        let Ok(wheels) = wheels.into_inner() else {
            unreachable!("one wheel is created per WheelPos");
        };

        debug!(
            "Created {}x{} car (chassis {body:?}) heading {} deg",
            config.width, config.length, config.initial_angle_deg
        );

        Ok(Self {
            body,
            wheels,
            config: *config,
            chassis_config,
            drive,
            steer_angle: 0.0,
            measured_speed: 0.0,
            drive_force: Vec2::ZERO,
        })
    }

    #[must_use]
    pub const fn body(&self) -> BodyHandle {
        self.body
    }

    #[must_use]
    pub const fn wheels(&self) -> &[Wheel; 4] {
        &self.wheels
    }

    #[must_use]
    pub const fn wheel(&self, pos: WheelPos) -> &Wheel {
        &self.wheels[pos as usize]
    }

    fn front_wheels(&self) -> &[Wheel] {
        &self.wheels[..2]
    }

    #[must_use]
    pub const fn config(&self) -> &CarConfig {
        &self.config
    }

    #[must_use]
    pub const fn chassis_config(&self) -> &ChassisConfig {
        &self.chassis_config
    }

    #[must_use]
    pub const fn drive_config(&self) -> &DriveConfig {
        &self.drive
    }

    /// Current steer angle of the front wheels, radians (positive is left)
    #[must_use]
    pub const fn steer_angle(&self) -> f32 {
        self.steer_angle
    }

    /// Forward speed in km/h as measured by the last update (negative when reversing)
    #[must_use]
    pub const fn measured_speed(&self) -> f32 {
        self.measured_speed
    }

    /// Local-frame force applied to each front wheel by the last update
    #[must_use]
    pub const fn drive_force(&self) -> Vec2 {
        self.drive_force
    }

    /// Chassis velocity at its origin, in the chassis frame
    pub fn local_velocity<E: PhysicsEngine>(&self, engine: &E) -> Vec2 {
        let velocity = engine.linear_velocity_from_local_point(self.body, Vec2::ZERO);
        engine.local_vector(self.body, velocity)
    }

    /// Simulates one tick of driving.
    ///
    /// Call once per engine step with the driver intent for this tick and the tick's duration.
    pub fn update<E: PhysicsEngine>(
        &mut self,
        engine: &mut E,
        controls: CarControls,
        tick_duration_ms: f32,
    ) {
        let tick_duration_ms = if tick_duration_ms.is_finite() && tick_duration_ms >= 0.0 {
            tick_duration_ms
        } else {
            warn!("Car::update(): ignoring invalid tick duration {tick_duration_ms} ms");
            0.0
        };

        self.update_speed(engine);

        for wheel in &self.wheels {
            wheel.eliminate_sideways_velocity(engine);
        }

        self.update_steer_angle(controls.steer, tick_duration_ms);
        for wheel in self.front_wheels() {
            wheel.set_steer_angle(engine, self.steer_angle);
        }

        self.drive_force = self.get_drive_force(engine, controls.accel);
        for wheel in self.front_wheels() {
            wheel.apply_force(engine, self.drive_force);
        }

        self.prevent_creep(engine, controls.accel);

        trace!(
            "speed {:.2} km/h, steer {:.3} rad, drive force {}",
            self.measured_speed, self.steer_angle, self.drive_force
        );
    }

    fn update_speed<E: PhysicsEngine>(&mut self, engine: &E) {
        self.measured_speed = self.local_velocity(engine).y * self.drive.engine_speed_to_kmh;
    }

    /// Steering always heads straight for the requested lock, and snaps back to center on release.
    ///
    /// The snap (instead of ramping back at the steer rate) is intentional arcade handling.
    fn update_steer_angle(&mut self, steer: SteerDirection, tick_duration_ms: f32) {
        let max_angle = self.drive.max_steer_angle();
        let step = self.drive.steer_step(tick_duration_ms);

        self.steer_angle = match steer {
            SteerDirection::Left => (self.steer_angle.max(0.0) + step).min(max_angle),
            SteerDirection::Right => (self.steer_angle.min(0.0) - step).max(-max_angle),
            SteerDirection::None => 0.0,
        };
    }

    fn get_drive_force<E: PhysicsEngine>(&self, engine: &E, accel: Acceleration) -> Vec2 {
        let base = match accel {
            Acceleration::Accelerate if self.measured_speed < self.drive.max_forward_speed => {
                Vec2::Y
            }
            Acceleration::Brake if -self.measured_speed < self.drive.max_reverse_speed => {
                if self.local_velocity(engine).y < 0.0 {
                    Vec2::new(0.0, -self.drive.reverse_force_scale)
                } else {
                    Vec2::new(0.0, -self.drive.brake_force_scale)
                }
            }
            _ => Vec2::ZERO,
        };

        base * self.drive.engine_power
    }

    /// Damping alone never quite stops the car, so a slow idle car is stopped outright
    fn prevent_creep<E: PhysicsEngine>(&self, engine: &mut E, accel: Acceleration) {
        if accel == Acceleration::Idle && self.measured_speed.abs() < self.drive.min_speed {
            engine.set_linear_velocity(self.body, Vec2::ZERO);
        }
    }

    pub fn get_state<E: PhysicsEngine>(&self, engine: &E) -> CarState {
        CarState {
            pos: engine.position(self.body),
            angle: engine.angle(self.body),
            vel: engine.linear_velocity(self.body),
            ang_vel: engine.angular_velocity(self.body),
            speed_kmh: self.measured_speed,
            steer_angle: self.steer_angle,
        }
    }

    /// Teleports the car; the wheels are put back on their mount points.
    ///
    /// `speed_kmh` is ignored, the speed is re-measured from `vel`.
    pub fn set_state<E: PhysicsEngine>(&mut self, engine: &mut E, state: &CarState) {
        let max_angle = self.drive.max_steer_angle();
        self.steer_angle = state.steer_angle.clamp(-max_angle, max_angle);

        engine.set_position(self.body, state.pos);
        engine.set_angle(self.body, state.angle);
        engine.set_linear_velocity(self.body, state.vel);
        engine.set_angular_velocity(self.body, state.ang_vel);

        for wheel in &self.wheels {
            wheel.snap_to_chassis(engine, self.steer_angle);
        }

        self.update_speed(engine);
        self.drive_force = Vec2::ZERO;
    }

    /// Returns the wheels, their joints and the chassis to the engine.
    ///
    /// Everything is released even if one part fails; the first failure is returned.
    pub fn destroy<E: PhysicsEngine>(self, engine: &mut E) -> Result<(), VehicleError> {
        let mut result = Ok(());
        for wheel in self.wheels {
            result = result.and(wheel.destroy(engine));
        }
        result = result.and(engine.destroy_body(self.body).map_err(VehicleError::from));

        debug!("Destroyed car (chassis {:?})", self.body);
        result
    }
}
