use super::{Car, CarConfig, CarControls, CarState, ChassisConfig, DriveConfig, SharedControls};
use crate::{VehicleError, engine::World};
use glam::Vec2;
use log::debug;

/// Hosts one car in a gravity-free [`World`] and ticks both at a fixed rate.
///
/// Input can be written from any thread through the cell returned by [`Arena::controls`];
/// each tick reads it exactly once.
pub struct Arena {
    world: World,
    car: Car,
    controls: SharedControls,
    tick_rate: f32,
    tick_time_ms: f32,
    tick_count: u64,
}

impl Arena {
    pub const DEFAULT_TICK_RATE: f32 = 60.0;

    pub fn new(config: &CarConfig, tick_rate: f32) -> Result<Self, VehicleError> {
        Self::new_with_config(config, ChassisConfig::DEFAULT, DriveConfig::DEFAULT, tick_rate)
    }

    /// A `tick_rate` of zero is a paused host: ticks still run, with zero duration.
    pub fn new_with_config(
        config: &CarConfig,
        chassis_config: ChassisConfig,
        drive: DriveConfig,
        tick_rate: f32,
    ) -> Result<Self, VehicleError> {
        if !tick_rate.is_finite() || tick_rate < 0.0 {
            return Err(VehicleError::InvalidConfig {
                name: "tick_rate",
                value: tick_rate,
            });
        }

        let mut world = World::new(Vec2::ZERO);
        let car = Car::new(&mut world, config, chassis_config, drive)?;

        debug!("Arena ticking at {tick_rate} Hz");

        Ok(Self {
            world,
            car,
            controls: SharedControls::default(),
            tick_rate,
            tick_time_ms: tick_time_ms(tick_rate),
            tick_count: 0,
        })
    }

    /// Runs `ticks` physics ticks: the world steps first, then the car reacts.
    pub fn step(&mut self, ticks: u32) {
        let tick_time_s = self.tick_time_ms / 1000.0;

        for _ in 0..ticks {
            self.world.step(tick_time_s);

            let controls = self.controls.snapshot();
            self.car.update(&mut self.world, controls, self.tick_time_ms);

            self.tick_count += 1;
        }
    }

    /// A handle to the driver-intent cell, for the input context
    #[must_use]
    pub fn controls(&self) -> SharedControls {
        self.controls.clone()
    }

    pub fn set_controls(&self, controls: CarControls) {
        self.controls.set(controls);
    }

    #[must_use]
    pub const fn car(&self) -> &Car {
        &self.car
    }

    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    pub const fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn get_car_state(&self) -> CarState {
        self.car.get_state(&self.world)
    }

    pub fn set_car_state(&mut self, state: &CarState) {
        self.car.set_state(&mut self.world, state);
    }

    #[must_use]
    pub const fn tick_rate(&self) -> f32 {
        self.tick_rate
    }

    #[must_use]
    pub const fn tick_time_ms(&self) -> f32 {
        self.tick_time_ms
    }

    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

/// Duration of one tick at `tick_rate` Hz, zero when paused
#[must_use]
pub fn tick_time_ms(tick_rate: f32) -> f32 {
    if tick_rate > 0.0 {
        1.0 / tick_rate * 1000.0
    } else {
        0.0
    }
}
