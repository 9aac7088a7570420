#![allow(unused)]

use topdown_car::{
    Car, CarConfig, CarState,
    engine::World,
    glam::Vec2,
    sim::{ChassisConfig, DriveConfig},
};

pub const EPS: f32 = 1e-5;

pub fn setup() -> (World, Car) {
    setup_with(&CarConfig::DEFAULT)
}

pub fn setup_with(config: &CarConfig) -> (World, Car) {
    let mut world = World::default();
    let car = Car::new(
        &mut world,
        config,
        ChassisConfig::DEFAULT,
        DriveConfig::DEFAULT,
    )
    .unwrap();

    (world, car)
}

/// Teleports a car heading along +Y to move forward at `kmh` (negative reverses)
pub fn set_forward_speed(world: &mut World, car: &mut Car, kmh: f32) {
    let state = CarState {
        vel: Vec2::new(0.0, kmh / 3.6),
        ..CarState::DEFAULT
    };
    car.set_state(world, &state);
}

pub fn assert_vec_close(actual: Vec2, expected: Vec2, tolerance: f32) {
    assert!(
        (actual - expected).length() <= tolerance,
        "expected {expected}, got {actual}"
    );
}
