mod common;

use common::*;
use topdown_car::{
    Acceleration, Car, CarConfig, CarControls,
    engine::{PhysicsEngine, World},
    glam::Vec2,
    sim::{ChassisConfig, DriveConfig, WheelPos},
};

fn accel(accel: Acceleration) -> CarControls {
    CarControls {
        accel,
        ..CarControls::DEFAULT
    }
}

#[test]
fn speed_is_measured_along_chassis_heading() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, 36.0);

    car.update(&mut world, accel(Acceleration::Idle), 16.0);
    assert!((car.measured_speed() - 36.0).abs() < 1e-3);

    set_forward_speed(&mut world, &mut car, -12.0);
    car.update(&mut world, accel(Acceleration::Brake), 16.0);
    assert!((car.measured_speed() + 12.0).abs() < 1e-3);
}

#[test]
fn accelerating_pushes_front_wheels_only() {
    let (mut world, mut car) = setup();
    let drive = DriveConfig::DEFAULT;

    car.update(&mut world, accel(Acceleration::Accelerate), 16.0);
    assert_eq!(car.drive_force(), Vec2::new(0.0, drive.engine_power));

    for pos in WheelPos::ALL {
        let force = world.body(car.wheel(pos).body()).unwrap().total_force();
        if pos.is_front() {
            assert_vec_close(force, Vec2::new(0.0, drive.engine_power), EPS);
        } else {
            assert_eq!(force, Vec2::ZERO);
        }
    }
    assert_eq!(world.body(car.body()).unwrap().total_force(), Vec2::ZERO);
}

#[test]
fn no_drive_force_above_max_forward_speed() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, 70.0);

    car.update(&mut world, accel(Acceleration::Accelerate), 16.0);
    assert_eq!(car.drive_force(), Vec2::ZERO);

    for wheel in car.wheels() {
        assert_eq!(world.body(wheel.body()).unwrap().total_force(), Vec2::ZERO);
    }
}

#[test]
fn braking_while_rolling_forward_uses_brake_scale() {
    let (mut world, mut car) = setup();
    let drive = DriveConfig::DEFAULT;
    set_forward_speed(&mut world, &mut car, 30.0);

    car.update(&mut world, accel(Acceleration::Brake), 16.0);
    assert_vec_close(
        car.drive_force(),
        Vec2::new(0.0, -drive.brake_force_scale * drive.engine_power),
        EPS,
    );
}

#[test]
fn braking_while_reversing_uses_reverse_scale() {
    let (mut world, mut car) = setup();
    let drive = DriveConfig::DEFAULT;
    set_forward_speed(&mut world, &mut car, -10.0);

    car.update(&mut world, accel(Acceleration::Brake), 16.0);
    assert_vec_close(
        car.drive_force(),
        Vec2::new(0.0, -drive.reverse_force_scale * drive.engine_power),
        EPS,
    );
}

#[test]
fn no_reverse_force_above_max_reverse_speed() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, -25.0);

    car.update(&mut world, accel(Acceleration::Brake), 16.0);
    assert_eq!(car.drive_force(), Vec2::ZERO);
}

#[test]
fn slow_idle_car_is_stopped() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, 1.8);

    car.update(&mut world, accel(Acceleration::Idle), 16.0);
    assert_eq!(world.linear_velocity(car.body()), Vec2::ZERO);
    assert_eq!(car.drive_force(), Vec2::ZERO);
}

#[test]
fn fast_idle_car_keeps_rolling() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, 30.0);

    car.update(&mut world, accel(Acceleration::Idle), 16.0);
    assert_vec_close(
        world.linear_velocity(car.body()),
        Vec2::new(0.0, 30.0 / 3.6),
        1e-4,
    );
}

#[test]
fn slow_car_is_not_stopped_while_driving() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, 1.8);

    car.update(&mut world, accel(Acceleration::Accelerate), 16.0);
    assert_ne!(world.linear_velocity(car.body()), Vec2::ZERO);
}

#[test]
fn custom_drive_tuning_is_used() {
    let drive = DriveConfig {
        engine_power: 100.0,
        max_forward_speed: 10.0,
        ..DriveConfig::DEFAULT
    };
    let mut world = World::default();
    let mut car = Car::new(&mut world, &CarConfig::DEFAULT, ChassisConfig::DEFAULT, drive).unwrap();

    car.update(&mut world, accel(Acceleration::Accelerate), 16.0);
    assert_eq!(car.drive_force(), Vec2::new(0.0, 100.0));

    set_forward_speed(&mut world, &mut car, 12.0);
    car.update(&mut world, accel(Acceleration::Accelerate), 16.0);
    assert_eq!(car.drive_force(), Vec2::ZERO);
}
