mod common;

use common::*;
use std::f32::consts::FRAC_PI_2;
use topdown_car::{
    Car, CarConfig, VehicleError, create_vehicle,
    engine::{EngineError, PhysicsEngine, World},
    glam::Vec2,
    sim::{ChassisConfig, DriveConfig, Wheel, WheelPos},
};

#[test]
fn car_owns_two_revolving_and_two_fixed_wheels() {
    let (world, car) = setup();

    assert_eq!(world.body_count(), 5);
    assert_eq!(world.joint_count(), 4);

    for pos in WheelPos::ALL {
        let wheel = car.wheel(pos);
        assert_eq!(wheel.is_revolving(), pos.is_front());
        assert_eq!(wheel.chassis(), car.body());
        assert!(world.body(wheel.body()).unwrap().is_sensor());
    }

    assert!(!world.body(car.body()).unwrap().is_sensor());
    assert!(world.body(car.body()).unwrap().is_bullet());
}

#[test]
fn wheels_are_placed_at_rotated_mount_points() {
    let config = CarConfig {
        initial_angle_deg: 90.0,
        ..CarConfig::DEFAULT
    };
    let (world, car) = setup_with(&config);

    assert!((world.angle(car.body()) - FRAC_PI_2).abs() < EPS);

    let front_right = car.wheel(WheelPos::FrontRight);
    assert_eq!(front_right.mount_offset(), Vec2::new(1.0, 1.2));
    assert_vec_close(world.position(front_right.body()), Vec2::new(-1.2, 1.0), EPS);

    let rear_left = car.wheel(WheelPos::RearLeft);
    assert_eq!(rear_left.mount_offset(), Vec2::new(-1.0, -1.2));
    assert_vec_close(world.position(rear_left.body()), Vec2::new(1.2, -1.0), EPS);

    for wheel in car.wheels() {
        assert!((world.angle(wheel.body()) - FRAC_PI_2).abs() < EPS);
    }
}

#[test]
fn sideways_velocity_is_removed() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, 20.0);

    let wheel = car.wheel(WheelPos::RearRight);
    world.set_linear_velocity(wheel.body(), Vec2::new(3.0, 4.0));
    wheel.eliminate_sideways_velocity(&mut world);

    assert_vec_close(world.linear_velocity(wheel.body()), Vec2::new(0.0, 4.0), EPS);
}

#[test]
fn sideways_velocity_is_removed_when_reversing() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, -10.0);

    let wheel = car.wheel(WheelPos::FrontLeft);
    assert_vec_close(wheel.rolling_axis(&world), Vec2::NEG_Y, EPS);

    world.set_linear_velocity(wheel.body(), Vec2::new(-2.0, -5.0));
    wheel.eliminate_sideways_velocity(&mut world);

    assert_vec_close(world.linear_velocity(wheel.body()), Vec2::new(0.0, -5.0), EPS);
}

#[test]
fn sideways_elimination_follows_steered_wheel() {
    let (mut world, car) = setup();
    let wheel = car.wheel(WheelPos::FrontRight);

    wheel.set_steer_angle(&mut world, FRAC_PI_2);
    world.set_linear_velocity(wheel.body(), Vec2::new(3.0, 4.0));
    wheel.eliminate_sideways_velocity(&mut world);

    // Rolling along world -X/+X now, so only the X part survives
    assert_vec_close(world.linear_velocity(wheel.body()), Vec2::new(3.0, 0.0), EPS);
}

#[test]
fn sideways_elimination_is_idempotent() {
    let (mut world, mut car) = setup();
    set_forward_speed(&mut world, &mut car, 35.0);
    world.set_angular_velocity(car.body(), 0.4);

    for wheel in car.wheels() {
        wheel.set_steer_angle(&mut world, 0.3);
        world.set_linear_velocity(wheel.body(), Vec2::new(2.5, -7.0));

        wheel.eliminate_sideways_velocity(&mut world);
        let once = world.linear_velocity(wheel.body());
        wheel.eliminate_sideways_velocity(&mut world);
        let twice = world.linear_velocity(wheel.body());

        assert_vec_close(twice, once, EPS);
    }
}

#[test]
fn force_is_applied_in_wheel_frame_at_its_center() {
    let (mut world, car) = setup();
    let wheel = car.wheel(WheelPos::FrontLeft);

    wheel.set_steer_angle(&mut world, FRAC_PI_2);
    wheel.apply_force(&mut world, Vec2::new(0.0, 60.0));

    let rb = world.body(wheel.body()).unwrap();
    assert_vec_close(rb.total_force(), Vec2::new(-60.0, 0.0), 1e-4);
    assert!(rb.total_torque().abs() < 1e-4);
}

#[test]
fn destroying_car_releases_everything() {
    let (mut world, car) = setup();
    car.destroy(&mut world).unwrap();

    assert_eq!(world.body_count(), 0);
    assert_eq!(world.joint_count(), 0);
}

#[test]
fn bad_dimensions_fail_before_touching_the_engine() {
    let mut world = World::default();

    let err = create_vehicle(0.0, 4.0, 0.0, 0.4, 0.8, &mut world).unwrap_err();
    assert!(matches!(err, VehicleError::InvalidConfig { name: "width", .. }));

    let err = create_vehicle(2.0, 4.0, 0.0, 0.4, -1.0, &mut world).unwrap_err();
    assert!(matches!(
        err,
        VehicleError::InvalidConfig {
            name: "wheel_diameter",
            ..
        }
    ));

    assert_eq!(world.body_count(), 0);
}

#[test]
fn engine_failure_aborts_wheel_creation() {
    let mut world = World::default();
    let car = create_vehicle(2.0, 4.0, 0.0, 0.4, 0.8, &mut world).unwrap();

    let err = Wheel::new(&mut world, car.body(), Vec2::ZERO, 0.4, 0.8, -1.0, true).unwrap_err();
    assert_eq!(err, VehicleError::Engine(EngineError::InvalidFixture(-1.0)));
    assert_eq!(world.body_count(), 5);
}

#[test]
fn mirrored_wheel_offsets_are_rejected() {
    let mut world = World::default();
    let config = CarConfig {
        front_wheel_offset: Vec2::new(-1.0, 1.2),
        ..CarConfig::DEFAULT
    };

    let err = Car::new(
        &mut world,
        &config,
        ChassisConfig::DEFAULT,
        DriveConfig::DEFAULT,
    )
    .unwrap_err();
    assert_eq!(
        err,
        VehicleError::InvalidConfig {
            name: "front_wheel_offset.x",
            value: -1.0
        }
    );
    assert_eq!(world.body_count(), 0);
}

#[test]
fn left_wheels_sit_on_the_left() {
    let (world, car) = setup();

    for pos in WheelPos::ALL {
        let x = world.position(car.wheel(pos).body()).x;
        if pos.is_left() {
            assert!(x < 0.0, "{pos:?} is at x = {x}");
        } else {
            assert!(x > 0.0, "{pos:?} is at x = {x}");
        }
    }
}

#[test]
fn destroying_car_releases_everything_after_a_failure() {
    let (mut world, car) = setup();
    let lost_joint = car.wheel(WheelPos::FrontLeft).joint();
    world.destroy_joint(lost_joint).unwrap();

    let err = car.destroy(&mut world).unwrap_err();
    assert_eq!(err, VehicleError::Engine(EngineError::UnknownJoint(lost_joint)));

    assert_eq!(world.body_count(), 0);
    assert_eq!(world.joint_count(), 0);
}
