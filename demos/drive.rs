use std::{
    thread,
    time::{Duration, Instant},
};

use topdown_car::{Acceleration, Arena, CarConfig, SteerDirection, logging};

const TICK_RATE: f32 = 60.0;

fn main() {
    logging::try_init().unwrap();

    let mut arena = Arena::new(&CarConfig::DEFAULT, TICK_RATE).unwrap();
    let tick = Duration::from_secs_f32(arena.tick_time_ms() / 1000.0);

    // Stands in for a keyboard handler: press, hold, release
    let controls = arena.controls();
    let input = thread::spawn(move || {
        let script = [
            (Some(Acceleration::Accelerate), None, 1500),
            (None, Some(SteerDirection::Left), 800),
            (None, Some(SteerDirection::None), 400),
            (Some(Acceleration::Brake), None, 1200),
            (Some(Acceleration::Idle), None, 1500),
        ];

        for (accel, steer, hold_ms) in script {
            if let Some(accel) = accel {
                controls.set_acceleration(accel);
            }
            if let Some(steer) = steer {
                controls.set_steer_direction(steer);
            }
            thread::sleep(Duration::from_millis(hold_ms));
        }
    });

    let start = Instant::now();
    while !input.is_finished() {
        arena.step(1);

        if arena.tick_count() % 30 == 0 {
            let state = arena.get_car_state();
            println!(
                "t={:5.2}s pos: {:7.2} {:7.2} heading: {:6.3} speed: {:6.2} km/h steer: {:6.3}",
                start.elapsed().as_secs_f32(),
                state.pos.x,
                state.pos.y,
                state.angle,
                state.speed_kmh,
                state.steer_angle,
            );
        }

        thread::sleep(tick);
    }
    input.join().unwrap();

    let state = arena.get_car_state();
    println!("\nFinished after {} ticks", arena.tick_count());
    println!("pos: {}", state.pos);
    println!("vel: {}", state.vel);
    println!("forward: {}", state.forward_dir());
}
