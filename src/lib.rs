//! Arcade top-down car handling on top of a 2D rigid-body engine.
//!
//! A [`Car`](sim::Car) turns discrete driver intent into steering angles, drive forces and
//! sideways-velocity cancellation on four jointed wheel bodies. Grip comes from throwing away
//! each wheel's sideways velocity every tick rather than from a tire friction model.

pub use glam;

pub mod consts;
pub mod engine;
mod error;
pub mod logging;
pub mod math;
pub mod sim;

pub use error::VehicleError;
pub use sim::{
    Acceleration, Arena, Car, CarConfig, CarControls, CarState, SharedControls, SteerDirection,
    create_vehicle,
};
