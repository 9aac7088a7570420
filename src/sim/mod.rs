mod arena;
mod car;
mod car_config;
mod car_controls;
mod car_state;
mod wheel;

pub use arena::*;
pub use car::*;
pub use car_config::*;
pub use car_controls::*;
pub use car_state::*;
pub use wheel::*;
