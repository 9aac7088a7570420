/// Engine speed (m/s) to km/h.
///
/// Re-derive this when coupling to an engine with a different distance/time convention.
pub const ENGINE_SPEED_TO_KMH: f32 = 3600.0 / 1000.0;

pub mod car {
    /// Maximum steer angle of the front wheels (degrees)
    pub const MAX_STEER_ANGLE_DEG: f32 = 25.0;
    /// Time it takes to fully turn the wheels from center (ms)
    pub const MAX_STEER_TIME_MS: f32 = 200.0;
    /// km/h
    pub const MAX_FORWARD_SPEED: f32 = 60.0;
    /// km/h
    pub const MAX_REVERSE_SPEED: f32 = 20.0;
    /// Below this speed (km/h) an idle car is stopped outright
    pub const MIN_SPEED: f32 = 3.0;
    pub const ENGINE_POWER: f32 = 60.0;
    /// Drive force scale when already rolling backwards
    pub const REVERSE_FORCE_SCALE: f32 = 1.3;
    /// Drive force scale when braking from forward motion
    pub const BRAKE_FORCE_SCALE: f32 = 0.7;
}

pub mod chassis {
    pub const WIDTH: f32 = 2.0;
    pub const LENGTH: f32 = 4.0;
    pub const LINEAR_DAMPING: f32 = 0.15;
    pub const ANGULAR_DAMPING: f32 = 0.3;
    pub const DENSITY: f32 = 1.0;
    pub const FRICTION: f32 = 0.3;
    pub const RESTITUTION: f32 = 0.4;
}

pub mod wheel {
    use glam::Vec2;

    pub const WIDTH: f32 = 0.4;
    pub const DIAMETER: f32 = 0.8;
    pub const DENSITY: f32 = 1.0;

    /// Right-hand front mount point, the left one is mirrored on X
    pub const FRONT_OFFSET: Vec2 = Vec2::new(1.0, 1.2);
    /// Right-hand rear mount point, the left one is mirrored on X
    pub const REAR_OFFSET: Vec2 = Vec2::new(1.0, -1.2);
}

pub mod world {
    pub const VELOCITY_ITERATIONS: usize = 8;
    pub const POSITION_ITERATIONS: usize = 3;
    pub const LINEAR_SLOP: f32 = 0.005;
    pub const MAX_LINEAR_CORRECTION: f32 = 0.2;
}
