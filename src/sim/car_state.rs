use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarState {
    pub pos: Vec2,
    /// Heading, radians
    pub angle: f32,
    pub vel: Vec2,
    pub ang_vel: f32,
    /// Forward speed measured during the last update (km/h)
    pub speed_kmh: f32,
    /// Front wheel angle relative to the chassis (radians)
    pub steer_angle: f32,
}

impl Default for CarState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CarState {
    pub const DEFAULT: Self = Self {
        pos: Vec2::ZERO,
        angle: 0.0,
        vel: Vec2::ZERO,
        ang_vel: 0.0,
        speed_kmh: 0.0,
        steer_angle: 0.0,
    };

    /// Unit vector the chassis points along (its local +Y)
    #[must_use]
    pub fn forward_dir(&self) -> Vec2 {
        Vec2::new(-self.angle.sin(), self.angle.cos())
    }
}
