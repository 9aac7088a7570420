use std::sync::{
    Arc,
    atomic::{AtomicU8, Ordering},
};

/// Longitudinal driver intent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Acceleration {
    #[default]
    Idle = 0,
    Accelerate = 1,
    /// Brakes while rolling forward, reverses once stopped
    Brake = 2,
}

impl Acceleration {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => Self::Accelerate,
            2 => Self::Brake,
            _ => Self::Idle,
        }
    }
}

/// Lateral driver intent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SteerDirection {
    #[default]
    None = 0,
    Left = 1,
    Right = 2,
}

impl SteerDirection {
    const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            1 => Self::Left,
            2 => Self::Right,
            _ => Self::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarControls {
    pub accel: Acceleration,
    pub steer: SteerDirection,
}

impl CarControls {
    pub const DEFAULT: Self = Self {
        accel: Acceleration::Idle,
        steer: SteerDirection::None,
    };

    #[must_use]
    pub const fn new(accel: Acceleration, steer: SteerDirection) -> Self {
        Self { accel, steer }
    }

    const fn to_bits(self) -> u8 {
        self.accel as u8 | (self.steer as u8) << 2
    }

    const fn from_bits(bits: u8) -> Self {
        Self {
            accel: Acceleration::from_bits(bits),
            steer: SteerDirection::from_bits(bits >> 2),
        }
    }
}

/// Driver intent shared between an input context and the simulation tick.
///
/// Both halves live in one atomic byte, so a [`snapshot`](Self::snapshot) is never torn
/// between an old acceleration and a new steer direction. Clones share the same cell.
#[derive(Clone, Debug, Default)]
pub struct SharedControls {
    bits: Arc<AtomicU8>,
}

impl SharedControls {
    #[must_use]
    pub fn new(controls: CarControls) -> Self {
        Self {
            bits: Arc::new(AtomicU8::new(controls.to_bits())),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> CarControls {
        CarControls::from_bits(self.bits.load(Ordering::Acquire))
    }

    pub fn set(&self, controls: CarControls) {
        self.bits.store(controls.to_bits(), Ordering::Release);
    }

    pub fn set_acceleration(&self, accel: Acceleration) {
        self.modify(|controls| controls.accel = accel);
    }

    pub fn set_steer_direction(&self, steer: SteerDirection) {
        self.modify(|controls| controls.steer = steer);
    }

    /// Throttle/brake released
    pub fn release_acceleration(&self) {
        self.set_acceleration(Acceleration::Idle);
    }

    /// Steering released
    pub fn release_steering(&self) {
        self.set_steer_direction(SteerDirection::None);
    }

    fn modify(&self, f: impl Fn(&mut CarControls)) {
        let mut update = |bits| {
            let mut controls = CarControls::from_bits(bits);
            f(&mut controls);
            Some(controls.to_bits())
        };

        // The closure never bails out, so this can't fail
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, &mut update);
    }
}
