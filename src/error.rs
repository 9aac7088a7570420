use crate::engine::EngineError;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum VehicleError {
    #[error("invalid configuration: {name} = {value}")]
    InvalidConfig { name: &'static str, value: f32 },

    #[error("physics engine failure: {0}")]
    Engine(#[from] EngineError),
}

pub(crate) fn ensure_finite(name: &'static str, value: f32) -> Result<(), VehicleError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(VehicleError::InvalidConfig { name, value })
    }
}

/// Fails with [`VehicleError::InvalidConfig`] unless `value` is finite and strictly positive
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<(), VehicleError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VehicleError::InvalidConfig { name, value })
    }
}

/// Fails with [`VehicleError::InvalidConfig`] unless `value` is finite and not negative
pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<(), VehicleError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(VehicleError::InvalidConfig { name, value })
    }
}
