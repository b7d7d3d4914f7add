/// Errors raised when constructing an energy record from invalid input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EnergyError {
    #[error("{field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("Calculated calories cannot be negative, got {0}")]
    NegativeCalories(f32),
}

pub type Result<T> = std::result::Result<T, EnergyError>;

pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EnergyError::NotFinite { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(EnergyError::Negative { field, value });
    }
    Ok(value)
}

pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(EnergyError::NotPositive { field, value });
    }
    Ok(value)
}
