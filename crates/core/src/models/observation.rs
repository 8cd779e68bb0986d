use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// One observed income amount for a specific month, used when recording
/// history for a source.
///
/// The month is addressed by its offset relative to the current month:
/// negative offsets are past months, 0 is the current month. Future months
/// can never carry an observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalObservation {
    /// Month offset (negative = past, 0 = current month)
    pub offset: i32,

    /// Observed amount for that month
    pub amount: f64,
}

impl HistoricalObservation {
    /// Create a validated observation. The amount must be finite and
    /// non-negative. The offset window is checked where the observation is
    /// applied, since the window size is a caller concern.
    pub fn new(offset: i32, amount: f64) -> Result<Self, CoreError> {
        if !amount.is_finite() {
            return Err(CoreError::ValidationError(
                "Observation amount must be a finite number".into(),
            ));
        }
        if amount < 0.0 {
            return Err(CoreError::ValidationError(
                "Observation amount must not be negative".into(),
            ));
        }
        Ok(Self { offset, amount })
    }
}
