use super::error::EngineError;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Whether intermediate quantities are screened for NaN and infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationPolicy {
    #[default]
    Enabled,
    Disabled,
}

impl ValidationPolicy {
    #[inline]
    pub fn is_enabled(self) -> bool {
        matches!(self, ValidationPolicy::Enabled)
    }

    /// Passes `value` through, or fails with [`EngineError::NumericallyInvalid`] when
    /// screening is enabled and the value is NaN or infinite.
    #[inline]
    pub fn check(self, label: &'static str, value: f64) -> Result<f64, EngineError> {
        if self.is_enabled() && !value.is_finite() {
            return Err(EngineError::NumericallyInvalid { label, value });
        }
        Ok(value)
    }

    /// Component-wise [`check`](Self::check); the first offending component is reported.
    pub fn check_vector(
        self,
        label: &'static str,
        value: &Vector3<f64>,
    ) -> Result<Vector3<f64>, EngineError> {
        if self.is_enabled() {
            if let Some(bad) = value.iter().copied().find(|c| !c.is_finite()) {
                return Err(EngineError::NumericallyInvalid { label, value: bad });
            }
        }
        Ok(*value)
    }
}
