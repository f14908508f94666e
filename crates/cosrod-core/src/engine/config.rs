use super::validation::ValidationPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Finite-difference scheme used to turn perturbation energies into derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DifferenceScheme {
    /// `(E(x + δ) − E(x − δ)) / 2δ`.
    #[default]
    Central,
    /// `(E(x + δ) − E(x)) / δ`.
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationConfig {
    /// Perturbation applied to a node position, in length units.
    pub translation_step: f64,
    /// Perturbation applied to a material frame, in radians.
    pub rotation_step: f64,
    pub scheme: DifferenceScheme,
    pub validation: ValidationPolicy,
}

impl EvaluationConfig {
    pub const DEFAULT_TRANSLATION_STEP: f64 = 1e-3;
    pub const DEFAULT_ROTATION_STEP: f64 = 1e-3;
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            translation_step: Self::DEFAULT_TRANSLATION_STEP,
            rotation_step: Self::DEFAULT_ROTATION_STEP,
            scheme: DifferenceScheme::default(),
            validation: ValidationPolicy::default(),
        }
    }
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    translation_step: Option<f64>,
    rotation_step: Option<f64>,
    scheme: Option<DifferenceScheme>,
    validation: Option<ValidationPolicy>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn translation_step(mut self, step: f64) -> Self {
        self.translation_step = Some(step);
        self
    }
    pub fn rotation_step(mut self, step: f64) -> Self {
        self.rotation_step = Some(step);
        self
    }
    pub fn scheme(mut self, scheme: DifferenceScheme) -> Self {
        self.scheme = Some(scheme);
        self
    }
    pub fn validation(mut self, policy: ValidationPolicy) -> Self {
        self.validation = Some(policy);
        self
    }

    /// Both step sizes are required; the scheme and validation policy fall back to
    /// [`DifferenceScheme::Central`] and [`ValidationPolicy::Enabled`].
    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        let translation_step = positive_step(
            "translation_step",
            self.translation_step
                .ok_or(ConfigError::MissingParameter("translation_step"))?,
        )?;
        let rotation_step = positive_step(
            "rotation_step",
            self.rotation_step
                .ok_or(ConfigError::MissingParameter("rotation_step"))?,
        )?;
        Ok(EvaluationConfig {
            translation_step,
            rotation_step,
            scheme: self.scheme.unwrap_or_default(),
            validation: self.validation.unwrap_or_default(),
        })
    }
}

fn positive_step(name: &'static str, step: f64) -> Result<f64, ConfigError> {
    if step.is_finite() && step > 0.0 {
        Ok(step)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("step must be positive and finite, got {step}"),
        })
    }
}
