use cosrod::engine::config::{DifferenceScheme, EvaluationConfig};
use cosrod::engine::validation::ValidationPolicy;

pub struct DefaultsConfig {
    pub translation_step: f64,
    pub rotation_step: f64,
    pub scheme: DifferenceScheme,
    pub validation: ValidationPolicy,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            translation_step: EvaluationConfig::DEFAULT_TRANSLATION_STEP,
            rotation_step: EvaluationConfig::DEFAULT_ROTATION_STEP,
            scheme: DifferenceScheme::Central,
            validation: ValidationPolicy::Enabled,
        }
    }
}
