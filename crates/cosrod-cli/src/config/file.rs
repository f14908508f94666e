use super::defaults::DefaultsConfig;
use crate::cli::{ContactArgs, EvaluationArgs};
use crate::error::{CliError, Result};
use cosrod::engine::config::{DifferenceScheme, EvaluationConfig, EvaluationConfigBuilder};
use cosrod::engine::validation::ValidationPolicy;
use serde::Deserialize;
use serde::de::IntoDeserializer;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialFiniteDifferenceConfig {
    #[serde(rename = "translation-step")]
    translation_step: Option<f64>,
    #[serde(rename = "rotation-step")]
    rotation_step: Option<f64>,
    scheme: Option<DifferenceScheme>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialStericConfig {
    radius: Option<f64>,
    #[serde(rename = "force-constant")]
    force_constant: Option<f64>,
}

/// Evaluation settings as read from a TOML file, before defaults and CLI overrides.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(rename = "finite-difference")]
    finite_difference: Option<PartialFiniteDifferenceConfig>,
    validation: Option<ValidationPolicy>,
    sterics: Option<PartialStericConfig>,
}

/// Element radius and force constant for a steric contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StericSettings {
    pub radius: f64,
    pub force_constant: f64,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file named by `--config`, or starts empty.
    pub fn load(args: &EvaluationArgs) -> Result<Self> {
        match &args.config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Layers defaults, then this file, then `--set` values, then dedicated flags.
    pub fn merge_with_cli(&mut self, args: &EvaluationArgs) -> Result<EvaluationConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();
        let fd = self.finite_difference.take().unwrap_or_default();

        let scheme = if args.scheme.central {
            DifferenceScheme::Central
        } else if args.scheme.forward {
            DifferenceScheme::Forward
        } else {
            fd.scheme.unwrap_or(defaults.scheme)
        };
        let validation = if args.no_validation {
            ValidationPolicy::Disabled
        } else {
            self.validation.unwrap_or(defaults.validation)
        };

        let config = EvaluationConfigBuilder::new()
            .translation_step(
                args.translation_step
                    .or(fd.translation_step)
                    .unwrap_or(defaults.translation_step),
            )
            .rotation_step(
                args.rotation_step
                    .or(fd.rotation_step)
                    .unwrap_or(defaults.rotation_step),
            )
            .scheme(scheme)
            .validation(validation)
            .build()?;

        debug!("Final evaluation configuration: {:?}", config);
        Ok(config)
    }

    /// Steric settings for the `contact` command. Neither value has a default.
    pub fn steric_settings(&mut self, args: &ContactArgs) -> Result<StericSettings> {
        let sterics = self.sterics.take().unwrap_or_default();
        let require = |value: Option<f64>, key: &str| -> Result<f64> {
            let value = value.ok_or_else(|| {
                CliError::Config(format!(
                    "A value for '{}' is required either in the config file or via CLI argument.",
                    key
                ))
            })?;
            if value.is_finite() && value >= 0.0 {
                Ok(value)
            } else {
                Err(CliError::Config(format!(
                    "'{}' must be non-negative and finite, got {}",
                    key, value
                )))
            }
        };
        Ok(StericSettings {
            radius: require(args.radius.or(sterics.radius), "sterics.radius")?,
            force_constant: require(
                args.force_constant.or(sterics.force_constant),
                "sterics.force-constant",
            )?,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "finite-difference.translation-step" => {
                    self.finite_difference
                        .get_or_insert_with(Default::default)
                        .translation_step = Some(parse_float(key, value_str)?);
                }
                "finite-difference.rotation-step" => {
                    self.finite_difference
                        .get_or_insert_with(Default::default)
                        .rotation_step = Some(parse_float(key, value_str)?);
                }
                "finite-difference.scheme" => {
                    self.finite_difference
                        .get_or_insert_with(Default::default)
                        .scheme = Some(parse_keyword(key, value_str)?);
                }
                "validation" => {
                    self.validation = Some(parse_keyword(key, value_str)?);
                }
                "sterics.radius" => {
                    self.sterics.get_or_insert_with(Default::default).radius =
                        Some(parse_float(key, value_str)?);
                }
                "sterics.force-constant" => {
                    self.sterics
                        .get_or_insert_with(Default::default)
                        .force_constant = Some(parse_float(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_float(key: &str, value_str: &str) -> Result<f64> {
    f64::from_str(value_str)
        .map_err(|_| CliError::Config(format!("Invalid float value for {}: {}", key, value_str)))
}

/// Parses a kebab-case keyword with the same names the TOML file accepts.
fn parse_keyword<T>(key: &str, value_str: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let deserializer: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
        value_str.into_deserializer();
    T::deserialize(deserializer)
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}
