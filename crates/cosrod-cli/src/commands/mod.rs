use crate::error::Result;
use serde::Serialize;

pub mod contact;
pub mod energy;
pub mod forces;

/// Renders a result as a TOML document for `--format toml`.
fn to_toml<T: Serialize>(value: &T) -> Result<String> {
    Ok(toml::to_string(value)?)
}
