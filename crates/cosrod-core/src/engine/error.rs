use thiserror::Error;

use crate::core::models::rod::BufferError;
use crate::core::sterics::StericError;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EngineError {
    #[error("Numerically invalid value for '{label}': {value}")]
    NumericallyInvalid { label: &'static str, value: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Node {node} is out of range for a rod with {num_nodes} nodes")]
    NodeOutOfRange { node: usize, num_nodes: usize },

    #[error("Invalid rod buffers: {source}")]
    Buffer {
        #[from]
        source: BufferError,
    },

    #[error("Steric geometry failed: {source}")]
    Steric {
        #[from]
        source: StericError,
    },
}
