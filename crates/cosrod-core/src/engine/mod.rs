//! # Engine Module
//!
//! The finite-difference perturbation engine: given a rod, a node and one degree of
//! freedom, it loads the local window of segments around that node, applies the
//! perturbation and returns the elastic energy of the affected terms.
//!
//! ## Architecture
//!
//! - **Window** (`window`) - The 4-slot local copy of segments, frames and parameters
//! - **Perturbation** ([`perturbation`]) - Applies a perturbation and sums energy terms
//! - **Configuration** ([`config`]) - Step sizes, difference scheme and validation policy
//! - **Validation** ([`validation`]) - NaN/Inf screening of intermediate quantities
//! - **Diagnostics** ([`diagnostics`]) - Structured events sent to an optional callback
//! - **Context** ([`context`]) - The explicit bundle of the above passed to every call
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod perturbation;
pub mod validation;
pub(crate) mod window;
