//! # Workflows Module
//!
//! High-level entry points built on the [`core`](crate::core) formulas and the
//! perturbation [`engine`](crate::engine).
//!
//! - **Energy** ([`energy`]) - Whole-rod elastic energy with a per-node breakdown
//! - **Gradient** ([`gradient`]) - Finite-difference forces and torques for every node
//! - **Contact** ([`contact`]) - Steric geometry and energy for one pair of rod elements

pub mod contact;
pub mod energy;
pub mod gradient;
