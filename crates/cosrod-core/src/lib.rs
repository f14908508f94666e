//! # cosrod Core Library
//!
//! Elastic mechanics for discretized Cosserat rods, the one-dimensional model used to
//! represent semi-flexible biomolecular filaments, together with the steric geometry
//! between pairs of rod elements.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless vector/rotation math, material-frame
//!   transport, the stretch/twist/bend energy model, Langevin dynamics formulas and
//!   rod-rod steric geometry. Every function here is pure.
//!
//! - **[`engine`]: The Logic Core.** The finite-difference perturbation engine that
//!   loads a local 4-segment window around a node, perturbs one degree of freedom and
//!   sums the valid energy terms. Validation policy and diagnostics are carried by an
//!   explicit [`engine::context::Context`] instead of process-wide flags.
//!
//! - **[`workflows`]: The Public API.** Whole-rod energies, whole-rod forces and
//!   torques, and element-pair contact reports built on the two layers below.
//!
//! All inputs are flat `f64` buffers owned by the caller and borrowed through
//! [`core::models::rod::RodView`]; nothing in the library keeps persistent state.

pub mod core;
pub mod engine;
pub mod workflows;
