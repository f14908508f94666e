//! # Elastics Module
//!
//! The Cosserat-rod energy model. Every energy is measured against an immutable
//! equilibrium copy of the rod and is evaluated from segments and their material frames.
//!
//! - [`potentials`] - scalar energy formulas (stretch, twist, bend quadratic form)
//! - [`energy`] - segment-level evaluation: twist angles, curvature binormals, mutual frames
//! - [`term`] - the `(bend, stretch, twist)` energy aggregate
//! - [`params`] - per-node stretch/twist constants and the 2×2 bending response matrix
//!
//! Bending is evaluated only with the mutual-frame algorithm: both neighbouring material
//! frames are parallel-transported onto a shared weighted-midpoint tangent, averaged, and
//! the curvature binormal is projected onto that shared frame.

pub mod energy;
pub mod params;
pub mod potentials;
pub mod term;
