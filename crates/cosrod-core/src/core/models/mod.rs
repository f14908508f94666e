//! # Models Module
//!
//! Data views used by the energy model and the perturbation engine. The rod itself is
//! owned by the caller as flat `f64` buffers; [`rod::RodView`] borrows them and
//! [`segment::Segment`] is the transient, value-typed pairing of a segment vector with
//! its primary material axis.

pub mod rod;
pub mod segment;
