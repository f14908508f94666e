//! # Core Module
//!
//! Stateless building blocks for rod mechanics.
//!
//! - **Vector math** ([`math::vector`]) - normalization, rotation matrices, Rodrigues rotation
//! - **Frame transport** ([`math::frame`]) - parallel transport and material-frame updates
//! - **Elastic energies** ([`elastics`]) - stretch, twist and mutual-frame bend energies
//! - **Rod buffers** ([`models`]) - borrowed views over caller-owned flat buffers
//! - **Dynamics** ([`dynamics`]) - friction, thermal noise and overdamped displacement
//! - **Sterics** ([`sterics`]) - closest points between rod elements and overlap volumes

pub mod dynamics;
pub mod elastics;
pub mod math;
pub mod models;
pub mod sterics;
