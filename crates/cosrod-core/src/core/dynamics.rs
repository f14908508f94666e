//! Overdamped Langevin helpers for advancing a rod node by one timestep.
//!
//! These are scalar, per-degree-of-freedom formulas. The time-stepping loop and the
//! random-number source live with the caller.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Stokes drag model used for rotational friction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RotationalFrictionModel {
    /// `8πμa²L`, a cylinder of length `L`.
    #[default]
    SlenderRod,
    /// `8πμa³`.
    Sphere,
}

/// `6πμa`.
#[inline]
pub fn translational_friction(viscosity: f64, radius: f64) -> f64 {
    6.0 * PI * viscosity * radius
}

#[inline]
pub fn rotational_friction(
    viscosity: f64,
    radius: f64,
    length: f64,
    model: RotationalFrictionModel,
) -> f64 {
    match model {
        RotationalFrictionModel::SlenderRod => 8.0 * PI * viscosity * radius.powi(2) * length,
        RotationalFrictionModel::Sphere => 8.0 * PI * viscosity * radius.powi(3),
    }
}

/// Thermal force `sqrt(24 kT ξ / Δt) · sample` for one degree of freedom.
///
/// `sample` is a unit-variance random draw supplied by the caller. A unit sample
/// yields the amplitude `sqrt(24 kT ξ / Δt)` itself.
#[inline]
pub fn thermal_noise(timestep: f64, kt: f64, friction: f64, sample: f64) -> f64 {
    (24.0 * kt * friction / timestep).sqrt() * sample
}

/// `(Δt / ξ)(F + F_ext + noise)`.
#[inline]
pub fn displacement(
    timestep: f64,
    friction: f64,
    force: f64,
    external_force: f64,
    noise: f64,
) -> f64 {
    (timestep / friction) * (force + external_force + noise)
}

/// `ΔE / Δx`.
#[inline]
pub fn force_from_energy(delta_energy: f64, delta_x: f64) -> f64 {
    delta_energy / delta_x
}

/// `ΔE / Δθ`.
#[inline]
pub fn torque_from_energy(delta_energy: f64, delta_theta: f64) -> f64 {
    delta_energy / delta_theta
}

/// Medium and geometry constants for stepping one rod.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LangevinParams {
    pub viscosity: f64,
    pub radius: f64,
    pub timestep: f64,
    pub kt: f64,
    #[serde(default)]
    pub friction_model: RotationalFrictionModel,
}

impl LangevinParams {
    pub fn translational_friction(&self) -> f64 {
        translational_friction(self.viscosity, self.radius)
    }

    /// Rotational friction of an element of the given length.
    pub fn rotational_friction(&self, element_length: f64) -> f64 {
        rotational_friction(self.viscosity, self.radius, element_length, self.friction_model)
    }

    /// Displacement of one translational degree of freedom.
    pub fn translate(&self, force: f64, external_force: f64, sample: f64) -> f64 {
        let friction = self.translational_friction();
        let noise = thermal_noise(self.timestep, self.kt, friction, sample);
        displacement(self.timestep, friction, force, external_force, noise)
    }

    /// Angular displacement of the twist degree of freedom of an element.
    pub fn rotate(&self, element_length: f64, torque: f64, external_torque: f64, sample: f64) -> f64 {
        let friction = self.rotational_friction(element_length);
        let noise = thermal_noise(self.timestep, self.kt, friction, sample);
        displacement(self.timestep, friction, torque, external_torque, noise)
    }
}
