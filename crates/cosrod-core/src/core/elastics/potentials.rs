use nalgebra::{Matrix2, Vector2};
use std::f64::consts::{PI, TAU};

/// `k (|p| − |p̃|)² / (2 |p̃|)`.
#[inline]
pub fn stretch_energy(k: f64, length: f64, equil_length: f64) -> f64 {
    let diff = length - equil_length;
    k * diff * diff / (2.0 * equil_length)
}

/// Length of the integration domain around a joint, `(|p_{i−1}| + |p_i|) / 2`.
#[inline]
pub fn integration_length(prev_length: f64, next_length: f64) -> f64 {
    (prev_length + next_length) / 2.0
}

/// Maps an angle into `(−π, π]`.
#[inline]
pub fn wrap_angle(angle: f64) -> f64 {
    PI - (PI - angle).rem_euclid(TAU)
}

/// `(β / l) · wrap(Δθ − Δθ̃)²`.
#[inline]
pub fn twist_energy(beta: f64, integration_length: f64, delta_theta: f64, delta_theta_equil: f64) -> f64 {
    let wrapped = wrap_angle(delta_theta - delta_theta_equil);
    beta / integration_length * wrapped * wrapped
}

/// `Δωᵀ B Δω`.
#[inline]
pub fn bend_quadratic_form(delta_omega: &Vector2<f64>, b: &Matrix2<f64>) -> f64 {
    delta_omega.dot(&(b * delta_omega))
}

/// `Δωᵀ B Δω / (2 l)`.
#[inline]
pub fn bend_energy(delta_omega: &Vector2<f64>, b: &Matrix2<f64>, integration_length: f64) -> f64 {
    bend_quadratic_form(delta_omega, b) / (2.0 * integration_length)
}
