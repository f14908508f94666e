//! Geometry of the steric interaction between two finite-radius rod elements.
//!
//! Elements are treated as capsule-like line segments `r → r + p` with a radius. The
//! connecting line between two non-parallel elements is found with the skew-line
//! construction and then clamped back onto each element.

use crate::core::math::vector::{Axis, normalize};
use nalgebra::Vector3;
use std::f64::consts::PI;
use thiserror::Error;

/// `|l_a × l_b|` at or below this value is treated as parallel.
pub const PARALLEL_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum StericError {
    #[error("Rod elements are parallel (|l_a × l_b| = {0:e}); skew-line geometry is undefined")]
    ParallelElements(f64),
}

/// One rod element: start node `r`, segment vector `p` and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    pub r: Vector3<f64>,
    pub p: Vector3<f64>,
    pub radius: f64,
}

impl Element {
    pub fn new(r: Vector3<f64>, p: Vector3<f64>, radius: f64) -> Self {
        Self { r, p, radius }
    }

    #[inline]
    pub fn direction(&self) -> Vector3<f64> {
        normalize(&self.p)
    }

    /// Same element moved by `amount` along `axis`, orientation kept.
    pub fn shifted(&self, axis: Axis, amount: f64) -> Self {
        let mut r = self.r;
        r[axis.index()] += amount;
        Self { r, ..*self }
    }
}

/// `l_a × l_b`, rejected when the elements are parallel.
pub fn skew_normal(a: &Element, b: &Element) -> Result<Vector3<f64>, StericError> {
    let normal = a.direction().cross(&b.direction());
    let magnitude = normal.norm();
    if magnitude <= PARALLEL_TOLERANCE {
        return Err(StericError::ParallelElements(magnitude));
    }
    Ok(normal)
}

/// `(l_a × l_b) · (r_b − r_a − R_a − R_b)`; negative when the elements overlap.
///
/// The radii are subtracted from every component of `r_b − r_a`.
pub fn skew_distance(a: &Element, b: &Element) -> Result<f64, StericError> {
    let normal = skew_normal(a, b)?;
    let offset = (b.r - a.r).add_scalar(-(a.radius + b.radius));
    Ok(normal.dot(&offset))
}

/// Clamps `c` onto the element `r1 → r1 + p`: to `r1` when `p·(c − r1) ≤ 0`, to
/// `r1 + p` when `p·(c − r1) ≥ |p|²`, otherwise `c` unchanged.
pub fn closest_point_on_element(
    p: &Vector3<f64>,
    r1: &Vector3<f64>,
    c: &Vector3<f64>,
) -> Vector3<f64> {
    let projection = p.dot(&(c - r1));
    if projection <= 0.0 {
        *r1
    } else if projection >= p.norm_squared() {
        r1 + p
    } else {
        *c
    }
}

/// Point on element `a` where the line connecting `a` and `b` meets it.
///
/// `normal` is `l_a × l_b` and must be the same value for both ends of the connecting
/// line, so the caller passes it in rather than recomputing it with swapped arguments.
pub fn connecting_line_point(
    a: &Element,
    b: &Element,
    normal: &Vector3<f64>,
) -> Result<Vector3<f64>, StericError> {
    let l_a = a.direction();
    let n_b = b.direction().cross(normal);
    let denominator = l_a.dot(&n_b);
    if denominator.abs() <= PARALLEL_TOLERANCE * PARALLEL_TOLERANCE {
        return Err(StericError::ParallelElements(normal.norm()));
    }
    let c_a = a.r + (b.r - a.r).dot(&n_b) / denominator * l_a;
    Ok(closest_point_on_element(&a.p, &a.r, &c_a))
}

/// Both ends `(c_a, c_b)` of the connecting line between two elements.
pub fn connecting_line(
    a: &Element,
    b: &Element,
) -> Result<(Vector3<f64>, Vector3<f64>), StericError> {
    let normal = skew_normal(a, b)?;
    let c_a = connecting_line_point(a, b, &normal)?;
    let c_b = connecting_line_point(b, a, &normal)?;
    Ok((c_a, c_b))
}

/// Volume shared by two spheres whose centres are `separation` apart.
pub fn sphere_intersection_volume(separation: f64, radius_a: f64, radius_b: f64) -> f64 {
    let sum = radius_a + radius_b;
    let difference = (radius_a - radius_b).abs();
    if separation <= difference {
        let radius_min = radius_a.min(radius_b);
        4.0 / 3.0 * PI * radius_min.powi(3)
    } else if separation < sum {
        let depth = sum - separation;
        let lens = separation * separation + 2.0 * separation * sum - 3.0 * difference * difference;
        PI / (12.0 * separation) * depth * depth * lens
    } else {
        0.0
    }
}

/// `max(R_a + R_b − |c_ba|, 0)`.
#[inline]
pub fn steric_overlap(separation: f64, radius_a: f64, radius_b: f64) -> f64 {
    (radius_a + radius_b - separation).max(0.0)
}

/// Steric energy `k · overlap` after moving a copy of element `b` by `amount` along `axis`.
pub fn steric_perturbation_energy(
    amount: f64,
    axis: Axis,
    force_constant: f64,
    a: &Element,
    b: &Element,
) -> Result<f64, StericError> {
    let shifted = b.shifted(axis, amount);
    let (c_a, c_b) = connecting_line(a, &shifted)?;
    let separation = (c_b - c_a).norm();
    Ok(force_constant * steric_overlap(separation, a.radius, shifted.radius))
}
