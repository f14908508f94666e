//! Material-frame transport between segment orientations.
//!
//! A segment `p` carries a primary material axis `m` perpendicular to its tangent
//! `t = p / |p|`. The secondary axis `n = t × m` is never stored. When a segment is
//! reoriented, its material axis follows by parallel transport so that no spurious
//! twist is introduced.

use super::vector::{apply_rotation, normalize, rotation_matrix};
use nalgebra::Vector3;

/// Removes the component of `m` along the tangent of `p`. The result is not renormalized.
#[inline]
pub fn perpendicularize(m: &Vector3<f64>, p: &Vector3<f64>) -> Vector3<f64> {
    let t = normalize(p);
    m - t * m.dot(&t)
}

/// Rotates `m` by the rotation that carries the tangent of `p_old` onto the tangent of `p_new`.
#[inline]
pub fn parallel_transport(
    m: &Vector3<f64>,
    p_old: &Vector3<f64>,
    p_new: &Vector3<f64>,
) -> Vector3<f64> {
    let rotation = rotation_matrix(&normalize(p_old), &normalize(p_new));
    apply_rotation(m, &rotation)
}

/// Material axis of a segment after it moved from `p_old` to `p_new`.
///
/// The result is unit length and perpendicular to `normalize(p_new)`.
pub fn update_material_frame(
    m: &Vector3<f64>,
    p_old: &Vector3<f64>,
    p_new: &Vector3<f64>,
) -> Vector3<f64> {
    let transported = parallel_transport(m, p_old, p_new);
    normalize(&perpendicularize(&transported, p_new))
}

/// `n = t × m`.
#[inline]
pub fn secondary_axis(m: &Vector3<f64>, p: &Vector3<f64>) -> Vector3<f64> {
    normalize(p).cross(m)
}

/// Signed angle from `transported` to `stored` measured about `tangent`.
///
/// `atan2((stored × transported) · tangent, transported · stored)`, in `(−π, π]`.
#[inline]
pub fn signed_angle(
    transported: &Vector3<f64>,
    stored: &Vector3<f64>,
    tangent: &Vector3<f64>,
) -> f64 {
    stored
        .cross(transported)
        .dot(tangent)
        .atan2(transported.dot(stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::vector::rodrigues_rotate;
    use std::f64::consts::FRAC_PI_2;

    const TOLERANCE: f64 = 1e-9;

    fn vec_approx_equal(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (a - b).norm() < TOLERANCE
    }

    #[test]
    fn perpendicularize_removes_tangential_component() {
        let m = Vector3::new(0.5, 1.0, 0.0);
        let p = Vector3::new(3.0, 0.0, 0.0);
        let out = perpendicularize(&m, &p);
        assert!(vec_approx_equal(&out, &Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn perpendicularize_does_not_renormalize() {
        let out = perpendicularize(&Vector3::new(1.0, 0.5, 0.0), &Vector3::x());
        assert!((out.norm() - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn parallel_transport_follows_segment_rotation() {
        let m = Vector3::y();
        let out = parallel_transport(&m, &Vector3::x(), &Vector3::z());
        assert!(vec_approx_equal(&out, &Vector3::y()));

        let out = parallel_transport(&Vector3::z(), &Vector3::x(), &Vector3::y());
        assert!(vec_approx_equal(&out, &Vector3::z()));

        let out = parallel_transport(&Vector3::y(), &Vector3::x(), &Vector3::y());
        assert!(vec_approx_equal(&out, &-Vector3::x()));
    }

    #[test]
    fn parallel_transport_round_trip_recovers_original() {
        let p1 = Vector3::new(1.0, 0.2, -0.3);
        let p2 = Vector3::new(-0.4, 1.1, 0.8);
        let m = normalize(&perpendicularize(&Vector3::new(0.1, 0.9, 0.4), &p1));
        let there = parallel_transport(&m, &p1, &p2);
        let back = parallel_transport(&there, &p2, &p1);
        assert!(vec_approx_equal(&back, &m));
    }

    #[test]
    fn parallel_transport_ignores_segment_lengths() {
        let m = Vector3::z();
        let short = parallel_transport(&m, &Vector3::x(), &Vector3::new(1.0, 1.0, 0.0));
        let long = parallel_transport(&m, &(Vector3::x() * 5.0), &Vector3::new(0.1, 0.1, 0.0));
        assert!(vec_approx_equal(&short, &long));
    }

    #[test]
    fn update_material_frame_is_unit_and_perpendicular() {
        let p_old = Vector3::new(1.0, 0.0, 0.0);
        let p_new = Vector3::new(0.9, 0.3, -0.2);
        let m = Vector3::new(0.0, 1.0, 0.0);
        let out = update_material_frame(&m, &p_old, &p_new);
        assert!((out.norm() - 1.0).abs() < TOLERANCE);
        assert!(out.dot(&normalize(&p_new)).abs() < TOLERANCE);
    }

    #[test]
    fn update_material_frame_repairs_slightly_skewed_axis() {
        let p = Vector3::new(0.0, 0.0, 2.0);
        let m = Vector3::new(1.0, 0.0, 0.05);
        let out = update_material_frame(&m, &p, &p);
        assert!(vec_approx_equal(&out, &Vector3::x()));
    }

    #[test]
    fn secondary_axis_is_tangent_cross_primary() {
        let n = secondary_axis(&Vector3::y(), &(Vector3::x() * 4.0));
        assert!(vec_approx_equal(&n, &Vector3::z()));
    }

    #[test]
    fn signed_angle_is_zero_for_aligned_axes() {
        let angle = signed_angle(&Vector3::y(), &Vector3::y(), &Vector3::x());
        assert!(angle.abs() < TOLERANCE);
    }

    #[test]
    fn signed_angle_changes_sign_with_rotation_direction() {
        let t = Vector3::x();
        let m = Vector3::y();
        let forward = rodrigues_rotate(&m, &t, 0.3);
        let backward = rodrigues_rotate(&m, &t, -0.3);
        let a = signed_angle(&m, &forward, &t);
        let b = signed_angle(&m, &backward, &t);
        assert!((a.abs() - 0.3).abs() < TOLERANCE);
        assert!((a + b).abs() < TOLERANCE);
    }

    #[test]
    fn signed_angle_magnitude_for_quarter_turn() {
        let t = Vector3::z();
        let angle = signed_angle(&Vector3::x(), &Vector3::y(), &t);
        assert!((angle.abs() - FRAC_PI_2).abs() < TOLERANCE);
    }
}
