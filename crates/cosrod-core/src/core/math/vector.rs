use nalgebra::{Matrix3, Vector3};

/// `1 + a·b` at or below this value is treated as an antiparallel pair in [`rotation_matrix`].
pub const ANTIPARALLEL_TOLERANCE: f64 = 1e-12;

/// A Cartesian coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    #[inline]
    pub fn unit(self) -> Vector3<f64> {
        match self {
            Axis::X => Vector3::x(),
            Axis::Y => Vector3::y(),
            Axis::Z => Vector3::z(),
        }
    }
}

/// Returns `v / |v|`, or the zero vector when the quotient is not finite (e.g. `v = 0`).
#[inline]
pub fn normalize(v: &Vector3<f64>) -> Vector3<f64> {
    let out = v / v.norm();
    if out.iter().all(|c| c.is_finite()) {
        out
    } else {
        Vector3::zeros()
    }
}

/// Returns `v / |v|` without screening the result. Only for inputs known to be non-zero.
#[inline]
pub fn normalize_strict(v: &Vector3<f64>) -> Vector3<f64> {
    v / v.norm()
}

#[inline]
pub fn absolute(v: &Vector3<f64>) -> f64 {
    v.norm()
}

#[inline]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

#[inline]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// A unit vector perpendicular to `v`, built from the coordinate axis least aligned with it.
pub fn perpendicular_to(v: &Vector3<f64>) -> Vector3<f64> {
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };
    v.cross(&axis)
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::y)
}

/// Rotation matrix taking unit vector `a` onto unit vector `b`.
///
/// Uses `R = I + [v]× + [v]×² / (1 + c)` with `v = a × b` and `c = a · b`. The formula
/// is singular for antiparallel inputs; in that case the result is the rotation by π
/// about [`perpendicular_to`]`(a)`, i.e. `R = 2uuᵀ − I`.
pub fn rotation_matrix(a: &Vector3<f64>, b: &Vector3<f64>) -> Matrix3<f64> {
    let c = a.dot(b);
    if 1.0 + c <= ANTIPARALLEL_TOLERANCE {
        let u = perpendicular_to(a);
        return 2.0 * u * u.transpose() - Matrix3::identity();
    }
    let vx = a.cross(b).cross_matrix();
    Matrix3::identity() + vx + (vx * vx) / (1.0 + c)
}

#[inline]
pub fn apply_rotation(v: &Vector3<f64>, rotation: &Matrix3<f64>) -> Vector3<f64> {
    rotation * v
}

/// Rotates `v` about `axis` by `theta` radians (Rodrigues' formula). The axis is normalized first.
pub fn rodrigues_rotate(v: &Vector3<f64>, axis: &Vector3<f64>, theta: f64) -> Vector3<f64> {
    let k = normalize(axis);
    let (sin_theta, cos_theta) = theta.sin_cos();
    v * cos_theta + k.cross(v) * sin_theta + k * (k.dot(v) * (1.0 - cos_theta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn vec_approx_equal(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (a - b).norm() < TOLERANCE
    }

    #[test]
    fn normalize_returns_unit_vector_for_nonzero_input() {
        for v in [
            Vector3::new(3.0, 4.0, 0.0),
            Vector3::new(-0.1, 2.5, 7.0),
            Vector3::new(1e-8, 0.0, -1e-8),
        ] {
            assert!((normalize(&v).norm() - 1.0).abs() < TOLERANCE);
        }
    }

    #[test]
    fn normalize_returns_zero_vector_for_zero_input() {
        assert_eq!(normalize(&Vector3::zeros()), Vector3::zeros());
    }

    #[test]
    fn normalize_returns_zero_vector_for_infinite_input() {
        let v = Vector3::new(f64::INFINITY, 0.0, 0.0);
        assert_eq!(normalize(&v), Vector3::zeros());
    }

    #[test]
    fn normalize_strict_matches_normalize_for_good_input() {
        let v = Vector3::new(1.0, -2.0, 2.0);
        assert!(vec_approx_equal(&normalize_strict(&v), &normalize(&v)));
    }

    #[test]
    fn absolute_returns_euclidean_norm() {
        assert!((absolute(&Vector3::new(2.0, 3.0, 6.0)) - 7.0).abs() < TOLERANCE);
    }

    #[test]
    fn cross_and_dot_follow_right_hand_rule() {
        let z = cross(&Vector3::x(), &Vector3::y());
        assert!(vec_approx_equal(&z, &Vector3::z()));
        assert_eq!(dot(&Vector3::x(), &Vector3::y()), 0.0);
    }

    #[test]
    fn rotation_matrix_maps_a_onto_b() {
        let pairs = [
            (Vector3::x(), Vector3::y()),
            (Vector3::new(1.0, 1.0, 0.0), Vector3::new(0.0, 1.0, 1.0)),
            (Vector3::new(0.3, -0.2, 0.9), Vector3::new(-0.5, 0.4, 0.1)),
            (Vector3::z(), Vector3::z()),
        ];
        for (a, b) in pairs {
            let a = normalize(&a);
            let b = normalize(&b);
            let rotated = apply_rotation(&a, &rotation_matrix(&a, &b));
            assert!(vec_approx_equal(&rotated, &b), "{a:?} -> {b:?} gave {rotated:?}");
        }
    }

    #[test]
    fn rotation_matrix_is_orthonormal() {
        let a = normalize(&Vector3::new(0.2, 0.7, -0.3));
        let b = normalize(&Vector3::new(-0.9, 0.1, 0.4));
        let r = rotation_matrix(&a, &b);
        assert!((r.transpose() * r - Matrix3::identity()).norm() < TOLERANCE);
        assert!((r.determinant() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn rotation_matrix_handles_antiparallel_vectors() {
        let a = normalize(&Vector3::new(1.0, 2.0, -0.5));
        let b = -a;
        let r = rotation_matrix(&a, &b);
        assert!(r.iter().all(|c| c.is_finite()));
        assert!(vec_approx_equal(&apply_rotation(&a, &r), &b));
        assert!((r.determinant() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn perpendicular_to_is_unit_and_orthogonal() {
        for v in [Vector3::x(), Vector3::new(0.3, 0.3, 0.9), Vector3::new(-2.0, 5.0, 1.0)] {
            let u = perpendicular_to(&v);
            assert!((u.norm() - 1.0).abs() < TOLERANCE);
            assert!(u.dot(&v).abs() < TOLERANCE);
        }
    }

    #[test]
    fn rodrigues_rotate_by_zero_is_identity() {
        let v = Vector3::new(0.4, -1.2, 3.3);
        let axis = Vector3::new(1.0, 1.0, 0.0);
        assert!(vec_approx_equal(&rodrigues_rotate(&v, &axis, 0.0), &v));
    }

    #[test]
    fn rodrigues_rotate_is_two_pi_periodic() {
        let v = Vector3::new(0.4, -1.2, 3.3);
        let axis = Vector3::new(0.2, 1.0, -0.7);
        let theta = 0.8;
        let once = rodrigues_rotate(&v, &axis, theta);
        let wrapped = rodrigues_rotate(&v, &axis, theta + 2.0 * PI);
        assert!(vec_approx_equal(&once, &wrapped));
    }

    #[test]
    fn rodrigues_rotate_half_turn_about_x_flips_y() {
        let rotated = rodrigues_rotate(&Vector3::y(), &Vector3::x(), PI);
        assert!(vec_approx_equal(&rotated, &Vector3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn axis_unit_vectors_match_indices() {
        for axis in Axis::ALL {
            let unit = axis.unit();
            assert_eq!(unit[axis.index()], 1.0);
            assert_eq!(unit.norm(), 1.0);
        }
    }

    #[test]
    fn rodrigues_rotate_normalizes_the_axis() {
        let v = Vector3::y();
        let unit = rodrigues_rotate(&v, &Vector3::x(), 0.5);
        let scaled = rodrigues_rotate(&v, &(Vector3::x() * 12.0), 0.5);
        assert!(vec_approx_equal(&unit, &scaled));
    }
}
