use super::params::{BendingMatrix, MaterialParams};
use super::potentials;
use crate::core::math::frame::{parallel_transport, signed_angle};
use crate::core::math::vector::normalize;
use crate::core::models::segment::Segment;
use nalgebra::{Vector2, Vector3};

/// Material frame shared by two neighbouring segments at their joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutualFrame {
    pub tangent: Vector3<f64>,
    pub primary: Vector3<f64>,
    pub secondary: Vector3<f64>,
}

/// A joint between segments `i−1` and `i`, in the current and the equilibrium configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub prev: Segment,
    pub next: Segment,
    pub prev_equil: Segment,
    pub next_equil: Segment,
}

impl Joint {
    pub fn new(prev: Segment, next: Segment, prev_equil: Segment, next_equil: Segment) -> Self {
        Self {
            prev,
            next,
            prev_equil,
            next_equil,
        }
    }

    /// `l_i`, measured on the equilibrium segments.
    #[inline]
    pub fn integration_length(&self) -> f64 {
        potentials::integration_length(self.prev_equil.length(), self.next_equil.length())
    }
}

pub struct ElasticCalculator;

impl ElasticCalculator {
    pub fn stretch(params: &MaterialParams, current: &Segment, equil: &Segment) -> f64 {
        potentials::stretch_energy(params.stretch, current.length(), equil.length())
    }

    /// Signed twist between two neighbouring material frames.
    ///
    /// The frame of `prev` is parallel-transported onto the tangent of `next`; the result
    /// is the signed angle from the transported axis to the axis stored on `next`.
    pub fn twist_angle(prev: &Segment, next: &Segment) -> f64 {
        let t_prev = prev.tangent();
        let t_next = next.tangent();
        let transported = normalize(&parallel_transport(&normalize(&prev.m), &t_prev, &t_next));
        signed_angle(&transported, &normalize(&next.m), &t_next)
    }

    pub fn twist(params: &MaterialParams, joint: &Joint) -> f64 {
        let delta_theta = Self::twist_angle(&joint.prev, &joint.next);
        let delta_theta_equil = Self::twist_angle(&joint.prev_equil, &joint.next_equil);
        potentials::twist_energy(
            params.twist,
            joint.integration_length(),
            delta_theta,
            delta_theta_equil,
        )
    }

    /// `kb = 2 (p_{i−1} × p_i) / (|p_{i−1}||p_i| + p_{i−1}·p_i)`.
    ///
    /// The denominator vanishes for antiparallel segments; the result is then non-finite.
    pub fn curvature_binormal(p_prev: &Vector3<f64>, p_next: &Vector3<f64>) -> Vector3<f64> {
        let denominator = p_prev.norm() * p_next.norm() + p_prev.dot(p_next);
        2.0 * p_prev.cross(p_next) / denominator
    }

    /// `ω = (kb · n, −kb · m)`.
    #[inline]
    pub fn omega(kb: &Vector3<f64>, primary: &Vector3<f64>, secondary: &Vector3<f64>) -> Vector2<f64> {
        Vector2::new(kb.dot(secondary), -kb.dot(primary))
    }

    /// Frame at the joint of `prev` and `next`.
    ///
    /// With `w = |p_{i−1}| / (|p_{i−1}| + |p_i|)`, the mutual tangent is
    /// `normalize(t_{i−1}/w + t_i/(1−w))`; both material axes are transported onto it and
    /// combined with the same inverse weights.
    pub fn mutual_frame(prev: &Segment, next: &Segment) -> MutualFrame {
        let prev_length = prev.length();
        let next_length = next.length();
        let weight = prev_length / (prev_length + next_length);

        let t_prev = prev.tangent();
        let t_next = next.tangent();
        let tangent = normalize(&(t_prev / weight + t_next / (1.0 - weight)));

        let m_prev = parallel_transport(&prev.m, &t_prev, &tangent);
        let m_next = parallel_transport(&next.m, &t_next, &tangent);
        let primary = normalize(&(m_prev / weight + m_next / (1.0 - weight)));

        MutualFrame {
            tangent,
            primary,
            secondary: tangent.cross(&primary),
        }
    }

    fn joint_omega(prev: &Segment, next: &Segment) -> Vector2<f64> {
        let kb = Self::curvature_binormal(&prev.p, &next.p);
        let frame = Self::mutual_frame(prev, next);
        Self::omega(&kb, &frame.primary, &frame.secondary)
    }

    /// Bend energy at a joint, `Δωᵀ B Δω / (2 l_i)`, with curvature projected on the mutual frame.
    pub fn bend(bending: &BendingMatrix, joint: &Joint) -> f64 {
        let omega = Self::joint_omega(&joint.prev, &joint.next);
        let omega_equil = Self::joint_omega(&joint.prev_equil, &joint.next_equil);
        potentials::bend_energy(
            &(omega - omega_equil),
            bending.matrix(),
            joint.integration_length(),
        )
    }
}
