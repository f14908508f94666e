use crate::core::math::frame::secondary_axis;
use crate::core::math::vector::{absolute, normalize};
use nalgebra::Vector3;

/// A rod segment `p_i = r_{i+1} − r_i` together with its primary material axis `m_i`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p: Vector3<f64>,
    pub m: Vector3<f64>,
}

impl Segment {
    pub fn new(p: Vector3<f64>, m: Vector3<f64>) -> Self {
        Self { p, m }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        absolute(&self.p)
    }

    #[inline]
    pub fn tangent(&self) -> Vector3<f64> {
        normalize(&self.p)
    }

    /// `n = t × m`.
    #[inline]
    pub fn secondary_axis(&self) -> Vector3<f64> {
        secondary_axis(&self.m, &self.p)
    }

    /// Same segment with its material axis renormalized.
    #[inline]
    pub fn with_normalized_frame(self) -> Self {
        Self {
            p: self.p,
            m: normalize(&self.m),
        }
    }
}
