use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// Values per node in the material-parameter buffer: stretch constant, twist constant, reserved.
pub const MATERIAL_STRIDE: usize = 3;
/// Values per node in the bending-matrix buffer (row-major 2×2).
pub const BENDING_STRIDE: usize = 4;

/// Per-node elastic constants.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialParams {
    /// Stretch constant `k_i`.
    pub stretch: f64,
    /// Twist constant `β_i`.
    pub twist: f64,
}

impl MaterialParams {
    pub fn new(stretch: f64, twist: f64) -> Self {
        Self { stretch, twist }
    }

    /// Reads one node's entry from a material buffer slice of at least two values.
    /// The reserved third slot is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `values` holds fewer than two values.
    pub fn from_slice(values: &[f64]) -> Self {
        Self {
            stretch: values[0],
            twist: values[1],
        }
    }

    pub fn to_buffer_entry(self) -> [f64; MATERIAL_STRIDE] {
        [self.stretch, self.twist, 0.0]
    }
}

/// The 2×2 bending response matrix `B_i` of one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BendingMatrix(pub Matrix2<f64>);

impl BendingMatrix {
    /// Reads a row-major `[b00, b01, b10, b11]` entry.
    ///
    /// # Panics
    ///
    /// Panics if `values` holds fewer than four values.
    pub fn from_row_major(values: &[f64]) -> Self {
        Self(Matrix2::new(values[0], values[1], values[2], values[3]))
    }

    /// Isotropic bending response `diag(b, b)`.
    pub fn diagonal(b: f64) -> Self {
        Self(Matrix2::new(b, 0.0, 0.0, b))
    }

    pub fn to_row_major(self) -> [f64; BENDING_STRIDE] {
        [self.0[(0, 0)], self.0[(0, 1)], self.0[(1, 0)], self.0[(1, 1)]]
    }

    #[inline]
    pub fn matrix(&self) -> &Matrix2<f64> {
        &self.0
    }

    /// `Δωᵀ B Δω`.
    #[inline]
    pub fn quadratic_form(&self, delta_omega: &Vector2<f64>) -> f64 {
        super::potentials::bend_quadratic_form(delta_omega, &self.0)
    }
}

impl Default for BendingMatrix {
    fn default() -> Self {
        Self(Matrix2::zeros())
    }
}
