use super::segment::Segment;
use crate::core::elastics::params::{BENDING_STRIDE, BendingMatrix, MATERIAL_STRIDE, MaterialParams};
use nalgebra::Vector3;
use thiserror::Error;

/// Values per node in the position and material-frame buffers.
pub const VECTOR_STRIDE: usize = 3;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BufferError {
    #[error("Buffer '{buffer}' holds {actual} values, expected {expected}")]
    Length {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Buffer 'positions' holds {0} values, which is not a whole number of nodes")]
    Ragged(usize),
}

/// The six caller-owned flat buffers that describe one rod.
#[derive(Debug, Clone, Copy)]
pub struct RodBuffers<'a> {
    /// Node positions, 3 values per node.
    pub positions: &'a [f64],
    /// Primary material axes, 3 values per node.
    pub frames: &'a [f64],
    pub equil_positions: &'a [f64],
    pub equil_frames: &'a [f64],
    /// Stretch constant, twist constant and a reserved slot per node.
    pub material: &'a [f64],
    /// Row-major 2×2 bending matrix per node.
    pub bending: &'a [f64],
}

/// Read-only view over a rod's flat buffers.
///
/// All buffers are validated against one node count on construction, so the accessors
/// below never index out of bounds for `node < num_nodes()`.
#[derive(Debug, Clone, Copy)]
pub struct RodView<'a> {
    buffers: RodBuffers<'a>,
    num_nodes: usize,
}

impl<'a> RodView<'a> {
    pub fn new(buffers: RodBuffers<'a>) -> Result<Self, BufferError> {
        let len = buffers.positions.len();
        if len % VECTOR_STRIDE != 0 {
            return Err(BufferError::Ragged(len));
        }
        let num_nodes = len / VECTOR_STRIDE;

        let expected = [
            ("frames", buffers.frames.len(), num_nodes * VECTOR_STRIDE),
            ("equil_positions", buffers.equil_positions.len(), num_nodes * VECTOR_STRIDE),
            ("equil_frames", buffers.equil_frames.len(), num_nodes * VECTOR_STRIDE),
            ("material", buffers.material.len(), num_nodes * MATERIAL_STRIDE),
            ("bending", buffers.bending.len(), num_nodes * BENDING_STRIDE),
        ];
        for (buffer, actual, expected) in expected {
            if actual != expected {
                return Err(BufferError::Length {
                    buffer,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self { buffers, num_nodes })
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.num_nodes.saturating_sub(1)
    }

    /// # Panics
    ///
    /// Panics if `node >= self.num_nodes()`.
    #[inline]
    pub fn position(&self, node: usize) -> Vector3<f64> {
        vector_at(self.buffers.positions, node)
    }

    /// # Panics
    ///
    /// Panics if `node >= self.num_nodes()`.
    #[inline]
    pub fn frame(&self, node: usize) -> Vector3<f64> {
        vector_at(self.buffers.frames, node)
    }

    /// # Panics
    ///
    /// Panics if `node >= self.num_nodes()`.
    #[inline]
    pub fn equil_position(&self, node: usize) -> Vector3<f64> {
        vector_at(self.buffers.equil_positions, node)
    }

    /// # Panics
    ///
    /// Panics if `node >= self.num_nodes()`.
    #[inline]
    pub fn equil_frame(&self, node: usize) -> Vector3<f64> {
        vector_at(self.buffers.equil_frames, node)
    }

    /// # Panics
    ///
    /// Panics if `node >= self.num_nodes()`.
    #[inline]
    pub fn material(&self, node: usize) -> MaterialParams {
        let start = node * MATERIAL_STRIDE;
        MaterialParams::from_slice(&self.buffers.material[start..start + MATERIAL_STRIDE])
    }

    /// # Panics
    ///
    /// Panics if `node >= self.num_nodes()`.
    #[inline]
    pub fn bending(&self, node: usize) -> BendingMatrix {
        let start = node * BENDING_STRIDE;
        BendingMatrix::from_row_major(&self.buffers.bending[start..start + BENDING_STRIDE])
    }

    /// Current segment `index` with its material axis, or `None` past either end.
    pub fn segment(&self, index: usize) -> Option<Segment> {
        (index < self.num_segments()).then(|| {
            Segment::new(
                self.position(index + 1) - self.position(index),
                self.frame(index),
            )
        })
    }

    /// Equilibrium segment `index` with its material axis, or `None` past either end.
    pub fn equil_segment(&self, index: usize) -> Option<Segment> {
        (index < self.num_segments()).then(|| {
            Segment::new(
                self.equil_position(index + 1) - self.equil_position(index),
                self.equil_frame(index),
            )
        })
    }

    pub fn element_length(&self, index: usize) -> Option<f64> {
        self.segment(index).map(|s| s.length())
    }

    /// `r_i + p_i / 2`.
    pub fn element_midpoint(&self, index: usize) -> Option<Vector3<f64>> {
        self.segment(index)
            .map(|s| self.position(index) + 0.5 * s.p)
    }

    /// Mean node position, or `None` for an empty rod.
    pub fn centroid(&self) -> Option<Vector3<f64>> {
        if self.num_nodes == 0 {
            return None;
        }
        let sum: Vector3<f64> = (0..self.num_nodes).map(|i| self.position(i)).sum();
        Some(sum / self.num_nodes as f64)
    }
}

#[inline]
fn vector_at(buffer: &[f64], node: usize) -> Vector3<f64> {
    let start = node * VECTOR_STRIDE;
    Vector3::new(buffer[start], buffer[start + 1], buffer[start + 2])
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OwnedRod {
        positions: Vec<f64>,
        frames: Vec<f64>,
        material: Vec<f64>,
        bending: Vec<f64>,
    }

    impl OwnedRod {
        fn straight(num_nodes: usize) -> Self {
            Self {
                positions: (0..num_nodes).flat_map(|i| [i as f64, 0.0, 0.0]).collect(),
                frames: (0..num_nodes).flat_map(|_| [0.0, 1.0, 0.0]).collect(),
                material: (0..num_nodes).flat_map(|_| [1.0, 2.0, 0.0]).collect(),
                bending: (0..num_nodes).flat_map(|_| [3.0, 0.0, 0.0, 3.0]).collect(),
            }
        }

        fn buffers(&self) -> RodBuffers<'_> {
            RodBuffers {
                positions: &self.positions,
                frames: &self.frames,
                equil_positions: &self.positions,
                equil_frames: &self.frames,
                material: &self.material,
                bending: &self.bending,
            }
        }
    }

    #[test]
    fn new_accepts_consistent_buffers() {
        let rod = OwnedRod::straight(5);
        let view = RodView::new(rod.buffers()).unwrap();
        assert_eq!(view.num_nodes(), 5);
        assert_eq!(view.num_segments(), 4);
    }

    #[test]
    fn new_rejects_ragged_positions() {
        let mut rod = OwnedRod::straight(3);
        rod.positions.pop();
        let result = RodView::new(rod.buffers());
        assert_eq!(result.unwrap_err(), BufferError::Ragged(8));
    }

    #[test]
    fn new_rejects_short_bending_buffer() {
        let mut rod = OwnedRod::straight(3);
        rod.bending.truncate(8);
        let result = RodView::new(rod.buffers());
        assert_eq!(
            result.unwrap_err(),
            BufferError::Length {
                buffer: "bending",
                expected: 12,
                actual: 8
            }
        );
    }

    #[test]
    fn segment_is_difference_of_consecutive_nodes() {
        let rod = OwnedRod::straight(4);
        let view = RodView::new(rod.buffers()).unwrap();
        let s = view.segment(2).unwrap();
        assert_eq!(s.p, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(s.m, Vector3::new(0.0, 1.0, 0.0));
        assert!(view.segment(3).is_none());
        assert!(view.equil_segment(3).is_none());
    }

    #[test]
    fn per_node_parameters_are_read_from_strided_buffers() {
        let rod = OwnedRod::straight(4);
        let view = RodView::new(rod.buffers()).unwrap();
        assert_eq!(view.material(3), MaterialParams::new(1.0, 2.0));
        assert_eq!(view.bending(0), BendingMatrix::diagonal(3.0));
    }

    #[test]
    #[should_panic]
    fn position_past_the_last_node_panics() {
        let rod = OwnedRod::straight(3);
        let view = RodView::new(rod.buffers()).unwrap();
        view.position(3);
    }

    #[test]
    #[should_panic]
    fn bending_past_the_last_node_panics() {
        let rod = OwnedRod::straight(3);
        let view = RodView::new(rod.buffers()).unwrap();
        view.bending(3);
    }

    #[test]
    fn last_node_is_in_range() {
        let rod = OwnedRod::straight(3);
        let view = RodView::new(rod.buffers()).unwrap();
        assert_eq!(view.position(2), Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(view.material(2), MaterialParams::new(1.0, 2.0));
    }

    #[test]
    fn element_helpers_describe_segment_geometry() {
        let rod = OwnedRod::straight(4);
        let view = RodView::new(rod.buffers()).unwrap();
        assert_eq!(view.element_length(1), Some(1.0));
        assert_eq!(view.element_midpoint(1), Some(Vector3::new(1.5, 0.0, 0.0)));
        assert_eq!(view.element_length(3), None);
    }

    #[test]
    fn centroid_is_mean_position() {
        let rod = OwnedRod::straight(5);
        let view = RodView::new(rod.buffers()).unwrap();
        assert_eq!(view.centroid(), Some(Vector3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn centroid_of_empty_rod_is_none() {
        let empty: [f64; 0] = [];
        let view = RodView::new(RodBuffers {
            positions: &empty,
            frames: &empty,
            equil_positions: &empty,
            equil_frames: &empty,
            material: &empty,
            bending: &empty,
        })
        .unwrap();
        assert_eq!(view.centroid(), None);
    }
}
