use crate::core::elastics::energy::Joint;
use crate::core::elastics::params::{BendingMatrix, MaterialParams};
use crate::core::math::vector::normalize;
use crate::core::models::rod::RodView;
use crate::core::models::segment::Segment;
use nalgebra::Vector3;

pub(crate) const WINDOW_SIZE: usize = 4;

/// One segment of the window with the parameters of its start node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WindowSlot {
    /// Segment vector as loaded, before any perturbation.
    pub original: Vector3<f64>,
    pub current: Segment,
    pub equil: Segment,
    pub material: MaterialParams,
    pub bending: BendingMatrix,
}

/// Local copy of segments `node − 2 ..= node + 1`.
///
/// Slot `j` holds segment `node − 2 + j`, or `None` when that segment lies outside the rod.
#[derive(Debug, Clone)]
pub(crate) struct Window {
    node: usize,
    slots: [Option<WindowSlot>; WINDOW_SIZE],
}

impl Window {
    pub fn load(view: &RodView<'_>, node: usize) -> Self {
        let slots = std::array::from_fn(|j| {
            let segment = (node + j).checked_sub(2)?;
            let current = view.segment(segment)?;
            let equil = view.equil_segment(segment)?;
            Some(WindowSlot {
                original: current.p,
                current,
                equil,
                material: view.material(segment),
                bending: view.bending(segment),
            })
        });
        Self { node, slots }
    }

    fn slot_index(&self, segment: usize) -> Option<usize> {
        (segment + 2)
            .checked_sub(self.node)
            .filter(|&j| j < WINDOW_SIZE)
    }

    pub fn get(&self, segment: usize) -> Option<&WindowSlot> {
        self.slot_index(segment)
            .and_then(|j| self.slots[j].as_ref())
    }

    pub fn get_mut(&mut self, segment: usize) -> Option<&mut WindowSlot> {
        self.slot_index(segment)
            .and_then(|j| self.slots[j].as_mut())
    }

    /// First and last segment index present in the window.
    pub fn segment_range(&self) -> Option<(usize, usize)> {
        let mut present = (0..WINDOW_SIZE)
            .filter(|&j| self.slots[j].is_some())
            .map(|j| self.node + j - 2);
        let first = present.next()?;
        let last = present.last().unwrap_or(first);
        Some((first, last))
    }

    /// The joint at node `k` (segments `k − 1` and `k`) with the slot carrying node `k`'s
    /// parameters, if both segments are in the window.
    pub fn joint(&self, k: usize) -> Option<(Joint, &WindowSlot)> {
        let prev = self.get(k.checked_sub(1)?)?;
        let next = self.get(k)?;
        let joint = Joint::new(prev.current, next.current, prev.equil, next.equil);
        Some((joint, next))
    }

    pub fn normalize_frames(&mut self) {
        for slot in self.slots.iter_mut().flatten() {
            slot.current.m = normalize(&slot.current.m);
            slot.equil.m = normalize(&slot.equil.m);
        }
    }
}
