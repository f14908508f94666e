use crate::core::math::vector::Axis;
use crate::core::models::rod::RodView;
use crate::core::sterics::{
    Element, connecting_line, skew_distance, sphere_intersection_volume, steric_overlap,
    steric_perturbation_energy,
};
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use nalgebra::Vector3;
use serde::Serialize;
use tracing::{debug, instrument};

/// Steric state of one pair of rod elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContactReport {
    /// End of the connecting line on element `a`.
    pub c_a: Vector3<f64>,
    /// End of the connecting line on element `b`.
    pub c_b: Vector3<f64>,
    /// `|c_b − c_a|`.
    pub separation: f64,
    pub skew_distance: f64,
    pub overlap: f64,
    /// Volume shared by spheres of the element radii centred on `c_a` and `c_b`.
    pub overlap_volume: f64,
    pub energy: f64,
    /// `−∂U/∂r_b`, the steric force on element `b`.
    pub force_on_b: Vector3<f64>,
}

/// Element `index` of a rod as a finite-radius segment.
pub fn element_of(view: &RodView<'_>, index: usize, radius: f64) -> Option<Element> {
    view.segment(index)
        .map(|s| Element::new(view.position(index), s.p, radius))
}

#[instrument(skip_all, name = "contact_workflow")]
pub fn run(
    a: &Element,
    b: &Element,
    force_constant: f64,
    context: &Context<'_>,
) -> Result<ContactReport, EngineError> {
    let (c_a, c_b) = connecting_line(a, b)?;
    let separation = context.check("separation", (c_b - c_a).norm())?;
    let skew_distance = context.check("skew_distance", skew_distance(a, b)?)?;
    let overlap = steric_overlap(separation, a.radius, b.radius);
    let overlap_volume = sphere_intersection_volume(separation, a.radius, b.radius);
    let energy = context.check("steric", force_constant * overlap)?;

    let step = context.config.translation_step;
    let mut force_on_b = Vector3::zeros();
    for axis in Axis::ALL {
        let minus = steric_perturbation_energy(-step, axis, force_constant, a, b)?;
        let plus = steric_perturbation_energy(step, axis, force_constant, a, b)?;
        force_on_b[axis.index()] = context.check("steric_force", (minus - plus) / (2.0 * step))?;
    }

    debug!(separation, overlap, energy, "Contact evaluated.");
    Ok(ContactReport {
        c_a,
        c_b,
        separation,
        skew_distance,
        overlap,
        overlap_volume,
        energy,
        force_on_b,
    })
}
