//! Energy of a single perturbed degree of freedom.
//!
//! Moving node `i` changes segments `i − 1` and `i`; rotating its frame changes segment
//! `i`. Those segments enter two stretch terms and the twist and bend terms at joints
//! `i − 1`, `i` and `i + 1`, so only the window `i − 2 ..= i + 1` is ever read. Near the
//! rod ends the terms whose segments do not exist are skipped.

use super::context::Context;
use super::diagnostics::{Diagnostic, TermKind};
use super::error::EngineError;
use super::window::Window;
use crate::core::elastics::energy::ElasticCalculator;
use crate::core::elastics::term::ElasticEnergy;
use crate::core::math::frame::update_material_frame;
use crate::core::math::vector::{Axis, rodrigues_rotate};
use crate::core::models::rod::RodView;
use serde::{Deserialize, Serialize};

/// Smallest rod the perturbation window supports.
pub const MIN_NODES: usize = 4;

/// A degree of freedom of a node: its three coordinates and the twist of its frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PerturbationDimension {
    X,
    Y,
    Z,
    Twist,
}

impl PerturbationDimension {
    pub const ALL: [PerturbationDimension; 4] = [
        PerturbationDimension::X,
        PerturbationDimension::Y,
        PerturbationDimension::Z,
        PerturbationDimension::Twist,
    ];

    /// The translation axis, or `None` for [`PerturbationDimension::Twist`].
    pub fn axis(self) -> Option<Axis> {
        match self {
            PerturbationDimension::X => Some(Axis::X),
            PerturbationDimension::Y => Some(Axis::Y),
            PerturbationDimension::Z => Some(Axis::Z),
            PerturbationDimension::Twist => None,
        }
    }
}

impl From<Axis> for PerturbationDimension {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::X => PerturbationDimension::X,
            Axis::Y => PerturbationDimension::Y,
            Axis::Z => PerturbationDimension::Z,
        }
    }
}

/// Rejects rods too short for the window and nodes past the end.
pub fn check_node(view: &RodView<'_>, node: usize) -> Result<(), EngineError> {
    let num_nodes = view.num_nodes();
    if num_nodes < MIN_NODES {
        return Err(EngineError::InvalidConfiguration(format!(
            "a rod needs at least {MIN_NODES} nodes, got {num_nodes}"
        )));
    }
    if node >= num_nodes {
        return Err(EngineError::NodeOutOfRange { node, num_nodes });
    }
    Ok(())
}

/// Elastic energy of the terms touching `node` after perturbing it by `amount` in `dimension`.
///
/// Returns `(bend, stretch, twist)` summed over every term whose segments exist. The
/// rod buffers are never modified.
pub fn perturbation_energy(
    view: &RodView<'_>,
    node: usize,
    dimension: PerturbationDimension,
    amount: f64,
    context: &Context<'_>,
) -> Result<ElasticEnergy, EngineError> {
    check_node(view, node)?;

    let mut window = Window::load(view, node);
    if let Some((first_segment, last_segment)) = window.segment_range() {
        context.report(Diagnostic::WindowLoaded {
            node,
            first_segment,
            last_segment,
        });
    }

    if amount != 0.0 {
        apply_perturbation(&mut window, node, dimension, amount);
        context.report(Diagnostic::Perturbed {
            node,
            dimension,
            amount,
        });
    }
    window.normalize_frames();

    sum_terms(&window, node, context)
}

fn apply_perturbation(
    window: &mut Window,
    node: usize,
    dimension: PerturbationDimension,
    amount: f64,
) {
    match dimension.axis() {
        Some(axis) => {
            let offset = axis.unit() * amount;
            if let Some(slot) = node.checked_sub(1).and_then(|s| window.get_mut(s)) {
                slot.current.p += offset;
                slot.current.m = update_material_frame(&slot.current.m, &slot.original, &slot.current.p);
            }
            if let Some(slot) = window.get_mut(node) {
                slot.current.p -= offset;
                slot.current.m = update_material_frame(&slot.current.m, &slot.original, &slot.current.p);
            }
        }
        None => {
            if let Some(slot) = window.get_mut(node) {
                slot.current.m = rodrigues_rotate(&slot.current.m, &slot.current.p, amount);
            }
        }
    }
}

fn sum_terms(
    window: &Window,
    node: usize,
    context: &Context<'_>,
) -> Result<ElasticEnergy, EngineError> {
    let mut energy = ElasticEnergy::default();

    for segment in [node.checked_sub(1), Some(node)].into_iter().flatten() {
        if let Some(slot) = window.get(segment) {
            let value = ElasticCalculator::stretch(&slot.material, &slot.current, &slot.equil);
            energy.stretch += record(context, TermKind::Stretch, segment, value)?;
        }
    }

    for joint_node in [node.checked_sub(1), Some(node), Some(node + 1)]
        .into_iter()
        .flatten()
    {
        if let Some((joint, params)) = window.joint(joint_node) {
            let twist = ElasticCalculator::twist(&params.material, &joint);
            energy.twist += record(context, TermKind::Twist, joint_node, twist)?;

            let bend = ElasticCalculator::bend(&params.bending, &joint);
            energy.bend += record(context, TermKind::Bend, joint_node, bend)?;
        }
    }

    Ok(energy)
}

fn record(
    context: &Context<'_>,
    kind: TermKind,
    index: usize,
    value: f64,
) -> Result<f64, EngineError> {
    let value = context.check(kind.label(), value)?;
    context.report(Diagnostic::Term { kind, index, value });
    Ok(value)
}
