use crate::core::elastics::energy::{ElasticCalculator, Joint};
use crate::core::elastics::term::ElasticEnergy;
use crate::core::models::rod::RodView;
use crate::engine::context::Context;
use crate::engine::diagnostics::{Diagnostic, TermKind};
use crate::engine::error::EngineError;
use serde::Serialize;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RodEnergyReport {
    pub total: ElasticEnergy,
    /// Stretch of segment `i` and the twist and bend at joint `i`, attributed to node `i`.
    pub per_node: Vec<ElasticEnergy>,
}

/// Elastic energy of the whole rod with every term counted once.
#[instrument(skip_all, name = "rod_energy_workflow")]
pub fn run(view: &RodView<'_>, context: &Context<'_>) -> Result<RodEnergyReport, EngineError> {
    let num_nodes = view.num_nodes();
    if num_nodes < 2 {
        return Err(EngineError::InvalidConfiguration(format!(
            "a rod needs at least 2 nodes, got {num_nodes}"
        )));
    }
    info!(num_nodes, "Computing whole-rod elastic energy.");

    let mut per_node = vec![ElasticEnergy::default(); num_nodes];

    for (segment, energy) in per_node.iter_mut().enumerate().take(view.num_segments()) {
        if let (Some(current), Some(equil)) = (view.segment(segment), view.equil_segment(segment)) {
            let value = ElasticCalculator::stretch(&view.material(segment), &current, &equil);
            energy.stretch = checked(context, TermKind::Stretch, segment, value)?;
        }
    }

    for joint_node in 1..view.num_segments() {
        let Some(joint) = joint_at(view, joint_node) else {
            continue;
        };
        let twist = ElasticCalculator::twist(&view.material(joint_node), &joint);
        let bend = ElasticCalculator::bend(&view.bending(joint_node), &joint);
        let energy = &mut per_node[joint_node];
        energy.twist = checked(context, TermKind::Twist, joint_node, twist)?;
        energy.bend = checked(context, TermKind::Bend, joint_node, bend)?;
    }

    let total: ElasticEnergy = per_node.iter().copied().sum();
    debug!(
        bend = total.bend,
        stretch = total.stretch,
        twist = total.twist,
        "Whole-rod energy computed."
    );
    Ok(RodEnergyReport { total, per_node })
}

/// The joint at node `k` between segments `k − 1` and `k`, with normalized frames.
pub(crate) fn joint_at(view: &RodView<'_>, k: usize) -> Option<Joint> {
    let prev = view.segment(k.checked_sub(1)?)?.with_normalized_frame();
    let next = view.segment(k)?.with_normalized_frame();
    let prev_equil = view.equil_segment(k - 1)?.with_normalized_frame();
    let next_equil = view.equil_segment(k)?.with_normalized_frame();
    Some(Joint::new(prev, next, prev_equil, next_equil))
}

fn checked(
    context: &Context<'_>,
    kind: TermKind,
    index: usize,
    value: f64,
) -> Result<f64, EngineError> {
    let value = context.check(kind.label(), value)?;
    context.report(Diagnostic::Term { kind, index, value });
    Ok(value)
}
