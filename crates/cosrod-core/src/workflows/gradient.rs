use crate::core::dynamics::{force_from_energy, torque_from_energy};
use crate::core::math::vector::Axis;
use crate::core::models::rod::RodView;
use crate::engine::config::DifferenceScheme;
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::perturbation::{PerturbationDimension, check_node, perturbation_energy};
use nalgebra::Vector3;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Elastic force on a node and torque about its segment axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NodeGradient {
    /// `−∂E/∂r_i`.
    pub force: Vector3<f64>,
    /// `−∂E/∂θ_i`.
    pub torque: f64,
}

/// Forces and torques on every node of the rod.
#[instrument(skip_all, name = "rod_gradient_workflow")]
pub fn run(view: &RodView<'_>, context: &Context<'_>) -> Result<Vec<NodeGradient>, EngineError> {
    info!(
        num_nodes = view.num_nodes(),
        scheme = ?context.config.scheme,
        "Computing finite-difference forces and torques."
    );
    let gradients = (0..view.num_nodes())
        .map(|node| node_gradient(view, node, context))
        .collect::<Result<Vec<_>, _>>()?;

    let net_force: Vector3<f64> = gradients.iter().map(|g| g.force).sum();
    debug!(net_force = ?net_force, "Gradient computed.");
    Ok(gradients)
}

/// Force and torque on a single node.
pub fn node_gradient(
    view: &RodView<'_>,
    node: usize,
    context: &Context<'_>,
) -> Result<NodeGradient, EngineError> {
    check_node(view, node)?;
    let config = context.config;

    let mut force = Vector3::zeros();
    for axis in Axis::ALL {
        let dimension = PerturbationDimension::from(axis);
        let delta = descent(view, node, dimension, config.translation_step, context)?;
        force[axis.index()] = context.check(
            "force",
            force_from_energy(delta, config.translation_step),
        )?;
    }

    let delta = descent(
        view,
        node,
        PerturbationDimension::Twist,
        config.rotation_step,
        context,
    )?;
    let torque = context.check("torque", torque_from_energy(delta, config.rotation_step))?;

    Ok(NodeGradient { force, torque })
}

/// Energy decrease over one step in `dimension`, scaled so that dividing by `step` gives
/// `−∂E/∂q`.
fn descent(
    view: &RodView<'_>,
    node: usize,
    dimension: PerturbationDimension,
    step: f64,
    context: &Context<'_>,
) -> Result<f64, EngineError> {
    let energy_at = |amount: f64| -> Result<f64, EngineError> {
        perturbation_energy(view, node, dimension, amount, context).map(|e| e.total())
    };
    match context.config.scheme {
        DifferenceScheme::Central => Ok((energy_at(-step)? - energy_at(step)?) / 2.0),
        DifferenceScheme::Forward => Ok(energy_at(0.0)? - energy_at(step)?),
    }
}
