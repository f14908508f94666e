use crate::cli::{ForcesArgs, OutputFormat};
use crate::config::{PartialConfig, RodFile};
use crate::error::Result;
use crate::utils::diagnostics::CliDiagnosticHandler;
use cosrod::engine::context::Context;
use cosrod::workflows::gradient::{self, NodeGradient};
use serde::Serialize;
use std::fmt::Write;
use tracing::info;

pub fn run(args: ForcesArgs) -> Result<()> {
    let mut partial_config = PartialConfig::load(&args.evaluation)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args.evaluation)?;

    info!("Loading rod from {:?}", &args.input);
    let rod = RodFile::from_file(&args.input)?;
    let view = rod.view()?;

    let reporter = CliDiagnosticHandler::reporter();
    let gradients = gradient::run(&view, &Context::new(&config, &reporter))?;
    info!(
        num_nodes = gradients.len(),
        "Gradient workflow finished."
    );

    let text = match args.evaluation.format {
        OutputFormat::Table => format_gradients(&gradients),
        OutputFormat::Toml => super::to_toml(&GradientDocument { nodes: &gradients })?,
    };
    print!("{}", text);
    Ok(())
}

/// `[[nodes]]` entries in node order.
#[derive(Serialize)]
struct GradientDocument<'a> {
    nodes: &'a [NodeGradient],
}

fn format_gradients(gradients: &[NodeGradient]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>6} {:>16} {:>16} {:>16} {:>16}",
        "node", "fx", "fy", "fz", "torque"
    );
    for (node, g) in gradients.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>6} {:>16.8e} {:>16.8e} {:>16.8e} {:>16.8e}",
            node, g.force.x, g.force.y, g.force.z, g.torque
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_force_components_and_torque() {
        let mut g = NodeGradient::default();
        g.force.x = 0.5;
        g.torque = -2.0;
        let text = format_gradients(&[NodeGradient::default(), g]);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("torque"));
        let last: Vec<_> = lines[2].split_whitespace().collect();
        assert_eq!(last, ["1", "5.00000000e-1", "0.00000000e0", "0.00000000e0", "-2.00000000e0"]);
    }

    #[test]
    fn toml_output_lists_one_table_per_node() {
        let mut g = NodeGradient::default();
        g.force.z = -1.5;
        g.torque = 0.25;
        let gradients = [NodeGradient::default(), g];
        let text = super::super::to_toml(&GradientDocument { nodes: &gradients }).unwrap();

        let table: toml::Table = toml::from_str(&text).unwrap();
        let nodes = table["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        let force = nodes[1]["force"].as_array().unwrap();
        assert_eq!(force.len(), 3);
        assert_eq!(force[2].as_float(), Some(-1.5));
        assert_eq!(nodes[1]["torque"].as_float(), Some(0.25));
    }
}
