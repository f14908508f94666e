use crate::cli::{EnergyArgs, OutputFormat};
use crate::config::{PartialConfig, RodFile};
use crate::error::Result;
use crate::utils::diagnostics::CliDiagnosticHandler;
use cosrod::engine::context::Context;
use cosrod::workflows::energy::{self, RodEnergyReport};
use std::fmt::Write;
use tracing::info;

pub fn run(args: EnergyArgs) -> Result<()> {
    let mut partial_config = PartialConfig::load(&args.evaluation)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args.evaluation)?;

    info!("Loading rod from {:?}", &args.input);
    let rod = RodFile::from_file(&args.input)?;
    let view = rod.view()?;

    let reporter = CliDiagnosticHandler::reporter();
    let report = energy::run(&view, &Context::new(&config, &reporter))?;
    info!(total = report.total.total(), "Energy workflow finished.");

    let text = match args.evaluation.format {
        OutputFormat::Table => format_report(&report, args.per_node),
        OutputFormat::Toml => super::to_toml(&report)?,
    };
    print!("{}", text);
    Ok(())
}

fn format_report(report: &RodEnergyReport, per_node: bool) -> String {
    let mut out = String::new();
    let total = &report.total;
    let _ = writeln!(out, "Elastic energy of {} nodes:", report.per_node.len());
    let _ = writeln!(out, "  bend    {:>16.8e}", total.bend);
    let _ = writeln!(out, "  stretch {:>16.8e}", total.stretch);
    let _ = writeln!(out, "  twist   {:>16.8e}", total.twist);
    let _ = writeln!(out, "  total   {:>16.8e}", total.total());

    if per_node {
        let _ = writeln!(
            out,
            "\n{:>6} {:>16} {:>16} {:>16}",
            "node", "bend", "stretch", "twist"
        );
        for (node, energy) in report.per_node.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>6} {:>16.8e} {:>16.8e} {:>16.8e}",
                node, energy.bend, energy.stretch, energy.twist
            );
        }
    }
    out
}
