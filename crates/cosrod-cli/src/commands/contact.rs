use crate::cli::{ContactArgs, OutputFormat};
use crate::config::{PartialConfig, RodFile};
use crate::error::{CliError, Result};
use crate::utils::diagnostics::CliDiagnosticHandler;
use cosrod::core::models::rod::RodView;
use cosrod::core::sterics::Element;
use cosrod::engine::context::Context;
use cosrod::workflows::contact::{self, ContactReport, element_of};
use std::fmt::Write;
use tracing::info;

pub fn run(args: ContactArgs) -> Result<()> {
    let mut partial_config = PartialConfig::load(&args.evaluation)?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args.evaluation)?;
    let sterics = partial_config.steric_settings(&args)?;

    info!("Loading first rod from {:?}", &args.first);
    let first = RodFile::from_file(&args.first)?;
    let second = match &args.second {
        Some(path) => {
            info!("Loading second rod from {:?}", path);
            Some(RodFile::from_file(path)?)
        }
        None => None,
    };
    let first_view = first.view()?;
    let second_view = match &second {
        Some(rod) => rod.view()?,
        None => first_view,
    };

    let a = element(&first_view, args.element_a, sterics.radius, "--element-a")?;
    let b = element(&second_view, args.element_b, sterics.radius, "--element-b")?;

    let reporter = CliDiagnosticHandler::reporter();
    let report = contact::run(
        &a,
        &b,
        sterics.force_constant,
        &Context::new(&config, &reporter),
    )?;
    info!(energy = report.energy, "Contact workflow finished.");

    let text = match args.evaluation.format {
        OutputFormat::Table => format_report(&report),
        OutputFormat::Toml => super::to_toml(&report)?,
    };
    print!("{}", text);
    Ok(())
}

fn element(view: &RodView<'_>, index: usize, radius: f64, flag: &str) -> Result<Element> {
    element_of(view, index, radius).ok_or_else(|| {
        CliError::Argument(format!(
            "{} {} is out of range for a rod with {} elements",
            flag,
            index,
            view.num_segments()
        ))
    })
}

fn format_report(report: &ContactReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Closest point on a:  {}", point(report.c_a.as_slice()));
    let _ = writeln!(out, "Closest point on b:  {}", point(report.c_b.as_slice()));
    let _ = writeln!(out, "Separation:          {:.8e}", report.separation);
    let _ = writeln!(out, "Skew distance:       {:.8e}", report.skew_distance);
    let _ = writeln!(out, "Overlap:             {:.8e}", report.overlap);
    let _ = writeln!(out, "Overlap volume:      {:.8e}", report.overlap_volume);
    let _ = writeln!(out, "Steric energy:       {:.8e}", report.energy);
    let _ = writeln!(
        out,
        "Force on b:          {}",
        point(report.force_on_b.as_slice())
    );
    out
}

fn point(v: &[f64]) -> String {
    format!("({:.6}, {:.6}, {:.6})", v[0], v[1], v[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROD: &str = r#"
        [current]
        positions = [[-1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, -1.0, 3.0], [0.0, 1.0, 3.0]]
        frames = [[0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0]]

        [material]
        stretch = 1.0
        twist = 1.0
        bending = 1.0
    "#;

    #[test]
    fn elements_are_read_from_their_start_node() {
        let rod = RodFile::from_toml_str(ROD).unwrap();
        let view = rod.view().unwrap();
        let b = element(&view, 2, 2.0, "--element-b").unwrap();
        assert_eq!(b.r.as_slice(), &[0.0, -1.0, 3.0]);
        assert_eq!(b.p.as_slice(), &[0.0, 2.0, 0.0]);
    }

    #[test]
    fn out_of_range_element_is_an_argument_error() {
        let rod = RodFile::from_toml_str(ROD).unwrap();
        let view = rod.view().unwrap();
        assert!(matches!(
            element(&view, 3, 1.0, "--element-a"),
            Err(CliError::Argument(msg)) if msg.contains("--element-a 3")
        ));
    }

    #[test]
    fn report_prints_energy_and_force() {
        let rod = RodFile::from_toml_str(ROD).unwrap();
        let view = rod.view().unwrap();
        let a = element(&view, 0, 2.0, "--element-a").unwrap();
        let b = element(&view, 2, 2.0, "--element-b").unwrap();
        let config = cosrod::engine::config::EvaluationConfig::default();
        let reporter = cosrod::engine::diagnostics::DiagnosticReporter::new();
        let report = contact::run(&a, &b, 5.0, &Context::new(&config, &reporter)).unwrap();

        let text = format_report(&report);
        assert!(text.contains("Steric energy:       5.00000000e0"));
        assert!(text.contains("Closest point on b:  (0.000000, 0.000000, 3.000000)"));
    }

    #[test]
    fn toml_output_has_every_report_field() {
        let rod = RodFile::from_toml_str(ROD).unwrap();
        let view = rod.view().unwrap();
        let a = element(&view, 0, 2.0, "--element-a").unwrap();
        let b = element(&view, 2, 2.0, "--element-b").unwrap();
        let config = cosrod::engine::config::EvaluationConfig::default();
        let reporter = cosrod::engine::diagnostics::DiagnosticReporter::new();
        let report = contact::run(&a, &b, 5.0, &Context::new(&config, &reporter)).unwrap();

        let text = super::super::to_toml(&report).unwrap();
        let table: toml::Table = toml::from_str(&text).unwrap();
        assert_eq!(table["energy"].as_float(), Some(report.energy));
        assert_eq!(table["separation"].as_float(), Some(report.separation));
        let c_b = table["c_b"].as_array().unwrap();
        assert!((c_b[2].as_float().unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(table["force_on_b"].as_array().unwrap().len(), 3);
    }
}
