use cosrod::engine::diagnostics::{Diagnostic, DiagnosticCallback, DiagnosticReporter};
use tracing::{trace, warn};

/// Forwards engine diagnostics to the `tracing` subscriber. Progress events go out at
/// TRACE, rejections at WARN.
pub struct CliDiagnosticHandler;

impl CliDiagnosticHandler {
    pub fn get_callback() -> DiagnosticCallback<'static> {
        Box::new(|diagnostic: Diagnostic| match diagnostic {
            Diagnostic::WindowLoaded {
                node,
                first_segment,
                last_segment,
            } => trace!(node, first_segment, last_segment, "Window loaded."),
            Diagnostic::Perturbed {
                node,
                dimension,
                amount,
            } => trace!(node, ?dimension, amount, "Perturbation applied."),
            Diagnostic::Term { kind, index, value } => {
                trace!(term = kind.label(), index, value, "Energy term.")
            }
            Diagnostic::Rejected { label, value } => {
                warn!(label, value, "Non-finite value rejected by validation.")
            }
        })
    }

    /// A reporter wired to the callback. The subscriber's level filter decides what is kept.
    pub fn reporter() -> DiagnosticReporter<'static> {
        DiagnosticReporter::with_callback(Self::get_callback())
    }
}
