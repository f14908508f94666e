use super::config::EvaluationConfig;
use super::diagnostics::{Diagnostic, DiagnosticReporter};
use super::error::EngineError;

/// Everything an engine call needs besides the rod itself.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config: &'a EvaluationConfig,
    pub reporter: &'a DiagnosticReporter<'a>,
}

impl<'a> Context<'a> {
    pub fn new(config: &'a EvaluationConfig, reporter: &'a DiagnosticReporter<'a>) -> Self {
        Self { config, reporter }
    }

    /// Screens `value` with the configured validation policy, reporting rejections.
    pub fn check(&self, label: &'static str, value: f64) -> Result<f64, EngineError> {
        self.config.validation.check(label, value).inspect_err(|_| {
            self.reporter.report(Diagnostic::Rejected { label, value });
        })
    }

    #[inline]
    pub fn report(&self, event: Diagnostic) {
        self.reporter.report(event);
    }
}
