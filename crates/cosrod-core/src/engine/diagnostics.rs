use super::perturbation::PerturbationDimension;

/// Structured trace of one perturbation evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    WindowLoaded {
        node: usize,
        first_segment: usize,
        last_segment: usize,
    },
    Perturbed {
        node: usize,
        dimension: PerturbationDimension,
        amount: f64,
    },
    Term {
        kind: TermKind,
        /// Segment index for stretch, joint node index for twist and bend.
        index: usize,
        value: f64,
    },
    Rejected {
        label: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Stretch,
    Twist,
    Bend,
}

impl TermKind {
    pub fn label(self) -> &'static str {
        match self {
            TermKind::Stretch => "stretch",
            TermKind::Twist => "twist",
            TermKind::Bend => "bend",
        }
    }
}

pub type DiagnosticCallback<'a> = Box<dyn Fn(Diagnostic) + Send + Sync + 'a>;

/// Sink for [`Diagnostic`] events. Without a callback every report is a no-op.
#[derive(Default)]
pub struct DiagnosticReporter<'a> {
    callback: Option<DiagnosticCallback<'a>>,
}

impl<'a> DiagnosticReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: DiagnosticCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.callback.is_some()
    }

    #[inline]
    pub fn report(&self, event: Diagnostic) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_inactive() {
        let reporter = DiagnosticReporter::new();
        assert!(!reporter.is_active());
        reporter.report(Diagnostic::Rejected {
            label: "bend",
            value: f64::NAN,
        });
    }

    #[test]
    fn reporter_forwards_events_to_callback() {
        let seen = Mutex::new(Vec::new());
        let reporter = DiagnosticReporter::with_callback(Box::new(|event| {
            seen.lock().unwrap().push(event);
        }));
        assert!(reporter.is_active());
        reporter.report(Diagnostic::Term {
            kind: TermKind::Stretch,
            index: 2,
            value: 0.5,
        });
        drop(reporter);
        let seen = seen.into_inner().unwrap();
        assert_eq!(
            seen,
            vec![Diagnostic::Term {
                kind: TermKind::Stretch,
                index: 2,
                value: 0.5
            }]
        );
    }

    #[test]
    fn term_kind_labels_are_lowercase_names() {
        assert_eq!(TermKind::Stretch.label(), "stretch");
        assert_eq!(TermKind::Twist.label(), "twist");
        assert_eq!(TermKind::Bend.label(), "bend");
    }
}
