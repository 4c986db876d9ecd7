//! Diagnostics: the stream of warnings/errors emitted while loading a file.
//!
//! Mirrors the shape of the teacher's `diag` module (`Database::diag_notations`
//! calls `diag::to_annotations(self.parse_result(), diags)`): diagnostics are
//! collected as plain data during parsing/resolution, and are only rendered
//! to human-readable text on demand, via `annotate-snippets`.

use annotate_snippets::display_list::{DisplayList, FormatOptions};
use annotate_snippets::snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation};

/// Severity of a single diagnostic (spec.md §4.2).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One diagnostic: a position in the input plus a message.
///
/// `line_text` is a short copy of the offending source line, kept only so
/// that the diagnostic can be rendered with `annotate-snippets` without the
/// caller having to re-open the file; it has no effect on load success.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub file: String,
    /// 1-based line number, per spec.md §6.
    pub line: u32,
    /// 0-based column, per spec.md §6.
    pub column: u32,
    pub message: String,
    pub line_text: String,
}

impl Diagnostic {
    pub fn new(
        severity: Severity,
        file: impl Into<String>,
        line: u32,
        column: u32,
        message: impl Into<String>,
        line_text: impl Into<String>,
    ) -> Self {
        Diagnostic {
            severity,
            file: file.into(),
            line,
            column,
            message: message.into(),
            line_text: line_text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Renders this diagnostic as a human-readable, source-located report.
    pub fn render(&self) -> String {
        let annotation_type = match self.severity {
            Severity::Warning => AnnotationType::Warning,
            Severity::Error => AnnotationType::Error,
        };
        let end = (self.column as usize + 1).min(self.line_text.len().max(1));
        let snippet = Snippet {
            title: Some(Annotation {
                label: Some(&self.message),
                id: None,
                annotation_type,
            }),
            footer: vec![],
            slices: vec![Slice {
                source: &self.line_text,
                line_start: self.line as usize,
                origin: Some(&self.file),
                fold: false,
                annotations: vec![SourceAnnotation {
                    label: "",
                    annotation_type,
                    range: (self.column as usize, end),
                }],
            }],
            opt: FormatOptions {
                color: true,
                ..Default::default()
            },
        };
        DisplayList::from(snippet).to_string()
    }
}

/// Callback invoked once per diagnostic as it is produced (spec.md §6).
///
/// The core never aborts on a single diagnostic; the sink is purely an
/// observation point. Any early-exit policy ("stop on first error") is the
/// caller's responsibility, implemented by ignoring the returned `Database`.
pub trait DiagnosticSink {
    fn report(&mut self, diag: &Diagnostic);
}

impl<F: FnMut(&Diagnostic)> DiagnosticSink for F {
    fn report(&mut self, diag: &Diagnostic) {
        self(diag)
    }
}

/// A sink that only accumulates diagnostics, for callers who want to inspect
/// them after the fact rather than react as they stream in.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diag: &Diagnostic) {
        self.diagnostics.push(diag.clone());
    }
}

/// Accumulates diagnostics during a load and tracks the error count that
/// decides, per spec.md §7, whether the whole load fails.
pub struct DiagnosticCollector<'a> {
    sink: &'a mut dyn DiagnosticSink,
    error_count: usize,
    warning_count: usize,
}

impl<'a> DiagnosticCollector<'a> {
    pub fn new(sink: &'a mut dyn DiagnosticSink) -> Self {
        DiagnosticCollector {
            sink,
            error_count: 0,
            warning_count: 0,
        }
    }

    pub fn emit(&mut self, diag: Diagnostic) {
        match diag.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        log::debug!(
            "{:?} {}:{}:{}: {}",
            diag.severity,
            diag.file,
            diag.line,
            diag.column,
            diag.message
        );
        self.sink.report(&diag);
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn had_errors(&self) -> bool {
        self.error_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_does_not_panic() {
        let d = Diagnostic::new(
            Severity::Error,
            "test.dbg",
            3,
            5,
            "missing required attribute `id`",
            "sym name=\"foo\",type=lab",
        );
        let rendered = d.render();
        assert!(rendered.contains("missing required attribute"));
    }

    #[test]
    fn collector_counts_errors_and_warnings() {
        let mut sink = CollectingSink::default();
        {
            let mut collector = DiagnosticCollector::new(&mut sink);
            collector.emit(Diagnostic::new(Severity::Warning, "a", 1, 0, "w", ""));
            collector.emit(Diagnostic::new(Severity::Error, "a", 2, 0, "e", ""));
            assert_eq!(collector.warning_count(), 1);
            assert_eq!(collector.error_count(), 1);
            assert!(collector.had_errors());
        }
        assert_eq!(sink.diagnostics.len(), 2);
    }
}
