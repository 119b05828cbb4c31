use ariadne::{Label, Report, ReportKind, Source};

use crate::{Diagnostic, Severity};

impl From<Severity> for ReportKind<'static> {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error | Severity::CompilerInternal => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Info => ReportKind::Advice,
        }
    }
}

/// Renders `diagnostic` as a colored, source-annotated report against
/// `source_content`, the way a terminal front end would show it to a user.
///
/// Diagnostics with no primary span (the `CompilerInternal` family) fall
/// back to the plain `[severity] message` line, since ariadne has nothing to
/// anchor a label to.
pub fn render_with_source(source_name: &str, source_content: &str, diagnostic: &Diagnostic) -> String {
    let Some(span) = diagnostic.span else {
        return format!("[{}] {}", diagnostic.severity, diagnostic.message);
    };

    let mut buffer = Vec::new();
    let mut report = Report::build(diagnostic.severity.into(), (source_name, span.to_range()))
        .with_message(&diagnostic.message)
        .with_label(
            Label::new((source_name, span.to_range())).with_message(&diagnostic.message),
        );

    for (related_span, note) in &diagnostic.related {
        report = report.with_label(
            Label::new((source_name, related_span.to_range())).with_message(note),
        );
    }

    report
        .finish()
        .write((source_name, Source::from(source_content)), &mut buffer)
        .expect("writing to an in-memory buffer cannot fail");

    String::from_utf8(buffer).expect("ariadne only emits UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DiagnosticCode, DiagnosticSink};

    #[test]
    fn rendering_a_spanned_diagnostic_includes_the_message() {
        let mut sink = DiagnosticSink::new();
        sink.error(DiagnosticCode::VarRefNotDefined, crate::Span::new(0, 1), &["x"]);
        let diagnostic = &sink.diagnostics()[0];
        let rendered = render_with_source("test.src", "x", diagnostic);
        assert!(rendered.contains("not defined"));
    }

    #[test]
    fn rendering_a_spanless_diagnostic_falls_back_to_plain_text() {
        let mut sink = DiagnosticSink::new();
        sink.compiler_internal(DiagnosticCode::AddSymbolNoScope, &[]);
        let diagnostic = &sink.diagnostics()[0];
        let rendered = render_with_source("test.src", "", diagnostic);
        assert!(rendered.starts_with("[internal error]"));
    }
}
