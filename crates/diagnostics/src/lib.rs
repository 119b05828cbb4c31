//! Diagnostic data model shared by every stage of the pipeline: the source
//! span type, severities, the message catalog (with English/Japanese
//! localization), and a sink that stages accumulate diagnostics into.
//!
//! Nothing in this crate is a process-wide singleton: a [`DiagnosticSink`] is
//! a plain value a caller constructs and threads by `&mut` reference through
//! whichever stages it wants to observe.

mod catalog;
mod reporting;

pub use catalog::DiagnosticCode;
pub use reporting::render_with_source;

/// A half-open byte range into the originating source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// The display language for diagnostic message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Ja,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "ja" => Ok(Self::Ja),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// How serious a diagnostic is, and what it implies for the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
    /// An invariant internal to the compiler was violated rather than a
    /// fault in the input program. Always reported and always aborts the
    /// run; never batched alongside ordinary source diagnostics.
    CompilerInternal,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::CompilerInternal => "internal error",
        };
        f.write_str(s)
    }
}

/// A single fully-rendered diagnostic: a code, a severity, the message text
/// already substituted for the language the sink was set to at the time it
/// was raised, and an optional primary span plus any related spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    pub span: Option<Span>,
    pub related: Vec<(Span, String)>,
}

impl Diagnostic {
    pub fn with_related(mut self, span: Span, note: impl Into<String>) -> Self {
        self.related.push((span, note.into()));
        self
    }
}

/// Replaces `%0`, `%1`, ... placeholders in `template` with `args` in order.
///
/// Mirrors the substitution loop of the reference implementation's
/// `formatErrorMessage`: each argument is looked up by its positional index
/// and spliced in verbatim, left to right.
fn format_template(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        let placeholder = format!("%{i}");
        out = out.replace(&placeholder, arg);
    }
    out
}

/// Accumulates diagnostics for a single compilation run.
///
/// Owned by the driver and passed by `&mut` into each pipeline stage, per
/// the single-threaded, explicitly-threaded-sink design of this project
/// (no process-wide diagnostic singleton).
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSink {
    language: Language,
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Renders `code`'s template for the sink's current language,
    /// substituting `args`, and records it at `severity`.
    pub fn raise(
        &mut self,
        severity: Severity,
        code: DiagnosticCode,
        span: Option<Span>,
        args: &[&str],
    ) -> &Diagnostic {
        let template = code.template(self.language);
        let message = format_template(template, args);
        let diagnostic = Diagnostic {
            severity,
            code,
            message,
            span,
            related: Vec::new(),
        };
        match severity {
            Severity::Error | Severity::CompilerInternal => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => {}
        }
        self.diagnostics.push(diagnostic);
        self.diagnostics.last().unwrap()
    }

    pub fn error(&mut self, code: DiagnosticCode, span: Span, args: &[&str]) -> &Diagnostic {
        self.raise(Severity::Error, code, Some(span), args)
    }

    pub fn warning(&mut self, code: DiagnosticCode, span: Span, args: &[&str]) -> &Diagnostic {
        self.raise(Severity::Warning, code, Some(span), args)
    }

    pub fn compiler_internal(&mut self, code: DiagnosticCode, args: &[&str]) -> &Diagnostic {
        self.raise(Severity::CompilerInternal, code, None, args)
    }

    /// Records an already-formatted message with no catalog code (spec.md
    /// §4.1's `report_raw`), for text assembled by the caller rather than
    /// selected from the template catalog — e.g. wrapping an I/O error as a
    /// diagnostic.
    pub fn report_raw(&mut self, text: impl Into<String>, severity: Severity, span: Option<Span>) -> &Diagnostic {
        let diagnostic = Diagnostic {
            severity,
            code: DiagnosticCode::Raw,
            message: text.into(),
            span,
            related: Vec::new(),
        };
        match severity {
            Severity::Error | Severity::CompilerInternal => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
            Severity::Info => {}
        }
        self.diagnostics.push(diagnostic);
        self.diagnostics.last().unwrap()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticSink) {
        self.error_count += other.error_count;
        self.warning_count += other.warning_count;
        self.diagnostics.extend(other.diagnostics);
    }

    /// Formats every diagnostic as `[severity] code: message`, one per line,
    /// with no source-snippet decoration (the plain form of §6.3).
    pub fn summary(&self) -> String {
        let mut out = String::new();
        for d in &self.diagnostics {
            out.push_str(&format!("[{}] {:?}: {}\n", d.severity, d.code, d.message));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_template_substitutes_positional_args() {
        let out = format_template("Symbol '%0' is already defined in this scope.", &["x"]);
        assert_eq!(out, "Symbol 'x' is already defined in this scope.");
    }

    #[test]
    fn format_template_handles_multiple_args_in_order() {
        let out = format_template("Function '%0' expects %1 arguments, but %2 were provided.", &["f", "2", "3"]);
        assert_eq!(out, "Function 'f' expects 2 arguments, but 3 were provided.");
    }

    #[test]
    fn sink_tracks_error_and_warning_counts_independently() {
        let mut sink = DiagnosticSink::new();
        sink.error(DiagnosticCode::VarDeclSymbolAlreadyDefined, Span::new(0, 1), &["x"]);
        sink.warning(DiagnosticCode::ExprStmtNoExpr, Span::new(2, 3), &[]);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(sink.warning_count(), 1);
        assert!(sink.has_errors());
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn japanese_template_is_selected_when_language_is_set() {
        let mut sink = DiagnosticSink::new();
        sink.set_language(Language::Ja);
        let d = sink.error(DiagnosticCode::VarDeclSymbolAlreadyDefined, Span::new(0, 1), &["x"]);
        assert!(d.message.contains('x'));
        assert!(d.message.contains("シンボル"));
    }

    #[test]
    fn compiler_internal_diagnostics_have_no_span() {
        let mut sink = DiagnosticSink::new();
        let d = sink.compiler_internal(DiagnosticCode::LeaveScopeEmptyStack, &[]);
        assert_eq!(d.severity, Severity::CompilerInternal);
        assert!(d.span.is_none());
    }

    #[test]
    fn report_raw_records_the_message_verbatim_and_counts_toward_its_severity() {
        let mut sink = DiagnosticSink::new();
        let d = sink.report_raw("could not read source file 'missing.src'", Severity::Error, None);
        assert_eq!(d.message, "could not read source file 'missing.src'");
        assert_eq!(d.span, None);
        assert!(sink.has_errors());
        assert_eq!(sink.error_count(), 1);
    }
}
