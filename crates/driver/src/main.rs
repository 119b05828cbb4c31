//! Command-line front end for the compiler: reads a source file, drives it
//! through lexing/parsing, semantic analysis, and MIR generation, and
//! reports whatever diagnostics came out of the run.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use scalarc_diagnostics::{render_with_source, DiagnosticSink, Language};
use scalarc_mir::PrettyPrint;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "scalarc",
    author,
    version,
    about = "Compiles a source file through the AST, semantic, and MIR stages",
    long_about = None
)]
struct Cli {
    /// Source file to compile
    source: PathBuf,

    /// Report diagnostics in English (default)
    #[arg(long = "en", conflicts_with = "ja")]
    en: bool,

    /// Report diagnostics in Japanese
    #[arg(long = "ja", conflicts_with = "en")]
    ja: bool,

    /// Print the parsed AST before running semantic analysis
    #[arg(long)]
    dbg_ast_print: bool,

    /// Print the generated MIR module
    #[arg(long)]
    dbg_mir_print: bool,
}

impl Cli {
    fn language(&self) -> Language {
        if self.ja {
            Language::Ja
        } else {
            Language::En
        }
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let source_name = cli.source.display().to_string();
    let source = fs::read_to_string(&cli.source)
        .with_context(|| format!("could not read source file '{source_name}'"))?;

    let mut diags = DiagnosticSink::new();
    diags.set_language(cli.language());

    tracing::debug!(file = %source_name, "parsing");
    let ast = match scalarc_syntax::parse(&source) {
        Ok(ast) => ast,
        Err(err) => {
            eprintln!("error: {}", err.message);
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.dbg_ast_print {
        println!("{ast:#?}");
    }

    tracing::debug!("running semantic analysis");
    let analysis = scalarc_semantic::analyze(&ast, &mut diags);

    if diags.has_errors() {
        report(&source_name, &source, &diags);
        return Ok(ExitCode::FAILURE);
    }

    tracing::debug!("lowering to MIR");
    let module = scalarc_mir::generate(&ast, &analysis, &mut diags);

    if !diags.is_empty() {
        report(&source_name, &source, &diags);
    }

    if diags.has_errors() {
        return Ok(ExitCode::FAILURE);
    }

    if cli.dbg_mir_print {
        println!("{}", module.pretty_print(0));
    }

    Ok(ExitCode::SUCCESS)
}

/// Renders every diagnostic in `sink` against `source`, in source order.
///
/// `CompilerInternal` diagnostics carry no span, so they fall back to the
/// plain `[severity] message` line inside `render_with_source` itself.
fn report(source_name: &str, source: &str, sink: &DiagnosticSink) {
    for diagnostic in sink.diagnostics() {
        eprintln!("{}", render_with_source(source_name, source, diagnostic));
    }
    if sink.error_count() > 0 {
        eprintln!(
            "{} error(s), {} warning(s)",
            sink.error_count(),
            sink.warning_count()
        );
    }
}
