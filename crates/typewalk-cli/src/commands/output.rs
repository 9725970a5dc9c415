//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use std::path::Path;
use typewalk_core::{FailureDiagnostic, LintResult};

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// Failure file names are relative to `root`; text output re-reads each file
/// from there to render source snippets.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, root),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_text(result: &LintResult, root: &Path) {
    let mut failures = result.failures.iter().peekable();
    while let Some(first) = failures.peek() {
        let file_name = first.file_name.clone();
        let source = std::fs::read_to_string(root.join(&file_name)).ok();

        while let Some(failure) = failures.next_if(|f| f.file_name == file_name) {
            let diagnostic = FailureDiagnostic::from(failure);
            match &source {
                Some(text) => {
                    let report = Report::new(diagnostic).with_source_code(NamedSource::new(
                        file_name.to_string_lossy(),
                        text.clone(),
                    ));
                    println!("{report:?}");
                }
                None => println!("{}", failure.format()),
            }
        }
    }

    for error in &result.errors {
        println!("\x1b[31merror\x1b[0m: {error}");
    }

    let summary_color = if !result.errors.is_empty() {
        "\x1b[31m"
    } else if !result.failures.is_empty() {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} failure(s) and {} rule error(s) in {} file(s)\x1b[0m",
        summary_color,
        result.failures.len(),
        result.errors.len(),
        result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for failure in &result.failures {
        println!("{failure} ({})", failure.rule_name);
    }
    for error in &result.errors {
        println!("{error}");
    }
}
