pub mod config;
pub mod progress;
pub mod run;
pub mod validate;

use std::path::Path;

use restchain_core::{parse_document_str, DocumentFormat, ParseError, ParsedDocument, ValidationError};

use crate::exit_codes;
use crate::output::{print_error, OutputFormat};
use crate::OutputArgs;

/// Reads and parses a collection document, reporting failures and mapping
/// them to an exit code.
pub(crate) fn load_document(path: &Path, output: &OutputArgs) -> Result<ParsedDocument, i32> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        print_error(
            output.format,
            output.quiet,
            &format!("failed to read {}: {e}", path.display()),
        );
        exit_codes::RUNTIME_ERROR
    })?;

    parse_document_str(&content, DocumentFormat::Auto).map_err(|e| {
        let message = match e {
            ParseError::Json(e) => format!("JSON parse failed: {e}"),
            ParseError::Yaml(e) => format!("YAML parse failed: {e}"),
        };
        print_error(output.format, output.quiet, &message);
        exit_codes::VALIDATION_FAILED
    })
}

pub(crate) fn violation_lines(err: &ValidationError) -> Vec<String> {
    err.violations.iter().map(ToString::to_string).collect()
}

pub(crate) fn report_violations(output: &OutputArgs, errors: &[String]) {
    if output.quiet {
        return;
    }
    match output.format {
        OutputFormat::Text => {
            eprintln!("error: validation failed");
            for e in errors {
                eprintln!("- {e}");
            }
        }
        OutputFormat::Json => {
            let err = serde_json::json!({"error": "validation failed", "violations": errors});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}
