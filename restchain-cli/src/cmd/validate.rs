use std::path::Path;

use restchain_core::Validate;
use serde::Serialize;

use crate::exit_codes;
use crate::output::{print_result, OutputFormat};
use crate::OutputArgs;

use super::{load_document, report_violations, violation_lines};

#[derive(Serialize)]
struct ValidateResult {
    valid: bool,
    format: String,
    endpoints: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

pub async fn validate_cmd(path: &Path, output: OutputArgs) -> i32 {
    let parsed = match load_document(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let endpoints = parsed.document.endpoints.len();

    match parsed.document.validate() {
        Ok(()) => {
            if output.format == OutputFormat::Text && !output.quiet {
                println!(
                    "ok: valid collection document ({:?}, {endpoints} endpoints)",
                    parsed.format
                );
            } else {
                let result = ValidateResult {
                    valid: true,
                    format: format!("{:?}", parsed.format),
                    endpoints,
                    errors: vec![],
                };
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::SUCCESS
        }
        Err(err) => {
            let errors = violation_lines(&err);
            if output.format == OutputFormat::Text {
                report_violations(&output, &errors);
            } else {
                let result = ValidateResult {
                    valid: false,
                    format: format!("{:?}", parsed.format),
                    endpoints,
                    errors,
                };
                print_result(output.format, output.quiet, &result);
            }
            exit_codes::VALIDATION_FAILED
        }
    }
}
