use std::path::Path;
use std::sync::Arc;

use restchain_core::{build_collection, Collection, DocumentError, OutputStore};
use restchain_exec::executor::{
    CompositeEventSink, EndpointOutcome, EventSink, ExecutionResult, Executor, NoOpEventSink,
    ReqwestHttpClient, StdoutEventSink,
};
use serde::Serialize;

use crate::commands::EventsMode;
use crate::exit_codes;
use crate::output::{print_error, print_result, OutputFormat};
use crate::{HttpArgs, OutputArgs, TargetArgs};

use super::config::{apply_target_overrides, build_executor_config, merge_set_inputs};
use super::progress::ProgressEventSink;
use super::{load_document, report_violations, violation_lines};

#[derive(Serialize)]
struct RunReport<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    endpoints: Vec<EndpointReport<'a>>,
}

#[derive(Serialize)]
struct EndpointReport<'a> {
    index: usize,
    #[serde(flatten)]
    outcome: &'a EndpointOutcome,
    #[serde(skip_serializing_if = "OutputStore::is_empty")]
    outputs: OutputStore,
}

impl<'a> RunReport<'a> {
    fn new(collection: &Collection, result: &'a ExecutionResult, error: Option<String>) -> Self {
        let endpoints = result
            .iter()
            .map(|(id, outcome)| EndpointReport {
                index: id.index(),
                outcome,
                outputs: collection
                    .endpoint(id)
                    .map(|e| e.outputs().clone())
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            status: if error.is_none() { "succeeded" } else { "failed" },
            error,
            endpoints,
        }
    }
}

pub async fn run_cmd(
    path: &Path,
    set_inputs: &[String],
    events: EventsMode,
    progress: bool,
    target: TargetArgs,
    http: HttpArgs,
    output: OutputArgs,
) -> i32 {
    let mut parsed = match load_document(path, &output) {
        Ok(p) => p,
        Err(code) => return code,
    };
    if let Err(e) = merge_set_inputs(&mut parsed.document, set_inputs) {
        print_error(output.format, output.quiet, &e);
        return exit_codes::VALIDATION_FAILED;
    }
    apply_target_overrides(&mut parsed.document, &target);

    let mut collection = match build_collection(&parsed.document) {
        Ok(c) => c,
        Err(DocumentError::Validation(err)) => {
            report_violations(&output, &violation_lines(&err));
            return exit_codes::VALIDATION_FAILED;
        }
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::VALIDATION_FAILED;
        }
    };

    let client = match ReqwestHttpClient::new() {
        Ok(c) => c,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let sink = event_sink(events, progress, collection.len());
    let executor = Executor::new(build_executor_config(&http), Arc::new(client), sink);

    match executor.execute(&mut collection).await {
        Ok(result) => {
            print_report(&output, &RunReport::new(&collection, &result, None));
            exit_codes::SUCCESS
        }
        Err(err) => {
            let message = err.to_string();
            print_report(
                &output,
                &RunReport::new(&collection, &err.partial, Some(message.clone())),
            );
            print_error(output.format, output.quiet, &message);
            exit_codes::RUN_FAILED
        }
    }
}

fn event_sink(events: EventsMode, progress: bool, total: usize) -> Arc<dyn EventSink> {
    if events == EventsMode::None && !progress {
        return Arc::new(NoOpEventSink);
    }
    let mut sink = CompositeEventSink::new();
    if events == EventsMode::Stdout {
        sink.add(Box::new(StdoutEventSink));
    }
    if progress {
        sink.add(Box::new(ProgressEventSink::new(total)));
    }
    Arc::new(sink)
}

fn print_report(output: &OutputArgs, report: &RunReport<'_>) {
    if output.format == OutputFormat::Json || output.quiet {
        print_result(output.format, output.quiet, report);
        return;
    }
    for e in &report.endpoints {
        let label = e
            .outcome
            .name
            .clone()
            .unwrap_or_else(|| format!("#{}", e.index));
        println!(
            "{label}: {} {} -> {}",
            e.outcome.method, e.outcome.url, e.outcome.status
        );
        for (key, value) in &e.outputs {
            println!("  {key} = {value}");
        }
    }
    if report.error.is_none() {
        println!("ok: {} endpoints executed", report.endpoints.len());
    }
}
