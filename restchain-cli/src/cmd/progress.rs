use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use restchain_exec::executor::{Event, EventSink};

/// Prints one line per finished endpoint on stderr.
pub struct ProgressEventSink {
    total: usize,
    finished: AtomicUsize,
}

impl ProgressEventSink {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            finished: AtomicUsize::new(0),
        }
    }

    fn line(&self, event: &Event) -> Option<String> {
        match event {
            Event::EndpointFinished {
                endpoint,
                name,
                status,
                duration_ms,
            } => {
                let done = self.finished.fetch_add(1, Ordering::Relaxed) + 1;
                let label = name.clone().unwrap_or_else(|| endpoint.to_string());
                Some(format!(
                    "[{done}/{}] {label} -> {status} ({duration_ms} ms)",
                    self.total
                ))
            }
            Event::RunFailed { endpoint, error } => Some(format!("[failed] {endpoint}: {error}")),
            _ => None,
        }
    }
}

#[async_trait]
impl EventSink for ProgressEventSink {
    async fn emit(&self, event: Event) {
        if let Some(line) = self.line(&event) {
            eprintln!("{line}");
        }
    }
}
