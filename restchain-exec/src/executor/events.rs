use async_trait::async_trait;
use restchain_core::{EndpointId, HttpMethod};
use serde_json::{json, Value as JsonValue};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        endpoints: usize,
    },
    EndpointStarted {
        endpoint: EndpointId,
        name: Option<String>,
        method: HttpMethod,
        url: String,
    },
    EndpointFinished {
        endpoint: EndpointId,
        name: Option<String>,
        status: u16,
        duration_ms: u64,
    },
    OutputsExtracted {
        endpoint: EndpointId,
        keys: Vec<String>,
    },
    ExtractionSkipped {
        endpoint: EndpointId,
        status: u16,
    },
    RunFinished {
        endpoints: usize,
    },
    RunFailed {
        endpoint: EndpointId,
        error: String,
    },
}

impl Event {
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run.started",
            Event::EndpointStarted { .. } => "endpoint.started",
            Event::EndpointFinished { .. } => "endpoint.finished",
            Event::OutputsExtracted { .. } => "outputs.extracted",
            Event::ExtractionSkipped { .. } => "outputs.skipped",
            Event::RunFinished { .. } => "run.finished",
            Event::RunFailed { .. } => "run.failed",
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let ty = self.type_name();
        match self {
            Event::RunStarted { endpoints } | Event::RunFinished { endpoints } => {
                json!({ "type": ty, "endpoints": endpoints })
            }
            Event::EndpointStarted { endpoint, name, method, url } => {
                json!({ "type": ty, "endpoint": endpoint.index(), "name": name, "method": method.as_str(), "url": url })
            }
            Event::EndpointFinished { endpoint, name, status, duration_ms } => {
                json!({ "type": ty, "endpoint": endpoint.index(), "name": name, "status": status, "duration_ms": duration_ms })
            }
            Event::OutputsExtracted { endpoint, keys } => {
                json!({ "type": ty, "endpoint": endpoint.index(), "keys": keys })
            }
            Event::ExtractionSkipped { endpoint, status } => {
                json!({ "type": ty, "endpoint": endpoint.index(), "status": status })
            }
            Event::RunFailed { endpoint, error } => {
                json!({ "type": ty, "endpoint": endpoint.index(), "error": error })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn with(mut self, sink: Box<dyn EventSink>) -> Self {
        self.add(sink);
        self
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// Prints one JSON object per event on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
