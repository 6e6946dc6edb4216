use std::sync::Arc;
use std::time::Instant;

use restchain_core::{Collection, EndpointId};
use tracing::{debug, info, warn};

use crate::executor::events::{Event, EventSink, NoOpEventSink};
use crate::executor::http::HttpClient;
use crate::executor::request::build_request;
use crate::executor::response::{into_outcome, parse_body_json};
use crate::executor::result::{ExecutionError, ExecutionResult, RunError};
use crate::executor::types::ExecutorConfig;

/// Runs a collection's endpoints one after another in declaration order.
pub struct Executor {
    config: ExecutorConfig,
    http: Arc<dyn HttpClient>,
    event_sink: Arc<dyn EventSink>,
}

impl Executor {
    pub fn new(
        config: ExecutorConfig,
        http: Arc<dyn HttpClient>,
        event_sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            config,
            http,
            event_sink,
        }
    }

    pub fn with_http(http: Arc<dyn HttpClient>) -> Self {
        Self::new(ExecutorConfig::default(), http, Arc::new(NoOpEventSink))
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Executes every endpoint. Output stores are written in place, so a
    /// later run of the same collection starts from the values left behind.
    pub async fn execute(&self, collection: &mut Collection) -> Result<ExecutionResult, RunError> {
        let ids: Vec<EndpointId> = collection.ids().collect();
        info!(endpoints = ids.len(), base_url = collection.base_url(), "starting run");
        self.event_sink
            .emit(Event::RunStarted {
                endpoints: ids.len(),
            })
            .await;

        let mut result = ExecutionResult::default();
        for id in ids {
            if let Err(source) = self.execute_endpoint(collection, id, &mut result).await {
                let name = collection.endpoint(id).and_then(|e| e.name());
                warn!(endpoint = %id, name, error = %source, "run aborted");
                self.event_sink
                    .emit(Event::RunFailed {
                        endpoint: id,
                        error: source.to_string(),
                    })
                    .await;
                return Err(RunError::new(id, name, source, result));
            }
        }

        info!(endpoints = result.len(), "run finished");
        self.event_sink
            .emit(Event::RunFinished {
                endpoints: result.len(),
            })
            .await;
        Ok(result)
    }

    async fn execute_endpoint(
        &self,
        collection: &mut Collection,
        id: EndpointId,
        result: &mut ExecutionResult,
    ) -> Result<(), ExecutionError> {
        let request = build_request(collection, id, &self.config)?;
        let endpoint = collection
            .endpoint(id)
            .ok_or(ExecutionError::UnknownEndpoint { endpoint: id })?;
        let name = endpoint.name().map(str::to_string);
        let method = request.method;
        let url = request.url.to_string();

        self.event_sink
            .emit(Event::EndpointStarted {
                endpoint: id,
                name: name.clone(),
                method,
                url: url.clone(),
            })
            .await;
        debug!(endpoint = %id, %method, %url, "dispatching");

        let started = Instant::now();
        let response = self
            .http
            .send(request, self.config.timeout, self.config.max_response_bytes)
            .await?;
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let status = response.status;
        let success = response.is_success();

        self.event_sink
            .emit(Event::EndpointFinished {
                endpoint: id,
                name: name.clone(),
                status,
                duration_ms,
            })
            .await;
        debug!(endpoint = %id, status, duration_ms, "response received");

        let parsed = (method.carries_body() && success).then(|| parse_body_json(&response));
        result.record(id, into_outcome(name, method, url, response));

        let Some(parsed) = parsed else {
            if method.carries_body() && !success {
                debug!(endpoint = %id, status, "skipping output extraction");
                self.event_sink
                    .emit(Event::ExtractionSkipped {
                        endpoint: id,
                        status,
                    })
                    .await;
            }
            return Ok(());
        };

        let keys = collection
            .endpoint_mut(id)
            .ok_or(ExecutionError::UnknownEndpoint { endpoint: id })?
            .extract_outputs(&parsed?)?;
        debug!(endpoint = %id, ?keys, "outputs stored");
        self.event_sink
            .emit(Event::OutputsExtracted { endpoint: id, keys })
            .await;
        Ok(())
    }
}
