pub mod events;
pub mod http;
pub mod request;
pub mod response;
mod result;
mod runner;
mod types;

pub use events::{CompositeEventSink, Event, EventSink, NoOpEventSink, StdoutEventSink};
pub use http::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
pub use result::{EndpointOutcome, ExecutionError, ExecutionResult, RunError};
pub use runner::Executor;
pub use types::{ExecutorConfig, DEFAULT_CONTENT_TYPE, DEFAULT_MAX_RESPONSE_BYTES, DEFAULT_TIMEOUT};
