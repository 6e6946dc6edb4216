#![forbid(unsafe_code)]

//! Runtime for chained REST collections: resolves each endpoint's request
//! against earlier outputs, sends it and records what came back.

pub mod executor;

pub use crate::executor::{
    EndpointOutcome, EventSink, ExecutionError, ExecutionResult, Executor, ExecutorConfig,
    HttpClient, HttpError, ReqwestHttpClient, RunError,
};
