//! Shorthands for the usual REST verbs.

use crate::endpoint::EndpointDefinition;
use crate::provider::Provider;

const JSON_CONTENT_TYPE: &str = "application/json";

pub fn create(path: impl Into<String>) -> EndpointDefinition {
    EndpointDefinition::post(path).with_header("Content-Type", JSON_CONTENT_TYPE)
}

pub fn list(path: impl Into<String>) -> EndpointDefinition {
    EndpointDefinition::get(path)
}

pub fn read(
    path: impl Into<String>,
    input: impl Into<String>,
    provider: impl Into<Provider>,
) -> EndpointDefinition {
    EndpointDefinition::get(path).with_input(input, provider)
}

pub fn update(
    path: impl Into<String>,
    input: impl Into<String>,
    provider: impl Into<Provider>,
) -> EndpointDefinition {
    EndpointDefinition::put(path)
        .with_header("Content-Type", JSON_CONTENT_TYPE)
        .with_input(input, provider)
}

pub fn partial_update(
    path: impl Into<String>,
    input: impl Into<String>,
    provider: impl Into<Provider>,
) -> EndpointDefinition {
    EndpointDefinition::patch(path)
        .with_header("Content-Type", JSON_CONTENT_TYPE)
        .with_input(input, provider)
}

pub fn delete(
    path: impl Into<String>,
    input: impl Into<String>,
    provider: impl Into<Provider>,
) -> EndpointDefinition {
    EndpointDefinition::delete(path).with_input(input, provider)
}
