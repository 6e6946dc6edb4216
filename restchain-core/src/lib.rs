#![forbid(unsafe_code)]

pub mod body;
pub mod collection;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod parser;
pub mod provider;
pub mod rest;
pub mod validate;

pub use crate::body::{BodyError, BodyField, RequestBody};
pub use crate::collection::{Collection, EndpointId};
pub use crate::document::{build_collection, CollectionDocument, EndpointDocument};
pub use crate::endpoint::{EndpointDefinition, ExtractError, TraversalFailure, UrlError};
pub use crate::error::{DocumentError, ParseError, ValidationError, Violation};
pub use crate::method::{HttpMethod, UnknownMethod};
pub use crate::parser::{parse_document_str, DocumentFormat, ParsedDocument};
pub use crate::provider::{OutputLookup, OutputStore, Provider, SequenceProvider};
pub use crate::validate::{validate_document, Validate};
