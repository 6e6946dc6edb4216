mod rules;
mod validator;

use crate::document::CollectionDocument;
use crate::error::ValidationError;
use validator::Validator;

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Validate for CollectionDocument {
    fn validate(&self) -> Result<(), ValidationError> {
        validate_document(self)
    }
}

pub fn validate_document(doc: &CollectionDocument) -> Result<(), ValidationError> {
    let mut v = Validator::new();
    v.validate_document(doc);
    v.finish()
}
