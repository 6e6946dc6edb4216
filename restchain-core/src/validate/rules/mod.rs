pub(crate) mod document;
pub(crate) mod endpoint;
pub(crate) mod values;
