use crate::document::CollectionDocument;
use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub document: CollectionDocument,
    pub format: DocumentFormat,
}

pub fn parse_document_str(input: &str, format: DocumentFormat) -> Result<ParsedDocument, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedDocument {
            document: serde_json::from_str::<CollectionDocument>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedDocument {
            document: serde_yaml::from_str::<CollectionDocument>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_document_auto(input),
    }
}

fn parse_document_auto(input: &str) -> Result<ParsedDocument, ParseError> {
    // JSON always starts with `{` after trimming; YAML is tried for anything else.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') {
        return match serde_json::from_str::<CollectionDocument>(input) {
            Ok(document) => Ok(ParsedDocument {
                document,
                format: DocumentFormat::Json,
            }),
            Err(json_err) => match serde_yaml::from_str::<CollectionDocument>(input) {
                Ok(document) => Ok(ParsedDocument {
                    document,
                    format: DocumentFormat::Yaml,
                }),
                Err(_) => Err(ParseError::Json(json_err)),
            },
        };
    }

    match serde_yaml::from_str::<CollectionDocument>(input) {
        Ok(document) => Ok(ParsedDocument {
            document,
            format: DocumentFormat::Yaml,
        }),
        Err(yaml_err) => {
            if let Ok(document) = serde_json::from_str::<CollectionDocument>(input) {
                return Ok(ParsedDocument {
                    document,
                    format: DocumentFormat::Json,
                });
            }
            Err(ParseError::Yaml(yaml_err))
        }
    }
}
