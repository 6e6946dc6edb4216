use serde_json::Value as JsonValue;

const OUTPUT_KEY: &str = "$output";
const ENV_KEY: &str = "$env";

/// Where a document value comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource<'a> {
    Constant(String),
    Output { endpoint: &'a str, key: &'a str },
    Env(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReferenceError {
    #[error("`$output` must be a string of the form `<endpoint>.<key>`")]
    MalformedOutput,
    #[error("`$env` must be a non-empty variable name")]
    MalformedEnv,
    #[error("reference object must have exactly one of `$output` or `$env`")]
    UnknownReference,
    #[error("value must be a string, number, boolean or reference object")]
    NotScalar,
}

/// True for objects carrying `$`-prefixed keys.
pub(crate) fn is_reference(value: &JsonValue) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.keys().any(|k| k.starts_with('$')))
}

/// Classifies an input value: scalars are constants, reference objects
/// become output or environment sources.
pub fn value_source(value: &JsonValue) -> Result<ValueSource<'_>, ReferenceError> {
    match value {
        JsonValue::String(s) => Ok(ValueSource::Constant(s.clone())),
        JsonValue::Number(n) => Ok(ValueSource::Constant(n.to_string())),
        JsonValue::Bool(b) => Ok(ValueSource::Constant(b.to_string())),
        JsonValue::Object(map) if is_reference(value) => {
            if map.len() != 1 {
                return Err(ReferenceError::UnknownReference);
            }
            if let Some(target) = map.get(OUTPUT_KEY) {
                let (endpoint, key) = target
                    .as_str()
                    .and_then(|s| s.split_once('.'))
                    .filter(|(e, k)| !e.is_empty() && !k.is_empty())
                    .ok_or(ReferenceError::MalformedOutput)?;
                return Ok(ValueSource::Output { endpoint, key });
            }
            if let Some(var) = map.get(ENV_KEY) {
                let var = var
                    .as_str()
                    .filter(|v| !v.is_empty())
                    .ok_or(ReferenceError::MalformedEnv)?;
                return Ok(ValueSource::Env(var));
            }
            Err(ReferenceError::UnknownReference)
        }
        _ => Err(ReferenceError::NotScalar),
    }
}
