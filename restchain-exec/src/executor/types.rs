use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on each HTTP call.
    pub timeout: Duration,
    pub max_response_bytes: usize,
    /// Sent with every request body unless the endpoint declares its own
    /// `Content-Type`.
    pub default_content_type: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            default_content_type: DEFAULT_CONTENT_TYPE.to_string(),
        }
    }
}
