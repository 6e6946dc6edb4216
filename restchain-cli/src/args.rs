use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Overrides for where and as whom requests are sent.
#[derive(Debug, Args, Clone)]
pub struct TargetArgs {
    #[arg(long)]
    pub base_url: Option<String>,
    #[arg(long, env = "RESTCHAIN_BEARER_TOKEN", hide_env_values = true)]
    pub bearer_token: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct HttpArgs {
    /// Per-request timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    pub timeout: u64,
    #[arg(long, default_value_t = 4_194_304)]
    pub max_response_bytes: usize,
}
