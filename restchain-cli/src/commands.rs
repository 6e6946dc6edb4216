use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::args::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EventsMode {
    None,
    Stdout,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute every endpoint of a collection document in order.
    Run {
        path: PathBuf,
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set_inputs: Vec<String>,
        #[arg(long, value_enum, default_value_t = EventsMode::None)]
        events: EventsMode,
        /// Report each finished endpoint on stderr.
        #[arg(long)]
        progress: bool,
        #[command(flatten)]
        target: TargetArgs,
        #[command(flatten)]
        http: HttpArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Check a collection document without sending anything.
    Validate {
        path: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}
