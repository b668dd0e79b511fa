//! CLI domain: parse, route, output, and presentation only.
//! Orchestration lives in the pipeline; the route assembles it from config.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::map_error;
pub use parse::Cli;
pub use presentation::{format_outcome, format_report, format_test_case};
pub use route::{apply_cli_overrides, RunContext, RunReport};
