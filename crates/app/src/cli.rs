//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use litmus_domain::parse_override;
use litmus_infrastructure::DEFAULT_TIMEOUT_MS;

/// Litmus runs declarative HTTP endpoint tests written in YAML or TOML.
#[derive(Debug, Parser)]
#[command(name = "litmus", version, about)]
pub struct Args {
    /// Path to a configuration folder or a single test file.
    #[arg(short, long)]
    pub config: PathBuf,

    /// Name of specific test to run. Every test with this name runs.
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Environment variable, e.g. `-e base=httpbin.org`. Repeatable;
    /// overrides values from env.yaml.
    #[arg(short = 'e', long = "env", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, String)>,

    /// Per-request timeout in milliseconds.
    #[arg(short, long = "timeout", value_name = "MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}
