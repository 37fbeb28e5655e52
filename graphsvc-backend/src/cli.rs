use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "graphsvc-backend",
    version,
    about = "HTTP ingestion service for the knowledge graph"
)]
pub struct CliArgs {
    /// Path to configuration file (.toml, .yaml, .yml or .json)
    #[arg(short = 'c', long = "config-path", env = "GRAPHSVC_CONFIG_PATH")]
    pub config_path: Option<String>,
}
