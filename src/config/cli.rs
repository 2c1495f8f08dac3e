use crate::config::{HandlerConfig, DEFAULT_CONFIG_PATH};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::PathBuf;

/// Runs one simulated gateway invocation against local files.
#[derive(Debug, Clone, Parser)]
#[command(name = "docgen-lambda")]
#[command(about = "Render a document payload to PDF the same way the Lambda handler does")]
pub struct CliConfig {
    /// JSON request body to send to the handler
    #[arg(long)]
    pub payload: PathBuf,

    #[arg(long, env = "DOCGEN_CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    #[arg(long, default_value = "./document.pdf")]
    pub output: PathBuf,

    #[arg(long, env = "CORS_ORIGIN")]
    pub cors_origin: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn handler_config(&self) -> HandlerConfig {
        HandlerConfig::new(self.cors_origin.clone(), self.config.clone())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("payload", &self.payload.to_string_lossy())?;
        validate_path("output", &self.output.to_string_lossy())?;
        self.handler_config().validate()
    }
}
