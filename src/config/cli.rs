use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "enter-rush")]
#[command(about = "Press Enter as fast as you can, ten rounds, three seconds each")]
pub struct CliConfig {
    /// Path to an optional TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Width of the summary chart in columns (overrides the file)
    #[arg(long)]
    pub chart_width: Option<usize>,

    /// Seed for the random round delays, for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print a JSON report after each finished game
    #[arg(long)]
    pub json: bool,

    /// Log as JSON lines on stderr
    #[arg(long)]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Load the settings file, if any, and apply command line overrides on top.
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        self.merge(file)
    }

    pub fn merge(&self, mut file: TomlConfig) -> Result<Settings> {
        if let Some(width) = self.chart_width {
            file.display.chart_width = Some(width);
        }
        file.validate()?;

        Ok(Settings {
            chart_width: file.chart_width(),
            bar_glyph: file.bar_glyph().to_string(),
            key_label: file.key_label().to_string(),
            seed: self.seed,
            json_report: self.json,
            verbose: self.verbose || file.verbose(),
            json_logs: self.log_json || file.json_logs(),
        })
    }
}
