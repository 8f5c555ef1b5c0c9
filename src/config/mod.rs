#[cfg(feature = "cli")]
pub mod cli;
pub mod defaults;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Resolved presentation settings. Game rules live in [`defaults`].
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub chart_width: usize,
    pub bar_glyph: String,
    pub key_label: String,
    pub seed: Option<u64>,
    pub json_report: bool,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart_width: defaults::DEFAULT_CHART_WIDTH,
            bar_glyph: defaults::DEFAULT_BAR_GLYPH.to_string(),
            key_label: defaults::DEFAULT_KEY_LABEL.to_string(),
            seed: None,
            json_report: false,
            verbose: false,
            json_logs: false,
        }
    }
}
