use crate::config::defaults;
use crate::utils::error::{GameError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file. Every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub chart_width: Option<usize>,
    pub bar_glyph: Option<String>,
    pub key_label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GameError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GameError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn chart_width(&self) -> usize {
        self.display.chart_width.unwrap_or(defaults::DEFAULT_CHART_WIDTH)
    }

    pub fn bar_glyph(&self) -> &str {
        self.display
            .bar_glyph
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BAR_GLYPH)
    }

    pub fn key_label(&self) -> &str {
        self.display
            .key_label
            .as_deref()
            .unwrap_or(defaults::DEFAULT_KEY_LABEL)
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_range(
            "display.chart_width",
            self.chart_width(),
            defaults::MIN_CHART_WIDTH,
            defaults::MAX_CHART_WIDTH,
        )?;
        validation::validate_single_char("display.bar_glyph", self.bar_glyph())?;
        validation::validate_non_empty_string("display.key_label", self.key_label())?;
        Ok(())
    }
}
