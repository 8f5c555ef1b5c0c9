use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Game engine stopped")]
    EngineStopped,

    #[error("Background task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

impl GameError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            GameError::IoError(e) => format!("Could not read or write the terminal or a file: {}", e),
            GameError::SerializationError(e) => format!("Could not produce the results report: {}", e),
            GameError::ConfigValidationError { field, message } => {
                format!("The configuration is invalid ({}): {}", field, message)
            }
            GameError::InvalidConfigValueError { field, value, reason } => {
                format!("Setting '{}' has an invalid value '{}': {}", field, value, reason)
            }
            GameError::EngineStopped => "The game stopped unexpectedly.".to_string(),
            GameError::TaskError(e) => format!("An internal task failed: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GameError::IoError(_) => "Check that the config path exists and the terminal is interactive",
            GameError::SerializationError(_) => "Run again without --json",
            GameError::ConfigValidationError { .. } => "Fix the TOML file or pass --config with a valid file",
            GameError::InvalidConfigValueError { .. } => "Adjust the value named above and try again",
            GameError::EngineStopped | GameError::TaskError(_) => {
                "Restart the game; run with --verbose to see why it stopped"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
