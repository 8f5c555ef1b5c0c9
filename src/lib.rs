pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod game;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::app::TerminalGame;
pub use crate::config::Settings;
pub use crate::game::engine::{GameEngine, GameHandle};
pub use crate::game::sequencer::RoundSequencer;
pub use crate::domain::model::{GameEvent, GameSummary, Phase};
pub use crate::utils::error::{GameError, Result};
