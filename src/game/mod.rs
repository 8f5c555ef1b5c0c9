pub mod engine;
pub mod sequencer;

pub use crate::domain::model::{GameEvent, GameSummary, Phase, SessionId, SessionSnapshot, Step, TimerToken};
pub use crate::domain::ports::{Notifier, Presenter, Scheduler};
pub use crate::utils::error::Result;
