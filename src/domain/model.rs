use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one game session. A new id is allocated on every game start so
/// timers scheduled by an earlier session can be recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub u64);

impl SessionId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// The sequencer's current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    /// Waiting before `round` opens. Also covers the start delay and the
    /// pause after a round, where `round` is the next one to be played.
    Waiting { round: u32 },
    Active { round: u32 },
    Finished,
}

impl Phase {
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Waiting { .. } | Phase::Active { .. })
    }

    pub fn round_active(&self) -> bool {
        matches!(self, Phase::Active { .. })
    }
}

/// A delayed transition of the round cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    StartRound,
    ActivateRound,
    EndRound,
}

/// What a scheduled timer carries back to the sequencer when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub session: SessionId,
    pub step: Step,
}

/// State-change notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new session began; the start trigger is disabled until `Finished`.
    GameStarted { session: SessionId, total_rounds: u32 },
    Waiting { round: u32 },
    Active { round: u32 },
    InputCounted { round: u32, count: u32 },
    RoundFinished { round: u32, count: u32 },
    Finished { summary: GameSummary },
}

impl GameEvent {
    /// Phase the sequencer is in once this event has been emitted.
    pub fn phase(&self) -> Phase {
        match self {
            GameEvent::GameStarted { .. } => Phase::Waiting { round: 1 },
            GameEvent::Waiting { round } => Phase::Waiting { round: *round },
            GameEvent::Active { round } | GameEvent::InputCounted { round, .. } => {
                Phase::Active { round: *round }
            }
            GameEvent::RoundFinished { round, .. } => Phase::Waiting { round: round + 1 },
            GameEvent::Finished { .. } => Phase::Finished,
        }
    }
}

/// Per-round press counts of a finished game and their mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub results: Vec<u32>,
    pub mean: f64,
}

impl GameSummary {
    pub fn from_results(results: Vec<u32>) -> Self {
        let mean = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|&c| f64::from(c)).sum::<f64>() / results.len() as f64
        };
        Self { results, mean }
    }

    pub fn rounds(&self) -> usize {
        self.results.len()
    }

    pub fn total(&self) -> u64 {
        self.results.iter().map(|&c| u64::from(c)).sum()
    }

    pub fn best(&self) -> Option<u32> {
        self.results.iter().copied().max()
    }

    pub fn worst(&self) -> Option<u32> {
        self.results.iter().copied().min()
    }
}

/// Read-only view of the session, used by tests and front ends.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session: SessionId,
    pub total_rounds: u32,
    pub current_round: u32,
    pub phase: Phase,
    pub click_count: u32,
    pub results: Vec<u32>,
}
