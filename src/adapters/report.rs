use crate::domain::model::GameSummary;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Machine-readable results of one finished game, for external charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub finished_at: DateTime<Utc>,
    pub rounds: usize,
    pub results: Vec<u32>,
    pub mean: f64,
    pub best: Option<u32>,
    pub worst: Option<u32>,
}

impl SummaryReport {
    pub fn new(summary: &GameSummary, finished_at: DateTime<Utc>) -> Self {
        Self {
            finished_at,
            rounds: summary.rounds(),
            results: summary.results.clone(),
            mean: summary.mean,
            best: summary.best(),
            worst: summary.worst(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
