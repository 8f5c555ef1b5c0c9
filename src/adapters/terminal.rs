use crate::adapters::chart::render_chart;
use crate::adapters::report::SummaryReport;
use crate::config::Settings;
use crate::domain::model::{GameEvent, Phase};
use crate::domain::ports::Presenter;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes game notifications as status lines, and the chart once a game ends.
pub struct TerminalPresenter<W> {
    out: W,
    settings: Settings,
    start_enabled: bool,
}

impl<W: AsyncWrite + Unpin + Send> TerminalPresenter<W> {
    pub fn new(out: W, settings: Settings) -> Self {
        Self {
            out,
            settings,
            start_enabled: true,
        }
    }

    /// Mirrors the sequencer's start trigger: closed from the moment a start
    /// is sent until a presented event shows the game has ended.
    pub fn start_enabled(&self) -> bool {
        self.start_enabled
    }

    /// Close the start trigger as soon as a start has been requested, before
    /// the engine's `GameStarted` arrives.
    pub fn mark_started(&mut self) {
        self.start_enabled = false;
    }

    pub async fn welcome(&mut self) -> Result<()> {
        self.write_line(&format!(
            "{} SPEED GAME: press {} as many times as you can while the round is open.",
            self.settings.key_label, self.settings.key_label
        ))
        .await?;
        self.prompt().await
    }

    pub async fn prompt(&mut self) -> Result<()> {
        let line = if self.start_enabled {
            "Type 's' + Enter to start a game, 'q' + Enter to quit."
        } else {
            "Game in progress. 'q' + Enter quits."
        };
        self.write_line(line).await
    }

    pub async fn write_line(&mut self, line: &str) -> Result<()> {
        self.out.write_all(line.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    fn indicator(&self, phase: Phase) -> String {
        match phase {
            Phase::Active { .. } => format!("PRESS {}", self.settings.key_label),
            Phase::Finished => "GAME OVER".to_string(),
            Phase::Idle | Phase::Waiting { .. } => "WAIT".to_string(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> Presenter for TerminalPresenter<W> {
    async fn present(&mut self, event: &GameEvent) -> Result<()> {
        let phase = event.phase();
        self.start_enabled = !phase.is_active();
        let indicator = self.indicator(phase);
        let key = self.settings.key_label.clone();

        match event {
            GameEvent::GameStarted { total_rounds, .. } => {
                self.write_line("").await?;
                self.write_line(&format!("=== New game: {} rounds ===", total_rounds))
                    .await?;
                self.prompt().await?;
            }
            GameEvent::Waiting { round } => {
                self.write_line(&format!("[{}] Get ready for round {}...", indicator, round))
                    .await?;
            }
            GameEvent::Active { round } => {
                self.write_line(&format!("[{}] Round {}: PRESS {}!", indicator, round, key))
                    .await?;
            }
            GameEvent::InputCounted { count, .. } => {
                self.write_line(&format!("  {} presses: {}", key, count)).await?;
            }
            GameEvent::RoundFinished { round, count } => {
                self.write_line(&format!("[{}] Round {}: {} presses", indicator, round, count))
                    .await?;
            }
            GameEvent::Finished { summary } => {
                self.write_line(&format!("[{}] Game over! Results below.", indicator))
                    .await?;

                let chart = render_chart(
                    summary,
                    self.settings.chart_width,
                    &self.settings.bar_glyph,
                    &key,
                );
                self.out.write_all(chart.as_bytes()).await?;

                if self.settings.json_report {
                    let report = SummaryReport::new(summary, chrono::Utc::now());
                    self.write_line(&report.to_json()?).await?;
                }
                self.prompt().await?;
            }
        }
        Ok(())
    }
}
