use crate::adapters::input::{read_commands, InputCommand};
use crate::adapters::terminal::TerminalPresenter;
use crate::config::Settings;
use crate::game::engine::GameEngine;
use crate::game::{GameSummary, Presenter};
use crate::utils::error::Result;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::sync::mpsc;

/// Wires line input, the game engine and the terminal presenter together.
pub struct TerminalGame {
    settings: Settings,
}

impl TerminalGame {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Play until the user quits or input ends. Returns the last finished
    /// game's summary, if any game was completed.
    pub async fn run<R, W>(&self, input: R, out: W) -> Result<Option<GameSummary>>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send,
    {
        let (handle, mut events, engine) = GameEngine::spawn(self.settings.seed);
        let (command_tx, mut commands) = mpsc::unbounded_channel();
        let reader = tokio::spawn(read_commands(input, command_tx));

        let mut presenter = TerminalPresenter::new(out, self.settings.clone());
        presenter.welcome().await?;

        loop {
            tokio::select! {
                Some(event) = events.recv() => {
                    presenter.present(&event).await?;
                }
                command = commands.recv() => match command {
                    Some(InputCommand::Activate) => handle.register_input()?,
                    Some(InputCommand::Start) => {
                        if presenter.start_enabled() {
                            handle.start_game()?;
                            presenter.mark_started();
                        } else {
                            tracing::debug!("Start ignored, game in progress");
                            presenter.write_line("A game is already running.").await?;
                        }
                    }
                    Some(InputCommand::Unknown(text)) => {
                        presenter
                            .write_line(&format!("Unknown command '{}'", text))
                            .await?;
                        presenter.prompt().await?;
                    }
                    Some(InputCommand::Quit) | None => break,
                },
            }
        }

        handle.shutdown()?;
        reader.await??;
        let summary = engine.await?;
        tracing::info!("Session closed");
        Ok(summary)
    }
}
