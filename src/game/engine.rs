use crate::game::sequencer::RoundSequencer;
use crate::game::{GameEvent, GameSummary, Notifier, Scheduler, TimerToken};
use crate::utils::error::{GameError, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug)]
enum EngineMessage {
    StartGame,
    Input,
    Timer(TimerToken),
    Shutdown,
}

/// Schedules each timer as its own sleeping task that posts the token back
/// into the engine's queue. Holds only a weak sender so pending timers do not
/// keep the engine alive once every [`GameHandle`] is gone.
pub struct TokioScheduler {
    tx: mpsc::WeakUnboundedSender<EngineMessage>,
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, token: TimerToken) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = tx.upgrade() {
                let _ = tx.send(EngineMessage::Timer(token));
            }
        });
    }
}

pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<GameEvent>,
}

impl Notifier for ChannelNotifier {
    fn notify(&mut self, event: GameEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("No listener for game events");
        }
    }
}

/// Cloneable front door to a running [`GameEngine`].
#[derive(Debug, Clone)]
pub struct GameHandle {
    tx: mpsc::UnboundedSender<EngineMessage>,
}

impl GameHandle {
    pub fn start_game(&self) -> Result<()> {
        self.send(EngineMessage::StartGame)
    }

    /// The one logical "activate key pressed" event.
    pub fn register_input(&self) -> Result<()> {
        self.send(EngineMessage::Input)
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(EngineMessage::Shutdown)
    }

    fn send(&self, message: EngineMessage) -> Result<()> {
        self.tx.send(message).map_err(|_| GameError::EngineStopped)
    }
}

/// Owns the sequencer and applies commands and fired timers one at a time, in
/// arrival order, on a single task.
pub struct GameEngine {
    sequencer: RoundSequencer<TokioScheduler, ChannelNotifier>,
    rx: mpsc::UnboundedReceiver<EngineMessage>,
}

impl GameEngine {
    pub fn new(seed: Option<u64>) -> (Self, GameHandle, mpsc::UnboundedReceiver<GameEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let scheduler = TokioScheduler { tx: tx.downgrade() };
        let notifier = ChannelNotifier { tx: event_tx };
        let sequencer = match seed {
            Some(seed) => RoundSequencer::with_seed(scheduler, notifier, seed),
            None => RoundSequencer::new(scheduler, notifier),
        };

        (Self { sequencer, rx }, GameHandle { tx }, event_rx)
    }

    /// Run the engine on its own task. The task resolves to the last finished
    /// game's summary when the engine shuts down.
    pub fn spawn(
        seed: Option<u64>,
    ) -> (
        GameHandle,
        mpsc::UnboundedReceiver<GameEvent>,
        JoinHandle<Option<GameSummary>>,
    ) {
        let (engine, handle, events) = Self::new(seed);
        let task = tokio::spawn(engine.run());
        (handle, events, task)
    }

    pub async fn run(mut self) -> Option<GameSummary> {
        tracing::debug!("Game engine running");

        while let Some(message) = self.rx.recv().await {
            match message {
                EngineMessage::StartGame => self.sequencer.start_game(),
                EngineMessage::Input => {
                    self.sequencer.register_input();
                }
                EngineMessage::Timer(token) => self.sequencer.fire(token),
                EngineMessage::Shutdown => break,
            }
        }

        tracing::debug!("Game engine stopped");
        self.sequencer.summary().cloned()
    }
}
