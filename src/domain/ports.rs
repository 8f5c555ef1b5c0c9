use crate::domain::model::{GameEvent, TimerToken};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Timer service: deliver `token` back to the sequencer after `delay`.
///
/// Implementations never cancel anything. Stale tokens are filtered by the
/// sequencer when they fire.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, token: TimerToken);
}

/// Receives state-change notifications as the sequencer emits them.
pub trait Notifier {
    fn notify(&mut self, event: GameEvent);
}

/// Renders notifications for a human. Rendering may block on I/O, hence async.
#[async_trait]
pub trait Presenter: Send {
    async fn present(&mut self, event: &GameEvent) -> Result<()>;
}

impl<F> Notifier for F
where
    F: FnMut(GameEvent),
{
    fn notify(&mut self, event: GameEvent) {
        self(event)
    }
}
