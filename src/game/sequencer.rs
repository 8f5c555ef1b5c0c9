use crate::config::defaults;
use crate::game::{GameEvent, GameSummary, Notifier, Phase, Scheduler, SessionId, SessionSnapshot, Step, TimerToken};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Drives one game at a time through its rounds.
///
/// Every transition after `start_game` is a timer delivered through
/// [`RoundSequencer::fire`]. Timers are never cancelled; a token is only acted
/// on if it belongs to the current session and is the one outstanding timer,
/// and each step is additionally a no-op once the game is no longer active.
pub struct RoundSequencer<S: Scheduler, N: Notifier> {
    scheduler: S,
    notifier: N,
    rng: StdRng,
    session: SessionId,
    total_rounds: u32,
    current_round: u32,
    phase: Phase,
    click_count: u32,
    results: Vec<u32>,
    pending: Option<TimerToken>,
    summary: Option<GameSummary>,
}

impl<S: Scheduler, N: Notifier> RoundSequencer<S, N> {
    pub fn new(scheduler: S, notifier: N) -> Self {
        Self::with_rng(scheduler, notifier, StdRng::from_os_rng())
    }

    pub fn with_seed(scheduler: S, notifier: N, seed: u64) -> Self {
        Self::with_rng(scheduler, notifier, StdRng::seed_from_u64(seed))
    }

    fn with_rng(scheduler: S, notifier: N, rng: StdRng) -> Self {
        Self {
            scheduler,
            notifier,
            rng,
            session: SessionId(0),
            total_rounds: defaults::TOTAL_ROUNDS,
            current_round: 0,
            phase: Phase::Idle,
            click_count: 0,
            results: Vec::with_capacity(defaults::TOTAL_ROUNDS as usize),
            pending: None,
            summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_active()
    }

    pub fn round_active(&self) -> bool {
        self.phase.round_active()
    }

    /// Whether the front end should offer "start". Disabled while a game runs.
    pub fn start_enabled(&self) -> bool {
        !self.is_active()
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Results of the last finished game, cleared when a new game starts.
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session: self.session,
            total_rounds: self.total_rounds,
            current_round: self.current_round,
            phase: self.phase,
            click_count: self.click_count,
            results: self.results.clone(),
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Begin a new session, discarding whatever the previous one was doing.
    pub fn start_game(&mut self) {
        if self.is_active() {
            tracing::info!("Restarting game, abandoning {}", self.session);
        }

        self.session = self.session.next();
        self.current_round = 0;
        self.click_count = 0;
        self.results.clear();
        self.summary = None;
        self.phase = Phase::Waiting { round: 1 };

        tracing::info!("Starting {} with {} rounds", self.session, self.total_rounds);
        self.notifier.notify(GameEvent::GameStarted {
            session: self.session,
            total_rounds: self.total_rounds,
        });
        self.schedule(defaults::START_DELAY, Step::StartRound);
    }

    /// Deliver a fired timer. Tokens from another session, or that are not
    /// the outstanding timer, are dropped without any effect.
    pub fn fire(&mut self, token: TimerToken) {
        if token.session != self.session || self.pending != Some(token) {
            tracing::debug!(
                "Ignoring stale timer {:?} from {} (current {})",
                token.step,
                token.session,
                self.session
            );
            return;
        }
        self.pending = None;

        match token.step {
            Step::StartRound => self.start_round(),
            Step::ActivateRound => self.activate_round(),
            Step::EndRound => self.end_round(),
        }
    }

    fn start_round(&mut self) {
        if !self.is_active() {
            return;
        }

        self.current_round += 1;
        if self.current_round > self.total_rounds {
            self.end_game();
            return;
        }

        let wait_secs = self.rng.random_range(defaults::WAIT_SECS);
        self.phase = Phase::Waiting {
            round: self.current_round,
        };
        tracing::debug!("Round {} opens in {}s", self.current_round, wait_secs);

        self.notifier.notify(GameEvent::Waiting {
            round: self.current_round,
        });
        self.schedule(Duration::from_secs(wait_secs), Step::ActivateRound);
    }

    fn activate_round(&mut self) {
        if !self.is_active() {
            return;
        }

        self.click_count = 0;
        self.phase = Phase::Active {
            round: self.current_round,
        };
        tracing::debug!("Round {} active", self.current_round);

        self.notifier.notify(GameEvent::Active {
            round: self.current_round,
        });
        self.schedule(defaults::ACTIVE_WINDOW, Step::EndRound);
    }

    /// Count one press of the activate key. Returns whether it was counted;
    /// presses outside an active round change nothing.
    pub fn register_input(&mut self) -> bool {
        let Phase::Active { round } = self.phase else {
            tracing::trace!("Input outside active window ignored");
            return false;
        };

        self.click_count += 1;
        self.notifier.notify(GameEvent::InputCounted {
            round,
            count: self.click_count,
        });
        true
    }

    fn end_round(&mut self) {
        if !self.is_active() {
            return;
        }

        let round = self.current_round;
        self.phase = Phase::Waiting { round: round + 1 };
        self.results.push(self.click_count);
        tracing::info!("Round {}: {} presses", round, self.click_count);

        self.notifier.notify(GameEvent::RoundFinished {
            round,
            count: self.click_count,
        });
        self.schedule(defaults::ROUND_PAUSE, Step::StartRound);
    }

    fn end_game(&mut self) {
        if !self.is_active() {
            return;
        }

        self.phase = Phase::Finished;
        self.pending = None;

        let summary = GameSummary::from_results(self.results.clone());
        tracing::info!(
            "Game {} finished: mean {:.1} over {} rounds",
            self.session,
            summary.mean,
            summary.rounds()
        );

        self.summary = Some(summary.clone());
        self.notifier.notify(GameEvent::Finished { summary });
    }

    fn schedule(&mut self, delay: Duration, step: Step) {
        let token = TimerToken {
            session: self.session,
            step,
        };
        self.pending = Some(token);
        self.scheduler.schedule(delay, token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: Vec<(Duration, TimerToken)>,
    }

    impl Scheduler for RecordingScheduler {
        fn schedule(&mut self, delay: Duration, token: TimerToken) {
            self.scheduled.push((delay, token));
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Vec<GameEvent>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, event: GameEvent) {
            self.events.push(event);
        }
    }

    type TestSequencer = RoundSequencer<RecordingScheduler, RecordingNotifier>;

    fn sequencer() -> TestSequencer {
        RoundSequencer::with_seed(RecordingScheduler::default(), RecordingNotifier::default(), 42)
    }

    fn last_timer(seq: &TestSequencer) -> (Duration, TimerToken) {
        *seq.scheduler().scheduled.last().expect("nothing scheduled")
    }

    fn fire_last(seq: &mut TestSequencer) -> Step {
        let (_, token) = last_timer(seq);
        seq.fire(token);
        token.step
    }

    /// Fire timers until the current round is active.
    fn advance_to_active(seq: &mut TestSequencer) {
        for _ in 0..4 {
            if seq.round_active() {
                return;
            }
            fire_last(seq);
        }
        assert!(seq.round_active(), "round never became active");
    }

    fn play_to_end(seq: &mut TestSequencer, presses_per_round: u32) {
        for _ in 0..100 {
            if seq.phase() == Phase::Finished {
                return;
            }
            if seq.round_active() {
                for _ in 0..presses_per_round {
                    seq.register_input();
                }
            }
            fire_last(seq);
        }
        panic!("game did not finish");
    }

    #[test]
    fn test_starts_idle() {
        let seq = sequencer();
        assert_eq!(seq.phase(), Phase::Idle);
        assert!(seq.start_enabled());
        assert!(seq.summary().is_none());
        assert!(seq.scheduler().scheduled.is_empty());
    }

    #[test]
    fn test_start_game_schedules_first_round_after_one_second() {
        let mut seq = sequencer();
        seq.start_game();

        let (delay, token) = last_timer(&seq);
        assert_eq!(delay, Duration::from_secs(1));
        assert_eq!(token.step, Step::StartRound);
        assert_eq!(seq.phase(), Phase::Waiting { round: 1 });
        assert!(!seq.start_enabled());
        assert_eq!(seq.snapshot().current_round, 0);
        assert!(matches!(
            seq.notifier().events[0],
            GameEvent::GameStarted { total_rounds: 10, .. }
        ));
    }

    #[test]
    fn test_completed_game_has_one_result_per_round() {
        let mut seq = sequencer();
        seq.start_game();
        play_to_end(&mut seq, 2);

        let summary = seq.summary().unwrap();
        assert_eq!(summary.results.len(), defaults::TOTAL_ROUNDS as usize);
        assert!(summary.results.iter().all(|&c| c == 2));
        assert_eq!(summary.mean, 2.0);
        assert!(seq.start_enabled());
        assert!(matches!(
            seq.notifier().events.last(),
            Some(GameEvent::Finished { .. })
        ));
    }

    #[test]
    fn test_phase_timings() {
        let mut seq = sequencer();
        seq.start_game();
        play_to_end(&mut seq, 0);

        let scheduled = &seq.scheduler().scheduled;
        // start delay + (wait, window, pause) per round
        assert_eq!(scheduled.len(), 1 + 3 * defaults::TOTAL_ROUNDS as usize);
        for (delay, token) in scheduled {
            match token.step {
                Step::ActivateRound => {
                    assert!(defaults::WAIT_SECS.contains(&delay.as_secs()));
                    assert_eq!(delay.subsec_nanos(), 0);
                }
                Step::EndRound => assert_eq!(*delay, Duration::from_secs(3)),
                Step::StartRound => assert_eq!(*delay, Duration::from_secs(1)),
            }
        }
    }

    #[test]
    fn test_results_track_current_round() {
        let mut seq = sequencer();
        seq.start_game();

        for _ in 0..defaults::TOTAL_ROUNDS {
            fire_last(&mut seq);
            let snapshot = seq.snapshot();
            assert!(matches!(snapshot.phase, Phase::Waiting { .. }));
            assert_eq!(snapshot.results.len() as u32, snapshot.current_round - 1);

            fire_last(&mut seq);
            let snapshot = seq.snapshot();
            assert!(snapshot.phase.round_active());
            assert_eq!(snapshot.results.len() as u32, snapshot.current_round - 1);

            fire_last(&mut seq);
        }
    }

    #[test]
    fn test_presses_after_window_do_not_count() {
        let mut seq = sequencer();
        seq.start_game();
        advance_to_active(&mut seq);

        for _ in 0..5 {
            assert!(seq.register_input());
        }
        assert_eq!(fire_last(&mut seq), Step::EndRound);

        assert!(!seq.register_input());
        assert!(!seq.register_input());
        assert_eq!(seq.snapshot().results, vec![5]);
    }

    #[test]
    fn test_presses_while_waiting_are_ignored() {
        let mut seq = sequencer();
        seq.start_game();
        fire_last(&mut seq);
        assert_eq!(seq.phase(), Phase::Waiting { round: 1 });

        let before = seq.notifier().events.len();
        assert!(!seq.register_input());
        assert_eq!(seq.snapshot().click_count, 0);
        assert_eq!(seq.notifier().events.len(), before);
    }

    #[test]
    fn test_input_before_any_game_changes_nothing() {
        let mut seq = sequencer();
        let before = seq.snapshot();

        assert!(!seq.register_input());
        assert_eq!(seq.snapshot(), before);
        assert!(seq.notifier().events.is_empty());
    }

    #[test]
    fn test_restart_makes_old_timers_inert() {
        let mut seq = sequencer();
        seq.start_game();
        advance_to_active(&mut seq);
        seq.register_input();
        let (_, stale) = last_timer(&seq);
        let old_session = seq.session();

        seq.start_game();
        assert_ne!(seq.session(), old_session);
        let snapshot = seq.snapshot();
        assert_eq!(snapshot.current_round, 0);
        assert!(snapshot.results.is_empty());

        let scheduled_before = seq.scheduler().scheduled.len();
        let events_before = seq.notifier().events.len();
        seq.fire(stale);
        assert_eq!(seq.snapshot(), snapshot);
        assert_eq!(seq.scheduler().scheduled.len(), scheduled_before);
        assert_eq!(seq.notifier().events.len(), events_before);
    }

    #[test]
    fn test_start_game_twice_in_succession() {
        let mut seq = sequencer();
        seq.start_game();
        let (_, first) = last_timer(&seq);
        seq.start_game();

        seq.fire(first);
        assert_eq!(seq.snapshot().current_round, 0);

        fire_last(&mut seq);
        assert_eq!(seq.snapshot().current_round, 1);
        play_to_end(&mut seq, 1);
        assert_eq!(seq.summary().unwrap().results.len(), 10);
    }

    #[test]
    fn test_timer_fired_twice_acts_once() {
        let mut seq = sequencer();
        seq.start_game();
        let (_, token) = last_timer(&seq);

        seq.fire(token);
        seq.fire(token);
        assert_eq!(seq.snapshot().current_round, 1);
    }

    #[test]
    fn test_steps_are_inert_when_not_active() {
        let mut seq = sequencer();
        seq.start_round();
        seq.activate_round();
        seq.end_round();

        assert_eq!(seq.phase(), Phase::Idle);
        assert!(seq.snapshot().results.is_empty());
        assert!(seq.scheduler().scheduled.is_empty());
    }

    #[test]
    fn test_end_game_outside_a_game_is_inert() {
        let mut seq = sequencer();
        seq.end_game();
        assert_eq!(seq.phase(), Phase::Idle);
        assert!(seq.summary().is_none());
        assert!(seq.notifier().events.is_empty());

        seq.start_game();
        play_to_end(&mut seq, 2);
        let events = seq.notifier().events.len();
        seq.end_game();
        assert_eq!(seq.notifier().events.len(), events);
        assert_eq!(seq.summary().unwrap().results.len(), 10);
    }

    #[test]
    fn test_late_timer_after_finish_is_inert() {
        let mut seq = sequencer();
        seq.start_game();
        play_to_end(&mut seq, 3);
        let (_, token) = last_timer(&seq);

        seq.fire(token);
        assert_eq!(seq.phase(), Phase::Finished);
        assert_eq!(seq.summary().unwrap().results.len(), 10);
    }

    #[test]
    fn test_restart_after_finish_clears_summary() {
        let mut seq = sequencer();
        seq.start_game();
        play_to_end(&mut seq, 1);
        assert!(seq.summary().is_some());

        seq.start_game();
        assert!(seq.summary().is_none());
        assert_eq!(seq.phase(), Phase::Waiting { round: 1 });
    }

    #[test]
    fn test_same_seed_same_delays() {
        let delays = |seed| {
            let mut seq = RoundSequencer::with_seed(
                RecordingScheduler::default(),
                RecordingNotifier::default(),
                seed,
            );
            seq.start_game();
            play_to_end(&mut seq, 0);
            seq.scheduler()
                .scheduled
                .iter()
                .map(|(d, _)| *d)
                .collect::<Vec<_>>()
        };
        assert_eq!(delays(7), delays(7));
    }

    #[test]
    fn test_closure_notifier() {
        let mut seen = Vec::new();
        {
            let mut seq = RoundSequencer::with_seed(
                RecordingScheduler::default(),
                |e: GameEvent| seen.push(e),
                1,
            );
            seq.start_game();
        }
        assert_eq!(seen.len(), 1);
    }
}
