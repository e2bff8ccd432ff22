//! Real-time driver for game sessions.
//!
//! The core [`GameSession`] is a pure reducer; this controller owns one,
//! supplies the randomness and runs the one-second countdown as a background
//! tokio task that feeds [`GameEvent::Tick`] into a channel.

use ophthalmos_core::game::{GameEvent, GameMode, GameSession, Transition};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;

/// Countdown period of a running game.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const TICK_BUFFER: usize = 8;

/// Owns the current game session and its countdown.
pub struct GameController {
    session: Option<GameSession>,
    rng: StdRng,
    tick_interval: Duration,
    /// Cancels the countdown of the current session
    ticker: Option<CancellationToken>,
}

impl GameController {
    /// Controller with an OS-seeded random generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Controller whose rounds are reproducible for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            session: None,
            rng,
            tick_interval: TICK_INTERVAL,
            ticker: None,
        }
    }

    /// Overrides the countdown period.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Whether a session exists and is still accepting input.
    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_finished())
    }

    /// Starts a fresh session in `mode`, replacing any current one.
    ///
    /// Returns the tick stream for the new session; feed every item back
    /// through [`handle`](Self::handle). No tick is sent after the session
    /// finishes, the controller is reset or another game starts, but ticks
    /// already buffered are still delivered before the stream closes. Drop
    /// the previous receiver when starting a new game, otherwise its leftover
    /// ticks count against the new session. Must be called from within a
    /// tokio runtime.
    pub fn start(&mut self, mode: GameMode) -> mpsc::Receiver<GameEvent> {
        self.stop_ticker();
        self.session = Some(GameSession::start(mode, &mut self.rng));

        let token = CancellationToken::new();
        let ticks = spawn_ticker(self.tick_interval, token.clone());
        self.ticker = Some(token);

        tracing::trace!(period = ?self.tick_interval, "countdown started");
        ticks
    }

    /// Applies `event` to the current session.
    ///
    /// Events arriving without a session, or after it finished, are ignored.
    pub fn handle(&mut self, event: GameEvent) -> Transition {
        let Some(session) = self.session.as_mut() else {
            return Transition::Ignored;
        };

        let transition = session.apply(event, &mut self.rng);
        if matches!(transition, Transition::Finished(_)) {
            self.stop_ticker();
        }
        transition
    }

    /// Stops the countdown and discards the session.
    ///
    /// A game left before it finished produces no result.
    pub fn reset(&mut self) {
        self.stop_ticker();
        if self.session.take().is_some_and(|s| !s.is_finished()) {
            tracing::debug!("unfinished game discarded");
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for GameController {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

fn spawn_ticker(period: Duration, token: CancellationToken) -> mpsc::Receiver<GameEvent> {
    let (tx, rx) = mpsc::channel(TICK_BUFFER);

    tokio::spawn(async move {
        // First tick one full period after the start, not immediately
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = ticker.tick() => {
                    if tx.send(GameEvent::Tick).await.is_err() {
                        break;
                    }
                }
            }
        }
        tracing::trace!("ticker stopped");
    });

    rx
}
