//! Timed color perception games.
//!
//! Both modes share one [`GameSession`] driven as a reducer: every user
//! interaction and every clock tick is a [`GameEvent`] applied to the
//! session, which answers with a [`Transition`]. Round setup takes an
//! injected random source so games replay exactly under a seeded generator.
//!
//! # Module Structure
//!
//! - `mode`: Game modes and the shared rules (duration, rounds)
//! - `clock`: Countdown shared by both modes
//! - `color_match`: Find-the-target rounds
//! - `pattern`: Select-all-matching-tiles rounds
//! - `session`: The session state machine

mod clock;
mod color_match;
mod mode;
mod pattern;
mod session;

pub use clock::{ClockTick, SessionClock};
pub use color_match::ColorMatchRound;
pub use mode::{GAME_DURATION_SECS, GameMode, TOTAL_ROUNDS};
pub use pattern::{PatternRound, TileToggle};
pub use session::{GameEvent, GamePhase, GameSession, RoundState, Transition};
