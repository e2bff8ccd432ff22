use super::clock::{ClockTick, SessionClock};
use super::color_match::ColorMatchRound;
use super::mode::{GAME_DURATION_SECS, GameMode, TOTAL_ROUNDS};
use super::pattern::{PatternRound, TileToggle};
use crate::performance::PerformanceResult;
use rand::Rng;

const MATCH_REWARD: u32 = 10;
const MISS_PENALTY: u32 = 2;
const TILE_REWARD: u32 = 5;
const PATTERN_BONUS: u32 = 20;

/// Discrete inputs to a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// One second elapsed
    Tick,
    /// Color-match: the candidate at this index was clicked
    PickCandidate(usize),
    /// Pattern: the tile at this index was clicked
    ToggleTile(usize),
    /// Pattern: the current selection was submitted
    SubmitPattern,
}

/// What applying an event did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The event does not apply to this session in its current state.
    Ignored,
    Ticked { remaining: u32 },
    /// Wrong candidate; `penalty` is what was actually deducted after flooring at 0.
    Missed { penalty: u32 },
    TileSelected { awarded: u32 },
    TileDeselected,
    /// A new round started; `awarded` is what the finishing action earned.
    RoundAdvanced { round: u32, awarded: u32 },
    /// The game ended, by completing the last round or by running out of time.
    Finished(PerformanceResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the player
    Selecting,
    Finished,
}

/// The board of the current round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    ColorMatch(ColorMatchRound),
    Pattern(PatternRound),
}

impl RoundState {
    fn generate<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> Self {
        match mode {
            GameMode::ColorMatch => RoundState::ColorMatch(ColorMatchRound::generate(rng)),
            GameMode::Pattern => RoundState::Pattern(PatternRound::generate(rng)),
        }
    }
}

/// A timed game of either mode.
///
/// The session is a reducer: [`GameSession::apply`] takes one event at a
/// time, and once the session is [`GamePhase::Finished`] every further event
/// (stray clock ticks included) is ignored.
#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    score: u32,
    current_round: u32,
    total_rounds: u32,
    clock: SessionClock,
    phase: GamePhase,
    round: RoundState,
}

impl GameSession {
    /// Starts a game: full clock, round 1, score 0, first board drawn from `rng`.
    pub fn start<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> Self {
        let mut clock = SessionClock::new(GAME_DURATION_SECS);
        clock.start();

        tracing::debug!(%mode, "game started");
        Self {
            mode,
            score: 0,
            current_round: 1,
            total_rounds: TOTAL_ROUNDS,
            clock,
            phase: GamePhase::Selecting,
            round: RoundState::generate(mode, rng),
        }
    }

    /// Starts over in the same mode.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::start(self.mode, rng);
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_round(&self) -> u32 {
        self.current_round
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.clock.elapsed()
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Result record for the session as it stands.
    pub fn result(&self) -> PerformanceResult {
        PerformanceResult::new(self.mode, self.score, self.clock.elapsed())
    }

    pub fn tick(&mut self) -> Transition {
        if self.is_finished() {
            return Transition::Ignored;
        }

        match self.clock.tick() {
            ClockTick::Ignored => Transition::Ignored,
            ClockTick::Running { remaining } => Transition::Ticked { remaining },
            ClockTick::Expired => {
                tracing::debug!(round = self.current_round, "time is up");
                self.finish()
            }
        }
    }

    /// Applies one event. `rng` is only drawn from when a new round starts.
    pub fn apply<R: Rng + ?Sized>(&mut self, event: GameEvent, rng: &mut R) -> Transition {
        if self.is_finished() {
            return Transition::Ignored;
        }

        match event {
            GameEvent::Tick => self.tick(),
            GameEvent::PickCandidate(index) => self.pick_candidate(index, rng),
            GameEvent::ToggleTile(index) => self.toggle_tile(index),
            GameEvent::SubmitPattern => self.submit_pattern(rng),
        }
    }

    fn pick_candidate<R: Rng + ?Sized>(&mut self, index: usize, rng: &mut R) -> Transition {
        let RoundState::ColorMatch(round) = &self.round else {
            return Transition::Ignored;
        };

        match round.is_match(index) {
            None => Transition::Ignored,
            Some(true) => {
                self.score += MATCH_REWARD;
                self.complete_round(MATCH_REWARD, rng)
            }
            Some(false) => {
                let before = self.score;
                self.score = self.score.saturating_sub(MISS_PENALTY);
                Transition::Missed {
                    penalty: before - self.score,
                }
            }
        }
    }

    fn toggle_tile(&mut self, index: usize) -> Transition {
        let RoundState::Pattern(round) = &mut self.round else {
            return Transition::Ignored;
        };

        match round.toggle(index) {
            None => Transition::Ignored,
            // Granted on selection and kept even if the tile is deselected later
            Some(TileToggle::Selected { matches_reference }) => {
                let awarded = if matches_reference { TILE_REWARD } else { 0 };
                self.score += awarded;
                Transition::TileSelected { awarded }
            }
            Some(TileToggle::Deselected) => Transition::TileDeselected,
        }
    }

    fn submit_pattern<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Transition {
        let RoundState::Pattern(round) = &self.round else {
            return Transition::Ignored;
        };

        let awarded = if round.is_exact_selection() {
            PATTERN_BONUS
        } else {
            0
        };
        self.score += awarded;
        self.complete_round(awarded, rng)
    }

    fn complete_round<R: Rng + ?Sized>(&mut self, awarded: u32, rng: &mut R) -> Transition {
        if self.current_round >= self.total_rounds {
            return self.finish();
        }

        self.current_round += 1;
        self.round = RoundState::generate(self.mode, rng);
        tracing::debug!(round = self.current_round, score = self.score, "next round");
        Transition::RoundAdvanced {
            round: self.current_round,
            awarded,
        }
    }

    fn finish(&mut self) -> Transition {
        self.phase = GamePhase::Finished;
        self.clock.stop();

        let result = self.result();
        tracing::info!(
            mode = %result.mode,
            score = result.score,
            elapsed = result.elapsed_seconds,
            "game finished"
        );
        Transition::Finished(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn target_index(session: &GameSession) -> usize {
        match session.round() {
            RoundState::ColorMatch(round) => (0..round.candidates().len())
                .find(|&i| round.is_match(i) == Some(true))
                .unwrap(),
            RoundState::Pattern(_) => panic!("not a color-match round"),
        }
    }

    fn wrong_index(session: &GameSession) -> usize {
        match session.round() {
            RoundState::ColorMatch(round) => (0..round.candidates().len())
                .find(|&i| round.is_match(i) == Some(false))
                .unwrap(),
            RoundState::Pattern(_) => panic!("not a color-match round"),
        }
    }

    fn pattern_round(session: &GameSession) -> &PatternRound {
        match session.round() {
            RoundState::Pattern(round) => round,
            RoundState::ColorMatch(_) => panic!("not a pattern round"),
        }
    }

    #[test]
    fn test_start_state() {
        let session = GameSession::start(GameMode::ColorMatch, &mut rng());
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_round(), 1);
        assert_eq!(session.total_rounds(), 10);
        assert_eq!(session.remaining_seconds(), 30);
        assert_eq!(session.phase(), GamePhase::Selecting);
    }

    #[test]
    fn test_correct_pick_scores_and_advances() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::ColorMatch, &mut rng);
        let index = target_index(&session);
        let transition = session.apply(GameEvent::PickCandidate(index), &mut rng);
        assert_eq!(transition, Transition::RoundAdvanced { round: 2, awarded: 10 });
        assert_eq!(session.score(), 10);
    }

    #[test]
    fn test_wrong_pick_penalty_floors_at_zero() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::ColorMatch, &mut rng);

        let wrong = wrong_index(&session);
        assert_eq!(
            session.apply(GameEvent::PickCandidate(wrong), &mut rng),
            Transition::Missed { penalty: 0 }
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_round(), 1);

        let index = target_index(&session);
        session.apply(GameEvent::PickCandidate(index), &mut rng);
        let wrong = wrong_index(&session);
        assert_eq!(
            session.apply(GameEvent::PickCandidate(wrong), &mut rng),
            Transition::Missed { penalty: 2 }
        );
        assert_eq!(session.score(), 8);
        assert_eq!(session.current_round(), 2);
    }

    #[test]
    fn test_tenth_correct_pick_finishes() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::ColorMatch, &mut rng);
        for round in 1..10 {
            let index = target_index(&session);
            let transition = session.apply(GameEvent::PickCandidate(index), &mut rng);
            assert_eq!(transition, Transition::RoundAdvanced { round: round + 1, awarded: 10 });
        }

        let index = target_index(&session);
        let transition = session.apply(GameEvent::PickCandidate(index), &mut rng);
        assert_eq!(
            transition,
            Transition::Finished(PerformanceResult::new(GameMode::ColorMatch, 100, 0))
        );
        assert!(session.is_finished());
        assert_eq!(session.current_round(), 10);
    }

    #[test]
    fn test_clock_expiry_finishes_mid_game() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::Pattern, &mut rng);
        for _ in 0..29 {
            assert!(matches!(session.tick(), Transition::Ticked { .. }));
        }
        let transition = session.tick();
        assert_eq!(
            transition,
            Transition::Finished(PerformanceResult::new(GameMode::Pattern, 0, 30))
        );
        assert_eq!(session.remaining_seconds(), 0);
        assert_eq!(session.tick(), Transition::Ignored);
        assert_eq!(session.apply(GameEvent::SubmitPattern, &mut rng), Transition::Ignored);
    }

    #[test]
    fn test_events_for_other_mode_are_ignored() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::ColorMatch, &mut rng);
        assert_eq!(session.apply(GameEvent::ToggleTile(0), &mut rng), Transition::Ignored);
        assert_eq!(session.apply(GameEvent::SubmitPattern, &mut rng), Transition::Ignored);
        assert_eq!(session.apply(GameEvent::PickCandidate(6), &mut rng), Transition::Ignored);
    }

    #[test]
    fn test_deselect_keeps_tile_reward_and_empty_submit_earns_nothing() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::Pattern, &mut rng);
        let index = *pattern_round(&session).matching_indices().iter().next().unwrap();

        assert_eq!(
            session.apply(GameEvent::ToggleTile(index), &mut rng),
            Transition::TileSelected { awarded: 5 }
        );
        assert_eq!(session.score(), 5);

        assert_eq!(
            session.apply(GameEvent::ToggleTile(index), &mut rng),
            Transition::TileDeselected
        );
        assert_eq!(session.score(), 5);

        assert_eq!(
            session.apply(GameEvent::SubmitPattern, &mut rng),
            Transition::RoundAdvanced { round: 2, awarded: 0 }
        );
        assert_eq!(session.score(), 5);
    }

    #[test]
    fn test_exact_pattern_submission_earns_bonus() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::Pattern, &mut rng);
        let matching = pattern_round(&session).matching_indices();
        for &index in &matching {
            session.apply(GameEvent::ToggleTile(index), &mut rng);
        }
        let tile_points = 5 * matching.len() as u32;
        assert_eq!(session.score(), tile_points);

        assert_eq!(
            session.apply(GameEvent::SubmitPattern, &mut rng),
            Transition::RoundAdvanced { round: 2, awarded: 20 }
        );
        assert_eq!(session.score(), tile_points + 20);
        assert!(pattern_round(&session).selected().is_empty());
    }

    #[test]
    fn test_selecting_a_wrong_tile_awards_nothing() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::Pattern, &mut rng);
        let matching = pattern_round(&session).matching_indices();
        let other = (0..PatternRound::TILES).find(|i| !matching.contains(i)).unwrap();
        assert_eq!(
            session.apply(GameEvent::ToggleTile(other), &mut rng),
            Transition::TileSelected { awarded: 0 }
        );
    }

    #[test]
    fn test_pattern_game_ends_after_ten_submissions() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::Pattern, &mut rng);
        for _ in 0..9 {
            assert!(matches!(
                session.apply(GameEvent::SubmitPattern, &mut rng),
                Transition::RoundAdvanced { .. }
            ));
        }
        assert!(matches!(
            session.apply(GameEvent::SubmitPattern, &mut rng),
            Transition::Finished(_)
        ));
        assert_eq!(session.current_round(), 10);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut rng = rng();
        let mut session = GameSession::start(GameMode::ColorMatch, &mut rng);
        let index = target_index(&session);
        session.apply(GameEvent::PickCandidate(index), &mut rng);
        session.tick();
        session.restart(&mut rng);
        assert_eq!(session.score(), 0);
        assert_eq!(session.current_round(), 1);
        assert_eq!(session.remaining_seconds(), 30);
        assert!(!session.is_finished());
    }

    #[test]
    fn test_seeded_games_replay_identically() {
        let a = GameSession::start(GameMode::Pattern, &mut rng());
        let b = GameSession::start(GameMode::Pattern, &mut rng());
        assert_eq!(a.round(), b.round());
    }
}
