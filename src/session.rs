use serde::{Deserialize, Serialize};

use crate::*;

/// Session-level game status. `Won` and `Lost` are terminal; only an
/// explicit [`GameSession::reset`] leaves them.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GamePhase {
    InProgress,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GamePhase {
    fn default() -> Self {
        Self::InProgress
    }
}

/// What a reveal request did to the game.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// The request was dropped: terminal phase, out-of-bounds target, or an
    /// already revealed cell.
    Ignored,
    Continued,
    Won,
    Lost,
}

impl GameEvent {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// One game: a board plus the phase that gates every action on it.
///
/// The session owns the board exclusively; the presentation layer reads it
/// through [`GameSession::board`] and never mutates it directly.
#[derive(Clone, Debug)]
pub struct GameSession<G> {
    config: BoardConfig,
    generator: G,
    board: Board,
    phase: GamePhase,
    fatal_mine: Option<Coord2>,
}

impl GameSession<ShuffleMineGenerator> {
    /// Session on the fixed expert board, seeded from OS entropy.
    pub fn expert() -> Self {
        Self::new(BoardConfig::EXPERT, ShuffleMineGenerator::from_entropy())
            .expect("expert preset is a valid configuration")
    }
}

impl<G: MineGenerator> GameSession<G> {
    /// Fails fast on configurations mine placement could not satisfy.
    pub fn new(config: BoardConfig, mut generator: G) -> Result<Self> {
        config.validate()?;
        let board = Board::new(generator.generate(config));
        Ok(Self {
            config,
            generator,
            board,
            phase: GamePhase::InProgress,
            fatal_mine: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> BoardConfig {
        self.config
    }

    /// The mine that ended the game, for end-of-game display. `None` while
    /// the game is running or after a win.
    pub fn fatal_mine(&self) -> Option<Coord2> {
        self.fatal_mine
    }

    /// Primary pointer action: open a cell.
    ///
    /// The mine check happens here, before the board is touched;
    /// [`Board::reveal`] itself never consults the mine mask.
    pub fn handle_reveal(&mut self, coords: Coord2) -> GameEvent {
        if self.phase.is_terminal() || !self.board.in_bounds(coords) {
            return GameEvent::Ignored;
        }
        if self.board.cell_at(coords).is_revealed() {
            return GameEvent::Ignored;
        }

        if self.board.has_mine_at(coords) {
            self.phase = GamePhase::Lost;
            self.fatal_mine = Some(coords);
            log::debug!("mine hit at {:?}", coords);
            return GameEvent::Lost;
        }

        self.board.reveal(coords);

        if self.board.is_fully_cleared() {
            self.phase = GamePhase::Won;
            log::debug!("board fully cleared");
            GameEvent::Won
        } else {
            GameEvent::Continued
        }
    }

    /// Secondary pointer action: cycle the cell's mark.
    pub fn handle_mark(&mut self, coords: Coord2) -> MarkResult {
        if self.phase.is_terminal() {
            return MarkResult::Rejected;
        }
        self.board.cycle_mark(coords)
    }

    /// Discards the board, generates a fresh layout, and returns the phase
    /// to `InProgress`. The board is replaced wholesale so no stale state
    /// can survive into the next game.
    pub fn reset(&mut self) {
        self.board = Board::new(self.generator.generate(self.config));
        self.phase = GamePhase::InProgress;
        self.fatal_mine = None;
        log::debug!("session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hands out the same layout on every generate call.
    struct FixedLayoutGenerator(MineLayout);

    impl MineGenerator for FixedLayoutGenerator {
        fn generate(&mut self, _config: BoardConfig) -> MineLayout {
            self.0.clone()
        }
    }

    fn session(size: Coord2, mines: &[Coord2]) -> GameSession<FixedLayoutGenerator> {
        let layout = MineLayout::from_mine_coords(size, mines).unwrap();
        let config = layout.board_config();
        GameSession::new(config, FixedLayoutGenerator(layout)).unwrap()
    }

    #[test]
    fn new_session_starts_in_progress() {
        let session = session((3, 3), &[(2, 2)]);
        assert_eq!(session.phase(), GamePhase::InProgress);
        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.fatal_mine(), None);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let result = GameSession::new(
            BoardConfig::new_unchecked(2, 2, 4),
            FixedLayoutGenerator(layout),
        );
        assert_eq!(result.err(), Some(GameError::TooManyMines));
    }

    #[test]
    fn revealing_a_mine_loses_without_touching_the_board() {
        let mut session = session((3, 3), &[(2, 2)]);

        let event = session.handle_reveal((2, 2));

        assert_eq!(event, GameEvent::Lost);
        assert_eq!(session.phase(), GamePhase::Lost);
        assert_eq!(session.fatal_mine(), Some((2, 2)));
        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.board().cell_at((2, 2)), CellState::Hidden);
    }

    #[test]
    fn revealing_a_flagged_mine_still_loses() {
        let mut session = session((3, 3), &[(2, 2)]);

        assert_eq!(session.handle_mark((2, 2)), MarkResult::Flagged);
        assert_eq!(session.handle_reveal((2, 2)), GameEvent::Lost);
    }

    #[test]
    fn clearing_every_safe_cell_wins() {
        let mut session = session((3, 3), &[(2, 2)]);

        // single mine in a corner: the rest of the board is one zero
        // region plus its border, so one reveal clears it
        let event = session.handle_reveal((0, 0));

        assert_eq!(event, GameEvent::Won);
        assert_eq!(session.phase(), GamePhase::Won);
        assert!(session.board().is_fully_cleared());
        assert_eq!(session.fatal_mine(), None);
    }

    #[test]
    fn safe_reveal_continues_the_game() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);

        let event = session.handle_reveal((0, 2));

        assert_eq!(event, GameEvent::Continued);
        assert_eq!(session.phase(), GamePhase::InProgress);
    }

    #[test]
    fn out_of_bounds_and_re_reveals_are_ignored() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);

        assert_eq!(session.handle_reveal((9, 9)), GameEvent::Ignored);
        assert!(!session.handle_reveal((0, 9)).has_update());

        assert_eq!(session.handle_reveal((0, 2)), GameEvent::Continued);
        assert_eq!(session.handle_reveal((0, 2)), GameEvent::Ignored);
    }

    #[test]
    fn terminal_phase_locks_every_action_until_reset() {
        let mut session = session((3, 3), &[(2, 2)]);

        session.handle_reveal((2, 2));
        assert_eq!(session.phase(), GamePhase::Lost);

        assert_eq!(session.handle_reveal((0, 0)), GameEvent::Ignored);
        assert_eq!(session.handle_mark((0, 0)), MarkResult::Rejected);
        assert_eq!(session.board().revealed_count(), 0);

        session.reset();

        assert_eq!(session.phase(), GamePhase::InProgress);
        assert_eq!(session.handle_mark((0, 0)), MarkResult::Flagged);
    }

    #[test]
    fn reset_discards_revealed_and_flagged_state() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);

        session.handle_reveal((0, 2));
        session.handle_mark((1, 0));
        assert!(session.board().revealed_count() > 0);

        session.reset();

        assert_eq!(session.board().revealed_count(), 0);
        assert_eq!(session.board().flagged_count(), 0);
        assert_eq!(session.fatal_mine(), None);
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(session.board().cell_at((row, col)), CellState::Hidden);
            }
        }
    }

    #[test]
    fn reset_draws_a_fresh_mine_layout() {
        let mut session =
            GameSession::new(BoardConfig::EXPERT, ShuffleMineGenerator::from_seed(3)).unwrap();

        let before = session.board().mine_layout().clone();
        session.reset();
        let after = session.board().mine_layout().clone();

        assert_ne!(before, after);
        assert_eq!(after.mine_count(), 99);
    }

    #[test]
    fn marks_cycle_through_the_session_boundary() {
        let mut session = session((3, 3), &[(2, 2)]);

        assert_eq!(session.handle_mark((0, 0)), MarkResult::Flagged);
        assert_eq!(session.handle_mark((0, 0)), MarkResult::Questioned);
        assert_eq!(session.handle_mark((0, 0)), MarkResult::Hidden);
        assert_eq!(session.board().mines_left(), 1);
    }
}
