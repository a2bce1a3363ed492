//! Game state module - manages the complete game state
//!
//! This module ties together all core components: board, active/next piece,
//! the piece bag, and scoring. It handles gravity timing, piece movement,
//! rotation, locking, line clears, and game-over detection.

use crate::board::Board;
use crate::piece::ActivePiece;
use crate::pieces::try_rotate;
use crate::rng::PieceBag;
use crate::scoring::{Progress, ScoreResult};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, LockEvent};

/// Complete game state of one session
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<ActivePiece>,
    next: ActivePiece,
    bag: PieceBag,
    progress: Progress,
    /// Milliseconds of gravity accumulated since the last drop.
    drop_counter_ms: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    game_over: bool,
    started: bool,
}

impl GameState {
    /// Create a new game with the given RNG seed
    ///
    /// The next-piece slot is filled immediately; the first active piece
    /// appears on [`start`](Self::start).
    pub fn new(seed: u32) -> Self {
        let mut bag = PieceBag::new(seed);
        let next = ActivePiece::new(bag.draw());

        Self {
            board: Board::new(),
            active: None,
            next,
            bag,
            progress: Progress::new(),
            drop_counter_ms: 0,
            last_event: None,
            game_over: false,
            started: false,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.spawn_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Started and not yet over: the only state that accepts input and gravity
    pub fn is_running(&self) -> bool {
        self.started && !self.game_over
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    /// Lines cleared toward the next level
    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn next_piece(&self) -> ActivePiece {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u32 {
        self.bag.seed()
    }

    /// RNG state to seed a follow-up session with
    pub fn rng_state(&self) -> u32 {
        self.bag.rng_state()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active;
        out.next = self.next;
        out.started = self.started;
        out.game_over = self.game_over;
        out.seed = self.bag.seed();
        out.score = self.progress.score;
        out.level = self.progress.level;
        out.lines = self.progress.lines;
        out.drop_interval_ms = self.progress.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Promote the next piece to active and draw a new next piece
    ///
    /// Returns false (and ends the game) if the freshly spawned piece already
    /// collides. The blocked piece stays visible as the active piece.
    /// Does nothing once the game is over.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let mut piece = std::mem::replace(&mut self.next, ActivePiece::new(self.bag.draw()));
        piece.x = piece.spawn_x();
        piece.y = 0;

        let blocked = piece.collides(&self.board);
        self.active = Some(piece);

        if blocked {
            self.game_over = true;
            return false;
        }
        true
    }

    /// Try to move the active piece sideways by `dx`
    pub fn try_move(&mut self, dx: i8) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, 0);
        if moved.collides(&self.board) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    /// Move the active piece down one row, or lock it where it is
    ///
    /// Returns true if the piece moved. The gravity counter restarts either way.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        self.drop_counter_ms = 0;

        let lowered = active.shifted(0, 1);
        if !lowered.collides(&self.board) {
            self.active = Some(lowered);
            return true;
        }

        self.lock_piece();
        false
    }

    /// Drop the active piece to its resting row and lock it
    ///
    /// Returns the number of rows the piece fell.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_running() {
            return 0;
        }
        let Some(mut active) = self.active else {
            return 0;
        };

        let start_y = active.y;
        while !active.collides(&self.board) {
            active.y += 1;
        }
        active.y -= 1;
        let distance = (active.y - start_y).max(0) as u32;

        self.active = Some(active);
        // The row below is blocked, so this locks.
        self.soft_drop();
        distance
    }

    /// Rotate the active piece clockwise, kicking sideways if needed
    pub fn try_rotate(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match try_rotate(&active, |candidate| candidate.collides(&self.board)) {
            Some(rotated) => {
                self.active = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Merge the active piece into the board, clear lines, score, and spawn
    pub fn lock_piece(&mut self) {
        if !self.is_running() {
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };

        self.board.merge(&active);

        let lines_cleared = self.board.sweep_lines();
        let result = if lines_cleared > 0 {
            self.progress.record_clear(lines_cleared)
        } else {
            ScoreResult::default()
        };

        self.spawn_piece();

        self.last_event = Some(LockEvent {
            kind: active.kind,
            lines_cleared,
            points: result.points,
            level: self.progress.level,
            level_up: result.levels_gained > 0,
            game_over: self.game_over,
        });
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Advance gravity by `elapsed_ms`
    ///
    /// Returns true if the drop interval was exceeded and a soft drop ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_running() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.progress.drop_interval_ms {
            self.soft_drop();
            return true;
        }
        false
    }

    /// Apply a game action
    ///
    /// `Start` is a session-level request and is not handled here.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::SoftDrop => {
                let running = self.is_running();
                self.soft_drop();
                running
            }
            GameAction::HardDrop => {
                let running = self.is_running();
                self.hard_drop();
                running
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::Start => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::get_shape;
    use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

    fn started(seed: u32) -> GameState {
        let mut state = GameState::new(seed);
        state.start();
        state
    }

    fn with_active(state: &mut GameState, kind: PieceKind, x: i8, y: i8) {
        state.active = Some(ActivePiece {
            x,
            y,
            ..ActivePiece::new(kind)
        });
    }

    fn fill(state: &mut GameState, x: i8, y: i8) {
        state.board.set(x, y, Cell::Filled(PieceKind::Z.color()));
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert!(!state.started);
        assert!(!state.game_over);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 0);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.active.is_none());
    }

    #[test]
    fn test_start_spawns_centered_piece() {
        let mut state = GameState::new(12345);
        let next = state.next_piece();

        state.start();

        let active = state.active.unwrap();
        assert_eq!(active.kind, next.kind);
        assert_eq!(active.y, 0);
        assert_eq!(active.x, 5 - (active.shape.size() / 2) as i8);
        assert!(state.is_running());
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut state = started(3);
        let active = state.active;
        state.start();
        assert_eq!(state.active, active);
    }

    #[test]
    fn test_spawn_takes_next_and_draws_new() {
        let mut state = started(7);
        let next = state.next_piece();

        assert!(state.spawn_piece());
        assert_eq!(state.active.unwrap().kind, next.kind);
    }

    #[test]
    fn test_move_then_back_restores_x() {
        let mut state = started(11);
        with_active(&mut state, PieceKind::T, 4, 5);

        assert!(state.try_move(1));
        assert_eq!(state.active.unwrap().x, 5);
        assert!(state.try_move(-1));
        assert_eq!(state.active.unwrap().x, 4);
    }

    #[test]
    fn test_move_blocked_by_wall_is_noop() {
        let mut state = started(11);
        with_active(&mut state, PieceKind::O, 0, 5);

        assert!(!state.try_move(-1));
        assert_eq!(state.active.unwrap().x, 0);
    }

    #[test]
    fn test_move_blocked_by_settled_cell() {
        let mut state = started(11);
        with_active(&mut state, PieceKind::O, 4, 5);
        fill(&mut state, 6, 6);

        assert!(!state.try_move(1));
        assert_eq!(state.active.unwrap().x, 4);
    }

    #[test]
    fn test_soft_drop_moves_down_and_resets_counter() {
        let mut state = started(5);
        with_active(&mut state, PieceKind::T, 4, 0);
        state.drop_counter_ms = 400;

        assert!(state.soft_drop());
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.drop_counter_ms, 0);
    }

    #[test]
    fn test_soft_drop_locks_on_floor() {
        let mut state = started(5);
        with_active(&mut state, PieceKind::O, 0, 18);
        state.drop_counter_ms = 300;

        assert!(!state.soft_drop());
        assert_eq!(state.drop_counter_ms, 0);
        assert!(state.board.is_occupied(0, 18));
        assert!(state.board.is_occupied(1, 19));

        let event = state.take_last_event().unwrap();
        assert_eq!(event.kind, PieceKind::O);
        assert_eq!(event.lines_cleared, 0);
        assert!(state.take_last_event().is_none());

        // A new piece took over at the top.
        assert_eq!(state.active.unwrap().y, 0);
    }

    #[test]
    fn test_o_piece_hard_drop_lands_on_floor() {
        let mut state = started(5);
        with_active(&mut state, PieceKind::O, 4, 0);

        assert_eq!(state.hard_drop(), 18);

        for (x, y) in [(4, 18), (5, 18), (4, 19), (5, 19)] {
            assert!(state.board.is_occupied(x, y), "({x}, {y})");
        }
        let filled = state.board.cells().iter().filter(|c| c.is_filled()).count();
        assert_eq!(filled, 4);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lines(), 0);
    }

    #[test]
    fn test_o_piece_repeated_soft_drops_rest_at_bottom() {
        let mut state = started(5);
        with_active(&mut state, PieceKind::O, 4, 0);

        let mut steps = 0;
        while state.soft_drop() {
            steps += 1;
        }
        assert_eq!(steps, 18);
        assert!(state.board.is_occupied(4, 19));
        assert!(state.board.is_occupied(5, 19));
        assert!(!state.board.is_occupied(3, 19));
        assert!(!state.board.is_occupied(6, 19));
    }

    #[test]
    fn test_i_piece_completes_bottom_row() {
        let mut state = started(9);
        for x in 0..9 {
            fill(&mut state, x, 19);
        }
        fill(&mut state, 0, 18);
        fill(&mut state, 3, 10);

        // Vertical I: after one clockwise turn the occupied column is local x = 2.
        state.active = Some(ActivePiece {
            shape: get_shape(PieceKind::I).rotate_cw(),
            x: 7,
            y: 0,
            ..ActivePiece::new(PieceKind::I)
        });

        state.hard_drop();

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 1);
        assert_eq!(event.points, 40);
        assert_eq!(state.score(), 40);
        assert_eq!(state.lines(), 1);

        // Everything above shifted down by one.
        assert!(state.board.is_occupied(0, 19));
        assert!(state.board.is_occupied(3, 11));
        assert!(!state.board.is_occupied(3, 10));
        // Three I cells remain in column 9.
        for y in 17..20 {
            assert!(state.board.is_occupied(9, y), "row {y}");
        }
        assert!(state.board.row(0).iter().all(|c| !c.is_filled()));
    }

    #[test]
    fn test_line_clear_uses_level_multiplier() {
        let mut state = started(9);
        state.progress.level = 2;
        for x in 0..8 {
            fill(&mut state, x, 19);
        }
        with_active(&mut state, PieceKind::O, 8, 0);

        state.hard_drop();

        assert_eq!(state.score(), 40 * 3);
    }

    #[test]
    fn test_tetris_and_level_up() {
        let mut state = started(9);
        state.progress.lines = 9;
        for y in 16..20 {
            for x in 0..9 {
                fill(&mut state, x, y);
            }
        }
        state.active = Some(ActivePiece {
            shape: get_shape(PieceKind::I).rotate_cw(),
            x: 7,
            y: 0,
            ..ActivePiece::new(PieceKind::I)
        });

        state.hard_drop();

        let event = state.take_last_event().unwrap();
        assert_eq!(event.lines_cleared, 4);
        assert!(event.level_up);
        assert_eq!(state.score(), 1200);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 3);
        assert_eq!(state.drop_interval_ms(), 950);
        assert!(state.board.cells().iter().all(|c| !c.is_filled()));
    }

    #[test]
    fn test_rotate_in_open_space() {
        let mut state = started(2);
        with_active(&mut state, PieceKind::T, 4, 5);

        assert!(state.try_rotate());
        let active = state.active.unwrap();
        assert_eq!(active.x, 4);
        assert_eq!(active.shape, get_shape(PieceKind::T).rotate_cw());
    }

    #[test]
    fn test_four_rotations_restore_shape() {
        let mut state = started(2);
        for kind in PieceKind::ALL {
            with_active(&mut state, kind, 3, 5);
            for _ in 0..4 {
                assert!(state.try_rotate());
            }
            let active = state.active.unwrap();
            assert_eq!(active.shape, get_shape(kind), "{kind:?}");
            assert_eq!(active.x, 3);
        }
    }

    #[test]
    fn test_rotate_kicks_off_right_wall() {
        let mut state = started(2);
        // Vertical I hugging the right wall: occupied column is local x = 2.
        state.active = Some(ActivePiece {
            shape: get_shape(PieceKind::I).rotate_cw(),
            x: 7,
            y: 5,
            ..ActivePiece::new(PieceKind::I)
        });

        // Next orientation is horizontal on local row 2, spanning x..x+4.
        assert!(state.try_rotate());
        let active = state.active.unwrap();
        assert!(!active.collides(&state.board));
        assert_eq!(active.x, 6);
    }

    #[test]
    fn test_rotate_abandoned_keeps_original() {
        let mut state = started(2);
        with_active(&mut state, PieceKind::T, 4, 10);
        // Wall in everything around the piece so no kick can succeed.
        for x in 0..BOARD_WIDTH as i8 {
            fill(&mut state, x, 12);
            if !(4..7).contains(&x) {
                fill(&mut state, x, 10);
                fill(&mut state, x, 11);
            }
        }
        fill(&mut state, 4, 10);
        let before = state.active;

        assert!(!state.try_rotate());
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_tick_accumulates_until_interval_exceeded() {
        let mut state = started(4);
        with_active(&mut state, PieceKind::T, 4, 0);

        assert!(!state.tick(500));
        assert!(!state.tick(500));
        // Exactly at the interval does not drop yet.
        assert_eq!(state.drop_counter_ms(), 1000);
        assert_eq!(state.active.unwrap().y, 0);

        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.drop_counter_ms(), 0);
    }

    #[test]
    fn test_tick_before_start_does_nothing() {
        let mut state = GameState::new(4);
        assert!(!state.tick(5000));
        assert!(state.active.is_none());
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut state = started(6);
        for y in 0..2 {
            for x in 0..BOARD_WIDTH as i8 {
                if x != 0 {
                    fill(&mut state, x, y);
                }
            }
        }

        assert!(!state.spawn_piece());
        assert!(state.game_over());
        assert!(!state.is_running());
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut state = started(6);
        for x in 1..BOARD_WIDTH as i8 {
            fill(&mut state, x, 0);
            fill(&mut state, x, 1);
        }
        state.spawn_piece();
        assert!(state.game_over());

        let board = state.board.clone();
        let active = state.active;
        let score = state.score();

        assert!(!state.apply_action(GameAction::MoveLeft));
        assert!(!state.apply_action(GameAction::MoveRight));
        assert!(!state.apply_action(GameAction::Rotate));
        assert!(!state.apply_action(GameAction::SoftDrop));
        assert!(!state.apply_action(GameAction::HardDrop));
        assert!(!state.tick(10_000));

        assert_eq!(state.board, board);
        assert_eq!(state.active, active);
        assert_eq!(state.score(), score);
    }

    #[test]
    fn test_lock_and_spawn_after_game_over_change_nothing() {
        let mut state = started(11);
        for _ in 0..200 {
            if state.game_over() {
                break;
            }
            state.hard_drop();
        }
        assert!(state.game_over());
        state.take_last_event();

        let board = state.board.clone();
        let active = state.active;
        let next = state.next_piece();
        let score = state.score();
        let rng_state = state.rng_state();

        state.lock_piece();
        assert!(!state.spawn_piece());

        assert_eq!(state.board, board);
        assert_eq!(state.active, active);
        assert_eq!(state.next_piece(), next);
        assert_eq!(state.score(), score);
        assert_eq!(state.rng_state(), rng_state);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_lock_into_blocked_spawn_reports_game_over() {
        let mut state = started(6);
        for x in 1..BOARD_WIDTH as i8 {
            for y in 1..BOARD_HEIGHT as i8 {
                fill(&mut state, x, y);
            }
        }
        // Column 0 stays open so no row is ever full.
        with_active(&mut state, PieceKind::O, 4, -1);
        state.lock_piece();

        let event = state.take_last_event().unwrap();
        assert!(event.game_over);
        assert!(state.game_over());
    }

    #[test]
    fn test_apply_action_start_is_not_handled() {
        let mut state = started(1);
        assert!(!state.apply_action(GameAction::Start));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = started(13);
        fill(&mut state, 2, 19);
        state.progress.score = 340;

        let snap = state.snapshot();
        assert_eq!(snap.board[19][2], Cell::Filled(PieceKind::Z.color()));
        assert_eq!(snap.active, state.active);
        assert_eq!(snap.next, state.next);
        assert_eq!(snap.score, 340);
        assert!(snap.started);
        assert!(!snap.game_over);
        assert_eq!(snap.seed, 13);
    }
}
