//! Game loop - frame scheduling and session lifecycle
//!
//! The host owns the clock. It hands the loop a [`FrameScheduler`] that can
//! request and cancel a single upcoming frame, and calls
//! [`GameLoop::on_frame`] with the handle and a millisecond timestamp when that
//! frame fires. Everything else (gravity, input, game over) happens inside
//! [`GameState`], so the loop is fully testable with a fake scheduler.

use crate::game_state::GameState;
use crate::types::GameAction;

/// Identifies one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-side frame source (an animation-frame callback, a timer, a test fake)
pub trait FrameScheduler {
    /// Ask for one more frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a previously requested frame; it must not be delivered.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Session phase as seen by the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// No session has been started yet.
    Idle,
    Running,
    /// Terminal; only `Start` leaves it.
    GameOver,
}

/// What the host should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Draw the board; the next frame is already requested.
    Render,
    /// Draw the game-over screen and re-enable the start control.
    /// Emitted once per session; no further frame is requested.
    GameOver,
    /// Nothing to do (stale handle or no running session).
    Idle,
}

pub struct GameLoop<S: FrameScheduler> {
    state: GameState,
    scheduler: S,
    pending: Option<FrameHandle>,
    last_timestamp_ms: Option<u64>,
    phase: LoopPhase,
}

impl<S: FrameScheduler> GameLoop<S> {
    pub fn new(seed: u32, scheduler: S) -> Self {
        Self {
            state: GameState::new(seed),
            scheduler,
            pending: None,
            last_timestamp_ms: None,
            phase: LoopPhase::Idle,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Frame the loop is waiting for, if any
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// The start control is live whenever no session is running
    pub fn start_enabled(&self) -> bool {
        self.phase != LoopPhase::Running
    }

    /// Throw away the current session and begin a fresh one
    ///
    /// Any frame still pending from the previous session is cancelled first.
    /// The first session uses the loop's seed; later ones continue from the
    /// previous RNG state so every restart deals a different sequence.
    pub fn start_session(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }

        let seed = if self.state.started() {
            self.state.rng_state()
        } else {
            self.state.seed()
        };
        self.state = GameState::new(seed);
        self.state.start();

        self.last_timestamp_ms = None;
        self.phase = LoopPhase::Running;
        self.pending = Some(self.scheduler.request_frame());
    }

    /// Handle one delivered frame
    ///
    /// The first frame of a session advances gravity by zero.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: u64) -> FrameOutcome {
        if self.pending != Some(handle) {
            return FrameOutcome::Idle;
        }
        self.pending = None;

        if self.phase != LoopPhase::Running {
            return FrameOutcome::Idle;
        }

        if self.state.game_over() {
            self.phase = LoopPhase::GameOver;
            return FrameOutcome::GameOver;
        }

        let elapsed = match self.last_timestamp_ms {
            Some(last) => timestamp_ms.saturating_sub(last),
            None => 0,
        };
        self.last_timestamp_ms = Some(timestamp_ms);

        self.state.tick(u32::try_from(elapsed).unwrap_or(u32::MAX));

        self.pending = Some(self.scheduler.request_frame());
        FrameOutcome::Render
    }

    /// Route one input action
    ///
    /// `Start` only works while the start control is enabled; everything else
    /// only works while a session is running.
    pub fn handle_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                if !self.start_enabled() {
                    return false;
                }
                self.start_session();
                true
            }
            _ if self.phase == LoopPhase::Running => self.state.apply_action(action),
            _ => false,
        }
    }
}
