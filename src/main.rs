//! Terminal runner.
//!
//! Polls crossterm for input until the scheduler's next frame is due, then
//! hands that frame to the game loop. Renders every iteration through the
//! diffing renderer, so idle iterations cost almost nothing.

use std::fs::File;
use std::io::BufWriter;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use neon_tetris::config::Config;
use neon_tetris::core::{FrameOutcome, GameLoop, GameSnapshot};
use neon_tetris::event_log::{EventLog, EventRecord};
use neon_tetris::input::{handle_key_event, should_quit};
use neon_tetris::scheduler::TerminalScheduler;
use neon_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use neon_tetris::types::GameAction;

/// Input poll timeout while no frame is pending (before start, after game over).
const IDLE_POLL: Duration = Duration::from_millis(250);

fn main() -> ExitCode {
    let config = Config::from_env();

    let log = match config.log_path.as_deref().map(EventLog::open).transpose() {
        Ok(log) => log,
        Err(e) => {
            eprintln!("[neon-tetris] {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut term = TerminalRenderer::new();
    let result = term.enter().and_then(|()| run(&mut term, &config, log));

    // Always try to restore terminal state.
    let _ = term.exit();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[neon-tetris] {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Event log that goes quiet after its first write error.
struct Journal {
    log: Option<EventLog<BufWriter<File>>>,
}

impl Journal {
    fn record(&mut self, record: EventRecord) {
        if let Some(log) = &mut self.log {
            if log.write(&record).is_err() {
                self.log = None;
            }
        }
    }

    fn drain_lock(&mut self, game: &mut GameLoop<TerminalScheduler>) {
        let Some(event) = game.state_mut().take_last_event() else {
            return;
        };
        if let Some(log) = &mut self.log {
            if log.write_lock(&event, game.state().score()).is_err() {
                self.log = None;
            }
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: &Config,
    log: Option<EventLog<BufWriter<File>>>,
) -> Result<()> {
    let mut journal = Journal { log };
    let mut game = GameLoop::new(config.seed, TerminalScheduler::new(config.frame_ms));

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.state().snapshot_into(&mut snap);
        view.render_into(&snap, game.start_enabled(), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        let timeout = game
            .scheduler()
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if game.handle_action(action) {
                            if action == GameAction::Start {
                                journal.record(EventRecord::SessionStart {
                                    seed: game.state().seed(),
                                });
                            }
                            journal.drain_lock(&mut game);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let now = Instant::now();
        if let Some(handle) = game.scheduler_mut().due(now) {
            let ts = game.scheduler().timestamp_ms(now);
            match game.on_frame(handle, ts) {
                FrameOutcome::Render => journal.drain_lock(&mut game),
                FrameOutcome::GameOver => {
                    let state = game.state();
                    journal.record(EventRecord::GameOver {
                        score: state.score(),
                        level: state.level(),
                        lines: state.lines(),
                    });
                }
                FrameOutcome::Idle => {}
            }
        }
    }
}
