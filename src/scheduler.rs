//! Wall-clock frame scheduler for the terminal binary.

use std::time::{Duration, Instant};

use crate::core::{FrameHandle, FrameScheduler};

/// Delivers at most one pending frame, `frame` after it was requested.
#[derive(Debug)]
pub struct TerminalScheduler {
    frame: Duration,
    epoch: Instant,
    next_id: u64,
    pending: Option<(FrameHandle, Instant)>,
}

impl TerminalScheduler {
    pub fn new(frame_ms: u64) -> Self {
        Self::with_epoch(frame_ms, Instant::now())
    }

    pub fn with_epoch(frame_ms: u64, epoch: Instant) -> Self {
        Self {
            frame: Duration::from_millis(frame_ms.max(1)),
            epoch,
            next_id: 0,
            pending: None,
        }
    }

    pub fn request_frame_at(&mut self, now: Instant) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some((handle, now + self.frame));
        handle
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending.map(|(h, _)| h)
    }

    /// Take the pending frame if its deadline has passed.
    pub fn due(&mut self, now: Instant) -> Option<FrameHandle> {
        match self.pending {
            Some((handle, deadline)) if deadline <= now => {
                self.pending = None;
                Some(handle)
            }
            _ => None,
        }
    }

    /// How long to wait for input before the next frame; `None` when idle.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }

    /// Milliseconds since the scheduler was created.
    pub fn timestamp_ms(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.epoch).as_millis() as u64
    }
}

impl FrameScheduler for TerminalScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.request_frame_at(Instant::now())
    }

    fn cancel(&mut self, handle: FrameHandle) {
        if self.pending() == Some(handle) {
            self.pending = None;
        }
    }
}
