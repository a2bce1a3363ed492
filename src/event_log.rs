//! JSONL session event log.
//!
//! One JSON object per line, tagged by `type`, with a running `seq`. Writes
//! are flushed per record so the file stays readable while a game runs.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::LockEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    SessionStart {
        seed: u32,
    },
    Lock {
        piece: &'static str,
        lines_cleared: u32,
        points: u32,
        score: u32,
        level: u32,
        /// The spawn after this lock was blocked.
        game_over: bool,
    },
    LevelUp {
        level: u32,
    },
    GameOver {
        score: u32,
        level: u32,
        lines: u32,
    },
}

#[derive(Serialize)]
struct Line<'a> {
    seq: u64,
    #[serde(flatten)]
    record: &'a EventRecord,
}

pub struct EventLog<W: Write> {
    out: W,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Append to `path`, creating it if needed.
    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {path}"))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn write(&mut self, record: &EventRecord) -> Result<()> {
        self.seq += 1;
        self.buf.clear();
        serde_json::to_writer(
            &mut self.buf,
            &Line {
                seq: self.seq,
                record,
            },
        )?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }

    /// Log a piece lock, plus a level-up record when the clear crossed one.
    /// `score` is the running total after the lock.
    pub fn write_lock(&mut self, event: &LockEvent, score: u32) -> Result<()> {
        self.write(&EventRecord::Lock {
            piece: event.kind.as_str(),
            lines_cleared: event.lines_cleared,
            points: event.points,
            score,
            level: event.level,
            game_over: event.game_over,
        })?;
        if event.level_up {
            self.write(&EventRecord::LevelUp { level: event.level })?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
