use serde::{Deserialize, Serialize};
use std::fmt;

use super::scheduler::TickHandle;

/// Phase of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Human-readable label for the display.
    pub fn label(self) -> &'static str {
        match self {
            Phase::Idle => "Idle",
            Phase::Work => "Work",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn is_break(self) -> bool {
        matches!(self, Phase::ShortBreak | Phase::LongBreak)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Mutable state of one Pomodoro run.
///
/// Owned by the engine; the display only ever sees it through a shared
/// reference or a [`Snapshot`](super::Snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) phase: Phase,
    pub(crate) task_name: String,
    pub(crate) current_iteration: u32,
    pub(crate) total_iterations: u32,
    pub(crate) remaining_seconds: u64,
    /// Full length of the phase in progress.
    pub(crate) phase_total_seconds: u64,
    pub(crate) paused: bool,
    /// Set iff a tick is armed.
    pub(crate) running_handle: Option<TickHandle>,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            task_name: String::new(),
            current_iteration: 0,
            total_iterations: 0,
            remaining_seconds: 0,
            phase_total_seconds: 0,
            paused: false,
            running_handle: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn current_iteration(&self) -> u32 {
        self.current_iteration
    }

    pub fn total_iterations(&self) -> u32 {
        self.total_iterations
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn phase_total_seconds(&self) -> u64 {
        self.phase_total_seconds
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn running_handle(&self) -> Option<TickHandle> {
        self.running_handle
    }

    /// True while a countdown is live (in a phase and not paused).
    pub fn is_ticking(&self) -> bool {
        self.phase != Phase::Idle && !self.paused
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        if self.phase_total_seconds == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_seconds as f64 / self.phase_total_seconds as f64)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
