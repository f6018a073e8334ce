//! Engine events, one per observable state change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, Snapshot};

/// Every state change of the engine produces an Event.
/// The display renders them; `None` from an engine call means nothing changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WorkStarted {
        task_name: String,
        iteration: u32,
        total_iterations: u32,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// A work session ended (expired or skipped) and a break began.
    BreakStarted {
        phase: Phase,
        iteration: u32,
        duration_secs: u64,
        skipped_work: bool,
        at: DateTime<Utc>,
    },
    /// A break ended and the engine is idle, waiting for the next start.
    BreakEnded {
        phase: Phase,
        skipped: bool,
        /// Work duration shown as a preview after a skipped break.
        preview_secs: u64,
        at: DateTime<Utc>,
    },
    /// The last work session of the run ended. This is the completion signal.
    AllSessionsCompleted {
        iterations: u32,
        skipped_work: bool,
        at: DateTime<Utc>,
    },
    Tick {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        snapshot: Snapshot,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True for the one-off signal that a whole run finished.
    pub fn is_completion(&self) -> bool {
        matches!(self, Event::AllSessionsCompleted { .. })
    }
}
