//! What the display renders.
//!
//! A [`Snapshot`] is a pure function of the session: the display must not
//! keep any phase logic of its own, only draw these fields and route user
//! intents back to the engine.

use serde::{Deserialize, Serialize};

use super::session::{Phase, Session};

/// Format seconds as "MM:SS" (minutes are not capped at 59).
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Enabled state of the four display controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start: bool,
    pub pause_resume: bool,
    /// "Pause" while counting down, "Resume" while paused.
    pub pause_label: String,
    pub skip: bool,
    pub reset: bool,
}

impl Controls {
    fn for_session(session: &Session) -> Self {
        let active = session.phase() != Phase::Idle;
        Self {
            start: !active,
            pause_resume: active,
            pause_label: if session.is_paused() { "Resume" } else { "Pause" }.to_string(),
            skip: active,
            reset: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub phase_label: String,
    pub task_name: String,
    pub current_iteration: u32,
    pub total_iterations: u32,
    pub remaining_seconds: u64,
    /// Remaining time as "MM:SS".
    pub clock: String,
    /// 0.0 .. 1.0 through the current phase.
    pub progress: f64,
    pub paused: bool,
    pub controls: Controls,
}

impl Snapshot {
    pub fn of(session: &Session) -> Self {
        Self {
            phase: session.phase(),
            phase_label: session.phase().label().to_string(),
            task_name: session.task_name().to_string(),
            current_iteration: session.current_iteration(),
            total_iterations: session.total_iterations(),
            remaining_seconds: session.remaining_seconds(),
            clock: format_clock(session.remaining_seconds()),
            progress: session.phase_progress(),
            paused: session.is_paused(),
            controls: Controls::for_session(session),
        }
    }

    /// "current/total", e.g. "2/4".
    pub fn iteration_label(&self) -> String {
        format!("{}/{}", self.current_iteration, self.total_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(25 * 60), "25:00");
        assert_eq!(format_clock(5 * 60 + 7), "05:07");
        assert_eq!(format_clock(120 * 60), "120:00");
    }

    #[test]
    fn idle_snapshot_enables_start_only() {
        let snap = Snapshot::of(&Session::new());
        assert_eq!(snap.phase_label, "Idle");
        assert_eq!(snap.iteration_label(), "0/0");
        assert_eq!(snap.clock, "00:00");
        assert!(snap.controls.start);
        assert!(!snap.controls.pause_resume);
        assert!(!snap.controls.skip);
        assert!(snap.controls.reset);
        assert_eq!(snap.controls.pause_label, "Pause");
    }

    #[test]
    fn paused_snapshot_offers_resume() {
        let mut session = Session::new();
        session.phase = Phase::Work;
        session.paused = true;
        session.current_iteration = 1;
        session.total_iterations = 4;
        let snap = Snapshot::of(&session);
        assert!(!snap.controls.start);
        assert!(snap.controls.pause_resume);
        assert!(snap.controls.skip);
        assert_eq!(snap.controls.pause_label, "Resume");
        assert_eq!(snap.iteration_label(), "1/4");
    }
}
