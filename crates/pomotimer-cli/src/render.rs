//! Text rendering of engine state. Pure functions of snapshots and events.

use pomotimer_core::timer::{format_clock, Controls};
use pomotimer_core::{Event, Snapshot};

/// One-line status, e.g. `[Work] Iteration 1/4  24:59`.
pub fn status_line(snap: &Snapshot) -> String {
    let mut line = format!(
        "[{}] Iteration {}  {}",
        snap.phase_label,
        snap.iteration_label(),
        snap.clock
    );
    if snap.paused {
        line.push_str("  (paused)");
    }
    line
}

/// Enabled controls, e.g. `start | reset`.
pub fn controls_hint(controls: &Controls) -> String {
    let mut enabled = Vec::new();
    if controls.start {
        enabled.push("start".to_string());
    }
    if controls.pause_resume {
        enabled.push(controls.pause_label.to_lowercase());
    }
    if controls.skip {
        enabled.push("skip".to_string());
    }
    if controls.reset {
        enabled.push("reset".to_string());
    }
    enabled.join(" | ")
}

/// Notice for an event; `None` for plain ticks, which only redraw the status.
pub fn describe(event: &Event) -> Option<String> {
    let text = match event {
        Event::WorkStarted {
            task_name,
            iteration,
            total_iterations,
            duration_secs,
            ..
        } => format!(
            "Work session {iteration}/{total_iterations} started: {task_name} ({})",
            format_clock(*duration_secs)
        ),
        Event::BreakStarted {
            phase,
            duration_secs,
            skipped_work,
            ..
        } => {
            let prefix = if *skipped_work { "Work skipped. " } else { "Work done! " };
            format!("{prefix}{phase} started ({})", format_clock(*duration_secs))
        }
        Event::BreakEnded {
            skipped,
            preview_secs,
            ..
        } => {
            if *skipped {
                format!(
                    "Break skipped. Next work session: {}",
                    format_clock(*preview_secs)
                )
            } else {
                "Break over. Ready for the next work session.".to_string()
            }
        }
        Event::AllSessionsCompleted { .. } => {
            // Terminal bell is the completion signal.
            "\x07All work sessions completed. Great job!".to_string()
        }
        Event::TimerPaused { remaining_secs, .. } => {
            format!("Paused at {}", format_clock(*remaining_secs))
        }
        Event::TimerResumed { remaining_secs, .. } => {
            format!("Resumed at {}", format_clock(*remaining_secs))
        }
        Event::TimerReset { .. } => "Timer has been reset.".to_string(),
        Event::Tick { .. } | Event::StateSnapshot { .. } => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pomotimer_core::timer::ManualScheduler;
    use pomotimer_core::{Configuration, Phase, TimerEngine};

    #[test]
    fn idle_status_and_controls() {
        let engine = TimerEngine::new(Configuration::default(), ManualScheduler::new());
        let snap = engine.snapshot();
        assert_eq!(status_line(&snap), "[Idle] Iteration 0/0  00:00");
        assert_eq!(controls_hint(&snap.controls), "start | reset");
    }

    #[test]
    fn paused_work_status() {
        let mut engine = TimerEngine::new(Configuration::default(), ManualScheduler::new());
        engine.start_work("Read", "2").unwrap();
        engine.pause();
        let snap = engine.snapshot();
        assert_eq!(status_line(&snap), "[Work] Iteration 1/2  25:00  (paused)");
        assert_eq!(controls_hint(&snap.controls), "resume | skip | reset");
    }

    #[test]
    fn describes_breaks() {
        let event = Event::BreakStarted {
            phase: Phase::LongBreak,
            iteration: 4,
            duration_secs: 900,
            skipped_work: false,
            at: Utc::now(),
        };
        assert_eq!(
            describe(&event).unwrap(),
            "Work done! Long Break started (15:00)"
        );
    }

    #[test]
    fn ticks_have_no_notice() {
        let event = Event::Tick {
            phase: Phase::Work,
            remaining_secs: 10,
            at: Utc::now(),
        };
        assert!(describe(&event).is_none());
    }
}
