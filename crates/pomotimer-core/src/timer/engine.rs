//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or sleep: it arms one-shot ticks on a [`TickScheduler`] and the
//! host hands each fired [`TickHandle`] back through `tick()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Work -> (ShortBreak | LongBreak) -> Idle
//!           \-> Idle (target reached)
//! ```
//!
//! Any armed tick is cancelled before state changes, so a superseded tick can
//! never fire against a newer phase.
//!
//! ## Usage
//!
//! ```ignore
//! let (scheduler, mut ticks) = TokioScheduler::new();
//! let mut engine = TimerEngine::new(store.load().config, scheduler);
//! engine.start_work("Write report", "4")?;
//! // In the host loop:
//! while let Some(handle) = ticks.recv().await {
//!     if let Some(event) = engine.tick(handle) { render(&event); }
//! }
//! ```

use chrono::Utc;

use super::scheduler::{TickHandle, TickScheduler, TICK_INTERVAL};
use super::session::{Phase, Session};
use super::snapshot::Snapshot;
use crate::error::{ConfigValidationError, ValidationError};
use crate::events::Event;
use crate::storage::Configuration;

/// Core timer engine.
///
/// Owns the [`Session`] and a copy of the [`Configuration`]; durations are
/// read when a phase starts, never while it runs.
#[derive(Debug)]
pub struct TimerEngine<S> {
    config: Configuration,
    session: Session,
    scheduler: S,
    next_tick_id: u64,
}

impl<S: TickScheduler> TimerEngine<S> {
    /// Create an idle engine.
    ///
    /// An invalid configuration (a zero field) is replaced by the defaults.
    pub fn new(config: Configuration, scheduler: S) -> Self {
        let config = match config.check() {
            Ok(()) => config,
            Err(e) => {
                tracing::warn!(error = %e, "invalid configuration, using defaults");
                Configuration::default()
            }
        };
        Self {
            config,
            session: Session::new(),
            scheduler,
            next_tick_id: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.session)
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            snapshot: self.snapshot(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the configuration used by phases started from now on.
    ///
    /// # Errors
    ///
    /// Rejects a configuration with a zero field and keeps the current one.
    pub fn set_configuration(&mut self, config: Configuration) -> Result<(), ConfigValidationError> {
        config.check()?;
        self.config = config;
        Ok(())
    }

    /// Start the next work session from `Idle`.
    ///
    /// Returns `Ok(None)` when not idle. A run that already reached its
    /// target starts over from iteration 1.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for an empty task name or an iteration
    /// count that is not a positive integer; the session is left untouched.
    pub fn start_work(
        &mut self,
        task_name: &str,
        total_iterations: &str,
    ) -> Result<Option<Event>, ValidationError> {
        if self.session.phase != Phase::Idle {
            return Ok(None);
        }
        let task_name = task_name.trim();
        if task_name.is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }
        let total = parse_iterations(total_iterations)?;

        self.session.total_iterations = total;
        if self.session.current_iteration >= total {
            self.session.current_iteration = 0;
        }
        self.session.current_iteration += 1;
        self.session.task_name = task_name.to_string();
        self.enter_phase(Phase::Work);

        tracing::debug!(
            task = task_name,
            iteration = self.session.current_iteration,
            total,
            "work started"
        );
        Ok(Some(Event::WorkStarted {
            task_name: self.session.task_name.clone(),
            iteration: self.session.current_iteration,
            total_iterations: total,
            duration_secs: self.session.remaining_seconds,
            at: Utc::now(),
        }))
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.session.is_ticking() {
            return None;
        }
        self.cancel_pending();
        self.session.paused = true;
        tracing::debug!(remaining = self.session.remaining_seconds, "paused");
        Some(Event::TimerPaused {
            phase: self.session.phase,
            remaining_secs: self.session.remaining_seconds,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.session.phase == Phase::Idle || !self.session.paused {
            return None;
        }
        self.session.paused = false;
        self.arm();
        tracing::debug!(remaining = self.session.remaining_seconds, "resumed");
        Some(Event::TimerResumed {
            phase: self.session.phase,
            remaining_secs: self.session.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Pause when counting down, resume when paused.
    pub fn toggle_pause(&mut self) -> Option<Event> {
        if self.session.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// End the current phase now, discarding its remaining time.
    ///
    /// Runs the same completion transition as natural expiry.
    pub fn skip(&mut self) -> Option<Event> {
        if self.session.phase == Phase::Idle {
            return None;
        }
        self.cancel_pending();
        self.complete_phase(true)
    }

    /// Return to `Idle` with zeroed counters. Valid from any phase.
    pub fn reset(&mut self) -> Option<Event> {
        self.cancel_pending();
        self.session.phase = Phase::Idle;
        self.session.current_iteration = 0;
        self.session.remaining_seconds = 0;
        self.session.phase_total_seconds = 0;
        self.session.paused = false;
        tracing::debug!("reset");
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Deliver a fired tick.
    ///
    /// Returns `None` for a handle that is no longer armed. Otherwise counts
    /// down one second and returns either `Tick` or, when the countdown hits
    /// zero, the phase-completion event.
    pub fn tick(&mut self, handle: TickHandle) -> Option<Event> {
        if self.session.running_handle != Some(handle) {
            tracing::trace!(tick = handle.id(), "ignoring stale tick");
            return None;
        }
        self.session.running_handle = None;
        if !self.session.is_ticking() {
            return None;
        }

        self.session.remaining_seconds = self.session.remaining_seconds.saturating_sub(1);
        if self.session.remaining_seconds > 0 {
            self.arm();
            return Some(Event::Tick {
                phase: self.session.phase,
                remaining_secs: self.session.remaining_seconds,
                at: Utc::now(),
            });
        }
        self.complete_phase(false)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_phase(&mut self, skipped: bool) -> Option<Event> {
        let finished = self.session.phase;
        match finished {
            Phase::Work => {
                let iteration = self.session.current_iteration;
                if iteration < self.session.total_iterations {
                    let next = if iteration % self.config.long_break_every == 0 {
                        Phase::LongBreak
                    } else {
                        Phase::ShortBreak
                    };
                    self.enter_phase(next);
                    tracing::debug!(iteration, break_phase = %next, skipped, "work completed");
                    Some(Event::BreakStarted {
                        phase: next,
                        iteration,
                        duration_secs: self.session.remaining_seconds,
                        skipped_work: skipped,
                        at: Utc::now(),
                    })
                } else {
                    self.enter_idle(0);
                    tracing::info!(iterations = iteration, "all work sessions completed");
                    Some(Event::AllSessionsCompleted {
                        iterations: iteration,
                        skipped_work: skipped,
                        at: Utc::now(),
                    })
                }
            }
            Phase::ShortBreak | Phase::LongBreak => {
                let preview = if skipped {
                    self.config.duration_secs(Phase::Work)
                } else {
                    0
                };
                self.enter_idle(preview);
                tracing::debug!(break_phase = %finished, skipped, "break completed");
                Some(Event::BreakEnded {
                    phase: finished,
                    skipped,
                    preview_secs: preview,
                    at: Utc::now(),
                })
            }
            Phase::Idle => None,
        }
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.cancel_pending();
        let secs = self.config.duration_secs(phase);
        self.session.phase = phase;
        self.session.remaining_seconds = secs;
        self.session.phase_total_seconds = secs;
        self.session.paused = false;
        self.arm();
    }

    /// Go idle showing `remaining` seconds without ticking.
    fn enter_idle(&mut self, remaining: u64) {
        self.session.phase = Phase::Idle;
        self.session.remaining_seconds = remaining;
        self.session.phase_total_seconds = remaining;
        self.session.paused = false;
    }

    fn arm(&mut self) {
        debug_assert!(self.session.running_handle.is_none());
        let handle = TickHandle::new(self.next_tick_id);
        self.next_tick_id = self.next_tick_id.wrapping_add(1);
        self.scheduler.schedule(handle, TICK_INTERVAL);
        self.session.running_handle = Some(handle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.session.running_handle.take() {
            self.scheduler.cancel(handle);
        }
    }
}

fn parse_iterations(input: &str) -> Result<u32, ValidationError> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| ValidationError::IterationsNotAnInteger(input.to_string()))?;
    if value <= 0 {
        return Err(ValidationError::IterationsNotPositive(value));
    }
    u32::try_from(value).map_err(|_| ValidationError::IterationsOutOfRange(value))
}
