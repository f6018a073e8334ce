//! One-shot tick scheduling.
//!
//! The engine never sleeps. It asks a [`TickScheduler`] to deliver a
//! [`TickHandle`] back after [`TICK_INTERVAL`], and cancels that request
//! before it touches session state. At most one handle is armed at a time.
//!
//! - [`TokioScheduler`]: real host, one sleeping task per armed tick.
//! - [`ManualScheduler`]: test host, ticks fire only when asked.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Delay between two ticks of a running countdown.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Opaque reference to one armed tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// A cancellable one-shot timer.
///
/// Implementations must eventually hand `handle` back to the engine's
/// `tick()` unless `cancel(handle)` is called first.
pub trait TickScheduler {
    fn schedule(&mut self, handle: TickHandle, delay: Duration);
    fn cancel(&mut self, handle: TickHandle);
}

/// Scheduler for tests and hosts that drive time by hand.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: Option<(TickHandle, Duration)>,
    scheduled: usize,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The armed tick, if any.
    pub fn pending(&self) -> Option<TickHandle> {
        self.pending.map(|(handle, _)| handle)
    }

    /// Delay requested for the armed tick.
    pub fn pending_delay(&self) -> Option<Duration> {
        self.pending.map(|(_, delay)| delay)
    }

    /// Take the armed tick as if its delay had elapsed.
    pub fn fire(&mut self) -> Option<TickHandle> {
        self.pending.take().map(|(handle, _)| handle)
    }

    /// Number of `schedule` calls so far.
    pub fn scheduled_count(&self) -> usize {
        self.scheduled
    }

    /// Number of `cancel` calls that removed an armed tick.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, handle: TickHandle, delay: Duration) {
        debug_assert!(
            self.pending.is_none(),
            "tick {handle:?} armed while another tick is pending"
        );
        self.pending = Some((handle, delay));
        self.scheduled += 1;
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.pending() == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}

/// Scheduler backed by the tokio timer.
///
/// Each armed tick is a spawned task that sleeps and then sends its handle
/// on the channel returned by [`TokioScheduler::new`]. Must be used from
/// within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    tx: mpsc::UnboundedSender<TickHandle>,
    armed: Option<(TickHandle, JoinHandle<()>)>,
}

impl TokioScheduler {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TickHandle>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, armed: None }, rx)
    }
}

impl TickScheduler for TokioScheduler {
    fn schedule(&mut self, handle: TickHandle, delay: Duration) {
        if let Some((_, task)) = self.armed.take() {
            task.abort();
        }
        let tx = self.tx.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the host is shutting down.
            let _ = tx.send(handle);
        });
        self.armed = Some((handle, task));
    }

    fn cancel(&mut self, handle: TickHandle) {
        if matches!(self.armed, Some((armed, _)) if armed == handle) {
            if let Some((_, task)) = self.armed.take() {
                task.abort();
            }
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        if let Some((_, task)) = self.armed.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_fire_takes_pending() {
        let mut s = ManualScheduler::new();
        s.schedule(TickHandle::new(1), TICK_INTERVAL);
        assert_eq!(s.pending(), Some(TickHandle::new(1)));
        assert_eq!(s.pending_delay(), Some(Duration::from_secs(1)));
        assert_eq!(s.fire(), Some(TickHandle::new(1)));
        assert_eq!(s.fire(), None);
    }

    #[test]
    fn manual_cancel_ignores_other_handles() {
        let mut s = ManualScheduler::new();
        s.schedule(TickHandle::new(2), TICK_INTERVAL);
        s.cancel(TickHandle::new(1));
        assert_eq!(s.pending(), Some(TickHandle::new(2)));
        s.cancel(TickHandle::new(2));
        assert_eq!(s.pending(), None);
        assert_eq!(s.cancelled_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_delivers_handle_after_delay() {
        let (mut s, mut rx) = TokioScheduler::new();
        let start = tokio::time::Instant::now();
        s.schedule(TickHandle::new(7), TICK_INTERVAL);
        assert_eq!(rx.recv().await, Some(TickHandle::new(7)));
        assert!(start.elapsed() >= TICK_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_cancel_suppresses_delivery() {
        let (mut s, mut rx) = TokioScheduler::new();
        s.schedule(TickHandle::new(3), TICK_INTERVAL);
        s.cancel(TickHandle::new(3));
        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_rearm_replaces_previous_tick() {
        let (mut s, mut rx) = TokioScheduler::new();
        s.schedule(TickHandle::new(1), TICK_INTERVAL);
        s.schedule(TickHandle::new(2), TICK_INTERVAL);
        assert_eq!(rx.recv().await, Some(TickHandle::new(2)));
        let waited = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(waited.is_err());
    }
}
