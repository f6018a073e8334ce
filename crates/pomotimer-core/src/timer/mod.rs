mod engine;
mod scheduler;
mod session;
mod snapshot;

pub use engine::TimerEngine;
pub use scheduler::{ManualScheduler, TickHandle, TickScheduler, TokioScheduler, TICK_INTERVAL};
pub use session::{Phase, Session};
pub use snapshot::{format_clock, Controls, Snapshot};
