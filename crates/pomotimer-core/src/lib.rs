//! # Pomotimer Core Library
//!
//! This library provides the core logic for the Pomotimer Pomodoro timer:
//! alternating work sessions with short and long breaks, counted against a
//! target number of iterations. Any display (the bundled terminal controller,
//! or a GUI) is a thin layer that renders engine state and forwards intents.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine. It arms one-shot ticks on
//!   a scheduler and cancels them before every state change
//! - **Tick Scheduler**: Cancellable one-shot timer, backed by tokio or driven
//!   by hand in tests
//! - **Storage**: TOML-based configuration behind an injectable store
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TickScheduler`]: One-shot tick abstraction
//! - [`ConfigStore`]: Configuration persistence
//! - [`Event`]: Everything the display needs to react to

pub mod timer;
pub mod storage;
pub mod events;
pub mod error;

pub use timer::{Phase, Session, Snapshot, TickHandle, TickScheduler, TimerEngine};
pub use storage::{ConfigField, ConfigStore, Configuration, FileConfigStore, RawConfiguration};
pub use events::Event;
pub use error::{ConfigLoadError, ConfigSaveError, ConfigValidationError, CoreError, ValidationError};
