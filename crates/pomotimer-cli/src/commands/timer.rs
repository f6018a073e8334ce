use std::io::Write;

use clap::Subcommand;
use pomotimer_core::{ConfigStore, TickScheduler};

use crate::controller::Controller;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Set the task name for the next work session
    Task {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Set the target number of work sessions
    Iterations {
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Start the next work session
    Start,
    /// Pause the running countdown
    Pause,
    /// Resume a paused countdown
    Resume,
    /// Pause when running, resume when paused
    Toggle,
    /// End the current phase now
    Skip,
    /// Return to idle and clear the iteration count
    Reset,
    /// Print current timer state as JSON
    Status,
}

pub fn run<St, S, W>(
    action: TimerAction,
    ctl: &mut Controller<St, S, W>,
) -> std::io::Result<()>
where
    St: ConfigStore,
    S: TickScheduler,
    W: Write,
{
    match action {
        TimerAction::Task { name } => {
            ctl.task_name = name.join(" ");
            ctl.notice(&format!("Task: {}", ctl.task_name))?;
        }
        TimerAction::Iterations { value } => {
            ctl.notice(&format!("Total iterations: {value}"))?;
            ctl.iterations = value;
        }
        TimerAction::Start => {
            let result = ctl.engine.start_work(&ctl.task_name, &ctl.iterations);
            match result {
                Ok(Some(event)) => ctl.render(&event)?,
                Ok(None) => ctl.notice("A session is already in progress.")?,
                Err(e) => ctl.notice(&format!("Error: {e}"))?,
            }
        }
        TimerAction::Pause => {
            let event = ctl.engine.pause();
            ctl.render_or_ignore(event)?;
        }
        TimerAction::Toggle => {
            let event = ctl.engine.toggle_pause();
            ctl.render_or_ignore(event)?;
        }
        TimerAction::Resume => {
            let event = ctl.engine.resume();
            ctl.render_or_ignore(event)?;
        }
        TimerAction::Skip => {
            let event = ctl.engine.skip();
            ctl.render_or_ignore(event)?;
        }
        TimerAction::Reset => {
            let event = ctl.engine.reset();
            ctl.render_or_ignore(event)?;
        }
        TimerAction::Status => {
            let snapshot = ctl.engine.snapshot_event();
            let json = serde_json::to_string_pretty(&snapshot).map_err(std::io::Error::other)?;
            ctl.notice(&json)?;
        }
    }
    Ok(())
}
