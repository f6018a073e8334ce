//! Terminal display/controller.
//!
//! Holds the form fields a GUI would show (task name, iteration target and
//! the four duration inputs), forwards intents to the engine and renders
//! whatever comes back. It has no phase logic of its own.

use std::io::Write;

use pomotimer_core::{
    ConfigLoadError, ConfigStore, Configuration, Event, RawConfiguration, TickHandle,
    TickScheduler, TimerEngine,
};

use crate::commands::{self, Command};
use crate::render;

/// Default iteration target shown in a fresh form.
const DEFAULT_ITERATIONS: &str = "4";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Controller<St, S, W> {
    pub(crate) engine: TimerEngine<S>,
    pub(crate) store: St,
    pub(crate) form: RawConfiguration,
    pub(crate) task_name: String,
    pub(crate) iterations: String,
    out: W,
    /// The last write was an in-place status redraw without a newline.
    mid_line: bool,
}

impl<St, S, W> Controller<St, S, W>
where
    St: ConfigStore,
    S: TickScheduler,
    W: Write,
{
    pub fn new(store: St, config: Configuration, scheduler: S, out: W) -> Self {
        let engine = TimerEngine::new(config, scheduler);
        let form = RawConfiguration::from(engine.config());
        Self {
            engine,
            store,
            form,
            task_name: String::new(),
            iterations: DEFAULT_ITERATIONS.to_string(),
            out,
            mid_line: false,
        }
    }

    pub fn warn_load_failure(&mut self, warning: &ConfigLoadError) -> std::io::Result<()> {
        self.notice(&format!("Warning: {warning}\nUsing defaults."))
    }

    /// Print the initial status and the available controls.
    pub fn greet(&mut self) -> std::io::Result<()> {
        self.notice("Pomodoro Timer. Type `help` for commands.")?;
        self.draw_status()
    }

    pub fn handle_line(&mut self, line: &str) -> std::io::Result<Flow> {
        let command = match commands::parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(Flow::Continue),
            Err(e) => {
                self.notice(e.to_string().trim_end())?;
                return Ok(Flow::Continue);
            }
        };
        tracing::debug!(?command, "user intent");

        match command {
            Command::Timer(action) => commands::timer::run(action, self)?,
            Command::Config(action) => commands::config::run(action, self)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    pub fn handle_tick(&mut self, handle: TickHandle) -> std::io::Result<()> {
        match self.engine.tick(handle) {
            Some(event) => self.render(&event),
            None => Ok(()),
        }
    }

    pub(crate) fn render(&mut self, event: &Event) -> std::io::Result<()> {
        match render::describe(event) {
            Some(text) => {
                self.notice(&text)?;
                self.draw_status()
            }
            None => self.redraw_status(),
        }
    }

    pub(crate) fn render_or_ignore(&mut self, event: Option<Event>) -> std::io::Result<()> {
        match event {
            Some(event) => self.render(&event),
            None => Ok(()),
        }
    }

    /// Print a message on its own line.
    pub(crate) fn notice(&mut self, text: &str) -> std::io::Result<()> {
        if self.mid_line {
            writeln!(self.out)?;
            self.mid_line = false;
        }
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }

    fn draw_status(&mut self) -> std::io::Result<()> {
        let snap = self.engine.snapshot();
        let line = format!(
            "{}    [{}]",
            render::status_line(&snap),
            render::controls_hint(&snap.controls)
        );
        self.notice(&line)
    }

    /// Overwrite the current status line in place.
    fn redraw_status(&mut self) -> std::io::Result<()> {
        let snap = self.engine.snapshot();
        write!(self.out, "\r{}", render::status_line(&snap))?;
        self.mid_line = true;
        self.out.flush()
    }

    #[cfg(test)]
    fn output(&self) -> String
    where
        W: AsRef<[u8]>,
    {
        String::from_utf8_lossy(self.out.as_ref()).into_owned()
    }
}
