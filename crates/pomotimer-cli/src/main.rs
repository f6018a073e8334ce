use pomotimer_core::timer::TokioScheduler;
use pomotimer_core::{ConfigStore, FileConfigStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod controller;
mod render;

use controller::{Controller, Flow};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> pomotimer_core::error::Result<()> {
    let store = FileConfigStore::open_default();
    let outcome = store.load();
    tracing::debug!(path = %store.path().display(), "configuration loaded");

    let (scheduler, mut ticks) = TokioScheduler::new();
    let mut ctl = Controller::new(store, outcome.config, scheduler, std::io::stdout());
    if let Some(warning) = &outcome.warning {
        ctl.warn_load_failure(warning)?;
    }
    ctl.greet()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if ctl.handle_line(&line)? == Flow::Quit {
                    break;
                }
            }
            Some(handle) = ticks.recv() => ctl.handle_tick(handle)?,
        }
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
