use std::io::Write;

use clap::Subcommand;
use pomotimer_core::{ConfigField, ConfigStore, CoreError, TickScheduler};

use crate::controller::Controller;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigAction {
    /// Edit a duration field and save it
    Set {
        /// Config key (work_duration, short_break, long_break, long_break_every)
        key: String,
        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// List all config values
    Config,
}

pub fn run<St, S, W>(
    action: ConfigAction,
    ctl: &mut Controller<St, S, W>,
) -> std::io::Result<()>
where
    St: ConfigStore,
    S: TickScheduler,
    W: Write,
{
    match action {
        ConfigAction::Set { key, value } => {
            let field = match key.parse::<ConfigField>() {
                Ok(field) => field,
                Err(e) => return ctl.notice(&e),
            };
            let previous = ctl.form.get(field).to_string();
            ctl.form.set(field, value);

            match ctl.store.save_raw(&ctl.form) {
                Ok(config) => {
                    // Already validated by save_raw.
                    if let Err(e) = ctl.engine.set_configuration(config) {
                        tracing::warn!(error = %e, "engine rejected saved configuration");
                    }
                    ctl.notice(&format!("{field} = {}", config.get(field)))?;
                }
                Err(CoreError::ConfigValidation(e)) => {
                    ctl.form.set(field, previous);
                    ctl.notice(&format!("Invalid configuration input: {e}"))?;
                }
                Err(e) => {
                    ctl.form.set(field, previous);
                    ctl.notice(&format!("Error saving config: {e}"))?;
                }
            }
        }
        ConfigAction::Config => {
            let config = *ctl.engine.config();
            for field in ConfigField::ALL {
                ctl.notice(&format!("{field} = {}", config.get(field)))?;
            }
        }
    }
    Ok(())
}
