//! User intents, parsed from one line of input each.

use clap::{Parser, Subcommand};

pub mod config;
pub mod timer;

#[derive(Parser, Debug)]
#[command(
    name = "pomotimer",
    no_binary_name = true,
    disable_version_flag = true,
    about = "Pomodoro timer commands"
)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    #[command(flatten)]
    Timer(timer::TimerAction),
    #[command(flatten)]
    Config(config::ConfigAction),
    /// Leave the timer
    #[command(alias = "exit")]
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
///
/// `help` and malformed input come back as a [`clap::Error`] whose
/// rendering is the text to show.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    Line::try_parse_from(words).map(|l| Some(l.command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::ConfigAction;
    use timer::TimerAction;

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn parses_multi_word_task() {
        let cmd = parse("task Write the report").unwrap();
        assert_eq!(
            cmd,
            Some(Command::Timer(TimerAction::Task {
                name: vec!["Write".into(), "the".into(), "report".into()],
            }))
        );
    }

    #[test]
    fn keeps_raw_values_for_validation() {
        assert_eq!(
            parse("iterations -3").unwrap(),
            Some(Command::Timer(TimerAction::Iterations { value: "-3".into() }))
        );
        assert_eq!(
            parse("set short_break five").unwrap(),
            Some(Command::Config(ConfigAction::Set {
                key: "short_break".into(),
                value: "five".into(),
            }))
        );
    }

    #[test]
    fn parses_controls_and_quit() {
        assert_eq!(parse("start").unwrap(), Some(Command::Timer(TimerAction::Start)));
        assert_eq!(parse("skip").unwrap(), Some(Command::Timer(TimerAction::Skip)));
        assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(parse("launch").is_err());
        assert!(parse("help").is_err());
    }
}
