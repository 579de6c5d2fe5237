//! Output modes and rendering shared by every command.
//!
//! A command builds one serializable result and hands it to [`render`] or
//! [`render_mode`]. JSON mode serializes the result as is; the two human modes
//! call back into the command. Failures go to stderr through [`fail`], which
//! marks the error as reported so `main` only has to set the exit status.
//!
//! # Choosing a mode
//!
//! The first source that names a known mode wins:
//! `--format`, then `--json`, then `KIN_FORMAT`, then `output` in the user
//! config. With none of them, a terminal gets [`OutputMode::Pretty`] and a
//! pipe gets [`OutputMode::Text`].

use std::fmt;
use std::io::{self, IsTerminal, Write};

use clap::ValueEnum;
use kin_core::config::normalize_output_mode;
use kin_core::error::ErrorCode;
use serde::Serialize;
use tracing::debug;

const RULE_WIDTH: usize = 72;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Columns and sections for reading in a terminal.
    Pretty,
    /// Tab-separated lines for scripts and pipes.
    Text,
    /// Stable JSON.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Mode named by `KIN_FORMAT` or the user config, aliases included.
    fn from_name(raw: &str) -> Option<Self> {
        normalize_output_mode(raw).and_then(|name| <Self as ValueEnum>::from_str(name, true).ok())
    }
}

/// Every place an output mode can come from.
#[derive(Debug, Default)]
struct ModeSources<'a> {
    format_flag: Option<OutputMode>,
    json_flag: bool,
    env: Option<&'a str>,
    user_config: Option<&'a str>,
    stdout_is_tty: bool,
}

impl ModeSources<'_> {
    fn resolve(&self) -> OutputMode {
        self.format_flag
            .or_else(|| self.json_flag.then_some(OutputMode::Json))
            .or_else(|| self.env.and_then(OutputMode::from_name))
            .or_else(|| self.user_config.and_then(OutputMode::from_name))
            .unwrap_or(if self.stdout_is_tty {
                OutputMode::Pretty
            } else {
                OutputMode::Text
            })
    }
}

/// Pick the output mode for this invocation.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    user_config: Option<&str>,
) -> OutputMode {
    let env = std::env::var("KIN_FORMAT").ok();
    ModeSources {
        format_flag,
        json_flag,
        env: env.as_deref(),
        user_config,
        stdout_is_tty: io::stdout().is_terminal(),
    }
    .resolve()
}

/// Heading underlined with a rule.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}\n{}", "-".repeat(RULE_WIDTH))
}

/// Indented `key: value` line with the values aligned.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: &str) -> io::Result<()> {
    writeln!(w, "{:<12} {value}", format!("{key}:"))
}

/// A failure as shown to the user. The JSON form is
/// `{"error": {"message", "suggestion"?, "error_code"?}}`.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            error_code: None,
        }
    }

    /// Error tagged with `code`, suggesting the code's hint.
    pub fn coded(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }
}

/// An error whose message is already on stderr.
#[derive(Debug)]
struct Reported(String);

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Reported {}

fn emit<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, OutputMode, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut out, value)?;
        writeln!(out)?;
    } else {
        human(value, mode, &mut out)?;
    }
    Ok(())
}

/// Print `value` as JSON, or through `human` in both pretty and text mode.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    emit(mode, value, |v, _, w| human(v, w))
}

/// Print `value` as JSON, or through the renderer for the current human mode.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    emit(mode, value, |v, mode, w| match mode {
        OutputMode::Pretty => pretty(v, w),
        OutputMode::Text | OutputMode::Json => text(v, w),
    })
}

fn write_error(mode: OutputMode, error: &CliError, w: &mut dyn Write) -> io::Result<()> {
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *w, &serde_json::json!({ "error": error }))?;
        return writeln!(w);
    }

    match &error.error_code {
        Some(code) => writeln!(w, "error[{code}]: {}", error.message)?,
        None => writeln!(w, "error: {}", error.message)?,
    }
    if let Some(suggestion) = &error.suggestion {
        writeln!(w, "  hint: {suggestion}")?;
    }
    Ok(())
}

fn report(mode: OutputMode, error: &CliError) {
    if let Err(err) = write_error(mode, error, &mut io::stderr().lock()) {
        debug!(%err, "could not write error to stderr");
    }
}

/// Print `error` to stderr and return it for the command to propagate.
pub fn fail(mode: OutputMode, error: &CliError) -> anyhow::Error {
    report(mode, error);
    Reported(error.message.clone()).into()
}

/// Print a failure that no command has reported yet.
pub fn report_failure(mode: OutputMode, err: &anyhow::Error) {
    if err.downcast_ref::<Reported>().is_none() {
        report(mode, &CliError::new(format!("{err:#}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(mode: OutputMode, error: &CliError) -> String {
        let mut buf = Vec::new();
        write_error(mode, error, &mut buf).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn format_flag_wins_over_everything() {
        let sources = ModeSources {
            format_flag: Some(OutputMode::Text),
            json_flag: true,
            env: Some("pretty"),
            user_config: Some("json"),
            stdout_is_tty: true,
        };
        assert_eq!(sources.resolve(), OutputMode::Text);
    }

    #[test]
    fn json_flag_beats_env() {
        let sources = ModeSources {
            json_flag: true,
            env: Some("text"),
            ..ModeSources::default()
        };
        assert_eq!(sources.resolve(), OutputMode::Json);
    }

    #[test]
    fn env_beats_user_config() {
        let sources = ModeSources {
            env: Some(" JSON "),
            user_config: Some("text"),
            ..ModeSources::default()
        };
        assert_eq!(sources.resolve(), OutputMode::Json);
    }

    #[test]
    fn user_config_aliases_are_understood() {
        let sources = ModeSources {
            user_config: Some("human"),
            ..ModeSources::default()
        };
        assert_eq!(sources.resolve(), OutputMode::Pretty);
    }

    #[test]
    fn unknown_names_fall_back_to_the_terminal_default() {
        let piped = ModeSources {
            env: Some("yaml"),
            user_config: Some("xml"),
            ..ModeSources::default()
        };
        assert_eq!(piped.resolve(), OutputMode::Text);

        let tty = ModeSources {
            env: Some("yaml"),
            stdout_is_tty: true,
            ..ModeSources::default()
        };
        assert_eq!(tty.resolve(), OutputMode::Pretty);
    }

    #[test]
    fn text_error_shows_code_and_hint() {
        let err = CliError::coded(ErrorCode::NotInitialized, "no .kin directory");
        let text = written(OutputMode::Text, &err);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("error[E1001]: no .kin directory"));
        assert!(lines.next().is_some_and(|l| l.contains("kin init")));
    }

    #[test]
    fn json_error_omits_empty_fields() {
        let text = written(OutputMode::Json, &CliError::new("boom"));
        let value: serde_json::Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value, serde_json::json!({ "error": { "message": "boom" } }));
    }

    #[test]
    fn failed_commands_are_marked_reported() {
        let reported = fail(OutputMode::Text, &CliError::new("already shown"));
        assert!(reported.downcast_ref::<Reported>().is_some());
        assert_eq!(reported.to_string(), "already shown");
        assert!(anyhow::anyhow!("fresh").downcast_ref::<Reported>().is_none());
    }
}
