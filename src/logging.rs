//! Logger initialization
//!
//! Log records go through the [`log`] macros and are written by
//! [`env_logger`]. The terminal belongs to the game while it runs, so the
//! binary normally sends records to a file instead of stderr.

use anyhow::{Context, Result};
use env_logger::fmt::Formatter;
use env_logger::{Target, WriteStyle};
use log::Record;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

/// Default log level for debug compilations.
const DEBUG_LOG_LEVEL: &str = "trace";

/// Default log level for release compilations.
const RELEASE_LOG_LEVEL: &str = "info";

/// Environment variable for log level setting.
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Environment variable for log style setting.
const LOG_STYLE_ENV: &str = "LOG_STYLE";

/// Default log style.
const LOG_STYLE: &str = "auto";

/// Initialize logging, appending to `log_file` when given and writing to
/// stderr otherwise. Call once from the binary.
pub fn init_logger(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default()
            .filter_or(LOG_LEVEL_ENV, default_log_level())
            .write_style_or(LOG_STYLE_ENV, LOG_STYLE),
    );
    builder.format(format);

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        builder
            .target(Target::Pipe(Box::new(file)))
            .write_style(WriteStyle::Never);
    }

    builder.try_init().context("Logger already initialized")
}

/// Level used when `LOG_LEVEL` is unset.
fn default_log_level() -> &'static str {
    match cfg!(debug_assertions) {
        true => DEBUG_LOG_LEVEL,
        false => RELEASE_LOG_LEVEL,
    }
}

/// Logging output format.
fn format(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    use env_logger::fmt::Color;
    use log::Level;

    let mut level_style = buf.style();
    match record.level() {
        Level::Error => level_style.set_color(Color::Red).set_bold(true),
        Level::Warn => level_style.set_color(Color::Yellow),
        Level::Info => level_style.set_color(Color::Cyan),
        Level::Debug => level_style.set_color(Color::Magenta),
        Level::Trace => level_style.set_color(Color::Blue),
    };

    writeln!(
        buf,
        "{} {}\t{}",
        buf.timestamp_millis(),
        level_style.value(record.level()),
        record.args()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_follows_build() {
        let expected = if cfg!(debug_assertions) { "trace" } else { "info" };
        assert_eq!(default_log_level(), expected);
    }
}
