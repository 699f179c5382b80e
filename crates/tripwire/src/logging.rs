//! Logging system setup and configuration.
//!
//! The library crates only emit `tracing` events; this is the one place a
//! subscriber gets installed.

use crate::config::LoggingSettings;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output encoding for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl LogFormat {
    /// The `--json-logs` flag wins over the config file.
    pub fn select(config: &LoggingSettings, json_flag: bool) -> Self {
        if json_flag || config.json_format {
            LogFormat::Json
        } else {
            LogFormat::Plain
        }
    }
}

/// Initializes the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// since stdout carries replay output.
pub fn setup_logging(
    config: &LoggingSettings,
    json_format: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = config.level.as_str();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let format = LogFormat::select(config, json_format);

    let base = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_writer(std::io::stderr);
    let output = match format {
        LogFormat::Json => base.json().boxed(),
        LogFormat::Plain => base.with_ansi(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .try_init()?;

    info!(?format, "🔧 Logging initialized with level: {}", log_level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_flag_overrides_config() {
        let plain = LoggingSettings {
            level: "debug".to_string(),
            json_format: false,
        };
        let json = LoggingSettings {
            json_format: true,
            ..plain.clone()
        };

        assert_eq!(LogFormat::select(&plain, false), LogFormat::Plain);
        assert_eq!(LogFormat::select(&plain, true), LogFormat::Json);
        assert_eq!(LogFormat::select(&json, false), LogFormat::Json);
    }
}
