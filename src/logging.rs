use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Filter directive for the given config level and `-v` count.
///
/// `-v` only ever raises verbosity. A plain config level is compared with the
/// `-v` level and the more verbose one wins; a per-target directive is kept
/// and the `-v` level becomes its default.
pub fn log_directive(config_level: &str, verbosity: u8) -> String {
    let (requested, name) = match verbosity {
        0 => return config_level.to_string(),
        1 => (LevelFilter::INFO, "info"),
        2 => (LevelFilter::DEBUG, "debug"),
        _ => (LevelFilter::TRACE, "trace"),
    };

    match config_level.trim().parse::<LevelFilter>() {
        Ok(configured) if configured >= requested => config_level.to_string(),
        Ok(_) => name.to_string(),
        Err(_) => format!("{},{}", config_level, name),
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over the config.
///
/// With `quiet_stderr` and no log file, nothing is logged unless `RUST_LOG`
/// is set, so terminal output is left untouched.
pub fn init(config: &LoggingConfig, verbosity: u8, quiet_stderr: bool) -> Result<()> {
    let directive = log_directive(&config.level, verbosity);
    let from_env = EnvFilter::try_from_default_env().ok();

    match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {:?}", path))?;
            tracing_subscriber::registry()
                .with(from_env.unwrap_or_else(|| EnvFilter::new(&directive)))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        None => {
            let filter = match from_env {
                Some(filter) => filter,
                None if quiet_stderr => EnvFilter::new("off"),
                None => EnvFilter::new(&directive),
            };
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install log subscriber")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive("warn", 0), "warn");
        assert_eq!(log_directive("warn", 1), "info");
        assert_eq!(log_directive("error", 2), "debug");
        assert_eq!(log_directive("warn", 5), "trace");
    }

    #[test]
    fn test_verbose_flag_never_lowers_config_level() {
        assert_eq!(log_directive("debug", 1), "debug");
        assert_eq!(log_directive("trace", 2), "trace");
        assert_eq!(log_directive("debug", 3), "trace");
        assert_eq!(log_directive("off", 1), "info");
    }

    #[test]
    fn test_verbose_flag_with_target_directive() {
        assert_eq!(
            log_directive("drom_dashboard=debug", 1),
            "drom_dashboard=debug,info"
        );
        assert_eq!(
            log_directive("drom_dashboard=debug", 0),
            "drom_dashboard=debug"
        );
    }
}
