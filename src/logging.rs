// src/logging.rs

use crate::config::Config;
use crate::errors::HookchatResult;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;

/// Routes the `log` facade into the configured log file.
///
/// The terminal belongs to the widget, so nothing is written to stderr.
/// `RUST_LOG` overrides the configured level.
pub fn init_logging(config: &Config) -> HookchatResult<()> {
    let file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(&config.log_file)?;

    Builder::from_env(Env::default().default_filter_or(config.log_level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| crate::errors::HookchatError::config_error(e.to_string()))?;

    log::info!("logging to {}", config.log_file.display());
    Ok(())
}
