//! Structured logging for the emerge pipeline.
//!
//! Installs a `tracing` subscriber with console output, optional JSON file
//! logging in debug builds, and `RUST_LOG`/settings-driven filtering. Records
//! emitted through the `log` facade are bridged into the same subscriber.

use std::path::Path;

use emerge_config::PipelineSettings;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "emerge.log";

/// Pick the filter directive: the settings' `log_level` if set, the default otherwise.
pub fn filter_directive(settings: Option<&PipelineSettings>) -> String {
    settings
        .map(|s| s.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `settings.log_level`. When `debug_build` is set and
/// `log_dir` can be created, a JSON layer also writes to [`LOG_FILE_NAME`] in
/// that directory.
///
/// # Examples
///
/// ```no_run
/// use emerge_config::PipelineSettings;
/// use emerge_log::init_logging;
///
/// let settings = PipelineSettings::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&settings));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, settings: Option<&PipelineSettings>) {
    let filter_str = filter_directive(settings);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        tracing::debug!("JSON log file at {}", log_dir.join(LOG_FILE_NAME).display());
        return;
    }

    subscriber.init();
}

/// `EnvFilter` built from the default directive.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
