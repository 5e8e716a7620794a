//! Process-wide logger setup. Diagnostics, shader compile and link failures included, go to
//! standard output unless configured otherwise.

use env_logger::{Builder, Env, Target, WriteStyle};

use std::sync::Once;

/// Where log records are written.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

impl Default for LogTarget {
    fn default() -> Self {
        LogTarget::Stdout
    }
}

impl From<LogTarget> for Target {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Stdout => Target::Stdout,
            LogTarget::Stderr => Target::Stderr,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Overrides `RUST_LOG`. Uses the `env_logger` filter syntax, e.g.
    /// `"quad_demo=debug,glutin=warn"`.
    pub env_filter: Option<String>,
    /// Overrides `RUST_LOG_STYLE`.
    pub write_style: Option<WriteStyle>,
    pub target: LogTarget,
}

/// Builds the logger described by `config`, falling back to `RUST_LOG` and then `info`.
pub fn builder(config: &LoggingConfig) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(filter) = &config.env_filter {
        builder.parse_filters(filter);
    }
    if let Some(style) = config.write_style {
        builder.write_style(style);
    }
    builder.target(config.target.into());
    builder
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init(config: LoggingConfig) {
    INIT.call_once(|| {
        // Another logger may already be installed (e.g. by a test harness).
        if builder(&config).try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
