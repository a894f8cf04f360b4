//! Logging setup with a live verbosity switch.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Registry, fmt, reload};

use crate::config::LoggingConfig;

/// Swaps the global filter between the normal and the verbose directives.
pub struct LogControl {
    handle: reload::Handle<EnvFilter, Registry>,
    normal: String,
    verbose: String,
    is_verbose: AtomicBool,
}

impl LogControl {
    fn new(handle: reload::Handle<EnvFilter, Registry>, config: &LoggingConfig) -> Self {
        Self {
            handle,
            normal: config.filter.clone(),
            verbose: config.verbose_filter.clone(),
            is_verbose: AtomicBool::new(false),
        }
    }

    /// Switch to the other filter. Returns whether verbose logging is now on.
    ///
    /// # Errors
    ///
    /// Returns an error if the directive does not parse or the subscriber
    /// is gone.
    pub fn toggle_verbosity(&self) -> Result<bool, LoggingError> {
        let verbose = !self.is_verbose.load(Ordering::SeqCst);
        let directives = if verbose { &self.verbose } else { &self.normal };
        self.handle.reload(EnvFilter::try_new(directives)?)?;
        self.is_verbose.store(verbose, Ordering::SeqCst);
        Ok(verbose)
    }
}

/// Install the global `tracing` subscriber.
///
/// # Errors
///
/// Returns an error if the configured filter does not parse or a global
/// subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<LogControl, LoggingError> {
    let (filter, handle) = reload::Layer::new(EnvFilter::try_new(&config.filter)?);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .try_init()?;
    Ok(LogControl::new(handle, config))
}

/// Logging setup errors.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("invalid log filter")]
    Filter(#[from] ParseError),
    #[error("failed to reload log filter")]
    Reload(#[from] reload::Error),
    #[error("failed to install log subscriber")]
    Init(#[from] TryInitError),
}
