//! Logging setup for the `fitarena` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! whoever drives the arena.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
  Trace,
  Debug,
  #[default]
  Info,
  Warn,
  Error,
}

impl From<LogLevel> for tracing::Level {
  fn from(level: LogLevel) -> Self {
    match level {
      LogLevel::Trace => tracing::Level::TRACE,
      LogLevel::Debug => tracing::Level::DEBUG,
      LogLevel::Info => tracing::Level::INFO,
      LogLevel::Warn => tracing::Level::WARN,
      LogLevel::Error => tracing::Level::ERROR,
    }
  }
}

/// Installs a compact `[LEVEL] message` subscriber on stderr.
///
/// Does nothing if a global subscriber is already set.
pub fn init(level: LogLevel) {
  let filter = tracing_subscriber::filter::LevelFilter::from_level(level.into());

  let layer = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .without_time()
    .with_target(false)
    .with_level(true)
    .with_ansi(false)
    .compact()
    .with_filter(filter);

  let _ = Registry::default().with(layer).try_init();
}
