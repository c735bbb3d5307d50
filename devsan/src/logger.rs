// devsan/src/logger.rs
//! Logging setup for the devsan binary.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialises `env_logger` on stderr. `RUST_LOG` is honoured unless `level`
/// forces a filter. Calling this twice is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("error"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(Target::Stderr);
    let _ = builder.try_init();
}
