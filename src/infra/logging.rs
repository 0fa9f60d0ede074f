//! Logger bootstrap for the command-line front end.

use log::LevelFilter;

/// Maps the `-v` count to a default log level.
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Initializes `env_logger` on stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag. Calling this more
/// than once is harmless; later calls are ignored.
pub fn init_logging(verbosity: u8) {
    let _ = env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init();
}
