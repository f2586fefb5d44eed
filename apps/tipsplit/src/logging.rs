//! Tracing subscriber bootstrap.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for command output.
///
/// `RUST_LOG` wins when set. Otherwise the configured level is used, raised
/// one step per `-v`.
pub fn init(config: &LoggingConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::default().add_directive(effective_level(config, verbose).into())
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if let Err(e) = installed {
        eprintln!("logging already initialized: {e}");
    }
}

fn effective_level(config: &LoggingConfig, verbose: u8) -> LevelFilter {
    let configured = config.level.parse().unwrap_or(LevelFilter::INFO);
    let requested = match verbose {
        0 => return configured,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    // LevelFilter orders OFF lowest and TRACE highest.
    configured.max(requested)
}
