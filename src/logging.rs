use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize file logging.
///
/// The terminal is owned by the game, so logs go to
/// `~/.local/share/nanji-attack/logs/` instead of stderr. The level is set
/// with the `NANJI_LOG` environment variable:
///
/// ```bash
/// NANJI_LOG=debug nanji-attack
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "nanji-attack.log");

    let env_filter = EnvFilter::try_from_env("NANJI_LOG")
        .unwrap_or_else(|_| EnvFilter::new("nanji_attack=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()?;

    tracing::info!(log_dir = %log_dir.display(), "nanji-attack starting");
    Ok(())
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nanji-attack")
        .join("logs")
}
