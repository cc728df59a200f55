use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::QuizError;

pub const LOG_FILE: &str = "skillquiz.log";

/// Sends all tracing output to `<dir>/skillquiz.log`; the terminal belongs to
/// the UI. `RUST_LOG` wins over `level` when set. Keep the guard alive for
/// the whole run or buffered lines are lost.
pub fn init(level: &str, dir: &Path) -> Result<WorkerGuard, QuizError> {
    std::fs::create_dir_all(dir).map_err(|source| QuizError::Logging {
        path: dir.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        tracing::debug!("global subscriber already installed");
    }

    Ok(guard)
}
