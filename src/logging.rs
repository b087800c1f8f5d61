use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sends tracing output to `path`. The terminal belongs to the TUI, so
/// nothing is written to stdout or stderr.
///
/// `RETRO_LOG` overrides `default_filter`. The returned guard flushes the
/// writer when dropped and must live until exit.
pub fn init(path: &Path, default_filter: &str) -> Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    let file_name = path
        .file_name()
        .context("log file path has no file name")?;

    let env_filter =
        EnvFilter::try_from_env("RETRO_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init()
        .context("installing tracing subscriber")?;
    Ok(guard)
}
