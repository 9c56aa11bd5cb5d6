//! Tracing setup shared by binaries: `RUST_LOG`-style filtering, output to stderr or to
//! `<log_dir>/<app_name>.log`.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber.
///
/// The filter comes from `RUST_LOG` when set, else `default_directive` (e.g. `"info"`).
/// With `log_dir`, events go to a non-rolling file through a background writer; keep the
/// returned guard alive until exit so buffered lines are flushed. A subscriber that is
/// already installed is left in place.
pub fn init(
    app_name: &str,
    log_dir: Option<&Path>,
    default_directive: &str,
) -> std::io::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, format!("{}.log", app_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = builder.with_writer(writer).with_ansi(false).try_init();
            Ok(Some(guard))
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
            Ok(None)
        }
    }
}
