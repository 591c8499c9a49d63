use std::path::PathBuf;

use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds and installs the global tracing subscriber for applications and tests using this library.
///
/// Filters default to the `CONSOLE_LOG` and `FILE_LOG` environment variables.
#[derive(Default)]
pub struct AppTracingBuilder {
  console_filter: Option<EnvFilter>,
  log_file_path: Option<PathBuf>,
  file_filter: Option<EnvFilter>,
}
impl AppTracingBuilder {
  pub fn with_console_filter(mut self, console_filter: EnvFilter) -> Self {
    self.console_filter = Some(console_filter);
    self
  }

  pub fn with_log_file_path(mut self, log_file_path: impl Into<PathBuf>) -> Self {
    self.log_file_path = Some(log_file_path.into());
    self
  }
  pub fn with_file_filter(mut self, file_filter: EnvFilter) -> Self {
    self.file_filter = Some(file_filter);
    self
  }

  /// Installs the subscriber. If a global subscriber was already installed, for example by another test, the existing
  /// one is kept and [`AppTracing::is_installed`] returns `false`.
  pub fn build(self) -> AppTracing {
    let console_filter = self.console_filter.unwrap_or_else(|| filter_from_env("CONSOLE_LOG"));
    let file = self.log_file_path.map(|p| (p, self.file_filter.unwrap_or_else(|| filter_from_env("FILE_LOG"))));
    AppTracing::new(console_filter, file)
  }
}

fn filter_from_env(env: &str) -> EnvFilter {
  EnvFilter::try_from_env(env).unwrap_or_default()
}

pub struct AppTracing {
  installed: bool,
  _file_tracing: FileTracing,
}
#[cfg(feature = "app_tracing_file")]
#[derive(Default)]
struct FileTracing(Option<tracing_appender::non_blocking::WorkerGuard>);
#[cfg(not(feature = "app_tracing_file"))]
#[derive(Default)]
struct FileTracing;

impl AppTracing {
  #[inline]
  pub fn is_installed(&self) -> bool { self.installed }

  fn new(console_filter: EnvFilter, file: Option<(PathBuf, EnvFilter)>) -> Self {
    let layered = tracing_subscriber::registry()
      .with(
        tracing_subscriber::fmt::layer()
          .with_writer(std::io::stderr)
          .with_filter(console_filter)
      );

    #[cfg(feature = "app_tracing_file")] {
      if let Some((file_path, filter)) = file {
        return match open_log_file(&file_path) {
          Err(e) => {
            let installed = layered.try_init().is_ok();
            tracing::warn!("Cannot log to file; could not truncate/create and open log file '{}' for writing: {}", file_path.display(), e);
            Self { installed, _file_tracing: FileTracing::default() }
          }
          Ok(log_file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(std::io::BufWriter::new(log_file));
            let installed = layered
              .with(
                tracing_subscriber::fmt::layer()
                  .with_writer(non_blocking)
                  .with_ansi(false)
                  .with_filter(filter)
              )
              .try_init()
              .is_ok();
            Self { installed, _file_tracing: FileTracing(Some(guard)) }
          }
        };
      }
    }
    #[cfg(not(feature = "app_tracing_file"))] {
      if let Some((file_path, _)) = file {
        tracing::warn!("Cannot log to file '{}'; the `app_tracing_file` feature is disabled", file_path.display());
      }
    }

    let installed = layered.try_init().is_ok();
    Self { installed, _file_tracing: FileTracing::default() }
  }
}

#[cfg(feature = "app_tracing_file")]
fn open_log_file(file_path: &std::path::Path) -> std::io::Result<std::fs::File> {
  if let Some(parent) = file_path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::File::create(file_path)
}
