use super::*;

/// Sends `tracing` output to `path`. Without a path nothing is installed, so
/// log lines never land on the terminal the table is drawn on.
pub(crate) fn initialize(path: Option<&Path>) -> Result {
  let Some(path) = path else {
    return Ok(());
  };

  let file = fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(path)
    .with_context(|| format!("could not open log file {}", path.display()))?;

  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .try_init()
    .map_err(|error| anyhow!("failed to initialize logging: {error}"))?;

  Ok(())
}
