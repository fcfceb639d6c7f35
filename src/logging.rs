use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Where log lines go
pub enum LogTarget<'a> {
    /// Append to a file (the TUI owns the terminal)
    File(&'a Path),
    Stderr,
}

/// Initialize logging. RUST_LOG overrides the default "info" filter.
pub fn init_logging(target: LogTarget) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    match target {
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
        }
    }

    // A second init (e.g. from tests) is harmless
    let _ = builder.try_init();
    Ok(())
}
