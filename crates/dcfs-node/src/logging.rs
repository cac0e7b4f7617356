use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber filtered by `directive`
/// (for example `info` or `dcfs_middleware=debug,info`).
pub fn init_tracing(directive: &str) -> Result<()> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| anyhow!("invalid log level {:?}: {}", directive, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow!("cannot install tracing subscriber: {}", e))
}
