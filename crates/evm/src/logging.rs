use anyhow::{Context, Result};
use env_logger::{Env, Target};
use std::fs::{self, OpenOptions};

use crate::config::evm_dir;

pub const LOG_FILE: &str = "evm.log";

/// Initialize the logger with default level depending on --debug (overridden by RUST_LOG).
///
/// With `to_file` the output is appended to `~/.evm/evm.log` instead of stderr.
pub fn init(debug: bool, to_file: bool) -> Result<()> {
    let env = if debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    let mut builder = env_logger::Builder::from_env(env);

    if to_file {
        let dir = evm_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
        let path = dir.join(LOG_FILE);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
