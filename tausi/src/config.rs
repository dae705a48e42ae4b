use anyhow::Result;
use std::path::PathBuf;
use tausi_core::RuntimeConfig;

pub fn create_runtime_config(config_file: Option<PathBuf>, verbose: bool) -> Result<RuntimeConfig> {
    let working_dir = std::env::current_dir()?;

    Ok(RuntimeConfig {
        working_dir,
        config_file,
        verbose,
    })
}
