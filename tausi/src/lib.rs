pub mod cli;
pub mod config;
pub mod plugin;

pub use cli::TausiCli;
pub use config::create_runtime_config;
pub use plugin::PluginRegistry;
pub use tausi_core::{RuntimeConfig, TausiPlugin};

#[derive(Debug, thiserror::Error)]
pub enum TausiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Plugin error: {0}")]
    Plugin(String),
}
