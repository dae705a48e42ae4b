use anyhow::Result;
use clap::{ArgMatches, Command};
use std::path::{Path, PathBuf};

mod output;

pub use output::{OutputFormat, OutputFormatter};

/// Trait that all tausi plugins must implement
pub trait TausiPlugin: Send + Sync {
    /// Returns the plugin name (used for command routing)
    fn name(&self) -> &str;

    /// Register CLI commands for this plugin
    fn register_commands(&self, app: Command) -> Command;

    /// Handle a command for this plugin
    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()>;
}

/// Runtime configuration available to all plugins
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub working_dir: PathBuf,
    pub config_file: Option<PathBuf>,
    pub verbose: bool,
}

impl RuntimeConfig {
    pub fn new(working_dir: PathBuf) -> Self {
        Self {
            working_dir,
            config_file: None,
            verbose: false,
        }
    }

    pub fn has_config_file(&self) -> bool {
        self.config_file.is_some()
    }

    /// Resolve a user-supplied directory argument against the working directory
    pub fn resolve_path<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        let path = path.as_ref();
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        };

        // Canonicalize only when the target exists; clean may be pointed at a fresh directory
        joined.canonicalize().unwrap_or(joined)
    }
}
