use crate::{create_runtime_config, PluginRegistry, TausiError};
use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;

pub struct TausiCli {
    registry: PluginRegistry,
}

impl TausiCli {
    pub fn new() -> Self {
        let mut registry = PluginRegistry::new();
        registry.register_builtin_plugins();

        Self { registry }
    }

    pub fn build_app(&self) -> Command {
        let styles = clap::builder::styling::Styles::styled()
            .header(clap::builder::styling::AnsiColor::BrightCyan.on_default() | clap::builder::styling::Effects::BOLD)
            .usage(clap::builder::styling::AnsiColor::BrightGreen.on_default() | clap::builder::styling::Effects::BOLD)
            .literal(clap::builder::styling::AnsiColor::BrightWhite.on_default())
            .placeholder(clap::builder::styling::AnsiColor::BrightYellow.on_default());

        let base_app = Command::new("tausi")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Validate and clean the directory layout of JavaScript projects")
            .author("Tausi Contributors")
            .styles(styles)
            .disable_help_subcommand(true)
            .arg(
                Arg::new("verbose")
                    .long("verbose")
                    .short('v')
                    .action(clap::ArgAction::SetTrue)
                    .help("Enable verbose output")
                    .global(true),
            )
            .arg(
                Arg::new("config")
                    .long("config")
                    .short('c')
                    .value_name("FILE")
                    .help("Validator configuration file (YAML, JSON or TOML)")
                    .global(true),
            );

        self.registry.build_cli(base_app)
    }

    pub fn run(&self, args: Vec<String>) -> Result<()> {
        let app = self.build_app();
        let matches = app.try_get_matches_from(args)?;

        let verbose = matches.get_flag("verbose");
        self.init_logging(verbose);

        let config_file = matches.get_one::<String>("config").map(PathBuf::from);
        let config = create_runtime_config(config_file, verbose)?;

        if let Some(path) = &config.config_file {
            if !config.resolve_path(path).is_file() {
                return Err(TausiError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                ))
                .into());
            }
        }

        if verbose {
            tracing::debug!("Verbose mode enabled");
        }

        // Route to appropriate plugin
        match matches.subcommand() {
            Some((command_name, sub_matches)) => {
                self.registry.handle_command(command_name, sub_matches, &config)
            }
            None => {
                let mut app = self.build_app();
                app.print_help()?;
                println!();
                Ok(())
            }
        }
    }

    fn init_logging(&self, verbose: bool) {
        use tracing_subscriber::{fmt, EnvFilter};

        let default_filter = if verbose { "tausi=debug" } else { "tausi=info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // A subscriber may already be installed when embedded or under test
        let _ = fmt()
            .with_env_filter(filter)
            .with_target(false)
            .without_time()
            .try_init();
    }
}

impl Default for TausiCli {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_cli_creation() {
        let cli = TausiCli::new();
        let app = cli.build_app();

        assert_eq!(app.get_name(), "tausi");
        assert!(app.get_version().is_some());
        for command in ["validate", "clean", "rules"] {
            assert!(app.find_subcommand(command).is_some());
        }
    }

    #[test]
    fn test_help_command() {
        let cli = TausiCli::new();
        let result = cli.run(args(&["tausi", "--help"]));

        match result {
            Ok(_) => {}
            Err(e) => {
                // clap help exits with a special error type that's actually success
                if let Some(clap_err) = e.downcast_ref::<clap::Error>() {
                    assert_eq!(clap_err.kind(), clap::error::ErrorKind::DisplayHelp);
                } else {
                    panic!("Unexpected error type: {}", e);
                }
            }
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = TausiCli::new();
        let matches = cli
            .build_app()
            .try_get_matches_from(args(&["tausi", "validate", ".", "-v", "--config", "tausi.yaml"]))
            .unwrap();

        assert!(matches.get_flag("verbose"));
        assert_eq!(
            matches.get_one::<String>("config").map(String::as_str),
            Some("tausi.yaml")
        );
    }

    #[test]
    fn test_validate_and_clean_end_to_end() {
        let temp = tempdir().unwrap();
        let root = temp.path().to_string_lossy().into_owned();
        fs::create_dir_all(temp.path().join("backend")).unwrap();
        fs::write(temp.path().join("backend/api.js"), "console.log(\"x\");\n").unwrap();

        let cli = TausiCli::new();
        cli.run(args(&["tausi", "validate", &root])).unwrap();
        cli.run(args(&["tausi", "validate", &root, "--format", "json"])).unwrap();
        cli.run(args(&["tausi", "clean", &root, "--fix"])).unwrap();

        assert_eq!(fs::read_to_string(temp.path().join("backend/api.js")).unwrap(), "");
        assert!(temp.path().join("frontend/src/styles").is_dir());
    }

    #[test]
    fn test_missing_config_file_fails() {
        let temp = tempdir().unwrap();
        let root = temp.path().to_string_lossy().into_owned();
        let missing = temp.path().join("absent.yaml").to_string_lossy().into_owned();

        let cli = TausiCli::new();
        let err = cli
            .run(args(&["tausi", "--config", &missing, "validate", &root]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TausiError>(),
            Some(TausiError::Config(_))
        ));
    }
}
