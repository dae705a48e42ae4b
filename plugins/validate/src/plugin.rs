use crate::config::{load_config, ValidatorConfig};
use crate::project::{detect_project_type, ProjectType};
use crate::rules::select_rules;
use crate::{report, ProjectValidator};
use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use colored::*;
use tausi_core::{OutputFormat, OutputFormatter, RuntimeConfig, TausiPlugin};

fn directory_arg(help: &'static str) -> Arg {
    Arg::new("directory")
        .value_name("DIRECTORY")
        .help(help)
        .default_value(".")
}

fn directory<'a>(matches: &'a ArgMatches) -> &'a str {
    matches
        .get_one::<String>("directory")
        .map(String::as_str)
        .unwrap_or(".")
}

/// Validator configured from `--config` when given, defaults otherwise.
fn load_validator(config: &RuntimeConfig) -> Result<ProjectValidator> {
    let validator_config = match &config.config_file {
        Some(path) => {
            tracing::debug!("Loading validator config from {}", path.display());
            load_config(config.resolve_path(path))?
        }
        None => ValidatorConfig::default(),
    };
    Ok(ProjectValidator::new(validator_config))
}

pub struct ValidatePlugin;

impl ValidatePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl TausiPlugin for ValidatePlugin {
    fn name(&self) -> &str {
        "validate"
    }

    fn register_commands(&self, app: Command) -> Command {
        app.subcommand(
            Command::new("validate")
                .about("Validate project structure and file locations")
                .arg(directory_arg("Project directory to validate"))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_name("FORMAT")
                        .help("Output format (human, json)")
                        .default_value("human"),
                ),
        )
    }

    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()> {
        let format = matches
            .get_one::<String>("format")
            .map(|value| value.parse::<OutputFormat>())
            .transpose()
            .map_err(anyhow::Error::msg)?
            .unwrap_or_default();
        let project_path = config.resolve_path(directory(matches));
        let validator = load_validator(config)?;

        let project_report = validator.validate(&project_path);

        match format {
            OutputFormat::Human => {
                println!("🔍 Validating project at: {}", project_path.display());
                println!();
                print!("{}", project_report.format(OutputFormat::Human));
            }
            OutputFormat::Json => println!("{}", project_report.format(OutputFormat::Json)),
        }

        Ok(())
    }
}

impl Default for ValidatePlugin {
    fn default() -> Self {
        Self::new()
    }
}

pub struct CleanPlugin;

impl CleanPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl TausiPlugin for CleanPlugin {
    fn name(&self) -> &str {
        "clean"
    }

    fn register_commands(&self, app: Command) -> Command {
        app.subcommand(
            Command::new("clean")
                .about("Clean and fix project structure issues")
                .arg(directory_arg("Project directory to clean"))
                .arg(
                    Arg::new("fix")
                        .long("fix")
                        .help("Automatically fix common issues")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
    }

    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()> {
        let apply_fixes = matches.get_flag("fix");
        let project_path = config.resolve_path(directory(matches));
        let validator = load_validator(config)?;

        println!("🧹 Cleaning project at: {}", project_path.display());
        println!();

        validator.clean_project(&project_path, apply_fixes)?;
        Ok(())
    }
}

impl Default for CleanPlugin {
    fn default() -> Self {
        Self::new()
    }
}

pub struct RulesPlugin;

impl RulesPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl TausiPlugin for RulesPlugin {
    fn name(&self) -> &str {
        "rules"
    }

    fn register_commands(&self, app: Command) -> Command {
        app.subcommand(
            Command::new("rules")
                .about("List the rules that apply to a project")
                .arg(directory_arg("Project directory whose type selects the rules"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .value_name("TYPE")
                        .help("Force a project type instead of detecting it")
                        .value_parser(["cli-tool", "generated-project"]),
                ),
        )
    }

    fn handle_command(&self, matches: &ArgMatches, config: &RuntimeConfig) -> Result<()> {
        let project_type = match matches.get_one::<String>("type") {
            Some(forced) => forced.parse::<ProjectType>().map_err(anyhow::Error::msg)?,
            None => {
                let project_path = config.resolve_path(directory(matches));
                let detected = detect_project_type(&project_path);
                println!(
                    "{} {} {}",
                    "Detected".dimmed(),
                    detected.to_string().cyan(),
                    format!("for {}", project_path.display()).dimmed()
                );
                println!();
                detected
            }
        };

        print!("{}", report::format_rule_set(&select_rules(project_type)));
        Ok(())
    }
}

impl Default for RulesPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn run(plugin: &dyn TausiPlugin, args: &[&str], config: &RuntimeConfig) -> Result<()> {
        let app = plugin.register_commands(Command::new("tausi"));
        let matches = app.try_get_matches_from(args)?;
        let (_, sub_matches) = matches.subcommand().unwrap();
        plugin.handle_command(sub_matches, config)
    }

    #[test]
    fn test_validate_command_human_and_json() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("README.md"), "# app").unwrap();
        let config = RuntimeConfig::new(temp.path().to_path_buf());

        run(&ValidatePlugin::new(), &["tausi", "validate"], &config).unwrap();
        run(&ValidatePlugin::new(), &["tausi", "validate", ".", "--format", "json"], &config).unwrap();
        assert!(run(&ValidatePlugin::new(), &["tausi", "validate", "--format", "xml"], &config).is_err());
    }

    #[test]
    fn test_clean_command_creates_scaffold() {
        let temp = tempdir().unwrap();
        let config = RuntimeConfig::new(temp.path().to_path_buf());

        run(&CleanPlugin::new(), &["tausi", "clean", "app", "--fix"], &config).unwrap();
        assert!(temp.path().join("app/frontend/public/assets").is_dir());
    }

    #[test]
    fn test_clean_command_uses_config_file() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("tausi.yaml"), "required_directories:\n  - docs\n").unwrap();
        let mut config = RuntimeConfig::new(temp.path().to_path_buf());
        config.config_file = Some("tausi.yaml".into());

        run(&CleanPlugin::new(), &["tausi", "clean", "app"], &config).unwrap();
        assert!(temp.path().join("app/docs").is_dir());
        assert!(!temp.path().join("app/frontend").exists());
    }

    #[test]
    fn test_rules_command_accepts_known_types_only() {
        let config = RuntimeConfig::new(std::env::temp_dir());

        run(&RulesPlugin::new(), &["tausi", "rules", "--type", "cli-tool"], &config).unwrap();
        assert!(run(&RulesPlugin::new(), &["tausi", "rules", "--type", "library"], &config).is_err());
    }

    #[test]
    fn test_plugin_names_match_commands() {
        let plugins: Vec<Box<dyn TausiPlugin>> = vec![
            Box::new(ValidatePlugin::new()),
            Box::new(CleanPlugin::new()),
            Box::new(RulesPlugin::new()),
        ];

        for plugin in plugins {
            let app = plugin.register_commands(Command::new("tausi"));
            assert!(app.find_subcommand(plugin.name()).is_some());
        }
    }
}
