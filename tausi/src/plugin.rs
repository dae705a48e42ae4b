use crate::{RuntimeConfig, TausiError};
use anyhow::Result;
use clap::{ArgMatches, Command};
use std::collections::HashMap;
use tausi_core::TausiPlugin;

pub struct PluginRegistry {
    plugins: HashMap<String, Box<dyn TausiPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    pub fn register(&mut self, plugin: Box<dyn TausiPlugin>) {
        let name = plugin.name().to_string();
        self.plugins.insert(name, plugin);
    }

    pub fn register_builtin_plugins(&mut self) {
        self.register(Box::new(tausi_validate::ValidatePlugin::new()));
        self.register(Box::new(tausi_validate::CleanPlugin::new()));
        self.register(Box::new(tausi_validate::RulesPlugin::new()));
    }

    /// Subcommands are added in name order so help output is stable
    pub fn build_cli(&self, base_app: Command) -> Command {
        let mut names: Vec<&String> = self.plugins.keys().collect();
        names.sort();

        names
            .into_iter()
            .filter_map(|name| self.plugins.get(name))
            .fold(base_app, |app, plugin| plugin.register_commands(app))
    }

    pub fn handle_command(
        &self,
        command_name: &str,
        matches: &ArgMatches,
        config: &RuntimeConfig,
    ) -> Result<()> {
        if let Some(plugin) = self.plugins.get(command_name) {
            plugin.handle_command(matches, config)
        } else {
            Err(TausiError::Plugin(format!("Unknown command: {}", command_name)).into())
        }
    }

    pub fn get_plugin(&self, name: &str) -> Option<&dyn TausiPlugin> {
        self.plugins.get(name).map(|plugin| plugin.as_ref())
    }

    pub fn list_plugins(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.plugins.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_plugins() {
        let mut registry = PluginRegistry::new();
        assert!(registry.get_plugin("validate").is_none());

        registry.register_builtin_plugins();
        assert_eq!(registry.list_plugins(), vec!["clean", "rules", "validate"]);
        assert!(registry.get_plugin("validate").is_some());
    }

    #[test]
    fn test_unknown_command_is_plugin_error() {
        let registry = PluginRegistry::new();
        let matches = Command::new("tausi").get_matches_from(vec!["tausi"]);
        let config = RuntimeConfig::new(std::env::temp_dir());

        let err = registry
            .handle_command("frobnicate", &matches, &config)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TausiError>(),
            Some(TausiError::Plugin(_))
        ));
    }
}
