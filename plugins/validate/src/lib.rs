pub mod config;
pub mod engine;
pub mod plugin;
pub mod project;
pub mod report;
pub mod rules;
pub mod tables;
pub mod validators;
pub mod walker;

pub use config::{load_config, ValidatorConfig};
pub use engine::{
    CleanReport, FixResult, FixableIssue, NonNegotiableResult, ProjectReport, ProjectValidator,
    ValidationResult,
};
pub use plugin::{CleanPlugin, RulesPlugin, ValidatePlugin};
pub use project::{detect_project_type, ProjectType};
pub use rules::{select_rules, Check, NonNegotiableRule, PlacementRule, RuleSet, Severity};

use anyhow::Result;
use std::path::Path;

pub fn validate_structure<P: AsRef<Path>>(project_path: P) -> ValidationResult {
    ProjectValidator::default().validate_structure(project_path)
}

pub fn validate_non_negotiable_rules<P: AsRef<Path>>(project_path: P) -> NonNegotiableResult {
    ProjectValidator::default().validate_non_negotiable_rules(project_path)
}

pub fn fix_non_negotiable_rules<P: AsRef<Path>>(project_path: P) -> FixResult {
    ProjectValidator::default().fix_non_negotiable_rules(project_path)
}

pub fn clean_project<P: AsRef<Path>>(project_path: P, apply_fixes: bool) -> Result<CleanReport> {
    ProjectValidator::default().clean_project(project_path, apply_fixes)
}
