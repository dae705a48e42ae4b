use crate::config::ValidatorConfig;
use crate::project::{detect_project_type, ProjectType};
use crate::report;
use crate::rules::{select_rules, FileFacts, NonNegotiableRule, PlacementRule, RuleSet, Severity};
use crate::walker::{relative_path, walk_files};
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Outcome of the placement rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// A violation whose rule knows how to repair it.
#[derive(Debug, Clone, Serialize)]
pub struct FixableIssue {
    pub path: PathBuf,
    pub rule: &'static NonNegotiableRule,
}

/// Outcome of the non-negotiable rules. Warnings never affect `is_valid`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonNegotiableResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub fixable: Vec<FixableIssue>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixResult {
    pub fixed: usize,
    pub failed: usize,
}

/// Both rule families evaluated against one project with one rule set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectReport {
    pub project_type: ProjectType,
    pub structure: ValidationResult,
    pub non_negotiable: NonNegotiableResult,
}

#[derive(Debug, Clone)]
pub struct CleanReport {
    /// Present only when fixes were requested
    pub fixes: Option<FixResult>,
    pub created_directories: Vec<String>,
    /// State of the project after cleaning
    pub report: ProjectReport,
}

pub struct ProjectValidator {
    config: ValidatorConfig,
}

impl ProjectValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn detect_project_type<P: AsRef<Path>>(&self, project_path: P) -> ProjectType {
        detect_project_type(project_path)
    }

    /// Rule set for a project, chosen once from its manifest.
    pub fn rules_for<P: AsRef<Path>>(&self, project_path: P) -> RuleSet {
        let rules = select_rules(self.detect_project_type(project_path));
        tracing::debug!(
            "Using {} rules ({} placement, {} non-negotiable)",
            rules.project_type,
            rules.placement.len(),
            rules.non_negotiable.len()
        );
        rules
    }

    pub fn validate<P: AsRef<Path>>(&self, project_path: P) -> ProjectReport {
        let project_path = project_path.as_ref();
        let rules = self.rules_for(project_path);

        ProjectReport {
            project_type: rules.project_type,
            structure: self.check_placement(project_path, &rules),
            non_negotiable: self.check_non_negotiable(project_path, &rules),
        }
    }

    pub fn validate_structure<P: AsRef<Path>>(&self, project_path: P) -> ValidationResult {
        let project_path = project_path.as_ref();
        let rules = self.rules_for(project_path);
        self.check_placement(project_path, &rules)
    }

    pub fn validate_non_negotiable_rules<P: AsRef<Path>>(&self, project_path: P) -> NonNegotiableResult {
        let project_path = project_path.as_ref();
        let rules = self.rules_for(project_path);
        self.check_non_negotiable(project_path, &rules)
    }

    /// Re-validates from disk, then applies every available fix.
    pub fn fix_non_negotiable_rules<P: AsRef<Path>>(&self, project_path: P) -> FixResult {
        let project_path = project_path.as_ref();
        let validation = self.validate_non_negotiable_rules(project_path);

        println!("{}", "🔧 Fixing non-negotiable rule violations...".blue());
        run_fixes(project_path, &validation.fixable)
    }

    /// Optionally fix, make sure the required scaffold exists, then report
    /// the resulting state. Failing to create a directory is the only error.
    pub fn clean_project<P: AsRef<Path>>(&self, project_path: P, apply_fixes: bool) -> Result<CleanReport> {
        let project_path = project_path.as_ref();
        println!("{}", "🧹 Cleaning project structure...".blue());

        let fixes = if apply_fixes {
            let fixes = self.fix_non_negotiable_rules(project_path);
            println!();
            println!(
                "{}",
                format!("Fixed {} issues, {} failed", fixes.fixed, fixes.failed).blue()
            );
            println!();
            Some(fixes)
        } else {
            None
        };

        println!("{}", "Suggested actions:".dimmed());
        for suggestion in report::CLEAN_SUGGESTIONS {
            println!("{}", format!("  • {}", suggestion).dimmed());
        }

        // The scaffold is the generated-project shape regardless of project type
        let mut created_directories = Vec::new();
        for dir in &self.config.required_directories {
            let dir_path = project_path.join(dir);
            if dir_path.exists() {
                continue;
            }

            std::fs::create_dir_all(&dir_path)
                .with_context(|| format!("Failed to create directory {}", dir_path.display()))?;
            println!("{}", format!("  ✅ Created directory: {}/", dir).green());
            created_directories.push(dir.clone());
        }

        if created_directories.is_empty() {
            println!("{}", "  All required directories already exist".dimmed());
        }

        println!("{}", "✨ Project structure cleaned!".green());

        let report = self.validate(project_path);
        println!();
        report::display_validation_results(&report.structure);
        report::display_non_negotiable_results(&report.non_negotiable);

        Ok(CleanReport {
            fixes,
            created_directories,
            report,
        })
    }

    fn check_placement(&self, project_path: &Path, rules: &RuleSet) -> ValidationResult {
        let mut errors = Vec::new();

        walk_files(project_path, &self.config, |relative, _| {
            errors.extend(placement_errors(relative, rules.placement));
        });

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    fn check_non_negotiable(&self, project_path: &Path, rules: &RuleSet) -> NonNegotiableResult {
        let read_content = rules.needs_content();
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut fixable = Vec::new();

        walk_files(project_path, &self.config, |relative, absolute| {
            let size = std::fs::metadata(absolute).map(|meta| meta.len()).unwrap_or(0);
            let content = if read_content && !self.config.is_binary(absolute) {
                read_text(absolute)
            } else {
                None
            };
            let facts = FileFacts {
                relative_path: relative,
                size,
                content: content.as_deref(),
            };

            for rule in rules.non_negotiable {
                if rule.is_compliant(&facts) {
                    continue;
                }

                let message = format!("{}: {}", relative, rule.description);
                match rule.severity {
                    Severity::Error => errors.push(message),
                    Severity::Warning => warnings.push(message),
                }

                if rule.is_fixable() {
                    fixable.push(FixableIssue {
                        path: absolute.to_path_buf(),
                        rule,
                    });
                }
            }
        });

        NonNegotiableResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            fixable,
        }
    }
}

impl Default for ProjectValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

/// One error line per matching rule whose allowed directories miss the file.
fn placement_errors(relative: &str, rules: &[PlacementRule]) -> Vec<String> {
    let (file_dir, file_name) = match relative.rsplit_once('/') {
        Some((dir, name)) => (dir, name),
        None => (".", relative),
    };

    rules
        .iter()
        .filter(|rule| rule.matches(file_name) && !rule.allows(file_dir))
        .map(|rule| format!("{}: {}", relative, rule.description))
        .collect()
}

/// Runs each issue's fix in order. A failing fix is counted and the batch
/// carries on.
fn run_fixes(project_path: &Path, issues: &[FixableIssue]) -> FixResult {
    let mut result = FixResult::default();

    for issue in issues {
        let Some(fix) = issue.rule.fix else {
            continue;
        };
        let shown = relative_path(project_path, &issue.path)
            .unwrap_or_else(|| issue.path.display().to_string());

        match fix(&issue.path) {
            Ok(true) => {
                result.fixed += 1;
                println!("{}", format!("  ✅ Fixed: {}", shown).green());
            }
            Ok(false) => {
                result.failed += 1;
                println!("{}", format!("  ❌ Failed to fix: {}", shown).red());
            }
            Err(err) => {
                result.failed += 1;
                tracing::warn!("Fixing '{}' in {} failed: {:#}", issue.rule.description, shown, err);
                println!("{}", format!("  ❌ Error fixing: {}", shown).red());
            }
        }
    }

    result
}

fn read_text(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(err) => {
            tracing::debug!("Treating {} as binary: {}", path.display(), err);
            None
        }
    }
}
