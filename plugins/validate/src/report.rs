use crate::engine::{NonNegotiableResult, ProjectReport, ValidationResult};
use crate::rules::RuleSet;
use colored::*;
use tausi_core::{OutputFormat, OutputFormatter};

pub const STRUCTURE_HINT: &str = "Run \"tausi clean\" to fix common structure issues";

pub const CLEAN_SUGGESTIONS: &[&str] = &[
    "Move .md files to docs/ directory",
    "Move database files to backend/src/database/",
    "Move CSS files to frontend/src/styles/",
    "Move images to frontend/public/assets/",
    "Create missing required directories",
];

pub fn format_validation_results(results: &ValidationResult) -> String {
    let mut output = String::new();

    if results.is_valid {
        output.push_str(&format!("{}\n", "✅ Project structure is valid!".green()));
        return output;
    }

    output.push_str(&format!("{}\n\n", "❌ Project structure validation failed:".red()));
    for error in &results.errors {
        output.push_str(&format!("{}\n", format!("  • {}", error).red()));
    }
    output.push('\n');
    output.push_str(&format!("{}\n", format!("💡 {}", STRUCTURE_HINT).yellow()));

    output
}

pub fn format_non_negotiable_results(results: &NonNegotiableResult) -> String {
    let mut output = String::new();

    if results.is_valid && results.warnings.is_empty() {
        output.push_str(&format!("{}\n", "✅ All non-negotiable rules passed!".green()));
        return output;
    }

    if !results.errors.is_empty() {
        output.push_str(&format!("{}\n", "❌ Non-negotiable rule violations (ERRORS):".red()));
        for error in &results.errors {
            output.push_str(&format!("{}\n", format!("  • {}", error).red()));
        }
        output.push('\n');
    }

    if !results.warnings.is_empty() {
        output.push_str(&format!(
            "{}\n",
            "⚠️  Non-negotiable rule violations (WARNINGS):".yellow()
        ));
        for warning in &results.warnings {
            output.push_str(&format!("{}\n", format!("  • {}", warning).yellow()));
        }
        output.push('\n');
    }

    if !results.fixable.is_empty() {
        output.push_str(&format!(
            "{}\n",
            format!(
                "💡 {} issues can be auto-fixed. Run \"tausi clean --fix\" to apply fixes.",
                results.fixable.len()
            )
            .blue()
        ));
    }

    output
}

pub fn display_validation_results(results: &ValidationResult) {
    print!("{}", format_validation_results(results));
}

pub fn display_non_negotiable_results(results: &NonNegotiableResult) {
    print!("{}", format_non_negotiable_results(results));
}

/// Human listing of the tables a rule set applies.
pub fn format_rule_set(rules: &RuleSet) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {}\n\n",
        "Active rules for".bold().underline(),
        rules.project_type.to_string().cyan().bold()
    ));

    output.push_str(&format!("{}\n", "📁 Placement Rules:".cyan().bold()));
    for rule in rules.placement {
        output.push_str(&format!("   • {}\n", rule.patterns.join(" ").yellow()));
        output.push_str(&format!(
            "     Allowed in: {}\n",
            rule.allowed_directories.join(", ")
        ));
        output.push_str(&format!("     {}\n", rule.description.dimmed()));
    }
    output.push('\n');

    output.push_str(&format!("{}\n", "📏 Non-negotiable Rules:".cyan().bold()));
    for rule in rules.non_negotiable {
        let severity = match rule.severity {
            crate::rules::Severity::Error => "error".red(),
            crate::rules::Severity::Warning => "warning".yellow(),
        };
        let fixable = if rule.is_fixable() {
            format!(" {}", "(auto-fixable)".green())
        } else {
            String::new()
        };
        output.push_str(&format!("   • [{}] {}{}\n", severity, rule.description, fixable));
    }

    output
}

impl OutputFormatter for ProjectReport {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Human => format!(
                "{}{}",
                format_validation_results(&self.structure),
                format_non_negotiable_results(&self.non_negotiable)
            ),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
        }
    }
}
