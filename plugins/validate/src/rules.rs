use crate::project::ProjectType;
use crate::tables;
use glob::Pattern;
use once_cell::sync::Lazy;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Allowed-directory entry that stands for the project root itself.
pub const ROOT_DIRECTORY: &str = "root";

/// Every glob the built-in placement tables use, compiled once.
static TABLE_GLOBS: Lazy<HashMap<&'static str, Pattern>> = Lazy::new(|| {
    tables::CLI_TOOL_PLACEMENT
        .iter()
        .chain(tables::GENERATED_PROJECT_PLACEMENT)
        .flat_map(|rule| rule.patterns.iter().copied())
        .filter_map(|pattern| compile_glob(pattern).map(|glob| (pattern, glob)))
        .collect()
});

fn compile_glob(pattern: &str) -> Option<Pattern> {
    match Pattern::new(pattern) {
        Ok(glob) => Some(glob),
        Err(err) => {
            tracing::warn!("Ignoring invalid placement glob {:?}: {}", pattern, err);
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Maps a family of file names to the directories they may live in.
#[derive(Debug)]
pub struct PlacementRule {
    /// Globs matched against the file's basename
    pub patterns: &'static [&'static str],
    pub allowed_directories: &'static [&'static str],
    pub description: &'static str,
}

impl PlacementRule {
    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns.iter().any(|pattern| match TABLE_GLOBS.get(*pattern) {
            Some(glob) => glob.matches(file_name),
            None => compile_glob(pattern).is_some_and(|glob| glob.matches(file_name)),
        })
    }

    /// `file_dir` is the containing directory relative to the project root, `.` for the root.
    pub fn allows(&self, file_dir: &str) -> bool {
        self.allowed_directories.iter().any(|allowed| {
            if *allowed == ROOT_DIRECTORY {
                return file_dir == ".";
            }

            file_dir == *allowed
                || file_dir
                    .strip_prefix(allowed)
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// What a non-negotiable rule needs to know about a file.
#[derive(Debug, Clone, Copy)]
pub struct FileFacts<'a> {
    pub relative_path: &'a str,
    pub size: u64,
    /// Absent for binary files and for rule sets that never look at content
    pub content: Option<&'a str>,
}

#[derive(Debug, Clone, Copy)]
pub enum Check {
    Path(fn(&str) -> bool),
    Size(fn(&str, u64) -> bool),
    /// Compliant whenever the file content is absent
    Content(fn(&str, &str) -> bool),
}

impl Check {
    pub fn needs_content(&self) -> bool {
        matches!(self, Check::Content(_))
    }

    pub fn evaluate(&self, file: &FileFacts<'_>) -> bool {
        match self {
            Check::Path(check) => check(file.relative_path),
            Check::Size(check) => check(file.relative_path, file.size),
            Check::Content(check) => file
                .content
                .map_or(true, |content| check(file.relative_path, content)),
        }
    }
}

/// Rewrites a file in place; `Ok(true)` when the file changed.
pub type FixFn = fn(&Path) -> anyhow::Result<bool>;

#[derive(Debug)]
pub struct NonNegotiableRule {
    pub check: Check,
    pub fix: Option<FixFn>,
    pub description: &'static str,
    pub severity: Severity,
}

impl NonNegotiableRule {
    pub fn is_compliant(&self, file: &FileFacts<'_>) -> bool {
        self.check.evaluate(file)
    }

    pub fn is_fixable(&self) -> bool {
        self.fix.is_some()
    }
}

impl Serialize for NonNegotiableRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("NonNegotiableRule", 3)?;
        state.serialize_field("description", self.description)?;
        state.serialize_field("severity", &self.severity)?;
        state.serialize_field("fixable", &self.is_fixable())?;
        state.end()
    }
}

/// The placement and non-negotiable tables active for one validation run.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub project_type: ProjectType,
    pub placement: &'static [PlacementRule],
    pub non_negotiable: &'static [NonNegotiableRule],
}

impl RuleSet {
    pub fn needs_content(&self) -> bool {
        self.non_negotiable
            .iter()
            .any(|rule| rule.check.needs_content())
    }
}

pub fn select_rules(project_type: ProjectType) -> RuleSet {
    match project_type {
        ProjectType::CliTool => RuleSet {
            project_type,
            placement: tables::CLI_TOOL_PLACEMENT,
            non_negotiable: tables::CLI_TOOL_NON_NEGOTIABLE,
        },
        ProjectType::GeneratedProject => RuleSet {
            project_type,
            placement: tables::GENERATED_PROJECT_PLACEMENT,
            non_negotiable: tables::GENERATED_PROJECT_NON_NEGOTIABLE,
        },
    }
}
