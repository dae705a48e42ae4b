use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Manifest name the scaffolding tool publishes itself under.
pub const TOOL_PACKAGE_NAME: &str = "tausi";
/// Multi-process runner every generated project uses for `npm run dev`.
pub const DEV_RUNNER: &str = "concurrently";
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    CliTool,
    GeneratedProject,
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectType::CliTool => write!(f, "cli-tool"),
            ProjectType::GeneratedProject => write!(f, "generated-project"),
        }
    }
}

impl std::str::FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cli-tool" => Ok(ProjectType::CliTool),
            "generated-project" => Ok(ProjectType::GeneratedProject),
            _ => Err(format!(
                "Invalid project type: {}. Valid options are: cli-tool, generated-project",
                s
            )),
        }
    }
}

/// Classify a directory by its root `package.json`.
///
/// A missing or malformed manifest is not an error; it falls through to
/// `GeneratedProject` like any unrecognised one.
pub fn detect_project_type<P: AsRef<Path>>(project_path: P) -> ProjectType {
    let manifest_path = project_path.as_ref().join(MANIFEST_FILE);

    let manifest = match std::fs::read_to_string(&manifest_path) {
        Ok(content) => serde_json::from_str::<Value>(&content).ok(),
        Err(_) => None,
    };

    let project_type = match manifest {
        Some(manifest) => classify_manifest(&manifest),
        None => {
            tracing::debug!("No readable manifest at {}", manifest_path.display());
            ProjectType::GeneratedProject
        }
    };

    tracing::debug!(
        "Detected project type {} for {}",
        project_type,
        project_path.as_ref().display()
    );
    project_type
}

fn classify_manifest(manifest: &Value) -> ProjectType {
    // Tool identity wins over the dev-script heuristic
    let is_tool = manifest.get("name").and_then(Value::as_str) == Some(TOOL_PACKAGE_NAME)
        && manifest.get("bin").is_some_and(is_truthy);
    if is_tool {
        return ProjectType::CliTool;
    }

    let dev_script = manifest
        .get("scripts")
        .and_then(|scripts| scripts.get("dev"))
        .and_then(Value::as_str);
    if dev_script.is_some_and(|script| script.contains(DEV_RUNNER)) {
        return ProjectType::GeneratedProject;
    }

    ProjectType::GeneratedProject
}

/// JavaScript truthiness, which is what decides whether `bin` is declared.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_manifest(dir: &Path, body: &str) {
        fs::write(dir.join(MANIFEST_FILE), body).unwrap();
    }

    #[test]
    fn test_tool_manifest_is_cli_tool() {
        let temp = tempdir().unwrap();
        write_manifest(
            temp.path(),
            r#"{ "name": "tausi", "bin": { "tausi": "./src/cli.ts" } }"#,
        );

        assert_eq!(detect_project_type(temp.path()), ProjectType::CliTool);
    }

    #[test]
    fn test_tool_name_without_bin_is_not_cli_tool() {
        let temp = tempdir().unwrap();
        write_manifest(temp.path(), r#"{ "name": "tausi", "bin": "" }"#);

        assert_eq!(detect_project_type(temp.path()), ProjectType::GeneratedProject);
    }

    #[test]
    fn test_tool_identity_beats_dev_script() {
        let temp = tempdir().unwrap();
        write_manifest(
            temp.path(),
            r#"{
                "name": "tausi",
                "bin": "./cli.js",
                "scripts": { "dev": "concurrently \"npm:dev:*\"" }
            }"#,
        );

        assert_eq!(detect_project_type(temp.path()), ProjectType::CliTool);
    }

    #[test]
    fn test_concurrently_dev_script_is_generated_project() {
        let temp = tempdir().unwrap();
        write_manifest(
            temp.path(),
            r#"{ "name": "my-app", "scripts": { "dev": "concurrently \"cd frontend && npm run dev\"" } }"#,
        );

        assert_eq!(detect_project_type(temp.path()), ProjectType::GeneratedProject);
    }

    #[test]
    fn test_missing_and_malformed_manifest_default() {
        let temp = tempdir().unwrap();
        assert_eq!(detect_project_type(temp.path()), ProjectType::GeneratedProject);

        write_manifest(temp.path(), "{ not json");
        assert_eq!(detect_project_type(temp.path()), ProjectType::GeneratedProject);

        assert_eq!(
            detect_project_type(temp.path().join("does-not-exist")),
            ProjectType::GeneratedProject
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(is_truthy(&serde_json::json!({})));
        assert!(is_truthy(&serde_json::json!("cli.js")));
        assert!(is_truthy(&serde_json::json!(1)));
        assert!(!is_truthy(&serde_json::json!(0)));
        assert!(!is_truthy(&serde_json::json!(false)));
        assert!(!is_truthy(&serde_json::json!(null)));
    }

    #[test]
    fn test_project_type_round_trips_through_str() {
        for project_type in [ProjectType::CliTool, ProjectType::GeneratedProject] {
            let parsed: ProjectType = project_type.to_string().parse().unwrap();
            assert_eq!(parsed, project_type);
        }
        assert!("library".parse::<ProjectType>().is_err());
    }
}
