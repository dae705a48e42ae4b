//! Per-file predicates and mechanical fixes behind the non-negotiable rules.
//!
//! The content checks are deliberately textual. They mirror what the
//! generated projects are expected to look like rather than parsing
//! JavaScript, so their false positives and negatives are part of the
//! contract.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static CONSOLE_LOG_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"console\.log\([^)]*\);?\n?").unwrap());
// Word characters and boundaries are ASCII-only, as in JavaScript regexes.
static MARKER_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?-u:\b)(TODO|FIXME|XXX|HACK)(?-u:\b)").unwrap());
static KEBAB_CASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9-]+$").unwrap());
static IMPORT_STATEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^import\s+.*?from\s+['"][^'"]+['"];?\s*$"#).unwrap());
static IMPORT_BINDING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"import\s+(?:\{([^}]+)\}|\*\s+as\s+((?-u:\w)+)|((?-u:\w)+))").unwrap());
static IMPORT_ALIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*as\s+(?-u:\w)+").unwrap());
static DEEP_RELATIVE_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import.*from\s+['"](\.\./){3,}"#).unwrap());
static INTERPOLATED_DYNAMIC_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"import\([^'"]*\$\{[^}]+\}[^'"]*\)"#).unwrap());

const SCRIPT_SUFFIXES: &[&str] = &[".js", ".ts", ".jsx", ".tsx"];
const TOOLING_PATH_MARKERS: &[&str] = &["test", "gui", "dev"];
const KIB: u64 = 1024;

/// True for paths ending in a JavaScript/TypeScript suffix.
pub fn is_script_path(relative_path: &str) -> bool {
    SCRIPT_SUFFIXES
        .iter()
        .any(|suffix| relative_path.ends_with(suffix))
}

/// Extension check that treats dot-files (`.js`) as extensionless.
fn has_extension(relative_path: &str, extensions: &[&str]) -> bool {
    Path::new(relative_path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.contains(&ext))
}

/// Line length as JavaScript would measure it (UTF-16 code units).
fn line_width(line: &str) -> usize {
    line.encode_utf16().count()
}

fn lines_within(content: &str, max_width: usize) -> bool {
    !content.split('\n').any(|line| line_width(line) > max_width)
}

// Path checks

pub fn directory_is_kebab_case(relative_path: &str) -> bool {
    let dir_name = match relative_path.rsplit_once('/') {
        Some((dir, _)) => dir.rsplit('/').next().unwrap_or(dir),
        None => ".",
    };

    if dir_name.chars().any(|c| c.is_ascii_uppercase()) && !["README", "LICENSE"].contains(&dir_name) {
        return KEBAB_CASE.is_match(dir_name);
    }
    true
}

/// Duplicate names can only be seen across files, and the engine evaluates
/// one file at a time, so this rule is declared but never fires.
pub fn no_duplicate_filenames(_relative_path: &str) -> bool {
    true
}

// Size checks

pub fn under_100_kib(_relative_path: &str, size: u64) -> bool {
    size < 100 * KIB
}

pub fn under_200_kib(_relative_path: &str, size: u64) -> bool {
    size < 200 * KIB
}

// Content checks

pub fn no_console_log_outside_tests(relative_path: &str, content: &str) -> bool {
    if relative_path.contains("test") {
        return true;
    }
    !content.contains("console.log")
}

pub fn no_console_log_outside_tooling(relative_path: &str, content: &str) -> bool {
    if TOOLING_PATH_MARKERS
        .iter()
        .any(|marker| relative_path.contains(marker))
    {
        return true;
    }
    !content.contains("console.log")
}

pub fn no_marker_comments(_relative_path: &str, content: &str) -> bool {
    !MARKER_COMMENT.is_match(content)
}

pub fn imports_are_used(relative_path: &str, content: &str) -> bool {
    if !is_script_path(relative_path) {
        return true;
    }

    !IMPORT_STATEMENT.find_iter(content).any(|statement| {
        let Some(binding) = IMPORT_BINDING.captures(statement.as_str()) else {
            return false;
        };
        let Some(imported) = binding
            .get(1)
            .or_else(|| binding.get(2))
            .or_else(|| binding.get(3))
            .map(|m| m.as_str())
        else {
            return false;
        };

        let names: Vec<&str> = if imported.contains(',') {
            imported.split(',').map(str::trim).collect()
        } else {
            vec![imported.trim()]
        };

        names.iter().any(|name| {
            let bare = IMPORT_ALIAS.replace(name, "");
            !content.contains(bare.trim())
        })
    })
}

pub fn lines_within_150(relative_path: &str, content: &str) -> bool {
    !is_script_path(relative_path) || lines_within(content, 150)
}

pub fn lines_within_200(relative_path: &str, content: &str) -> bool {
    !is_script_path(relative_path) || lines_within(content, 200)
}

pub fn nesting_within_six_levels(relative_path: &str, content: &str) -> bool {
    if !is_script_path(relative_path) {
        return true;
    }

    let deepest = content
        .split('\n')
        .filter_map(|line| line.chars().position(|c| !c.is_whitespace()))
        .filter(|indent| *indent > 0)
        .map(|indent| indent / 2)
        .max()
        .unwrap_or(0);

    deepest <= 6
}

pub fn prefers_es_modules(relative_path: &str, content: &str) -> bool {
    if !is_script_path(relative_path) {
        return true;
    }
    !content.contains("require(") || content.contains("import(")
}

pub fn quote_style_is_consistent(relative_path: &str, content: &str) -> bool {
    if !is_script_path(relative_path) {
        return true;
    }

    let single = content.matches('\'').count();
    let double = content.matches('"').count();
    if single == 0 && double == 0 {
        return true;
    }

    let imbalance = single.abs_diff(double) as f64 / single.max(double) as f64;
    imbalance < 0.3
}

pub fn relative_imports_within_two_levels(relative_path: &str, content: &str) -> bool {
    if !has_extension(relative_path, &["js", "ts"]) {
        return true;
    }
    !DEEP_RELATIVE_IMPORT.is_match(content)
}

pub fn dynamic_imports_are_static(relative_path: &str, content: &str) -> bool {
    if !has_extension(relative_path, &["js", "ts", "jsx", "tsx"]) {
        return true;
    }
    !INTERPOLATED_DYNAMIC_IMPORT.is_match(content)
}

// Fixes

fn rewrite(path: &Path, transform: impl FnOnce(&str) -> String) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let rewritten = transform(&content);

    if rewritten == content {
        return Ok(false);
    }

    fs::write(path, rewritten).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

pub fn strip_console_log(path: &Path) -> Result<bool> {
    rewrite(path, |content| {
        CONSOLE_LOG_CALL.replace_all(content, "").into_owned()
    })
}

/// Rewrites every minority quote into the majority quote; ties go to double quotes.
pub fn unify_quote_style(path: &Path) -> Result<bool> {
    rewrite(path, |content| {
        let single = content.matches('\'').count();
        let double = content.matches('"').count();

        if single > double {
            content.replace('"', "'")
        } else {
            content.replace('\'', "\"")
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_script_path_detection() {
        assert!(is_script_path("backend/src/server.js"));
        assert!(is_script_path("frontend/src/App.tsx"));
        assert!(!is_script_path("frontend/src/styles/main.css"));
        assert!(!is_script_path("docs/notes.json"));
    }

    #[test]
    fn test_kebab_case_only_inspects_parent_directory() {
        assert!(directory_is_kebab_case("server.js"));
        assert!(directory_is_kebab_case("frontend/src/components/App.js"));
        assert!(!directory_is_kebab_case("frontend/src/Components/app.js"));
        assert!(directory_is_kebab_case("Frontend/src/app.js"));
        assert!(directory_is_kebab_case("docs/README/intro.md"));
    }

    #[test]
    fn test_console_log_exclusions() {
        assert!(!no_console_log_outside_tests("backend/api.js", "console.log(\"x\")"));
        assert!(no_console_log_outside_tests("backend/test/api.js", "console.log(\"x\")"));
        // substring match, not a path segment
        assert!(no_console_log_outside_tests("backend/latest.js", "console.log(1)"));
        assert!(no_console_log_outside_tests("backend/api.js", "export default 1"));

        assert!(no_console_log_outside_tooling("gui/server.js", "console.log(1)"));
        assert!(no_console_log_outside_tooling("scripts/dev-server.js", "console.log(1)"));
        assert!(!no_console_log_outside_tooling("src/cli.ts", "console.log(1)"));
    }

    #[test]
    fn test_marker_comments() {
        assert!(!no_marker_comments("a.js", "// todo: later"));
        assert!(!no_marker_comments("docs/a.md", "FIXME"));
        assert!(no_marker_comments("a.js", "const todos = []"));
        assert!(no_marker_comments("a.js", "const hackathon = 1"));
        // accented letters are not word characters
        assert!(!no_marker_comments("a.js", "// TODOé"));
        assert!(!no_marker_comments("a.js", "// éFIXME"));
        assert!(no_marker_comments("a.js", "// TODO_later"));
    }

    #[test]
    fn test_size_limits() {
        assert!(under_100_kib("a.js", 100 * 1024 - 1));
        assert!(!under_100_kib("a.js", 100 * 1024));
        assert!(under_200_kib("a.js", 150 * 1024));
        assert!(!under_200_kib("a.js", 200 * 1024));
    }

    #[test]
    fn test_unused_import_heuristic_sees_its_own_statement() {
        // The import line itself always contains the bound name
        let content = "import express from 'express';\nimport { a, b as c } from './x';\n";
        assert!(imports_are_used("backend/src/server.js", content));
        assert!(imports_are_used("notes.md", content));
    }

    #[test]
    fn test_line_length_limits() {
        let long = "x".repeat(151);
        assert!(!lines_within_150("src/a.js", &long));
        assert!(lines_within_150("src/a.css", &long));
        assert!(lines_within_200("src/a.js", &long));
        assert!(!lines_within_200("src/a.js", &"x".repeat(201)));
    }

    #[test]
    fn test_nesting_depth() {
        let shallow = "function a() {\n            return 1;\n}\n";
        let deep = format!("function a() {{\n{}return 1;\n}}\n", " ".repeat(14));
        assert!(nesting_within_six_levels("src/a.js", shallow));
        assert!(!nesting_within_six_levels("src/a.js", &deep));
        assert!(nesting_within_six_levels("src/a.md", &deep));
    }

    #[test]
    fn test_es_module_preference() {
        assert!(!prefers_es_modules("a.js", "const x = require('x');"));
        assert!(prefers_es_modules("a.js", "const x = require('x'); import('y');"));
        assert!(prefers_es_modules("a.js", "import x from 'x';"));
    }

    #[test]
    fn test_quote_balance_rewards_mixed_counts() {
        assert!(quote_style_is_consistent("a.js", "no quotes here"));
        assert!(quote_style_is_consistent("a.js", "'a' \"b\""));
        assert!(!quote_style_is_consistent("a.js", "\"only\" \"double\""));
        assert!(quote_style_is_consistent("a.css", "\"only\""));
    }

    #[test]
    fn test_relative_import_depth() {
        assert!(!relative_imports_within_two_levels(
            "src/a.js",
            "import x from '../../../x';"
        ));
        assert!(relative_imports_within_two_levels("src/a.js", "import x from '../../x';"));
        assert!(relative_imports_within_two_levels(
            "src/a.jsx",
            "import x from '../../../x';"
        ));
    }

    #[test]
    fn test_dynamic_import_interpolation() {
        assert!(!dynamic_imports_are_static("src/a.js", "import(`./pages/${name}`)"));
        assert!(dynamic_imports_are_static("src/a.js", "import('./pages/home.js')"));
        assert!(dynamic_imports_are_static(".js", "import(`./pages/${name}`)"));
    }

    #[test]
    fn test_duplicate_rule_never_fires() {
        assert!(no_duplicate_filenames("frontend/src/utils/index.js"));
    }

    #[test]
    fn test_strip_console_log() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("api.js");
        fs::write(&file, "const a = 1;\nconsole.log(\"x\");\nexport default a;\n").unwrap();

        assert!(strip_console_log(&file).unwrap());
        let content = fs::read_to_string(&file).unwrap();
        assert_eq!(content, "const a = 1;\nexport default a;\n");

        assert!(!strip_console_log(&file).unwrap());
    }

    #[test]
    fn test_strip_console_log_missing_file() {
        let temp = tempdir().unwrap();
        assert!(strip_console_log(&temp.path().join("gone.js")).is_err());
    }

    #[test]
    fn test_unify_quote_style() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("a.js");
        fs::write(&file, "const a = 'x';\nconst b = 'y';\nconst c = \"z\";\n").unwrap();

        assert!(unify_quote_style(&file).unwrap());
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "const a = 'x';\nconst b = 'y';\nconst c = 'z';\n"
        );
        assert!(!unify_quote_style(&file).unwrap());
    }
}
