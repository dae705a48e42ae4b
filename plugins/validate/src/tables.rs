use crate::rules::{Check, NonNegotiableRule, PlacementRule, Severity, ROOT_DIRECTORY};
use crate::validators;

const SCRIPT_FILES: &[&str] = &["*.js", "*.ts", "*.jsx", "*.tsx"];
const STYLE_FILES: &[&str] = &["*.css", "*.scss", "*.sass", "*.less"];
const IMAGE_FILES: &[&str] = &["*.png", "*.jpg", "*.jpeg", "*.gif", "*.svg", "*.ico"];
const HTML_FILES: &[&str] = &["*.html", "*.htm"];
const MANIFEST_FILES: &[&str] = &["*package.json"];

pub static CLI_TOOL_PLACEMENT: &[PlacementRule] = &[
    PlacementRule {
        patterns: &["*.md"],
        allowed_directories: &["docs", ROOT_DIRECTORY, "assets"],
        description: "Markdown files should be in docs/ directory, project root, or assets folder",
    },
    PlacementRule {
        patterns: SCRIPT_FILES,
        allowed_directories: &["src", "test", "gui", "scripts", "test-projects"],
        description: "JavaScript/TypeScript files should be in src/, test/, gui/, scripts/, or test-projects/ directories",
    },
    PlacementRule {
        patterns: STYLE_FILES,
        allowed_directories: &["gui", "test-projects"],
        description: "Style files should be in gui/ or test-projects/ directories",
    },
    PlacementRule {
        patterns: IMAGE_FILES,
        allowed_directories: &["assets", "gui", "test-projects"],
        description: "Image files should be in assets/, gui/, or test-projects/ directories",
    },
    PlacementRule {
        patterns: HTML_FILES,
        allowed_directories: &["gui", "test-projects"],
        description: "HTML files should be in gui/ or test-projects/ directories",
    },
    PlacementRule {
        patterns: MANIFEST_FILES,
        allowed_directories: &[ROOT_DIRECTORY, "test-projects"],
        description: "Package.json files should be in project root or test-projects directories",
    },
];

pub static GENERATED_PROJECT_PLACEMENT: &[PlacementRule] = &[
    PlacementRule {
        patterns: &["*.md"],
        allowed_directories: &["docs", ROOT_DIRECTORY, "frontend/public/assets", "backend/database"],
        description: "Markdown files should be in docs/ directory, project root, assets folder, or database folder",
    },
    PlacementRule {
        patterns: &["*.sql", "*.db", "*.sqlite"],
        allowed_directories: &["backend", "backend/src", "backend/src/database", "backend/database"],
        description: "Database files should be in backend directories",
    },
    PlacementRule {
        patterns: SCRIPT_FILES,
        allowed_directories: &["frontend/src", "backend/src", "frontend", "backend"],
        description: "JavaScript/TypeScript files should be in src directories",
    },
    PlacementRule {
        patterns: STYLE_FILES,
        allowed_directories: &["frontend/src/styles", "frontend/src", "frontend/public"],
        description: "Style files should be in frontend/src/styles",
    },
    PlacementRule {
        patterns: IMAGE_FILES,
        allowed_directories: &["frontend/public", "frontend/public/assets", "frontend/src/assets"],
        description: "Image files should be in frontend/public/assets",
    },
    PlacementRule {
        patterns: HTML_FILES,
        allowed_directories: &["frontend", "frontend/public"],
        description: "HTML files should be in frontend directory",
    },
    PlacementRule {
        patterns: MANIFEST_FILES,
        allowed_directories: &[ROOT_DIRECTORY, "frontend", "backend"],
        description: "Package.json files should be in project root or frontend/backend directories",
    },
];

// The CLI tool itself logs to the terminal on purpose, so its rules are lenient.
pub static CLI_TOOL_NON_NEGOTIABLE: &[NonNegotiableRule] = &[
    NonNegotiableRule {
        check: Check::Content(validators::no_console_log_outside_tooling),
        fix: Some(validators::strip_console_log),
        description: "No console.log statements in production code (except test/gui/dev files)",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Size(validators::under_200_kib),
        fix: None,
        description: "Files should not exceed 200KB",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::lines_within_200),
        fix: None,
        description: "Code lines should not exceed 200 characters",
        severity: Severity::Warning,
    },
];

pub static GENERATED_PROJECT_NON_NEGOTIABLE: &[NonNegotiableRule] = &[
    NonNegotiableRule {
        check: Check::Path(validators::directory_is_kebab_case),
        fix: None,
        description: "Directory names should use kebab-case",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::no_console_log_outside_tests),
        fix: Some(validators::strip_console_log),
        description: "No console.log statements in production code",
        severity: Severity::Error,
    },
    NonNegotiableRule {
        check: Check::Content(validators::no_marker_comments),
        fix: None,
        description: "No TODO, FIXME, XXX, or HACK comments allowed",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Size(validators::under_100_kib),
        fix: None,
        description: "Files should not exceed 100KB",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::imports_are_used),
        fix: None,
        description: "No unused imports allowed",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::lines_within_150),
        fix: None,
        description: "Code lines should not exceed 150 characters",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::nesting_within_six_levels),
        fix: None,
        description: "Avoid deep nesting (max 6 levels)",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::prefers_es_modules),
        fix: None,
        description: "Use ES6 imports for better bundling",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::quote_style_is_consistent),
        fix: Some(validators::unify_quote_style),
        description: "Consistent quote style throughout the project",
        severity: Severity::Warning,
    },
    // Declared for completeness; see validators::no_duplicate_filenames
    NonNegotiableRule {
        check: Check::Path(validators::no_duplicate_filenames),
        fix: None,
        description: "No duplicate filenames across the project",
        severity: Severity::Warning,
    },
    NonNegotiableRule {
        check: Check::Content(validators::relative_imports_within_two_levels),
        fix: None,
        description: "No excessive relative imports (max 2 levels up: ../..)",
        severity: Severity::Error,
    },
    NonNegotiableRule {
        check: Check::Content(validators::dynamic_imports_are_static),
        fix: None,
        description: "Dynamic imports must use static strings for bundle optimization",
        severity: Severity::Error,
    },
];
