use crate::config::ValidatorConfig;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Visit every file under `root`, depth first, never descending into a
/// directory the config skips.
///
/// `visit` receives the path relative to `root` (always `/`-separated)
/// and the absolute path. A missing root visits nothing; entries that
/// cannot be read are dropped.
pub fn walk_files<F>(root: &Path, config: &ValidatorConfig, mut visit: F)
where
    F: FnMut(&str, &Path),
{
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|entry| !is_skipped(entry, config));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        // A root that is itself a file has nothing beneath it
        match relative_path(root, entry.path()) {
            Some(relative) if !relative.is_empty() => visit(&relative, entry.path()),
            _ => {}
        }
    }
}

fn is_skipped(entry: &DirEntry, config: &ValidatorConfig) -> bool {
    // The root is walked whatever it is called
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    entry
        .file_name()
        .to_str()
        .is_some_and(|name| config.is_skipped_directory(name))
}

pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();

    Some(parts.join("/"))
}
