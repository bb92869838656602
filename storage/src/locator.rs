//! Finds the defaults file under a theme's template roots.

use mn_core::{FileLocator, LocateOutcome};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Searches an ordered list of template roots (child theme first, then
/// parent) for the defaults file.
///
/// Every root is walked recursively; a file matches when its path relative to
/// the root ends with the configured file name. More than one match is
/// reported as ambiguous rather than picking one.
#[derive(Debug, Clone, Default)]
pub struct TemplateLocator {
    roots: Vec<PathBuf>
}

impl TemplateLocator {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect()
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn discover(&self, file: &str) -> Vec<PathBuf> {
        let wanted = Path::new(file);
        let mut found = Vec::new();

        for root in &self.roots {
            if !root.is_dir() {
                tracing::debug!(root = %root.display(), "Skipping missing template root");
                continue;
            }

            for entry in WalkDir::new(root)
                .follow_links(false)
                .into_iter()
                .filter_map(Result::ok)
            {
                if !entry.file_type().is_file() {
                    continue;
                }
                let matches = entry
                    .path()
                    .strip_prefix(root)
                    .is_ok_and(|relative| relative.ends_with(wanted));
                if matches {
                    found.push(entry.into_path());
                }
            }
        }

        found.sort();
        found.dedup();
        found
    }
}

impl FileLocator for TemplateLocator {
    fn locate(&self, file: &str, search_path: Option<&Path>) -> LocateOutcome {
        if let Some(dir) = search_path {
            let candidate = dir.join(file);
            return if candidate.is_file() {
                LocateOutcome::Found(candidate)
            } else {
                LocateOutcome::NotFound
            };
        }

        let mut found = self.discover(file);
        match found.len() {
            0 => LocateOutcome::NotFound,
            1 => LocateOutcome::Found(found.remove(0)),
            _ => LocateOutcome::Ambiguous(found)
        }
    }
}
