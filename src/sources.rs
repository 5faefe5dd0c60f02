use crate::error::{Result, TextFinderError};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use log::warn;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Resolves an include selector against a root directory.
///
/// The core treats glob expansion as an injected collaborator; the
/// contract is a deterministic ordering for a fixed filesystem state and
/// an empty sequence (not an error) when nothing matches.
pub trait SourceEnumerator {
    fn resolve(&self, root: &Path, selector: &str) -> Result<Vec<PathBuf>>;
}

/// Glob-based enumerator: the selector is one or more comma-separated
/// include patterns (`target/*.log,reports/**/*.xml`), matched against
/// paths relative to the root. Results are sorted so ordering is stable
/// across calls.
#[derive(Debug, Default)]
pub struct GlobEnumerator;

impl GlobEnumerator {
    fn build_set(selector: &str) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for part in selector.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let glob = GlobBuilder::new(part)
                .literal_separator(true)
                .build()
                .map_err(|source| TextFinderError::InvalidSelector {
                    selector: selector.to_string(),
                    source,
                })?;
            builder.add(glob);
        }
        builder
            .build()
            .map_err(|source| TextFinderError::InvalidSelector {
                selector: selector.to_string(),
                source,
            })
    }
}

impl SourceEnumerator for GlobEnumerator {
    fn resolve(&self, root: &Path, selector: &str) -> Result<Vec<PathBuf>> {
        let set = Self::build_set(selector)?;
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {e}", root.display());
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or_else(|_| entry.path());
            if set.is_match(relative) {
                files.push(entry.path().to_path_buf());
            }
        }
        files.sort();
        Ok(files)
    }
}
