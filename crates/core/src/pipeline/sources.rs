use std::collections::{BTreeSet, VecDeque};
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;

use crate::types::ActionError;

/// Directories never searched for sources
const SKIPPED_DIRS: &[&str] = &[".git", "elm-stuff", "node_modules"];

/// A set of source globs rooted at the build root
#[derive(Debug, Clone)]
pub struct SourceSet {
    root: PathBuf,
    patterns: Vec<String>,
    matcher: GlobSet,
}

impl SourceSet {
    /// Compile the glob patterns; `*` does not cross directory separators
    pub fn new(root: impl Into<PathBuf>, patterns: Vec<String>) -> Result<Self, ActionError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let normalized = pattern.strip_prefix("./").unwrap_or(pattern);
            let glob = GlobBuilder::new(normalized)
                .literal_separator(true)
                .build()
                .map_err(|source| ActionError::Glob {
                    pattern: pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let matcher = builder.build().map_err(|source| ActionError::Glob {
            pattern: patterns.join(", "),
            source,
        })?;

        Ok(Self {
            root: root.into(),
            patterns,
            matcher,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Walk the root and return every matching file, sorted
    ///
    /// Symlinked directories are not descended into.
    pub async fn resolve(&self) -> Result<Vec<PathBuf>, ActionError> {
        let mut matches = BTreeSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(self.root.clone());

        while let Some(current_dir) = queue.pop_front() {
            let mut entries = tokio::fs::read_dir(&current_dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();

                if entry.file_type().await?.is_dir() {
                    let skipped = path
                        .file_name()
                        .and_then(|name| name.to_str())
                        .is_some_and(|name| SKIPPED_DIRS.contains(&name));
                    if !skipped {
                        queue.push_back(path);
                    }
                    continue;
                }

                let relative_path = path.strip_prefix(&self.root).unwrap_or(&path);
                if self.matcher.is_match(relative_path) {
                    matches.insert(path);
                }
            }
        }

        if matches.is_empty() {
            return Err(ActionError::NoSources(self.patterns.join(", ")));
        }

        debug!(count = matches.len(), patterns = ?self.patterns, "resolved sources");
        Ok(matches.into_iter().collect())
    }
}
