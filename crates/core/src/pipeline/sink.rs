use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use brisk_plugin_protocol::Artifact;
use tracing::debug;

use crate::types::ActionError;

/// Writes artifacts into a destination directory
#[derive(Debug, Clone)]
pub struct FilesystemSink {
    destination: PathBuf,
}

impl FilesystemSink {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Write every artifact, creating the destination when absent
    ///
    /// Existing files with the same name are replaced. Artifact names must be
    /// plain file names, unique within one call. Returns the written paths.
    pub async fn write(&self, artifacts: &[Artifact]) -> Result<Vec<PathBuf>, ActionError> {
        let mut names = HashSet::new();
        for artifact in artifacts {
            if !is_plain_file_name(&artifact.name) {
                return Err(ActionError::Failed(format!(
                    "Artifact name '{}' is not a plain file name",
                    artifact.name
                )));
            }
            if !names.insert(artifact.name.as_str()) {
                return Err(ActionError::Failed(format!(
                    "Two artifacts are named '{}'",
                    artifact.name
                )));
            }
        }

        tokio::fs::create_dir_all(&self.destination).await?;

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let path = self.destination.join(&artifact.name);
            tokio::fs::write(&path, &artifact.contents).await?;
            debug!(path = %path.display(), bytes = artifact.len(), "wrote artifact");
            written.push(path);
        }

        Ok(written)
    }
}

fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains('\\')
}
