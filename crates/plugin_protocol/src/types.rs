//! Core types exchanged between brisk and its build plugins.
//!
//! - [`Artifact`] - A named build output flowing from one transform to the next
//! - [`BundleOptions`] - Options recognized by a compiler's bundle transform

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single build output produced by a plugin.
///
/// Artifacts are the unit that flows through a build pipeline: a compiler turns
/// a set of source files into one artifact, a minifier turns one artifact into
/// another, and the filesystem sink writes artifacts into a destination directory.
///
/// `name` is a bare file name (for example `app.js`), never a path. The sink
/// joins it onto the destination directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    /// File name of the artifact, e.g. `app.js` or `app-min.js`.
    pub name: String,

    /// Raw contents of the artifact.
    pub contents: Vec<u8>,
}

impl Artifact {
    #[must_use]
    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// The artifact name without its final extension.
    ///
    /// ```rust
    /// # use brisk_plugin_protocol::Artifact;
    /// assert_eq!(Artifact::new("app.js", "").stem(), "app");
    /// assert_eq!(Artifact::new("README", "").stem(), "README");
    /// ```
    #[must_use]
    pub fn stem(&self) -> &str {
        Path::new(&self.name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.name)
    }

    /// Contents interpreted as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Options accepted by [`Compiler::bundle`](crate::Compiler::bundle).
///
/// `debug` asks the compiler for verbose/debug compilation output. For the Elm
/// compiler this enables the time-travelling debugger in the generated bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleOptions {
    #[serde(default)]
    pub debug: bool,
}

impl BundleOptions {
    #[must_use]
    pub const fn debug() -> Self {
        Self { debug: true }
    }
}
