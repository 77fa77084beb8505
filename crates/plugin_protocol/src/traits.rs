//! Capability traits implemented by build plugins.
//!
//! This module defines the two plugin roles a build pipeline is wired from:
//! - [`Compiler`] - One-time initialization plus a bundle transform (sources in, one artifact out)
//! - [`Minifier`] - A 1:1 transform that shrinks an artifact without changing its behavior

use std::path::PathBuf;

use async_trait::async_trait;

use crate::types::{Artifact, BundleOptions};

/// A compiler plugin that bundles many source files into a single artifact.
///
/// **Purpose**: Compilers own everything language specific. brisk only decides
/// *when* `init` and `bundle` run (as task actions); *how* they run is up to the plugin.
///
/// # Example
///
/// ```rust
/// # use brisk_plugin_protocol::{Artifact, BundleOptions, Compiler};
/// # use async_trait::async_trait;
/// # use std::path::PathBuf;
/// pub struct ConcatCompiler;
///
/// #[async_trait]
/// impl Compiler for ConcatCompiler {
///     fn name(&self) -> &str {
///         "concat"
///     }
///
///     async fn init(&self) -> anyhow::Result<()> {
///         Ok(())
///     }
///
///     async fn bundle(
///         &self,
///         sources: &[PathBuf],
///         output_name: &str,
///         _options: &BundleOptions,
///     ) -> anyhow::Result<Artifact> {
///         let mut contents = Vec::new();
///         for source in sources {
///             contents.extend(std::fs::read(source)?);
///         }
///         Ok(Artifact::new(output_name, contents))
///     }
/// }
/// ```
#[async_trait]
pub trait Compiler: Send + Sync {
    /// Short identifier used in logs and error messages, e.g. `"elm"`.
    fn name(&self) -> &str;

    /// Perform one-time project initialization.
    ///
    /// Called once per run, before any `bundle` call, by the task that wraps it.
    /// Implementations should be idempotent: running `init` against an already
    /// initialized project must succeed without changing anything.
    async fn init(&self) -> anyhow::Result<()>;

    /// Compile `sources` into a single artifact named `output_name`.
    ///
    /// # Arguments
    ///
    /// * `sources` - Absolute paths of the source files, in a stable order
    /// * `output_name` - File name of the produced artifact (e.g. `app.js`)
    /// * `options` - See [`BundleOptions`]
    ///
    /// # Errors
    ///
    /// Any compilation failure (syntax errors, missing modules, a missing compiler
    /// binary). The error message should carry the compiler's own diagnostics.
    async fn bundle(
        &self,
        sources: &[PathBuf],
        output_name: &str,
        options: &BundleOptions,
    ) -> anyhow::Result<Artifact>;
}

/// A minifier plugin: one artifact in, one smaller artifact out.
///
/// The output must behave identically to the input when executed. The output
/// name is chosen by the minifier (typically `<stem>-min.js`) so that the
/// unminified and the minified artifact can be written side by side.
pub trait Minifier: Send + Sync {
    /// Short identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Produce the minified equivalent of `artifact`.
    fn minify(&self, artifact: &Artifact) -> anyhow::Result<Artifact>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperMinifier;

    impl Minifier for UpperMinifier {
        fn name(&self) -> &str {
            "upper"
        }

        fn minify(&self, artifact: &Artifact) -> anyhow::Result<Artifact> {
            Ok(Artifact::new(
                format!("{}.min.js", artifact.stem()),
                artifact.text().trim().to_uppercase(),
            ))
        }
    }

    struct FixedCompiler;

    #[async_trait]
    impl Compiler for FixedCompiler {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn init(&self) -> anyhow::Result<()> {
            Ok(())
        }

        async fn bundle(
            &self,
            sources: &[PathBuf],
            output_name: &str,
            options: &BundleOptions,
        ) -> anyhow::Result<Artifact> {
            if sources.is_empty() {
                anyhow::bail!("nothing to compile");
            }
            Ok(Artifact::new(
                output_name,
                format!("sources={} debug={}", sources.len(), options.debug),
            ))
        }
    }

    #[test]
    fn test_minifier_trait_object() {
        let minifier: Box<dyn Minifier> = Box::new(UpperMinifier);
        let out = minifier
            .minify(&Artifact::new("app.js", "  var a  "))
            .unwrap();
        assert_eq!(out.name, "app.min.js");
        assert_eq!(out.text(), "VAR A");
    }

    #[tokio::test]
    async fn test_compiler_trait_object() {
        let compiler: Box<dyn Compiler> = Box::new(FixedCompiler);
        compiler.init().await.unwrap();

        let artifact = compiler
            .bundle(
                &[PathBuf::from("a.elm"), PathBuf::from("b.elm")],
                "app.js",
                &BundleOptions::debug(),
            )
            .await
            .unwrap();
        assert_eq!(artifact.name, "app.js");
        assert_eq!(artifact.text(), "sources=2 debug=true");

        let err = compiler
            .bundle(&[], "app.js", &BundleOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nothing to compile"));
    }
}
