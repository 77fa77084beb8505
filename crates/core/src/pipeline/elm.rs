//! Elm compiler plugin
//!
//! Drives the `elm` executable: `init` prepares a project that has no
//! `elm.json` yet, `bundle` runs `elm make` over all entry points into a single
//! JavaScript file and reads it back as an [`Artifact`].

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{bail, Context};
use async_trait::async_trait;
use brisk_plugin_protocol::{Artifact, BundleOptions, Compiler};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info};

use crate::configs::build::ElmConfig;

/// Marker file of an initialized Elm project
const ELM_PROJECT_FILE: &str = "elm.json";

pub struct ElmCompiler {
    root: PathBuf,
    binary: String,
    init_args: Vec<String>,
}

impl ElmCompiler {
    pub fn new(root: impl Into<PathBuf>, config: &ElmConfig) -> Self {
        Self {
            root: root.into(),
            binary: config.binary.clone(),
            init_args: config.init_args.clone(),
        }
    }

    fn describe(&self, args: &[String]) -> String {
        std::iter::once(self.binary.clone())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn failure_output(stdout: &[u8], stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}

#[async_trait]
impl Compiler for ElmCompiler {
    fn name(&self) -> &str {
        "elm"
    }

    async fn init(&self) -> anyhow::Result<()> {
        if self.root.join(ELM_PROJECT_FILE).exists() {
            debug!(root = %self.root.display(), "elm project already initialized");
            return Ok(());
        }

        let description = self.describe(&self.init_args);
        info!(command = %description, "initializing elm project");

        let mut child = Command::new(&self.binary)
            .args(&self.init_args)
            .current_dir(&self.root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to run `{}`", description))?;

        // `elm init` asks for confirmation before writing elm.json
        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(b"y\n").await {
                debug!(error = %e, "init command closed stdin early");
            }
        }

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("failed to wait for `{}`", description))?;

        if !output.status.success() {
            bail!(
                "`{}` exited with code {}: {}",
                description,
                output.status.code().unwrap_or(-1),
                failure_output(&output.stdout, &output.stderr)
            );
        }

        Ok(())
    }

    async fn bundle(
        &self,
        sources: &[PathBuf],
        output_name: &str,
        options: &BundleOptions,
    ) -> anyhow::Result<Artifact> {
        let out_dir = tempfile::tempdir().context("failed to create a temporary output directory")?;
        let out_path = out_dir.path().join(output_name);

        let mut args = vec!["make".to_string()];
        args.extend(sources.iter().map(|s| s.display().to_string()));
        args.push(format!("--output={}", out_path.display()));
        if options.debug {
            args.push("--debug".to_string());
        }

        let description = self.describe(&args);
        debug!(command = %description, "bundling elm sources");

        let output = Command::new(&self.binary)
            .args(&args)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("failed to run `{}`", self.binary))?;

        if !output.status.success() {
            bail!(
                "elm make failed with code {}:\n{}",
                output.status.code().unwrap_or(-1),
                failure_output(&output.stdout, &output.stderr)
            );
        }

        let contents = tokio::fs::read(&out_path)
            .await
            .with_context(|| format!("elm make did not produce {}", out_path.display()))?;

        Ok(Artifact::new(output_name, contents))
    }
}
