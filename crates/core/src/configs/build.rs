use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::configs::tasks::TaskConfig;
use crate::types::{BriskError, BriskResult};

/// Default file name of the build configuration
pub const BUILD_CONFIG_FILE: &str = "brisk.yml";

/// Top-level `brisk.yml`
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub public: PublicConfig,
    #[serde(default)]
    pub elm: ElmConfig,
    #[serde(default)]
    pub minify: MinifyConfig,
    pub tasks: Option<Vec<TaskConfig>>,
}

/// One glob or a list of globs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Patterns {
    Single(String),
    Multiple(Vec<String>),
}

impl Patterns {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Patterns::Single(pattern) => vec![pattern.clone()],
            Patterns::Multiple(patterns) => patterns.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SourceConfig {
    /// Elm entry points, as globs relative to the build root
    pub elm: Patterns,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OutputConfig {
    /// Base name of the bundled application; `app` produces `app.js`
    pub elm_application_name: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PublicConfig {
    /// Destination directory for built JavaScript, relative to the build root
    pub js: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ElmConfig {
    /// Compiler executable
    pub binary: String,
    /// Build the bundle with the debugger enabled
    pub debug: bool,
    /// Arguments used to initialize a project that has no `elm.json` yet
    pub init_args: Vec<String>,
}

impl Default for ElmConfig {
    fn default() -> Self {
        Self {
            binary: "elm".to_string(),
            debug: true,
            init_args: vec!["init".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct MinifyConfig {
    /// Appended to the bundle stem to name the minified copy
    pub suffix: String,
    /// Also write the unminified bundle next to the minified one
    pub keep_source: bool,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            suffix: "-min.js".to_string(),
            keep_source: true,
        }
    }
}

impl BuildConfig {
    /// File name of the bundle produced by `elm-bundle`
    pub fn bundle_file_name(&self) -> String {
        format!("{}.js", self.output.elm_application_name)
    }

    fn validate(&self) -> BriskResult<()> {
        let name = self.output.elm_application_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(BriskError::Config(format!(
                "output.elmApplicationName must be a plain file name, got '{}'",
                self.output.elm_application_name
            )));
        }
        if self.source.elm.to_vec().is_empty() {
            return Err(BriskError::Config(
                "source.elm must list at least one pattern".to_string(),
            ));
        }
        if self.elm.binary.trim().is_empty() {
            return Err(BriskError::Config("elm.binary must not be empty".to_string()));
        }

        let suffix = &self.minify.suffix;
        if suffix.is_empty() || suffix.contains(['/', '\\']) {
            return Err(BriskError::Config(format!(
                "minify.suffix must be a non-empty file name suffix, got '{}'",
                suffix
            )));
        }
        // The minified copy must not replace the bundle
        if format!("{}{}", self.output.elm_application_name, suffix) == self.bundle_file_name() {
            return Err(BriskError::Config(format!(
                "minify.suffix '{}' names the minified copy like the bundle",
                suffix
            )));
        }

        for task in self.tasks.iter().flatten() {
            task.validate().map_err(BriskError::Config)?;
        }
        Ok(())
    }
}

pub fn parse_build_config(yaml_str: &str) -> BriskResult<BuildConfig> {
    let config: BuildConfig = serde_yaml::from_str(yaml_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_build_config(path: &Path) -> BriskResult<BuildConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BriskError::Config(format!(
            "Failed to read build config {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_build_config(&content).map_err(|e| {
        BriskError::Config(format!(
            "Failed to parse build config {}: {}",
            path.display(),
            e
        ))
    })
}

/// JSON schema of `brisk.yml`
pub fn build_config_schema() -> serde_json::Value {
    serde_json::to_value(schemars::schema_for!(BuildConfig)).unwrap_or_default()
}
