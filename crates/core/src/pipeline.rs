//! The Elm build pipeline
//!
//! Wires a [`Compiler`] and a [`Minifier`] into two tasks:
//!
//! - `elm-init` runs the compiler's one-time initialization
//! - `elm-bundle` (after `elm-init`) globs the sources, bundles them into
//!   `<elmApplicationName>.js`, minifies the bundle and writes both files into
//!   the public JavaScript directory
//!
//! Tasks declared under `tasks:` in `brisk.yml` are registered alongside them.

pub mod elm;
pub mod minify;
pub mod sink;
pub mod sources;

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use brisk_plugin_protocol::{BundleOptions, Compiler, Minifier};
use tracing::info;

use crate::action::{Action, NoopAction};
use crate::configs::build::BuildConfig;
use crate::execution::command::CommandExecutor;
use crate::registry::{Task, TaskRegistry};
use crate::types::{ActionError, ActionResult, BriskError, BriskResult};

pub use elm::ElmCompiler;
pub use minify::JsMinifier;
pub use sink::FilesystemSink;
pub use sources::SourceSet;

pub const ELM_INIT: &str = "elm-init";
pub const ELM_BUNDLE: &str = "elm-bundle";

/// Names of the tasks the pipeline registers itself
pub const BUILT_IN_TASKS: &[&str] = &[ELM_INIT, ELM_BUNDLE];

fn plugin_error(plugin: &str, source: anyhow::Error) -> ActionError {
    ActionError::Plugin {
        plugin: plugin.to_string(),
        source,
    }
}

/// Action of `elm-init`
pub struct CompilerInitAction {
    compiler: Arc<dyn Compiler>,
}

impl CompilerInitAction {
    pub fn new(compiler: Arc<dyn Compiler>) -> Self {
        Self { compiler }
    }
}

#[async_trait]
impl Action for CompilerInitAction {
    async fn execute(&self) -> ActionResult {
        self.compiler
            .init()
            .await
            .map_err(|e| plugin_error(self.compiler.name(), e))
    }
}

/// Action of `elm-bundle`: sources -> bundle -> minify -> destination
pub struct BundleAction {
    pub sources: SourceSet,
    pub output_name: String,
    pub options: BundleOptions,
    pub compiler: Arc<dyn Compiler>,
    pub minifier: Arc<dyn Minifier>,
    /// Also write the unminified bundle
    pub keep_source: bool,
    pub sink: FilesystemSink,
}

#[async_trait]
impl Action for BundleAction {
    async fn execute(&self) -> ActionResult {
        let sources = self.sources.resolve().await?;
        info!(
            sources = sources.len(),
            output = %self.output_name,
            debug = self.options.debug,
            "bundling"
        );

        let bundle = self
            .compiler
            .bundle(&sources, &self.output_name, &self.options)
            .await
            .map_err(|e| plugin_error(self.compiler.name(), e))?;

        let minified = self
            .minifier
            .minify(&bundle)
            .map_err(|e| plugin_error(self.minifier.name(), e))?;

        let artifacts = if self.keep_source {
            vec![bundle, minified]
        } else {
            vec![minified]
        };

        self.sink.write(&artifacts).await?;
        Ok(())
    }
}

/// Build the registry for a project using the built-in Elm compiler and minifier
pub fn build_registry(root: &Path, config: &BuildConfig) -> BriskResult<TaskRegistry> {
    let compiler = Arc::new(ElmCompiler::new(root, &config.elm));
    let minifier = Arc::new(JsMinifier::new(config.minify.suffix.clone()));
    build_registry_with(root, config, compiler, minifier)
}

/// Build the registry with the given plugins
pub fn build_registry_with(
    root: &Path,
    config: &BuildConfig,
    compiler: Arc<dyn Compiler>,
    minifier: Arc<dyn Minifier>,
) -> BriskResult<TaskRegistry> {
    let mut registry = TaskRegistry::new();

    registry.register_task(Task {
        name: ELM_INIT.to_string(),
        description: Some(format!("Initialize the {} project", compiler.name())),
        dependencies: Vec::new(),
        action: Arc::new(CompilerInitAction::new(compiler.clone())),
    })?;

    let sources = SourceSet::new(root, config.source.elm.to_vec())
        .map_err(|e| BriskError::Config(format!("source.elm: {}", e)))?;
    let output_name = config.bundle_file_name();

    registry.register_task(Task {
        name: ELM_BUNDLE.to_string(),
        description: Some(format!(
            "Bundle {} into {}/{}",
            sources.patterns().join(", "),
            config.public.js,
            output_name
        )),
        dependencies: vec![ELM_INIT.to_string()],
        action: Arc::new(BundleAction {
            sources,
            output_name,
            options: BundleOptions {
                debug: config.elm.debug,
            },
            compiler,
            minifier,
            keep_source: config.minify.keep_source,
            sink: FilesystemSink::new(root.join(&config.public.js)),
        }),
    })?;

    for task_config in config.tasks.iter().flatten() {
        let action: Arc<dyn Action> = match CommandExecutor::from_task_config(root, task_config) {
            Some(executor) => Arc::new(executor),
            None => Arc::new(NoopAction),
        };

        registry.register_task(Task {
            name: task_config.name.clone(),
            description: task_config.description.clone(),
            dependencies: task_config.dependencies.clone().unwrap_or_default(),
            action,
        })?;
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::build::parse_build_config;
    use crate::execution::runner::{TaskRunner, TaskRunnerConfig};
    use brisk_plugin_protocol::Artifact;
    use std::path::PathBuf;
    use std::sync::Mutex;

    /// Records calls and concatenates source file names
    #[derive(Default)]
    struct FakeCompiler {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Compiler for FakeCompiler {
        fn name(&self) -> &str {
            "fake"
        }

        async fn init(&self) -> anyhow::Result<()> {
            self.calls.lock().unwrap().push("init".to_string());
            Ok(())
        }

        async fn bundle(
            &self,
            sources: &[PathBuf],
            output_name: &str,
            options: &BundleOptions,
        ) -> anyhow::Result<Artifact> {
            self.calls.lock().unwrap().push("bundle".to_string());
            let names: Vec<String> = sources
                .iter()
                .filter_map(|s| s.file_name())
                .map(|s| s.to_string_lossy().to_string())
                .collect();
            Ok(Artifact::new(
                output_name,
                format!("/* debug={} */\nvar  modules = '{}';\n", options.debug, names.join(",")),
            ))
        }
    }

    const CONFIG: &str = r#"
source:
  elm: src/*.elm
output:
  elmApplicationName: app
public:
  js: public/js
"#;

    fn quiet() -> TaskRunnerConfig {
        TaskRunnerConfig {
            print_progress: false,
        }
    }

    #[tokio::test]
    async fn test_elm_bundle_end_to_end() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/Main.elm"), "module Main exposing (main)\n").unwrap();

        let config = parse_build_config(CONFIG).unwrap();
        let compiler = Arc::new(FakeCompiler::default());
        let registry = build_registry_with(
            root,
            &config,
            compiler.clone(),
            Arc::new(JsMinifier::default()),
        )
        .unwrap();

        let report = TaskRunner::with_config(&registry, quiet())
            .run(ELM_BUNDLE)
            .await
            .unwrap();

        assert_eq!(report.executed_names(), vec![ELM_INIT, ELM_BUNDLE]);
        assert_eq!(*compiler.calls.lock().unwrap(), vec!["init", "bundle"]);

        let out_dir = root.join("public/js");
        let bundle = std::fs::read_to_string(out_dir.join("app.js")).unwrap();
        assert!(bundle.contains("var  modules = 'Main.elm';"));
        let minified = std::fs::read_to_string(out_dir.join("app-min.js")).unwrap();
        assert_eq!(minified, "var modules='Main.elm';");
    }

    #[tokio::test]
    async fn test_minified_only_when_source_not_kept() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("src/Main.elm"), "").unwrap();

        let yaml = format!("{}minify:\n  keepSource: false\n", CONFIG);
        let config = parse_build_config(&yaml).unwrap();
        let registry = build_registry_with(
            root,
            &config,
            Arc::new(FakeCompiler::default()),
            Arc::new(JsMinifier::default()),
        )
        .unwrap();

        TaskRunner::with_config(&registry, quiet())
            .run(ELM_BUNDLE)
            .await
            .unwrap();

        assert!(!root.join("public/js/app.js").exists());
        assert!(root.join("public/js/app-min.js").exists());
    }

    #[tokio::test]
    async fn test_missing_sources_fail_bundle_after_init() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();

        let config = parse_build_config(CONFIG).unwrap();
        let compiler = Arc::new(FakeCompiler::default());
        let registry = build_registry_with(
            root,
            &config,
            compiler.clone(),
            Arc::new(JsMinifier::default()),
        )
        .unwrap();

        let err = TaskRunner::with_config(&registry, quiet())
            .run(ELM_BUNDLE)
            .await
            .unwrap_err();

        assert_eq!(err.failed_task(), Some(ELM_BUNDLE));
        assert!(matches!(
            err,
            BriskError::Action {
                source: ActionError::NoSources(_),
                ..
            }
        ));
        assert_eq!(*compiler.calls.lock().unwrap(), vec!["init"]);
        assert!(!root.join("public/js").exists());
    }

    #[test]
    fn test_configured_tasks_are_registered() {
        let yaml = format!(
            "{}tasks:\n  - name: format\n    command: elm-format --validate src\n    dependencies: [elm-init]\n  - name: all\n    dependencies: [elm-bundle, format]\n",
            CONFIG
        );
        let config = parse_build_config(&yaml).unwrap();
        let registry = build_registry(Path::new("/project"), &config).unwrap();

        assert_eq!(registry.len(), 4);
        assert!(registry.validate().is_ok());
        assert_eq!(
            registry.get("all").unwrap().dependencies,
            vec![ELM_BUNDLE.to_string(), "format".to_string()]
        );
    }

    #[test]
    fn test_configured_task_cannot_shadow_built_in() {
        let yaml = format!("{}tasks:\n  - name: elm-init\n    command: echo hi\n", CONFIG);
        let config = parse_build_config(&yaml).unwrap();
        let err = build_registry(Path::new("/project"), &config).unwrap_err();
        assert!(matches!(err, BriskError::DuplicateTask(ref name) if name == ELM_INIT));
    }
}
