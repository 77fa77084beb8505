//! High-level build management interface
//!
//! This module provides the [`BuildManager`] which serves as the primary interface
//! for all build operations. It loads `brisk.yml`, builds the task registry and
//! exposes listing, planning, running and graph inspection.
//!
//! ## Example
//!
//! ```rust,no_run
//! use brisk_core::build_manager::{BuildManager, BuildManagerConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> brisk_core::types::BriskResult<()> {
//! let manager = BuildManager::new(BuildManagerConfig {
//!     root: PathBuf::from("."),
//!     config_path: None,
//! })?;
//!
//! // Show what would run
//! let plan = manager.get_execution_plan("elm-bundle")?;
//!
//! // Run it
//! manager.run_task("elm-bundle").await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use crate::configs::build::{load_build_config, BuildConfig, BUILD_CONFIG_FILE};
use crate::execution::plan::ExecutionPlan;
use crate::execution::runner::{TaskRunner, TaskRunnerConfig};
use crate::graph::build_dependency_graph;
use crate::pipeline::{build_registry, BUILT_IN_TASKS};
use crate::registry::TaskRegistry;
use crate::results::{DependencyGraphResult, RunReport, TaskInfo, TaskListResult};
use crate::tasks::get_task_color;
use crate::types::BriskResult;

/// Configuration for initializing a build manager
#[derive(Debug, Clone)]
pub struct BuildManagerConfig {
    /// Directory that sources, outputs and commands are resolved against
    pub root: PathBuf,
    /// Build file; defaults to `<root>/brisk.yml`
    pub config_path: Option<PathBuf>,
}

/// High-level build manager that owns the configuration and the task registry
pub struct BuildManager {
    pub root: PathBuf,
    pub build_config: BuildConfig,
    registry: TaskRegistry,
    runner_config: TaskRunnerConfig,
}

impl BuildManager {
    /// Load the build file and register every task
    pub fn new(config: BuildManagerConfig) -> BriskResult<Self> {
        let config_path = config
            .config_path
            .unwrap_or_else(|| config.root.join(BUILD_CONFIG_FILE));
        debug!(path = %config_path.display(), "loading build config");

        let build_config = load_build_config(&config_path)?;
        let registry = build_registry(&config.root, &build_config)?;

        Ok(Self::from_parts(config.root, build_config, registry))
    }

    /// Assemble a manager from an already built registry
    pub fn from_parts(root: PathBuf, build_config: BuildConfig, registry: TaskRegistry) -> Self {
        Self {
            root,
            build_config,
            registry,
            runner_config: TaskRunnerConfig::default(),
        }
    }

    pub fn with_runner_config(mut self, runner_config: TaskRunnerConfig) -> Self {
        self.runner_config = runner_config;
        self
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// List all registered tasks
    pub fn list_tasks(&self) -> TaskListResult {
        let tasks: Vec<TaskInfo> = self
            .registry
            .tasks()
            .into_iter()
            .map(|task| TaskInfo {
                name: task.name.clone(),
                description: task.description.clone(),
                dependencies: task.dependencies.clone(),
                built_in: BUILT_IN_TASKS.contains(&task.name.as_str()),
            })
            .collect();

        let task_colors: HashMap<String, colored::Color> = tasks
            .iter()
            .map(|t| (t.name.clone(), get_task_color(&t.name)))
            .collect();

        TaskListResult { tasks, task_colors }
    }

    /// Get the execution plan for a task without running anything
    pub fn get_execution_plan(&self, task_name: &str) -> BriskResult<ExecutionPlan> {
        self.runner().plan(task_name)
    }

    /// Run a task and its dependencies
    pub async fn run_task(&self, task_name: &str) -> BriskResult<RunReport> {
        self.runner().run(task_name).await
    }

    /// Get dependency graph information
    pub fn get_dependency_graph(&self) -> DependencyGraphResult {
        build_dependency_graph(&self.registry)
    }

    fn runner(&self) -> TaskRunner<'_> {
        TaskRunner::with_config(&self.registry, self.runner_config.clone())
    }
}
