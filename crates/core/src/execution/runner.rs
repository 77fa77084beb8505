//! High-level task runner
//!
//! Resolves the full execution order before the first action starts, so graph
//! errors (unknown tasks, unknown dependencies, cycles) never leave a run
//! half-executed. Actions then run one at a time, each awaited to completion
//! before its dependents begin.

use std::time::Instant;

use colored::*;
use tracing::{debug, info};

use crate::execution::plan::{resolve_execution_order, ExecutionPlan};
use crate::registry::{Task, TaskRegistry};
use crate::results::{RunReport, TaskOutcome};
use crate::tasks::get_task_color;
use crate::types::{BriskError, BriskResult};

/// Configuration for the task runner
#[derive(Debug, Clone)]
pub struct TaskRunnerConfig {
    /// Print a header and completion line for every task
    pub print_progress: bool,
}

impl Default for TaskRunnerConfig {
    fn default() -> Self {
        Self {
            print_progress: true,
        }
    }
}

/// Runs tasks from a registry with dependency resolution
pub struct TaskRunner<'a> {
    registry: &'a TaskRegistry,
    config: TaskRunnerConfig,
}

impl<'a> TaskRunner<'a> {
    pub fn new(registry: &'a TaskRegistry) -> Self {
        Self::with_config(registry, TaskRunnerConfig::default())
    }

    pub fn with_config(registry: &'a TaskRegistry, config: TaskRunnerConfig) -> Self {
        Self { registry, config }
    }

    /// Resolve what `run` would execute without executing anything
    pub fn plan(&self, task_name: &str) -> BriskResult<ExecutionPlan> {
        resolve_execution_order(self.registry, task_name)
    }

    /// Run a task after all of its transitive dependencies, each exactly once
    pub async fn run(&self, task_name: &str) -> BriskResult<RunReport> {
        let plan = self.plan(task_name)?;
        info!(task = %plan.root, order = ?plan.order, "resolved execution order");

        let started = Instant::now();
        let mut executed = Vec::with_capacity(plan.order.len());

        // The plan already lists every task once
        for name in &plan.order {
            let task = self
                .registry
                .get(name)
                .ok_or_else(|| BriskError::UnknownTask(name.clone()))?;

            executed.push(self.run_single(task).await?);
        }

        Ok(RunReport {
            root: plan.root,
            executed,
            duration: started.elapsed(),
        })
    }

    /// Execute one task's action
    async fn run_single(&self, task: &Task) -> BriskResult<TaskOutcome> {
        let task_color = get_task_color(&task.name);

        if self.config.print_progress {
            println!();
            println!(
                "┌─ {}",
                format!("Running task '{}'", task.name)
                    .color(task_color)
                    .bold()
            );
            if let Some(description) = &task.description {
                println!("│  {}", description.bright_black());
            }
        }

        debug!(task = %task.name, "starting action");
        let started = Instant::now();

        if let Err(source) = task.action.execute().await {
            if self.config.print_progress {
                println!("└─ {} {}", "✗".red().bold(), "Failed".red());
            }
            return Err(BriskError::Action {
                task: task.name.clone(),
                source,
            });
        }

        let duration = started.elapsed();
        debug!(task = %task.name, elapsed_ms = duration.as_millis() as u64, "finished action");

        if self.config.print_progress {
            println!(
                "└─ {} {}",
                "✓".green().bold(),
                format!("Completed in {:.2?}", duration).bright_black()
            );
        }

        Ok(TaskOutcome {
            name: task.name.clone(),
            duration,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{from_fn, NoopAction};
    use crate::types::ActionError;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn quiet() -> TaskRunnerConfig {
        TaskRunnerConfig {
            print_progress: false,
        }
    }

    fn recorder(
        log: &Log,
        entry: &'static str,
    ) -> impl crate::action::Action + 'static {
        let log = log.clone();
        from_fn(move || {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(entry.to_string());
                Ok(())
            }
        })
    }

    fn entries(log: &Log) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_elm_bundle_runs_after_elm_init() {
        let log = Log::default();
        let mut registry = TaskRegistry::new();
        registry
            .register("elm-init", &[], recorder(&log, "initialized"))
            .unwrap();
        registry
            .register("elm-bundle", &["elm-init"], recorder(&log, "bundled"))
            .unwrap();

        let report = TaskRunner::with_config(&registry, quiet())
            .run("elm-bundle")
            .await
            .unwrap();

        assert_eq!(entries(&log), vec!["initialized", "bundled"]);
        assert_eq!(report.root, "elm-bundle");
        assert_eq!(report.executed_names(), vec!["elm-init", "elm-bundle"]);
    }

    #[tokio::test]
    async fn test_diamond_dependency_runs_once() {
        let log = Log::default();
        let mut registry = TaskRegistry::new();
        registry.register("a", &["b", "c"], recorder(&log, "a")).unwrap();
        registry.register("b", &["d"], recorder(&log, "b")).unwrap();
        registry.register("c", &["d"], recorder(&log, "c")).unwrap();
        registry.register("d", &[], recorder(&log, "d")).unwrap();

        TaskRunner::with_config(&registry, quiet())
            .run("a")
            .await
            .unwrap();

        assert_eq!(entries(&log), vec!["d", "b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_cycle_executes_no_actions() {
        let log = Log::default();
        let mut registry = TaskRegistry::new();
        registry.register("a", &["b"], recorder(&log, "a")).unwrap();
        registry.register("b", &["a"], recorder(&log, "b")).unwrap();

        let err = TaskRunner::with_config(&registry, quiet())
            .run("a")
            .await
            .unwrap_err();

        assert!(matches!(err, BriskError::CyclicDependency { .. }));
        assert!(entries(&log).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_task_executes_no_actions() {
        let log = Log::default();
        let mut registry = TaskRegistry::new();
        registry.register("elm-init", &[], recorder(&log, "initialized")).unwrap();

        let err = TaskRunner::with_config(&registry, quiet())
            .run("deploy")
            .await
            .unwrap_err();

        assert!(matches!(err, BriskError::UnknownTask(ref name) if name == "deploy"));
        assert!(entries(&log).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_dependency_executes_no_actions() {
        let log = Log::default();
        let mut registry = TaskRegistry::new();
        registry
            .register("elm-init", &[], recorder(&log, "initialized"))
            .unwrap();
        registry
            .register(
                "elm-bundle",
                &["elm-init", "missing-task"],
                recorder(&log, "bundled"),
            )
            .unwrap();

        let err = TaskRunner::with_config(&registry, quiet())
            .run("elm-bundle")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            BriskError::UnknownDependency { ref dependency, .. } if dependency == "missing-task"
        ));
        assert!(entries(&log).is_empty());
    }

    #[tokio::test]
    async fn test_failed_action_stops_dependents() {
        let log = Log::default();
        let mut registry = TaskRegistry::new();
        registry
            .register(
                "elm-init",
                &[],
                from_fn(|| async { Err(ActionError::Failed("elm not found".to_string())) }),
            )
            .unwrap();
        registry
            .register("elm-bundle", &["elm-init"], recorder(&log, "bundled"))
            .unwrap();

        let err = TaskRunner::with_config(&registry, quiet())
            .run("elm-bundle")
            .await
            .unwrap_err();

        assert_eq!(err.failed_task(), Some("elm-init"));
        assert_eq!(err.to_string(), "Task 'elm-init' failed: elm not found");
        assert!(entries(&log).is_empty());
    }

    #[tokio::test]
    async fn test_dependency_effect_visible_before_dependent_starts() {
        let log = Log::default();
        let mut registry = TaskRegistry::new();

        let writer = log.clone();
        registry
            .register(
                "slow",
                &[],
                from_fn(move || {
                    let writer = writer.clone();
                    async move {
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        writer.lock().unwrap().push("slow".to_string());
                        Ok(())
                    }
                }),
            )
            .unwrap();

        let reader = log.clone();
        registry
            .register(
                "check",
                &["slow"],
                from_fn(move || {
                    let reader = reader.clone();
                    async move {
                        let seen = reader.lock().unwrap().contains(&"slow".to_string());
                        if seen {
                            Ok(())
                        } else {
                            Err(ActionError::Failed("dependency not finished".to_string()))
                        }
                    }
                }),
            )
            .unwrap();

        TaskRunner::with_config(&registry, quiet())
            .run("check")
            .await
            .unwrap();
    }

    #[test]
    fn test_plan_does_not_execute() {
        let mut registry = TaskRegistry::new();
        registry.register("elm-init", &[], NoopAction).unwrap();
        registry.register("elm-bundle", &["elm-init"], NoopAction).unwrap();

        let plan = TaskRunner::new(&registry).plan("elm-bundle").unwrap();
        assert_eq!(plan.order, vec!["elm-init", "elm-bundle"]);
    }
}
