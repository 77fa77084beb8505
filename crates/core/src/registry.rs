//! Task registry
//!
//! Holds every task known to a build, keyed by unique name. Dependencies are
//! stored as names and may refer to tasks registered later; references are
//! resolved when a task is planned or by [`TaskRegistry::validate`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::action::Action;
use crate::execution::plan::resolve_execution_order;
use crate::types::{BriskError, BriskResult};

/// A named unit of build work
#[derive(Clone)]
pub struct Task {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    pub action: Arc<dyn Action>,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("dependencies", &self.dependencies)
            .finish_non_exhaustive()
    }
}

/// Mapping from task name to [`Task`]
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: HashMap<String, Task>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task with the given dependencies and action
    pub fn register<A>(
        &mut self,
        name: impl Into<String>,
        dependencies: &[&str],
        action: A,
    ) -> BriskResult<()>
    where
        A: Action + 'static,
    {
        self.register_task(Task {
            name: name.into(),
            description: None,
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            action: Arc::new(action),
        })
    }

    /// Register a fully built task
    pub fn register_task(&mut self, task: Task) -> BriskResult<()> {
        if self.tasks.contains_key(&task.name) {
            return Err(BriskError::DuplicateTask(task.name));
        }

        debug!(task = %task.name, dependencies = ?task.dependencies, "registered task");
        self.tasks.insert(task.name.clone(), task);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// All tasks sorted by name
    pub fn tasks(&self) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by(|a, b| a.name.cmp(&b.name));
        tasks
    }

    /// Check that every dependency resolves and that the graph is acyclic
    pub fn validate(&self) -> BriskResult<()> {
        for task in self.tasks() {
            for dependency in &task.dependencies {
                if !self.contains(dependency) {
                    return Err(BriskError::UnknownDependency {
                        task: task.name.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        for task in self.tasks() {
            resolve_execution_order(self, &task.name)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NoopAction;

    #[test]
    fn test_register_rejects_duplicate_names() {
        let mut registry = TaskRegistry::new();
        registry.register("elm-init", &[], NoopAction).unwrap();

        let err = registry.register("elm-init", &[], NoopAction).unwrap_err();
        assert!(matches!(err, BriskError::DuplicateTask(ref name) if name == "elm-init"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_allows_forward_references() {
        let mut registry = TaskRegistry::new();
        registry
            .register("elm-bundle", &["elm-init"], NoopAction)
            .unwrap();
        registry.register("elm-init", &[], NoopAction).unwrap();

        assert!(registry.validate().is_ok());
        assert_eq!(
            registry.get("elm-bundle").unwrap().dependencies,
            vec!["elm-init".to_string()]
        );
    }

    #[test]
    fn test_validate_reports_unknown_dependency() {
        let mut registry = TaskRegistry::new();
        registry
            .register("elm-bundle", &["missing-task"], NoopAction)
            .unwrap();

        match registry.validate().unwrap_err() {
            BriskError::UnknownDependency { task, dependency } => {
                assert_eq!(task, "elm-bundle");
                assert_eq!(dependency, "missing-task");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_reports_cycle() {
        let mut registry = TaskRegistry::new();
        registry.register("a", &["b"], NoopAction).unwrap();
        registry.register("b", &["a"], NoopAction).unwrap();

        let err = registry.validate().unwrap_err();
        assert!(matches!(err, BriskError::CyclicDependency { .. }));
    }

    #[test]
    fn test_tasks_sorted_by_name() {
        let mut registry = TaskRegistry::new();
        registry.register("zeta", &[], NoopAction).unwrap();
        registry.register("alpha", &[], NoopAction).unwrap();

        let names: Vec<&str> = registry.tasks().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
