//! Result types for build operations
//!
//! This module contains the result types returned by [`BuildManager`](crate::BuildManager)
//! operations, providing a centralized location for output structures.

use std::collections::HashMap;
use std::time::Duration;

use colored::Color;

/// One executed task within a run
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub name: String,
    pub duration: Duration,
}

/// Completion signal of a run: every executed task in execution order
#[derive(Debug, Clone)]
pub struct RunReport {
    pub root: String,
    pub executed: Vec<TaskOutcome>,
    pub duration: Duration,
}

impl RunReport {
    pub fn executed_names(&self) -> Vec<&str> {
        self.executed.iter().map(|o| o.name.as_str()).collect()
    }
}

/// Information about a registered task
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Vec<String>,
    /// `true` for the tasks brisk registers itself, `false` for tasks from `brisk.yml`
    pub built_in: bool,
}

/// Result of listing tasks
#[derive(Debug)]
pub struct TaskListResult {
    pub tasks: Vec<TaskInfo>,
    pub task_colors: HashMap<String, Color>,
}

/// Result of getting the dependency graph
#[derive(Debug)]
pub struct DependencyGraphResult {
    pub graph: petgraph::Graph<String, ()>,
    pub cycles: Vec<Vec<String>>,
    /// `(task, dependency)` pairs whose dependency is not registered
    pub missing: Vec<(String, String)>,
}
