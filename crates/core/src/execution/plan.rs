//! Execution order resolution
//!
//! Walks the dependency graph depth-first from a root task, dependencies left to
//! right, emitting each task once after all of its dependencies. Tasks are marked
//! in-progress while their dependencies are visited; reaching an in-progress task
//! again means the graph has a cycle.

use std::collections::HashMap;

use crate::registry::TaskRegistry;
use crate::types::{BriskError, BriskResult};

/// Ordered list of tasks a run would execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub root: String,
    /// Dependencies first, root last
    pub order: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Resolve the order in which `root` and its transitive dependencies run
pub fn resolve_execution_order(registry: &TaskRegistry, root: &str) -> BriskResult<ExecutionPlan> {
    let root_task = registry
        .get(root)
        .ok_or_else(|| BriskError::UnknownTask(root.to_string()))?;

    let mut marks = HashMap::new();
    let mut path = Vec::new();
    let mut order = Vec::new();
    visit(registry, &root_task.name, &mut marks, &mut path, &mut order)?;

    Ok(ExecutionPlan {
        root: root_task.name.clone(),
        order,
    })
}

fn visit<'a>(
    registry: &'a TaskRegistry,
    name: &'a str,
    marks: &mut HashMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
    order: &mut Vec<String>,
) -> BriskResult<()> {
    match marks.get(name) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::InProgress) => {
            let start = path.iter().position(|n| *n == name).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(name.to_string());
            return Err(BriskError::CyclicDependency { cycle });
        }
        None => {}
    }

    let task = registry
        .get(name)
        .ok_or_else(|| BriskError::UnknownTask(name.to_string()))?;

    marks.insert(name, Mark::InProgress);
    path.push(name);

    for dependency in &task.dependencies {
        if !registry.contains(dependency) {
            return Err(BriskError::UnknownDependency {
                task: task.name.clone(),
                dependency: dependency.clone(),
            });
        }
        visit(registry, dependency, marks, path, order)?;
    }

    path.pop();
    marks.insert(name, Mark::Done);
    order.push(name.to_string());
    Ok(())
}
