use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::registry::TaskRegistry;
use crate::results::DependencyGraphResult;

/// Build the task dependency graph from a registry
///
/// Edges point from a task to each of its dependencies, in declaration order.
/// Dependencies that are not registered are collected instead of failing so the
/// graph can still be displayed.
pub fn build_dependency_graph(registry: &TaskRegistry) -> DependencyGraphResult {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    let tasks = registry.tasks();

    // Add all tasks as nodes
    for task in &tasks {
        let node_index = graph.add_node(task.name.clone());
        node_indices.insert(task.name.as_str(), node_index);
    }

    // Add edges for dependencies
    let mut missing = Vec::new();
    for task in &tasks {
        let from_node = node_indices[task.name.as_str()];
        for dep in &task.dependencies {
            if let Some(&to_node) = node_indices.get(dep.as_str()) {
                graph.add_edge(from_node, to_node, ());
            } else {
                missing.push((task.name.clone(), dep.clone()));
            }
        }
    }

    let cycles = find_cycles(&graph);

    DependencyGraphResult {
        graph,
        cycles,
        missing,
    }
}

/// Detect cycles using strongly connected components
fn find_cycles(graph: &DiGraph<String, ()>) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();
    cycles
}

/// Names of the direct dependencies of `node`, in declaration order
pub fn dependencies_of(graph: &DiGraph<String, ()>, node: NodeIndex) -> Vec<String> {
    // petgraph yields neighbors most-recently-added first
    let mut deps: Vec<String> = graph
        .neighbors(node)
        .filter_map(|neighbor| graph.node_weight(neighbor).cloned())
        .collect();
    deps.reverse();
    deps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::NoopAction;

    #[test]
    fn test_graph_edges_follow_dependencies() {
        let mut registry = TaskRegistry::new();
        registry.register("elm-init", &[], NoopAction).unwrap();
        registry.register("lint", &[], NoopAction).unwrap();
        registry
            .register("elm-bundle", &["elm-init", "lint"], NoopAction)
            .unwrap();

        let result = build_dependency_graph(&registry);
        assert_eq!(result.graph.node_count(), 3);
        assert_eq!(result.graph.edge_count(), 2);
        assert!(result.cycles.is_empty());
        assert!(result.missing.is_empty());

        let bundle = result
            .graph
            .node_indices()
            .find(|n| result.graph[*n] == "elm-bundle")
            .unwrap();
        assert_eq!(
            dependencies_of(&result.graph, bundle),
            vec!["elm-init", "lint"]
        );
    }

    #[test]
    fn test_cycle_detection_in_dependency_graph() {
        let mut registry = TaskRegistry::new();
        registry.register("a", &["b"], NoopAction).unwrap();
        registry.register("b", &["a"], NoopAction).unwrap();
        registry.register("c", &["c"], NoopAction).unwrap();
        registry.register("d", &["a"], NoopAction).unwrap();

        let result = build_dependency_graph(&registry);
        assert_eq!(
            result.cycles,
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()]
            ]
        );
    }

    #[test]
    fn test_missing_dependencies_are_collected() {
        let mut registry = TaskRegistry::new();
        registry
            .register("elm-bundle", &["missing-task"], NoopAction)
            .unwrap();

        let result = build_dependency_graph(&registry);
        assert_eq!(
            result.missing,
            vec![("elm-bundle".to_string(), "missing-task".to_string())]
        );
        assert_eq!(result.graph.edge_count(), 0);
    }
}
