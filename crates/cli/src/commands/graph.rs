use anyhow::Result;
use colored::*;
use brisk_core::build_manager::BuildManager;
use brisk_core::graph::dependencies_of;

pub fn execute(manager: &BuildManager) -> Result<()> {
    println!("{}", "Task Dependency Graph:".bold().underline());

    let result = manager.get_dependency_graph();
    let graph = &result.graph;

    if !result.cycles.is_empty() {
        let cycles_description = result
            .cycles
            .iter()
            .map(|cycle| {
                let mut path = cycle.clone();
                if let Some(first) = path.first().cloned() {
                    path.push(first);
                }
                path.join(" -> ")
            })
            .collect::<Vec<_>>()
            .join("; ");

        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("Circular dependencies detected: {}", cycles_description).yellow()
        );
    }

    for (task, dependency) in &result.missing {
        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("'{}' depends on unregistered task '{}'", task, dependency).yellow()
        );
    }

    for node_index in graph.node_indices() {
        println!("{}", graph[node_index].blue().bold());

        let deps = dependencies_of(graph, node_index);
        if !deps.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), deps.join(", "));
        } else {
            println!("  {}", "no dependencies".dimmed());
        }
        println!();
    }

    Ok(())
}
