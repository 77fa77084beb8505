use anyhow::Result;
use colored::*;
use brisk_core::build_manager::BuildManager;

pub fn execute(manager: &BuildManager, task: &str) -> Result<()> {
    println!("{} {}", "Execution plan for".bold(), task.cyan());

    let execution_plan = manager
        .get_execution_plan(task)
        .map_err(|e| anyhow::anyhow!("Failed to get execution plan: {}", e))?;

    println!("\n{}:", "Execution order".bold());
    for (i, name) in execution_plan.order.iter().enumerate() {
        let marker = if *name == execution_plan.root {
            " (target)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}. {}{}", i + 1, name, marker);
    }

    Ok(())
}
