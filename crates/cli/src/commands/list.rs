use anyhow::Result;
use colored::*;
use brisk_core::build_manager::BuildManager;

pub fn execute(manager: &BuildManager) -> Result<()> {
    let result = manager.list_tasks();

    println!("{}", "Tasks".bold().underline());

    if result.tasks.is_empty() {
        println!("  {}", "No tasks registered".dimmed());
        return Ok(());
    }

    for task in &result.tasks {
        let name = match result.task_colors.get(&task.name) {
            Some(color) => task.name.color(*color).bold(),
            None => task.name.bold(),
        };
        let source = if task.built_in {
            "[built-in]".bright_black()
        } else {
            "[brisk.yml]".green()
        };
        println!("{} {}", name, source);

        if let Some(description) = &task.description {
            println!("  {}", description.dimmed());
        }
        if !task.dependencies.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), task.dependencies.join(", "));
        }
    }

    Ok(())
}
