use anyhow::Result;
use colored::*;
use brisk_core::build_manager::BuildManager;
use brisk_core::types::BriskError;

pub async fn execute(manager: &BuildManager, task: &str) -> Result<()> {
    println!("{} {}", "Running task".bold(), task.cyan());

    let report = manager
        .run_task(task)
        .await
        .map_err(|e| anyhow::anyhow!(failure_message(task, &e)))?;

    println!();
    println!(
        "{} {}",
        "✓".green().bold(),
        format!(
            "{} task(s) completed in {:.2?}",
            report.executed.len(),
            report.duration
        )
        .green()
        .bold()
    );

    Ok(())
}

fn failure_message(task: &str, error: &BriskError) -> String {
    match error {
        BriskError::Action {
            task: failed,
            source,
        } => format!("Task '{}' failed while running '{}': {}", failed, task, source),
        _ => format!("Failed to run task: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brisk_core::types::ActionError;

    #[test]
    fn test_action_failure_names_task_once() {
        let error = BriskError::Action {
            task: "elm-init".to_string(),
            source: ActionError::Failed("elm not found".to_string()),
        };

        let message = failure_message("elm-bundle", &error);
        assert_eq!(message.matches("elm-init").count(), 1);
        assert!(message.starts_with("Task 'elm-init' failed while running 'elm-bundle': "));
        assert!(message.ends_with("elm not found"));
    }

    #[test]
    fn test_graph_failure_message() {
        let error = BriskError::UnknownTask("watch".to_string());
        assert_eq!(
            failure_message("watch", &error),
            format!("Failed to run task: {}", error)
        );
    }
}
