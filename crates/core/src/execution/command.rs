//! Command execution utilities
//!
//! This module provides a unified [`Action`] for running external commands
//! (shell commands, scripts, executable with args) with consistent error handling.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::action::Action;
use crate::configs::tasks::{Command as TaskCommand, TaskConfig};
use crate::types::{ActionError, ActionResult};

/// What a command task invokes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// A single command line run through `sh -c`
    Shell(String),
    /// An executable followed by its arguments
    Program { program: String, args: Vec<String> },
    /// A script file, relative paths resolved against the build root
    Script(String),
}

/// Action that runs an external command from the build root
pub struct CommandExecutor {
    root: PathBuf,
    task_name: String,
    invocation: Invocation,
}

impl CommandExecutor {
    pub fn new(root: impl Into<PathBuf>, task_name: impl Into<String>, invocation: Invocation) -> Self {
        Self {
            root: root.into(),
            task_name: task_name.into(),
            invocation,
        }
    }

    /// Build the executor for a configured command task
    ///
    /// Returns `None` when the task declares neither a script nor a command.
    pub fn from_task_config(root: impl Into<PathBuf>, task_config: &TaskConfig) -> Option<Self> {
        let invocation = if let Some(script) = &task_config.script {
            Invocation::Script(script.clone())
        } else {
            match task_config.command.as_ref()? {
                TaskCommand::Single(cmd) => Invocation::Shell(cmd.clone()),
                TaskCommand::Multiple(cmds) => match cmds.split_first() {
                    Some((program, args)) => Invocation::Program {
                        program: program.clone(),
                        args: args.to_vec(),
                    },
                    None => Invocation::Program {
                        program: String::new(),
                        args: Vec::new(),
                    },
                },
            }
        };

        Some(Self::new(root, task_config.name.clone(), invocation))
    }

    /// Execute a command with common setup and error handling
    async fn execute_command(&self, command: &mut Command, label: &str) -> ActionResult {
        command.current_dir(&self.root);
        command.env("BRISK_TASK", &self.task_name);

        debug!(task = %self.task_name, command = %label, "spawning command");
        let status = command
            .status()
            .await
            .map_err(|source| ActionError::Spawn {
                command: label.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(ActionError::CommandFailed {
                command: label.to_string(),
                code: status.code(),
                stderr: String::new(),
            });
        }

        Ok(())
    }

    /// Execute a script file
    async fn execute_script(&self, script_path: &str) -> ActionResult {
        let script_path_buf = PathBuf::from(script_path);

        // If script path is relative, resolve it relative to the build root
        let full_script_path = if script_path_buf.is_relative() {
            self.root.join(script_path_buf)
        } else {
            script_path_buf
        };

        if !full_script_path.exists() {
            return Err(ActionError::Failed(format!(
                "Script file '{}' not found",
                full_script_path.display()
            )));
        }

        let mut command = Command::new(&full_script_path);
        self.execute_command(&mut command, &full_script_path.display().to_string())
            .await
    }

    /// Execute a command with arguments
    async fn execute_command_with_args(&self, program: &str, args: &[String]) -> ActionResult {
        if program.trim().is_empty() {
            return Err(ActionError::Failed(format!(
                "Task '{}' has an empty command list",
                self.task_name
            )));
        }

        let mut command = Command::new(program);
        command.args(args);
        let label = std::iter::once(program.to_string())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ");
        self.execute_command(&mut command, &label).await
    }

    /// Execute a single shell command
    async fn execute_shell_command(&self, cmd: &str) -> ActionResult {
        let mut command = Command::new("sh");
        command.arg("-c").arg(cmd);
        self.execute_command(&mut command, cmd).await
    }
}

#[async_trait]
impl Action for CommandExecutor {
    async fn execute(&self) -> ActionResult {
        match &self.invocation {
            Invocation::Shell(cmd) => self.execute_shell_command(cmd).await,
            Invocation::Program { program, args } => {
                self.execute_command_with_args(program, args).await
            }
            Invocation::Script(script) => self.execute_script(script).await,
        }
    }
}
