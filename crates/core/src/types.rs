use thiserror::Error;

/// The main error type for brisk operations
#[derive(Debug, Error)]
pub enum BriskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task '{0}' not found")]
    UnknownTask(String),

    #[error("Task '{task}' depends on '{dependency}' which is not registered")]
    UnknownDependency { task: String, dependency: String },

    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("Circular dependency detected: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<String> },

    #[error("Task '{task}' failed: {source}")]
    Action {
        task: String,
        #[source]
        source: ActionError,
    },
}

impl BriskError {
    /// Name of the task whose action failed, if this is an action failure
    pub fn failed_task(&self) -> Option<&str> {
        match self {
            Self::Action { task, .. } => Some(task),
            _ => None,
        }
    }
}

/// Errors raised by a task's action
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command '{command}' failed with exit code {}{}", .code.unwrap_or(-1), format_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("No source files matched {0}")]
    NoSources(String),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("{plugin} plugin error: {source:#}")]
    Plugin {
        plugin: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("{0}")]
    Failed(String),
}

fn format_cycle(cycle: &[String]) -> String {
    cycle.join(" -> ")
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

/// Result type alias for brisk operations
pub type BriskResult<T> = Result<T, BriskError>;

/// Result type alias for task actions
pub type ActionResult = Result<(), ActionError>;
