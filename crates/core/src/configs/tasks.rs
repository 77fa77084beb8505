use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Command {
    Single(String),
    Multiple(Vec<String>),
}

/// A user-declared task in `brisk.yml`
#[derive(Debug, Deserialize, Serialize, JsonSchema, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskConfig {
    pub name: String,
    pub description: Option<String>,
    pub script: Option<String>,
    pub command: Option<Command>,
    pub dependencies: Option<Vec<String>>,
}

impl TaskConfig {
    pub fn dependency_names(&self) -> Vec<&str> {
        self.dependencies
            .iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Check that a declared command has something to run
    pub fn validate(&self) -> Result<(), String> {
        match &self.command {
            Some(Command::Single(cmd)) if cmd.trim().is_empty() => {
                Err(format!("Task '{}' has an empty command", self.name))
            }
            Some(Command::Multiple(argv)) if argv.first().map_or(true, |p| p.trim().is_empty()) => {
                Err(format!("Task '{}' has an empty command list", self.name))
            }
            _ => Ok(()),
        }
    }
}
