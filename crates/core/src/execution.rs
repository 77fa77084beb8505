//! Task execution module
//!
//! This module handles the actual execution of tasks including execution order
//! resolution, command execution, and run reporting.

pub mod command;
pub mod plan;
pub mod runner;

pub use command::{CommandExecutor, Invocation};
pub use plan::{resolve_execution_order, ExecutionPlan};
pub use runner::{TaskRunner, TaskRunnerConfig};
