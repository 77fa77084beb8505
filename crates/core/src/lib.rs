//! brisk Core Library
//!
//! This is the core library for the brisk build orchestrator. It provides the
//! task graph executor, build configuration, and the Elm build pipeline that
//! wires a compiler plugin and a minifier plugin into named tasks.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`build_manager`] - High-level build management interface
//! - [`registry`] - Task registry (name -> dependencies + action)
//! - [`action`] - The action capability every task carries
//! - [`execution`] - Execution order resolution, task runner and command actions
//! - [`pipeline`] - Elm compiler, minifier, source globbing and filesystem sink
//! - [`graph`] - Dependency graph view and cycle reporting
//! - [`configs`] - Configuration parsing for `brisk.yml`
//! - [`tasks`] - Task color management
//! - [`results`] - Result types for build operations
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! The task graph executor can be used on its own:
//!
//! ```rust,no_run
//! use brisk_core::action::from_fn;
//! use brisk_core::execution::TaskRunner;
//! use brisk_core::registry::TaskRegistry;
//!
//! # async fn example() -> brisk_core::types::BriskResult<()> {
//! let mut registry = TaskRegistry::new();
//! registry.register("elm-init", &[], from_fn(|| async { Ok(()) }))?;
//! registry.register("elm-bundle", &["elm-init"], from_fn(|| async { Ok(()) }))?;
//!
//! let report = TaskRunner::new(&registry).run("elm-bundle").await?;
//! assert_eq!(report.executed_names(), vec!["elm-init", "elm-bundle"]);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod build_manager;
pub mod configs;
pub mod execution;
pub mod graph;
pub mod pipeline;
pub mod registry;
pub mod results;
pub mod tasks;
pub mod types;

// Re-export the main types for easier usage
pub use build_manager::{BuildManager, BuildManagerConfig};
pub use types::{ActionError, BriskError, BriskResult};
