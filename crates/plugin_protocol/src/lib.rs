//! Plugin protocol for brisk build pipelines.
//!
//! A build pipeline is wired from plugins that each own one transform:
//!
//! - [`Compiler`] - initializes a project and bundles source files into one [`Artifact`]
//! - [`Minifier`] - shrinks an [`Artifact`] 1:1
//!
//! brisk schedules these transforms as task actions; plugins never see the task graph.

pub mod traits;
pub mod types;

pub use traits::{Compiler, Minifier};
pub use types::{Artifact, BundleOptions};
