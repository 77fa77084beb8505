//! Configuration parsing for the build file and its task declarations

pub mod build;
pub mod tasks;
