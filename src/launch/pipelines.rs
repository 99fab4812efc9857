//! Pipelines module (orchestration)

pub mod execute;

pub use execute::ProcessLauncher;
