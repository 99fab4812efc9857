//! Launch module - plan building and game process start
//!
//! ## Module Structure
//! - `types.rs`: Plan, target and receipt types
//! - `pure/`: Pure functions (plan building, command building, validation)
//! - `operations/`: Atomic side effects (process spawn)
//! - `pipelines/`: High-level flow (build command, validate, spawn)

mod operations;
mod pipelines;
mod pure;
mod types;

// Re-export public API
pub use operations::{ProcessSpawner, ShellSpawner};
pub use pipelines::ProcessLauncher;
pub use pure::{build_command_line, build_plan, split_server_address};
pub use types::{LaunchPlan, LaunchReceipt, LaunchTarget, MOD_PATH_DELIMITER};

#[cfg(test)]
pub(crate) use operations::testing;
