//! Pure functions (no I/O beyond existence checks)

pub mod command;
pub mod plan;
pub mod validation;

pub use command::{build_command_line, split_server_address};
pub use plan::build_plan;
pub use validation::validate_target;
