//! Launch orchestration
//!
//! ## Module Structure
//! - `state.rs`: State kinds, the transition table and the owned state
//! - `context.rs`: Collaborators shared between orchestrators
//! - `machine.rs`: One join request driven through the states
//! - `service.rs`: Boundary operations used by the CLI

mod context;
mod machine;
mod service;
mod state;

pub use context::LaunchContext;
pub use machine::{JoinOutcome, JoinRequest, LaunchOrchestrator};
pub use service::LaunchService;
pub use state::{OrchestrationState, StateKind};
