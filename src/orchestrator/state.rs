//! Orchestration states and the transition table.
//!
//! | from            | to                                   |
//! |-----------------|--------------------------------------|
//! | Checking        | Ready, Missing, Error                |
//! | Ready           | Launched, Error                      |
//! | Missing         | FetchingContent, Checking (re-check) |
//! | FetchingContent | Checking, Error                      |
//! | Error           | Checking (retry)                     |
//! | Launched        | -                                    |

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::error::LaunchError;
use crate::launch::{LaunchPlan, LaunchReceipt};
use crate::mods::RequiredPackage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StateKind {
    Checking,
    Ready,
    Missing,
    FetchingContent,
    Error,
    Launched,
}

impl StateKind {
    pub fn can_transition_to(self, next: StateKind) -> bool {
        use StateKind::*;
        matches!(
            (self, next),
            (Checking, Ready | Missing | Error)
                | (Ready, Launched | Error)
                | (Missing, FetchingContent | Checking)
                | (FetchingContent, Checking | Error)
                | (Error, Checking)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, StateKind::Launched)
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StateKind::Checking => "checking",
            StateKind::Ready => "ready",
            StateKind::Missing => "missing content",
            StateKind::FetchingContent => "fetching content",
            StateKind::Error => "in error",
            StateKind::Launched => "launched",
        };
        f.write_str(s)
    }
}

/// State owned by one orchestrator.
#[derive(Debug)]
pub enum OrchestrationState {
    Checking,
    Ready {
        plan: LaunchPlan,
        game_root: PathBuf,
    },
    Missing(LaunchPlan),
    FetchingContent {
        ids: Vec<String>,
    },
    Error(LaunchError),
    Launched {
        plan: LaunchPlan,
        receipt: LaunchReceipt,
    },
}

impl OrchestrationState {
    pub fn kind(&self) -> StateKind {
        match self {
            OrchestrationState::Checking => StateKind::Checking,
            OrchestrationState::Ready { .. } => StateKind::Ready,
            OrchestrationState::Missing(_) => StateKind::Missing,
            OrchestrationState::FetchingContent { .. } => StateKind::FetchingContent,
            OrchestrationState::Error(_) => StateKind::Error,
            OrchestrationState::Launched { .. } => StateKind::Launched,
        }
    }

    /// Missing packages while in `Missing`, empty otherwise.
    pub fn missing(&self) -> &[RequiredPackage] {
        match self {
            OrchestrationState::Missing(plan) => plan.missing(),
            _ => &[],
        }
    }

    /// Human-readable cause while in `Error`.
    pub fn error_cause(&self) -> Option<String> {
        match self {
            OrchestrationState::Error(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StateKind::*;
    use super::*;

    const ALL: [StateKind; 6] = [Checking, Ready, Missing, FetchingContent, Error, Launched];

    #[test]
    fn launched_is_a_dead_end() {
        assert!(Launched.is_terminal());
        assert!(ALL.iter().all(|k| !Launched.can_transition_to(*k)));
    }

    #[test]
    fn only_ready_reaches_launched() {
        let sources: Vec<_> = ALL.iter().filter(|k| k.can_transition_to(Launched)).collect();
        assert_eq!(sources, vec![&Ready]);
    }

    #[test]
    fn error_only_retries() {
        let targets: Vec<_> = ALL.iter().filter(|k| Error.can_transition_to(**k)).collect();
        assert_eq!(targets, vec![&Checking]);
    }

    #[test]
    fn missing_never_jumps_to_launched() {
        assert!(!Missing.can_transition_to(Launched));
        assert!(!Missing.can_transition_to(Ready));
    }
}
