//! One join request, driven through the orchestration states.
//!
//! Every command awaits its I/O and returns with the orchestrator in a state
//! that has an explicit next action: `Launched` (done), `Missing`
//! (`fetch_missing` / `check_and_launch`), `Ready` (`launch`) or `Error`
//! (`retry`). Nothing loops internally; repeated `Missing` outcomes after a
//! fetch are handed back to the caller. An instance left in `FetchingContent`
//! (its `fetch_missing` future was dropped) is picked up again by a check.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

use super::context::LaunchContext;
use super::state::{OrchestrationState, StateKind};
use crate::error::LaunchError;
use crate::launch::{LaunchPlan, LaunchReceipt, build_plan};
use crate::mods::RequiredPackage;

/// Immutable input of one orchestration run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub server_address: String,
    pub required: Vec<RequiredPackage>,
}

impl JoinRequest {
    pub fn new(server_address: impl Into<String>, required: Vec<RequiredPackage>) -> Self {
        Self {
            server_address: server_address.into(),
            required,
        }
    }
}

/// What a finished (or paused) run produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinOutcome {
    pub plan: LaunchPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launched: Option<LaunchReceipt>,
}

pub struct LaunchOrchestrator {
    ctx: Arc<LaunchContext>,
    request: JoinRequest,
    state: OrchestrationState,
    /// Launch as soon as a check finds everything present
    launch_when_ready: bool,
    progress: watch::Sender<StateKind>,
}

impl LaunchOrchestrator {
    pub fn new(ctx: Arc<LaunchContext>, request: JoinRequest) -> Self {
        let (progress, _) = watch::channel(StateKind::Checking);
        Self {
            ctx,
            request,
            state: OrchestrationState::Checking,
            launch_when_ready: true,
            progress,
        }
    }

    pub fn request(&self) -> &JoinRequest {
        &self.request
    }

    pub fn state(&self) -> &OrchestrationState {
        &self.state
    }

    pub fn kind(&self) -> StateKind {
        self.state.kind()
    }

    /// Observe state changes (e.g. from a UI task).
    pub fn subscribe(&self) -> watch::Receiver<StateKind> {
        self.progress.subscribe()
    }

    /// Run one Checking cycle; launch if nothing is missing.
    ///
    /// Valid from `Checking` (initial), `Missing` (re-check) and an abandoned
    /// `FetchingContent`.
    pub async fn check_and_launch(&mut self) -> Result<&OrchestrationState, LaunchError> {
        self.launch_when_ready = true;
        self.begin_check("check and launch")?;
        self.run_checking().await;
        Ok(&self.state)
    }

    /// Run one Checking cycle, stopping at `Ready` instead of launching.
    pub async fn check(&mut self) -> Result<&OrchestrationState, LaunchError> {
        self.launch_when_ready = false;
        self.begin_check("check")?;
        self.run_checking().await;
        Ok(&self.state)
    }

    /// `Ready` -> `Launched` (or `Error` if the spawn fails).
    pub async fn launch(&mut self) -> Result<&OrchestrationState, LaunchError> {
        self.require(StateKind::Ready, "launch")?;
        self.launch_ready();
        Ok(&self.state)
    }

    /// `Missing` -> `FetchingContent`, then after the settle delay back
    /// through `Checking`.
    pub async fn fetch_missing(&mut self) -> Result<&OrchestrationState, LaunchError> {
        self.require(StateKind::Missing, "fetch missing content")?;

        let ids: Vec<String> = self.state.missing().iter().map(|m| m.id.clone()).collect();
        self.enter(OrchestrationState::FetchingContent { ids: ids.clone() });

        let wanted: BTreeSet<String> = ids.into_iter().collect();
        let timeout = self.ctx.bridge_timeout();
        match self.ctx.bridge.try_request_fetch(&wanted, timeout).await {
            Ok(receipt) => {
                if let Some(note) = receipt.confirmation_note() {
                    tracing::info!(server = %self.request.server_address, "{note}");
                }
            }
            Err(e) => {
                self.enter(OrchestrationState::Error(e.into()));
                return Ok(&self.state);
            }
        }

        // Downloads take time to land on disk; a repeat Missing is expected
        let settle = self.ctx.settings.snapshot().settle_delay();
        if !settle.is_zero() {
            tokio::time::sleep(settle).await;
        }

        self.enter(OrchestrationState::Checking);
        self.run_checking().await;
        Ok(&self.state)
    }

    /// `Error` -> `Checking`.
    pub async fn retry(&mut self) -> Result<&OrchestrationState, LaunchError> {
        self.require(StateKind::Error, "retry")?;
        self.enter(OrchestrationState::Checking);
        self.run_checking().await;
        Ok(&self.state)
    }

    /// Consume the orchestrator and hand back its result.
    pub fn into_outcome(self) -> Result<JoinOutcome, LaunchError> {
        match self.state {
            OrchestrationState::Launched { plan, receipt } => Ok(JoinOutcome {
                plan,
                launched: Some(receipt),
            }),
            OrchestrationState::Ready { plan, .. } | OrchestrationState::Missing(plan) => {
                Ok(JoinOutcome { plan, launched: None })
            }
            OrchestrationState::Error(e) => Err(e),
            other => Err(LaunchError::InvalidTransition {
                from: other.kind(),
                command: "collect the outcome",
            }),
        }
    }

    fn begin_check(&mut self, command: &'static str) -> Result<(), LaunchError> {
        match self.kind() {
            StateKind::Checking => Ok(()),
            StateKind::Missing | StateKind::FetchingContent => {
                self.enter(OrchestrationState::Checking);
                Ok(())
            }
            from => Err(LaunchError::InvalidTransition { from, command }),
        }
    }

    fn require(&self, expected: StateKind, command: &'static str) -> Result<(), LaunchError> {
        let from = self.kind();
        if from == expected {
            Ok(())
        } else {
            Err(LaunchError::InvalidTransition { from, command })
        }
    }

    async fn run_checking(&mut self) {
        let next = match self.evaluate().await {
            Ok((plan, _)) if !plan.can_launch() => OrchestrationState::Missing(plan),
            Ok((plan, game_root)) => OrchestrationState::Ready { plan, game_root },
            Err(e) => OrchestrationState::Error(e),
        };
        self.enter(next);

        if self.launch_when_ready && self.kind() == StateKind::Ready {
            self.launch_ready();
        }
    }

    /// Resolve paths, scan, plan. Nothing here changes state.
    async fn evaluate(&self) -> Result<(LaunchPlan, PathBuf), LaunchError> {
        let settings = self.ctx.settings.snapshot();
        let (client_root, game_root) = self.ctx.resolve_roots().await?;

        let snapshot = self.ctx.scans.scan(&client_root, settings.app_id).await?;
        let plan = build_plan(&snapshot, &self.request.required);
        tracing::debug!(
            installed = snapshot.len(),
            required = self.request.required.len(),
            missing = plan.missing().len(),
            "plan built"
        );
        Ok((plan, game_root))
    }

    fn launch_ready(&mut self) {
        let OrchestrationState::Ready { plan, game_root } = &self.state else {
            return;
        };

        let settings = self.ctx.settings.snapshot();
        let launcher = &self.ctx.launcher;
        let target = launcher.target_for(&settings, game_root);
        let result = launcher.launch(
            &target,
            plan.ordered_paths().unwrap_or_default(),
            &self.request.server_address,
            &settings.extra_parameters,
            settings.compat_path_format,
        );
        let plan = plan.clone();

        match result {
            Ok(receipt) => {
                let address = self.request.server_address.clone();
                if let Err(e) = self
                    .ctx
                    .settings
                    .update(|s| s.push_recent_launch(&address, chrono::Utc::now()))
                {
                    tracing::warn!(error = %e, "could not record launch history");
                }
                self.enter(OrchestrationState::Launched { plan, receipt });
            }
            Err(e) => self.enter(OrchestrationState::Error(e)),
        }
    }

    fn enter(&mut self, next: OrchestrationState) {
        let from = self.kind();
        let to = next.kind();
        debug_assert!(
            from.can_transition_to(to),
            "invalid orchestration transition {from:?} -> {to:?}"
        );

        match &next {
            OrchestrationState::Error(e) => {
                tracing::warn!(server = %self.request.server_address, %from, error = %e, "join failed")
            }
            OrchestrationState::Missing(plan) => tracing::info!(
                server = %self.request.server_address,
                missing = ?plan.missing_ids(),
                "content missing"
            ),
            _ => tracing::info!(server = %self.request.server_address, %from, %to, "state change"),
        }

        self.state = next;
        self.progress.send_replace(to);
    }
}

impl std::fmt::Debug for LaunchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaunchOrchestrator")
            .field("request", &self.request)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
