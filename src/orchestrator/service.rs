//! Boundary operations exposed to the presentation layer (CLI today).

use std::collections::BTreeSet;
use std::sync::Arc;

use super::context::LaunchContext;
use super::machine::{JoinOutcome, JoinRequest, LaunchOrchestrator};
use crate::bridge::FetchOutcome;
use crate::config::{Settings, SettingsPatch, SettingsStore};
use crate::error::LaunchError;
use crate::mods::{PackageDescriptor, RequiredPackage};

#[derive(Clone)]
pub struct LaunchService {
    ctx: Arc<LaunchContext>,
}

impl LaunchService {
    pub fn new(ctx: Arc<LaunchContext>) -> Self {
        Self { ctx }
    }

    pub fn system(settings: Arc<SettingsStore>) -> Self {
        Self::new(Arc::new(LaunchContext::system(settings)))
    }

    /// A fresh orchestrator for one join request, sharing this service's
    /// scan gate and bridge.
    pub fn orchestrator(&self, request: JoinRequest) -> LaunchOrchestrator {
        LaunchOrchestrator::new(self.ctx.clone(), request)
    }

    /// One check cycle; launches when nothing is missing.
    ///
    /// `Ok` with `launched: None` means content is missing (see `plan`).
    pub async fn check_and_launch(
        &self,
        server_address: &str,
        required: Vec<RequiredPackage>,
    ) -> Result<JoinOutcome, LaunchError> {
        let mut orch = self.orchestrator(JoinRequest::new(server_address, required));
        orch.check_and_launch().await?;
        orch.into_outcome()
    }

    /// Ask the client to fetch `ids`. Never waits for the downloads.
    pub async fn fetch_missing(&self, ids: &[String]) -> FetchOutcome {
        let wanted: BTreeSet<String> = ids.iter().cloned().collect();
        let outcome = self.ctx.bridge.request_fetch(&wanted, self.ctx.bridge_timeout()).await;
        if let Some(note) = &outcome.note {
            tracing::info!("{note}");
        }
        outcome
    }

    /// Every package currently in the content cache, sorted by id.
    pub async fn installed_mods(&self) -> Result<Vec<PackageDescriptor>, LaunchError> {
        let root = self.ctx.content_client_root().await?;
        let app_id = self.ctx.settings.snapshot().app_id;
        Ok(self.ctx.scans.scan(&root, app_id).await?.into_vec())
    }

    pub fn settings(&self) -> Settings {
        self.ctx.settings.snapshot()
    }

    pub fn save_settings(&self, patch: SettingsPatch) -> Result<Settings, LaunchError> {
        Ok(self.ctx.settings.apply(patch)?)
    }
}
