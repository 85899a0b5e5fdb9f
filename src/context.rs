use std::path::PathBuf;

use crate::connectors::{LedgerConnector, TaskerConnector};
use crate::errors::FalcoriaError;
use crate::store::{Profile, StateStore};

/// Per-invocation state handed to every command handler.
pub struct AppContext {
    pub store: StateStore,
    profile_override: Option<String>,
}

impl AppContext {
    pub fn new(store: StateStore, profile_override: Option<String>) -> Self {
        Self { store, profile_override }
    }

    /// `--profile` when given, else the stored active profile name.
    pub async fn profile_name(&self) -> Result<String, FalcoriaError> {
        match &self.profile_override {
            Some(name) => Ok(name.clone()),
            None => self.store.active_profile_name().await,
        }
    }

    pub async fn active_profile(&self) -> Result<(String, Profile), FalcoriaError> {
        let name = self.profile_name().await?;
        let profile = self.store.load_profile(&name).await?;
        Ok((name, profile))
    }

    pub async fn ledger(&self) -> Result<LedgerConnector, FalcoriaError> {
        let (_, profile) = self.active_profile().await?;
        LedgerConnector::new(&profile.ledger_settings()?)
    }

    pub async fn tasker(&self) -> Result<TaskerConnector, FalcoriaError> {
        let (_, profile) = self.active_profile().await?;
        TaskerConnector::new(&profile.tasker_settings()?)
    }

    /// An explicit project ID, or the active profile's current project.
    pub async fn project_id(&self, explicit: Option<String>) -> Result<String, FalcoriaError> {
        if let Some(id) = explicit.filter(|id| !id.trim().is_empty()) {
            return Ok(id);
        }
        let (_, profile) = self.active_profile().await?;
        profile
            .current_project_id()
            .map(str::to_string)
            .ok_or(FalcoriaError::ProjectIdRequired)
    }

    /// Display label for a project, using the active profile's saved name
    /// when there is one.
    pub async fn project_label(&self, project_id: &str) -> String {
        match self.active_profile().await {
            Ok((_, profile)) => profile.project_label(project_id),
            Err(_) => project_id.to_string(),
        }
    }

    pub fn default_scan_config(&self) -> PathBuf {
        self.store.default_scan_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectRef;

    async fn context_with_profile(current: Option<&str>) -> (tempfile::TempDir, AppContext) {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path());
        let mut profile = Profile::new("https://ledger", "https://tasker", "tok");
        if let Some(id) = current {
            profile.remember_project(ProjectRef { name: "corp".into(), project_id: id.into() }, true);
        }
        store.save_profile("default", &profile).await.unwrap();
        (dir, AppContext::new(store, None))
    }

    #[tokio::test]
    async fn test_explicit_project_id_wins() {
        let (_dir, ctx) = context_with_profile(Some("saved")).await;
        assert_eq!(ctx.project_id(Some("given".into())).await.unwrap(), "given");
    }

    #[tokio::test]
    async fn test_falls_back_to_current_project() {
        let (_dir, ctx) = context_with_profile(Some("saved")).await;
        assert_eq!(ctx.project_id(None).await.unwrap(), "saved");
        assert_eq!(ctx.project_id(Some("  ".into())).await.unwrap(), "saved");
    }

    #[tokio::test]
    async fn test_no_project_anywhere() {
        let (_dir, ctx) = context_with_profile(None).await;
        assert!(matches!(ctx.project_id(None).await, Err(FalcoriaError::ProjectIdRequired)));
    }

    #[tokio::test]
    async fn test_profile_override() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::new(StateStore::new(dir.path()), Some("staging".into()));
        assert_eq!(ctx.profile_name().await.unwrap(), "staging");
        assert!(matches!(ctx.active_profile().await, Err(FalcoriaError::Profile(_))));
    }
}
