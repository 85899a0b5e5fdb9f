use async_trait::async_trait;
use reqwest::Method;
use tracing::info;

use crate::config::ScanRequest;
use crate::errors::FalcoriaError;
use crate::models::{RevokeResponse, ScanStartResponse, TaskSummary, WorkerIp, WorkersResponse};
use crate::status::StatusSource;
use super::base::{decode_json, BaseConnector, ConnectorSettings};
use super::ScanBackend;

fn task_path(project_id: &str, action: &str) -> String {
    format!("tasks/{}/{}", project_id, action)
}

/// Client for the Tasker scheduler (scan submission, status, workers).
pub struct TaskerConnector {
    base: BaseConnector,
}

impl TaskerConnector {
    pub fn new(settings: &ConnectorSettings) -> Result<Self, FalcoriaError> {
        Ok(Self { base: BaseConnector::new(settings)? })
    }

    pub async fn workers_ips(&self) -> Result<Vec<WorkerIp>, FalcoriaError> {
        let resp: WorkersResponse = self.base.get_json("workers/ips", &[]).await?;
        Ok(resp.into_worker_ips())
    }
}

#[async_trait]
impl StatusSource for TaskerConnector {
    async fn get_status(&self, project_id: &str) -> Result<TaskSummary, FalcoriaError> {
        self.base.get_json(&task_path(project_id, "status"), &[]).await
    }
}

#[async_trait]
impl ScanBackend for TaskerConnector {
    async fn submit_scan(
        &self,
        project_id: &str,
        request: &ScanRequest,
    ) -> Result<ScanStartResponse, FalcoriaError> {
        let body = serde_json::to_value(request)?;
        let outcome = self.base
            .send(Method::POST, &task_path(project_id, "run-nmap"), &[], Some(&body))
            .await;
        let resp: ScanStartResponse = decode_json(outcome).await?;
        info!(
            project_id,
            provided = resp.summary.provided,
            sent = resp.accepted_count(),
            rejected = resp.rejected_targets.len(),
            "Scan submitted"
        );
        Ok(resp)
    }

    async fn stop_scan(&self, project_id: &str) -> Result<RevokeResponse, FalcoriaError> {
        let resp: RevokeResponse = self.base.get_json(&task_path(project_id, "stop-nmap"), &[]).await?;
        info!(project_id, revoked = resp.revoked, "Stop requested");
        Ok(resp)
    }
}
