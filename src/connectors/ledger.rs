use std::path::Path;

use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::config::ImportMode;
use crate::errors::FalcoriaError;
use crate::models::{Ip, Project, ReportFormat};
use super::base::{decode_json, BaseConnector, ConnectorSettings};

/// Paging and filtering for IP listings.
#[derive(Debug, Clone)]
pub struct IpQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub has_ports: bool,
}

impl Default for IpQuery {
    fn default() -> Self {
        Self { skip: None, limit: None, has_ports: true }
    }
}

impl IpQuery {
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(skip) = self.skip {
            params.push(("skip", skip.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        params.push(("has_ports", self.has_ports.to_string()));
        params
    }
}

fn project_path(project_id: &str) -> String {
    format!("projects/{}", project_id)
}

fn ips_path(project_id: &str) -> String {
    format!("projects/{}/ips", project_id)
}

fn ip_path(project_id: &str, ip: &str) -> String {
    format!("projects/{}/ips/{}", project_id, ip)
}

/// Client for the ScanLedger service (projects and IP inventory).
pub struct LedgerConnector {
    base: BaseConnector,
}

impl LedgerConnector {
    pub fn new(settings: &ConnectorSettings) -> Result<Self, FalcoriaError> {
        Ok(Self { base: BaseConnector::new(settings)? })
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, FalcoriaError> {
        self.base.get_json("projects", &[]).await
    }

    pub async fn create_project(&self, name: &str) -> Result<Project, FalcoriaError> {
        let body = json!({ "project_name": name });
        let project: Project =
            decode_json(self.base.send(Method::POST, "projects", &[], Some(&body)).await).await?;
        info!(project_id = %project.id, name, "Project created");
        Ok(project)
    }

    /// `None` when the ledger reports the project as missing.
    pub async fn get_project(&self, project_id: &str) -> Result<Option<Project>, FalcoriaError> {
        let outcome = self.base.send(Method::GET, &project_path(project_id), &[], None).await;
        if outcome.is_not_found() {
            return Ok(None);
        }
        decode_json(outcome).await.map(Some)
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<(), FalcoriaError> {
        self.base.send(Method::DELETE, &project_path(project_id), &[], None).await
            .into_result()?;
        info!(project_id, "Project deleted");
        Ok(())
    }

    pub async fn list_ips(&self, project_id: &str, query: &IpQuery) -> Result<Vec<Ip>, FalcoriaError> {
        self.base.get_json(&ips_path(project_id), &query.params()).await
    }

    pub async fn create_ips(
        &self,
        project_id: &str,
        ips: &[String],
        mode: ImportMode,
    ) -> Result<Vec<Ip>, FalcoriaError> {
        let new_ips: Vec<_> = ips.iter().map(|ip| json!({ "ip": ip })).collect();
        let body = json!({ "new_ips": new_ips, "mode": mode.as_str() });
        decode_json(self.base.send(Method::POST, &ips_path(project_id), &[], Some(&body)).await).await
    }

    pub async fn import_ips(
        &self,
        project_id: &str,
        file: &Path,
        mode: ImportMode,
    ) -> Result<Vec<Ip>, FalcoriaError> {
        if !file.exists() {
            return Err(FalcoriaError::InvalidArgument(format!("File not found: {}", file.display())));
        }
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "import".to_string());
        let endpoint = format!("{}/import", ips_path(project_id));
        let query = [("mode", mode.as_str().to_string())];
        decode_json(self.base.upload(&endpoint, &query, &file_name, bytes).await).await
    }

    pub async fn download_ips(
        &self,
        project_id: &str,
        query: &IpQuery,
        format: ReportFormat,
    ) -> Result<Vec<u8>, FalcoriaError> {
        let mut params = query.params();
        params.push(("format", format.as_str().to_string()));
        let endpoint = format!("{}/download", ips_path(project_id));
        let resp = self.base.send(Method::GET, &endpoint, &params, None).await.into_result()?;
        let bytes = resp.bytes().await
            .map_err(|e| FalcoriaError::Network(format!("failed to read report: {}", e)))?;
        Ok(bytes.to_vec())
    }

    pub async fn get_ip(&self, project_id: &str, ip: &str) -> Result<Option<Ip>, FalcoriaError> {
        let outcome = self.base.send(Method::GET, &ip_path(project_id, ip), &[], None).await;
        if outcome.is_not_found() {
            return Ok(None);
        }
        decode_json(outcome).await.map(Some)
    }

    pub async fn delete_ip(&self, project_id: &str, ip: &str) -> Result<(), FalcoriaError> {
        self.base.send(Method::DELETE, &ip_path(project_id, ip), &[], None).await
            .into_result()
            .map(|_| ())
    }

    pub async fn delete_ips(&self, project_id: &str) -> Result<(), FalcoriaError> {
        self.base.send(Method::DELETE, &ips_path(project_id), &[], None).await
            .into_result()
            .map(|_| ())
    }

    pub async fn project_exists(&self, project_id: &str) -> Result<bool, FalcoriaError> {
        Ok(self.get_project(project_id).await?.is_some())
    }
}
