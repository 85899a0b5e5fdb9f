pub mod base;
pub mod ledger;
pub mod tasker;

use async_trait::async_trait;

use crate::config::ScanRequest;
use crate::errors::FalcoriaError;
use crate::models::{RevokeResponse, ScanStartResponse};
use crate::status::StatusSource;

pub use base::{ApiOutcome, BaseConnector, ConnectorSettings};
pub use ledger::{IpQuery, LedgerConnector};
pub use tasker::TaskerConnector;

/// Scan lifecycle operations on the scheduler.
#[async_trait]
pub trait ScanBackend: StatusSource {
    /// Queue a scan of the request's hosts for a project.
    async fn submit_scan(
        &self,
        project_id: &str,
        request: &ScanRequest,
    ) -> Result<ScanStartResponse, FalcoriaError>;

    /// Revoke every active or queued task of a project.
    async fn stop_scan(&self, project_id: &str) -> Result<RevokeResponse, FalcoriaError>;
}
