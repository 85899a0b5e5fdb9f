pub mod poller;
pub mod progress;

use async_trait::async_trait;

use crate::errors::FalcoriaError;
use crate::models::TaskSummary;

pub use poller::{PollOutcome, PollState, ProgressView, StatusPoller};
pub use progress::SpinnerView;

/// Read-only view of a project's task queue.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn get_status(&self, project_id: &str) -> Result<TaskSummary, FalcoriaError>;
}
