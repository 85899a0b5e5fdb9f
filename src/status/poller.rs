use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::errors::FalcoriaError;
use crate::models::TaskSummary;
use super::StatusSource;

pub const DEFAULT_REFRESH_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Initializing,
    Polling,
    Draining,
    Done,
    Error,
}

/// How a poll loop ended. Query failures are returned as `Err` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The queue was already empty on the first query.
    NoTasks,
    Completed { elapsed: Duration, queries: u32 },
    Stopped { elapsed: Duration },
}

/// Live display driven by the poller.
pub trait ProgressView {
    /// First frame, shown only when there is something to wait for.
    fn begin(&mut self, summary: &TaskSummary);
    fn update(&mut self, summary: &TaskSummary, elapsed: Duration);
    /// Tear down the live display and print the final summary line.
    fn finish(&mut self, summary: &TaskSummary, elapsed: Duration);
    fn stopped(&mut self, elapsed: Duration);
    /// Tear down the live display after a failed query.
    fn abandon(&mut self);
}

/// Polls a project's task queue on a fixed interval until it drains,
/// the operator cancels, or a query fails.
pub struct StatusPoller<'a, S: StatusSource + ?Sized> {
    source: &'a S,
    project_id: String,
    interval: Duration,
    state: PollState,
}

impl<'a, S: StatusSource + ?Sized> StatusPoller<'a, S> {
    pub fn new(source: &'a S, project_id: impl Into<String>, interval: Duration) -> Self {
        Self {
            source,
            project_id: project_id.into(),
            interval,
            state: PollState::Initializing,
        }
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub async fn run(
        &mut self,
        view: &mut dyn ProgressView,
        cancel: &CancellationToken,
    ) -> Result<PollOutcome, FalcoriaError> {
        self.state = PollState::Initializing;
        let started = Instant::now();
        let mut queries = 0u32;

        let first = match self.query(cancel).await {
            Some(result) => {
                queries += 1;
                self.check(result, view, false)?
            }
            None => {
                self.state = PollState::Done;
                return Ok(PollOutcome::Stopped { elapsed: started.elapsed() });
            }
        };

        if first.active_or_queued == 0 {
            debug!(project_id = %self.project_id, "Queue already empty");
            self.state = PollState::Done;
            return Ok(PollOutcome::NoTasks);
        }

        view.begin(&first);
        view.update(&first, started.elapsed());
        self.state = PollState::Polling;

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Ok(self.stop(view, started)),
                _ = tokio::time::sleep(self.interval) => {}
            }

            let summary = match self.query(cancel).await {
                Some(result) => {
                    queries += 1;
                    self.check(result, view, true)?
                }
                None => return Ok(self.stop(view, started)),
            };
            let elapsed = started.elapsed();
            debug!(
                project_id = %self.project_id,
                remaining = summary.active_or_queued,
                running = summary.running,
                "Status polled"
            );

            if summary.active_or_queued == 0 {
                self.state = PollState::Draining;
                view.finish(&summary, elapsed);
                self.state = PollState::Done;
                info!(project_id = %self.project_id, queries, "Task queue drained");
                return Ok(PollOutcome::Completed { elapsed, queries });
            }
            view.update(&summary, elapsed);
        }
    }

    /// `None` when cancelled while the query was in flight.
    async fn query(&self, cancel: &CancellationToken) -> Option<Result<TaskSummary, FalcoriaError>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = self.source.get_status(&self.project_id) => Some(result),
        }
    }

    fn check(
        &mut self,
        result: Result<TaskSummary, FalcoriaError>,
        view: &mut dyn ProgressView,
        live: bool,
    ) -> Result<TaskSummary, FalcoriaError> {
        result.inspect_err(|_| {
            self.state = PollState::Error;
            if live {
                view.abandon();
            }
        })
    }

    fn stop(&mut self, view: &mut dyn ProgressView, started: Instant) -> PollOutcome {
        let elapsed = started.elapsed();
        view.stopped(elapsed);
        self.state = PollState::Done;
        info!(project_id = %self.project_id, "Status tracking stopped by operator");
        PollOutcome::Stopped { elapsed }
    }
}
