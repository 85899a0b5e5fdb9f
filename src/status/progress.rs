use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::models::TaskSummary;
use crate::printer;
use crate::utils::formatting::format_elapsed;
use super::poller::ProgressView;

/// Terminal spinner for the interactive status loop.
pub struct SpinnerView {
    project: String,
    bar: Option<ProgressBar>,
}

impl SpinnerView {
    pub fn new(project: impl Into<String>) -> Self {
        Self { project: project.into(), bar: None }
    }

    fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

fn status_line(summary: &TaskSummary, elapsed: Duration) -> String {
    format!(
        "Remaining: {} | Running: {} | Elapsed: {}",
        summary.active_or_queued,
        summary.running,
        format_elapsed(elapsed)
    )
}

impl ProgressView for SpinnerView {
    fn begin(&mut self, _summary: &TaskSummary) {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {prefix} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.set_prefix(format!("Scan status for project {}:", self.project));
        bar.enable_steady_tick(Duration::from_millis(120));
        self.bar = Some(bar);
    }

    fn update(&mut self, summary: &TaskSummary, elapsed: Duration) {
        if let Some(bar) = &self.bar {
            bar.set_message(status_line(summary, elapsed));
        }
    }

    fn finish(&mut self, summary: &TaskSummary, elapsed: Duration) {
        self.clear();
        printer::success(format!(
            "All scan tasks finished for project {}. {}",
            self.project,
            status_line(summary, elapsed)
        ));
    }

    fn stopped(&mut self, elapsed: Duration) {
        self.clear();
        printer::warning(format!(
            "Status tracking stopped after {}. Scan tasks keep running on the workers.",
            format_elapsed(elapsed)
        ));
    }

    fn abandon(&mut self) {
        self.clear();
    }
}
