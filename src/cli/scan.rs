use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::commands::{ProjectIdArgs, ScanCommand, ScanPreviewArgs, ScanStartArgs, ScanStatusArgs};
use crate::config::{
    build_scan_request, open_ports_option_docs, preview_commands, service_option_docs, ScanRequest, TargetSources,
};
use crate::connectors::ScanBackend;
use crate::context::AppContext;
use crate::errors::FalcoriaError;
use crate::models::{ScanStartResponse, StopStatus};
use crate::printer;
use crate::status::{PollOutcome, SpinnerView, StatusPoller, StatusSource};

pub async fn handle_scan(ctx: &AppContext, command: ScanCommand) -> Result<(), FalcoriaError> {
    match command {
        ScanCommand::Start(args) => start(ctx, args).await,
        ScanCommand::Status(args) => status(ctx, args).await,
        ScanCommand::Stop(args) => stop(ctx, args).await,
        ScanCommand::Preview(args) => preview(ctx, args).await,
        ScanCommand::Options => {
            options();
            Ok(())
        }
    }
}

async fn start(ctx: &AppContext, args: ScanStartArgs) -> Result<(), FalcoriaError> {
    let config_path = args.config.unwrap_or_else(|| ctx.default_scan_config());
    let sources = TargetSources {
        hosts: args.hosts,
        targets_file: args.targets_file,
        from_config: args.from_config,
    };
    // Fail on a missing target source before touching the config file.
    sources.select()?;

    let request = build_scan_request(&config_path, &sources, args.mode).await?;
    let project_id = ctx.project_id(args.project_id).await?;
    let tasker = ctx.tasker().await?;

    let response = submit(&tasker, &project_id, &request).await?;
    report_start(&ctx.project_label(&project_id).await, &request, &config_path, &response);
    ensure_accepted(&response)
}

/// Submit a resolved request; backend rejections of individual targets are
/// part of the response, not errors.
pub async fn submit<B: ScanBackend + ?Sized>(
    backend: &B,
    project_id: &str,
    request: &ScanRequest,
) -> Result<ScanStartResponse, FalcoriaError> {
    info!(project_id, hosts = request.hosts.len(), mode = %request.mode, "Submitting scan");
    backend.submit_scan(project_id, request).await
}

/// A start that queued nothing is a failure even though the call succeeded.
pub fn ensure_accepted(response: &ScanStartResponse) -> Result<(), FalcoriaError> {
    if response.accepted_count() == 0 {
        Err(FalcoriaError::NothingAccepted)
    } else {
        Ok(())
    }
}

fn report_start(project: &str, request: &ScanRequest, config_path: &Path, response: &ScanStartResponse) {
    if response.accepted_count() > 0 {
        printer::success(format!("Scan initiated for project: {}.", project));
    } else {
        printer::warning(format!("No targets were sent to scan for project: {}.", project));
    }
    printer::scan_settings(request, config_path);
    printer::scan_summary(&response.summary);
    printer::accepted_targets(&response.accepted_targets);
    printer::rejected_targets(&response.rejected_targets);
    printer::blank();
}

async fn status(ctx: &AppContext, args: ScanStatusArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project_id).await?;
    let label = ctx.project_label(&project_id).await;
    let tasker = ctx.tasker().await?;

    if !args.interactive {
        let summary = tasker.get_status(&project_id).await?;
        printer::success(format!("Scan status for project {} fetched successfully.", label));
        printer::task_summary(&summary, Utc::now());
        printer::blank();
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let watcher = spawn_interrupt_watcher(cancel.clone());

    let mut view = SpinnerView::new(label.clone());
    let mut poller = StatusPoller::new(&tasker, project_id.as_str(), Duration::from_secs(args.refresh_time));
    let outcome = poller.run(&mut view, &cancel).await;
    watcher.abort();

    match outcome? {
        PollOutcome::NoTasks => printer::warning(format!("No tasks found for project {}.", label)),
        PollOutcome::Completed { .. } => printer::success(format!("Scan completed for project {}.", label)),
        PollOutcome::Stopped { .. } => {}
    }
    printer::blank();
    Ok(())
}

/// Cancel `token` on the first Ctrl-C.
fn spawn_interrupt_watcher(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}

async fn stop(ctx: &AppContext, args: ProjectIdArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project_id).await?;
    let label = ctx.project_label(&project_id).await;
    let tasker = ctx.tasker().await?;

    let result = tasker.stop_scan(&project_id).await?;
    match result.status {
        StopStatus::Stopped => {
            printer::success(format!("Scan stopped successfully for project: {}.", label));
            printer::plain(format!("Revoked {} tasks.", result.revoked));
        }
        StopStatus::NoTasks => printer::warning(format!("No tasks found for project {}.", label)),
    }
    printer::blank();
    Ok(())
}

async fn preview(ctx: &AppContext, args: ScanPreviewArgs) -> Result<(), FalcoriaError> {
    let config_path = args.config.unwrap_or_else(|| ctx.default_scan_config());
    let commands = preview_commands(&config_path).await?;

    printer::plain("Open ports command:");
    printer::plain(&commands.open_ports_command);
    printer::blank();
    printer::plain("Service discovery command:");
    printer::plain(&commands.service_command);
    printer::blank();
    Ok(())
}

fn options() {
    printer::success("Available Scan Options:");
    printer::option_docs("Open ports command:", &open_ports_option_docs());
    printer::option_docs("Service discovery command:", &service_option_docs());
}
