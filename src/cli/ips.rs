use std::path::PathBuf;

use crate::cli::commands::{IpArgs, IpsAddArgs, IpsCommand, IpsDownloadArgs, IpsImportArgs, IpsListArgs};
use crate::connectors::IpQuery;
use crate::context::AppContext;
use crate::errors::FalcoriaError;
use crate::models::ReportFormat;
use crate::printer;

pub async fn handle_ips(ctx: &AppContext, command: IpsCommand) -> Result<(), FalcoriaError> {
    match command {
        IpsCommand::List(args) => list(ctx, args).await,
        IpsCommand::Add(args) => add(ctx, args).await,
        IpsCommand::Import(args) => import(ctx, args).await,
        IpsCommand::Download(args) => download(ctx, args).await,
        IpsCommand::Get(args) => get(ctx, args).await,
        IpsCommand::Delete(args) => delete(ctx, args).await,
    }
}

async fn list(ctx: &AppContext, args: IpsListArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project.project_id).await?;
    let query = IpQuery { skip: args.skip, limit: args.limit, has_ports: !args.all };
    let ips = ctx.ledger().await?.list_ips(&project_id, &query).await?;

    let label = ctx.project_label(&project_id).await;
    if ips.is_empty() {
        printer::warning(format!("No IPs found in project {}.", label));
    } else {
        printer::success(format!("Fetched {} IP(s) for project {}.", ips.len(), label));
        printer::blank();
        printer::grouped_ips(&ips);
    }
    Ok(())
}

async fn add(ctx: &AppContext, args: IpsAddArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project.project_id).await?;
    let created = ctx.ledger().await?.create_ips(&project_id, &args.ips, args.mode).await?;
    printer::success(format!(
        "Added {} IP(s) to project {}.",
        created.len(),
        ctx.project_label(&project_id).await
    ));
    Ok(())
}

async fn import(ctx: &AppContext, args: IpsImportArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project.project_id).await?;
    let imported = ctx.ledger().await?.import_ips(&project_id, &args.file, args.mode).await?;
    let label = ctx.project_label(&project_id).await;
    if imported.is_empty() {
        printer::warning(format!("No new IPs imported for project {}.", label));
    } else {
        printer::success(format!("Imported {} IP(s) to project {} ({} mode).", imported.len(), label, args.mode));
    }
    Ok(())
}

/// Default download target: `<reports>/<project>_ips.<format>`.
fn default_report_path(reports_dir: PathBuf, project_id: &str, format: ReportFormat) -> PathBuf {
    reports_dir.join(format!("{}_ips.{}", project_id, format.as_str()))
}

async fn download(ctx: &AppContext, args: IpsDownloadArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project.project_id).await?;
    let query = IpQuery { has_ports: !args.all, ..Default::default() };
    let bytes = ctx.ledger().await?.download_ips(&project_id, &query, args.format).await?;

    let out = args
        .out
        .unwrap_or_else(|| default_report_path(ctx.store.reports_dir(), &project_id, args.format));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&out, &bytes).await?;

    printer::success(format!(
        "Downloaded IPs report for project {}.",
        ctx.project_label(&project_id).await
    ));
    printer::plain(format!("Saved to: {}", out.display()));
    Ok(())
}

async fn get(ctx: &AppContext, args: IpArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project.project_id).await?;
    let ledger = ctx.ledger().await?;

    let ips = match &args.ip {
        Some(ip) => match ledger.get_ip(&project_id, ip).await? {
            Some(found) => vec![found],
            None => {
                return Err(FalcoriaError::InvalidArgument(format!(
                    "IP '{}' not found in project '{}'.",
                    ip, project_id
                )))
            }
        },
        None => ledger.list_ips(&project_id, &IpQuery { has_ports: false, ..Default::default() }).await?,
    };

    if ips.is_empty() {
        printer::warning(format!("No IPs found in project {}.", ctx.project_label(&project_id).await));
    } else {
        printer::grouped_ips(&ips);
    }
    Ok(())
}

async fn delete(ctx: &AppContext, args: IpArgs) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(args.project.project_id).await?;
    let label = ctx.project_label(&project_id).await;
    let ledger = ctx.ledger().await?;

    match &args.ip {
        Some(ip) => {
            ledger.delete_ip(&project_id, ip).await?;
            printer::success(format!("Deleted IP '{}' from project {}.", ip, label));
        }
        None => {
            let question = format!("Delete ALL IPs from project {}?", label);
            if !args.yes && !printer::confirm(&question)? {
                printer::plain("Aborted.");
                return Ok(());
            }
            ledger.delete_ips(&project_id).await?;
            printer::success(format!("Deleted all IPs for project {}.", label));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_report_path() {
        let path = default_report_path(PathBuf::from("/data/reports"), "p1", ReportFormat::Json);
        assert_eq!(path, PathBuf::from("/data/reports/p1_ips.json"));
        let xml = default_report_path(PathBuf::from("reports"), "p1", ReportFormat::default());
        assert_eq!(xml, PathBuf::from("reports/p1_ips.xml"));
    }
}
