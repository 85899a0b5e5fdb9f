use tracing::info;

use crate::cli::commands::ProjectCommand;
use crate::cli::ips::handle_ips;
use crate::context::AppContext;
use crate::errors::FalcoriaError;
use crate::printer;

pub async fn handle_project(ctx: &AppContext, command: ProjectCommand) -> Result<(), FalcoriaError> {
    match command {
        ProjectCommand::List => list(ctx).await,
        ProjectCommand::Create { name } => create(ctx, &name).await,
        ProjectCommand::Get { project_id } => get(ctx, project_id).await,
        ProjectCommand::Delete { project_id } => delete(ctx, &project_id).await,
        ProjectCommand::SetActive { project_id } => set_active(ctx, &project_id).await,
        ProjectCommand::Ips(command) => handle_ips(ctx, command).await,
    }
}

async fn list(ctx: &AppContext) -> Result<(), FalcoriaError> {
    let projects = ctx.ledger().await?.list_projects().await?;
    if projects.is_empty() {
        printer::warning("No projects found.");
    } else {
        printer::projects(&projects);
    }
    printer::blank();
    Ok(())
}

async fn create(ctx: &AppContext, name: &str) -> Result<(), FalcoriaError> {
    let project = ctx.ledger().await?.create_project(name).await?;
    printer::success(format!("Project '{}' created successfully ({}).", project.project_name, project.id));
    printer::project_details(&project);

    let (profile_name, mut profile) = ctx.active_profile().await?;
    let project_ref = project.to_ref();

    let make_current = match profile.current_project.clone() {
        None => {
            printer::plain("First project saved.");
            true
        }
        Some(existing) => {
            printer::plain(format!("Existing saved project: {}.", existing));
            let replace = printer::confirm("Do you want to replace the saved project?")?;
            printer::plain(if replace { "Saved project updated." } else { "Saved project not updated." });
            replace
        }
    };
    profile.remember_project(project_ref, make_current);
    ctx.store.save_profile(&profile_name, &profile).await?;
    printer::blank();
    Ok(())
}

async fn get(ctx: &AppContext, project_id: Option<String>) -> Result<(), FalcoriaError> {
    let project_id = ctx.project_id(project_id).await?;
    match ctx.ledger().await?.get_project(&project_id).await? {
        Some(project) => {
            printer::success(format!("Retrieved project '{}'.", project.project_name));
            printer::project_details(&project);
        }
        None => {
            return Err(FalcoriaError::InvalidArgument(format!("Project '{}' not found.", project_id)));
        }
    }
    printer::blank();
    Ok(())
}

async fn delete(ctx: &AppContext, project_id: &str) -> Result<(), FalcoriaError> {
    ctx.ledger().await?.delete_project(project_id).await?;
    printer::success(format!("Project '{}' deleted.", project_id));

    let (profile_name, mut profile) = ctx.active_profile().await?;
    if profile.forget_project(project_id) {
        ctx.store.save_profile(&profile_name, &profile).await?;
        info!(project_id, profile = %profile_name, "Removed project from profile");
    }
    Ok(())
}

async fn set_active(ctx: &AppContext, project_id: &str) -> Result<(), FalcoriaError> {
    let project = ctx
        .ledger()
        .await?
        .get_project(project_id)
        .await?
        .ok_or_else(|| FalcoriaError::InvalidArgument(format!("Project '{}' not found.", project_id)))?;

    let (profile_name, mut profile) = ctx.active_profile().await?;
    profile.remember_project(project.to_ref(), true);
    ctx.store.save_profile(&profile_name, &profile).await?;

    printer::success(format!(
        "Default project set to {} in profile '{}'.",
        project.to_ref(),
        profile_name
    ));
    printer::blank();
    Ok(())
}
