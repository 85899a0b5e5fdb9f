use std::path::Path;

use crate::cli::commands::ProfileCommand;
use crate::context::AppContext;
use crate::errors::FalcoriaError;
use crate::printer;
use crate::store::Profile;

pub async fn handle_profile(ctx: &AppContext, command: ProfileCommand) -> Result<(), FalcoriaError> {
    match command {
        ProfileCommand::List => list(ctx).await,
        ProfileCommand::Show { name } => show(ctx, name).await,
        ProfileCommand::Create { name, scanledger_base_url, tasker_base_url, token } => {
            create(ctx, &name, Profile::new(&scanledger_base_url, &tasker_base_url, &token)).await
        }
        ProfileCommand::Delete { name } => {
            ctx.store.delete_profile(&name).await?;
            printer::success(format!("Profile '{}' deleted.", name));
            Ok(())
        }
        ProfileCommand::SetActive { name } => {
            ctx.store.load_profile(&name).await?;
            ctx.store.set_active_profile(&name).await?;
            printer::success(format!("Active profile set to: {}.", name));
            Ok(())
        }
        ProfileCommand::ShowActive => {
            let name = ctx.profile_name().await?;
            printer::success(format!("Active profile: {}.", name));
            Ok(())
        }
        ProfileCommand::Set { name, field, value } => set(ctx, &name, &field, &value).await,
        ProfileCommand::Validate { file } => validate(&file).await,
    }
}

async fn list(ctx: &AppContext) -> Result<(), FalcoriaError> {
    let active = ctx.profile_name().await?;
    printer::header("Available profiles:");
    for name in ctx.store.list_profiles().await? {
        let marker = if name == active { " (active)" } else { "" };
        printer::plain(format!("- {}{}", name, marker));
    }
    Ok(())
}

async fn show(ctx: &AppContext, name: Option<String>) -> Result<(), FalcoriaError> {
    let name = match name {
        Some(name) => name,
        None => ctx.profile_name().await?,
    };
    let profile = ctx.store.load_profile(&name).await?;
    printer::header(format!("Profile: {}", name));
    printer::blank();
    printer::column_table(
        &["field", "value"],
        profile.display_rows().into_iter().map(|(field, value)| vec![field.to_string(), value]),
    );
    printer::blank();
    Ok(())
}

async fn create(ctx: &AppContext, name: &str, profile: Profile) -> Result<(), FalcoriaError> {
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(FalcoriaError::Profile(format!(
            "Profile '{}' is missing required fields: {}",
            name,
            missing.join(", ")
        )));
    }
    if ctx.store.profile_exists(name).await? {
        printer::warning(format!("Overwriting existing profile '{}'.", name));
    }
    ctx.store.save_profile(name, &profile).await?;
    printer::success(format!("Profile '{}' created.", name));
    Ok(())
}

async fn set(ctx: &AppContext, name: &str, field: &str, value: &str) -> Result<(), FalcoriaError> {
    let mut profile = ctx.store.load_profile(name).await?;
    profile.set_field(field, value)?;
    ctx.store.save_profile(name, &profile).await?;
    printer::success(format!("Field '{}' updated in profile '{}'.", field, name));
    Ok(())
}

/// Check a profile file that is not necessarily in the data directory.
pub async fn validate(file: &Path) -> Result<(), FalcoriaError> {
    if !file.exists() {
        return Err(FalcoriaError::Profile(format!("Profile file not found: {}", file.display())));
    }
    let content = tokio::fs::read_to_string(file).await?;
    let profile = Profile::from_yaml(&content)
        .map_err(|e| FalcoriaError::Profile(format!("Failed to load profile '{}': {}", file.display(), e)))?;

    let display_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(FalcoriaError::Profile(format!(
            "Profile '{}' is missing required fields: {}",
            display_name,
            missing.join(", ")
        )));
    }
    printer::success(format!("Profile '{}' is valid.", display_name));
    Ok(())
}
