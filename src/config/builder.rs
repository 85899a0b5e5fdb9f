use std::path::Path;

use tracing::warn;

use crate::errors::FalcoriaError;
use super::nmap::NmapCommands;
use super::parser::load_scan_config;
use super::targets::{config_hosts, resolve_targets, TargetSources};
use super::types::{ImportMode, ScanRequest, MAX_HOST_LENGTH};

/// Load the config at `config_path`, resolve targets by precedence and apply
/// the optional import-mode override.
pub async fn build_scan_request(
    config_path: &Path,
    sources: &TargetSources,
    mode: Option<ImportMode>,
) -> Result<ScanRequest, FalcoriaError> {
    let config = load_scan_config(config_path).await?;
    assemble(config, sources, mode).await
}

/// Same as [`build_scan_request`] for an already loaded config.
pub async fn assemble(
    mut config: ScanRequest,
    sources: &TargetSources,
    mode: Option<ImportMode>,
) -> Result<ScanRequest, FalcoriaError> {
    let hosts = resolve_targets(sources, &config).await?;
    validate_hosts(&hosts)?;

    config.hosts = hosts;
    config.hosts_file = None;
    if let Some(mode) = mode {
        config.mode = mode;
    }

    log_bound_warnings(&config);
    Ok(config)
}

/// Render both command lines for a config file using its own hosts.
/// No target source is required; an empty host list renders without hosts.
pub async fn preview_commands(config_path: &Path) -> Result<NmapCommands, FalcoriaError> {
    let mut config = load_scan_config(config_path).await?;
    config.hosts = config_hosts(&config).await?;
    validate_hosts(&config.hosts)?;
    log_bound_warnings(&config);
    Ok(config.to_nmap_commands())
}

fn validate_hosts(hosts: &[String]) -> Result<(), FalcoriaError> {
    for (i, host) in hosts.iter().enumerate() {
        if host.len() > MAX_HOST_LENGTH {
            return Err(FalcoriaError::validation(
                format!("/hosts/{}", i),
                format!("host is {} characters, limit is {}", host.len(), MAX_HOST_LENGTH),
            ));
        }
    }
    Ok(())
}

fn log_bound_warnings(config: &ScanRequest) {
    for warning in config.bound_warnings() {
        warn!(%warning, "Out-of-order scan bounds passed through unchanged");
    }
}
