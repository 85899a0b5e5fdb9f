use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::FalcoriaError;
use super::types::ScanRequest;

/// Target sources supplied on the command line, before precedence is applied.
#[derive(Debug, Clone, Default)]
pub struct TargetSources {
    pub hosts: Option<String>,
    pub targets_file: Option<PathBuf>,
    pub from_config: bool,
}

/// The single source chosen by precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
    Hosts(String),
    TargetsFile(PathBuf),
    Config,
}

impl TargetSources {
    /// `--hosts` beats `--targets-file` beats `--from-config`; nothing at all
    /// is `NoHostsProvided`. Only an empty `--hosts` string counts as absent.
    pub fn select(&self) -> Result<TargetSource, FalcoriaError> {
        if let Some(hosts) = self.hosts.as_ref().filter(|h| !h.is_empty()) {
            return Ok(TargetSource::Hosts(hosts.clone()));
        }
        if let Some(path) = &self.targets_file {
            return Ok(TargetSource::TargetsFile(path.clone()));
        }
        if self.from_config {
            return Ok(TargetSource::Config);
        }
        Err(FalcoriaError::NoHostsProvided)
    }
}

/// Split a comma-separated host list, trimming and dropping empty entries.
pub fn split_host_list(csv: &str) -> Vec<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split newline-delimited text into hosts, one per non-blank trimmed line.
pub fn split_host_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn read_host_file(path: &Path) -> Result<Vec<String>, FalcoriaError> {
    if !path.exists() {
        return Err(FalcoriaError::TargetsFileNotFound(path.display().to_string()));
    }
    let content = tokio::fs::read_to_string(path).await?;
    Ok(split_host_lines(&content))
}

/// Hosts declared by a loaded config: the inline `hosts` list, or, when that
/// is absent, the contents of its `hosts_file`.
pub async fn config_hosts(config: &ScanRequest) -> Result<Vec<String>, FalcoriaError> {
    if !config.hosts.is_empty() {
        return Ok(config.hosts.clone());
    }
    match &config.hosts_file {
        Some(path) => read_host_file(path).await,
        None => Ok(Vec::new()),
    }
}

/// Resolve the ordered target list. Input order is preserved and no
/// deduplication happens here.
pub async fn resolve_targets(
    sources: &TargetSources,
    config: &ScanRequest,
) -> Result<Vec<String>, FalcoriaError> {
    let source = sources.select()?;
    let hosts = match &source {
        TargetSource::Hosts(csv) => split_host_list(csv),
        TargetSource::TargetsFile(path) => read_host_file(path).await?,
        TargetSource::Config => config_hosts(config).await?,
    };

    if hosts.is_empty() {
        return Err(FalcoriaError::NoTargetsFound);
    }

    debug!(source = ?source, count = hosts.len(), "Resolved scan targets");
    Ok(hosts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_with_hosts(hosts: &[&str]) -> ScanRequest {
        ScanRequest {
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
            ..Default::default()
        }
    }

    fn write_targets(lines: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(lines.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_split_host_list() {
        assert_eq!(
            split_host_list(" 10.0.0.1, ,scanme.example ,,"),
            vec!["10.0.0.1", "scanme.example"]
        );
    }

    #[test]
    fn test_split_host_list_keeps_order_and_duplicates() {
        assert_eq!(split_host_list("b,a,b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_split_host_lines() {
        assert_eq!(
            split_host_lines("10.0.0.1\n\n  10.0.0.2  \n"),
            vec!["10.0.0.1", "10.0.0.2"]
        );
    }

    #[test]
    fn test_select_precedence() {
        let all = TargetSources {
            hosts: Some("a".into()),
            targets_file: Some(PathBuf::from("t.txt")),
            from_config: true,
        };
        assert_eq!(all.select().unwrap(), TargetSource::Hosts("a".into()));

        let file_and_config = TargetSources { hosts: None, ..all.clone() };
        assert_eq!(file_and_config.select().unwrap(), TargetSource::TargetsFile(PathBuf::from("t.txt")));

        let config_only = TargetSources { from_config: true, ..Default::default() };
        assert_eq!(config_only.select().unwrap(), TargetSource::Config);
    }

    #[test]
    fn test_blank_hosts_flag_still_wins() {
        let sources = TargetSources {
            hosts: Some("   ".into()),
            from_config: true,
            ..Default::default()
        };
        assert_eq!(sources.select().unwrap(), TargetSource::Hosts("   ".into()));
    }

    #[test]
    fn test_empty_hosts_flag_is_absent() {
        let sources = TargetSources {
            hosts: Some(String::new()),
            from_config: true,
            ..Default::default()
        };
        assert_eq!(sources.select().unwrap(), TargetSource::Config);
    }

    #[tokio::test]
    async fn test_blank_hosts_flag_never_scans_config_hosts() {
        let file = write_targets("10.0.0.1\n");
        let sources = TargetSources {
            hosts: Some(" , ".into()),
            targets_file: Some(file.path().to_path_buf()),
            from_config: true,
        };
        let config = config_with_hosts(&["192.168.1.1"]);
        let err = resolve_targets(&sources, &config).await.unwrap_err();
        assert!(matches!(err, FalcoriaError::NoTargetsFound));
    }

    #[test]
    fn test_no_sources() {
        let err = TargetSources::default().select().unwrap_err();
        assert!(matches!(err, FalcoriaError::NoHostsProvided));
    }

    #[tokio::test]
    async fn test_hosts_override_config() {
        let sources = TargetSources {
            hosts: Some("10.0.0.9, 10.0.0.8".into()),
            from_config: true,
            ..Default::default()
        };
        let config = config_with_hosts(&["192.168.1.1"]);
        let hosts = resolve_targets(&sources, &config).await.unwrap();
        assert_eq!(hosts, vec!["10.0.0.9", "10.0.0.8"]);
    }

    #[tokio::test]
    async fn test_targets_file_lines() {
        let file = write_targets("10.0.0.1\n\n  10.0.0.2  \n");
        let sources = TargetSources {
            targets_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let hosts = resolve_targets(&sources, &ScanRequest::default()).await.unwrap();
        assert_eq!(hosts, vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[tokio::test]
    async fn test_targets_file_missing() {
        let sources = TargetSources {
            targets_file: Some(PathBuf::from("/nonexistent/falcoria/targets.txt")),
            ..Default::default()
        };
        let err = resolve_targets(&sources, &ScanRequest::default()).await.unwrap_err();
        assert!(matches!(err, FalcoriaError::TargetsFileNotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_targets_file() {
        let file = write_targets("\n   \n");
        let sources = TargetSources {
            targets_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let err = resolve_targets(&sources, &ScanRequest::default()).await.unwrap_err();
        assert!(matches!(err, FalcoriaError::NoTargetsFound));
    }

    #[tokio::test]
    async fn test_from_config_empty_hosts() {
        let sources = TargetSources { from_config: true, ..Default::default() };
        let err = resolve_targets(&sources, &config_with_hosts(&[])).await.unwrap_err();
        assert!(matches!(err, FalcoriaError::NoTargetsFound));
    }

    #[tokio::test]
    async fn test_from_config_hosts_verbatim() {
        let sources = TargetSources { from_config: true, ..Default::default() };
        let config = config_with_hosts(&["b.example", "a.example", "b.example"]);
        let hosts = resolve_targets(&sources, &config).await.unwrap();
        assert_eq!(hosts, vec!["b.example", "a.example", "b.example"]);
    }

    #[tokio::test]
    async fn test_from_config_reads_hosts_file() {
        let file = write_targets("10.1.1.1\n10.1.1.2\n");
        let config = ScanRequest {
            hosts_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let sources = TargetSources { from_config: true, ..Default::default() };
        let hosts = resolve_targets(&sources, &config).await.unwrap();
        assert_eq!(hosts, vec!["10.1.1.1", "10.1.1.2"]);
    }

    #[tokio::test]
    async fn test_from_config_empty_hosts_file() {
        let file = write_targets("\n");
        let config = ScanRequest {
            hosts_file: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let sources = TargetSources { from_config: true, ..Default::default() };
        let err = resolve_targets(&sources, &config).await.unwrap_err();
        assert!(matches!(err, FalcoriaError::NoTargetsFound));
    }

    #[tokio::test]
    async fn test_hosts_flag_ignores_missing_config_hosts_file() {
        let config = ScanRequest {
            hosts_file: Some(PathBuf::from("/nonexistent/falcoria/hosts.txt")),
            ..Default::default()
        };
        let sources = TargetSources { hosts: Some("10.0.0.1".into()), ..Default::default() };
        assert_eq!(resolve_targets(&sources, &config).await.unwrap(), vec!["10.0.0.1"]);
    }
}
