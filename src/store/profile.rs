use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::credentials::{mask_secret, resolve_credential};
use crate::connectors::ConnectorSettings;
use crate::errors::{FalcoriaError, RetryConfig};
use crate::models::ProjectRef;

/// Fields `profile set` accepts.
pub const SETTABLE_FIELDS: &[&str] = &[
    "scanledger_base_url",
    "tasker_base_url",
    "token",
    "current_project",
    "request_timeout_secs",
    "max_retries",
    "retry_delay_secs",
    "verify_tls",
];

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_secs() -> u64 {
    2
}

/// Backend endpoints, credentials and remembered projects for one environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub scanledger_base_url: String,
    pub tasker_base_url: String,
    /// Literal token or `$ENV_VAR` reference.
    pub token: String,
    #[serde(default)]
    pub projects: Vec<ProjectRef>,
    #[serde(default)]
    pub current_project: Option<ProjectRef>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_delay_secs")]
    pub retry_delay_secs: u64,
    #[serde(default)]
    pub verify_tls: bool,
}

impl Profile {
    pub fn new(scanledger_base_url: &str, tasker_base_url: &str, token: &str) -> Self {
        Self {
            scanledger_base_url: scanledger_base_url.to_string(),
            tasker_base_url: tasker_base_url.to_string(),
            token: token.to_string(),
            projects: Vec::new(),
            current_project: None,
            request_timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_secs: default_retry_delay_secs(),
            verify_tls: false,
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, FalcoriaError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Required fields that are blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("scanledger_base_url", &self.scanledger_base_url),
            ("tasker_base_url", &self.tasker_base_url),
            ("token", &self.token),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn current_project_id(&self) -> Option<&str> {
        self.current_project.as_ref().map(|p| p.project_id.as_str())
    }

    /// `'name' (id)` when the project is saved in this profile, else the bare ID.
    pub fn project_label(&self, project_id: &str) -> String {
        self.projects
            .iter()
            .chain(self.current_project.iter())
            .find(|p| p.project_id == project_id)
            .map(ToString::to_string)
            .unwrap_or_else(|| project_id.to_string())
    }

    /// Add a project to the saved list (replacing an entry with the same ID)
    /// and optionally make it current.
    pub fn remember_project(&mut self, project: ProjectRef, make_current: bool) {
        self.projects.retain(|p| p.project_id != project.project_id);
        self.projects.push(project.clone());
        if make_current {
            self.current_project = Some(project);
        }
    }

    /// Drop a project from the saved list and clear it if current.
    /// Returns whether anything changed.
    pub fn forget_project(&mut self, project_id: &str) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.project_id != project_id);
        let mut changed = self.projects.len() != before;
        if self.current_project_id() == Some(project_id) {
            self.current_project = None;
            changed = true;
        }
        changed
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), FalcoriaError> {
        match field {
            "scanledger_base_url" => self.scanledger_base_url = value.to_string(),
            "tasker_base_url" => self.tasker_base_url = value.to_string(),
            "token" => self.token = value.to_string(),
            "current_project" => {
                self.current_project = match value.trim() {
                    "" | "none" | "null" => None,
                    id => Some(
                        self.projects
                            .iter()
                            .find(|p| p.project_id == id)
                            .cloned()
                            .unwrap_or_else(|| ProjectRef { name: id.to_string(), project_id: id.to_string() }),
                    ),
                }
            }
            "request_timeout_secs" => self.request_timeout_secs = parse_number(field, value)?,
            "max_retries" => self.max_retries = parse_number(field, value)?,
            "retry_delay_secs" => self.retry_delay_secs = parse_number(field, value)?,
            "verify_tls" => {
                self.verify_tls = matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
            }
            _ => {
                return Err(FalcoriaError::Profile(format!(
                    "Invalid field '{}'. Allowed fields: {}",
                    field,
                    SETTABLE_FIELDS.join(", ")
                )))
            }
        }
        Ok(())
    }

    fn settings_for(&self, base_url: &str) -> Result<ConnectorSettings, FalcoriaError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(FalcoriaError::Profile(format!(
                "Missing or blank required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(ConnectorSettings {
            base_url: base_url.to_string(),
            token: resolve_credential(&self.token)?,
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            retry: RetryConfig::new(self.max_retries, Duration::from_secs(self.retry_delay_secs)),
            verify_tls: self.verify_tls,
        })
    }

    pub fn ledger_settings(&self) -> Result<ConnectorSettings, FalcoriaError> {
        self.settings_for(&self.scanledger_base_url)
    }

    pub fn tasker_settings(&self) -> Result<ConnectorSettings, FalcoriaError> {
        self.settings_for(&self.tasker_base_url)
    }

    /// Field/value rows for display, with the token masked.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        let projects = if self.projects.is_empty() {
            "-".to_string()
        } else {
            self.projects.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
        };
        vec![
            ("scanledger_base_url", self.scanledger_base_url.clone()),
            ("tasker_base_url", self.tasker_base_url.clone()),
            ("token", mask_secret(&self.token)),
            ("projects", projects),
            (
                "current_project",
                self.current_project.as_ref().map(ToString::to_string).unwrap_or_else(|| "-".to_string()),
            ),
            ("request_timeout_secs", self.request_timeout_secs.to_string()),
            ("max_retries", self.max_retries.to_string()),
            ("retry_delay_secs", self.retry_delay_secs.to_string()),
            ("verify_tls", self.verify_tls.to_string()),
        ]
    }
}

fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<T, FalcoriaError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| FalcoriaError::Profile(format!("Failed to parse value for '{}': {}", field, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(name: &str, id: &str) -> ProjectRef {
        ProjectRef { name: name.into(), project_id: id.into() }
    }

    #[test]
    fn test_minimal_yaml_gets_defaults() {
        let profile = Profile::from_yaml(
            "scanledger_base_url: https://ledger\ntasker_base_url: https://tasker\ntoken: abc\n",
        ).unwrap();
        assert_eq!(profile.request_timeout_secs, 60);
        assert_eq!(profile.max_retries, 3);
        assert_eq!(profile.retry_delay_secs, 2);
        assert!(!profile.verify_tls);
        assert!(profile.current_project.is_none());
    }

    #[test]
    fn test_missing_fields() {
        let profile = Profile::new("https://ledger", " ", "");
        assert_eq!(profile.missing_fields(), vec!["tasker_base_url", "token"]);
        assert!(matches!(profile.ledger_settings(), Err(FalcoriaError::Profile(_))));
    }

    #[test]
    fn test_remember_and_forget_project() {
        let mut profile = Profile::new("l", "t", "k");
        profile.remember_project(project("corp", "p1"), true);
        profile.remember_project(project("corp-renamed", "p1"), false);
        profile.remember_project(project("lab", "p2"), false);

        assert_eq!(profile.projects.len(), 2);
        assert_eq!(profile.current_project_id(), Some("p1"));

        assert!(profile.forget_project("p1"));
        assert!(profile.current_project.is_none());
        assert!(!profile.forget_project("p1"));
    }

    #[test]
    fn test_project_label() {
        let mut profile = Profile::new("l", "t", "k");
        profile.remember_project(project("corp", "p1"), false);
        assert_eq!(profile.project_label("p1"), "'corp' (p1)");
        assert_eq!(profile.project_label("p9"), "p9");
    }

    #[test]
    fn test_set_field() {
        let mut profile = Profile::new("l", "t", "k");
        profile.remember_project(project("corp", "p1"), false);

        profile.set_field("max_retries", "5").unwrap();
        profile.set_field("verify_tls", "yes").unwrap();
        profile.set_field("current_project", "p1").unwrap();
        assert_eq!(profile.max_retries, 5);
        assert!(profile.verify_tls);
        assert_eq!(profile.current_project.as_ref().unwrap().name, "corp");

        profile.set_field("current_project", "none").unwrap();
        assert!(profile.current_project.is_none());

        assert!(profile.set_field("max_retries", "many").is_err());
        assert!(profile.set_field("colour", "blue").is_err());
    }

    #[test]
    fn test_settings_resolve_env_token() {
        std::env::set_var("FALCORIA_PROFILE_TEST_TOKEN", "from-env");
        let mut profile = Profile::new("https://ledger", "https://tasker", "$FALCORIA_PROFILE_TEST_TOKEN");
        profile.max_retries = 0;
        let settings = profile.tasker_settings().unwrap();
        assert_eq!(settings.token, "from-env");
        assert_eq!(settings.base_url, "https://tasker");
        assert_eq!(settings.retry.max_attempts, 1);
        std::env::remove_var("FALCORIA_PROFILE_TEST_TOKEN");
    }

    #[test]
    fn test_settings_reject_unset_env_token() {
        let profile = Profile::new("https://ledger", "https://tasker", "$FALCORIA_PROFILE_UNSET_TOKEN");
        assert!(profile.missing_fields().is_empty());
        match profile.ledger_settings() {
            Err(FalcoriaError::Profile(msg)) => assert!(msg.contains("FALCORIA_PROFILE_UNSET_TOKEN")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_display_rows_mask_token() {
        let profile = Profile::new("l", "t", "abcdefghijklmnop");
        let token = profile.display_rows().into_iter().find(|(k, _)| *k == "token").unwrap();
        assert_eq!(token.1, "********mnop");
    }
}
