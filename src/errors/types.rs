use thiserror::Error;

#[derive(Debug, Error)]
pub enum FalcoriaError {
    #[error("Scan configuration file not found: {0}")]
    ConfigNotFound(String),

    #[error("Failed to read scan config: {0}")]
    ConfigRead(String),

    #[error("Validation error in scan config at '{field}': {detail}")]
    ConfigValidationFailed { field: String, detail: String },

    #[error("Targets file not found: {0}")]
    TargetsFileNotFound(String),

    #[error("No targets found in the selected source")]
    NoTargetsFound,

    #[error("No hosts provided: use --hosts, --targets-file or --from-config")]
    NoHostsProvided,

    #[error("Project ID is required: pass --project-id or set an active project")]
    ProjectIdRequired,

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse backend response: {0}")]
    Parse(String),

    #[error("No targets were accepted for scanning")]
    NothingAccepted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FalcoriaError {
    pub fn validation(field: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ConfigValidationFailed {
            field: field.into(),
            detail: detail.into(),
        }
    }
}
