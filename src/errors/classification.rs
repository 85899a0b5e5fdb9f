use super::types::FalcoriaError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl FalcoriaError {
    /// Classify this error to determine its type and whether it can be retried.
    ///
    /// Only transport failures are retryable. HTTP error responses are terminal
    /// for the call that produced them, and input errors are reported once.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Transport
            FalcoriaError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            FalcoriaError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },

            // Protocol
            FalcoriaError::Http { .. } => ErrorClassification {
                error_type: "HttpError",
                retryable: false,
            },
            FalcoriaError::Parse(_) => ErrorClassification {
                error_type: "ParseError",
                retryable: false,
            },
            FalcoriaError::NothingAccepted => ErrorClassification {
                error_type: "NothingAcceptedError",
                retryable: false,
            },

            // Operator input
            FalcoriaError::ConfigNotFound(_)
            | FalcoriaError::ConfigRead(_)
            | FalcoriaError::ConfigValidationFailed { .. } => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            FalcoriaError::TargetsFileNotFound(_)
            | FalcoriaError::NoTargetsFound
            | FalcoriaError::NoHostsProvided => ErrorClassification {
                error_type: "TargetError",
                retryable: false,
            },
            FalcoriaError::ProjectIdRequired | FalcoriaError::InvalidArgument(_) => {
                ErrorClassification {
                    error_type: "ArgumentError",
                    retryable: false,
                }
            }
            FalcoriaError::Profile(_) => ErrorClassification {
                error_type: "ProfileError",
                retryable: false,
            },

            // Local
            FalcoriaError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: false,
            },
            FalcoriaError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            FalcoriaError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            FalcoriaError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }
}
