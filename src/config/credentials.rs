use tracing::debug;

use crate::errors::FalcoriaError;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference; an unset or blank variable is an error.
pub fn resolve_credential(value: &str) -> Result<String, FalcoriaError> {
    let Some(var_name) = value.strip_prefix('$') else {
        return Ok(value.to_string());
    };
    match std::env::var(var_name) {
        Ok(resolved) if !resolved.trim().is_empty() => {
            debug!(var = %var_name, "Resolved credential from environment");
            Ok(resolved)
        }
        _ => Err(FalcoriaError::Profile(format!(
            "Token references environment variable '{}', which is not set",
            var_name
        ))),
    }
}

/// Mask a secret for display, keeping only the last four characters of
/// long values. Environment references are shown as written.
pub fn mask_secret(value: &str) -> String {
    if value.starts_with('$') {
        return value.to_string();
    }
    let count = value.chars().count();
    if count <= 8 {
        return "*".repeat(count.max(3));
    }
    let tail: String = value.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(8), tail)
}
