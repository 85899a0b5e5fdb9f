use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::FalcoriaError;
use super::schema::SCAN_CONFIG_SCHEMA;
use super::types::ScanRequest;

const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Load a scan configuration YAML document into a `ScanRequest`.
///
/// Hosts are taken verbatim; `hosts_file` is left unresolved.
pub async fn load_scan_config(path: &Path) -> Result<ScanRequest, FalcoriaError> {
    if !path.exists() {
        return Err(FalcoriaError::ConfigNotFound(path.display().to_string()));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(FalcoriaError::ConfigRead("config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await
        .map_err(|e| FalcoriaError::ConfigRead(e.to_string()))?;
    let request = parse_scan_config(&content)?;
    debug!(path = %path.display(), hosts = request.hosts.len(), "Loaded scan config");
    Ok(request)
}

/// Parse and validate a scan configuration from YAML text.
pub fn parse_scan_config(content: &str) -> Result<ScanRequest, FalcoriaError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)
        .map_err(|e| FalcoriaError::ConfigRead(e.to_string()))?;

    let mut json = if yaml.is_null() {
        Value::Object(Default::default())
    } else {
        serde_json::to_value(&yaml)
            .map_err(|e| FalcoriaError::ConfigRead(format!("config conversion error: {}", e)))?
    };

    validate_schema(&json)?;
    normalize(&mut json);

    serde_json::from_value(json).map_err(|e| FalcoriaError::validation("/", e.to_string()))
}

/// Validate config against the JSON schema; the first violation is fatal.
fn validate_schema(instance: &Value) -> Result<(), FalcoriaError> {
    let compiled = jsonschema::JSONSchema::compile(&SCAN_CONFIG_SCHEMA)
        .map_err(|e| FalcoriaError::Internal(format!("Schema compilation error: {}", e)))?;

    if let Err(mut errors) = compiled.validate(instance) {
        if let Some(first) = errors.next() {
            let pointer = first.instance_path.to_string();
            let field = if pointer.is_empty() { "/".to_string() } else { pointer };
            return Err(FalcoriaError::validation(field, first.to_string()));
        }
    }
    Ok(())
}

/// Drop null lists and stringify numeric port entries so the typed model
/// can take them directly.
fn normalize(json: &mut Value) {
    if let Some(root) = json.as_object_mut() {
        if root.get("hosts").is_some_and(Value::is_null) {
            root.remove("hosts");
        }
        if let Some(ports) = root
            .get_mut("open_ports_opts")
            .and_then(|o| o.get_mut("ports"))
            .and_then(Value::as_array_mut)
        {
            for port in ports.iter_mut() {
                if let Some(n) = port.as_u64() {
                    *port = Value::String(n.to_string());
                }
            }
        }
    }
}
