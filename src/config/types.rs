use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Upper bound for a single target name (DNS name length limit).
pub const MAX_HOST_LENGTH: usize = 253;

/// Default overall scan timeout in seconds.
pub const DEFAULT_SCAN_TIMEOUT_SECS: u32 = 1200;

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransportProtocol {
    #[default]
    Tcp,
    Udp,
}

impl TransportProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

/// DNS resolution mode. Written in YAML as `true` (force), `false` (skip)
/// or `null`/absent (scanner default).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum DnsResolution {
    #[default]
    Default,
    Skip,
    Force,
}

impl From<Option<bool>> for DnsResolution {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Default,
            Some(false) => Self::Skip,
            Some(true) => Self::Force,
        }
    }
}

impl From<DnsResolution> for Option<bool> {
    fn from(value: DnsResolution) -> Self {
        match value {
            DnsResolution::Default => None,
            DnsResolution::Skip => Some(false),
            DnsResolution::Force => Some(true),
        }
    }
}

/// How scan results merge into a project's existing IP inventory.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    #[default]
    Insert,
    Replace,
    Update,
    Append,
}

impl ImportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Replace => "replace",
            Self::Update => "update",
            Self::Append => "append",
        }
    }
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Probe tuning shared by both scan phases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeOptions {
    pub skip_host_discovery: bool,
    pub dns_resolution: DnsResolution,
    pub transport_protocol: TransportProtocol,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rtt_timeout_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rtt_timeout_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_rtt_timeout_ms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<u32>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            skip_host_discovery: true,
            dns_resolution: DnsResolution::Default,
            transport_protocol: TransportProtocol::Tcp,
            max_retries: None,
            min_rtt_timeout_ms: None,
            max_rtt_timeout_ms: None,
            initial_rtt_timeout_ms: None,
            min_rate: None,
            max_rate: None,
        }
    }
}

impl ProbeOptions {
    /// Out-of-order RTT and rate bounds. These are passed through to the
    /// scanner unchanged; callers decide whether to surface them.
    pub fn bound_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        let rtt = [
            ("min_rtt_timeout_ms", self.min_rtt_timeout_ms),
            ("initial_rtt_timeout_ms", self.initial_rtt_timeout_ms),
            ("max_rtt_timeout_ms", self.max_rtt_timeout_ms),
        ];
        for (i, (lower_name, lower)) in rtt.iter().enumerate() {
            for (upper_name, upper) in &rtt[i + 1..] {
                if let (Some(lo), Some(hi)) = (lower, upper) {
                    if lo > hi {
                        warnings.push(format!("{} ({}) > {} ({})", lower_name, lo, upper_name, hi));
                    }
                }
            }
        }
        if let (Some(lo), Some(hi)) = (self.min_rate, self.max_rate) {
            if lo > hi {
                warnings.push(format!("min_rate ({}) > max_rate ({})", lo, hi));
            }
        }
        warnings
    }
}

/// Options for the open-ports phase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ScanOptions {
    #[serde(flatten)]
    pub probe: ProbeOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<Vec<String>>,
}

/// Options for the service-discovery phase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceOptions {
    #[serde(flatten)]
    pub probe: ProbeOptions,
    pub aggressive_scan: bool,
    pub default_scripts: bool,
    pub os_detection: bool,
    pub traceroute: bool,
    #[serde(skip)]
    pub(crate) force_service_version: bool,
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            probe: ProbeOptions::default(),
            aggressive_scan: false,
            default_scripts: false,
            os_detection: false,
            traceroute: false,
            force_service_version: true,
        }
    }
}

fn default_timeout() -> u32 {
    DEFAULT_SCAN_TIMEOUT_SECS
}

fn default_include_services() -> bool {
    true
}

/// One scan submission: targets plus the settings of both phases.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub hosts: Vec<String>,
    /// Local path to a newline-delimited host list, read by the resolver.
    #[serde(default, skip_serializing)]
    pub hosts_file: Option<PathBuf>,
    #[serde(default)]
    pub open_ports_opts: ScanOptions,
    #[serde(default)]
    pub service_opts: ServiceOptions,
    #[serde(default = "default_timeout")]
    pub timeout: u32,
    #[serde(default = "default_include_services")]
    pub include_services: bool,
    #[serde(default)]
    pub mode: ImportMode,
}

impl Default for ScanRequest {
    fn default() -> Self {
        Self {
            hosts: Vec::new(),
            hosts_file: None,
            open_ports_opts: ScanOptions::default(),
            service_opts: ServiceOptions::default(),
            timeout: DEFAULT_SCAN_TIMEOUT_SECS,
            include_services: true,
            mode: ImportMode::Insert,
        }
    }
}

impl ScanRequest {
    /// Bound-ordering warnings for both phases, prefixed with the phase name.
    pub fn bound_warnings(&self) -> Vec<String> {
        let open = self.open_ports_opts.probe.bound_warnings()
            .into_iter()
            .map(|w| format!("open_ports_opts: {}", w));
        let service = self.service_opts.probe.bound_warnings()
            .into_iter()
            .map(|w| format!("service_opts: {}", w));
        open.chain(service).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_mode_default() {
        assert_eq!(ImportMode::default(), ImportMode::Insert);
    }

    #[test]
    fn test_import_mode_as_str() {
        assert_eq!(ImportMode::Insert.as_str(), "insert");
        assert_eq!(ImportMode::Replace.as_str(), "replace");
        assert_eq!(ImportMode::Update.as_str(), "update");
        assert_eq!(ImportMode::Append.as_str(), "append");
    }

    #[test]
    fn test_import_mode_deserialize() {
        let parsed: ImportMode = serde_json::from_str("\"append\"").unwrap();
        assert_eq!(parsed, ImportMode::Append);
    }

    #[test]
    fn test_dns_resolution_tri_state() {
        let force: DnsResolution = serde_json::from_str("true").unwrap();
        let skip: DnsResolution = serde_json::from_str("false").unwrap();
        let default: DnsResolution = serde_json::from_str("null").unwrap();
        assert_eq!(force, DnsResolution::Force);
        assert_eq!(skip, DnsResolution::Skip);
        assert_eq!(default, DnsResolution::Default);
    }

    #[test]
    fn test_probe_defaults() {
        let probe = ProbeOptions::default();
        assert!(probe.skip_host_discovery);
        assert_eq!(probe.dns_resolution, DnsResolution::Default);
        assert_eq!(probe.transport_protocol, TransportProtocol::Tcp);
        assert!(probe.max_retries.is_none());
    }

    #[test]
    fn test_service_options_force_version_on() {
        let opts = ServiceOptions::default();
        assert!(opts.force_service_version);
        let parsed: ServiceOptions = serde_yaml::from_str("os_detection: true").unwrap();
        assert!(parsed.force_service_version);
        assert!(parsed.os_detection);
    }

    #[test]
    fn test_scan_request_defaults_from_empty_yaml() {
        let req: ScanRequest = serde_yaml::from_str("hosts: [a.example]").unwrap();
        assert_eq!(req.timeout, 1200);
        assert!(req.include_services);
        assert_eq!(req.mode, ImportMode::Insert);
        assert!(req.open_ports_opts.probe.skip_host_discovery);
    }

    #[test]
    fn test_payload_omits_hosts_file_and_private_flag() {
        let req = ScanRequest {
            hosts: vec!["10.0.0.1".into()],
            hosts_file: Some(PathBuf::from("/tmp/hosts.txt")),
            ..Default::default()
        };
        let payload = serde_json::to_value(&req).unwrap();
        assert!(payload.get("hosts_file").is_none());
        assert!(payload["service_opts"].get("force_service_version").is_none());
        assert!(payload["open_ports_opts"].get("max_retries").is_none());
        assert_eq!(payload["open_ports_opts"]["skip_host_discovery"], true);
        assert_eq!(payload["mode"], "insert");
    }

    #[test]
    fn test_bound_warnings_permissive() {
        let probe = ProbeOptions {
            min_rtt_timeout_ms: Some(500),
            initial_rtt_timeout_ms: Some(100),
            max_rtt_timeout_ms: Some(1000),
            min_rate: Some(200),
            max_rate: Some(100),
            ..Default::default()
        };
        let warnings = probe.bound_warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("min_rtt_timeout_ms (500) > initial_rtt_timeout_ms (100)"));
        assert!(warnings[1].contains("min_rate"));
    }

    #[test]
    fn test_bound_warnings_ordered() {
        let probe = ProbeOptions {
            min_rtt_timeout_ms: Some(100),
            initial_rtt_timeout_ms: Some(500),
            max_rtt_timeout_ms: Some(1000),
            ..Default::default()
        };
        assert!(probe.bound_warnings().is_empty());
    }
}
