/// Operator-facing description of one scan option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDoc {
    pub name: &'static str,
    pub description: &'static str,
    pub default: &'static str,
}

const fn doc(name: &'static str, description: &'static str, default: &'static str) -> OptionDoc {
    OptionDoc { name, description, default }
}

const PROBE_OPTIONS: &[OptionDoc] = &[
    doc("skip_host_discovery", "-Pn", "true"),
    doc("dns_resolution", "-n (false), -R (true)", "None"),
    doc("transport_protocol", "tcp or udp (-sU)", "tcp"),
    doc("max_retries", "--max-retries (0-20)", "None"),
    doc("min_rtt_timeout_ms", "--min-rtt-timeout (1-60000)", "None"),
    doc("max_rtt_timeout_ms", "--max-rtt-timeout (1-60000)", "None"),
    doc("initial_rtt_timeout_ms", "--initial-rtt-timeout (1-60000)", "None"),
    doc("min_rate", "--min-rate (1-30000)", "None"),
    doc("max_rate", "--max-rate (1-30000)", "None"),
];

pub fn open_ports_option_docs() -> Vec<OptionDoc> {
    let mut docs = PROBE_OPTIONS.to_vec();
    docs.push(doc("ports", "List of ports or port ranges (e.g. '22', '80', '1000-2000')", "None"));
    docs
}

pub fn service_option_docs() -> Vec<OptionDoc> {
    let mut docs = PROBE_OPTIONS.to_vec();
    docs.extend_from_slice(&[
        doc("aggressive_scan", "Enable aggressive scan mode (-A)", "false"),
        doc("default_scripts", "Use default Nmap scripts (-sC)", "false"),
        doc("os_detection", "Enable OS detection (-O)", "false"),
        doc("traceroute", "Trace hop path to each host (--traceroute)", "false"),
    ]);
    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SCAN_CONFIG_SCHEMA;

    #[test]
    fn test_docs_cover_schema_properties() {
        let open = SCAN_CONFIG_SCHEMA["properties"]["open_ports_opts"]["properties"]
            .as_object()
            .unwrap();
        let names: Vec<_> = open_ports_option_docs().iter().map(|d| d.name).collect();
        for key in open.keys() {
            assert!(names.contains(&key.as_str()), "undocumented option {key}");
        }

        let service = SCAN_CONFIG_SCHEMA["properties"]["service_opts"]["properties"]
            .as_object()
            .unwrap();
        assert_eq!(service.len(), service_option_docs().len());
    }
}
