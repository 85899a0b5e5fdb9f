use serde_json::{json, Value};
use std::sync::LazyLock;

/// Structural schema for scan configuration documents.
pub static SCAN_CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "hosts": {
                "type": ["array", "null"],
                "items": { "type": "string", "maxLength": 253 }
            },
            "hosts_file": { "type": ["string", "null"] },
            "open_ports_opts": {
                "type": "object",
                "additionalProperties": false,
                "properties": probe_properties(true)
            },
            "service_opts": {
                "type": "object",
                "additionalProperties": false,
                "properties": probe_properties(false)
            },
            "timeout": { "type": "integer", "minimum": 1, "maximum": 86400 },
            "include_services": { "type": "boolean" },
            "mode": { "type": "string", "enum": ["insert", "replace", "update", "append"] }
        }
    })
});

fn bounded(min: u64, max: u64) -> Value {
    json!({ "type": ["integer", "null"], "minimum": min, "maximum": max })
}

fn probe_properties(with_ports: bool) -> Value {
    let mut props = json!({
        "skip_host_discovery": { "type": "boolean" },
        "dns_resolution": { "type": ["boolean", "null"] },
        "transport_protocol": { "type": "string", "enum": ["tcp", "udp"] },
        "max_retries": bounded(0, 20),
        "min_rtt_timeout_ms": bounded(1, 60000),
        "max_rtt_timeout_ms": bounded(1, 60000),
        "initial_rtt_timeout_ms": bounded(1, 60000),
        "min_rate": bounded(1, 30000),
        "max_rate": bounded(1, 30000)
    });
    if with_ports {
        props["ports"] = json!({
            "type": ["array", "null"],
            "items": {
                "anyOf": [
                    { "type": "string" },
                    { "type": "integer", "minimum": 0, "maximum": 65535 }
                ]
            }
        });
    } else {
        props["aggressive_scan"] = json!({ "type": "boolean" });
        props["default_scripts"] = json!({ "type": "boolean" });
        props["os_detection"] = json!({ "type": "boolean" });
        props["traceroute"] = json!({ "type": "boolean" });
    }
    props
}
