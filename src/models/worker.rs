use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerRecord {
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub last_updated: Option<f64>,
    #[serde(default)]
    pub last_seen: Option<f64>,
}

/// Raw `workers/ips` reply, keyed by worker hostname.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkersResponse {
    pub workers: BTreeMap<String, WorkerRecord>,
}

/// External address of one active worker.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkerIp {
    pub hostname: String,
    pub ip: String,
    pub last_updated: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
}

impl WorkersResponse {
    pub fn into_worker_ips(self) -> Vec<WorkerIp> {
        self.workers
            .into_iter()
            .map(|(hostname, record)| WorkerIp {
                hostname,
                ip: record.ip.unwrap_or_else(|| "unknown".to_string()),
                last_updated: record.last_updated.and_then(timestamp),
                last_seen: record.last_seen.and_then(timestamp),
            })
            .collect()
    }
}

fn timestamp(secs: f64) -> Option<DateTime<Utc>> {
    if secs <= 0.0 {
        return None;
    }
    DateTime::from_timestamp(secs as i64, 0)
}
