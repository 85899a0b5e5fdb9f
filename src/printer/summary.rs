use std::path::Path;

use chrono::{DateTime, Utc};

use crate::config::{OptionDoc, ScanRequest};
use crate::models::{AcceptedTarget, Ip, Project, RejectedTarget, RunningTarget, ScanStartSummary, TaskSummary, WorkerIp};
use crate::utils::formatting::{format_age, format_elapsed};
use super::table::{column_table, key_value_table};
use super::{blank, header, plain};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn scan_settings(request: &ScanRequest, config_path: &Path) {
    blank();
    header("Scan Settings");
    key_value_table(&scan_settings_pairs(request, config_path), 2);
    blank();
}

fn scan_settings_pairs(request: &ScanRequest, config_path: &Path) -> Vec<(&'static str, String)> {
    let service_flags = if request.include_services {
        request.service_opts.to_nmap_args().join(" ")
    } else {
        "not performed".to_string()
    };
    vec![
        ("Import mode", request.mode.to_string()),
        ("Nmap (open ports)", request.open_ports_opts.to_nmap_args().join(" ")),
        ("Nmap (services)", service_flags),
        ("Scan config", config_path.display().to_string()),
    ]
}

pub fn scan_summary(summary: &ScanStartSummary) {
    header("Scan Summary");
    key_value_table(&scan_summary_pairs(summary), 2);

    let skipped = &summary.skipped;
    if skipped.total() > 0 {
        plain("  Skipped reasons:");
        key_value_table(
            &[
                ("In ScanLedger", skipped.already_in_scanledger),
                ("Already in queue", skipped.already_in_queue),
            ],
            4,
        );
    }

    let rejected = &summary.rejected;
    if rejected.total() > 0 {
        plain("  Rejected reasons:");
        key_value_table(
            &[
                ("Private IP", rejected.private_ip),
                ("Unresolvable", rejected.unresolvable),
                ("Forbidden", rejected.forbidden),
                ("Other", rejected.other),
            ],
            4,
        );
    }
}

fn scan_summary_pairs(summary: &ScanStartSummary) -> Vec<(&'static str, u32)> {
    vec![
        ("Targets provided", summary.provided),
        ("Duplicates removed", summary.duplicates_removed),
        ("Skipped (already known)", summary.skipped.total()),
        ("Rejected", summary.rejected.total()),
        ("Accepted and sent", summary.sent_to_scan),
    ]
}

pub fn accepted_targets(targets: &[AcceptedTarget]) {
    if targets.is_empty() {
        return;
    }
    blank();
    plain(format!("Accepted Targets ({}):", targets.len()));
    column_table(
        &["ip", "hostnames"],
        targets.iter().map(|t| vec![t.ip.clone(), join_or_dash(&t.hostnames)]),
    );
}

pub fn rejected_targets(targets: &[RejectedTarget]) {
    if targets.is_empty() {
        return;
    }
    blank();
    plain(format!("Rejected Targets ({}):", targets.len()));
    column_table(
        &["target", "reason"],
        targets.iter().map(|t| vec![t.ip.clone(), t.reason.clone()]),
    );
}

pub fn task_summary(summary: &TaskSummary, now: DateTime<Utc>) {
    header("Scan Status Summary");
    key_value_table(
        &[
            ("Tasks total", summary.active_or_queued),
            ("Tasks running", summary.running),
            ("Tasks queued", summary.queued()),
        ],
        2,
    );

    if summary.running_targets.is_empty() {
        plain("  No running targets.");
        return;
    }
    blank();
    plain("Running Targets:");
    column_table(
        &["ip", "hostnames", "worker", "started_at (utc)", "elapsed"],
        running_target_rows(&summary.running_targets, now),
    );
}

fn running_target_rows(targets: &[RunningTarget], now: DateTime<Utc>) -> Vec<Vec<String>> {
    targets
        .iter()
        .map(|target| {
            let started = DateTime::from_timestamp(target.started_at as i64, 0);
            let started_str = started
                .map(|s| s.format(TIME_FORMAT).to_string())
                .unwrap_or_else(|| "-".to_string());
            let elapsed = started
                .and_then(|s| (now - s).to_std().ok())
                .map(format_elapsed)
                .unwrap_or_else(|| "-".to_string());
            vec![
                target.ip.clone(),
                target.hostnames.join(", "),
                target.worker.clone(),
                started_str,
                elapsed,
            ]
        })
        .collect()
}

/// Each IP as a small block with its ports tabled underneath.
pub fn grouped_ips(ips: &[Ip]) {
    for ip in ips {
        header(format!("IP: {}", ip.ip));
        plain(format!("Status   : {}", or_dash(&ip.status)));
        plain(format!("OS       : {}", or_dash(&ip.os)));
        plain(format!("Hostnames: {}", join_or_dash(&ip.hostnames)));
        blank();

        if ip.ports.is_empty() {
            plain("No ports.");
        } else {
            column_table(
                &["port", "proto", "state", "service", "banner"],
                ip.ports.iter().map(|port| {
                    vec![
                        port.number.to_string(),
                        port.protocol.as_str().to_string(),
                        port.state.as_str().to_string(),
                        or_dash(&port.service).to_string(),
                        or_dash(&port.banner).to_string(),
                    ]
                }),
            );
        }
        blank();
    }
}

pub fn projects(projects: &[Project]) {
    column_table(
        &["id", "project_name", "comment", "users"],
        projects.iter().map(|p| {
            vec![
                p.id.clone(),
                p.project_name.clone(),
                p.comment.clone().unwrap_or_else(|| "-".to_string()),
                join_or_dash(&p.users),
            ]
        }),
    );
}

pub fn project_details(project: &Project) {
    key_value_table(
        &[
            ("id", project.id.clone()),
            ("project_name", project.project_name.clone()),
            ("comment", project.comment.clone().unwrap_or_else(|| "-".to_string())),
            ("users", join_or_dash(&project.users)),
        ],
        2,
    );
}

pub fn option_docs(title: &str, docs: &[OptionDoc]) {
    header(title);
    let pairs: Vec<(&str, String)> = docs
        .iter()
        .map(|d| (d.name, format!("{} | Default: {}", d.description, d.default)))
        .collect();
    key_value_table(&pairs, 2);
    blank();
}

pub fn workers(workers: &[WorkerIp], now: DateTime<Utc>) {
    column_table(
        &["hostname", "ip", "last_updated", "last_updated_ago"],
        worker_rows(workers, now),
    );
}

fn worker_rows(workers: &[WorkerIp], now: DateTime<Utc>) -> Vec<Vec<String>> {
    workers
        .iter()
        .map(|w| {
            let (updated, ago) = match w.last_updated {
                Some(ts) => (ts.format(TIME_FORMAT).to_string(), format_age((now - ts).num_seconds())),
                None => ("unknown".to_string(), "unknown".to_string()),
            };
            vec![w.hostname.clone(), w.ip.clone(), updated, ago]
        })
        .collect()
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImportMode;
    use crate::models::{RejectedBreakdown, SkippedBreakdown};

    #[test]
    fn test_scan_settings_without_services() {
        let request = ScanRequest {
            include_services: false,
            mode: ImportMode::Append,
            ..Default::default()
        };
        let pairs = scan_settings_pairs(&request, Path::new("scan_configs/default.yaml"));
        assert_eq!(pairs[0], ("Import mode", "append".to_string()));
        assert_eq!(pairs[1], ("Nmap (open ports)", "-Pn".to_string()));
        assert_eq!(pairs[2], ("Nmap (services)", "not performed".to_string()));
    }

    #[test]
    fn test_scan_summary_totals() {
        let summary = ScanStartSummary {
            provided: 10,
            duplicates_removed: 2,
            sent_to_scan: 3,
            skipped: SkippedBreakdown { already_in_scanledger: 2, already_in_queue: 1 },
            rejected: RejectedBreakdown { private_ip: 1, unresolvable: 1, forbidden: 0, other: 0 },
        };
        let pairs = scan_summary_pairs(&summary);
        assert_eq!(pairs[1], ("Duplicates removed", 2));
        assert_eq!(pairs[2], ("Skipped (already known)", 3));
        assert_eq!(pairs[3], ("Rejected", 2));
        assert_eq!(pairs[4], ("Accepted and sent", 3));
    }

    #[test]
    fn test_running_target_rows() {
        let now = DateTime::from_timestamp(1_700_000_125, 0).unwrap();
        let rows = running_target_rows(
            &[RunningTarget {
                ip: "10.0.0.1".into(),
                hostnames: vec!["a.example".into(), "b.example".into()],
                worker: "worker-1".into(),
                started_at: 1_700_000_000.5,
            }],
            now,
        );
        assert_eq!(rows[0][1], "a.example, b.example");
        assert_eq!(rows[0][3], "2023-11-14 22:13:20");
        assert_eq!(rows[0][4], "0:02:05");
    }

    #[test]
    fn test_worker_rows() {
        let now = DateTime::from_timestamp(1_700_000_600, 0).unwrap();
        let rows = worker_rows(
            &[
                WorkerIp {
                    hostname: "w1".into(),
                    ip: "203.0.113.5".into(),
                    last_updated: DateTime::from_timestamp(1_700_000_000, 0),
                    last_seen: None,
                },
                WorkerIp { hostname: "w2".into(), ip: "unknown".into(), last_updated: None, last_seen: None },
            ],
            now,
        );
        assert_eq!(rows[0][3], "10 min ago");
        assert_eq!(rows[1][2], "unknown");
    }
}
