use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AcceptedTarget {
    pub ip: String,
    #[serde(default)]
    pub hostnames: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RejectedTarget {
    pub ip: String,
    pub reason: String,
}

/// Targets the backend skipped because they are already known.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SkippedBreakdown {
    pub already_in_scanledger: u32,
    pub already_in_queue: u32,
}

impl SkippedBreakdown {
    pub fn total(&self) -> u32 {
        self.already_in_scanledger + self.already_in_queue
    }
}

/// Targets the backend refused to scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RejectedBreakdown {
    pub private_ip: u32,
    pub unresolvable: u32,
    pub forbidden: u32,
    pub other: u32,
}

impl RejectedBreakdown {
    pub fn total(&self) -> u32 {
        self.private_ip + self.unresolvable + self.forbidden + self.other
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScanStartSummary {
    pub provided: u32,
    pub duplicates_removed: u32,
    pub sent_to_scan: u32,
    #[serde(alias = "skipped_breakdown")]
    pub skipped: SkippedBreakdown,
    #[serde(alias = "rejected_breakdown")]
    pub rejected: RejectedBreakdown,
}

/// Backend reply to a scan submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanStartResponse {
    #[serde(default)]
    pub accepted_targets: Vec<AcceptedTarget>,
    #[serde(default)]
    pub rejected_targets: Vec<RejectedTarget>,
    #[serde(default, alias = "counts")]
    pub summary: ScanStartSummary,
}

impl ScanStartResponse {
    pub fn accepted_count(&self) -> u32 {
        self.summary.sent_to_scan.max(self.accepted_targets.len() as u32)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunningTarget {
    pub ip: String,
    #[serde(default)]
    pub hostnames: Vec<String>,
    pub worker: String,
    /// Unix timestamp in seconds.
    pub started_at: f64,
}

/// Task counts for one project as reported by the scheduler.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskSummary {
    pub active_or_queued: u32,
    #[serde(default)]
    pub running: u32,
    #[serde(default)]
    pub running_targets: Vec<RunningTarget>,
}

impl TaskSummary {
    pub fn queued(&self) -> u32 {
        self.active_or_queued.saturating_sub(self.running)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StopStatus {
    Stopped,
    NoTasks,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevokeResponse {
    pub status: StopStatus,
    #[serde(default)]
    pub revoked: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_response_with_counts_alias() {
        let resp: ScanStartResponse = serde_json::from_str(r#"{
            "accepted_targets": [{"ip": "10.0.0.1", "hostnames": ["a.example"]}],
            "rejected_targets": [{"ip": "192.168.1.1", "reason": "private_ip"}],
            "counts": {
                "provided": 3, "duplicates_removed": 1, "sent_to_scan": 1,
                "skipped_breakdown": {"already_in_scanledger": 0, "already_in_queue": 0},
                "rejected_breakdown": {"private_ip": 1}
            }
        }"#).unwrap();
        assert_eq!(resp.summary.provided, 3);
        assert_eq!(resp.summary.duplicates_removed, 1);
        assert_eq!(resp.summary.rejected.total(), 1);
        assert_eq!(resp.accepted_count(), 1);
    }

    #[test]
    fn test_start_response_summary_only() {
        let resp: ScanStartResponse = serde_json::from_str(r#"{
            "summary": {"provided": 2, "duplicates_removed": 0, "sent_to_scan": 0,
                        "skipped": {"already_in_scanledger": 2}}
        }"#).unwrap();
        assert_eq!(resp.summary.skipped.total(), 2);
        assert_eq!(resp.accepted_count(), 0);
    }

    #[test]
    fn test_task_summary_queued() {
        let summary = TaskSummary { active_or_queued: 5, running: 2, running_targets: vec![] };
        assert_eq!(summary.queued(), 3);
        let odd = TaskSummary { active_or_queued: 1, running: 2, running_targets: vec![] };
        assert_eq!(odd.queued(), 0);
    }

    #[test]
    fn test_revoke_response() {
        let stopped: RevokeResponse = serde_json::from_str(r#"{"status":"stopped","revoked":4}"#).unwrap();
        assert_eq!(stopped.status, StopStatus::Stopped);
        assert_eq!(stopped.revoked, 4);
        let none: RevokeResponse = serde_json::from_str(r#"{"status":"no_tasks","revoked":0}"#).unwrap();
        assert_eq!(none.status, StopStatus::NoTasks);
    }
}
