use serde::{Deserialize, Serialize};

/// Lifecycle of an asynchronous import job. The backend owns every
/// transition (`Pending → Processing → Completed | Failed`); the frontend's
/// only role is to poll and render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ImportJobStatus {
    /// A terminal status stops the polling loop.
    pub fn is_terminal(self) -> bool {
        matches!(self, ImportJobStatus::Completed | ImportJobStatus::Failed)
    }
}

/// Snapshot of a running (or finished) import job as returned by the
/// job-status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportJob {
    pub job_id: String,
    pub status: ImportJobStatus,
    /// Percentage in `0..=100`, server-computed.
    pub progress: u32,
    pub processed_rows: u32,
    pub total_rows: u32,
    pub created: u32,
    pub skipped: u32,
    pub errors: u32,
    /// Populated when `status` is `Failed`.
    pub error_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses() {
        assert!(!ImportJobStatus::Pending.is_terminal());
        assert!(!ImportJobStatus::Processing.is_terminal());
        assert!(ImportJobStatus::Completed.is_terminal());
        assert!(ImportJobStatus::Failed.is_terminal());
    }

    #[test]
    fn status_uses_lowercase_wire_names() {
        let job: ImportJob = serde_json::from_str(
            r#"{
                "job_id": "j1",
                "status": "processing",
                "progress": 30,
                "processed_rows": 3,
                "total_rows": 10,
                "created": 0,
                "skipped": 0,
                "errors": 0,
                "error_message": null
            }"#,
        )
        .unwrap();
        assert_eq!(job.status, ImportJobStatus::Processing);
        assert_eq!(
            serde_json::to_value(ImportJobStatus::Failed).unwrap(),
            serde_json::Value::String("failed".into())
        );
    }
}
