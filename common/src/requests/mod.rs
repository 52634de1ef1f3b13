//! Request payloads sent by the frontend to the license service.

use serde::{Deserialize, Serialize};

use crate::import::{ImportOptions, MappingEntry};
use crate::model::backup::BackupSchedule;

/// Dry-run validation of a previously uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateImportRequest {
    pub upload_id: String,
    pub column_mapping: Vec<MappingEntry>,
    pub options: ImportOptions,
}

/// Commits the import. `confirmed` must be true; the server rejects
/// unconfirmed execute calls as a safety net against stray requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteImportRequest {
    pub upload_id: String,
    pub column_mapping: Vec<MappingEntry>,
    pub options: ImportOptions,
    pub confirmed: bool,
}

/// Response to a successful execute call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteImportResponse {
    pub job_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRuleRequest {
    pub pattern: String,
    pub note: Option<String>,
}

/// Creates an encrypted backup. The password never persists client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBackupRequest {
    pub password: String,
}

/// Restores a backup archive. `confirmed` mirrors the typed confirmation in
/// the restore dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestoreBackupRequest {
    pub backup_id: String,
    pub password: String,
    pub confirmed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub schedule: BackupSchedule,
}
