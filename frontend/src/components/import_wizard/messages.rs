use common::import::{ErrorHandling, SystemField, UploadResponse, ValidationResult};
use common::jobs::ImportJob;

use crate::api::ApiError;

/// Messages driving the wizard. Async completions carry the wizard
/// generation they were started under; `update` drops any that no longer
/// match (the wizard was reset or restarted meanwhile).
pub enum Msg {
    // User intent
    FileSelected(web_sys::File),
    DragStateChanged(bool),
    DownloadTemplate,
    FieldMapped {
        file_column: String,
        system_field: Option<SystemField>,
    },
    ErrorHandlingChanged(ErrorHandling),
    DefaultStatusChanged(String),
    DefaultCurrencyChanged(String),
    Next,
    BackStep,
    StartNew,
    Close,

    // Async completions
    UploadFinished(u32, Result<UploadResponse, ApiError>),
    ValidationFinished(u32, Result<ValidationResult, ApiError>),
    ExecutionRequestFailed(u32, ApiError),
    JobPolled(u32, ImportJob),
    PollFailed(u32, String),
}
