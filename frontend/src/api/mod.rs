//! Typed client for the license service REST API.
//!
//! Every wrapper returns `Result<T, ApiError>` so callers can tell a
//! transport failure ("could not reach the server") from a server rejection
//! (non-2xx with a message) without inspecting strings. Validation findings
//! are *not* errors: a dry run full of row issues is a successful response.

use common::import::{UploadResponse, ValidationResult};
use common::jobs::ImportJob;
use common::model::assignment::LicenseAssignment;
use common::model::backup::{BackupInfo, BackupSchedule};
use common::model::employee::Employee;
use common::model::provider::LicenseProvider;
use common::model::service_account::ServiceAccountRule;
use common::model::stats::DashboardStats;
use common::requests::{
    CreateBackupRequest, CreateRuleRequest, ExecuteImportRequest, ExecuteImportResponse,
    RestoreBackupRequest, UpdateScheduleRequest, ValidateImportRequest,
};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (network down, CORS, abort).
    Transport(String),
    /// The server answered with a non-success status.
    Rejected { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Transport(msg) => write!(f, "Sin conexión con el servidor: {msg}"),
            ApiError::Rejected { status, message } => {
                if message.is_empty() {
                    write!(f, "El servidor respondió {status}")
                } else {
                    write!(f, "{message}")
                }
            }
        }
    }
}

async fn into_json<T: DeserializeOwned>(
    response: gloo_net::http::Response,
) -> Result<T, ApiError> {
    if response.ok() {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    } else {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected { status, message })
    }
}

async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = Request::get(path)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    into_json(response).await
}

async fn send_json<B: Serialize, T: DeserializeOwned>(
    builder: gloo_net::http::RequestBuilder,
    body: &B,
) -> Result<T, ApiError> {
    let response = builder
        .json(body)
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    into_json(response).await
}

async fn expect_ok(response: gloo_net::http::Response) -> Result<(), ApiError> {
    if response.ok() {
        Ok(())
    } else {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Rejected { status, message })
    }
}

// ---- providers -------------------------------------------------------------

pub async fn fetch_providers() -> Result<Vec<LicenseProvider>, ApiError> {
    get_json("/api/providers").await
}

pub async fn sync_provider(provider_id: &str) -> Result<(), ApiError> {
    let response = Request::post(&format!("/api/providers/{provider_id}/sync"))
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    expect_ok(response).await
}

// ---- employees -------------------------------------------------------------

pub async fn fetch_employees() -> Result<Vec<Employee>, ApiError> {
    get_json("/api/employees").await
}

// ---- assignments -----------------------------------------------------------

pub async fn fetch_assignments(provider_id: &str) -> Result<Vec<LicenseAssignment>, ApiError> {
    get_json(&format!("/api/providers/{provider_id}/assignments")).await
}

pub async fn revoke_assignment(assignment_id: &str) -> Result<(), ApiError> {
    let response = Request::delete(&format!("/api/assignments/{assignment_id}"))
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    expect_ok(response).await
}

// ---- service account rules -------------------------------------------------

pub async fn fetch_rules() -> Result<Vec<ServiceAccountRule>, ApiError> {
    get_json("/api/service-accounts/rules").await
}

pub async fn create_rule(request: &CreateRuleRequest) -> Result<ServiceAccountRule, ApiError> {
    send_json(Request::post("/api/service-accounts/rules"), request).await
}

pub async fn delete_rule(rule_id: &str) -> Result<(), ApiError> {
    let response = Request::delete(&format!("/api/service-accounts/rules/{rule_id}"))
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    expect_ok(response).await
}

// ---- backups ---------------------------------------------------------------

pub async fn fetch_backups() -> Result<Vec<BackupInfo>, ApiError> {
    get_json("/api/backups").await
}

pub async fn create_backup(request: &CreateBackupRequest) -> Result<BackupInfo, ApiError> {
    send_json(Request::post("/api/backups"), request).await
}

pub async fn restore_backup(request: &RestoreBackupRequest) -> Result<(), ApiError> {
    let response = Request::post("/api/backups/restore")
        .json(request)
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    expect_ok(response).await
}

pub async fn fetch_schedule() -> Result<BackupSchedule, ApiError> {
    get_json("/api/backups/schedule").await
}

pub async fn update_schedule(request: &UpdateScheduleRequest) -> Result<BackupSchedule, ApiError> {
    send_json(Request::put("/api/backups/schedule"), request).await
}

// ---- dashboard -------------------------------------------------------------

pub async fn fetch_stats() -> Result<DashboardStats, ApiError> {
    get_json("/api/stats").await
}

// ---- import ----------------------------------------------------------------

/// Uploads the file as multipart form data. The browser sets the boundary
/// header itself, so no explicit content type here.
pub async fn upload_import_file(
    provider_id: &str,
    file: &web_sys::File,
) -> Result<UploadResponse, ApiError> {
    let form = web_sys::FormData::new().map_err(|_| {
        ApiError::Transport("no se pudo construir el formulario de subida".to_string())
    })?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(|_| ApiError::Transport("no se pudo adjuntar el archivo".to_string()))?;

    let response = Request::post(&format!("/api/providers/{provider_id}/import/upload"))
        .body(form)
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    into_json(response).await
}

/// Fetches the reference CSV for a provider and hands it to the browser as a
/// download. Independent of any wizard state.
pub async fn download_import_template(
    provider_id: &str,
    include_example_rows: bool,
) -> Result<(), ApiError> {
    let path = format!(
        "/api/providers/{provider_id}/import/template?example_rows={}",
        include_example_rows
    );
    let response = Request::get(&path)
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !response.ok() {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        return Err(ApiError::Rejected { status, message });
    }
    let bytes = response
        .binary()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let blob = gloo_file::Blob::new_with_options(bytes.as_slice(), Some("text/csv"));
    let url = gloo_file::ObjectUrl::from(blob);
    trigger_download(&url, &format!("plantilla-importacion-{provider_id}.csv"))
        .map_err(|_| ApiError::Transport("no se pudo iniciar la descarga".to_string()))
}

fn trigger_download(url: &str, filename: &str) -> Result<(), wasm_bindgen::JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| wasm_bindgen::JsValue::from_str("sin documento"))?;
    let anchor: web_sys::HtmlAnchorElement =
        document.create_element("a")?.unchecked_into();
    anchor.set_href(url);
    anchor.set_download(filename);
    anchor.click();
    Ok(())
}

pub async fn validate_import(request: &ValidateImportRequest) -> Result<ValidationResult, ApiError> {
    send_json(Request::post("/api/import/validate"), request).await
}

pub async fn execute_import(
    request: &ExecuteImportRequest,
) -> Result<ExecuteImportResponse, ApiError> {
    send_json(Request::post("/api/import/execute"), request).await
}

pub async fn fetch_import_job(job_id: &str) -> Result<ImportJob, ApiError> {
    get_json(&format!("/api/import/jobs/{job_id}")).await
}
