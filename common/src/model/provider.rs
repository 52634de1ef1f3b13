use serde::{Deserialize, Serialize};

/// A software license provider (Google Workspace, Slack, Figma, ...) as seen
/// by the admin dashboard. All fields are owned by the backend; the frontend
/// only renders them and triggers syncs/imports against the provider id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseProvider {
    pub id: String, // UUID
    pub name: String,
    /// Connector kind, e.g. "google_workspace", "manual_csv".
    pub kind: String,
    pub seats_assigned: u32,
    /// None for providers without a seat cap.
    pub seats_total: Option<u32>,
    pub monthly_cost: f64,
    pub currency: String,
    pub status: ProviderStatus,
    /// ISO 8601 timestamp of the last successful sync, if any.
    pub last_sync: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStatus {
    Connected,
    Syncing,
    Error,
}
