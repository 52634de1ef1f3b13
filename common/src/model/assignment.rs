use serde::{Deserialize, Serialize};

/// A license seat assigned to an employee (or to nobody, for unclaimed keys).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseAssignment {
    pub id: String, // UUID
    pub provider_id: String,
    pub license_key: Option<String>,
    pub external_user_id: Option<String>,
    pub employee_email: Option<String>,
    pub status: AssignmentStatus,
    /// ISO 8601 date.
    pub assigned_at: Option<String>,
    pub cost: Option<f64>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Active,
    Suspended,
    Revoked,
}
