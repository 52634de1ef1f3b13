use serde::{Deserialize, Serialize};

/// Aggregate counters rendered on the dashboard landing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub providers: u32,
    pub employees: u32,
    pub active_assignments: u32,
    pub service_accounts: u32,
    pub monthly_spend: f64,
    pub currency: String,
}
