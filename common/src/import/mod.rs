//! Shared types for the CSV license import flow.
//!
//! The flow is: upload a delimited file, confirm the column→field mapping,
//! choose import-wide options, dry-run validate on the server, then execute
//! and poll the resulting job. Every struct here is a wire payload; nothing
//! survives a wizard reset except what the server keeps under `upload_id`
//! and `job_id`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub mod wizard;

/// Closed set of system fields an uploaded column can map to. Using an enum
/// rather than free strings keeps client and server field names from
/// drifting apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemField {
    LicenseKey,
    ExternalUserId,
    EmployeeEmail,
    AssignedAt,
    Cost,
    Currency,
    Status,
    Notes,
}

impl SystemField {
    pub const ALL: [SystemField; 8] = [
        SystemField::LicenseKey,
        SystemField::ExternalUserId,
        SystemField::EmployeeEmail,
        SystemField::AssignedAt,
        SystemField::Cost,
        SystemField::Currency,
        SystemField::Status,
        SystemField::Notes,
    ];

    /// Identifying fields disambiguate import rows; the mapping must include
    /// at least one of them before validation makes sense.
    pub fn is_identifying(self) -> bool {
        matches!(self, SystemField::LicenseKey | SystemField::ExternalUserId)
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            SystemField::LicenseKey => "license_key",
            SystemField::ExternalUserId => "external_user_id",
            SystemField::EmployeeEmail => "employee_email",
            SystemField::AssignedAt => "assigned_at",
            SystemField::Cost => "cost",
            SystemField::Currency => "currency",
            SystemField::Status => "status",
            SystemField::Notes => "notes",
        }
    }

    pub fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.wire_name() == name)
    }

    /// User-facing label for the mapping selector.
    pub fn label(self) -> &'static str {
        match self {
            SystemField::LicenseKey => "Clave de licencia",
            SystemField::ExternalUserId => "ID de usuario externo",
            SystemField::EmployeeEmail => "Email del empleado",
            SystemField::AssignedAt => "Fecha de asignación",
            SystemField::Cost => "Costo",
            SystemField::Currency => "Moneda",
            SystemField::Status => "Estado",
            SystemField::Notes => "Notas",
        }
    }
}

/// Server response to a file upload: the handle later validate/execute calls
/// use instead of re-sending the file, plus what the parser detected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub upload_id: String,
    /// Detected column headers, in file order.
    pub columns: Vec<String>,
    /// Server-suggested field per column; `None` where it had no guess.
    pub suggested_mapping: HashMap<String, Option<SystemField>>,
    /// First data rows, for the mapping preview table.
    pub preview: Vec<Vec<String>>,
}

/// One row of the user-confirmed column mapping. `None` means "ignore this
/// column".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub file_column: String,
    pub system_field: Option<SystemField>,
}

/// Derives the initial mapping from an upload: one entry per detected
/// column, pre-filled with the server's suggestion.
pub fn initial_mapping(upload: &UploadResponse) -> Vec<MappingEntry> {
    upload
        .columns
        .iter()
        .map(|column| MappingEntry {
            file_column: column.clone(),
            system_field: upload.suggested_mapping.get(column).copied().flatten(),
        })
        .collect()
}

/// Whether at least one mapping entry targets an identifying field.
pub fn has_identifying_field(mapping: &[MappingEntry]) -> bool {
    mapping
        .iter()
        .any(|entry| entry.system_field.is_some_and(SystemField::is_identifying))
}

/// Whether `field` is already taken by a column other than `except_column`.
/// The selector disables taken fields so the mapping stays one-to-one on the
/// system-field side.
pub fn is_field_taken(mapping: &[MappingEntry], field: SystemField, except_column: &str) -> bool {
    mapping
        .iter()
        .any(|entry| entry.file_column != except_column && entry.system_field == Some(field))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorHandling {
    /// Abort the import on the first error.
    Strict,
    /// Skip bad rows and keep going.
    Skip,
}

/// Import-wide policy choices. A flat record with no cross-field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOptions {
    pub error_handling: ErrorHandling,
    pub default_status: String,
    pub default_currency: String,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            error_handling: ErrorHandling::Skip,
            default_status: "active".to_string(),
            default_currency: "EUR".to_string(),
        }
    }
}

/// One finding from the dry-run validator. Findings are data, not transport
/// errors: a response full of them is still a successful response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// 1-based row number in the uploaded file.
    pub row: u32,
    pub column: Option<String>,
    pub value: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub will_create: u32,
    pub will_skip_duplicates: u32,
}

/// Result of the server-side dry run. `can_proceed` is authoritative: the
/// client must never re-derive it from the counts (under skip-mode the
/// server may allow proceeding with errors present).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub total_rows: u32,
    pub summary: ValidationSummary,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub error_count: u32,
    pub can_proceed: bool,
}

/// Display caps for the validation issue lists. Truncation is UI-only: the
/// summary counts always reflect the true totals.
pub const MAX_ERRORS_SHOWN: usize = 20;
pub const MAX_WARNINGS_SHOWN: usize = 10;

/// Splits an issue list into the visible slice and the hidden remainder
/// ("+N more").
pub fn truncate_issues(issues: &[ValidationIssue], cap: usize) -> (&[ValidationIssue], usize) {
    let shown = issues.len().min(cap);
    (&issues[..shown], issues.len() - shown)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(row: u32) -> ValidationIssue {
        ValidationIssue {
            row,
            column: None,
            value: None,
            message: format!("fila {row} inválida"),
        }
    }

    #[test]
    fn initial_mapping_follows_suggestions() {
        let upload = UploadResponse {
            upload_id: "u1".into(),
            columns: vec!["Email".into(), "Key".into(), "Extra".into()],
            suggested_mapping: HashMap::from([
                ("Email".to_string(), Some(SystemField::ExternalUserId)),
                ("Key".to_string(), Some(SystemField::LicenseKey)),
                ("Extra".to_string(), None),
            ]),
            preview: vec![],
        };
        let mapping = initial_mapping(&upload);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping[0].system_field, Some(SystemField::ExternalUserId));
        assert_eq!(mapping[1].system_field, Some(SystemField::LicenseKey));
        assert_eq!(mapping[2].system_field, None);
        assert!(has_identifying_field(&mapping));
    }

    #[test]
    fn identifying_fields_are_the_fixed_pair() {
        for field in SystemField::ALL {
            assert_eq!(
                field.is_identifying(),
                matches!(field, SystemField::LicenseKey | SystemField::ExternalUserId)
            );
        }
        let mapping = vec![MappingEntry {
            file_column: "Notas".into(),
            system_field: Some(SystemField::Notes),
        }];
        assert!(!has_identifying_field(&mapping));
    }

    #[test]
    fn taken_fields_exclude_own_column() {
        let mapping = vec![
            MappingEntry {
                file_column: "A".into(),
                system_field: Some(SystemField::LicenseKey),
            },
            MappingEntry {
                file_column: "B".into(),
                system_field: None,
            },
        ];
        assert!(is_field_taken(&mapping, SystemField::LicenseKey, "B"));
        assert!(!is_field_taken(&mapping, SystemField::LicenseKey, "A"));
        assert!(!is_field_taken(&mapping, SystemField::Cost, "B"));
    }

    #[test]
    fn truncation_shows_caps_but_keeps_totals() {
        let errors: Vec<_> = (1..=37).map(issue).collect();
        let warnings: Vec<_> = (1..=15).map(issue).collect();

        let (shown_errors, hidden_errors) = truncate_issues(&errors, MAX_ERRORS_SHOWN);
        assert_eq!(shown_errors.len(), 20);
        assert_eq!(hidden_errors, 17);

        let (shown_warnings, hidden_warnings) = truncate_issues(&warnings, MAX_WARNINGS_SHOWN);
        assert_eq!(shown_warnings.len(), 10);
        assert_eq!(hidden_warnings, 5);

        // The true total is untouched by display truncation.
        assert_eq!(errors.len(), 37);

        let (all, hidden) = truncate_issues(&errors[..3], MAX_ERRORS_SHOWN);
        assert_eq!(all.len(), 3);
        assert_eq!(hidden, 0);
    }

    #[test]
    fn system_field_wire_names_round_trip() {
        for field in SystemField::ALL {
            assert_eq!(SystemField::from_wire(field.wire_name()), Some(field));
            let json = serde_json::to_value(field).unwrap();
            assert_eq!(json, serde_json::Value::String(field.wire_name().into()));
        }
        assert_eq!(SystemField::from_wire("licencia"), None);
    }

    #[test]
    fn options_defaults_match_the_product_defaults() {
        let options = ImportOptions::default();
        assert_eq!(options.error_handling, ErrorHandling::Skip);
        assert_eq!(options.default_status, "active");
        assert_eq!(options.default_currency, "EUR");
    }
}
