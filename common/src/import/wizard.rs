//! Step machine for the license import wizard.
//!
//! The wizard walks a fixed forward order of steps; every transition is a
//! pure mutation of [`WizardState`] driven by [`WizardEvent`]s, so the whole
//! machine is testable without a rendering layer. Side effects (upload,
//! validate, execute, poll) are requested through the [`SideEffect`] value
//! returned by [`WizardState::advance`] and performed by the component that
//! owns the state; their outcomes come back as events.
//!
//! Invariants
//! - `advance` never skips a step and is gated per step (identifying field
//!   mapped, server-side `can_proceed`, no execution in flight).
//! - `back` moves exactly one step and is refused on `Upload`/`Result` and
//!   while a side effect is in flight.
//! - `reset` restores the initial state exactly and bumps `generation`;
//!   async completions carrying a stale generation must be ignored.

use crate::import::{
    has_identifying_field, initial_mapping, ImportOptions, MappingEntry, SystemField,
    UploadResponse, ValidationResult,
};
use crate::jobs::ImportJob;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Upload,
    Mapping,
    Options,
    Validate,
    Execute,
    Result,
}

impl WizardStep {
    /// 1-based position for the step indicator ("Paso 3 de 6").
    pub fn position(self) -> usize {
        match self {
            WizardStep::Upload => 1,
            WizardStep::Mapping => 2,
            WizardStep::Options => 3,
            WizardStep::Validate => 4,
            WizardStep::Execute => 5,
            WizardStep::Result => 6,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Upload => "Subir archivo",
            WizardStep::Mapping => "Asignar columnas",
            WizardStep::Options => "Opciones",
            WizardStep::Validate => "Validación",
            WizardStep::Execute => "Importando",
            WizardStep::Result => "Resultado",
        }
    }
}

/// Side effect the owning component must perform after a successful
/// `advance`. The matching completion events feed back into `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Submit `{upload_id, mapping, options}` to the dry-run validator.
    Validate,
    /// Submit the confirmed import and start polling the job.
    Execute,
}

#[derive(Debug, Clone)]
pub enum WizardEvent {
    UploadStarted,
    UploadSucceeded(UploadResponse),
    UploadFailed(String),
    FieldMapped {
        file_column: String,
        system_field: Option<SystemField>,
    },
    OptionsChanged(ImportOptions),
    ValidationSucceeded(ValidationResult),
    ValidationFailed(String),
    JobUpdated(ImportJob),
    ExecutionFailed(String),
    Reset,
}

/// All transient wizard state, owned by the dialog component. Discarded on
/// reset; nothing here survives closing the dialog.
#[derive(Debug, Clone)]
pub struct WizardState {
    pub step: WizardStep,
    /// Bumped on every reset. Async completions compare it to detect
    /// responses that belong to a previous wizard run.
    pub generation: u32,
    pub upload: Option<UploadResponse>,
    pub mapping: Vec<MappingEntry>,
    pub options: ImportOptions,
    pub validation: Option<ValidationResult>,
    pub job: Option<ImportJob>,
    pub is_uploading: bool,
    pub is_validating: bool,
    pub is_executing: bool,
    pub upload_error: Option<String>,
    pub validation_error: Option<String>,
    pub execution_error: Option<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Upload,
            generation: 0,
            upload: None,
            mapping: Vec::new(),
            options: ImportOptions::default(),
            validation: None,
            job: None,
            is_uploading: false,
            is_validating: false,
            is_executing: false,
            upload_error: None,
            validation_error: None,
            execution_error: None,
        }
    }

    /// Whether a side-effecting call for this wizard is currently in flight.
    pub fn busy(&self) -> bool {
        self.is_uploading || self.is_validating || self.is_executing
    }

    /// Per-step gate for the "next" control. Upload auto-advances and Result
    /// only offers reset/close, so both report `false`.
    pub fn can_advance(&self) -> bool {
        match self.step {
            WizardStep::Upload | WizardStep::Result => false,
            WizardStep::Mapping => has_identifying_field(&self.mapping),
            WizardStep::Options => !self.is_validating,
            WizardStep::Validate => {
                self.validation.as_ref().is_some_and(|v| v.can_proceed) && !self.is_executing
            }
            // Execute has no "next" control: it resolves through job events.
            WizardStep::Execute => false,
        }
    }

    /// Moves forward one step when the current gate holds. Advancing out of
    /// `Options` keeps the step until validation succeeds; advancing out of
    /// `Validate` starts the execution effect.
    pub fn advance(&mut self) -> Option<SideEffect> {
        if !self.can_advance() {
            return None;
        }
        match self.step {
            WizardStep::Mapping => {
                self.step = WizardStep::Options;
                None
            }
            WizardStep::Options => {
                self.is_validating = true;
                self.validation_error = None;
                Some(SideEffect::Validate)
            }
            WizardStep::Validate => {
                self.step = WizardStep::Execute;
                self.is_executing = true;
                self.execution_error = None;
                Some(SideEffect::Execute)
            }
            WizardStep::Upload | WizardStep::Execute | WizardStep::Result => None,
        }
    }

    /// Moves exactly one step back. Refused on the endpoints of the flow and
    /// while a call is in flight.
    pub fn back(&mut self) -> bool {
        if self.busy() {
            return false;
        }
        let previous = match self.step {
            WizardStep::Upload | WizardStep::Result => return false,
            WizardStep::Mapping => WizardStep::Upload,
            WizardStep::Options => WizardStep::Mapping,
            WizardStep::Validate => WizardStep::Options,
            WizardStep::Execute => WizardStep::Validate,
        };
        // Results of later steps are stale once the user goes back.
        if self.step == WizardStep::Validate {
            self.validation = None;
        }
        self.step = previous;
        true
    }

    /// Applies an event; returns whether the view should re-render.
    pub fn apply(&mut self, event: WizardEvent) -> bool {
        match event {
            WizardEvent::UploadStarted => {
                self.is_uploading = true;
                self.upload_error = None;
                true
            }
            WizardEvent::UploadSucceeded(upload) => {
                self.mapping = initial_mapping(&upload);
                self.upload = Some(upload);
                self.is_uploading = false;
                self.upload_error = None;
                // Upload auto-advances on success.
                self.step = WizardStep::Mapping;
                true
            }
            WizardEvent::UploadFailed(message) => {
                // No partial handle is kept; the user stays on Upload.
                self.upload = None;
                self.is_uploading = false;
                self.upload_error = Some(message);
                true
            }
            WizardEvent::FieldMapped {
                file_column,
                system_field,
            } => {
                let Some(entry) = self
                    .mapping
                    .iter_mut()
                    .find(|entry| entry.file_column == file_column)
                else {
                    return false;
                };
                entry.system_field = system_field;
                true
            }
            WizardEvent::OptionsChanged(options) => {
                self.options = options;
                true
            }
            WizardEvent::ValidationSucceeded(result) => {
                self.validation = Some(result);
                self.is_validating = false;
                self.step = WizardStep::Validate;
                true
            }
            WizardEvent::ValidationFailed(message) => {
                self.is_validating = false;
                self.validation_error = Some(message);
                true
            }
            WizardEvent::JobUpdated(job) => {
                let terminal = job.status.is_terminal();
                if terminal {
                    self.is_executing = false;
                    if job.status == crate::jobs::ImportJobStatus::Failed {
                        self.execution_error = Some(
                            job.error_message
                                .clone()
                                .unwrap_or_else(|| "La importación falló".to_string()),
                        );
                    }
                    self.step = WizardStep::Result;
                }
                self.job = Some(job);
                true
            }
            WizardEvent::ExecutionFailed(message) => {
                // Execution failures terminate the wizard into Result,
                // showing whatever counts are available.
                self.is_executing = false;
                self.execution_error = Some(message);
                self.step = WizardStep::Result;
                true
            }
            WizardEvent::Reset => {
                let generation = self.generation.wrapping_add(1);
                *self = WizardState::new();
                self.generation = generation;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{ErrorHandling, ValidationSummary};
    use crate::jobs::ImportJobStatus;
    use std::collections::HashMap;

    fn upload_two_columns() -> UploadResponse {
        UploadResponse {
            upload_id: "u1".into(),
            columns: vec!["Email".into(), "Key".into()],
            suggested_mapping: HashMap::from([
                ("Email".to_string(), Some(SystemField::ExternalUserId)),
                ("Key".to_string(), Some(SystemField::LicenseKey)),
            ]),
            preview: vec![vec!["ana@corp.com".into(), "KEY-1".into()]],
        }
    }

    fn validation(can_proceed: bool, error_count: u32) -> ValidationResult {
        ValidationResult {
            total_rows: 10,
            summary: ValidationSummary {
                will_create: 8,
                will_skip_duplicates: 2,
            },
            errors: Vec::new(),
            warnings: Vec::new(),
            error_count,
            can_proceed,
        }
    }

    fn job(status: ImportJobStatus, progress: u32) -> ImportJob {
        ImportJob {
            job_id: "j1".into(),
            status,
            progress,
            processed_rows: progress / 10,
            total_rows: 10,
            created: 8,
            skipped: 2,
            errors: 0,
            error_message: None,
        }
    }

    #[test]
    fn advance_never_skips_and_back_moves_one_step() {
        let mut state = WizardState::new();
        assert_eq!(state.step, WizardStep::Upload);
        assert!(state.advance().is_none());

        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        assert_eq!(state.step, WizardStep::Mapping);

        assert!(state.advance().is_none());
        assert_eq!(state.step, WizardStep::Options);

        assert!(state.back());
        assert_eq!(state.step, WizardStep::Mapping);
        assert!(state.back());
        assert_eq!(state.step, WizardStep::Upload);
        assert!(!state.back());
        assert_eq!(state.step, WizardStep::Upload);
    }

    #[test]
    fn mapping_gate_requires_an_identifying_field() {
        let mut state = WizardState::new();
        let mut upload = upload_two_columns();
        upload.suggested_mapping = HashMap::from([
            ("Email".to_string(), None),
            ("Key".to_string(), None),
        ]);
        state.apply(WizardEvent::UploadSucceeded(upload));
        assert!(!state.can_advance());
        assert!(state.advance().is_none());
        assert_eq!(state.step, WizardStep::Mapping);

        // The instant one identifying field is mapped, advancing unblocks.
        state.apply(WizardEvent::FieldMapped {
            file_column: "Key".into(),
            system_field: Some(SystemField::LicenseKey),
        });
        assert!(state.can_advance());
        assert!(state.advance().is_none());
        assert_eq!(state.step, WizardStep::Options);
    }

    #[test]
    fn options_advance_triggers_validation_and_waits_for_it() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        state.advance();
        assert_eq!(state.step, WizardStep::Options);

        assert_eq!(state.advance(), Some(SideEffect::Validate));
        // Still on Options until the call succeeds; re-advance is blocked.
        assert_eq!(state.step, WizardStep::Options);
        assert!(state.is_validating);
        assert!(state.advance().is_none());

        state.apply(WizardEvent::ValidationFailed("sin conexión".into()));
        assert_eq!(state.step, WizardStep::Options);
        assert_eq!(state.validation_error.as_deref(), Some("sin conexión"));

        // Retry succeeds this time.
        assert_eq!(state.advance(), Some(SideEffect::Validate));
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 0)));
        assert_eq!(state.step, WizardStep::Validate);
        assert!(state.validation_error.is_none());
    }

    #[test]
    fn validation_gate_follows_can_proceed_not_error_count() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        state.advance();
        state.advance();

        // Errors present but the server allows proceeding (skip mode).
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 5)));
        assert!(state.can_advance());

        // Zero errors but the server says no: stay blocked.
        state.apply(WizardEvent::ValidationSucceeded(validation(false, 0)));
        assert!(!state.can_advance());
        assert!(state.advance().is_none());
        assert_eq!(state.step, WizardStep::Validate);
    }

    #[test]
    fn execute_blocks_double_submit() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        state.advance();
        state.advance();
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 0)));

        assert_eq!(state.advance(), Some(SideEffect::Execute));
        assert_eq!(state.step, WizardStep::Execute);
        assert!(state.is_executing);

        // While the job is in flight further triggers issue nothing.
        assert!(state.advance().is_none());
        assert!(state.advance().is_none());
    }

    #[test]
    fn execution_transport_failure_terminates_into_result() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        state.advance();
        state.advance();
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 0)));
        state.advance();

        state.apply(WizardEvent::ExecutionFailed("timeout".into()));
        assert_eq!(state.step, WizardStep::Result);
        assert!(!state.is_executing);
        assert_eq!(state.execution_error.as_deref(), Some("timeout"));
    }

    #[test]
    fn terminal_job_lands_on_result_whether_it_succeeded_or_failed() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        state.advance();
        state.advance();
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 0)));
        state.advance();

        state.apply(WizardEvent::JobUpdated(job(ImportJobStatus::Processing, 30)));
        assert_eq!(state.step, WizardStep::Execute);
        state.apply(WizardEvent::JobUpdated(job(ImportJobStatus::Processing, 70)));
        assert_eq!(state.step, WizardStep::Execute);
        state.apply(WizardEvent::JobUpdated(job(ImportJobStatus::Completed, 100)));
        assert_eq!(state.step, WizardStep::Result);
        assert!(!state.is_executing);
        let job = state.job.as_ref().unwrap();
        assert_eq!((job.created, job.skipped, job.errors), (8, 2, 0));

        // Failed jobs also terminate into Result, with the error surfaced.
        let mut failed = WizardState::new();
        failed.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        failed.advance();
        failed.advance();
        failed.apply(WizardEvent::ValidationSucceeded(validation(true, 0)));
        failed.advance();
        let mut j = job_with_failure();
        j.status = ImportJobStatus::Failed;
        failed.apply(WizardEvent::JobUpdated(j));
        assert_eq!(failed.step, WizardStep::Result);
        assert_eq!(failed.execution_error.as_deref(), Some("fila 4 corrupta"));
    }

    fn job_with_failure() -> ImportJob {
        let mut j = job(ImportJobStatus::Failed, 40);
        j.error_message = Some("fila 4 corrupta".into());
        j
    }

    #[test]
    fn reset_restores_initial_values_from_any_state() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        state.apply(WizardEvent::OptionsChanged(ImportOptions {
            error_handling: ErrorHandling::Strict,
            default_status: "suspended".into(),
            default_currency: "USD".into(),
        }));
        state.advance();
        state.advance();
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 3)));
        state.apply(WizardEvent::ExecutionFailed("timeout".into()));

        let generation_before = state.generation;
        state.apply(WizardEvent::Reset);

        assert_eq!(state.step, WizardStep::Upload);
        assert_eq!(state.generation, generation_before + 1);
        assert!(state.upload.is_none());
        assert!(state.mapping.is_empty());
        assert_eq!(state.options.error_handling, ErrorHandling::Skip);
        assert_eq!(state.options.default_status, "active");
        assert_eq!(state.options.default_currency, "EUR");
        assert!(state.validation.is_none());
        assert!(state.job.is_none());
        assert!(!state.busy());
        assert!(state.upload_error.is_none());
        assert!(state.validation_error.is_none());
        assert!(state.execution_error.is_none());

        // Resetting again yields the same initial values (idempotent apart
        // from the generation bump).
        state.apply(WizardEvent::Reset);
        assert_eq!(state.step, WizardStep::Upload);
        assert_eq!(state.generation, generation_before + 2);
        assert_eq!(state.options, ImportOptions::default());
    }

    #[test]
    fn going_back_from_validate_discards_the_stale_result() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        state.advance();
        state.advance();
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 0)));
        assert!(state.back());
        assert_eq!(state.step, WizardStep::Options);
        assert!(state.validation.is_none());
    }

    #[test]
    fn upload_failure_keeps_no_partial_handle() {
        let mut state = WizardState::new();
        state.apply(WizardEvent::UploadStarted);
        assert!(state.is_uploading);
        state.apply(WizardEvent::UploadFailed("archivo vacío".into()));
        assert_eq!(state.step, WizardStep::Upload);
        assert!(state.upload.is_none());
        assert!(!state.is_uploading);
        assert_eq!(state.upload_error.as_deref(), Some("archivo vacío"));
    }

    #[test]
    fn end_to_end_scenario() {
        let mut state = WizardState::new();

        // Upload: both columns come back pre-mapped.
        state.apply(WizardEvent::UploadStarted);
        state.apply(WizardEvent::UploadSucceeded(upload_two_columns()));
        assert_eq!(state.step, WizardStep::Mapping);
        assert!(has_identifying_field(&state.mapping));
        assert!(state.can_advance());

        // Mapping → Options with the defaults untouched.
        state.advance();
        assert_eq!(state.step, WizardStep::Options);
        assert_eq!(state.options, ImportOptions::default());

        // Options → Validate via the dry run.
        assert_eq!(state.advance(), Some(SideEffect::Validate));
        state.apply(WizardEvent::ValidationSucceeded(validation(true, 0)));
        assert_eq!(state.step, WizardStep::Validate);
        let v = state.validation.as_ref().unwrap();
        assert_eq!(v.summary.will_create, 8);
        assert_eq!(v.summary.will_skip_duplicates, 2);

        // Validate → Execute → poll to completion.
        assert_eq!(state.advance(), Some(SideEffect::Execute));
        state.apply(WizardEvent::JobUpdated(job(ImportJobStatus::Processing, 30)));
        state.apply(WizardEvent::JobUpdated(job(ImportJobStatus::Processing, 70)));
        state.apply(WizardEvent::JobUpdated(job(ImportJobStatus::Completed, 100)));

        assert_eq!(state.step, WizardStep::Result);
        let job = state.job.as_ref().unwrap();
        assert_eq!(job.created, 8);
        assert_eq!(job.skipped, 2);
        assert_eq!(job.errors, 0);
        assert!(state.execution_error.is_none());
    }
}
