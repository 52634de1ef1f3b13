//! Update logic for the import wizard.
//!
//! Step transitions are delegated to the pure machine in
//! `common::import::wizard`; this module performs the side effects the
//! machine requests (upload, dry-run validation, execute + poll) and feeds
//! their outcomes back as events. Every spawned task carries the generation
//! it started under, and the poll loop additionally watches the shared
//! generation cell so a reset stops it instead of letting a stale response
//! land in a fresh wizard.

use common::import::wizard::{SideEffect, WizardEvent};
use common::jobs::ImportJobStatus;
use common::requests::{ExecuteImportRequest, ValidateImportRequest};
use gloo_console::error;
use gloo_timers::future::TimeoutFuture;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api;
use crate::toast::{show_error_toast, show_toast};

use super::messages::Msg;
use super::state::ImportWizard;

const POLL_INTERVAL_MS: u32 = 1_000;
/// Poll budget: a job that is still not terminal after 10 minutes is
/// reported as an execution failure instead of spinning forever.
const MAX_POLLS: u32 = 600;

pub fn update(component: &mut ImportWizard, ctx: &Context<ImportWizard>, msg: Msg) -> bool {
    match msg {
        Msg::FileSelected(file) => {
            if component.wizard.is_uploading {
                return false;
            }
            component.drag_active = false;
            component.wizard.apply(WizardEvent::UploadStarted);
            start_upload(component, ctx, file);
            true
        }
        Msg::DragStateChanged(active) => {
            if component.drag_active == active {
                return false;
            }
            component.drag_active = active;
            true
        }
        Msg::DownloadTemplate => {
            // Not a wizard step: failures go to the host's error channel
            // only, never into the wizard's own error slots.
            let provider_id = ctx.props().provider_id.clone();
            let on_error = ctx.props().on_error.clone();
            spawn_local(async move {
                if let Err(e) = api::download_import_template(&provider_id, true).await {
                    let message = format!("No se pudo descargar la plantilla: {e}");
                    show_error_toast(&message);
                    on_error.emit(message);
                }
            });
            false
        }
        Msg::FieldMapped {
            file_column,
            system_field,
        } => component.wizard.apply(WizardEvent::FieldMapped {
            file_column,
            system_field,
        }),
        Msg::ErrorHandlingChanged(error_handling) => {
            let mut options = component.wizard.options.clone();
            options.error_handling = error_handling;
            component.wizard.apply(WizardEvent::OptionsChanged(options))
        }
        Msg::DefaultStatusChanged(status) => {
            let mut options = component.wizard.options.clone();
            options.default_status = status;
            component.wizard.apply(WizardEvent::OptionsChanged(options))
        }
        Msg::DefaultCurrencyChanged(currency) => {
            let mut options = component.wizard.options.clone();
            options.default_currency = currency;
            component.wizard.apply(WizardEvent::OptionsChanged(options))
        }
        Msg::Next => {
            match component.wizard.advance() {
                Some(SideEffect::Validate) => start_validation(component, ctx),
                Some(SideEffect::Execute) => start_execution(component, ctx),
                None => {}
            }
            true
        }
        Msg::BackStep => component.wizard.back(),
        Msg::StartNew => {
            component.wizard.apply(WizardEvent::Reset);
            component.sync_generation();
            true
        }
        Msg::Close => {
            // Implicit reset: reopening must never show stale data, and the
            // generation bump stops any in-flight poll loop.
            component.wizard.apply(WizardEvent::Reset);
            component.sync_generation();
            ctx.props().on_close.emit(());
            false
        }

        Msg::UploadFinished(generation, result) => {
            if !component.is_current(generation) {
                return false;
            }
            match result {
                Ok(upload) => component.wizard.apply(WizardEvent::UploadSucceeded(upload)),
                Err(e) => {
                    let message = e.to_string();
                    ctx.props().on_error.emit(message.clone());
                    component.wizard.apply(WizardEvent::UploadFailed(message))
                }
            }
        }
        Msg::ValidationFinished(generation, result) => {
            if !component.is_current(generation) {
                return false;
            }
            match result {
                Ok(validation) => component
                    .wizard
                    .apply(WizardEvent::ValidationSucceeded(validation)),
                Err(e) => {
                    let message = e.to_string();
                    ctx.props().on_error.emit(message.clone());
                    component
                        .wizard
                        .apply(WizardEvent::ValidationFailed(message))
                }
            }
        }
        Msg::ExecutionRequestFailed(generation, e) => {
            if !component.is_current(generation) {
                return false;
            }
            let message = e.to_string();
            ctx.props().on_error.emit(message.clone());
            component.wizard.apply(WizardEvent::ExecutionFailed(message))
        }
        Msg::JobPolled(generation, job) => {
            if !component.is_current(generation) {
                return false;
            }
            let status = job.status;
            let failure = job.error_message.clone();
            let changed = component.wizard.apply(WizardEvent::JobUpdated(job));
            match status {
                ImportJobStatus::Completed => {
                    show_toast("Importación completada.");
                    if let Some(job) = component.wizard.job.clone() {
                        ctx.props().on_success.emit(job);
                    }
                }
                ImportJobStatus::Failed => {
                    ctx.props()
                        .on_error
                        .emit(failure.unwrap_or_else(|| "La importación falló".to_string()));
                }
                _ => {}
            }
            changed
        }
        Msg::PollFailed(generation, message) => {
            if !component.is_current(generation) {
                return false;
            }
            ctx.props().on_error.emit(message.clone());
            component.wizard.apply(WizardEvent::ExecutionFailed(message))
        }
    }
}

fn start_upload(component: &ImportWizard, ctx: &Context<ImportWizard>, file: web_sys::File) {
    let link = ctx.link().clone();
    let provider_id = ctx.props().provider_id.clone();
    let generation = component.wizard.generation;
    spawn_local(async move {
        let result = api::upload_import_file(&provider_id, &file).await;
        link.send_message(Msg::UploadFinished(generation, result));
    });
}

fn start_validation(component: &ImportWizard, ctx: &Context<ImportWizard>) {
    let Some(upload) = component.wizard.upload.as_ref() else {
        return;
    };
    let request = ValidateImportRequest {
        upload_id: upload.upload_id.clone(),
        column_mapping: component.wizard.mapping.clone(),
        options: component.wizard.options.clone(),
    };
    let link = ctx.link().clone();
    let generation = component.wizard.generation;
    spawn_local(async move {
        let result = api::validate_import(&request).await;
        link.send_message(Msg::ValidationFinished(generation, result));
    });
}

fn start_execution(component: &ImportWizard, ctx: &Context<ImportWizard>) {
    let Some(upload) = component.wizard.upload.as_ref() else {
        return;
    };
    let request = ExecuteImportRequest {
        upload_id: upload.upload_id.clone(),
        column_mapping: component.wizard.mapping.clone(),
        options: component.wizard.options.clone(),
        confirmed: true,
    };
    let link = ctx.link().clone();
    let generation = component.wizard.generation;
    let live_generation = component.live_generation.clone();

    spawn_local(async move {
        let job_id = match api::execute_import(&request).await {
            Ok(response) => response.job_id,
            Err(e) => {
                link.send_message(Msg::ExecutionRequestFailed(generation, e));
                return;
            }
        };

        // One status fetch per non-terminal observation, one sleep between
        // fetches. The loop dies silently when the wizard moved on.
        let mut polls = 0u32;
        loop {
            if live_generation.get() != generation {
                return;
            }
            match api::fetch_import_job(&job_id).await {
                Ok(job) => {
                    let terminal = job.status.is_terminal();
                    link.send_message(Msg::JobPolled(generation, job));
                    if terminal {
                        return;
                    }
                }
                Err(e) => {
                    error!("poll failed for job", job_id.clone(), e.to_string());
                    link.send_message(Msg::PollFailed(generation, e.to_string()));
                    return;
                }
            }
            polls += 1;
            if polls >= MAX_POLLS {
                link.send_message(Msg::PollFailed(
                    generation,
                    "La importación sigue en curso en el servidor; vuelve a consultarla más tarde."
                        .to_string(),
                ));
                return;
            }
            TimeoutFuture::new(POLL_INTERVAL_MS).await;
        }
    });
}
