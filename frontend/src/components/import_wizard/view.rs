//! View rendering for the import wizard. One builder function per step,
//! plus the shared header/footer chrome.

use common::import::wizard::WizardStep;
use common::import::{
    has_identifying_field, is_field_taken, truncate_issues, ErrorHandling, SystemField,
    ValidationIssue, MAX_ERRORS_SHOWN, MAX_WARNINGS_SHOWN,
};
use web_sys::{DragEvent, Event, HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ImportWizard;

pub fn view(component: &ImportWizard, ctx: &Context<ImportWizard>) -> Html {
    let link = ctx.link();
    let step = component.wizard.step;

    html! {
        <div class="wizard-card" style="background:#fff;border-radius:8px;max-width:720px;margin:auto;box-shadow:0 4px 24px rgba(0,0,0,0.25);display:flex;flex-direction:column;">
            { build_header(component, ctx) }
            <div class="wizard-body" style="padding:16px 24px;min-height:280px;">
                {
                    match step {
                        WizardStep::Upload => build_upload_step(component, link),
                        WizardStep::Mapping => build_mapping_step(component, link),
                        WizardStep::Options => build_options_step(component, link),
                        WizardStep::Validate => build_validate_step(component),
                        WizardStep::Execute => build_execute_step(component),
                        WizardStep::Result => build_result_step(component),
                    }
                }
            </div>
            { build_footer(component, link) }
        </div>
    }
}

fn build_header(component: &ImportWizard, ctx: &Context<ImportWizard>) -> Html {
    let link = ctx.link();
    let step = component.wizard.step;
    html! {
        <div class="wizard-header" style="display:flex;align-items:center;justify-content:space-between;padding:16px 24px;border-bottom:1px solid #e0e0e0;">
            <div>
                <h2 style="margin:0;font-size:1.2rem;">
                    { format!("Importar licencias — {}", ctx.props().provider_name) }
                </h2>
                <span style="color:#757575;font-size:0.85rem;">
                    { format!("Paso {} de 6: {}", step.position(), step.title()) }
                </span>
            </div>
            <button class="icon-btn" title="Cerrar" onclick={link.callback(|_| Msg::Close)}>
                <i class="material-icons">{"close"}</i>
            </button>
        </div>
    }
}

fn build_upload_step(component: &ImportWizard, link: &Scope<ImportWizard>) -> Html {
    let on_drop = link.callback(|e: DragEvent| {
        e.prevent_default();
        match e
            .data_transfer()
            .and_then(|dt| dt.files())
            .and_then(|files| files.get(0))
        {
            Some(file) => Msg::FileSelected(file),
            None => Msg::DragStateChanged(false),
        }
    });
    let on_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::DragStateChanged(true)
    });
    let on_drag_leave = link.callback(|_: DragEvent| Msg::DragStateChanged(false));
    let on_file_change = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        match input.files().and_then(|files| files.get(0)) {
            Some(file) => Msg::FileSelected(file),
            None => Msg::DragStateChanged(false),
        }
    });
    let open_picker = {
        let input_ref = component.file_input_ref.clone();
        Callback::from(move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                input.click();
            }
        })
    };

    let zone_style = if component.drag_active {
        "border:2px dashed #1976d2;background:#e3f2fd;"
    } else {
        "border:2px dashed #bdbdbd;background:#fafafa;"
    };

    html! {
        <div>
            <div
                ondrop={on_drop}
                ondragover={on_drag_over}
                ondragleave={on_drag_leave}
                style={format!("{zone_style}border-radius:8px;padding:40px;text-align:center;cursor:pointer;")}
                onclick={open_picker}
            >
                <i class="material-icons" style="font-size:42px;color:#757575;">{"upload_file"}</i>
                <p>{"Arrastra un archivo CSV aquí o haz clic para elegirlo"}</p>
                <input
                    type="file"
                    accept=".csv,text/csv"
                    ref={component.file_input_ref.clone()}
                    style="display:none;"
                    onchange={on_file_change}
                />
            </div>

            {
                if component.wizard.is_uploading {
                    html! { <p style="color:#1976d2;">{"Subiendo y analizando el archivo..."}</p> }
                } else {
                    html! {}
                }
            }
            { inline_error(component.wizard.upload_error.as_deref()) }

            <div style="margin-top:16px;">
                <button class="text-btn" onclick={link.callback(|_| Msg::DownloadTemplate)}>
                    <i class="material-icons" style="vertical-align:middle;">{"download"}</i>
                    { " Descargar plantilla de ejemplo" }
                </button>
            </div>
        </div>
    }
}

fn build_mapping_step(component: &ImportWizard, link: &Scope<ImportWizard>) -> Html {
    let mapping = &component.wizard.mapping;
    let preview_row = component
        .wizard
        .upload
        .as_ref()
        .and_then(|u| u.preview.first());

    html! {
        <div>
            <p>{"Asigna cada columna del archivo a un campo del sistema."}</p>
            {
                if !has_identifying_field(mapping) {
                    html! {
                        <p style="color:#e65100;background:#fff3e0;padding:8px 12px;border-radius:4px;">
                            {"Asigna al menos una columna a \"Clave de licencia\" o \"ID de usuario externo\" para continuar."}
                        </p>
                    }
                } else {
                    html! {}
                }
            }
            <table style="width:100%;border-collapse:collapse;">
                <thead>
                    <tr style="text-align:left;border-bottom:1px solid #e0e0e0;">
                        <th style="padding:6px 8px;">{"Columna del archivo"}</th>
                        <th style="padding:6px 8px;">{"Ejemplo"}</th>
                        <th style="padding:6px 8px;">{"Campo del sistema"}</th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for mapping.iter().enumerate().map(|(idx, entry)| {
                            let column = entry.file_column.clone();
                            let example = preview_row
                                .and_then(|row| row.get(idx))
                                .cloned()
                                .unwrap_or_default();
                            let on_change = {
                                let column = column.clone();
                                link.callback(move |e: Event| {
                                    let select: HtmlSelectElement = e.target_unchecked_into();
                                    Msg::FieldMapped {
                                        file_column: column.clone(),
                                        system_field: SystemField::from_wire(&select.value()),
                                    }
                                })
                            };
                            html! {
                                <tr style="border-bottom:1px solid #f5f5f5;">
                                    <td style="padding:6px 8px;font-weight:bold;">{ &entry.file_column }</td>
                                    <td style="padding:6px 8px;color:#757575;">{ example }</td>
                                    <td style="padding:6px 8px;">
                                        <select onchange={on_change}>
                                            <option value="" selected={entry.system_field.is_none()}>
                                                {"— Ignorar —"}
                                            </option>
                                            {
                                                for SystemField::ALL.iter().map(|field| {
                                                    let taken = is_field_taken(mapping, *field, &entry.file_column);
                                                    html! {
                                                        <option
                                                            value={field.wire_name()}
                                                            selected={entry.system_field == Some(*field)}
                                                            disabled={taken}
                                                        >
                                                            { field.label() }
                                                        </option>
                                                    }
                                                })
                                            }
                                        </select>
                                    </td>
                                </tr>
                            }
                        })
                    }
                </tbody>
            </table>
        </div>
    }
}

fn build_options_step(component: &ImportWizard, link: &Scope<ImportWizard>) -> Html {
    let options = &component.wizard.options;
    let on_error_handling = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::ErrorHandlingChanged(if select.value() == "strict" {
            ErrorHandling::Strict
        } else {
            ErrorHandling::Skip
        })
    });
    let on_status = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::DefaultStatusChanged(select.value())
    });
    let on_currency = link.callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::DefaultCurrencyChanged(input.value())
    });

    html! {
        <div style="display:flex;flex-direction:column;gap:16px;max-width:420px;">
            <label>
                {"Manejo de errores"}
                <select onchange={on_error_handling} style="display:block;margin-top:4px;">
                    <option value="skip" selected={options.error_handling == ErrorHandling::Skip}>
                        {"Omitir filas con errores"}
                    </option>
                    <option value="strict" selected={options.error_handling == ErrorHandling::Strict}>
                        {"Detener en el primer error"}
                    </option>
                </select>
            </label>
            <label>
                {"Estado por defecto"}
                <select onchange={on_status} style="display:block;margin-top:4px;">
                    <option value="active" selected={options.default_status == "active"}>{"Activa"}</option>
                    <option value="suspended" selected={options.default_status == "suspended"}>{"Suspendida"}</option>
                </select>
            </label>
            <label>
                {"Moneda por defecto"}
                <input
                    type="text"
                    value={options.default_currency.clone()}
                    oninput={on_currency}
                    maxlength="3"
                    style="display:block;margin-top:4px;width:80px;"
                />
            </label>
            { inline_error(component.wizard.validation_error.as_deref()) }
            {
                if component.wizard.is_validating {
                    html! { <p style="color:#1976d2;">{"Validando la importación..."}</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_validate_step(component: &ImportWizard) -> Html {
    let Some(validation) = component.wizard.validation.as_ref() else {
        return html! { <p>{"Sin resultados de validación."}</p> };
    };
    let (errors_shown, errors_hidden) = truncate_issues(&validation.errors, MAX_ERRORS_SHOWN);
    let (warnings_shown, warnings_hidden) =
        truncate_issues(&validation.warnings, MAX_WARNINGS_SHOWN);

    html! {
        <div>
            <div style="display:flex;gap:24px;margin-bottom:16px;">
                { summary_box("Filas", validation.total_rows, "#1976d2") }
                { summary_box("Se crearán", validation.summary.will_create, "#2e7d32") }
                { summary_box("Duplicados omitidos", validation.summary.will_skip_duplicates, "#757575") }
                { summary_box("Errores", validation.error_count, "#c62828") }
            </div>
            {
                if !validation.can_proceed {
                    html! {
                        <p style="color:#c62828;background:#ffebee;padding:8px 12px;border-radius:4px;">
                            {"La validación impide continuar. Corrige el archivo o el mapeo e inténtalo de nuevo."}
                        </p>
                    }
                } else {
                    html! {}
                }
            }
            { issue_list("Errores", errors_shown, errors_hidden, "#c62828") }
            { issue_list("Advertencias", warnings_shown, warnings_hidden, "#e65100") }
        </div>
    }
}

fn summary_box(label: &str, value: u32, color: &str) -> Html {
    html! {
        <div style="text-align:center;">
            <div style={format!("font-size:1.6rem;font-weight:bold;color:{color};")}>{ value }</div>
            <div style="color:#757575;font-size:0.85rem;">{ label }</div>
        </div>
    }
}

fn issue_list(title: &str, shown: &[ValidationIssue], hidden: usize, color: &str) -> Html {
    if shown.is_empty() {
        return html! {};
    }
    html! {
        <div style="margin-top:12px;">
            <h3 style={format!("margin:4px 0;color:{color};font-size:1rem;")}>{ title }</h3>
            <ul style="margin:0;padding-left:20px;max-height:180px;overflow-y:auto;">
                {
                    for shown.iter().map(|issue| {
                        let place = match &issue.column {
                            Some(column) => format!("Fila {}, columna '{}'", issue.row, column),
                            None => format!("Fila {}", issue.row),
                        };
                        let value = issue
                            .value
                            .as_ref()
                            .map(|v| format!(" (valor: '{v}')"))
                            .unwrap_or_default();
                        html! { <li>{ format!("{place}: {}{value}", issue.message) }</li> }
                    })
                }
            </ul>
            {
                if hidden > 0 {
                    html! { <p style="color:#757575;margin:4px 0 0 20px;">{ format!("+{hidden} más") }</p> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn build_execute_step(component: &ImportWizard) -> Html {
    let (progress, processed, total) = component
        .wizard
        .job
        .as_ref()
        .map(|job| (job.progress, job.processed_rows, job.total_rows))
        .unwrap_or((0, 0, 0));

    html! {
        <div style="text-align:center;padding:24px 0;">
            <p>{"Importando licencias, no cierres esta ventana..."}</p>
            <div style="background:#e0e0e0;border-radius:4px;height:12px;max-width:420px;margin:16px auto;">
                <div style={format!(
                    "background:#1976d2;border-radius:4px;height:12px;width:{}%;transition:width 0.3s;",
                    progress.min(100)
                )} />
            </div>
            <p style="color:#757575;">
                { format!("{progress}% — {processed} de {total} filas procesadas") }
            </p>
        </div>
    }
}

fn build_result_step(component: &ImportWizard) -> Html {
    let (created, skipped, errors) = component
        .wizard
        .job
        .as_ref()
        .map(|job| (job.created, job.skipped, job.errors))
        .unwrap_or((0, 0, 0));
    let failed = component.wizard.execution_error.is_some();

    html! {
        <div style="text-align:center;padding:16px 0;">
            {
                if failed {
                    html! {
                        <>
                            <i class="material-icons" style="font-size:48px;color:#c62828;">{"error_outline"}</i>
                            { inline_error(component.wizard.execution_error.as_deref()) }
                        </>
                    }
                } else {
                    html! {
                        <i class="material-icons" style="font-size:48px;color:#2e7d32;">{"check_circle"}</i>
                    }
                }
            }
            <div style="display:flex;gap:24px;justify-content:center;margin-top:16px;">
                { summary_box("Creadas", created, "#2e7d32") }
                { summary_box("Omitidas", skipped, "#757575") }
                { summary_box("Errores", errors, "#c62828") }
            </div>
        </div>
    }
}

fn build_footer(component: &ImportWizard, link: &Scope<ImportWizard>) -> Html {
    let wizard = &component.wizard;
    let back_visible = !matches!(wizard.step, WizardStep::Upload | WizardStep::Result);
    let next_label = match wizard.step {
        WizardStep::Mapping => Some("Continuar"),
        WizardStep::Options => Some("Validar"),
        WizardStep::Validate => Some("Importar"),
        _ => None,
    };

    html! {
        <div class="wizard-footer" style="display:flex;justify-content:space-between;padding:16px 24px;border-top:1px solid #e0e0e0;">
            <div>
                {
                    if back_visible {
                        html! {
                            <button
                                class="text-btn"
                                disabled={wizard.busy()}
                                onclick={link.callback(|_| Msg::BackStep)}
                            >
                                {"Atrás"}
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
            <div style="display:flex;gap:8px;">
                {
                    if wizard.step == WizardStep::Result {
                        html! {
                            <>
                                <button class="text-btn" onclick={link.callback(|_| Msg::StartNew)}>
                                    {"Nueva importación"}
                                </button>
                                <button class="primary-btn" onclick={link.callback(|_| Msg::Close)}>
                                    {"Cerrar"}
                                </button>
                            </>
                        }
                    } else if let Some(label) = next_label {
                        html! {
                            <button
                                class="primary-btn"
                                disabled={!wizard.can_advance()}
                                onclick={link.callback(|_| Msg::Next)}
                            >
                                { label }
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

fn inline_error(error: Option<&str>) -> Html {
    match error {
        Some(message) => html! {
            <p style="color:#c62828;background:#ffebee;padding:8px 12px;border-radius:4px;">
                { message }
            </p>
        },
        None => html! {},
    }
}
