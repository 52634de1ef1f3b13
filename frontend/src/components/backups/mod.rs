//! Encrypted backups: archive list, password-gated creation, restore with a
//! typed confirmation, and the scheduler settings.

use common::model::backup::{format_size, parse_retention, BackupInfo, BackupSchedule};
use common::requests::{CreateBackupRequest, RestoreBackupRequest, UpdateScheduleRequest};
use web_sys::{Event, HtmlInputElement, HtmlSelectElement, InputEvent};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::toast::{show_error_toast, show_toast};
use crate::tops_sheet::{close_top_sheet, open_top_sheet, TopSheet};

/// The word the admin must type before a restore is sent.
const RESTORE_CONFIRMATION: &str = "RESTAURAR";

pub struct BackupsPage {
    backups: Vec<BackupInfo>,
    schedule: BackupSchedule,
    create_sheet_ref: NodeRef,
    restore_sheet_ref: NodeRef,
    create_password: String,
    create_password_repeat: String,
    restore_target: Option<BackupInfo>,
    restore_password: String,
    restore_typed: String,
    retention_input: String,
    busy: bool,
    error: Option<String>,
    loaded: bool,
}

pub enum Msg {
    BackupsLoaded(Result<Vec<BackupInfo>, ApiError>),
    ScheduleLoaded(Result<BackupSchedule, ApiError>),
    OpenCreate,
    CreatePasswordChanged(String),
    CreatePasswordRepeatChanged(String),
    ConfirmCreate,
    CreateFinished(Result<BackupInfo, ApiError>),
    OpenRestore(BackupInfo),
    RestorePasswordChanged(String),
    RestoreTypedChanged(String),
    ConfirmRestore,
    RestoreFinished(Result<(), ApiError>),
    CloseSheets,
    ScheduleEnabledToggled,
    IntervalChanged(u32),
    RetentionChanged(String),
    SaveSchedule,
    ScheduleSaved(Result<BackupSchedule, ApiError>),
}

impl Component for BackupsPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            backups: Vec::new(),
            schedule: BackupSchedule::default(),
            create_sheet_ref: NodeRef::default(),
            restore_sheet_ref: NodeRef::default(),
            create_password: String::new(),
            create_password_repeat: String::new(),
            restore_target: None,
            restore_password: String::new(),
            restore_typed: String::new(),
            retention_input: BackupSchedule::default().retention.to_string(),
            busy: false,
            error: None,
            loaded: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::BackupsLoaded(Ok(mut backups)) => {
                // Newest first.
                backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                self.backups = backups;
                self.error = None;
                true
            }
            Msg::BackupsLoaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            Msg::ScheduleLoaded(Ok(schedule)) => {
                self.retention_input = schedule.retention.to_string();
                self.schedule = schedule;
                true
            }
            Msg::ScheduleLoaded(Err(e)) => {
                show_error_toast(&format!("No se pudo cargar la programación: {e}"));
                false
            }
            Msg::OpenCreate => {
                self.create_password.clear();
                self.create_password_repeat.clear();
                open_top_sheet(self.create_sheet_ref.clone());
                true
            }
            Msg::CreatePasswordChanged(value) => {
                self.create_password = value;
                true
            }
            Msg::CreatePasswordRepeatChanged(value) => {
                self.create_password_repeat = value;
                true
            }
            Msg::ConfirmCreate => {
                if !self.can_create() || self.busy {
                    return false;
                }
                self.busy = true;
                let request = CreateBackupRequest {
                    password: self.create_password.clone(),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::CreateFinished(api::create_backup(&request).await));
                });
                true
            }
            Msg::CreateFinished(Ok(backup)) => {
                self.busy = false;
                self.backups.insert(0, backup);
                close_top_sheet(self.create_sheet_ref.clone());
                show_toast("Copia de seguridad creada.");
                true
            }
            Msg::CreateFinished(Err(e)) => {
                self.busy = false;
                show_error_toast(&format!("No se pudo crear la copia: {e}"));
                true
            }
            Msg::OpenRestore(backup) => {
                self.restore_target = Some(backup);
                self.restore_password.clear();
                self.restore_typed.clear();
                open_top_sheet(self.restore_sheet_ref.clone());
                true
            }
            Msg::RestorePasswordChanged(value) => {
                self.restore_password = value;
                true
            }
            Msg::RestoreTypedChanged(value) => {
                self.restore_typed = value;
                true
            }
            Msg::ConfirmRestore => {
                let Some(target) = &self.restore_target else {
                    return false;
                };
                if !self.can_restore() || self.busy {
                    return false;
                }
                self.busy = true;
                let request = RestoreBackupRequest {
                    backup_id: target.id.clone(),
                    password: self.restore_password.clone(),
                    confirmed: true,
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::RestoreFinished(api::restore_backup(&request).await));
                });
                true
            }
            Msg::RestoreFinished(Ok(())) => {
                self.busy = false;
                self.restore_target = None;
                close_top_sheet(self.restore_sheet_ref.clone());
                show_toast("Copia restaurada. Los datos han sido reemplazados.");
                load_backups(ctx);
                true
            }
            Msg::RestoreFinished(Err(e)) => {
                self.busy = false;
                show_error_toast(&format!("No se pudo restaurar: {e}"));
                true
            }
            Msg::CloseSheets => {
                close_top_sheet(self.create_sheet_ref.clone());
                close_top_sheet(self.restore_sheet_ref.clone());
                self.restore_target = None;
                true
            }
            Msg::ScheduleEnabledToggled => {
                self.schedule.enabled = !self.schedule.enabled;
                true
            }
            Msg::IntervalChanged(hours) => {
                self.schedule.interval_hours = hours;
                true
            }
            Msg::RetentionChanged(value) => {
                self.retention_input = value;
                true
            }
            Msg::SaveSchedule => {
                if self.busy {
                    return false;
                }
                self.schedule.retention = parse_retention(&self.retention_input);
                self.retention_input = self.schedule.retention.to_string();
                self.busy = true;
                let request = UpdateScheduleRequest {
                    schedule: self.schedule.clone(),
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::ScheduleSaved(api::update_schedule(&request).await));
                });
                true
            }
            Msg::ScheduleSaved(Ok(schedule)) => {
                self.busy = false;
                self.retention_input = schedule.retention.to_string();
                self.schedule = schedule;
                show_toast("Programación guardada.");
                true
            }
            Msg::ScheduleSaved(Err(e)) => {
                self.busy = false;
                show_error_toast(&format!("No se pudo guardar la programación: {e}"));
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            load_backups(ctx);
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::ScheduleLoaded(api::fetch_schedule().await));
            });
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div>
                <div style="display:flex;align-items:center;justify-content:space-between;max-width:720px;">
                    <h1 style="font-size:1.4rem;">{"Copias de seguridad"}</h1>
                    <button class="primary-btn" onclick={link.callback(|_| Msg::OpenCreate)}>
                        {"Crear copia"}
                    </button>
                </div>
                {
                    if let Some(error) = &self.error {
                        html! { <p style="color:#c62828;">{ error }</p> }
                    } else {
                        html! {}
                    }
                }
                { self.build_backup_table(link) }
                { self.build_schedule_form(link) }
                <TopSheet node_ref={self.create_sheet_ref.clone()}>
                    { self.build_create_sheet(link) }
                </TopSheet>
                <TopSheet node_ref={self.restore_sheet_ref.clone()}>
                    { self.build_restore_sheet(link) }
                </TopSheet>
            </div>
        }
    }
}

impl BackupsPage {
    fn can_create(&self) -> bool {
        !self.create_password.is_empty() && self.create_password == self.create_password_repeat
    }

    fn can_restore(&self) -> bool {
        !self.restore_password.is_empty() && self.restore_typed == RESTORE_CONFIRMATION
    }

    fn build_backup_table(&self, link: &html::Scope<Self>) -> Html {
        if self.backups.is_empty() {
            return html! {
                <p style="color:#757575;">{"Todavía no hay copias de seguridad."}</p>
            };
        }
        html! {
            <table style="width:100%;border-collapse:collapse;background:#fff;border-radius:8px;max-width:720px;">
                <thead>
                    <tr style="text-align:left;border-bottom:1px solid #e0e0e0;">
                        <th style="padding:8px;">{"Fecha"}</th>
                        <th style="padding:8px;">{"Tamaño"}</th>
                        <th style="padding:8px;">{"Origen"}</th>
                        <th style="padding:8px;"></th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for self.backups.iter().map(|backup| {
                            let restore = {
                                let backup = backup.clone();
                                link.callback(move |_| Msg::OpenRestore(backup.clone()))
                            };
                            html! {
                                <tr style="border-bottom:1px solid #f5f5f5;">
                                    <td style="padding:8px;">{ &backup.created_at }</td>
                                    <td style="padding:8px;">{ format_size(backup.size_bytes) }</td>
                                    <td style="padding:8px;color:#757575;">
                                        { if backup.scheduled { "Programada" } else { "Manual" } }
                                        { if backup.encrypted { " · cifrada" } else { "" } }
                                    </td>
                                    <td style="padding:8px;">
                                        <button class="icon-btn" title="Restaurar" onclick={restore}>
                                            <i class="material-icons">{"restore"}</i>
                                        </button>
                                    </td>
                                </tr>
                            }
                        })
                    }
                </tbody>
            </table>
        }
    }

    fn build_schedule_form(&self, link: &html::Scope<Self>) -> Html {
        let on_interval = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::IntervalChanged(select.value().parse().unwrap_or(24))
        });
        let on_retention = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::RetentionChanged(input.value())
        });

        html! {
            <div style="background:#fff;border-radius:8px;padding:16px;box-shadow:0 1px 4px rgba(0,0,0,0.15);margin-top:24px;max-width:560px;">
                <h2 style="font-size:1.1rem;margin-top:0;">{"Copias programadas"}</h2>
                <label style="display:flex;align-items:center;gap:8px;margin-bottom:12px;">
                    <input
                        type="checkbox"
                        checked={self.schedule.enabled}
                        onchange={link.callback(|_| Msg::ScheduleEnabledToggled)}
                    />
                    {"Crear copias automáticamente"}
                </label>
                <div style="display:flex;gap:16px;align-items:flex-end;">
                    <label style="display:flex;flex-direction:column;gap:4px;">
                        {"Frecuencia"}
                        <select
                            onchange={on_interval}
                            disabled={!self.schedule.enabled}
                            style="padding:6px 10px;"
                        >
                            {
                                for [6u32, 12, 24, 168].iter().map(|hours| {
                                    let label = match hours {
                                        6 => "Cada 6 horas",
                                        12 => "Cada 12 horas",
                                        24 => "Diaria",
                                        _ => "Semanal",
                                    };
                                    html! {
                                        <option
                                            value={hours.to_string()}
                                            selected={self.schedule.interval_hours == *hours}
                                        >
                                            { label }
                                        </option>
                                    }
                                })
                            }
                        </select>
                    </label>
                    <label style="display:flex;flex-direction:column;gap:4px;">
                        {"Copias conservadas (1–30)"}
                        <input
                            type="text"
                            value={self.retention_input.clone()}
                            oninput={on_retention}
                            disabled={!self.schedule.enabled}
                            style="width:80px;padding:6px 10px;"
                        />
                    </label>
                    <button
                        class="primary-btn"
                        disabled={self.busy}
                        onclick={link.callback(|_| Msg::SaveSchedule)}
                    >
                        {"Guardar"}
                    </button>
                </div>
            </div>
        }
    }

    fn build_create_sheet(&self, link: &html::Scope<Self>) -> Html {
        let on_password = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::CreatePasswordChanged(input.value())
        });
        let on_repeat = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::CreatePasswordRepeatChanged(input.value())
        });
        let mismatch =
            !self.create_password_repeat.is_empty() && self.create_password != self.create_password_repeat;

        html! {
            <div style="padding:16px;max-width:420px;">
                <h2 style="font-size:1.1rem;margin-top:0;">{"Crear copia de seguridad"}</h2>
                <p style="color:#757575;">
                    {"El archivo se cifra con esta contraseña. Sin ella la copia no se puede restaurar."}
                </p>
                <input
                    type="password"
                    placeholder="Contraseña"
                    value={self.create_password.clone()}
                    oninput={on_password}
                    style="width:100%;padding:6px 10px;margin-bottom:8px;"
                />
                <input
                    type="password"
                    placeholder="Repite la contraseña"
                    value={self.create_password_repeat.clone()}
                    oninput={on_repeat}
                    style="width:100%;padding:6px 10px;margin-bottom:8px;"
                />
                {
                    if mismatch {
                        html! { <p style="color:#c62828;">{"Las contraseñas no coinciden."}</p> }
                    } else {
                        html! {}
                    }
                }
                <div style="display:flex;gap:8px;justify-content:flex-end;">
                    <button class="secondary-btn" onclick={link.callback(|_| Msg::CloseSheets)}>
                        {"Cancelar"}
                    </button>
                    <button
                        class="primary-btn"
                        disabled={!self.can_create() || self.busy}
                        onclick={link.callback(|_| Msg::ConfirmCreate)}
                    >
                        { if self.busy { "Creando…" } else { "Crear" } }
                    </button>
                </div>
            </div>
        }
    }

    fn build_restore_sheet(&self, link: &html::Scope<Self>) -> Html {
        let on_password = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::RestorePasswordChanged(input.value())
        });
        let on_typed = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::RestoreTypedChanged(input.value())
        });

        html! {
            <div style="padding:16px;max-width:420px;">
                <h2 style="font-size:1.1rem;margin-top:0;color:#c62828;">{"Restaurar copia"}</h2>
                {
                    if let Some(target) = &self.restore_target {
                        html! {
                            <p>
                                {"Se reemplazarán todos los datos actuales con la copia del "}
                                <strong>{ &target.created_at }</strong>
                                { format!(" ({}).", format_size(target.size_bytes)) }
                            </p>
                        }
                    } else {
                        html! {}
                    }
                }
                <input
                    type="password"
                    placeholder="Contraseña de la copia"
                    value={self.restore_password.clone()}
                    oninput={on_password}
                    style="width:100%;padding:6px 10px;margin-bottom:8px;"
                />
                <p style="color:#757575;">
                    { format!("Escribe {RESTORE_CONFIRMATION} para confirmar:") }
                </p>
                <input
                    type="text"
                    value={self.restore_typed.clone()}
                    oninput={on_typed}
                    style="width:100%;padding:6px 10px;margin-bottom:12px;"
                />
                <div style="display:flex;gap:8px;justify-content:flex-end;">
                    <button class="secondary-btn" onclick={link.callback(|_| Msg::CloseSheets)}>
                        {"Cancelar"}
                    </button>
                    <button
                        class="danger-btn"
                        disabled={!self.can_restore() || self.busy}
                        onclick={link.callback(|_| Msg::ConfirmRestore)}
                    >
                        { if self.busy { "Restaurando…" } else { "Restaurar" } }
                    </button>
                </div>
            </div>
        }
    }
}

fn load_backups(ctx: &Context<BackupsPage>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::BackupsLoaded(api::fetch_backups().await));
    });
}
