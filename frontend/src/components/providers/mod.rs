//! License provider table: sync triggers, the import wizard dialog, and a
//! drill-in to the provider's assignments.

use common::model::provider::{LicenseProvider, ProviderStatus};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::components::assignments::AssignmentsPanel;
use crate::components::import_wizard::ImportWizard;
use crate::toast::{show_error_toast, show_toast};

pub struct ProvidersPage {
    providers: Vec<LicenseProvider>,
    error: Option<String>,
    loaded: bool,
    /// Provider whose import wizard dialog is open, if any. The wizard is
    /// mounted only while open, so closing discards all wizard state.
    wizard_for: Option<LicenseProvider>,
    /// Provider whose assignments are expanded below the table.
    assignments_for: Option<LicenseProvider>,
}

pub enum Msg {
    Loaded(Result<Vec<LicenseProvider>, ApiError>),
    Reload,
    Sync(String),
    SyncFinished(Result<(), ApiError>),
    OpenWizard(LicenseProvider),
    DownloadTemplate(String),
    CloseWizard,
    ImportSucceeded,
    ToggleAssignments(LicenseProvider),
}

impl Component for ProvidersPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            providers: Vec::new(),
            error: None,
            loaded: false,
            wizard_for: None,
            assignments_for: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(providers)) => {
                self.providers = providers;
                self.error = None;
                true
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            Msg::Reload => {
                load_providers(ctx);
                false
            }
            Msg::Sync(provider_id) => {
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::SyncFinished(api::sync_provider(&provider_id).await));
                });
                false
            }
            Msg::SyncFinished(Ok(())) => {
                show_toast("Sincronización iniciada.");
                load_providers(ctx);
                false
            }
            Msg::SyncFinished(Err(e)) => {
                show_error_toast(&format!("No se pudo iniciar la sincronización: {e}"));
                false
            }
            Msg::OpenWizard(provider) => {
                self.wizard_for = Some(provider);
                true
            }
            Msg::DownloadTemplate(provider_id) => {
                spawn_local(async move {
                    if let Err(e) = api::download_import_template(&provider_id, true).await {
                        show_error_toast(&format!("No se pudo descargar la plantilla: {e}"));
                    }
                });
                false
            }
            Msg::CloseWizard => {
                self.wizard_for = None;
                true
            }
            Msg::ImportSucceeded => {
                // Seat counts changed; refresh the table behind the dialog.
                load_providers(ctx);
                false
            }
            Msg::ToggleAssignments(provider) => {
                let same = self
                    .assignments_for
                    .as_ref()
                    .is_some_and(|p| p.id == provider.id);
                self.assignments_for = if same { None } else { Some(provider) };
                true
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            load_providers(ctx);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div>
                <div style="display:flex;align-items:center;gap:8px;">
                    <h1 style="font-size:1.4rem;">{"Proveedores de licencias"}</h1>
                    <button class="icon-btn" title="Actualizar" onclick={link.callback(|_| Msg::Reload)}>
                        <i class="material-icons">{"refresh"}</i>
                    </button>
                </div>
                {
                    if let Some(error) = &self.error {
                        html! { <p style="color:#c62828;">{ error }</p> }
                    } else {
                        html! {}
                    }
                }
                { self.build_table(link) }
                {
                    if let Some(provider) = &self.assignments_for {
                        html! {
                            <AssignmentsPanel
                                provider_id={provider.id.clone()}
                                provider_name={provider.name.clone()}
                            />
                        }
                    } else {
                        html! {}
                    }
                }
                { self.build_wizard_dialog(link) }
            </div>
        }
    }
}

impl ProvidersPage {
    fn build_table(&self, link: &html::Scope<Self>) -> Html {
        html! {
            <table style="width:100%;border-collapse:collapse;background:#fff;border-radius:8px;">
                <thead>
                    <tr style="text-align:left;border-bottom:1px solid #e0e0e0;">
                        <th style="padding:8px;">{"Nombre"}</th>
                        <th style="padding:8px;">{"Conector"}</th>
                        <th style="padding:8px;">{"Asientos"}</th>
                        <th style="padding:8px;">{"Costo mensual"}</th>
                        <th style="padding:8px;">{"Estado"}</th>
                        <th style="padding:8px;">{"Última sincronización"}</th>
                        <th style="padding:8px;">{"Acciones"}</th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for self.providers.iter().map(|provider| {
                            let seats = match provider.seats_total {
                                Some(total) => format!("{} / {}", provider.seats_assigned, total),
                                None => provider.seats_assigned.to_string(),
                            };
                            let sync = {
                                let id = provider.id.clone();
                                link.callback(move |_| Msg::Sync(id.clone()))
                            };
                            let open_wizard = {
                                let p = provider.clone();
                                link.callback(move |_| Msg::OpenWizard(p.clone()))
                            };
                            let toggle = {
                                let p = provider.clone();
                                link.callback(move |_| Msg::ToggleAssignments(p.clone()))
                            };
                            let download = {
                                let id = provider.id.clone();
                                link.callback(move |_| Msg::DownloadTemplate(id.clone()))
                            };
                            html! {
                                <tr style="border-bottom:1px solid #f5f5f5;">
                                    <td style="padding:8px;font-weight:bold;">{ &provider.name }</td>
                                    <td style="padding:8px;color:#757575;">{ &provider.kind }</td>
                                    <td style="padding:8px;">{ seats }</td>
                                    <td style="padding:8px;">{ format!("{:.2} {}", provider.monthly_cost, provider.currency) }</td>
                                    <td style="padding:8px;">{ status_badge(provider.status) }</td>
                                    <td style="padding:8px;color:#757575;">
                                        { provider.last_sync.clone().unwrap_or_else(|| "nunca".into()) }
                                    </td>
                                    <td style="padding:8px;white-space:nowrap;">
                                        <button class="icon-btn" title="Sincronizar" onclick={sync}>
                                            <i class="material-icons">{"sync"}</i>
                                        </button>
                                        <button class="icon-btn" title="Importar CSV" onclick={open_wizard}>
                                            <i class="material-icons">{"upload_file"}</i>
                                        </button>
                                        <button class="icon-btn" title="Descargar plantilla" onclick={download}>
                                            <i class="material-icons">{"download"}</i>
                                        </button>
                                        <button class="icon-btn" title="Ver asignaciones" onclick={toggle}>
                                            <i class="material-icons">{"list"}</i>
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

    fn build_wizard_dialog(&self, link: &html::Scope<Self>) -> Html {
        let Some(provider) = &self.wizard_for else {
            return html! {};
        };
        let on_close = link.callback(|_| Msg::CloseWizard);
        let on_success = link.callback(|_| Msg::ImportSucceeded);
        let on_error = Callback::from(|message: String| show_error_toast(&message));

        html! {
            <div style="position:fixed;top:0;left:0;width:100vw;height:100vh;background:rgba(0,0,0,0.55);z-index:9999;display:flex;align-items:center;justify-content:center;">
                <ImportWizard
                    provider_id={provider.id.clone()}
                    provider_name={provider.name.clone()}
                    {on_success}
                    {on_error}
                    {on_close}
                />
            </div>
        }
    }
}

fn status_badge(status: ProviderStatus) -> Html {
    let (label, color) = match status {
        ProviderStatus::Connected => ("Conectado", "#2e7d32"),
        ProviderStatus::Syncing => ("Sincronizando", "#1976d2"),
        ProviderStatus::Error => ("Error", "#c62828"),
    };
    html! {
        <span style={format!("color:{color};font-weight:bold;")}>{ label }</span>
    }
}

fn load_providers(ctx: &Context<ProvidersPage>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::Loaded(api::fetch_providers().await));
    });
}
