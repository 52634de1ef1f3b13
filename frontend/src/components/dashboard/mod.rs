//! Landing page: aggregate counters from the stats endpoint.

use common::model::stats::DashboardStats;
use num_format::{Locale, ToFormattedString};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};

pub struct Dashboard {
    stats: Option<DashboardStats>,
    error: Option<String>,
    loaded: bool,
}

pub enum Msg {
    Loaded(Result<DashboardStats, ApiError>),
    Reload,
}

impl Component for Dashboard {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            stats: None,
            error: None,
            loaded: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(stats)) => {
                self.stats = Some(stats);
                self.error = None;
                true
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            Msg::Reload => {
                load_stats(ctx);
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            load_stats(ctx);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div>
                <div style="display:flex;align-items:center;gap:8px;">
                    <h1 style="font-size:1.4rem;">{"Resumen"}</h1>
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
                {
                    if let Some(stats) = &self.stats {
                        html! {
                            <div style="display:flex;gap:24px;flex-wrap:wrap;">
                                { stat_card("Proveedores", stats.providers.to_formatted_string(&Locale::es)) }
                                { stat_card("Empleados", stats.employees.to_formatted_string(&Locale::es)) }
                                { stat_card("Asignaciones activas", stats.active_assignments.to_formatted_string(&Locale::es)) }
                                { stat_card("Cuentas de servicio", stats.service_accounts.to_formatted_string(&Locale::es)) }
                                { stat_card(
                                    "Gasto mensual",
                                    format!("{:.2} {}", stats.monthly_spend, stats.currency),
                                ) }
                            </div>
                        }
                    } else {
                        html! { <p style="color:#757575;">{"Cargando..."}</p> }
                    }
                }
            </div>
        }
    }
}

fn stat_card(label: &str, value: String) -> Html {
    html! {
        <div style="background:#fff;border-radius:8px;box-shadow:0 1px 4px rgba(0,0,0,0.15);padding:16px 24px;min-width:160px;">
            <div style="font-size:1.6rem;font-weight:bold;">{ value }</div>
            <div style="color:#757575;">{ label }</div>
        </div>
    }
}

fn load_stats(ctx: &Context<Dashboard>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::Loaded(api::fetch_stats().await));
    });
}
