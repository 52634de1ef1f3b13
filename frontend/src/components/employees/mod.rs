//! Employee table synced from the HRIS, with client-side filtering and
//! sorting of the fetched page. Emails matching a service-account rule get
//! a badge so stray bot accounts stand out.

use common::model::employee::{
    filter_employees, sort_employees, Employee, EmployeeSortKey, EmployeeStatus,
};
use common::model::service_account::{is_service_account, ServiceAccountRule};
use web_sys::{HtmlInputElement, InputEvent};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};

pub struct EmployeesPage {
    employees: Vec<Employee>,
    rules: Vec<ServiceAccountRule>,
    query: String,
    sort_key: EmployeeSortKey,
    ascending: bool,
    error: Option<String>,
    loaded: bool,
}

pub enum Msg {
    Loaded(Result<Vec<Employee>, ApiError>),
    RulesLoaded(Result<Vec<ServiceAccountRule>, ApiError>),
    QueryChanged(String),
    SortBy(EmployeeSortKey),
    Reload,
}

impl Component for EmployeesPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            employees: Vec::new(),
            rules: Vec::new(),
            query: String::new(),
            sort_key: EmployeeSortKey::Name,
            ascending: true,
            error: None,
            loaded: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(employees)) => {
                self.employees = employees;
                self.error = None;
                true
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            // Rules are decoration only; a failure just hides the badges.
            Msg::RulesLoaded(result) => {
                self.rules = result.unwrap_or_default();
                true
            }
            Msg::QueryChanged(query) => {
                self.query = query;
                true
            }
            Msg::SortBy(key) => {
                if self.sort_key == key {
                    self.ascending = !self.ascending;
                } else {
                    self.sort_key = key;
                    self.ascending = true;
                }
                true
            }
            Msg::Reload => {
                load_data(ctx);
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            load_data(ctx);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let mut visible = filter_employees(&self.employees, &self.query);
        sort_employees(&mut visible, self.sort_key, self.ascending);

        let on_query = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::QueryChanged(input.value())
        });

        html! {
            <div>
                <div style="display:flex;align-items:center;gap:8px;">
                    <h1 style="font-size:1.4rem;">{"Empleados"}</h1>
                    <button class="icon-btn" title="Actualizar" onclick={link.callback(|_| Msg::Reload)}>
                        <i class="material-icons">{"refresh"}</i>
                    </button>
                </div>
                <input
                    type="text"
                    placeholder="Buscar por nombre, email o departamento"
                    value={self.query.clone()}
                    oninput={on_query}
                    style="width:320px;padding:6px 10px;margin-bottom:12px;"
                />
                {
                    if let Some(error) = &self.error {
                        html! { <p style="color:#c62828;">{ error }</p> }
                    } else {
                        html! {}
                    }
                }
                <table style="width:100%;border-collapse:collapse;background:#fff;border-radius:8px;">
                    <thead>
                        <tr style="text-align:left;border-bottom:1px solid #e0e0e0;">
                            { self.sort_header(link, "Nombre", EmployeeSortKey::Name) }
                            { self.sort_header(link, "Email", EmployeeSortKey::Email) }
                            { self.sort_header(link, "Departamento", EmployeeSortKey::Department) }
                            <th style="padding:8px;">{"Estado"}</th>
                            { self.sort_header(link, "Alta", EmployeeSortKey::StartDate) }
                        </tr>
                    </thead>
                    <tbody>
                        {
                            for visible.iter().map(|employee| {
                                let service = is_service_account(&self.rules, &employee.email);
                                html! {
                                    <tr style="border-bottom:1px solid #f5f5f5;">
                                        <td style="padding:8px;font-weight:bold;">{ &employee.full_name }</td>
                                        <td style="padding:8px;">
                                            { &employee.email }
                                            {
                                                if service {
                                                    html! {
                                                        <span style="margin-left:8px;background:#ede7f6;color:#5e35b1;border-radius:4px;padding:2px 6px;font-size:0.75rem;">
                                                            {"cuenta de servicio"}
                                                        </span>
                                                    }
                                                } else {
                                                    html! {}
                                                }
                                            }
                                        </td>
                                        <td style="padding:8px;">{ employee.department.clone().unwrap_or_else(|| "—".into()) }</td>
                                        <td style="padding:8px;">{ status_badge(employee.status) }</td>
                                        <td style="padding:8px;color:#757575;">{ employee.start_date.clone().unwrap_or_default() }</td>
                                    </tr>
                                }
                            })
                        }
                    </tbody>
                </table>
                <p style="color:#757575;">
                    { format!("{} de {} empleados", visible.len(), self.employees.len()) }
                </p>
            </div>
        }
    }
}

impl EmployeesPage {
    fn sort_header(&self, link: &html::Scope<Self>, label: &str, key: EmployeeSortKey) -> Html {
        let arrow = if self.sort_key == key {
            if self.ascending { " ▲" } else { " ▼" }
        } else {
            ""
        };
        html! {
            <th style="padding:8px;cursor:pointer;" onclick={link.callback(move |_| Msg::SortBy(key))}>
                { format!("{label}{arrow}") }
            </th>
        }
    }
}

fn status_badge(status: EmployeeStatus) -> Html {
    let (label, color) = match status {
        EmployeeStatus::Active => ("Activo", "#2e7d32"),
        EmployeeStatus::Onboarding => ("Incorporándose", "#1976d2"),
        EmployeeStatus::Offboarded => ("Baja", "#757575"),
    };
    html! { <span style={format!("color:{color};font-weight:bold;")}>{ label }</span> }
}

fn load_data(ctx: &Context<EmployeesPage>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::Loaded(api::fetch_employees().await));
    });
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::RulesLoaded(api::fetch_rules().await));
    });
}
