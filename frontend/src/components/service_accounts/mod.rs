//! Service-account detection rules: email globs with a live preview of the
//! employee emails a draft pattern would flag.

use common::model::employee::Employee;
use common::model::service_account::{pattern_matches, ServiceAccountRule};
use common::requests::CreateRuleRequest;
use web_sys::{HtmlInputElement, InputEvent};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::toast::{show_error_toast, show_toast};

/// Preview cap; enough to judge a pattern without flooding the form.
const MAX_PREVIEW_MATCHES: usize = 8;

pub struct ServiceAccountsPage {
    rules: Vec<ServiceAccountRule>,
    employees: Vec<Employee>,
    draft_pattern: String,
    draft_note: String,
    saving: bool,
    error: Option<String>,
    loaded: bool,
}

pub enum Msg {
    RulesLoaded(Result<Vec<ServiceAccountRule>, ApiError>),
    EmployeesLoaded(Result<Vec<Employee>, ApiError>),
    PatternChanged(String),
    NoteChanged(String),
    Create,
    CreateFinished(Result<ServiceAccountRule, ApiError>),
    Delete(String),
    DeleteFinished(Result<(), ApiError>),
}

impl Component for ServiceAccountsPage {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            rules: Vec::new(),
            employees: Vec::new(),
            draft_pattern: String::new(),
            draft_note: String::new(),
            saving: false,
            error: None,
            loaded: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::RulesLoaded(Ok(rules)) => {
                self.rules = rules;
                self.error = None;
                true
            }
            Msg::RulesLoaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            Msg::EmployeesLoaded(result) => {
                self.employees = result.unwrap_or_default();
                true
            }
            Msg::PatternChanged(pattern) => {
                self.draft_pattern = pattern;
                true
            }
            Msg::NoteChanged(note) => {
                self.draft_note = note;
                true
            }
            Msg::Create => {
                let pattern = self.draft_pattern.trim().to_string();
                if pattern.is_empty() || self.saving {
                    return false;
                }
                self.saving = true;
                let request = CreateRuleRequest {
                    pattern,
                    note: match self.draft_note.trim() {
                        "" => None,
                        note => Some(note.to_string()),
                    },
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::CreateFinished(api::create_rule(&request).await));
                });
                true
            }
            Msg::CreateFinished(Ok(rule)) => {
                self.saving = false;
                self.draft_pattern.clear();
                self.draft_note.clear();
                self.rules.push(rule);
                show_toast("Regla creada.");
                true
            }
            Msg::CreateFinished(Err(e)) => {
                self.saving = false;
                show_error_toast(&format!("No se pudo crear la regla: {e}"));
                true
            }
            Msg::Delete(rule_id) => {
                let link = ctx.link().clone();
                let for_removal = rule_id.clone();
                self.rules.retain(|r| r.id != rule_id);
                spawn_local(async move {
                    link.send_message(Msg::DeleteFinished(api::delete_rule(&for_removal).await));
                });
                true
            }
            Msg::DeleteFinished(Ok(())) => {
                show_toast("Regla eliminada.");
                false
            }
            Msg::DeleteFinished(Err(e)) => {
                show_error_toast(&format!("No se pudo eliminar la regla: {e}"));
                // The optimistic removal was wrong; reload the truth.
                load_rules(ctx);
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            load_rules(ctx);
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::EmployeesLoaded(api::fetch_employees().await));
            });
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div>
                <h1 style="font-size:1.4rem;">{"Cuentas de servicio"}</h1>
                <p style="color:#757575;">
                    {"Los emails que coincidan con alguna regla no cuentan como asientos de empleados. \
                      Comodines: * (cualquier texto) y ? (un carácter)."}
                </p>
                {
                    if let Some(error) = &self.error {
                        html! { <p style="color:#c62828;">{ error }</p> }
                    } else {
                        html! {}
                    }
                }
                { self.build_form(link) }
                { self.build_rule_list(link) }
            </div>
        }
    }
}

impl ServiceAccountsPage {
    fn build_form(&self, link: &html::Scope<Self>) -> Html {
        let on_pattern = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::PatternChanged(input.value())
        });
        let on_note = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::NoteChanged(input.value())
        });

        let draft = self.draft_pattern.trim();
        let preview: Vec<&str> = if draft.is_empty() {
            Vec::new()
        } else {
            self.employees
                .iter()
                .filter(|e| pattern_matches(draft, &e.email))
                .map(|e| e.email.as_str())
                .collect()
        };

        html! {
            <div style="background:#fff;border-radius:8px;padding:16px;box-shadow:0 1px 4px rgba(0,0,0,0.15);margin-bottom:16px;max-width:560px;">
                <div style="display:flex;gap:8px;">
                    <input
                        type="text"
                        placeholder="svc-*@corp.com"
                        value={self.draft_pattern.clone()}
                        oninput={on_pattern}
                        style="flex:1;padding:6px 10px;"
                    />
                    <input
                        type="text"
                        placeholder="Nota (opcional)"
                        value={self.draft_note.clone()}
                        oninput={on_note}
                        style="flex:1;padding:6px 10px;"
                    />
                    <button
                        class="primary-btn"
                        disabled={draft.is_empty() || self.saving}
                        onclick={link.callback(|_| Msg::Create)}
                    >
                        {"Añadir"}
                    </button>
                </div>
                {
                    if !draft.is_empty() {
                        let shown = preview.len().min(MAX_PREVIEW_MATCHES);
                        html! {
                            <p style="color:#757575;margin-bottom:0;">
                                { format!("Coincide con {} emails conocidos", preview.len()) }
                                {
                                    if preview.is_empty() {
                                        html! {}
                                    } else {
                                        html! {
                                            <span>
                                                { ": " }
                                                { preview[..shown].join(", ") }
                                                { if preview.len() > shown { ", …" } else { "" } }
                                            </span>
                                        }
                                    }
                                }
                            </p>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }

    fn build_rule_list(&self, link: &html::Scope<Self>) -> Html {
        html! {
            <table style="width:100%;border-collapse:collapse;background:#fff;border-radius:8px;max-width:720px;">
                <thead>
                    <tr style="text-align:left;border-bottom:1px solid #e0e0e0;">
                        <th style="padding:8px;">{"Patrón"}</th>
                        <th style="padding:8px;">{"Nota"}</th>
                        <th style="padding:8px;">{"Creada"}</th>
                        <th style="padding:8px;"></th>
                    </tr>
                </thead>
                <tbody>
                    {
                        for self.rules.iter().map(|rule| {
                            let delete = {
                                let id = rule.id.clone();
                                link.callback(move |_| Msg::Delete(id.clone()))
                            };
                            html! {
                                <tr style="border-bottom:1px solid #f5f5f5;">
                                    <td style="padding:8px;font-family:monospace;">{ &rule.pattern }</td>
                                    <td style="padding:8px;color:#757575;">{ rule.note.clone().unwrap_or_default() }</td>
                                    <td style="padding:8px;color:#757575;">{ &rule.created_at }</td>
                                    <td style="padding:8px;">
                                        <button class="icon-btn" title="Eliminar" onclick={delete}>
                                            <i class="material-icons">{"delete"}</i>
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
}

fn load_rules(ctx: &Context<ServiceAccountsPage>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::RulesLoaded(api::fetch_rules().await));
    });
}
