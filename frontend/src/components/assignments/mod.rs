//! Assignment list for one provider, shown below the providers table.
//! Revoking asks for an inline confirmation before the call goes out.

use common::model::assignment::{AssignmentStatus, LicenseAssignment};
use num_format::{Locale, ToFormattedString};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::{self, ApiError};
use crate::toast::{show_error_toast, show_toast};

#[derive(Properties, PartialEq, Clone)]
pub struct AssignmentsPanelProps {
    pub provider_id: String,
    pub provider_name: String,
}

pub struct AssignmentsPanel {
    assignments: Vec<LicenseAssignment>,
    error: Option<String>,
    loaded: bool,
    /// Assignment awaiting the second "confirm" click, if any.
    pending_revoke: Option<String>,
}

pub enum Msg {
    Loaded(Result<Vec<LicenseAssignment>, ApiError>),
    AskRevoke(String),
    CancelRevoke,
    ConfirmRevoke,
    RevokeFinished(Result<(), ApiError>),
}

impl Component for AssignmentsPanel {
    type Message = Msg;
    type Properties = AssignmentsPanelProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            assignments: Vec::new(),
            error: None,
            loaded: false,
            pending_revoke: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(Ok(assignments)) => {
                self.assignments = assignments;
                self.error = None;
                true
            }
            Msg::Loaded(Err(e)) => {
                self.error = Some(e.to_string());
                true
            }
            Msg::AskRevoke(id) => {
                self.pending_revoke = Some(id);
                true
            }
            Msg::CancelRevoke => {
                self.pending_revoke = None;
                true
            }
            Msg::ConfirmRevoke => {
                let Some(id) = self.pending_revoke.take() else {
                    return false;
                };
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::RevokeFinished(api::revoke_assignment(&id).await));
                });
                true
            }
            Msg::RevokeFinished(Ok(())) => {
                show_toast("Asignación revocada.");
                load_assignments(ctx);
                false
            }
            Msg::RevokeFinished(Err(e)) => {
                show_error_toast(&format!("No se pudo revocar la asignación: {e}"));
                false
            }
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;
            load_assignments(ctx);
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().provider_id != old_props.provider_id {
            self.assignments.clear();
            self.pending_revoke = None;
            load_assignments(ctx);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let active = self
            .assignments
            .iter()
            .filter(|a| a.status == AssignmentStatus::Active)
            .count() as u32;

        html! {
            <div style="margin-top:16px;background:#fff;border-radius:8px;padding:16px;box-shadow:0 1px 4px rgba(0,0,0,0.15);">
                <h2 style="font-size:1.1rem;margin-top:0;">
                    { format!("Asignaciones de {}", ctx.props().provider_name) }
                </h2>
                <p style="color:#757575;">
                    { format!(
                        "{} asignaciones, {} activas",
                        (self.assignments.len() as u32).to_formatted_string(&Locale::es),
                        active.to_formatted_string(&Locale::es),
                    ) }
                </p>
                {
                    if let Some(error) = &self.error {
                        html! { <p style="color:#c62828;">{ error }</p> }
                    } else {
                        html! {}
                    }
                }
                <table style="width:100%;border-collapse:collapse;">
                    <thead>
                        <tr style="text-align:left;border-bottom:1px solid #e0e0e0;">
                            <th style="padding:6px 8px;">{"Clave"}</th>
                            <th style="padding:6px 8px;">{"Usuario"}</th>
                            <th style="padding:6px 8px;">{"Email"}</th>
                            <th style="padding:6px 8px;">{"Estado"}</th>
                            <th style="padding:6px 8px;">{"Asignada"}</th>
                            <th style="padding:6px 8px;"></th>
                        </tr>
                    </thead>
                    <tbody>
                        { for self.assignments.iter().map(|a| self.build_row(link, a)) }
                    </tbody>
                </table>
            </div>
        }
    }
}

impl AssignmentsPanel {
    fn build_row(&self, link: &html::Scope<Self>, assignment: &LicenseAssignment) -> Html {
        let confirming = self
            .pending_revoke
            .as_deref()
            .is_some_and(|id| id == assignment.id);
        let ask = {
            let id = assignment.id.clone();
            link.callback(move |_| Msg::AskRevoke(id.clone()))
        };

        html! {
            <tr style="border-bottom:1px solid #f5f5f5;">
                <td style="padding:6px 8px;">{ assignment.license_key.clone().unwrap_or_else(|| "—".into()) }</td>
                <td style="padding:6px 8px;">{ assignment.external_user_id.clone().unwrap_or_else(|| "—".into()) }</td>
                <td style="padding:6px 8px;">{ assignment.employee_email.clone().unwrap_or_else(|| "—".into()) }</td>
                <td style="padding:6px 8px;">{ status_badge(assignment.status) }</td>
                <td style="padding:6px 8px;color:#757575;">{ assignment.assigned_at.clone().unwrap_or_default() }</td>
                <td style="padding:6px 8px;white-space:nowrap;">
                    {
                        if confirming {
                            html! {
                                <>
                                    <span style="color:#c62828;margin-right:8px;">{"¿Revocar?"}</span>
                                    <button class="text-btn" style="color:#c62828;" onclick={link.callback(|_| Msg::ConfirmRevoke)}>
                                        {"Sí"}
                                    </button>
                                    <button class="text-btn" onclick={link.callback(|_| Msg::CancelRevoke)}>
                                        {"No"}
                                    </button>
                                </>
                            }
                        } else {
                            html! {
                                <button class="icon-btn" title="Revocar" onclick={ask}>
                                    <i class="material-icons">{"person_remove"}</i>
                                </button>
                            }
                        }
                    }
                </td>
            </tr>
        }
    }
}

fn status_badge(status: AssignmentStatus) -> Html {
    let (label, color) = match status {
        AssignmentStatus::Active => ("Activa", "#2e7d32"),
        AssignmentStatus::Suspended => ("Suspendida", "#e65100"),
        AssignmentStatus::Revoked => ("Revocada", "#757575"),
    };
    html! { <span style={format!("color:{color};font-weight:bold;")}>{ label }</span> }
}

fn load_assignments(ctx: &Context<AssignmentsPanel>) {
    let link = ctx.link().clone();
    let provider_id = ctx.props().provider_id.clone();
    spawn_local(async move {
        link.send_message(Msg::Loaded(api::fetch_assignments(&provider_id).await));
    });
}
