use yew::{classes, html, Component, Context, Html};

use crate::components::backups::BackupsPage;
use crate::components::dashboard::Dashboard;
use crate::components::employees::EmployeesPage;
use crate::components::providers::ProvidersPage;
use crate::components::service_accounts::ServiceAccountsPage;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Dashboard,
    Providers,
    Employees,
    ServiceAccounts,
    Backups,
}

impl Section {
    const ALL: [Section; 5] = [
        Section::Dashboard,
        Section::Providers,
        Section::Employees,
        Section::ServiceAccounts,
        Section::Backups,
    ];

    fn label(self) -> &'static str {
        match self {
            Section::Dashboard => "Resumen",
            Section::Providers => "Proveedores",
            Section::Employees => "Empleados",
            Section::ServiceAccounts => "Cuentas de servicio",
            Section::Backups => "Copias de seguridad",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Section::Dashboard => "dashboard",
            Section::Providers => "apps",
            Section::Employees => "people",
            Section::ServiceAccounts => "smart_toy",
            Section::Backups => "save",
        }
    }
}

pub struct App {
    section: Section,
}

pub enum Msg {
    SectionSelected(Section),
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            section: Section::Dashboard,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SectionSelected(section) => {
                if self.section == section {
                    false
                } else {
                    self.section = section;
                    true
                }
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div style="display:flex;min-height:100vh;">
                <nav style="width:220px;background:#263238;color:#eceff1;padding:16px 0;">
                    <p style="padding:0 16px;font-weight:bold;">{"Licencias"}</p>
                    {
                        for Section::ALL.iter().map(|section| {
                            let active = self.section == *section;
                            let select = {
                                let section = *section;
                                link.callback(move |_| Msg::SectionSelected(section))
                            };
                            html! {
                                <div
                                    class={classes!("nav-item", active.then_some("active"))}
                                    style="display:flex;align-items:center;gap:8px;padding:10px 16px;cursor:pointer;"
                                    onclick={select}
                                >
                                    <i class="material-icons">{ section.icon() }</i>
                                    <span>{ section.label() }</span>
                                </div>
                            }
                        })
                    }
                </nav>
                <main style="flex:1;padding:24px;background:#fafafa;">
                    {
                        match self.section {
                            Section::Dashboard => html! { <Dashboard /> },
                            Section::Providers => html! { <ProvidersPage /> },
                            Section::Employees => html! { <EmployeesPage /> },
                            Section::ServiceAccounts => html! { <ServiceAccountsPage /> },
                            Section::Backups => html! { <BackupsPage /> },
                        }
                    }
                </main>
            </div>
        }
    }
}
