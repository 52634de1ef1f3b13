//! CSV license import wizard: root module wiring the Yew `Component`
//! implementation with submodules for props, messages, state, update logic
//! and view rendering.
//!
//! The flow is upload → mapping → options → validate → execute → result;
//! the step machine itself lives in `common::import::wizard` so it stays
//! testable without a browser.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ImportWizardProps;
pub use state::ImportWizard;

impl Component for ImportWizard {
    type Message = Msg;
    type Properties = ImportWizardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ImportWizard::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
