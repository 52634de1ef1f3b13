//! Top-sheet dialog container. A sheet is rendered hidden and slides in when
//! the `show` class is added to its root node; `open_top_sheet` and
//! `close_top_sheet` toggle that class slightly deferred so the CSS
//! transition runs after the node exists in the DOM.

use gloo_timers::future::TimeoutFuture;
use uuid::Uuid;
use yew::{html, Component, Context, Html, NodeRef, Properties};

pub struct TopSheet {
    id: String,
}

#[derive(Properties, PartialEq)]
pub struct TopSheetProps {
    #[prop_or_default]
    pub children: Html,
    pub node_ref: NodeRef,
}

impl Component for TopSheet {
    type Message = ();
    type Properties = TopSheetProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("sheet-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="top-sheet" id={self.id.clone()} ref={ctx.props().node_ref.clone()}>
                { ctx.props().children.clone() }
            </div>
        }
    }
}

fn toggle_show_class(sheet_ref: &NodeRef, add: bool) {
    if let Some(sheet) = sheet_ref.cast::<web_sys::HtmlElement>() {
        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(50).await;
            let class_list = sheet.class_list();
            let _ = if add {
                class_list.add_1("show")
            } else {
                class_list.remove_1("show")
            };
        });
    }
}

pub fn open_top_sheet(sheet_ref: NodeRef) {
    toggle_show_class(&sheet_ref, true);
}

pub fn close_top_sheet(sheet_ref: NodeRef) {
    toggle_show_class(&sheet_ref, false);
}
