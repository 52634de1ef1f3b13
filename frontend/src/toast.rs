//! Transient toast notifications, injected straight into the DOM so they
//! survive component unmounts (e.g. a dialog closing right after an action).

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Informational toast at the bottom of the screen, removed after 3 s.
pub fn show_toast(message: &str) {
    show_with_background(message, "rgba(0, 0, 0, 0.8)");
}

/// Error variant with a red background; same lifecycle.
pub fn show_error_toast(message: &str) {
    show_with_background(message, "rgba(183, 28, 28, 0.92)");
}

fn show_with_background(message: &str, background: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    let toast: HtmlElement = toast.unchecked_into();
    let style = toast.style();
    style.set_property("position", "fixed").ok();
    style.set_property("bottom", "20px").ok();
    style.set_property("left", "50%").ok();
    style.set_property("transform", "translateX(-50%)").ok();
    style.set_property("background", background).ok();
    style.set_property("color", "#fff").ok();
    style.set_property("padding", "10px 20px").ok();
    style.set_property("border-radius", "4px").ok();
    style.set_property("z-index", "10000").ok();
    style.set_property("font-family", "Arial, sans-serif").ok();

    if body.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = toast.parent_node() {
                parent.remove_child(&toast).ok();
            }
        });
    }
}
