//! Transient toast notifications.

use gloo_timers::callback::Timeout;
use web_sys::HtmlElement;
use wasm_bindgen::JsCast;

use crate::consts;

const TOAST_CLASS: &str = "performance-notification";
const FADE_MS: u32 = 300;

const TOAST_STYLE: &str = "position: fixed; top: 20px; right: 20px; \
    background: var(--accent-primary); color: var(--bg-primary); \
    padding: 12px 24px; border-radius: 8px; z-index: 10000; \
    font-family: 'JetBrains Mono', monospace; font-size: 0.9rem; font-weight: 600; \
    opacity: 0; transform: translateY(-20px); \
    transition: all 0.3s cubic-bezier(0.4, 0, 0.2, 1); pointer-events: none; \
    box-shadow: 0 10px 30px var(--shadow-color); max-width: 300px; word-wrap: break-word;";

/// Show `message` in the corner of the page, then fade it out and remove it.
pub fn show(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    let toast = match document.create_element("div").map(|el| el.unchecked_into::<HtmlElement>()) {
        Ok(el) => el,
        Err(e) => {
            log::warn!("notification element failed: {e:?}");
            return;
        }
    };
    toast.set_class_name(TOAST_CLASS);
    toast.set_text_content(Some(message));
    if let Err(e) = toast.set_attribute("role", "status") {
        log::debug!("notification role: {e:?}");
    }
    toast.style().set_css_text(TOAST_STYLE);
    if let Err(e) = body.append_child(&toast) {
        log::warn!("notification insert failed: {e:?}");
        return;
    }

    let shown = toast.clone();
    Timeout::new(16, move || set_visible(&shown, true)).forget();
    Timeout::new(consts::NOTIFY_MS, move || {
        set_visible(&toast, false);
        Timeout::new(FADE_MS, move || toast.remove()).forget();
    })
    .forget();
}

fn set_visible(toast: &HtmlElement, visible: bool) {
    let style = toast.style();
    let (opacity, transform) = if visible { ("1", "translateY(0)") } else { ("0", "translateY(-20px)") };
    for (property, value) in [("opacity", opacity), ("transform", transform)] {
        if let Err(e) = style.set_property(property, value) {
            log::debug!("notification {property}: {e:?}");
        }
    }
}
