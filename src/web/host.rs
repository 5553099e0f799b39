//! Browser host: owns the coordinator for the page's lifetime, translates DOM
//! events into [`UiEvent`]s and performs the returned [`Action`]s.
//!
//! DESIGN
//! ======
//! Every listener is delegated to `document` or `window` and bound exactly
//! once, whether the coordinator started or the page fell back to the
//! degraded behavior set. The listeners look up the current [`Mode`] on each
//! event, so a late successful retry needs no rebinding.
//!
//! Actions run after the coordinator borrow is released; frame and timer
//! callbacks re-enter [`dispatch`] from a fresh browser task.

use std::cell::{Cell, RefCell};

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CustomEvent, CustomEventInit, Element, Event, EventTarget, KeyboardEvent,
    MediaQueryListEvent, MouseEvent, StorageEvent,
};

use crate::config::Config;
use crate::consts;
use crate::coordinator::{Action, Coordinator};
use crate::error::{ConfigError, InitError};
use crate::event::{CertificateRef, Control, InputSource, Key, UiEvent};
use crate::fallback;
use crate::theme::ThemeMode;
use crate::timing::RetryPolicy;
use crate::web::dom::DomSurface;
use crate::web::notify;

const CONFIG_GLOBAL: &str = "FOLIO_CONFIG";
const THEME_EVENT: &str = "themeChanged";
const FINE_POINTER_QUERY: &str = "(pointer: fine)";
const ANCHOR_LINK: &str = "a[href^=\"#\"]";
const MOBILE_LIST_ITEM: &str = ".mobile-navbar-tabs-ul li";
const CERT_CARD: &str = ".certification-card";
const CERT_TITLE: &str = ".cert-title";

/// Frame callback used when the browser refuses an animation frame.
const FRAME_FALLBACK_MS: u32 = 16;

/// Legacy global entry points kept for inline `onclick` markup.
const GLOBALS: [(&str, Control); 6] = [
    ("toggleVisualMode", Control::ThemeToggle),
    ("visualmode", Control::ThemeToggle),
    ("hamburgerMenu", Control::MenuToggle),
    ("hidemenubyli", Control::MenuClose),
    ("scrolltoTopfunction", Control::BackToTop),
    ("openURL", Control::Resume),
];

enum Mode {
    Running { coord: Coordinator, surface: DomSurface },
    Fallback { surface: DomSurface },
}

thread_local! {
    static MODE: RefCell<Option<Mode>> = const { RefCell::new(None) };
    static BOUND: Cell<bool> = const { Cell::new(false) };
    static HOVERED: Cell<bool> = const { Cell::new(false) };
    static FRAME_ID: Cell<Option<i32>> = const { Cell::new(None) };
    static FRAME_CB: RefCell<Option<Closure<dyn FnMut(f64)>>> = const { RefCell::new(None) };
}

/// Module entry point: boot once the document has been parsed.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let loaded = read_config();
    let config = match &loaded {
        Ok(config) => config.clone(),
        Err(_) => Config::default(),
    };
    if console_log::init_with_level(config.log_level.to_level()).is_err() {
        log::debug!("logger already installed");
    }
    if let Err(e) = loaded {
        log::warn!("ignoring {CONFIG_GLOBAL}: {e}");
    }

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    if document.ready_state() == "loading" {
        let cb = Closure::once_into_js(move || boot(config, 0));
        if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", cb.unchecked_ref()) {
            log::error!("could not wait for DOMContentLoaded: {e:?}");
        }
    } else {
        boot(config, 0);
    }
}

// =============================================================
// Startup
// =============================================================

fn boot(config: Config, attempt: u32) {
    match try_start(&config) {
        Ok((coord, surface, actions)) => {
            install(Mode::Running { coord, surface });
            bind_once();
            perform(actions, None);
        }
        Err(e) => {
            let next = attempt + 1;
            log::error!("coordinator start failed (attempt {next}): {e}");
            match RetryPolicy::new(config.init_retries).delay_for(next) {
                Some(delay) => {
                    log::info!("retrying coordinator start in {delay} ms");
                    Timeout::new(delay, move || boot(config, next)).forget();
                }
                None => start_fallback(&config),
            }
        }
    }
}

fn try_start(config: &Config) -> Result<(Coordinator, DomSurface, Vec<Action>), InitError> {
    let mut surface = DomSurface::new(config.cookie_max_age_secs)?;
    let mut config = config.clone();
    config.fine_pointer &= has_fine_pointer();
    let (coord, actions) = Coordinator::start(&mut surface, config)?;
    Ok((coord, surface, actions))
}

fn start_fallback(config: &Config) {
    match DomSurface::new(config.cookie_max_age_secs) {
        Ok(mut surface) => {
            fallback::engage(&mut surface);
            install(Mode::Fallback { surface });
            bind_once();
        }
        Err(e) => log::error!("fallback mode unavailable: {e}"),
    }
}

fn install(mode: Mode) {
    MODE.with(|slot| match slot.try_borrow_mut() {
        Ok(mut slot) => *slot = Some(mode),
        Err(_) => log::error!("host state busy, coordinator not installed"),
    });
}

fn read_config() -> Result<Config, ConfigError> {
    let Some(window) = web_sys::window() else {
        return Ok(Config::default());
    };
    let raw = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(raw) if !raw.is_undefined() && !raw.is_null() => raw,
        _ => return Ok(Config::default()),
    };
    let json = js_sys::JSON::stringify(&raw).map_err(|e| ConfigError::Invalid {
        field: CONFIG_GLOBAL,
        reason: format!("not serializable: {e:?}"),
    })?;
    Config::from_json(&String::from(json))
}

fn has_fine_pointer() -> bool {
    match web_sys::window().map(|w| w.match_media(FINE_POINTER_QUERY)) {
        Some(Ok(Some(query))) => query.matches(),
        _ => true,
    }
}

// =============================================================
// Dispatch and actions
// =============================================================

fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or_else(js_sys::Date::now, |p| p.now())
}

fn dispatch(event: UiEvent, raw: Option<&Event>) {
    let actions = MODE.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            log::debug!("re-entrant {event:?} dropped");
            return Vec::new();
        };
        match slot.as_mut() {
            Some(Mode::Running { coord, surface }) => coord.dispatch(surface, event, now()),
            Some(Mode::Fallback { surface }) => fallback_dispatch(surface, &event),
            None => Vec::new(),
        }
    });
    perform(actions, raw);
}

/// The degraded behavior set: direct class toggles, nothing else.
fn fallback_dispatch(surface: &mut DomSurface, event: &UiEvent) -> Vec<Action> {
    let UiEvent::Activate { control, .. } = event else {
        return Vec::new();
    };
    match control {
        Control::ThemeToggle => {
            fallback::toggle_theme(surface);
            vec![Action::PreventDefault]
        }
        Control::MenuToggle => {
            fallback::toggle_menu(surface);
            vec![Action::PreventDefault]
        }
        Control::MenuClose | Control::NavLink { .. } => {
            fallback::close_menu(surface);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn perform(actions: Vec<Action>, raw: Option<&Event>) {
    for action in actions {
        match action {
            Action::PreventDefault => {
                if let Some(ev) = raw {
                    ev.prevent_default();
                }
            }
            Action::RequestFrame => request_frame(),
            Action::CancelFrame => cancel_frame(),
            Action::ScheduleTimer { delay_ms } => {
                Timeout::new(delay_ms, || dispatch(UiEvent::Timer, None)).forget();
            }
            Action::ThemeChanged(mode) => announce_theme(mode),
            Action::Notify(message) => notify::show(&message),
        }
    }
}

fn request_frame() {
    if FRAME_ID.with(Cell::get).is_some() {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    FRAME_CB.with(|slot| {
        let mut slot = slot.borrow_mut();
        let cb = slot.get_or_insert_with(|| {
            Closure::<dyn FnMut(f64)>::new(|_ts: f64| {
                FRAME_ID.with(|id| id.set(None));
                dispatch(UiEvent::Frame, None);
            })
        });
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => FRAME_ID.with(|slot| slot.set(Some(id))),
            Err(e) => {
                log::warn!("animation frame refused: {e:?}");
                Timeout::new(FRAME_FALLBACK_MS, || dispatch(UiEvent::Frame, None)).forget();
            }
        }
    });
}

fn cancel_frame() {
    let Some(id) = FRAME_ID.with(Cell::take) else {
        return;
    };
    if let Some(window) = web_sys::window()
        && let Err(e) = window.cancel_animation_frame(id)
    {
        log::debug!("cancel animation frame: {e:?}");
    }
}

/// Broadcast the new mode as a bubbling `themeChanged` event on `document`.
fn announce_theme(mode: ThemeMode) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let detail = match js_sys::JSON::parse(&serde_json::json!({ "theme": mode }).to_string()) {
        Ok(detail) => detail,
        Err(e) => {
            log::warn!("theme event detail: {e:?}");
            return;
        }
    };
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(&detail);
    match CustomEvent::new_with_event_init_dict(THEME_EVENT, &init) {
        Ok(event) => {
            if let Err(e) = document.dispatch_event(&event) {
                log::warn!("theme event dispatch: {e:?}");
            }
        }
        Err(e) => log::warn!("theme event: {e:?}"),
    }
}

// =============================================================
// Listeners
// =============================================================

fn bind_once() {
    if BOUND.with(|bound| bound.replace(true)) {
        return;
    }
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    listen(&document, "click", false, |ev| on_activate(&ev, InputSource::Pointer));
    listen(&document, "touchend", false, |ev| on_activate(&ev, InputSource::Touch));
    listen(&document, "keydown", false, |ev| on_key(&ev));
    listen(&document, "contextmenu", false, |ev| on_context_menu(&ev));
    listen(&document, "mousemove", true, |ev| on_mouse_move(&ev));
    listen(&document, "mouseover", true, |ev| on_mouse_over(&ev));
    listen(&document, "visibilitychange", false, |ev| on_visibility(&ev));

    listen(&window, "scroll", true, |ev| on_scroll(&ev));
    listen(&window, "resize", true, |ev| dispatch(UiEvent::Resize, Some(&ev)));
    listen(&window, "load", false, |ev| dispatch(UiEvent::Loaded, Some(&ev)));
    listen(&window, "storage", false, |ev| on_storage(&ev));

    match window.match_media(consts::DARK_SCHEME_QUERY) {
        Ok(Some(query)) => listen(&query, "change", false, |ev| on_scheme_change(&ev)),
        _ => log::debug!("no color-scheme media query"),
    }

    install_globals(&window);
    log::debug!("page listeners bound");
}

fn listen(target: &EventTarget, kind: &str, passive: bool, handler: impl FnMut(Event) + 'static) {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    let opts = AddEventListenerOptions::new();
    opts.set_passive(passive);
    if let Err(e) =
        target.add_event_listener_with_callback_and_add_event_listener_options(kind, cb.as_ref().unchecked_ref(), &opts)
    {
        log::warn!("could not listen for {kind}: {e:?}");
    }
    cb.forget();
}

fn install_globals(window: &web_sys::Window) {
    for (name, control) in GLOBALS {
        let cb = Closure::<dyn Fn()>::new(move || {
            dispatch(UiEvent::Activate { control: control.clone(), source: InputSource::Script }, None);
        });
        if let Err(e) = js_sys::Reflect::set(window, &JsValue::from_str(name), cb.as_ref()) {
            log::warn!("could not expose {name}: {e:?}");
        }
        cb.forget();
    }
}

fn on_activate(ev: &Event, source: InputSource) {
    let Some(control) = event_element(ev).and_then(|el| control_for(&el)) else {
        return;
    };
    // Touch only drives the toggles; everything else waits for the click.
    if source == InputSource::Touch && !matches!(control, Control::ThemeToggle | Control::MenuToggle) {
        return;
    }
    dispatch(UiEvent::Activate { control, source }, Some(ev));
}

fn on_key(ev: &Event) {
    let Some(kev) = ev.dyn_ref::<KeyboardEvent>() else {
        return;
    };
    let key = Key::from_dom(&kev.key(), kev.shift_key());
    if matches!(key, Key::Other(_)) {
        return;
    }
    let control = event_element(ev).and_then(|el| control_for(&el));
    dispatch(UiEvent::KeyDown { key, control }, Some(ev));
}

fn on_context_menu(ev: &Event) {
    let on_image = event_element(ev).is_some_and(|el| el.tag_name().eq_ignore_ascii_case("img"));
    if on_image {
        dispatch(UiEvent::ContextMenu { on_image }, Some(ev));
    }
}

fn on_mouse_move(ev: &Event) {
    if let Some(mev) = ev.dyn_ref::<MouseEvent>() {
        let event = UiEvent::PointerMove { x: f64::from(mev.client_x()), y: f64::from(mev.client_y()) };
        dispatch(event, None);
    }
}

fn on_mouse_over(ev: &Event) {
    let entered = event_element(ev).is_some_and(|el| closest(&el, consts::INTERACTIVE).is_some());
    if HOVERED.with(|hovered| hovered.replace(entered)) != entered {
        dispatch(UiEvent::Hover { entered }, None);
    }
}

fn on_visibility(_ev: &Event) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        dispatch(UiEvent::VisibilityChanged { hidden: document.hidden() }, None);
    }
}

fn on_scroll(_ev: &Event) {
    let offset = web_sys::window().map_or(0.0, |w| w.scroll_y().unwrap_or(0.0));
    dispatch(UiEvent::Scroll { offset }, None);
}

fn on_storage(ev: &Event) {
    let Some(sev) = ev.dyn_ref::<StorageEvent>() else {
        return;
    };
    if let Some(key) = sev.key() {
        dispatch(UiEvent::StorageChanged { key, value: sev.new_value() }, None);
    }
}

fn on_scheme_change(ev: &Event) {
    if let Some(mev) = ev.dyn_ref::<MediaQueryListEvent>() {
        dispatch(UiEvent::ColorSchemeChanged { prefers_dark: mev.matches() }, None);
    }
}

// =============================================================
// Control resolution
// =============================================================

fn event_element(ev: &Event) -> Option<Element> {
    ev.target().and_then(|t| t.dyn_ref::<Element>().cloned())
}

fn closest(el: &Element, selector: &str) -> Option<Element> {
    match el.closest(selector) {
        Ok(found) => found,
        Err(_) => None,
    }
}

fn query(el: &Element, selector: &str) -> Option<Element> {
    match el.query_selector(selector) {
        Ok(found) => found,
        Err(_) => None,
    }
}

/// Map the element an event landed on to the page control it belongs to.
fn control_for(el: &Element) -> Option<Control> {
    if closest(el, consts::THEME_TOGGLE).is_some() {
        return Some(Control::ThemeToggle);
    }
    if closest(el, consts::HAMBURGER_BUTTON).is_some() {
        return Some(Control::MenuToggle);
    }
    if let Some(modal) = closest(el, consts::MODAL) {
        if closest(el, consts::MODAL_CLOSE).is_some() {
            return Some(Control::ModalClose);
        }
        // Only the backdrop itself dismisses; clicks on the content do not.
        return el.is_same_node(Some(modal.as_ref())).then_some(Control::ModalBackdrop);
    }
    if let Some(trigger) = closest(el, consts::CERTIFICATE_TRIGGER) {
        return certificate_ref(&trigger).map(Control::Certificate);
    }
    if closest(el, consts::BACK_TO_TOP).is_some() {
        return Some(Control::BackToTop);
    }

    // A tap on a mobile list item outside its link still follows the link.
    let link = closest(el, ANCHOR_LINK).or_else(|| closest(el, MOBILE_LIST_ITEM).and_then(|li| query(&li, ANCHOR_LINK)))?;
    let href = link.get_attribute("href")?;
    let target = href.strip_prefix('#').filter(|t| !t.is_empty())?;
    Some(Control::NavLink { target: target.to_owned() })
}

fn certificate_ref(trigger: &Element) -> Option<CertificateRef> {
    let image = trigger.get_attribute("data-certificate")?;
    let title = closest(trigger, CERT_CARD)
        .and_then(|card| query(&card, CERT_TITLE))
        .and_then(|title| title.text_content())
        .map(|text| text.trim().to_owned());
    Some(CertificateRef::new(image, title))
}
