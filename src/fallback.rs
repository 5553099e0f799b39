//! Degraded behavior set, wired when the coordinator cannot start at all.
//!
//! No controller state exists here. Each entry point reads the page's
//! current markers and flips them directly, which keeps the theme toggle and
//! the mobile menu usable and gets the preloader out of the way.

#[cfg(test)]
#[path = "fallback_test.rs"]
mod fallback_test;

use crate::consts;
use crate::error::soft;
use crate::surface::Surface;
use crate::theme::ThemeMode;

/// Dismiss the preloader and clear the loading marker.
pub fn engage(surface: &mut dyn Surface) {
    log::warn!("coordinator unavailable, running in fallback mode");
    if surface.exists(consts::PRELOADER) {
        soft("fallback preloader", surface.set_style(consts::PRELOADER, "display", "none"));
    }
    soft("fallback loading marker", surface.set_class(consts::BODY, consts::LOADING_CLASS, false));
}

/// Flip the body theme class. Nothing is persisted.
pub fn toggle_theme(surface: &mut dyn Surface) -> ThemeMode {
    let light = !surface.has_class(consts::BODY, consts::LIGHT_CLASS);
    soft("fallback theme", surface.set_class(consts::BODY, consts::LIGHT_CLASS, light));
    ThemeMode::from_light(light)
}

/// Flip the menu panel and the scroll lock together. Returns the new open
/// state, or `None` when the page has no menu.
pub fn toggle_menu(surface: &mut dyn Surface) -> Option<bool> {
    if !surface.exists(consts::MENU_PANEL) {
        return None;
    }
    let open = !surface.has_class(consts::MENU_PANEL, consts::MENU_OPEN_CLASS);
    soft("fallback menu", surface.set_class(consts::MENU_PANEL, consts::MENU_OPEN_CLASS, open));
    soft("fallback scroll lock", surface.set_class(consts::BODY, consts::SCROLL_LOCK_CLASS, open));
    Some(open)
}

/// Close the menu if the fallback opened it.
pub fn close_menu(surface: &mut dyn Surface) {
    if surface.has_class(consts::MENU_PANEL, consts::MENU_OPEN_CLASS) {
        toggle_menu(surface);
    }
}
