//! Mobile menu controller: a two-state `Closed`/`Open` machine.
//!
//! While open, the panel carries `show-toggle-menu`, each hamburger bar carries
//! its animation class, the hamburger reports `aria-expanded="true"` and page
//! scroll is locked through the shared [`ScrollLock`]. Closing removes exactly
//! those markers. Both transitions are strict: opening an open menu or closing
//! a closed one touches nothing.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::config::Config;
use crate::consts;
use crate::error::{SurfaceError, soft};
use crate::focus;
use crate::overlay::{Overlay, ScrollLock};
use crate::surface::Surface;
use crate::timing::ToggleLock;

pub struct MenuController {
    open: bool,
    lock: ToggleLock,
}

impl MenuController {
    /// Bind to the menu panel. Fails when the page has no mobile menu, in
    /// which case the coordinator runs without one.
    pub fn new(surface: &mut dyn Surface, config: &Config) -> Result<Self, SurfaceError> {
        if !surface.exists(consts::MENU_PANEL) {
            return Err(SurfaceError::missing(consts::MENU_PANEL));
        }
        soft("hamburger state", surface.set_attribute(consts::HAMBURGER_BUTTON, "aria-expanded", "false"));
        Ok(Self { open: false, lock: ToggleLock::new(config.menu_lock_ms) })
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a toggle at `now` would be dropped by the reentrancy lock.
    #[must_use]
    pub fn is_locked(&self, now: f64) -> bool {
        self.lock.is_held(now)
    }

    /// `Closed → Open`. Returns `false` when already open.
    pub fn open(&mut self, surface: &mut dyn Surface, scroll: &mut ScrollLock) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        scroll.acquire(Overlay::Menu, surface);
        set_markers(surface, true);
        focus::focus_first(surface, consts::MENU_PANEL);
        log::debug!("menu opened");
        true
    }

    /// `Open → Closed`. Returns `false` (and touches nothing) when already closed.
    pub fn close(&mut self, surface: &mut dyn Surface, scroll: &mut ScrollLock) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        scroll.release(Overlay::Menu, surface);
        set_markers(surface, false);
        log::debug!("menu closed");
        true
    }

    /// Flip the menu. Returns the new open state, or `None` when the call fell
    /// inside the previous toggle's lock window and was dropped.
    pub fn toggle(&mut self, surface: &mut dyn Surface, now: f64, scroll: &mut ScrollLock) -> Option<bool> {
        if !self.lock.try_acquire(now) {
            log::debug!("menu toggle already in progress, ignoring");
            return None;
        }
        if self.open {
            self.close(surface, scroll);
        } else {
            self.open(surface, scroll);
        }
        Some(self.open)
    }
}

fn set_markers(surface: &mut dyn Surface, open: bool) {
    soft("menu panel", surface.set_class(consts::MENU_PANEL, consts::MENU_OPEN_CLASS, open));
    for (bar, class) in consts::BURGER_BARS {
        soft("hamburger bar", surface.set_class(bar, class, open));
    }
    let expanded = if open { "true" } else { "false" };
    soft("hamburger state", surface.set_attribute(consts::HAMBURGER_BUTTON, "aria-expanded", expanded));
}
