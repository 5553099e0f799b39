//! The single full-screen overlay slot shared by the menu and the modal.
//!
//! Page scroll is locked exactly while some overlay holds the slot. The
//! coordinator closes the current holder before handing the slot to the other
//! overlay, so the lock never has two owners.

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::consts;
use crate::error::soft;
use crate::surface::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Menu,
    Modal,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollLock {
    holder: Option<Overlay>,
}

impl ScrollLock {
    #[cfg(test)]
    #[must_use]
    pub fn holder(self) -> Option<Overlay> {
        self.holder
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        self.holder.is_some()
    }

    /// Lock page scroll on behalf of `overlay`.
    pub fn acquire(&mut self, overlay: Overlay, surface: &mut dyn Surface) {
        if let Some(current) = self.holder
            && current != overlay
        {
            log::warn!("scroll lock handed from {current:?} to {overlay:?} without release");
        }
        if self.holder.is_none() {
            soft("lock page scroll", surface.set_class(consts::BODY, consts::SCROLL_LOCK_CLASS, true));
        }
        self.holder = Some(overlay);
    }

    /// Release the lock if `overlay` holds it.
    pub fn release(&mut self, overlay: Overlay, surface: &mut dyn Surface) {
        if self.holder != Some(overlay) {
            return;
        }
        self.holder = None;
        soft("unlock page scroll", surface.set_class(consts::BODY, consts::SCROLL_LOCK_CLASS, false));
    }
}
