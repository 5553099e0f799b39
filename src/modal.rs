//! Certificate modal controller.
//!
//! One modal container, one image slot, one caption slot. Opening while
//! already open closes the current certificate first, so a second trigger
//! replaces the content instead of stacking a second overlay.

#[cfg(test)]
#[path = "modal_test.rs"]
mod modal_test;

use crate::consts;
use crate::error::{SurfaceError, soft};
use crate::event::CertificateRef;
use crate::focus;
use crate::overlay::{Overlay, ScrollLock};
use crate::surface::Surface;

#[derive(Debug, Default)]
pub struct ModalController {
    current: Option<CertificateRef>,
}

impl ModalController {
    /// Bind to the modal. Every slot must exist; a partial modal is not bound.
    pub fn new(surface: &dyn Surface) -> Result<Self, SurfaceError> {
        for selector in [consts::MODAL, consts::MODAL_IMAGE, consts::MODAL_CAPTION] {
            if !surface.exists(selector) {
                return Err(SurfaceError::missing(selector));
            }
        }
        Ok(Self::default())
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    #[cfg(test)]
    #[must_use]
    pub fn current(&self) -> Option<&CertificateRef> {
        self.current.as_ref()
    }

    pub fn open_with(&mut self, reference: CertificateRef, surface: &mut dyn Surface, scroll: &mut ScrollLock) {
        if self.is_open() {
            log::debug!("modal already open, replacing content");
            self.close(surface, scroll);
        }

        let caption = reference.title.as_deref().unwrap_or(consts::DEFAULT_CAPTION);
        soft("modal image", surface.set_attribute(consts::MODAL_IMAGE, "src", &reference.image));
        soft("modal image alt", surface.set_attribute(consts::MODAL_IMAGE, "alt", caption));
        soft("modal caption", surface.set_text(consts::MODAL_CAPTION, caption));
        soft("modal display", surface.set_style(consts::MODAL, "display", "block"));
        soft("modal state", surface.set_attribute(consts::MODAL, "aria-hidden", "false"));
        scroll.acquire(Overlay::Modal, surface);
        focus::focus_first(surface, consts::MODAL);

        log::debug!("modal opened: {}", reference.image);
        self.current = Some(reference);
    }

    /// Hide the modal. Returns `false` (and touches nothing) when closed.
    pub fn close(&mut self, surface: &mut dyn Surface, scroll: &mut ScrollLock) -> bool {
        if self.current.take().is_none() {
            return false;
        }
        soft("modal display", surface.set_style(consts::MODAL, "display", "none"));
        soft("modal state", surface.set_attribute(consts::MODAL, "aria-hidden", "true"));
        scroll.release(Overlay::Modal, surface);
        log::debug!("modal closed");
        true
    }
}
