//! Scroll-driven cosmetics: back-to-top visibility, blob parallax, and the
//! geometry for smooth in-page scrolling.
//!
//! Everything here runs inside the coordinator's per-frame pass, alongside
//! scroll-spy.

#[cfg(test)]
#[path = "scroll_fx_test.rs"]
mod scroll_fx_test;

use crate::config::Config;
use crate::consts;
use crate::error::{SurfaceError, soft};
use crate::surface::Surface;

/// Visibility of the back-to-top control.
///
/// Showing is immediate. Hiding drops the opacity first and lets the caller
/// finish with `display: none` once the fade deadline passes.
#[derive(Debug)]
pub struct BackToTop {
    threshold: f64,
    /// `None` until the first update; the page's initial styling is unknown.
    shown: Option<bool>,
}

impl BackToTop {
    pub fn new(surface: &dyn Surface, threshold: f64) -> Result<Self, SurfaceError> {
        if !surface.exists(consts::BACK_TO_TOP) {
            return Err(SurfaceError::missing(consts::BACK_TO_TOP));
        }
        Ok(Self { threshold, shown: None })
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown == Some(true)
    }

    /// Apply the visibility for `offset`. Returns `Some(false)` when a fade-out
    /// just started and the caller must schedule [`Self::finish_fade`].
    pub fn update(&mut self, offset: f64, surface: &mut dyn Surface) -> Option<bool> {
        let show = offset > self.threshold;
        if self.shown == Some(show) {
            return None;
        }
        self.shown = Some(show);
        if show {
            soft("back-to-top display", surface.set_style(consts::BACK_TO_TOP, "display", "block"));
            soft("back-to-top opacity", surface.set_style(consts::BACK_TO_TOP, "opacity", "1"));
        } else {
            soft("back-to-top opacity", surface.set_style(consts::BACK_TO_TOP, "opacity", "0"));
        }
        Some(show)
    }

    /// Complete a fade-out, unless the control was shown again meanwhile.
    pub fn finish_fade(&self, surface: &mut dyn Surface) {
        if self.shown == Some(false) {
            soft("back-to-top display", surface.set_style(consts::BACK_TO_TOP, "display", "none"));
        }
    }
}

#[must_use]
pub fn parallax_transform(offset: f64, factor: f64) -> String {
    format!("translate(-50%, -50%) translateY({}px)", offset * factor)
}

/// Shift both background blobs for the current scroll offset.
pub fn apply_parallax(surface: &mut dyn Surface, offset: f64, config: &Config) {
    for (selector, factor) in [(consts::BLOB, config.blob_parallax), (consts::FOOTER_BLOB, config.footer_blob_parallax)] {
        if surface.exists(selector) {
            soft("parallax", surface.set_style(selector, "transform", &parallax_transform(offset, factor)));
        }
    }
}

/// Measured navbar height, or `fallback` when it cannot be measured.
#[must_use]
pub fn navbar_height(surface: &dyn Surface, fallback: f64) -> f64 {
    match surface.offset_height(consts::NAVBAR) {
        Some(h) if h > 0.0 => h,
        _ => fallback,
    }
}

/// Scroll position that lands `target_top` just below the fixed navbar.
#[must_use]
pub fn smooth_scroll_target(target_top: f64, navbar: f64, margin: f64) -> f64 {
    (target_top - navbar - margin).max(0.0)
}

/// Keep the landing content clear of the fixed navbar.
pub fn adjust_landing_padding(surface: &mut dyn Surface, config: &Config) {
    if !surface.exists(consts::LANDING) {
        return;
    }
    let padding = navbar_height(surface, config.navbar_height_px) + config.scroll_margin_px;
    soft("landing padding", surface.set_style(consts::LANDING, "padding-top", &format!("{padding}px")));
}
