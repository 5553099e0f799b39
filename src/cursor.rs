//! Custom cursor: an inner dot pinned to the pointer and an outer ring that
//! eases after it, one step per animation frame.
//!
//! The ring only animates while it still has distance to cover. Once within
//! [`consts::CURSOR_SETTLE_PX`] it snaps onto the pointer and the loop parks
//! until the pointer moves again.

#[cfg(test)]
#[path = "cursor_test.rs"]
mod cursor_test;

use crate::config::Config;
use crate::consts;
use crate::error::{SurfaceError, soft};
use crate::surface::Surface;

#[derive(Debug)]
pub struct CursorFollower {
    easing: f64,
    target: (f64, f64),
    outer: (f64, f64),
    animating: bool,
    hidden: bool,
}

impl CursorFollower {
    pub fn new(surface: &dyn Surface, config: &Config) -> Result<Self, SurfaceError> {
        for selector in [consts::CURSOR_INNER, consts::CURSOR_OUTER] {
            if !surface.exists(selector) {
                return Err(SurfaceError::missing(selector));
            }
        }
        Ok(Self { easing: config.cursor_easing, target: (0.0, 0.0), outer: (0.0, 0.0), animating: false, hidden: false })
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[cfg(test)]
    #[must_use]
    pub fn outer(&self) -> (f64, f64) {
        self.outer
    }

    /// Pin the inner dot to the pointer. Returns `true` when the ring loop
    /// needs a frame.
    pub fn on_move(&mut self, x: f64, y: f64, surface: &mut dyn Surface) -> bool {
        self.target = (x, y);
        place(surface, consts::CURSOR_INNER, x, y);
        self.animating = !self.converged();
        self.animating && !self.hidden
    }

    /// Advance the ring one frame. Returns `true` while it still has to move.
    pub fn step(&mut self, surface: &mut dyn Surface) -> bool {
        if self.hidden || !self.animating {
            return false;
        }
        let (tx, ty) = self.target;
        let (ox, oy) = self.outer;
        self.outer = (ox + (tx - ox) * self.easing, oy + (ty - oy) * self.easing);
        if self.converged() {
            self.outer = self.target;
            self.animating = false;
        }
        place(surface, consts::CURSOR_OUTER, self.outer.0, self.outer.1);
        self.animating
    }

    /// Pause while the page is hidden. Returns `true` when becoming visible
    /// with a ring still in flight, so the loop must resume.
    pub fn set_hidden(&mut self, hidden: bool) -> bool {
        self.hidden = hidden;
        !hidden && self.animating
    }

    pub fn hover(&self, entered: bool, surface: &mut dyn Surface) {
        for selector in [consts::CURSOR_INNER, consts::CURSOR_OUTER] {
            soft("cursor hover", surface.set_class(selector, consts::CURSOR_HOVER_CLASS, entered));
        }
    }

    fn converged(&self) -> bool {
        (self.target.0 - self.outer.0).abs() < consts::CURSOR_SETTLE_PX
            && (self.target.1 - self.outer.1).abs() < consts::CURSOR_SETTLE_PX
    }
}

fn place(surface: &mut dyn Surface, selector: &str, x: f64, y: f64) {
    soft("cursor position", surface.set_style(selector, "left", &format!("{x}px")));
    soft("cursor position", surface.set_style(selector, "top", &format!("{y}px")));
}
