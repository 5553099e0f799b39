//! Keyboard focus trap for open overlays.

#[cfg(test)]
#[path = "focus_test.rs"]
mod focus_test;

use crate::error::soft;
use crate::surface::Surface;

/// Move focus to the first focusable element inside `container`.
pub fn focus_first(surface: &mut dyn Surface, container: &str) {
    if surface.focusable_count(container) > 0 {
        soft("focus overlay", surface.focus_nth(container, 0));
    }
}

/// Handle Tab inside an open overlay. Wraps from the last focusable to the
/// first (and Shift+Tab from the first to the last), and pulls focus back in
/// when it has escaped. Returns `true` when the host must suppress the
/// browser's own focus move.
pub fn trap_tab(surface: &mut dyn Surface, container: &str, shift: bool) -> bool {
    let count = surface.focusable_count(container);
    if count == 0 {
        return false;
    }
    let last = count - 1;
    let target = match (surface.focused_index(container), shift) {
        (None, false) => 0,
        (None, true) => last,
        (Some(idx), false) if idx >= last => 0,
        (Some(0), true) => last,
        _ => return false,
    };
    soft("trap focus", surface.focus_nth(container, target));
    true
}
