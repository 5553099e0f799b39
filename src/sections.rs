//! Scroll-spy: which page section is active, and the nav entries that show it.
//!
//! The registry is measured once after layout settles and again after resize
//! input stops; every scroll pass only reads it. Updates are edge-triggered:
//! nav markers are rewritten only when the active id actually changes.

#[cfg(test)]
#[path = "sections_test.rs"]
mod sections_test;

use crate::consts;
use crate::error::soft;
use crate::surface::{SectionBox, Surface};

/// A section's scroll range, already shifted by the nav offset.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionSpan {
    /// Half-open `[top, top + height)`.
    #[must_use]
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.top && offset < self.top + self.height
    }
}

#[derive(Debug, Clone, Default)]
pub struct SectionRegistry {
    spans: Vec<SectionSpan>,
}

impl SectionRegistry {
    #[must_use]
    pub fn from_boxes(boxes: Vec<SectionBox>, nav_offset: f64) -> Self {
        let spans = boxes
            .into_iter()
            .filter(|b| !b.id.is_empty())
            .map(|b| SectionSpan { id: b.id, top: b.top - nav_offset, height: b.height.max(0.0) })
            .collect();
        Self { spans }
    }

    /// The section containing `offset`. Later sections win when ranges overlap.
    #[must_use]
    pub fn locate(&self, offset: f64) -> Option<&str> {
        self.spans
            .iter()
            .rev()
            .find(|span| span.contains(offset))
            .map(|span| span.id.as_str())
    }

    #[must_use]
    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }
}

pub struct SectionTracker {
    registry: SectionRegistry,
    active: Option<String>,
    nav_offset: f64,
}

impl SectionTracker {
    #[must_use]
    pub fn new(nav_offset: f64) -> Self {
        Self { registry: SectionRegistry::default(), active: None, nav_offset }
    }

    /// Re-measure every section on the page.
    pub fn recompute_layout(&mut self, surface: &dyn Surface) {
        self.registry = SectionRegistry::from_boxes(surface.sections(consts::SECTIONS), self.nav_offset);
        log::debug!("section layout recomputed: {} section(s)", self.registry.spans().len());
    }

    #[must_use]
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Track `offset`. Returns the new active id when it changed; offsets
    /// outside every section keep the last known one.
    pub fn on_scroll(&mut self, offset: f64, surface: &mut dyn Surface) -> Option<&str> {
        let found = self.registry.locate(offset)?;
        if self.active.as_deref() == Some(found) {
            return None;
        }
        let id = found.to_owned();
        mark_active(surface, &id);
        log::debug!("active section: {id}");
        self.active = Some(id);
        self.active.as_deref()
    }
}

/// Mark exactly the nav entries for `id` active, desktop and mobile. Entries
/// carry their section id as a class, matched as a token so ids that are not
/// valid CSS identifiers still resolve.
fn mark_active(surface: &mut dyn Surface, id: &str) {
    for (items, class) in [
        (consts::DESKTOP_NAV_ITEMS, consts::DESKTOP_ACTIVE_CLASS),
        (consts::MOBILE_NAV_ITEMS, consts::MOBILE_ACTIVE_CLASS),
    ] {
        soft("clear nav markers", surface.set_class(items, class, false));
        soft("set nav marker", surface.set_class_where(items, id, class, true));
    }
}
