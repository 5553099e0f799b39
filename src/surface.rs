//! Capability interface over the rendering surface.
//!
//! Controllers never touch the DOM directly. They see the page through
//! [`Surface`]: look up elements by selector, flip marker classes, read layout,
//! move focus and reach the preference stores. The browser implementation
//! lives in `web::dom`; tests use an in-memory fake.
//!
//! Mutating calls apply to every element matching the selector and report
//! [`SurfaceError::MissingElement`] when nothing matches, so callers can tell
//! "no such control" apart from "already in that state".
//!
//! Listening for events is the host's half of the contract: it translates raw
//! browser events into [`crate::event::UiEvent`]s and feeds them to the
//! coordinator.

use crate::error::SurfaceError;

/// Where a preference value is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    Local,
    Session,
    Cookie,
}

impl StorageKind {
    /// Read order for preference lookups.
    pub const ALL: [Self; 3] = [Self::Local, Self::Session, Self::Cookie];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Session => "session",
            Self::Cookie => "cookie",
        }
    }
}

/// Raw layout of one section as measured by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBox {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

pub trait Surface {
    // --- Elements ---

    fn exists(&self, selector: &str) -> bool;

    /// Whether the first element matching `selector` carries `class`.
    fn has_class(&self, selector: &str, class: &str) -> bool;

    fn set_class(&mut self, selector: &str, class: &str, on: bool) -> Result<(), SurfaceError>;

    /// Set `class` on the elements matching `selector` whose class list
    /// already contains `tag`. `tag` is compared as a plain token, never parsed
    /// as a selector.
    fn set_class_where(&mut self, selector: &str, tag: &str, class: &str, on: bool) -> Result<(), SurfaceError>;

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) -> Result<(), SurfaceError>;

    fn set_style(&mut self, selector: &str, property: &str, value: &str) -> Result<(), SurfaceError>;

    fn set_text(&mut self, selector: &str, text: &str) -> Result<(), SurfaceError>;

    // --- Layout ---

    /// Current vertical scroll offset of the page.
    fn scroll_offset(&self) -> f64;

    /// Smooth-scroll the page to `top`.
    fn scroll_to(&mut self, top: f64) -> Result<(), SurfaceError>;

    fn offset_top(&self, selector: &str) -> Option<f64>;

    fn offset_height(&self, selector: &str) -> Option<f64>;

    /// Layout boxes for every element matching `selector`, in document order.
    fn sections(&self, selector: &str) -> Vec<SectionBox>;

    // --- Focus ---

    fn focusable_count(&self, container: &str) -> usize;

    /// Index of the focused element among `container`'s focusables.
    fn focused_index(&self, container: &str) -> Option<usize>;

    fn focus_nth(&mut self, container: &str, index: usize) -> Result<(), SurfaceError>;

    fn focus(&mut self, selector: &str) -> Result<(), SurfaceError>;

    // --- Preferences ---

    fn storage_get(&self, kind: StorageKind, key: &str) -> Result<Option<String>, SurfaceError>;

    fn storage_set(&mut self, kind: StorageKind, key: &str, value: &str) -> Result<(), SurfaceError>;

    fn storage_remove(&mut self, kind: StorageKind, key: &str) -> Result<(), SurfaceError>;

    /// System color-scheme preference, when the host can tell.
    fn prefers_dark(&self) -> Option<bool>;

    // --- Navigation ---

    /// Open `url` in a new browsing context. `Ok(false)` means a popup blocker
    /// refused it.
    fn open_window(&mut self, url: &str) -> Result<bool, SurfaceError>;

    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError>;
}
