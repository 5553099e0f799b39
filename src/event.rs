//! Input model: controls, keys, and the events the host feeds the coordinator.
//!
//! The host owns the browser listeners. It maps each raw event to at most one
//! [`UiEvent`], resolving the clicked element to a [`Control`] so the
//! coordinator never inspects DOM nodes itself.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

/// How an activation reached the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    Pointer,
    Touch,
    Keyboard,
    /// A legacy global entry point or other programmatic caller.
    Script,
}

/// What a certificate trigger points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRef {
    /// Image URL from the trigger's `data-certificate` attribute.
    pub image: String,
    /// Title text of the enclosing certification card, if any.
    pub title: Option<String>,
}

impl CertificateRef {
    pub fn new(image: impl Into<String>, title: Option<String>) -> Self {
        Self { image: image.into(), title }
    }
}

/// An interactive element of the page contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    ThemeToggle,
    MenuToggle,
    MenuClose,
    /// In-page anchor to the section with this id (desktop or mobile nav).
    NavLink { target: String },
    BackToTop,
    ModalClose,
    /// The modal's own background, outside its content.
    ModalBackdrop,
    Certificate(CertificateRef),
    Resume,
}

impl Control {
    /// Controls that are not native buttons and need Enter/Space handling.
    #[must_use]
    pub fn is_keyboard_activated(&self) -> bool {
        matches!(self, Self::ThemeToggle | Self::MenuToggle)
    }
}

/// Keys the coordinator reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Tab { shift: bool },
    Enter,
    Space,
    Other(String),
}

impl Key {
    /// Map a `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str, shift: bool) -> Self {
        match key {
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab { shift },
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            other => Self::Other(other.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Click, touch end, keyboard activation or a script call on a control.
    Activate { control: Control, source: InputSource },
    /// Key press, with the control that had focus when it happened.
    KeyDown { key: Key, control: Option<Control> },
    Scroll { offset: f64 },
    /// An animation frame the coordinator asked for.
    Frame,
    /// A timer the coordinator asked for has fired.
    Timer,
    Resize,
    /// The window `load` event.
    Loaded,
    VisibilityChanged { hidden: bool },
    ColorSchemeChanged { prefers_dark: bool },
    /// Another tab wrote a preference.
    StorageChanged { key: String, value: Option<String> },
    PointerMove { x: f64, y: f64 },
    /// The pointer entered or left an interactive element.
    Hover { entered: bool },
    ContextMenu { on_image: bool },
}
