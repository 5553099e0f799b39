//! Page-structure contract and shared defaults.
//!
//! Selectors and marker classes here are the coordinator's view of the page
//! markup. The host never invents its own; everything routes through these.

// ── Theme ───────────────────────────────────────────────────────

/// Primary storage key for the theme preference (`"light"` / `"dark"`).
pub const THEME_KEY: &str = "theme";

/// Legacy boolean flag: `"true"` means light mode.
pub const LEGACY_LIGHT_KEY: &str = "lightMode";

/// Legacy boolean flag: `"true"` means dark mode.
pub const LEGACY_DARK_KEY: &str = "darkMode";

/// Every theme toggle control (desktop and mobile).
pub const THEME_TOGGLE: &str = ".light-mode-toggle";

/// `<meta name="theme-color">` hint.
pub const THEME_META: &str = "meta[name=\"theme-color\"]";

/// Body class present while the light theme is active.
pub const LIGHT_CLASS: &str = "light-mode";

/// Short-lived class applied to toggle controls after a theme flip.
pub const PULSE_CLASS: &str = "toggle-pulse";

/// Media query for the system dark preference.
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// ── Document ────────────────────────────────────────────────────

pub const ROOT: &str = "html";
pub const BODY: &str = "body";

/// Body class held while an overlay owns the viewport.
pub const SCROLL_LOCK_CLASS: &str = "stopscrolling";

pub const LOADING_CLASS: &str = "loading";
pub const LOADED_CLASS: &str = "loaded";

// ── Navigation ──────────────────────────────────────────────────

pub const NAVBAR: &str = "#navbar";

/// Scroll-spy targets: every section carrying an id.
pub const SECTIONS: &str = "section[id]";

/// Desktop navigation entries; each carries its section id as a class.
pub const DESKTOP_NAV_ITEMS: &str = ".navbar .navbar-tabs .navbar-tabs-ul li";
pub const DESKTOP_ACTIVE_CLASS: &str = "activeThistab";

/// Mobile navigation entries; each carries its section id as a class.
pub const MOBILE_NAV_ITEMS: &str = ".mobiletogglemenu .mobile-navbar-tabs-ul li";
pub const MOBILE_ACTIVE_CLASS: &str = "activeThismobiletab";

pub const BACK_TO_TOP: &str = "#backtotopbutton";
pub const LANDING: &str = ".landing-page-container";
pub const BLOB: &str = ".blob";
pub const FOOTER_BLOB: &str = ".footer-blob";

// ── Mobile menu ─────────────────────────────────────────────────

pub const HAMBURGER_BUTTON: &str = "#hamburger-button";
pub const MENU_PANEL: &str = "#mobiletogglemenu";
pub const MENU_OPEN_CLASS: &str = "show-toggle-menu";

/// Hamburger bars and the class each one receives while the menu is open.
pub const BURGER_BARS: [(&str, &str); 3] = [
    ("#burger-bar1", "hamburger-animation1"),
    ("#burger-bar2", "hamburger-animation2"),
    ("#burger-bar3", "hamburger-animation3"),
];

// ── Certificate modal ───────────────────────────────────────────

pub const MODAL: &str = "#certificateModal";
pub const MODAL_IMAGE: &str = "#modalImage";
pub const MODAL_CAPTION: &str = "#caption";
pub const MODAL_CLOSE: &str = ".close";
pub const CERTIFICATE_TRIGGER: &str = ".view-certificate";

/// Caption used when a trigger carries no title.
pub const DEFAULT_CAPTION: &str = "Certificate";

// ── Cursor ──────────────────────────────────────────────────────

pub const CURSOR_INNER: &str = "#cursor-inner";
pub const CURSOR_OUTER: &str = "#cursor-outer";
pub const CURSOR_HOVER_CLASS: &str = "hover";

/// Elements that trigger the cursor hover state.
pub const INTERACTIVE: &str = "a, label, button, .tech-stack-box, .project-box, .certification-card";

/// Distance in pixels under which the outer ring snaps to the pointer.
pub const CURSOR_SETTLE_PX: f64 = 0.1;

// ── Preloader (fallback only) ───────────────────────────────────

pub const PRELOADER: &str = "#preloader";

// ── Notifications ───────────────────────────────────────────────

pub const IMAGE_PROTECTED_NOTICE: &str = "Image download is disabled";
pub const RESUME_OPENED_NOTICE: &str = "Resume opened successfully!";
pub const RESUME_FAILED_NOTICE: &str = "Resume download temporarily unavailable";

/// How long a notification stays on screen.
pub const NOTIFY_MS: u32 = 3000;
