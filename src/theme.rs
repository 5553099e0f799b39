//! Theme controller: the page's light/dark mode and its persistence.
//!
//! Applies the mode as the `light-mode` body class, the root `data-theme`
//! attribute, the `theme-color` meta hint and `aria-pressed` on every toggle
//! control, keeping desktop and mobile toggles in sync.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. When every store refuses the write the toggle
//! still lands in memory and on the page; the preference just won't survive a
//! reload.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use serde::Serialize;

use crate::config::Config;
use crate::consts;
use crate::error::soft;
use crate::prefs::ThemePrefs;
use crate::surface::Surface;
use crate::timing::ToggleLock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub fn from_light(light: bool) -> Self {
        if light { Self::Light } else { Self::Dark }
    }

    #[must_use]
    pub fn from_dark(dark: bool) -> Self {
        Self::from_light(!dark)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    pub mode: ThemeMode,
    /// The user picked this mode (now or on an earlier visit). System
    /// color-scheme changes are only followed while this is false.
    pub explicit: bool,
}

pub struct ThemeController {
    state: ThemeState,
    lock: ToggleLock,
    prefs: ThemePrefs,
    light_meta: String,
    dark_meta: String,
}

impl ThemeController {
    /// Load the stored preference and paint it. Never fails: every source is
    /// optional and dark is the last resort.
    pub fn initialize(surface: &mut dyn Surface, config: &Config) -> Self {
        let prefs = ThemePrefs::from_config(config);
        let loaded = prefs.load(surface);
        log::info!("theme initialized: {} (source {:?})", loaded.mode.as_str(), loaded.source);

        let controller = Self {
            state: ThemeState { mode: loaded.mode, explicit: loaded.source.is_explicit() },
            lock: ToggleLock::new(config.theme_lock_ms),
            prefs,
            light_meta: config.light_meta_color.clone(),
            dark_meta: config.dark_meta_color.clone(),
        };
        controller.apply(surface);
        controller
    }

    #[must_use]
    pub fn mode(&self) -> ThemeMode {
        self.state.mode
    }

    #[cfg(test)]
    #[must_use]
    pub fn state(&self) -> ThemeState {
        self.state
    }

    /// Flip the mode. Returns the new mode, or `None` when the call landed
    /// inside the previous toggle's lock window and was dropped.
    pub fn toggle(&mut self, surface: &mut dyn Surface, now: f64) -> Option<ThemeMode> {
        if !self.lock.try_acquire(now) {
            log::debug!("theme toggle already in progress, ignoring");
            return None;
        }

        let next = self.state.mode.flipped();
        self.state = ThemeState { mode: next, explicit: true };
        self.apply(surface);
        self.prefs.save(surface, next);
        self.set_pulse(surface, true);
        log::debug!("theme toggled to {}", next.as_str());
        Some(next)
    }

    /// Follow a system color-scheme change unless the user has chosen.
    pub fn on_system_change(&mut self, prefers_dark: bool, surface: &mut dyn Surface) -> Option<ThemeMode> {
        if self.state.explicit {
            return None;
        }
        self.adopt(ThemeMode::from_dark(prefers_dark), false, surface)
    }

    /// Adopt a preference another tab just wrote. Not persisted again.
    pub fn on_storage_change(&mut self, key: &str, value: Option<&str>, surface: &mut dyn Surface) -> Option<ThemeMode> {
        let mode = self.prefs.parse_update(key, value)?;
        self.adopt(mode, true, surface)
    }

    fn adopt(&mut self, mode: ThemeMode, explicit: bool, surface: &mut dyn Surface) -> Option<ThemeMode> {
        self.state.explicit |= explicit;
        if mode == self.state.mode {
            return None;
        }
        self.state.mode = mode;
        self.apply(surface);
        Some(mode)
    }

    /// Paint the current mode onto the page.
    pub fn apply(&self, surface: &mut dyn Surface) {
        let mode = self.state.mode;
        soft(
            "theme body class",
            surface.set_class(consts::BODY, consts::LIGHT_CLASS, mode == ThemeMode::Light),
        );
        soft("theme root attribute", surface.set_attribute(consts::ROOT, "data-theme", mode.as_str()));
        soft("theme meta hint", surface.set_attribute(consts::THEME_META, "content", self.meta_color()));
        let pressed = if mode == ThemeMode::Light { "true" } else { "false" };
        soft("theme toggle state", surface.set_attribute(consts::THEME_TOGGLE, "aria-pressed", pressed));
    }

    pub fn set_pulse(&self, surface: &mut dyn Surface, on: bool) {
        soft("theme toggle pulse", surface.set_class(consts::THEME_TOGGLE, consts::PULSE_CLASS, on));
    }

    #[must_use]
    pub fn meta_color(&self) -> &str {
        match self.state.mode {
            ThemeMode::Light => &self.light_meta,
            ThemeMode::Dark => &self.dark_meta,
        }
    }
}
