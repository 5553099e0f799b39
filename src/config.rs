//! Coordinator tunables.
//!
//! Every field has a default matching the live page, so an empty JSON object
//! (or no config at all) yields a working coordinator. The browser host reads
//! an optional `window.FOLIO_CONFIG` object and hands it over as JSON.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts;
use crate::error::ConfigError;

pub const DEFAULT_THEME_LOCK_MS: f64 = 500.0;
pub const DEFAULT_MENU_LOCK_MS: f64 = 300.0;
pub const DEFAULT_RESIZE_DEBOUNCE_MS: f64 = 250.0;
pub const DEFAULT_PULSE_MS: f64 = 150.0;
pub const DEFAULT_FADE_MS: f64 = 300.0;
pub const DEFAULT_SECTION_OFFSET_PX: f64 = 150.0;
pub const DEFAULT_SCROLL_MARGIN_PX: f64 = 20.0;
pub const DEFAULT_NAVBAR_HEIGHT_PX: f64 = 80.0;
pub const DEFAULT_BACK_TO_TOP_PX: f64 = 400.0;
pub const DEFAULT_CURSOR_EASING: f64 = 0.1;
pub const DEFAULT_COOKIE_MAX_AGE_SECS: u32 = 31_536_000;
pub const DEFAULT_INIT_RETRIES: u32 = 3;
pub const DEFAULT_RESUME_URL: &str = "src/resume/resume.pdf";

/// Console verbosity for the browser log sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub fn to_level(self) -> log::Level {
        match self {
            Self::Error => log::Level::Error,
            Self::Warn => log::Level::Warn,
            Self::Info => log::Level::Info,
            Self::Debug => log::Level::Debug,
            Self::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub theme_key: String,
    pub legacy_light_key: String,
    pub legacy_dark_key: String,
    pub cookie_max_age_secs: u32,
    pub light_meta_color: String,
    pub dark_meta_color: String,

    pub theme_lock_ms: f64,
    pub menu_lock_ms: f64,
    pub resize_debounce_ms: f64,
    pub pulse_ms: f64,
    pub fade_ms: f64,

    /// Subtracted from each section's top before range checks.
    pub section_offset_px: f64,
    /// Extra gap left above a smooth-scroll target.
    pub scroll_margin_px: f64,
    /// Used when `#navbar` cannot be measured.
    pub navbar_height_px: f64,
    pub back_to_top_px: f64,
    pub blob_parallax: f64,
    pub footer_blob_parallax: f64,

    /// Fraction of the remaining distance the outer cursor covers per frame.
    pub cursor_easing: f64,
    /// Host reports a fine pointer (mouse). Coarse pointers get no custom cursor.
    pub fine_pointer: bool,

    pub resume_url: String,
    pub init_retries: u32,
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_key: consts::THEME_KEY.to_owned(),
            legacy_light_key: consts::LEGACY_LIGHT_KEY.to_owned(),
            legacy_dark_key: consts::LEGACY_DARK_KEY.to_owned(),
            cookie_max_age_secs: DEFAULT_COOKIE_MAX_AGE_SECS,
            light_meta_color: "#fafafa".to_owned(),
            dark_meta_color: "#0a0a0f".to_owned(),
            theme_lock_ms: DEFAULT_THEME_LOCK_MS,
            menu_lock_ms: DEFAULT_MENU_LOCK_MS,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            pulse_ms: DEFAULT_PULSE_MS,
            fade_ms: DEFAULT_FADE_MS,
            section_offset_px: DEFAULT_SECTION_OFFSET_PX,
            scroll_margin_px: DEFAULT_SCROLL_MARGIN_PX,
            navbar_height_px: DEFAULT_NAVBAR_HEIGHT_PX,
            back_to_top_px: DEFAULT_BACK_TO_TOP_PX,
            blob_parallax: 0.1,
            footer_blob_parallax: 0.05,
            cursor_easing: DEFAULT_CURSOR_EASING,
            fine_pointer: true,
            resume_url: DEFAULT_RESUME_URL.to_owned(),
            init_retries: DEFAULT_INIT_RETRIES,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Parse and validate a JSON config object. Missing fields take defaults.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("themeLockMs", self.theme_lock_ms),
            ("menuLockMs", self.menu_lock_ms),
            ("resizeDebounceMs", self.resize_debounce_ms),
            ("pulseMs", self.pulse_ms),
            ("fadeMs", self.fade_ms),
            ("sectionOffsetPx", self.section_offset_px),
            ("scrollMarginPx", self.scroll_margin_px),
            ("navbarHeightPx", self.navbar_height_px),
            ("backToTopPx", self.back_to_top_px),
        ];
        for (field, value) in durations {
            non_negative(field, value)?;
        }

        if !(self.cursor_easing > 0.0 && self.cursor_easing <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "cursorEasing",
                reason: format!("{} is outside (0, 1]", self.cursor_easing),
            });
        }
        if self.theme_key.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "themeKey", reason: "must not be empty".into() });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid { field, reason: format!("{value} is not a finite non-negative number") })
    }
}
