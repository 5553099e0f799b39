//! Layered theme preference store.
//!
//! Reads walk local storage (new key, then the legacy boolean flags), session
//! storage and the cookie jar before falling back to the system color scheme
//! and finally dark. Writes go to every backend; each one is best-effort and a
//! failure in one never blocks the others.
//!
//! Legacy boolean values are translated on read and rewritten in the new
//! `"light"` / `"dark"` format. New writes never use the boolean format.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use crate::config::Config;
use crate::surface::{StorageKind, Surface};
use crate::theme::ThemeMode;

/// Where the initial theme came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefSource {
    /// A stored value in the current format.
    Stored(StorageKind),
    /// A legacy boolean flag, migrated on load.
    Legacy,
    System,
    Default,
}

impl PrefSource {
    /// Whether the user chose this theme (as opposed to inheriting it).
    #[must_use]
    pub fn is_explicit(self) -> bool {
        matches!(self, Self::Stored(_) | Self::Legacy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedPreference {
    pub mode: ThemeMode,
    pub source: PrefSource,
}

/// Parse a stored mode in the current format.
#[must_use]
pub fn parse_mode(raw: &str) -> Option<ThemeMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "light" => Some(ThemeMode::Light),
        "dark" => Some(ThemeMode::Dark),
        _ => None,
    }
}

/// Parse a legacy boolean flag.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Value stored under `key` in a `document.cookie` string.
#[must_use]
pub fn cookie_value(cookies: &str, key: &str) -> Option<String> {
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == key).then(|| value.to_owned())
    })
}

/// A `document.cookie` assignment that stores `value` under `key` for
/// `max_age_secs` seconds. A zero max-age deletes the cookie.
#[must_use]
pub fn cookie_assignment(key: &str, value: &str, max_age_secs: u32) -> String {
    format!("{key}={value}; path=/; max-age={max_age_secs}; SameSite=Lax")
}

#[derive(Debug, Clone)]
pub struct ThemePrefs {
    key: String,
    legacy_light_key: String,
    legacy_dark_key: String,
}

impl ThemePrefs {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            key: config.theme_key.clone(),
            legacy_light_key: config.legacy_light_key.clone(),
            legacy_dark_key: config.legacy_dark_key.clone(),
        }
    }

    /// Resolve the initial theme, migrating a legacy value if one is found.
    pub fn load(&self, surface: &mut dyn Surface) -> LoadedPreference {
        if let Some(raw) = read(surface, StorageKind::Local, &self.key) {
            if let Some(mode) = parse_mode(&raw) {
                return LoadedPreference { mode, source: PrefSource::Stored(StorageKind::Local) };
            }
            // Boolean under the new key: an old build wrote the light flag there.
            if let Some(light) = parse_flag(&raw) {
                return self.migrated(surface, ThemeMode::from_light(light));
            }
            log::warn!("ignoring unrecognized stored theme {raw:?}");
        }

        if let Some(mode) = self.read_legacy(surface) {
            return self.migrated(surface, mode);
        }

        for kind in [StorageKind::Session, StorageKind::Cookie] {
            if let Some(mode) = read(surface, kind, &self.key).as_deref().and_then(parse_mode) {
                return LoadedPreference { mode, source: PrefSource::Stored(kind) };
            }
        }

        if let Some(dark) = surface.prefers_dark() {
            return LoadedPreference { mode: ThemeMode::from_dark(dark), source: PrefSource::System };
        }

        LoadedPreference { mode: ThemeMode::Dark, source: PrefSource::Default }
    }

    fn read_legacy(&self, surface: &dyn Surface) -> Option<ThemeMode> {
        let light = read(surface, StorageKind::Local, &self.legacy_light_key)
            .as_deref()
            .and_then(parse_flag)
            .map(ThemeMode::from_light);
        light.or_else(|| {
            read(surface, StorageKind::Local, &self.legacy_dark_key)
                .as_deref()
                .and_then(parse_flag)
                .map(ThemeMode::from_dark)
        })
    }

    fn migrated(&self, surface: &mut dyn Surface, mode: ThemeMode) -> LoadedPreference {
        log::info!("migrating legacy theme preference to {}", mode.as_str());
        if write(surface, StorageKind::Local, &self.key, mode.as_str()) {
            for legacy in [&self.legacy_light_key, &self.legacy_dark_key] {
                if let Err(e) = surface.storage_remove(StorageKind::Local, legacy) {
                    log::warn!("could not remove legacy key {legacy}: {e}");
                }
            }
        }
        LoadedPreference { mode, source: PrefSource::Legacy }
    }

    /// Persist `mode` everywhere. Returns how many backends accepted it.
    pub fn save(&self, surface: &mut dyn Surface, mode: ThemeMode) -> usize {
        let written = StorageKind::ALL
            .into_iter()
            .filter(|kind| write(surface, *kind, &self.key, mode.as_str()))
            .count();
        if written == 0 {
            log::warn!("theme preference not persisted; running without storage");
        } else {
            log::debug!("theme preference saved to {written} store(s): {}", mode.as_str());
        }
        written
    }

    /// Interpret a storage change notification from another tab.
    #[must_use]
    pub fn parse_update(&self, key: &str, value: Option<&str>) -> Option<ThemeMode> {
        let value = value?;
        if key == self.key {
            parse_mode(value).or_else(|| parse_flag(value).map(ThemeMode::from_light))
        } else if key == self.legacy_light_key {
            parse_flag(value).map(ThemeMode::from_light)
        } else if key == self.legacy_dark_key {
            parse_flag(value).map(ThemeMode::from_dark)
        } else {
            None
        }
    }
}

fn read(surface: &dyn Surface, kind: StorageKind, key: &str) -> Option<String> {
    match surface.storage_get(kind, key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("theme preference read failed: {e}");
            None
        }
    }
}

fn write(surface: &mut dyn Surface, kind: StorageKind, key: &str, value: &str) -> bool {
    match surface.storage_set(kind, key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("theme preference write failed: {e}");
            false
        }
    }
}
