#![allow(clippy::float_cmp)]

use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_matches_live_page_timings() {
    let config = Config::default();
    assert_eq!(config.theme_lock_ms, 500.0);
    assert_eq!(config.resize_debounce_ms, 250.0);
    assert_eq!(config.section_offset_px, 150.0);
    assert_eq!(config.back_to_top_px, 400.0);
    assert_eq!(config.theme_key, "theme");
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn default_validates() {
    assert!(Config::default().validate().is_ok());
}

// =============================================================
// from_json
// =============================================================

#[test]
fn empty_object_yields_defaults() {
    let config = Config::from_json("{}").expect("empty config should parse");
    assert_eq!(config, Config::default());
}

#[test]
fn partial_object_overrides_named_fields_only() {
    let config = Config::from_json(r#"{ "themeKey": "portfolioTheme", "menuLockMs": 120, "logLevel": "debug" }"#)
        .expect("partial config should parse");
    assert_eq!(config.theme_key, "portfolioTheme");
    assert_eq!(config.menu_lock_ms, 120.0);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.theme_lock_ms, DEFAULT_THEME_LOCK_MS);
}

#[test]
fn malformed_json_is_parse_error() {
    assert!(matches!(Config::from_json("{ nope"), Err(ConfigError::Parse(_))));
}

#[test]
fn negative_timing_is_rejected() {
    let err = Config::from_json(r#"{ "resizeDebounceMs": -1 }"#).expect_err("negative debounce must fail");
    assert!(matches!(err, ConfigError::Invalid { field: "resizeDebounceMs", .. }));
}

#[test]
fn easing_out_of_range_is_rejected() {
    assert!(Config::from_json(r#"{ "cursorEasing": 0 }"#).is_err());
    assert!(Config::from_json(r#"{ "cursorEasing": 1.5 }"#).is_err());
    assert!(Config::from_json(r#"{ "cursorEasing": 1 }"#).is_ok());
}

#[test]
fn blank_theme_key_is_rejected() {
    let err = Config::from_json(r#"{ "themeKey": "  " }"#).expect_err("blank key must fail");
    assert!(matches!(err, ConfigError::Invalid { field: "themeKey", .. }));
}

// =============================================================
// LogLevel
// =============================================================

#[test]
fn log_level_maps_to_log_crate() {
    assert_eq!(LogLevel::Warn.to_level(), log::Level::Warn);
    assert_eq!(LogLevel::Trace.to_level(), log::Level::Trace);
}
