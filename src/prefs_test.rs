use super::*;
use crate::fake_surface::FakeSurface;

fn prefs() -> ThemePrefs {
    ThemePrefs::from_config(&Config::default())
}

// =============================================================
// Parsing
// =============================================================

#[test]
fn parse_mode_accepts_current_format() {
    assert_eq!(parse_mode("light"), Some(ThemeMode::Light));
    assert_eq!(parse_mode(" Dark "), Some(ThemeMode::Dark));
    assert_eq!(parse_mode("true"), None);
    assert_eq!(parse_mode(""), None);
}

#[test]
fn parse_flag_accepts_booleans_only() {
    assert_eq!(parse_flag("true"), Some(true));
    assert_eq!(parse_flag("false"), Some(false));
    assert_eq!(parse_flag("light"), None);
}

// =============================================================
// load: source order
// =============================================================

#[test]
fn load_prefers_local_value() {
    let mut page = FakeSurface::bare();
    page.put(StorageKind::Local, "theme", "light");
    page.put(StorageKind::Session, "theme", "dark");
    page.system_dark = Some(true);
    let loaded = prefs().load(&mut page);
    assert_eq!(loaded.mode, ThemeMode::Light);
    assert_eq!(loaded.source, PrefSource::Stored(StorageKind::Local));
}

#[test]
fn load_falls_back_to_session_then_cookie() {
    let mut page = FakeSurface::bare();
    page.put(StorageKind::Cookie, "theme", "light");
    assert_eq!(prefs().load(&mut page).source, PrefSource::Stored(StorageKind::Cookie));

    page.put(StorageKind::Session, "theme", "dark");
    let loaded = prefs().load(&mut page);
    assert_eq!(loaded.mode, ThemeMode::Dark);
    assert_eq!(loaded.source, PrefSource::Stored(StorageKind::Session));
}

#[test]
fn load_uses_system_scheme_without_stored_value() {
    let mut page = FakeSurface::bare();
    page.system_dark = Some(false);
    let loaded = prefs().load(&mut page);
    assert_eq!(loaded.mode, ThemeMode::Light);
    assert_eq!(loaded.source, PrefSource::System);
    assert!(!loaded.source.is_explicit());
}

#[test]
fn load_defaults_to_dark() {
    let mut page = FakeSurface::bare();
    let loaded = prefs().load(&mut page);
    assert_eq!(loaded.mode, ThemeMode::Dark);
    assert_eq!(loaded.source, PrefSource::Default);
}

#[test]
fn load_survives_failing_local_storage() {
    let mut page = FakeSurface::bare();
    page.failing.insert(StorageKind::Local);
    page.put(StorageKind::Session, "theme", "light");
    assert_eq!(prefs().load(&mut page).mode, ThemeMode::Light);
}

#[test]
fn load_skips_garbage_value() {
    let mut page = FakeSurface::bare();
    page.put(StorageKind::Local, "theme", "purple");
    page.put(StorageKind::Cookie, "theme", "light");
    assert_eq!(prefs().load(&mut page).mode, ThemeMode::Light);
}

// =============================================================
// load: legacy migration
// =============================================================

#[test]
fn legacy_light_flag_is_migrated() {
    let mut page = FakeSurface::bare();
    page.put(StorageKind::Local, "lightMode", "true");
    let loaded = prefs().load(&mut page);
    assert_eq!(loaded.mode, ThemeMode::Light);
    assert_eq!(loaded.source, PrefSource::Legacy);
    assert_eq!(page.stored(StorageKind::Local, "theme").as_deref(), Some("light"));
    assert_eq!(page.stored(StorageKind::Local, "lightMode"), None);
}

#[test]
fn legacy_dark_flag_is_migrated() {
    let mut page = FakeSurface::bare();
    page.put(StorageKind::Local, "darkMode", "false");
    let loaded = prefs().load(&mut page);
    assert_eq!(loaded.mode, ThemeMode::Light);
    assert_eq!(page.stored(StorageKind::Local, "darkMode"), None);
}

#[test]
fn boolean_under_new_key_reads_as_light_flag() {
    let mut page = FakeSurface::bare();
    page.put(StorageKind::Local, "theme", "true");
    let loaded = prefs().load(&mut page);
    assert_eq!(loaded.mode, ThemeMode::Light);
    assert_eq!(page.stored(StorageKind::Local, "theme").as_deref(), Some("light"));
}

#[test]
fn current_value_wins_over_legacy_flag() {
    let mut page = FakeSurface::bare();
    page.put(StorageKind::Local, "theme", "dark");
    page.put(StorageKind::Local, "lightMode", "true");
    assert_eq!(prefs().load(&mut page).mode, ThemeMode::Dark);
}

// =============================================================
// save
// =============================================================

#[test]
fn save_writes_every_backend_in_new_format() {
    let mut page = FakeSurface::bare();
    assert_eq!(prefs().save(&mut page, ThemeMode::Light), 3);
    for kind in StorageKind::ALL {
        assert_eq!(page.stored(kind, "theme").as_deref(), Some("light"));
    }
    assert_eq!(page.stored(StorageKind::Local, "lightMode"), None);
}

#[test]
fn save_is_best_effort_per_backend() {
    let mut page = FakeSurface::bare();
    page.failing.insert(StorageKind::Local);
    page.failing.insert(StorageKind::Cookie);
    assert_eq!(prefs().save(&mut page, ThemeMode::Dark), 1);
    assert_eq!(page.stored(StorageKind::Session, "theme").as_deref(), Some("dark"));
}

// =============================================================
// parse_update
// =============================================================

#[test]
fn parse_update_reads_known_keys() {
    let p = prefs();
    assert_eq!(p.parse_update("theme", Some("light")), Some(ThemeMode::Light));
    assert_eq!(p.parse_update("lightMode", Some("false")), Some(ThemeMode::Dark));
    assert_eq!(p.parse_update("darkMode", Some("false")), Some(ThemeMode::Light));
}

#[test]
fn parse_update_ignores_other_keys_and_removals() {
    let p = prefs();
    assert_eq!(p.parse_update("cart", Some("light")), None);
    assert_eq!(p.parse_update("theme", None), None);
}

// =============================================================
// Cookie format
// =============================================================

#[test]
fn cookie_value_finds_key_among_others() {
    let jar = "session=abc; theme=light; other=1";
    assert_eq!(cookie_value(jar, "theme").as_deref(), Some("light"));
    assert_eq!(cookie_value(jar, "them"), None);
    assert_eq!(cookie_value("", "theme"), None);
}

#[test]
fn cookie_assignment_is_site_wide() {
    assert_eq!(
        cookie_assignment("theme", "dark", 31_536_000),
        "theme=dark; path=/; max-age=31536000; SameSite=Lax"
    );
}
