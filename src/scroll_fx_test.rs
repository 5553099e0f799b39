#![allow(clippy::float_cmp)]

use super::*;
use crate::fake_surface::FakeSurface;

fn button(page: &FakeSurface) -> BackToTop {
    BackToTop::new(page, 400.0).expect("button present")
}

// =============================================================
// BackToTop
// =============================================================

#[test]
fn missing_button_is_reported() {
    let page = FakeSurface::bare();
    assert!(BackToTop::new(&page, 400.0).is_err());
}

#[test]
fn shown_past_threshold() {
    let mut page = FakeSurface::page();
    let mut btn = button(&page);
    assert_eq!(btn.update(401.0, &mut page), Some(true));
    assert!(btn.is_shown());
    assert_eq!(page.style(consts::BACK_TO_TOP, "display").as_deref(), Some("block"));
    assert_eq!(page.style(consts::BACK_TO_TOP, "opacity").as_deref(), Some("1"));
}

#[test]
fn threshold_itself_hides() {
    let mut page = FakeSurface::page();
    let mut btn = button(&page);
    assert_eq!(btn.update(400.0, &mut page), Some(false));
    assert_eq!(page.style(consts::BACK_TO_TOP, "opacity").as_deref(), Some("0"));
}

#[test]
fn steady_state_writes_nothing() {
    let mut page = FakeSurface::page();
    let mut btn = button(&page);
    btn.update(900.0, &mut page);
    let before = page.mutations;
    assert_eq!(btn.update(950.0, &mut page), None);
    assert_eq!(page.mutations, before);
}

#[test]
fn fade_completes_when_still_hidden() {
    let mut page = FakeSurface::page();
    let mut btn = button(&page);
    btn.update(900.0, &mut page);
    btn.update(0.0, &mut page);
    assert_eq!(page.style(consts::BACK_TO_TOP, "display").as_deref(), Some("block"));

    btn.finish_fade(&mut page);
    assert_eq!(page.style(consts::BACK_TO_TOP, "display").as_deref(), Some("none"));
}

#[test]
fn fade_is_abandoned_when_shown_again() {
    let mut page = FakeSurface::page();
    let mut btn = button(&page);
    btn.update(900.0, &mut page);
    btn.update(0.0, &mut page);
    btn.update(900.0, &mut page);

    btn.finish_fade(&mut page);
    assert_eq!(page.style(consts::BACK_TO_TOP, "display").as_deref(), Some("block"));
}

// =============================================================
// Parallax and geometry
// =============================================================

#[test]
fn parallax_translates_by_factor() {
    assert_eq!(parallax_transform(400.0, 0.1), "translate(-50%, -50%) translateY(40px)");
    assert_eq!(parallax_transform(0.0, 0.05), "translate(-50%, -50%) translateY(0px)");
}

#[test]
fn apply_parallax_moves_both_blobs() {
    let mut page = FakeSurface::page();
    apply_parallax(&mut page, 200.0, &Config::default());
    assert_eq!(
        page.style(consts::BLOB, "transform").as_deref(),
        Some("translate(-50%, -50%) translateY(20px)")
    );
    assert_eq!(
        page.style(consts::FOOTER_BLOB, "transform").as_deref(),
        Some("translate(-50%, -50%) translateY(10px)")
    );
}

#[test]
fn apply_parallax_without_blobs_is_quiet() {
    let mut page = FakeSurface::bare();
    apply_parallax(&mut page, 200.0, &Config::default());
    assert_eq!(page.mutations, 0);
}

#[test]
fn scroll_target_clears_navbar_and_margin() {
    assert_eq!(smooth_scroll_target(800.0, 64.0, 20.0), 716.0);
    assert_eq!(smooth_scroll_target(10.0, 80.0, 20.0), 0.0);
}

#[test]
fn navbar_height_falls_back_when_unmeasured() {
    let page = FakeSurface::page();
    assert_eq!(navbar_height(&page, 80.0), 64.0);
    assert_eq!(navbar_height(&FakeSurface::bare(), 80.0), 80.0);
}

#[test]
fn landing_padding_follows_navbar() {
    let mut page = FakeSurface::page();
    adjust_landing_padding(&mut page, &Config::default());
    assert_eq!(page.style(consts::LANDING, "padding-top").as_deref(), Some("84px"));
}
