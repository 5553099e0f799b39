use super::*;
use crate::fake_surface::FakeSurface;

#[test]
fn acquire_locks_body_scroll() {
    let mut page = FakeSurface::bare();
    let mut lock = ScrollLock::default();
    lock.acquire(Overlay::Menu, &mut page);
    assert!(lock.is_locked());
    assert!(page.scroll_locked());
}

#[test]
fn release_by_holder_unlocks() {
    let mut page = FakeSurface::bare();
    let mut lock = ScrollLock::default();
    lock.acquire(Overlay::Modal, &mut page);
    lock.release(Overlay::Modal, &mut page);
    assert_eq!(lock.holder(), None);
    assert!(!page.scroll_locked());
}

#[test]
fn release_by_non_holder_is_ignored() {
    let mut page = FakeSurface::bare();
    let mut lock = ScrollLock::default();
    lock.acquire(Overlay::Modal, &mut page);
    let before = page.mutations;

    lock.release(Overlay::Menu, &mut page);
    assert_eq!(lock.holder(), Some(Overlay::Modal));
    assert!(page.scroll_locked());
    assert_eq!(page.mutations, before);
}

#[test]
fn release_when_unlocked_touches_nothing() {
    let mut page = FakeSurface::bare();
    let mut lock = ScrollLock::default();
    lock.release(Overlay::Menu, &mut page);
    assert_eq!(page.mutations, 0);
}
