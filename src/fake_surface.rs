//! In-memory [`Surface`] for unit tests.
//!
//! Elements are registered under one or more selector strings and matched by
//! exact string equality, which is enough for the fixed selectors in
//! [`crate::consts`]. Every mutating call bumps `mutations` so tests can assert
//! that a no-op really touched nothing.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::consts;
use crate::error::SurfaceError;
use crate::surface::{SectionBox, StorageKind, Surface};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub selectors: Vec<String>,
    pub classes: BTreeSet<String>,
    pub attrs: BTreeMap<String, String>,
    pub styles: BTreeMap<String, String>,
    pub text: Option<String>,
    pub top: f64,
    pub height: f64,
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub elements: Vec<FakeElement>,
    pub scroll: f64,
    pub scrolled_to: Vec<f64>,
    pub section_boxes: Vec<SectionBox>,
    pub focusables: HashMap<String, usize>,
    pub focused: Option<(String, usize)>,
    pub focused_selector: Option<String>,
    pub storage: HashMap<(StorageKind, String), String>,
    pub failing: HashSet<StorageKind>,
    pub system_dark: Option<bool>,
    pub popup_blocked: bool,
    pub opened: Vec<String>,
    pub navigated: Vec<String>,
    pub mutations: usize,
}

impl FakeSurface {
    /// A document with nothing but `<html>` and `<body>`.
    pub fn bare() -> Self {
        let mut page = Self::default();
        page.add(&[consts::ROOT]);
        page.add(&[consts::BODY]);
        page
    }

    /// The full portfolio page contract.
    pub fn page() -> Self {
        let mut page = Self::bare();
        page.add(&[consts::THEME_META]);
        page.add(&[consts::THEME_TOGGLE]);
        page.add(&[consts::THEME_TOGGLE]);
        page.add(&[consts::NAVBAR]).height = 64.0;
        page.add(&[consts::HAMBURGER_BUTTON]);
        page.add(&[consts::MENU_PANEL]);
        for (bar, _) in consts::BURGER_BARS {
            page.add(&[bar]);
        }
        page.add(&[consts::BACK_TO_TOP]);
        page.add(&[consts::LANDING]);
        page.add(&[consts::BLOB]);
        page.add(&[consts::FOOTER_BLOB]);
        page.add(&[consts::MODAL]);
        page.add(&[consts::MODAL_IMAGE]);
        page.add(&[consts::MODAL_CAPTION]);
        page.add(&[consts::CURSOR_INNER]);
        page.add(&[consts::CURSOR_OUTER]);
        page.focusables.insert(consts::MENU_PANEL.to_owned(), 5);
        page.focusables.insert(consts::MODAL.to_owned(), 2);
        for (id, top, height) in [("home", 0.0, 800.0), ("about", 800.0, 600.0), ("projects", 1400.0, 1000.0)] {
            page.add_section(id, top, height);
        }
        page
    }

    pub fn add(&mut self, selectors: &[&str]) -> &mut FakeElement {
        self.elements.push(FakeElement {
            selectors: selectors.iter().map(|s| (*s).to_owned()).collect(),
            ..FakeElement::default()
        });
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    /// Register a section plus its desktop and mobile navigation entries.
    pub fn add_section(&mut self, id: &str, top: f64, height: f64) {
        let section = self.add(&[consts::SECTIONS]);
        section.top = top;
        section.height = height;
        let anchor = format!("#{id}");
        self.add(&[anchor.as_str()]).top = top;
        self.section_boxes.push(SectionBox { id: id.to_owned(), top, height });

        let desktop = format!("{}.{id}", consts::DESKTOP_NAV_ITEMS);
        self.add(&[consts::DESKTOP_NAV_ITEMS, desktop.as_str()]).classes.insert(id.to_owned());
        let mobile = format!("{}.{id}", consts::MOBILE_NAV_ITEMS);
        self.add(&[consts::MOBILE_NAV_ITEMS, mobile.as_str()]).classes.insert(id.to_owned());
    }

    pub fn remove(&mut self, selector: &str) {
        self.elements.retain(|el| !el.selectors.iter().any(|s| s == selector));
    }

    fn matches<'a>(&'a self, selector: &'a str) -> impl Iterator<Item = &'a FakeElement> + 'a {
        self.elements.iter().filter(move |el| el.selectors.iter().any(|s| s == selector))
    }

    fn first<'a>(&'a self, selector: &'a str) -> Option<&'a FakeElement> {
        self.matches(selector).next()
    }

    fn each_mut(&mut self, selector: &str, mut f: impl FnMut(&mut FakeElement)) -> Result<(), SurfaceError> {
        self.mutations += 1;
        let mut hit = false;
        for el in &mut self.elements {
            if el.selectors.iter().any(|s| s == selector) {
                f(el);
                hit = true;
            }
        }
        if hit { Ok(()) } else { Err(SurfaceError::missing(selector)) }
    }

    // --- Assertions ---

    /// Whether every element matching `selector` carries `class`.
    pub fn all_have_class(&self, selector: &str, class: &str) -> bool {
        let mut any = false;
        for el in self.matches(selector) {
            any = true;
            if !el.classes.contains(class) {
                return false;
            }
        }
        any
    }

    pub fn count_with_class(&self, selector: &str, class: &str) -> usize {
        self.matches(selector).filter(|el| el.classes.contains(class)).count()
    }

    pub fn attr(&self, selector: &str, name: &str) -> Option<String> {
        self.first(selector).and_then(|el| el.attrs.get(name).cloned())
    }

    pub fn style(&self, selector: &str, property: &str) -> Option<String> {
        self.first(selector).and_then(|el| el.styles.get(property).cloned())
    }

    pub fn text(&self, selector: &str) -> Option<String> {
        self.first(selector).and_then(|el| el.text.clone())
    }

    pub fn stored(&self, kind: StorageKind, key: &str) -> Option<String> {
        self.storage.get(&(kind, key.to_owned())).cloned()
    }

    pub fn put(&mut self, kind: StorageKind, key: &str, value: &str) {
        self.storage.insert((kind, key.to_owned()), value.to_owned());
    }

    pub fn scroll_locked(&self) -> bool {
        self.has_class(consts::BODY, consts::SCROLL_LOCK_CLASS)
    }

    fn storage_check(&self, kind: StorageKind) -> Result<(), SurfaceError> {
        if self.failing.contains(&kind) {
            Err(SurfaceError::Storage { backend: kind.name(), reason: "disabled".into() })
        } else {
            Ok(())
        }
    }
}

impl Surface for FakeSurface {
    fn exists(&self, selector: &str) -> bool {
        self.first(selector).is_some()
    }

    fn has_class(&self, selector: &str, class: &str) -> bool {
        self.first(selector).is_some_and(|el| el.classes.contains(class))
    }

    fn set_class(&mut self, selector: &str, class: &str, on: bool) -> Result<(), SurfaceError> {
        self.each_mut(selector, |el| {
            if on {
                el.classes.insert(class.to_owned());
            } else {
                el.classes.remove(class);
            }
        })
    }

    fn set_class_where(&mut self, selector: &str, tag: &str, class: &str, on: bool) -> Result<(), SurfaceError> {
        self.mutations += 1;
        let mut hit = false;
        for el in &mut self.elements {
            if el.selectors.iter().any(|s| s == selector) && el.classes.contains(tag) {
                if on {
                    el.classes.insert(class.to_owned());
                } else {
                    el.classes.remove(class);
                }
                hit = true;
            }
        }
        if hit { Ok(()) } else { Err(SurfaceError::missing(selector)) }
    }

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.each_mut(selector, |el| {
            el.attrs.insert(name.to_owned(), value.to_owned());
        })
    }

    fn set_style(&mut self, selector: &str, property: &str, value: &str) -> Result<(), SurfaceError> {
        self.each_mut(selector, |el| {
            el.styles.insert(property.to_owned(), value.to_owned());
        })
    }

    fn set_text(&mut self, selector: &str, text: &str) -> Result<(), SurfaceError> {
        self.each_mut(selector, |el| el.text = Some(text.to_owned()))
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn scroll_to(&mut self, top: f64) -> Result<(), SurfaceError> {
        self.mutations += 1;
        self.scroll = top;
        self.scrolled_to.push(top);
        Ok(())
    }

    fn offset_top(&self, selector: &str) -> Option<f64> {
        self.first(selector).map(|el| el.top)
    }

    fn offset_height(&self, selector: &str) -> Option<f64> {
        self.first(selector).map(|el| el.height)
    }

    fn sections(&self, _selector: &str) -> Vec<SectionBox> {
        self.section_boxes.clone()
    }

    fn focusable_count(&self, container: &str) -> usize {
        self.focusables.get(container).copied().unwrap_or(0)
    }

    fn focused_index(&self, container: &str) -> Option<usize> {
        self.focused
            .as_ref()
            .filter(|(c, _)| c == container)
            .map(|(_, idx)| *idx)
    }

    fn focus_nth(&mut self, container: &str, index: usize) -> Result<(), SurfaceError> {
        self.mutations += 1;
        if index >= self.focusable_count(container) {
            return Err(SurfaceError::missing(container));
        }
        self.focused = Some((container.to_owned(), index));
        self.focused_selector = None;
        Ok(())
    }

    fn focus(&mut self, selector: &str) -> Result<(), SurfaceError> {
        self.mutations += 1;
        if !self.exists(selector) {
            return Err(SurfaceError::missing(selector));
        }
        self.focused = None;
        self.focused_selector = Some(selector.to_owned());
        Ok(())
    }

    fn storage_get(&self, kind: StorageKind, key: &str) -> Result<Option<String>, SurfaceError> {
        self.storage_check(kind)?;
        Ok(self.stored(kind, key))
    }

    fn storage_set(&mut self, kind: StorageKind, key: &str, value: &str) -> Result<(), SurfaceError> {
        self.storage_check(kind)?;
        self.put(kind, key, value);
        Ok(())
    }

    fn storage_remove(&mut self, kind: StorageKind, key: &str) -> Result<(), SurfaceError> {
        self.storage_check(kind)?;
        self.storage.remove(&(kind, key.to_owned()));
        Ok(())
    }

    fn prefers_dark(&self) -> Option<bool> {
        self.system_dark
    }

    fn open_window(&mut self, url: &str) -> Result<bool, SurfaceError> {
        if self.popup_blocked {
            return Ok(false);
        }
        self.opened.push(url.to_owned());
        Ok(true)
    }

    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.navigated.push(url.to_owned());
        Ok(())
    }
}
