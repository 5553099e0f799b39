//! [`Surface`] over the live DOM via `web-sys`.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlDocument, HtmlElement, Node, NodeList, ScrollBehavior, ScrollToOptions, Window};

use crate::consts;
use crate::error::SurfaceError;
use crate::prefs::{cookie_assignment, cookie_value};
use crate::surface::{SectionBox, StorageKind, Surface};

/// Elements that take part in an overlay's focus cycle.
const FOCUSABLE: &str =
    "a[href], button:not([disabled]), input:not([disabled]), select, textarea, [tabindex]:not([tabindex=\"-1\"])";

pub struct DomSurface {
    window: Window,
    document: Document,
    cookie_max_age_secs: u32,
}

impl DomSurface {
    pub fn new(cookie_max_age_secs: u32) -> Result<Self, SurfaceError> {
        let window = web_sys::window().ok_or_else(|| SurfaceError::Host("no window".into()))?;
        let document = window.document().ok_or_else(|| SurfaceError::Host("no document".into()))?;
        Ok(Self { window, document, cookie_max_age_secs })
    }

    fn first(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                log::debug!("bad selector {selector}: {e:?}");
                None
            }
        }
    }

    fn first_html(&self, selector: &str) -> Option<HtmlElement> {
        self.first(selector).and_then(|el| el.dyn_ref::<HtmlElement>().cloned())
    }

    fn all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(e) => {
                log::debug!("bad selector {selector}: {e:?}");
                Vec::new()
            }
        }
    }

    /// Run `f` on every element matching `selector`.
    fn each(
        &self,
        selector: &str,
        mut f: impl FnMut(&Element) -> Result<(), JsValue>,
    ) -> Result<(), SurfaceError> {
        let found = self.all(selector);
        if found.is_empty() {
            return Err(SurfaceError::missing(selector));
        }
        for el in &found {
            f(el).map_err(host_err)?;
        }
        Ok(())
    }

    fn focusables(&self, container: &str) -> Vec<Element> {
        let Some(root) = self.first(container) else {
            return Vec::new();
        };
        match root.query_selector_all(FOCUSABLE) {
            Ok(list) => elements(&list),
            Err(_) => Vec::new(),
        }
    }

    fn cookie_jar(&self) -> Result<&HtmlDocument, SurfaceError> {
        self.document
            .dyn_ref::<HtmlDocument>()
            .ok_or_else(|| storage_err(StorageKind::Cookie, "not an HTML document"))
    }

    fn web_storage(&self, kind: StorageKind) -> Result<web_sys::Storage, SurfaceError> {
        let store = match kind {
            StorageKind::Local => self.window.local_storage(),
            StorageKind::Session => self.window.session_storage(),
            StorageKind::Cookie => return Err(storage_err(kind, "not a web storage area")),
        };
        match store {
            Ok(Some(store)) => Ok(store),
            Ok(None) => Err(storage_err(kind, "unavailable")),
            Err(e) => Err(storage_err(kind, &format!("{e:?}"))),
        }
    }
}

impl Surface for DomSurface {
    fn exists(&self, selector: &str) -> bool {
        self.first(selector).is_some()
    }

    fn has_class(&self, selector: &str, class: &str) -> bool {
        self.first(selector).is_some_and(|el| el.class_list().contains(class))
    }

    fn set_class(&mut self, selector: &str, class: &str, on: bool) -> Result<(), SurfaceError> {
        self.each(selector, |el| el.class_list().toggle_with_force(class, on).map(|_| ()))
    }

    fn set_class_where(&mut self, selector: &str, tag: &str, class: &str, on: bool) -> Result<(), SurfaceError> {
        let tagged: Vec<_> = self.all(selector).into_iter().filter(|el| el.class_list().contains(tag)).collect();
        if tagged.is_empty() {
            return Err(SurfaceError::missing(selector));
        }
        for el in &tagged {
            el.class_list().toggle_with_force(class, on).map_err(host_err)?;
        }
        Ok(())
    }

    fn set_attribute(&mut self, selector: &str, name: &str, value: &str) -> Result<(), SurfaceError> {
        self.each(selector, |el| el.set_attribute(name, value))
    }

    fn set_style(&mut self, selector: &str, property: &str, value: &str) -> Result<(), SurfaceError> {
        self.each(selector, |el| match el.dyn_ref::<HtmlElement>() {
            Some(html) => html.style().set_property(property, value),
            None => Ok(()),
        })
    }

    fn set_text(&mut self, selector: &str, text: &str) -> Result<(), SurfaceError> {
        self.each(selector, |el| {
            el.set_text_content(Some(text));
            Ok(())
        })
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64) -> Result<(), SurfaceError> {
        let opts = ScrollToOptions::new();
        opts.set_top(top);
        opts.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&opts);
        Ok(())
    }

    fn offset_top(&self, selector: &str) -> Option<f64> {
        self.first_html(selector).map(|el| f64::from(el.offset_top()))
    }

    fn offset_height(&self, selector: &str) -> Option<f64> {
        self.first_html(selector).map(|el| f64::from(el.offset_height()))
    }

    fn sections(&self, selector: &str) -> Vec<SectionBox> {
        self.all(selector)
            .into_iter()
            .filter_map(|el| el.dyn_ref::<HtmlElement>().cloned())
            .map(|el| SectionBox {
                id: el.id(),
                top: f64::from(el.offset_top()),
                height: f64::from(el.offset_height()),
            })
            .collect()
    }

    fn focusable_count(&self, container: &str) -> usize {
        self.focusables(container).len()
    }

    fn focused_index(&self, container: &str) -> Option<usize> {
        let active = self.document.active_element()?;
        let active: &Node = active.as_ref();
        self.focusables(container)
            .iter()
            .position(|el| el.is_same_node(Some(active)))
    }

    fn focus_nth(&mut self, container: &str, index: usize) -> Result<(), SurfaceError> {
        let target = self
            .focusables(container)
            .into_iter()
            .nth(index)
            .ok_or_else(|| SurfaceError::missing(container))?;
        focus_element(&target)
    }

    fn focus(&mut self, selector: &str) -> Result<(), SurfaceError> {
        let target = self.first(selector).ok_or_else(|| SurfaceError::missing(selector))?;
        focus_element(&target)
    }

    fn storage_get(&self, kind: StorageKind, key: &str) -> Result<Option<String>, SurfaceError> {
        if kind == StorageKind::Cookie {
            let jar = self.cookie_jar()?.cookie().map_err(|e| storage_err(kind, &format!("{e:?}")))?;
            return Ok(cookie_value(&jar, key));
        }
        self.web_storage(kind)?
            .get_item(key)
            .map_err(|e| storage_err(kind, &format!("{e:?}")))
    }

    fn storage_set(&mut self, kind: StorageKind, key: &str, value: &str) -> Result<(), SurfaceError> {
        if kind == StorageKind::Cookie {
            let assignment = cookie_assignment(key, value, self.cookie_max_age_secs);
            return self
                .cookie_jar()?
                .set_cookie(&assignment)
                .map_err(|e| storage_err(kind, &format!("{e:?}")));
        }
        self.web_storage(kind)?
            .set_item(key, value)
            .map_err(|e| storage_err(kind, &format!("{e:?}")))
    }

    fn storage_remove(&mut self, kind: StorageKind, key: &str) -> Result<(), SurfaceError> {
        if kind == StorageKind::Cookie {
            return self
                .cookie_jar()?
                .set_cookie(&cookie_assignment(key, "", 0))
                .map_err(|e| storage_err(kind, &format!("{e:?}")));
        }
        self.web_storage(kind)?
            .remove_item(key)
            .map_err(|e| storage_err(kind, &format!("{e:?}")))
    }

    fn prefers_dark(&self) -> Option<bool> {
        match self.window.match_media(consts::DARK_SCHEME_QUERY) {
            Ok(Some(query)) => Some(query.matches()),
            _ => None,
        }
    }

    fn open_window(&mut self, url: &str) -> Result<bool, SurfaceError> {
        match self.window.open_with_url_and_target(url, "_blank").map_err(host_err)? {
            Some(opened) => {
                // Detach the new context from this page.
                if let Err(e) = opened.set_opener(&JsValue::NULL) {
                    log::debug!("could not clear opener: {e:?}");
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn navigate(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.window.location().set_href(url).map_err(host_err)
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect()
}

fn focus_element(el: &Element) -> Result<(), SurfaceError> {
    match el.dyn_ref::<HtmlElement>() {
        Some(html) => html.focus().map_err(host_err),
        None => Err(SurfaceError::Host("element is not focusable".into())),
    }
}

fn host_err(e: JsValue) -> SurfaceError {
    SurfaceError::Host(format!("{e:?}"))
}

fn storage_err(kind: StorageKind, reason: &str) -> SurfaceError {
    SurfaceError::Storage { backend: kind.name(), reason: reason.to_owned() }
}
