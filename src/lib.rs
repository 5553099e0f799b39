//! UI state coordinator for the portfolio site.
//!
//! This crate is compiled to WebAssembly and runs in the page. It owns the
//! interactive state that the markup cannot hold on its own: the persisted
//! theme, the scroll-spy highlight, the mobile menu and certificate modal
//! overlays, and the scroll-driven effects around them. Everything below
//! [`coordinator`] talks to the page through the [`surface::Surface`] trait and
//! receives time as a parameter, so it builds and tests natively. The
//! [`web`] module (feature `hydrate`) binds it to the live DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`coordinator`] | Top-level event router and the [`coordinator::Action`]s it emits |
//! | [`theme`] | Light/dark mode, persistence, system preference tracking |
//! | [`prefs`] | Preference stores (local, session, cookie) and legacy keys |
//! | [`sections`] | Section layout cache and scroll-spy highlight |
//! | [`menu`] | Mobile navigation overlay |
//! | [`modal`] | Certificate viewer overlay |
//! | [`overlay`] | Single-holder scroll lock shared by the overlays |
//! | [`focus`] | Focus entry and Tab trapping inside overlays |
//! | [`scroll_fx`] | Back-to-top control, parallax, smooth-scroll targets |
//! | [`cursor`] | Eased custom cursor on fine pointers |
//! | [`fallback`] | Degraded behavior when the coordinator cannot start |
//! | [`timing`] | Toggle locks, frame gating, deadlines, retry backoff |
//! | [`event`] | Input model handed over by the host |
//! | [`surface`] | Page capability trait |
//! | [`config`] | Tunables with live-page defaults |
//! | [`error`] | Error types and best-effort logging |
//! | [`consts`] | Page selectors, marker classes, notices |

pub mod config;
pub mod consts;
pub mod coordinator;
pub mod cursor;
pub mod error;
pub mod event;
pub mod fallback;
pub mod focus;
pub mod menu;
pub mod modal;
pub mod overlay;
pub mod prefs;
pub mod scroll_fx;
pub mod sections;
pub mod surface;
pub mod theme;
pub mod timing;

#[cfg(test)]
mod fake_surface;

#[cfg(feature = "hydrate")]
pub mod web;
