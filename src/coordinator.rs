//! The UI state coordinator: owns every controller and routes host events.
//!
//! DESIGN
//! ======
//! The host translates browser events into [`UiEvent`]s and calls
//! [`Coordinator::dispatch`] with the current timestamp. Each event is routed
//! to the controller that owns it; controllers mutate their own state and the
//! page through the [`Surface`]. Anything the coordinator cannot do itself
//! (suppress the browser default, schedule a frame or timer, broadcast the
//! theme, show a toast) comes back as [`Action`]s for the host to perform.
//!
//! Overlay policy: the menu and the modal share one overlay slot. Opening
//! either closes the other first, so at most one is visible and page scroll is
//! locked exactly while one is open.
//!
//! Scroll work (scroll-spy, back-to-top, parallax) is deferred to the next
//! animation frame, so any number of scroll events between two frames costs
//! one pass. The cursor ring shares the same frame loop.

#[cfg(test)]
#[path = "coordinator_test.rs"]
mod coordinator_test;

use crate::config::Config;
use crate::consts;
use crate::cursor::CursorFollower;
use crate::error::{InitError, SurfaceError, soft};
use crate::event::{CertificateRef, Control, InputSource, Key, UiEvent};
use crate::focus;
use crate::menu::MenuController;
use crate::modal::ModalController;
use crate::overlay::ScrollLock;
use crate::scroll_fx::{self, BackToTop};
use crate::sections::SectionTracker;
use crate::surface::Surface;
use crate::theme::{ThemeController, ThemeMode};
use crate::timing::{DeadlineKind, Deadlines, FrameGate, timer_delay};

/// Work returned from [`Coordinator::dispatch`] for the host to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Suppress the browser's default handling of the current event.
    PreventDefault,
    /// Call back with [`UiEvent::Frame`] on the next animation frame.
    RequestFrame,
    /// Drop the outstanding animation frame request.
    CancelFrame,
    /// Call back with [`UiEvent::Timer`] after this many milliseconds.
    ScheduleTimer { delay_ms: u32 },
    /// Broadcast the `themeChanged` notification.
    ThemeChanged(ThemeMode),
    /// Show a transient notification.
    Notify(String),
}

pub struct Coordinator {
    config: Config,
    theme: ThemeController,
    sections: SectionTracker,
    menu: Option<MenuController>,
    modal: Option<ModalController>,
    back_to_top: Option<BackToTop>,
    cursor: Option<CursorFollower>,
    scroll: ScrollLock,
    frame: FrameGate,
    deadlines: Deadlines,
    offset: f64,
    scroll_dirty: bool,
    hidden: bool,
}

impl Coordinator {
    /// Bind every controller to the page.
    ///
    /// Only an invalid config or a page without `<body>` fails startup. Each
    /// optional feature is bound on its own; one missing piece of markup
    /// disables that feature and nothing else.
    pub fn start(surface: &mut dyn Surface, config: Config) -> Result<(Self, Vec<Action>), InitError> {
        config.validate()?;
        if !surface.exists(consts::BODY) {
            return Err(SurfaceError::missing(consts::BODY).into());
        }
        soft("loading marker", surface.set_class(consts::BODY, consts::LOADING_CLASS, true));

        let theme = ThemeController::initialize(surface, &config);
        let mut sections = SectionTracker::new(config.section_offset_px);
        sections.recompute_layout(surface);

        let menu = soft("mobile menu", MenuController::new(surface, &config));
        let modal = soft("certificate modal", ModalController::new(surface));
        let back_to_top = soft("back-to-top", BackToTop::new(surface, config.back_to_top_px));
        let cursor = if config.fine_pointer {
            soft("custom cursor", CursorFollower::new(surface, &config))
        } else {
            log::debug!("coarse pointer, custom cursor disabled");
            None
        };

        let mut coordinator = Self {
            offset: surface.scroll_offset(),
            config,
            theme,
            sections,
            menu,
            modal,
            back_to_top,
            cursor,
            scroll: ScrollLock::default(),
            frame: FrameGate::default(),
            deadlines: Deadlines::default(),
            scroll_dirty: true,
            hidden: false,
        };
        log::info!(
            "coordinator started (menu: {}, modal: {}, cursor: {})",
            coordinator.menu.is_some(),
            coordinator.modal.is_some(),
            coordinator.cursor.is_some()
        );

        let mut actions = Vec::new();
        coordinator.request_frame(&mut actions);
        Ok((coordinator, actions))
    }

    /// Route one host event. `now` is the host clock in milliseconds.
    pub fn dispatch(&mut self, surface: &mut dyn Surface, event: UiEvent, now: f64) -> Vec<Action> {
        let mut out = Vec::new();
        match event {
            UiEvent::Activate { control, source } => self.activate(surface, control, source, now, &mut out),
            UiEvent::KeyDown { key, control } => self.key_down(surface, key, control, now, &mut out),
            UiEvent::Scroll { offset } => {
                self.offset = offset;
                self.scroll_dirty = true;
                self.request_frame(&mut out);
            }
            UiEvent::Frame => self.run_frame(surface, now, &mut out),
            UiEvent::Timer => self.run_timers(surface, now, &mut out),
            UiEvent::Resize => self.schedule(DeadlineKind::LayoutSettle, now, self.config.resize_debounce_ms, &mut out),
            UiEvent::Loaded => {
                soft("loading marker", surface.set_class(consts::BODY, consts::LOADING_CLASS, false));
                soft("loaded marker", surface.set_class(consts::BODY, consts::LOADED_CLASS, true));
                self.relayout(surface, &mut out);
            }
            UiEvent::VisibilityChanged { hidden } => self.set_hidden(hidden, &mut out),
            UiEvent::ColorSchemeChanged { prefers_dark } => {
                if let Some(mode) = self.theme.on_system_change(prefers_dark, surface) {
                    out.push(Action::ThemeChanged(mode));
                }
            }
            UiEvent::StorageChanged { key, value } => {
                if let Some(mode) = self.theme.on_storage_change(&key, value.as_deref(), surface) {
                    out.push(Action::ThemeChanged(mode));
                }
            }
            UiEvent::PointerMove { x, y } => {
                if let Some(cursor) = self.cursor.as_mut()
                    && cursor.on_move(x, y, surface)
                {
                    self.request_frame(&mut out);
                }
            }
            UiEvent::Hover { entered } => {
                if let Some(cursor) = &self.cursor {
                    cursor.hover(entered, surface);
                }
            }
            UiEvent::ContextMenu { on_image } => {
                if on_image {
                    out.push(Action::PreventDefault);
                    out.push(Action::Notify(consts::IMAGE_PROTECTED_NOTICE.to_owned()));
                }
            }
        }
        out
    }

    // --- Public entry points ---

    pub fn toggle_theme(&mut self, surface: &mut dyn Surface, now: f64) -> Vec<Action> {
        self.dispatch(surface, script(Control::ThemeToggle), now)
    }

    pub fn toggle_menu(&mut self, surface: &mut dyn Surface, now: f64) -> Vec<Action> {
        self.dispatch(surface, script(Control::MenuToggle), now)
    }

    pub fn close_menu(&mut self, surface: &mut dyn Surface, now: f64) -> Vec<Action> {
        self.dispatch(surface, script(Control::MenuClose), now)
    }

    pub fn scroll_to_top(&mut self, surface: &mut dyn Surface, now: f64) -> Vec<Action> {
        self.dispatch(surface, script(Control::BackToTop), now)
    }

    pub fn open_resume(&mut self, surface: &mut dyn Surface, now: f64) -> Vec<Action> {
        self.dispatch(surface, script(Control::Resume), now)
    }

    // --- Queries ---

    #[must_use]
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme.mode()
    }

    #[must_use]
    pub fn active_section(&self) -> Option<&str> {
        self.sections.active()
    }

    #[must_use]
    pub fn menu_open(&self) -> bool {
        self.menu.as_ref().is_some_and(MenuController::is_open)
    }

    #[must_use]
    pub fn modal_open(&self) -> bool {
        self.modal.as_ref().is_some_and(ModalController::is_open)
    }

    #[must_use]
    pub fn scroll_locked(&self) -> bool {
        self.scroll.is_locked()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    // --- Controls ---

    fn activate(
        &mut self,
        surface: &mut dyn Surface,
        control: Control,
        source: InputSource,
        now: f64,
        out: &mut Vec<Action>,
    ) {
        log::debug!("activate {control:?} via {source:?}");
        let prevent = source != InputSource::Script;
        match control {
            Control::ThemeToggle => {
                if prevent {
                    out.push(Action::PreventDefault);
                }
                if let Some(mode) = self.theme.toggle(surface, now) {
                    self.schedule(DeadlineKind::PulseReset, now, self.config.pulse_ms, out);
                    out.push(Action::ThemeChanged(mode));
                }
            }
            Control::MenuToggle => {
                if prevent {
                    out.push(Action::PreventDefault);
                }
                self.toggle_menu_at(surface, now);
            }
            Control::MenuClose => {
                self.close_menu_now(surface);
            }
            Control::NavLink { target } => {
                if prevent {
                    out.push(Action::PreventDefault);
                }
                self.navigate_to(surface, &target);
            }
            Control::BackToTop => {
                soft("scroll to top", surface.scroll_to(0.0));
            }
            Control::ModalClose | Control::ModalBackdrop => {
                self.close_modal_now(surface);
            }
            Control::Certificate(reference) => {
                if prevent && self.modal.is_some() {
                    out.push(Action::PreventDefault);
                }
                self.open_certificate(surface, reference);
            }
            Control::Resume => self.launch_resume(surface, out),
        }
    }

    fn key_down(
        &mut self,
        surface: &mut dyn Surface,
        key: Key,
        control: Option<Control>,
        now: f64,
        out: &mut Vec<Action>,
    ) {
        match key {
            Key::Escape => {
                if self.close_modal_now(surface) {
                    return;
                }
                if self.close_menu_now(surface) {
                    soft("return focus", surface.focus(consts::HAMBURGER_BUTTON));
                }
            }
            Key::Tab { shift } => {
                let container = if self.modal_open() {
                    consts::MODAL
                } else if self.menu_open() {
                    consts::MENU_PANEL
                } else {
                    return;
                };
                if focus::trap_tab(surface, container, shift) {
                    out.push(Action::PreventDefault);
                }
            }
            Key::Enter | Key::Space => {
                if let Some(control) = control
                    && control.is_keyboard_activated()
                {
                    self.activate(surface, control, InputSource::Keyboard, now, out);
                }
            }
            Key::Other(_) => {}
        }
    }

    fn toggle_menu_at(&mut self, surface: &mut dyn Surface, now: f64) {
        let Some(menu) = self.menu.as_mut() else {
            log::debug!("no mobile menu on this page");
            return;
        };
        let opening = !menu.is_open() && !menu.is_locked(now);
        if opening && let Some(modal) = self.modal.as_mut() {
            modal.close(surface, &mut self.scroll);
        }
        menu.toggle(surface, now, &mut self.scroll);
    }

    fn close_menu_now(&mut self, surface: &mut dyn Surface) -> bool {
        match self.menu.as_mut() {
            Some(menu) => menu.close(surface, &mut self.scroll),
            None => false,
        }
    }

    fn close_modal_now(&mut self, surface: &mut dyn Surface) -> bool {
        match self.modal.as_mut() {
            Some(modal) => modal.close(surface, &mut self.scroll),
            None => false,
        }
    }

    fn open_certificate(&mut self, surface: &mut dyn Surface, reference: CertificateRef) {
        let Some(modal) = self.modal.as_mut() else {
            log::debug!("no certificate modal on this page");
            return;
        };
        if let Some(menu) = self.menu.as_mut() {
            menu.close(surface, &mut self.scroll);
        }
        modal.open_with(reference, surface, &mut self.scroll);
    }

    /// Close the menu and smooth-scroll to the section with `target` id.
    fn navigate_to(&mut self, surface: &mut dyn Surface, target: &str) {
        let anchor = format!("#{target}");
        let Some(top) = surface.offset_top(&anchor) else {
            log::debug!("nav target {anchor} not found");
            return;
        };
        self.close_menu_now(surface);
        let navbar = scroll_fx::navbar_height(surface, self.config.navbar_height_px);
        let dest = scroll_fx::smooth_scroll_target(top, navbar, self.config.scroll_margin_px);
        soft("scroll to section", surface.scroll_to(dest));
    }

    fn launch_resume(&mut self, surface: &mut dyn Surface, out: &mut Vec<Action>) {
        let url = self.config.resume_url.clone();
        let opened = match surface.open_window(&url) {
            Ok(true) => Ok(()),
            Ok(false) => {
                log::info!("resume popup blocked, navigating instead");
                surface.navigate(&url)
            }
            Err(e) => {
                log::warn!("resume window failed: {e}");
                surface.navigate(&url).and(Err(e))
            }
        };
        let notice = match opened {
            Ok(()) => consts::RESUME_OPENED_NOTICE,
            Err(e) => {
                log::error!("resume open failed: {e}");
                consts::RESUME_FAILED_NOTICE
            }
        };
        out.push(Action::Notify(notice.to_owned()));
    }

    // --- Frames and timers ---

    fn request_frame(&mut self, out: &mut Vec<Action>) {
        if !self.hidden && self.frame.request() {
            out.push(Action::RequestFrame);
        }
    }

    fn run_frame(&mut self, surface: &mut dyn Surface, now: f64, out: &mut Vec<Action>) {
        if !self.frame.take() {
            return;
        }
        if std::mem::take(&mut self.scroll_dirty) {
            let offset = self.offset;
            if let Some(id) = self.sections.on_scroll(offset, surface) {
                log::debug!("active section: {id}");
            }
            if let Some(btn) = self.back_to_top.as_mut()
                && btn.update(offset, surface) == Some(false)
            {
                self.schedule(DeadlineKind::BackToTopFade, now, self.config.fade_ms, out);
            }
            scroll_fx::apply_parallax(surface, offset, &self.config);
        }
        if let Some(cursor) = self.cursor.as_mut()
            && cursor.step(surface)
        {
            self.request_frame(out);
        }
    }

    fn run_timers(&mut self, surface: &mut dyn Surface, now: f64, out: &mut Vec<Action>) {
        for kind in self.deadlines.take_due(now) {
            match kind {
                DeadlineKind::LayoutSettle => self.relayout(surface, out),
                DeadlineKind::PulseReset => self.theme.set_pulse(surface, false),
                DeadlineKind::BackToTopFade => {
                    if let Some(btn) = &self.back_to_top {
                        btn.finish_fade(surface);
                    }
                }
            }
        }
        // A host timer can fire slightly before its deadline on a coarse
        // clock; re-arm for whatever is still pending.
        if let Some(at) = self.deadlines.next_due() {
            out.push(Action::ScheduleTimer { delay_ms: timer_delay(at - now) });
        }
    }

    fn schedule(&mut self, kind: DeadlineKind, now: f64, delay: f64, out: &mut Vec<Action>) {
        self.deadlines.set(kind, now + delay);
        out.push(Action::ScheduleTimer { delay_ms: timer_delay(delay) });
    }

    fn relayout(&mut self, surface: &mut dyn Surface, out: &mut Vec<Action>) {
        self.sections.recompute_layout(surface);
        scroll_fx::adjust_landing_padding(surface, &self.config);
        self.scroll_dirty = true;
        self.request_frame(out);
    }

    fn set_hidden(&mut self, hidden: bool, out: &mut Vec<Action>) {
        self.hidden = hidden;
        let resume_cursor = self.cursor.as_mut().is_some_and(|c| c.set_hidden(hidden));
        if hidden {
            if self.frame.cancel() {
                out.push(Action::CancelFrame);
            }
        } else if resume_cursor || self.scroll_dirty {
            self.request_frame(out);
        }
    }
}

fn script(control: Control) -> UiEvent {
    UiEvent::Activate { control, source: InputSource::Script }
}
