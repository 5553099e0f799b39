//! Time-window primitives: reentrancy locks, frame gating, named deadlines.
//!
//! DESIGN
//! ======
//! Nothing here owns a real timer. Every call takes the host's timestamp in
//! milliseconds, so behavior under rapid input is fully determined by the
//! timestamps a test passes in. The coordinator turns pending deadlines and
//! frame requests into `Action`s and the host schedules the actual callbacks.

#[cfg(test)]
#[path = "timing_test.rs"]
mod timing_test;

/// Drops a second toggle that arrives inside the cool-down window of the first.
///
/// Covers duplicate event types for one physical gesture (`click` after
/// `touchend`, or Enter on a button that also clicks).
#[derive(Debug, Clone)]
pub struct ToggleLock {
    window_ms: f64,
    held_until: Option<f64>,
}

impl ToggleLock {
    #[must_use]
    pub fn new(window_ms: f64) -> Self {
        Self { window_ms, held_until: None }
    }

    /// Take the lock at `now`. Returns `false` (and changes nothing) while a
    /// previous acquisition is still cooling down.
    pub fn try_acquire(&mut self, now: f64) -> bool {
        if self.is_held(now) {
            return false;
        }
        self.held_until = Some(now + self.window_ms);
        true
    }

    #[must_use]
    pub fn is_held(&self, now: f64) -> bool {
        self.held_until.is_some_and(|until| now < until)
    }
}

/// Tracks whether an animation frame has been requested from the host.
///
/// At most one request is outstanding; work queued before the frame fires is
/// folded into that single pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameGate {
    pending: bool,
}

impl FrameGate {
    /// Returns `true` when the caller must ask the host for a frame.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the outstanding request. Frames nobody asked for return `false`.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Drop the outstanding request. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_pending(self) -> bool {
        self.pending
    }
}

/// Delayed work the coordinator has scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineKind {
    /// Resize input has settled; recompute section layout.
    LayoutSettle,
    /// Remove the toggle pulse marker.
    PulseReset,
    /// Finish hiding the back-to-top control.
    BackToTopFade,
}

/// One pending deadline per kind. Setting a kind again replaces it, which is
/// what gives resize its debounce behavior.
#[derive(Debug, Clone, Default)]
pub struct Deadlines {
    entries: Vec<(DeadlineKind, f64)>,
}

impl Deadlines {
    pub fn set(&mut self, kind: DeadlineKind, at: f64) {
        self.cancel(kind);
        self.entries.push((kind, at));
    }

    pub fn cancel(&mut self, kind: DeadlineKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != kind);
        self.entries.len() != before
    }

    #[cfg(test)]
    #[must_use]
    pub fn is_pending(&self, kind: DeadlineKind) -> bool {
        self.entries.iter().any(|(k, _)| *k == kind)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_due(&self) -> Option<f64> {
        self.entries.iter().map(|(_, at)| *at).min_by(f64::total_cmp)
    }

    /// Remove and return every deadline due at `now`, earliest first.
    pub fn take_due(&mut self, now: f64) -> Vec<DeadlineKind> {
        let mut due = self
            .entries
            .iter()
            .filter(|(_, at)| *at <= now)
            .copied()
            .collect::<Vec<_>>();
        due.sort_by(|a, b| a.1.total_cmp(&b.1));
        self.entries.retain(|(_, at)| *at > now);
        due.into_iter().map(|(kind, _)| kind).collect()
    }
}

/// Linear backoff for coordinator startup: attempt `n` waits `n * base_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_ms: u32,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts, base_ms: 1000 }
    }

    /// Delay before retry number `attempt` (1-based), or `None` once the
    /// budget is spent.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Option<u32> {
        if attempt == 0 || attempt > self.max_attempts {
            return None;
        }
        Some(self.base_ms.saturating_mul(attempt))
    }
}

/// Round a millisecond span up to a host timer delay.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn timer_delay(ms: f64) -> u32 {
    if ms.is_finite() && ms > 0.0 {
        ms.ceil().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
