//! Incremental delivery of ranked results.
//!
//! The pager exposes a monotonically growing window over the ranked sequence.
//! Growth is driven by two external signals: a viewport-intersection trigger
//! and a manual fill check run whenever the visible window is recomputed.
//! Both funnel through one throttle so a burst of scroll events grows the
//! window once per interval. The pager itself has no notion of a DOM; tests
//! and embedders feed it synthetic signals.

use std::time::{Duration, Instant};

use crate::state::types::PackageItem;

/// Window growth step and initial size.
pub const PAGE_SIZE: usize = 20;

/// Minimum interval between two window growths.
pub const LOAD_MORE_COOLDOWN: Duration = Duration::from_millis(100);

/// Growing window over a ranked result sequence.
#[derive(Clone, Debug)]
pub struct Pager {
    window_size: usize,
    end_of_results: bool,
    cooldown_until: Option<Instant>,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new()
    }
}

impl Pager {
    /// Start with one page visible.
    pub fn new() -> Self {
        Self {
            window_size: PAGE_SIZE,
            end_of_results: false,
            cooldown_until: None,
        }
    }

    /// Current window size; never decreases except through [`Pager::reset`].
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Whether the window already covers the whole ranked sequence.
    pub fn end_of_results(&self) -> bool {
        self.end_of_results
    }

    /// Shrink back to one page, e.g. after the source toggles change.
    pub fn reset(&mut self) {
        self.window_size = PAGE_SIZE;
        self.end_of_results = false;
    }

    /// The visible prefix of `ranked`, at most [`Pager::window_size`] long.
    pub fn visible<'a>(&self, ranked: &'a [PackageItem]) -> &'a [PackageItem] {
        &ranked[..self.window_size.min(ranked.len())]
    }

    /// What: Grow the window by one page in response to a scroll trigger.
    ///
    /// Inputs:
    /// - `total`: Length of the current ranked sequence.
    ///
    /// Output:
    /// - Window grows by [`PAGE_SIZE`] and `end_of_results` is recomputed,
    ///   unless a growth already ran within [`LOAD_MORE_COOLDOWN`]; then the
    ///   call is ignored.
    pub fn load_more(&mut self, total: usize) {
        self.load_more_at(Instant::now(), total);
    }

    pub(crate) fn load_more_at(&mut self, now: Instant, total: usize) {
        if !self.begin_growth(now) {
            return;
        }
        self.window_size += PAGE_SIZE;
        self.end_of_results = self.window_size >= total;
    }

    /// What: Manual fill check that grows when the rendered content does not
    /// yet fill the viewport.
    ///
    /// Inputs:
    /// - `content_height` / `viewport_height`: Current layout measurements
    ///   supplied by the embedding renderer.
    /// - `total`: Length of the current ranked sequence.
    ///
    /// Output:
    /// - Delegates to the throttled growth when the content falls short;
    ///   otherwise a no-op.
    pub fn check_viewport(&mut self, content_height: u32, viewport_height: u32, total: usize) {
        self.check_viewport_at(Instant::now(), content_height, viewport_height, total);
    }

    pub(crate) fn check_viewport_at(
        &mut self,
        now: Instant,
        content_height: u32,
        viewport_height: u32,
        total: usize,
    ) {
        if content_height < viewport_height {
            self.load_more_at(now, total);
        }
    }

    fn begin_growth(&mut self, now: Instant) -> bool {
        if self.cooldown_until.is_some_and(|until| now < until) {
            return false;
        }
        self.cooldown_until = Some(now + LOAD_MORE_COOLDOWN);
        true
    }
}
